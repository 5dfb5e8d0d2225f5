//! Demand Checks
//!
//! Compare factored demands against design capacities. Results expose a
//! unity ratio (demand / capacity) and `passes()` when it does not exceed 1.0.
//!
//! Axial-flexural demand is measured along the ray from the origin through
//! (|Mu|, Pu): the capacity is where that ray leaves the reduced envelope.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::{require_finite, CalcError, CalcResult};

use super::interaction::InteractionDiagram;
use super::reduction::StrengthReduction;
use super::shear::ShearResult;

/// Axial-flexural check result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlexureCheck {
    /// Factored axial load Pu (kN, compression positive)
    pub pu_kn: f64,
    /// Factored moment |Mu| (kN·m)
    pub mu_knm: f64,
    /// φPn where the demand ray meets the envelope (kN)
    pub capacity_axial_kn: f64,
    /// φMn where the demand ray meets the envelope (kN·m)
    pub capacity_moment_knm: f64,
    /// Demand / capacity along the ray
    pub unity: f64,
}

impl FlexureCheck {
    pub fn passes(&self) -> bool {
        self.unity <= 1.0
    }
}

/// Shear check result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShearCheck {
    /// Factored shear |Vu| (kN)
    pub vu_kn: f64,
    /// Governing design strength (kN)
    pub capacity_kn: f64,
    pub unity: f64,
}

impl ShearCheck {
    pub fn passes(&self) -> bool {
        self.unity <= 1.0
    }
}

/// Check (Pu, Mu) against the design envelope of `diagram`.
///
/// A non-zero Mu must carry the sign of the diagram's bending direction:
/// positive for [`BendingDirection::Positive`](crate::section::BendingDirection::Positive),
/// negative for `Negative`.
pub fn check_axial_flexure(
    diagram: &InteractionDiagram,
    reduction: &StrengthReduction,
    pu_kn: f64,
    mu_knm: f64,
) -> CalcResult<FlexureCheck> {
    require_finite("pu_kn", pu_kn)?;
    require_finite("mu_knm", mu_knm)?;
    let direction = diagram.direction();
    if mu_knm != 0.0 && mu_knm.signum() != direction.moment_sign() {
        return Err(CalcError::validation(
            "mu_knm",
            mu_knm.to_string(),
            format!("Moment sign does not match the {direction} diagram; check it against the opposite direction"),
        ));
    }

    let mu = mu_knm.abs();
    let design = diagram.reduced(reduction)?;

    // Envelope polyline in (|M|, P), closed onto the P axis at both ends
    let mut envelope: Vec<(f64, f64)> = Vec::with_capacity(design.len() + 2);
    if let (Some(first), Some(last)) = (design.first(), design.last()) {
        envelope.push((0.0, first.phi_axial_kn));
        envelope.extend(design.iter().map(|p| (p.phi_moment_knm.abs(), p.phi_axial_kn)));
        envelope.push((0.0, last.phi_axial_kn));
    }

    if mu == 0.0 && pu_kn == 0.0 {
        return Ok(FlexureCheck {
            pu_kn,
            mu_knm: mu,
            capacity_axial_kn: 0.0,
            capacity_moment_knm: 0.0,
            unity: 0.0,
        });
    }

    let scale = ray_scale(&envelope, (mu, pu_kn)).ok_or_else(|| {
        CalcError::computation(
            "demand check",
            format!("demand ray through (M = {mu}, P = {pu_kn}) does not meet the design envelope"),
        )
    })?;

    let check = FlexureCheck {
        pu_kn,
        mu_knm: mu,
        capacity_axial_kn: scale * pu_kn,
        capacity_moment_knm: scale * mu,
        unity: 1.0 / scale,
    };
    debug!(
        "P-M check: Pu = {:.1} kN, Mu = {:.1} kN·m, unity = {:.3}",
        pu_kn, mu, check.unity
    );
    Ok(check)
}

/// Smallest t > 0 such that `t·demand` lies on the polyline.
fn ray_scale(polyline: &[(f64, f64)], demand: (f64, f64)) -> Option<f64> {
    const EDGE_TOLERANCE: f64 = 1e-12;
    let (rx, ry) = demand;

    polyline
        .windows(2)
        .filter_map(|seg| {
            let (ax, ay) = seg[0];
            let (ex, ey) = (seg[1].0 - ax, seg[1].1 - ay);
            let det = ex * ry - rx * ey;
            if det == 0.0 {
                return None;
            }
            let t = (ex * ay - ax * ey) / det;
            let s = (rx * ay - ry * ax) / det;
            (t > 0.0 && (-EDGE_TOLERANCE..=1.0 + EDGE_TOLERANCE).contains(&s)).then_some(t)
        })
        .reduce(f64::min)
}

/// Check a factored shear against a shear capacity.
pub fn check_shear(result: &ShearResult, vu_kn: f64) -> ShearCheck {
    let vu = vu_kn.abs();
    let capacity = result.governing_design_kn();
    let unity = if vu == 0.0 {
        0.0
    } else if capacity > 0.0 {
        vu / capacity
    } else {
        f64::INFINITY
    };
    ShearCheck {
        vu_kn: vu,
        capacity_kn: capacity,
        unity,
    }
}
