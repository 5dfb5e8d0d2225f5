//! Strength Reduction Factors
//!
//! Post-processing of a nominal interaction diagram into design strengths.
//! The diagram itself is never modified.
//!
//! ## ACI 318-19 Table 21.2.2
//!
//! φ depends on the net tensile strain εt of the extreme tension bar:
//!
//! | εt                      | φ                          |
//! |-------------------------|----------------------------|
//! | `εt <= εty`             | φc = 0.65 (tied)           |
//! | `εty < εt < εty + 0.003`| linear between φc and φt   |
//! | `εt >= εty + 0.003`     | φt = 0.90                  |
//!
//! The design axial strength is further capped at `0.80·φc·Po`
//! (22.4.2.1, tied members).

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

use super::interaction::{CapacityPoint, ControlKind};

/// Strain increment beyond εty at which a section is tension-controlled
pub const TENSION_CONTROL_INCREMENT: f64 = 0.003;

/// How nominal strengths are reduced.
///
/// ## JSON
///
/// ```json
/// { "mode": "StrainBased", "phi_compression": 0.65, "phi_tension": 0.9, "axial_cap": 0.8 }
/// { "mode": "Constant", "phi": 0.7 }
/// { "mode": "Nominal" }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum StrengthReduction {
    /// φ = 1, no cap
    Nominal,
    /// Same φ for every point, no cap
    Constant { phi: f64 },
    /// φ interpolated on the net tensile strain
    StrainBased {
        phi_compression: f64,
        phi_tension: f64,
        /// Design axial strength ceiling as a fraction of `φc·Po`
        #[serde(default, skip_serializing_if = "Option::is_none")]
        axial_cap: Option<f64>,
    },
}

impl Default for StrengthReduction {
    fn default() -> Self {
        StrengthReduction::aci()
    }
}

impl StrengthReduction {
    /// ACI 318-19 factors for tied members
    pub fn aci() -> Self {
        StrengthReduction::StrainBased {
            phi_compression: 0.65,
            phi_tension: 0.90,
            axial_cap: Some(0.80),
        }
    }

    /// φ for a net tensile strain, given the yield strain εty of the extreme
    /// tension bar
    pub fn phi(&self, net_tensile_strain: f64, yield_strain: f64) -> f64 {
        match *self {
            StrengthReduction::Nominal => 1.0,
            StrengthReduction::Constant { phi } => phi,
            StrengthReduction::StrainBased {
                phi_compression,
                phi_tension,
                ..
            } => {
                if net_tensile_strain <= yield_strain {
                    phi_compression
                } else if net_tensile_strain >= yield_strain + TENSION_CONTROL_INCREMENT {
                    phi_tension
                } else {
                    let t = (net_tensile_strain - yield_strain) / TENSION_CONTROL_INCREMENT;
                    phi_compression + (phi_tension - phi_compression) * t
                }
            }
        }
    }

    /// Ceiling on the design axial strength (kN) for a nominal pure
    /// compression capacity `po_kn`
    pub fn axial_ceiling_kn(&self, po_kn: f64) -> Option<f64> {
        match *self {
            StrengthReduction::StrainBased {
                phi_compression,
                axial_cap: Some(cap),
                ..
            } => Some(cap * phi_compression * po_kn),
            _ => None,
        }
    }

    pub fn validate(&self) -> CalcResult<()> {
        let check = |field: &str, value: f64| {
            if value.is_finite() && value > 0.0 && value <= 1.0 {
                Ok(())
            } else {
                Err(CalcError::validation(
                    field,
                    value.to_string(),
                    "Factor must lie in (0, 1]",
                ))
            }
        };
        match *self {
            StrengthReduction::Nominal => Ok(()),
            StrengthReduction::Constant { phi } => check("reduction.phi", phi),
            StrengthReduction::StrainBased {
                phi_compression,
                phi_tension,
                axial_cap,
            } => {
                check("reduction.phi_compression", phi_compression)?;
                check("reduction.phi_tension", phi_tension)?;
                if let Some(cap) = axial_cap {
                    check("reduction.axial_cap", cap)?;
                }
                Ok(())
            }
        }
    }
}

/// A point of the design (reduced) envelope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignPoint {
    /// Index of the nominal point this one derives from
    pub index: usize,
    pub phi: f64,
    /// φPn (kN), after the axial ceiling
    pub phi_axial_kn: f64,
    /// φMn (kN·m)
    pub phi_moment_knm: f64,
}

/// Reduce nominal points. `points[0]` must be the pure compression point.
pub fn reduce(
    points: &[CapacityPoint],
    yield_strain: f64,
    reduction: &StrengthReduction,
) -> CalcResult<Vec<DesignPoint>> {
    reduction.validate()?;
    let po_kn = points
        .first()
        .map(|p| p.axial_kn)
        .ok_or_else(|| CalcError::computation("strength reduction", "diagram has no points"))?;
    let ceiling = reduction.axial_ceiling_kn(po_kn);

    Ok(points
        .iter()
        .enumerate()
        .map(|(index, point)| {
            // Pure tension is tension-controlled whatever its uniform strain
            let strain = match point.control {
                ControlKind::PureTension => f64::INFINITY,
                _ => point.net_tensile_strain,
            };
            let phi = reduction.phi(strain, yield_strain);
            let phi_axial = phi * point.axial_kn;
            DesignPoint {
                index,
                phi,
                phi_axial_kn: ceiling.map_or(phi_axial, |c| phi_axial.min(c)),
                phi_moment_knm: phi * point.moment_knm,
            }
        })
        .collect())
}
