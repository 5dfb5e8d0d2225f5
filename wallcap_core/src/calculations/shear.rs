//! # Shear Capacity
//!
//! In-plane shear strength of a wall or column section per ACI 318-19 (SI).
//!
//! ## Wall method (318-19 11.5.4, 18.10.4.1 with the 318-14 axial term)
//!
//! The αc·Acv base is 318-19 11.5.4. The axial compression term `Nu·d/(4·lw)`
//! is carried over from ACI 318-14 Table 11.5.4.6, which 318-19 dropped.
//!
//! ```text
//! Acv = bw · lw
//! αc  = 0.25 (hw/lw <= 1.5) .. 0.17 (hw/lw >= 2.0), linear between
//! Vc  = αc·λ·√f'c·Acv + Nu·d / (4·lw)      d = 0.8·lw, Nu > 0 only
//! Vs  = Av·fyt·lw / s
//! Vn <= 0.83·√f'c·Acv
//! ```
//!
//! Under net axial tension αc is reduced to `0.17·(1 + 0.29·Nu/Ag) >= 0`.
//!
//! ## Member method (22.5)
//!
//! ```text
//! d  = 0.8·L
//! Vc = 0.17·(1 + Nu/(14·Ag))·λ·√f'c·bw·d      compression
//! Vc = 0.17·(1 + 0.29·Nu/Ag)·λ·√f'c·bw·d >= 0  tension
//! Vs = Av·fyt·d / s
//! Vn <= Vc + 0.66·√f'c·bw·d
//! ```
//!
//! `Nu` is positive in compression. √f'c is limited to 8.3 MPa (22.5.3.1).
//!
//! ## Example
//!
//! ```rust
//! use wallcap_core::calculations::shear::{shear_capacity, TransverseReinforcement};
//! use wallcap_core::config::ShearConfig;
//! use wallcap_core::materials::{Concrete, Steel};
//! use wallcap_core::section::SectionBuilder;
//!
//! let section = SectionBuilder::new(200.0, 1000.0, Concrete::new(28.0))
//!     .layer(50.0, 4, 16.0, Steel::grade_420())
//!     .layer(950.0, 4, 16.0, Steel::grade_420())
//!     .build()
//!     .unwrap();
//! let ties = TransverseReinforcement::new(157.0, 200.0, Steel::grade_420());
//!
//! let result = shear_capacity(&section, 500.0, &ties, &ShearConfig::default()).unwrap();
//! assert!(result.design_kn > 0.0);
//! ```

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::{ShearConfig, ShearMethod};
use crate::errors::{require_finite, require_positive, CalcError, CalcResult};
use crate::materials::Steel;
use crate::section::Section;
use crate::units::{Kilonewtons, Newtons};

/// Upper bound on √f'c in shear formulas (MPa)
pub const SQRT_FC_LIMIT: f64 = 8.3;

/// Effective depth as a fraction of the section length
pub const EFFECTIVE_DEPTH_RATIO: f64 = 0.8;

/// Horizontal (wall) or tie (column) reinforcement.
///
/// ## JSON Example
///
/// ```json
/// { "area_mm2": 157.0, "spacing_mm": 200.0, "steel": { "fy_mpa": 420.0 } }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransverseReinforcement {
    /// Total leg area crossing the section within one spacing Av (mm²)
    pub area_mm2: f64,
    /// Spacing s (mm)
    pub spacing_mm: f64,
    #[serde(default)]
    pub steel: Steel,
}

impl TransverseReinforcement {
    pub fn new(area_mm2: f64, spacing_mm: f64, steel: Steel) -> Self {
        TransverseReinforcement {
            area_mm2,
            spacing_mm,
            steel,
        }
    }

    /// From a horizontal reinforcement ratio ρt = Av / (bw·s)
    pub fn from_ratio(ratio: f64, width_mm: f64, spacing_mm: f64, steel: Steel) -> Self {
        TransverseReinforcement::new(ratio * width_mm * spacing_mm, spacing_mm, steel)
    }

    /// No transverse steel
    pub fn none() -> Self {
        TransverseReinforcement::new(0.0, 1.0, Steel::default())
    }

    pub fn validate(&self) -> CalcResult<()> {
        require_finite("transverse.area_mm2", self.area_mm2)?;
        if self.area_mm2 < 0.0 {
            return Err(CalcError::validation(
                "transverse.area_mm2",
                self.area_mm2.to_string(),
                "Area cannot be negative",
            ));
        }
        require_positive("transverse.spacing_mm", self.spacing_mm)?;
        self.steel.validate().map_err(|err| match err {
            CalcError::Validation { field, value, reason } => {
                CalcError::validation(format!("transverse.{field}"), value, reason)
            }
            other => other,
        })
    }
}

/// Shear capacity of a section under one axial load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShearResult {
    /// Vc (kN)
    pub concrete_kn: f64,
    /// Vs (kN)
    pub steel_kn: f64,
    /// Vn = Vc + Vs (kN)
    pub nominal_kn: f64,
    pub phi: f64,
    /// φ·Vn (kN)
    pub design_kn: f64,
    /// Code limit on Vn (kN)
    pub upper_limit_kn: f64,
    /// Axial load used (kN, compression positive)
    pub axial_load_kn: f64,
    pub method: ShearMethod,
}

impl ShearResult {
    /// Design strength with the upper limit applied, min(φ·Vn, φ·Vn,max)
    pub fn governing_design_kn(&self) -> f64 {
        self.design_kn.min(self.phi * self.upper_limit_kn)
    }

    /// True when the nominal strength exceeds the code limit
    pub fn is_capped(&self) -> bool {
        self.nominal_kn > self.upper_limit_kn
    }
}

/// αc for in-plane wall shear from the aspect ratio hw/lw
pub fn wall_alpha_c(wall_height_mm: Option<f64>, length_mm: f64) -> f64 {
    match wall_height_mm {
        None => 0.17,
        Some(hw) => {
            let ratio = hw / length_mm;
            if ratio <= 1.5 {
                0.25
            } else if ratio >= 2.0 {
                0.17
            } else {
                0.25 - 0.08 * (ratio - 1.5) / 0.5
            }
        }
    }
}

/// Shear strength of `section` under `axial_load_kn` (compression positive).
pub fn shear_capacity(
    section: &Section,
    axial_load_kn: f64,
    transverse: &TransverseReinforcement,
    config: &ShearConfig,
) -> CalcResult<ShearResult> {
    require_finite("axial_load_kn", axial_load_kn)?;
    transverse.validate()?;
    config.validate()?;

    let nu = Newtons::from(Kilonewtons(axial_load_kn)).0;
    let ag = section.gross_area_mm2();
    let bw = section.width_mm();
    let lw = section.length_mm();
    let sqrt_fc = section.concrete().fc_mpa.sqrt().min(SQRT_FC_LIMIT);
    let lambda = config.lambda;
    let fyt = config
        .max_transverse_yield_mpa
        .map_or(transverse.steel.fy_mpa, |cap| transverse.steel.fy_mpa.min(cap));
    let av_over_s = transverse.area_mm2 / transverse.spacing_mm;
    let d = EFFECTIVE_DEPTH_RATIO * lw;

    let (vc, vs, upper) = match config.method {
        ShearMethod::Wall => {
            let acv = bw * lw;
            let mut alpha_c = wall_alpha_c(config.wall_height_mm, lw);
            let mut axial_term = 0.0;
            if nu < 0.0 {
                alpha_c = alpha_c.min((0.17 * (1.0 + 0.29 * nu / ag)).max(0.0));
            } else {
                axial_term = nu * d / (4.0 * lw);
            }
            debug!("wall shear: alpha_c = {:.3}, Acv = {:.0} mm²", alpha_c, acv);
            (
                alpha_c * lambda * sqrt_fc * acv + axial_term,
                av_over_s * fyt * lw,
                0.83 * sqrt_fc * acv,
            )
        }
        ShearMethod::Member => {
            let factor = if nu >= 0.0 {
                1.0 + nu / (14.0 * ag)
            } else {
                (1.0 + 0.29 * nu / ag).max(0.0)
            };
            let vc = 0.17 * factor * lambda * sqrt_fc * bw * d;
            (vc, av_over_s * fyt * d, vc + 0.66 * sqrt_fc * bw * d)
        }
    };

    for (stage, value) in [("concrete shear", vc), ("steel shear", vs), ("shear limit", upper)] {
        if !value.is_finite() {
            return Err(CalcError::computation(stage, format!("non-finite result {value}")));
        }
    }

    let to_kn = |n: f64| Kilonewtons::from(Newtons(n)).0;
    let nominal = vc + vs;
    let result = ShearResult {
        concrete_kn: to_kn(vc),
        steel_kn: to_kn(vs),
        nominal_kn: to_kn(nominal),
        phi: config.phi,
        design_kn: config.phi * to_kn(nominal),
        upper_limit_kn: to_kn(upper),
        axial_load_kn,
        method: config.method,
    };

    if result.is_capped() {
        warn!(
            "'{}': Vn = {:.1} kN exceeds the {} limit {:.1} kN",
            section.label(),
            result.nominal_kn,
            config.method.display_name(),
            result.upper_limit_kn
        );
    }
    debug!(
        "'{}' shear at Nu = {:.1} kN: Vc = {:.1}, Vs = {:.1}, phiVn = {:.1} kN",
        section.label(),
        axial_load_kn,
        result.concrete_kn,
        result.steel_kn,
        result.design_kn
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::Concrete;
    use crate::section::SectionBuilder;

    fn wall() -> Section {
        SectionBuilder::new(200.0, 1000.0, Concrete::new(28.0))
            .layer(50.0, 4, 16.0, Steel::grade_420())
            .layer(950.0, 4, 16.0, Steel::grade_420())
            .build()
            .unwrap()
    }

    fn ties() -> TransverseReinforcement {
        TransverseReinforcement::new(157.0, 200.0, Steel::grade_420())
    }

    #[test]
    fn test_alpha_c() {
        assert_eq!(wall_alpha_c(None, 1000.0), 0.17);
        assert_eq!(wall_alpha_c(Some(1000.0), 1000.0), 0.25);
        assert_eq!(wall_alpha_c(Some(3000.0), 1000.0), 0.17);
        assert!((wall_alpha_c(Some(1750.0), 1000.0) - 0.21).abs() < 1e-12);
    }

    #[test]
    fn test_wall_shear_without_axial_load() {
        let r = shear_capacity(&wall(), 0.0, &ties(), &ShearConfig::default()).unwrap();
        let sqrt_fc = 28.0_f64.sqrt();
        let vc = 0.17 * sqrt_fc * 200_000.0 / 1000.0;
        let vs = 157.0 / 200.0 * 420.0 * 1000.0 / 1000.0;
        assert!((r.concrete_kn - vc).abs() < 1e-9);
        assert!((r.steel_kn - vs).abs() < 1e-9);
        assert!((r.nominal_kn - (vc + vs)).abs() < 1e-9);
        assert!((r.design_kn - 0.75 * (vc + vs)).abs() < 1e-9);
        assert!((r.upper_limit_kn - 0.83 * sqrt_fc * 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_compression_increases_vc() {
        let config = ShearConfig::default();
        let r0 = shear_capacity(&wall(), 0.0, &ties(), &config).unwrap();
        let r1 = shear_capacity(&wall(), 1000.0, &ties(), &config).unwrap();
        // Nu·d/(4·lw) = 0.2·Nu
        assert!((r1.concrete_kn - r0.concrete_kn - 200.0).abs() < 1e-9);
        assert_eq!(r1.steel_kn, r0.steel_kn);
        // the axial term is the 318-14 one and the label says so
        assert!(r1.method.display_name().contains("318-14"));
    }

    #[test]
    fn test_tension_reduces_vc_to_zero() {
        for config in [ShearConfig::default(), ShearConfig::member()] {
            let small = shear_capacity(&wall(), -100.0, &ties(), &config).unwrap();
            let zero = shear_capacity(&wall(), 0.0, &ties(), &config).unwrap();
            assert!(small.concrete_kn < zero.concrete_kn);
            let large = shear_capacity(&wall(), -5000.0, &ties(), &config).unwrap();
            assert_eq!(large.concrete_kn, 0.0);
        }
    }

    #[test]
    fn test_member_method() {
        let r = shear_capacity(&wall(), 700.0, &ties(), &ShearConfig::member()).unwrap();
        let sqrt_fc = 28.0_f64.sqrt();
        let d = 800.0;
        let vc = 0.17 * (1.0 + 700_000.0 / (14.0 * 200_000.0)) * sqrt_fc * 200.0 * d / 1000.0;
        assert!((r.concrete_kn - vc).abs() < 1e-9);
        assert!((r.steel_kn - 157.0 / 200.0 * 420.0 * d / 1000.0).abs() < 1e-9);
        assert!((r.upper_limit_kn - (vc + 0.66 * sqrt_fc * 200.0 * d / 1000.0)).abs() < 1e-9);
    }

    #[test]
    fn test_transverse_yield_cap() {
        let strong = TransverseReinforcement::new(157.0, 200.0, Steel::new(550.0));
        let capped = shear_capacity(&wall(), 0.0, &strong, &ShearConfig::default()).unwrap();
        let grade = shear_capacity(&wall(), 0.0, &ties(), &ShearConfig::default()).unwrap();
        assert_eq!(capped.steel_kn, grade.steel_kn);

        let uncapped = ShearConfig {
            max_transverse_yield_mpa: None,
            ..Default::default()
        };
        let r = shear_capacity(&wall(), 0.0, &strong, &uncapped).unwrap();
        assert!(r.steel_kn > grade.steel_kn);
    }

    #[test]
    fn test_governing_design_uses_upper_limit() {
        let heavy = TransverseReinforcement::new(2000.0, 100.0, Steel::grade_420());
        let r = shear_capacity(&wall(), 0.0, &heavy, &ShearConfig::default()).unwrap();
        assert!(r.is_capped());
        assert!((r.governing_design_kn() - 0.75 * r.upper_limit_kn).abs() < 1e-9);
        assert!(r.governing_design_kn() < r.design_kn);
    }

    #[test]
    fn test_from_ratio() {
        let t = TransverseReinforcement::from_ratio(0.0025, 200.0, 250.0, Steel::grade_420());
        assert!((t.area_mm2 - 125.0).abs() < 1e-9);
    }

    #[test]
    fn test_input_validation() {
        let bad_spacing = TransverseReinforcement::new(157.0, 0.0, Steel::grade_420());
        let err = shear_capacity(&wall(), 0.0, &bad_spacing, &ShearConfig::default()).unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");

        let negative = TransverseReinforcement::new(-1.0, 200.0, Steel::grade_420());
        assert!(shear_capacity(&wall(), 0.0, &negative, &ShearConfig::default()).is_err());
        assert!(shear_capacity(&wall(), f64::NAN, &ties(), &ShearConfig::default()).is_err());

        let no_steel = shear_capacity(&wall(), 0.0, &TransverseReinforcement::none(), &ShearConfig::default()).unwrap();
        assert_eq!(no_steel.steel_kn, 0.0);
    }
}
