//! Concrete Stress-Strain Laws
//!
//! Compressive stress-strain models for flexural capacity. Concrete carries
//! no tension: every law returns zero for strains `>= 0`.
//!
//! ## Sign Convention
//!
//! Strains are negative in compression. Stress is returned as a
//! **non-negative compressive magnitude** in MPa.
//!
//! ## Laws
//!
//! | Law                   | Rising branch              | After peak strain ε₀             |
//! |-----------------------|----------------------------|----------------------------------|
//! | `EquivalentBlock`     | 0 up to (1-β₁)·ε_cu        | α·f'c up to ε_cu                 |
//! | `ParabolaPlateau`     | α·f'c·[1-(1-ε/ε₀)²]        | α·f'c up to ε_cu                 |
//! | `ParabolaLinearDecay` | f'c·[1-(1-ε/ε₀)²]          | linear from f'c to 0 at ε_cu     |
//!
//! All laws drop to zero beyond ε_cu (crushed fiber). The equivalent block is
//! the Whitney rectangle of ACI 318 22.2.2.4 written in strain terms: with the
//! extreme fiber at ε_cu the stressed depth is exactly `a = β₁·c`. Its step at
//! `(1-β₁)·ε_cu` is the block edge; the two parabolic laws are continuous up to
//! the crushing cutoff.

use serde::{Deserialize, Serialize};

use crate::errors::{require_positive, CalcError, CalcResult};
use crate::units::{KgfPerCm2, Megapascals};

use super::MaterialModel;

/// Default strain at peak stress ε₀
pub const DEFAULT_PEAK_STRAIN: f64 = 0.002;

/// Default ultimate (crushing) strain ε_cu per ACI 318 22.2.2.1
pub const DEFAULT_ULTIMATE_STRAIN: f64 = 0.003;

/// Default ratio of block/plateau stress to f'c
pub const DEFAULT_STRESS_FACTOR: f64 = 0.85;

fn default_peak_strain() -> f64 {
    DEFAULT_PEAK_STRAIN
}

fn default_ultimate_strain() -> f64 {
    DEFAULT_ULTIMATE_STRAIN
}

fn default_stress_factor() -> f64 {
    DEFAULT_STRESS_FACTOR
}

/// Stress-strain law identifier with its own parameters.
///
/// ## JSON
///
/// ```json
/// { "law": "EquivalentBlock", "stress_factor": 0.85 }
/// { "law": "ParabolaPlateau", "stress_factor": 0.85 }
/// { "law": "ParabolaLinearDecay" }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "law")]
pub enum ConcreteLaw {
    /// Whitney rectangular block
    EquivalentBlock {
        #[serde(default = "default_stress_factor")]
        stress_factor: f64,
    },
    /// Parabola to ε₀, constant plateau to ε_cu
    ParabolaPlateau {
        #[serde(default = "default_stress_factor")]
        stress_factor: f64,
    },
    /// Parabola to f'c at ε₀, linear softening to zero at ε_cu
    ParabolaLinearDecay,
}

impl Default for ConcreteLaw {
    fn default() -> Self {
        ConcreteLaw::EquivalentBlock {
            stress_factor: DEFAULT_STRESS_FACTOR,
        }
    }
}

impl ConcreteLaw {
    /// Parabola-plateau law with the default 0.85 factor
    pub fn parabola_plateau() -> Self {
        ConcreteLaw::ParabolaPlateau {
            stress_factor: DEFAULT_STRESS_FACTOR,
        }
    }

    /// True for laws whose stress falls after the peak strain
    pub fn is_softening(&self) -> bool {
        matches!(self, ConcreteLaw::ParabolaLinearDecay)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ConcreteLaw::EquivalentBlock { .. } => "Equivalent rectangular block",
            ConcreteLaw::ParabolaPlateau { .. } => "Parabola-plateau",
            ConcreteLaw::ParabolaLinearDecay => "Parabola-linear decay",
        }
    }
}

/// Concrete material.
///
/// ## JSON Example
///
/// ```json
/// {
///   "fc_mpa": 28.0,
///   "peak_strain": 0.002,
///   "ultimate_strain": 0.003,
///   "law": { "law": "EquivalentBlock", "stress_factor": 0.85 }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Concrete {
    /// Specified compressive strength f'c (MPa)
    pub fc_mpa: f64,

    /// Strain at peak stress ε₀ (positive magnitude)
    #[serde(default = "default_peak_strain")]
    pub peak_strain: f64,

    /// Ultimate crushing strain ε_cu (positive magnitude)
    #[serde(default = "default_ultimate_strain")]
    pub ultimate_strain: f64,

    /// Stress-strain law
    #[serde(default)]
    pub law: ConcreteLaw,
}

impl Concrete {
    /// Concrete with the default strains and the equivalent block law
    pub fn new(fc_mpa: f64) -> Self {
        Concrete {
            fc_mpa,
            peak_strain: DEFAULT_PEAK_STRAIN,
            ultimate_strain: DEFAULT_ULTIMATE_STRAIN,
            law: ConcreteLaw::default(),
        }
    }

    /// Concrete specified in kgf/cm² (e.g. "f'c = 280")
    pub fn from_kgf_per_cm2(fc_kgf_cm2: f64) -> Self {
        let fc: Megapascals = KgfPerCm2(fc_kgf_cm2).into();
        Concrete::new(fc.value())
    }

    /// Replace the stress-strain law (builder pattern)
    pub fn with_law(mut self, law: ConcreteLaw) -> Self {
        self.law = law;
        self
    }

    /// Replace the peak and ultimate strains (builder pattern)
    pub fn with_strains(mut self, peak_strain: f64, ultimate_strain: f64) -> Self {
        self.peak_strain = peak_strain;
        self.ultimate_strain = ultimate_strain;
        self
    }

    pub fn validate(&self) -> CalcResult<()> {
        require_positive("concrete.fc_mpa", self.fc_mpa)?;
        require_positive("concrete.peak_strain", self.peak_strain)?;
        require_positive("concrete.ultimate_strain", self.ultimate_strain)?;
        if self.ultimate_strain <= self.peak_strain {
            return Err(CalcError::validation(
                "concrete.ultimate_strain",
                self.ultimate_strain.to_string(),
                format!("Ultimate strain must exceed peak strain {}", self.peak_strain),
            ));
        }
        match self.law {
            ConcreteLaw::EquivalentBlock { stress_factor } | ConcreteLaw::ParabolaPlateau { stress_factor } => {
                if !(stress_factor > 0.0 && stress_factor <= 1.0) {
                    return Err(CalcError::validation(
                        "concrete.law.stress_factor",
                        stress_factor.to_string(),
                        "Stress factor must be in (0, 1]",
                    ));
                }
            }
            ConcreteLaw::ParabolaLinearDecay => {}
        }
        Ok(())
    }

    /// Block depth ratio β₁ (ACI 318-19 Table 22.2.2.4.3)
    ///
    /// 0.85 up to 28 MPa, reduced by 0.05 per 7 MPa above that, not below 0.65.
    pub fn beta1(&self) -> f64 {
        if self.fc_mpa <= 28.0 {
            0.85
        } else {
            (0.85 - 0.05 * (self.fc_mpa - 28.0) / 7.0).max(0.65)
        }
    }

    /// Modulus of elasticity Ec = 4700·√f'c (MPa, ACI 318 19.2.2.1)
    pub fn elastic_modulus_mpa(&self) -> f64 {
        4700.0 * self.fc_mpa.sqrt()
    }

    /// Peak compressive stress delivered by the law (MPa)
    pub fn crushing_stress(&self) -> f64 {
        match self.law {
            ConcreteLaw::EquivalentBlock { stress_factor } | ConcreteLaw::ParabolaPlateau { stress_factor } => {
                stress_factor * self.fc_mpa
            }
            ConcreteLaw::ParabolaLinearDecay => self.fc_mpa,
        }
    }

    /// Extreme-fiber compressive strain magnitude that controls the
    /// interaction sweep.
    ///
    /// ε_cu for the block and plateau laws. For the softening law it is ε₀:
    /// every fiber then stays on the rising branch, where stress grows with
    /// strain, and the axial force stays monotonic along the sweep.
    pub fn controlling_strain(&self) -> f64 {
        if self.law.is_softening() {
            self.peak_strain
        } else {
            self.ultimate_strain
        }
    }

    /// Compressive stress magnitude (MPa) for a strain (negative = compression)
    pub fn stress(&self, strain: f64) -> f64 {
        if strain.is_nan() || strain >= 0.0 {
            return 0.0;
        }
        let eps = -strain;
        if eps > self.ultimate_strain {
            return 0.0;
        }

        let fc = self.fc_mpa;
        let eps0 = self.peak_strain;
        let parabola = |peak: f64| {
            let r = eps / eps0;
            peak * (2.0 * r - r * r)
        };

        match self.law {
            ConcreteLaw::EquivalentBlock { stress_factor } => {
                if eps >= (1.0 - self.beta1()) * self.ultimate_strain {
                    stress_factor * fc
                } else {
                    0.0
                }
            }
            ConcreteLaw::ParabolaPlateau { stress_factor } => {
                if eps < eps0 {
                    parabola(stress_factor * fc)
                } else {
                    stress_factor * fc
                }
            }
            ConcreteLaw::ParabolaLinearDecay => {
                if eps <= eps0 {
                    parabola(fc)
                } else {
                    fc * (self.ultimate_strain - eps) / (self.ultimate_strain - eps0)
                }
            }
        }
    }

    pub fn display_name(&self) -> String {
        format!("f'c = {:.1} MPa ({})", self.fc_mpa, self.law.display_name())
    }
}

impl Default for Concrete {
    fn default() -> Self {
        Concrete::new(28.0)
    }
}

impl MaterialModel for Concrete {
    fn stress(&self, strain: f64) -> f64 {
        Concrete::stress(self, strain)
    }

    fn validate(&self) -> CalcResult<()> {
        Concrete::validate(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_no_tension() {
        let c = Concrete::new(28.0);
        assert_eq!(c.stress(0.0), 0.0);
        assert_eq!(c.stress(0.001), 0.0);
        assert_eq!(c.stress(f64::NAN), 0.0);
    }

    #[test]
    fn test_block_law() {
        let c = Concrete::new(28.0);
        // β₁ = 0.85, block starts at 0.15 * 0.003 = 0.00045
        assert_eq!(c.stress(-0.0004), 0.0);
        assert!(approx_eq(c.stress(-0.0005), 23.8, 1e-9));
        assert!(approx_eq(c.stress(-0.003), 23.8, 1e-9));
        // crushed
        assert_eq!(c.stress(-0.0031), 0.0);
    }

    #[test]
    fn test_parabola_plateau_is_continuous() {
        let c = Concrete::new(30.0).with_law(ConcreteLaw::parabola_plateau());
        let peak = 0.85 * 30.0;
        assert!(approx_eq(c.stress(-0.001), 0.75 * peak, 1e-9));
        assert!(approx_eq(c.stress(-0.002 + 1e-9), peak, 1e-4));
        assert!(approx_eq(c.stress(-0.002), peak, 1e-9));
        assert!(approx_eq(c.stress(-0.0025), peak, 1e-9));
    }

    #[test]
    fn test_linear_decay() {
        let c = Concrete::new(30.0).with_law(ConcreteLaw::ParabolaLinearDecay);
        assert!(approx_eq(c.stress(-0.002), 30.0, 1e-9));
        assert!(approx_eq(c.stress(-0.0025), 15.0, 1e-9));
        assert!(approx_eq(c.stress(-0.003), 0.0, 1e-9));
        assert_eq!(c.controlling_strain(), 0.002);
        assert_eq!(c.crushing_stress(), 30.0);
    }

    #[test]
    fn test_stress_never_negative() {
        for law in [
            ConcreteLaw::default(),
            ConcreteLaw::parabola_plateau(),
            ConcreteLaw::ParabolaLinearDecay,
        ] {
            let c = Concrete::new(35.0).with_law(law);
            for i in -400..=100 {
                let strain = i as f64 * 1.0e-5;
                assert!(c.stress(strain) >= 0.0, "{:?} at {}", law, strain);
            }
        }
    }

    #[test]
    fn test_beta1() {
        assert_eq!(Concrete::new(21.0).beta1(), 0.85);
        assert_eq!(Concrete::new(28.0).beta1(), 0.85);
        assert!(approx_eq(Concrete::new(35.0).beta1(), 0.80, 1e-12));
        assert!(approx_eq(Concrete::new(42.0).beta1(), 0.75, 1e-12));
        assert_eq!(Concrete::new(80.0).beta1(), 0.65);
    }

    #[test]
    fn test_elastic_modulus() {
        let c = Concrete::new(25.0);
        assert!(approx_eq(c.elastic_modulus_mpa(), 23_500.0, 1e-9));
    }

    #[test]
    fn test_from_kgf() {
        let c = Concrete::from_kgf_per_cm2(280.0);
        assert!(approx_eq(c.fc_mpa, 27.46, 0.01));
    }

    #[test]
    fn test_validation() {
        assert!(Concrete::new(28.0).validate().is_ok());
        assert!(Concrete::new(-1.0).validate().is_err());
        assert!(Concrete::new(28.0).with_strains(0.003, 0.002).validate().is_err());
        let bad = Concrete::new(28.0).with_law(ConcreteLaw::EquivalentBlock { stress_factor: 1.5 });
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_serialization_defaults() {
        let c: Concrete = serde_json::from_str(r#"{ "fc_mpa": 28.0 }"#).unwrap();
        assert_eq!(c, Concrete::new(28.0));

        let c: Concrete =
            serde_json::from_str(r#"{ "fc_mpa": 40.0, "law": { "law": "ParabolaLinearDecay" } }"#).unwrap();
        assert_eq!(c.law, ConcreteLaw::ParabolaLinearDecay);

        let json = serde_json::to_string(&Concrete::new(28.0)).unwrap();
        assert!(json.contains("\"law\":\"EquivalentBlock\""));
    }
}
