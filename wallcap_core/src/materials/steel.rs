//! Reinforcing Steel
//!
//! Elastic-perfectly-plastic bar model, symmetric in tension and compression:
//!
//! - `|ε| <= εy`: σ = Es·ε
//! - `εy < |ε| <= ε_su`: σ = ±fy (sign follows the strain)
//! - `|ε| > ε_su`: ruptured, σ = 0
//!
//! Strains and stresses are signed (negative in compression). Without a
//! rupture strain the plateau extends indefinitely.

use serde::{Deserialize, Serialize};

use crate::errors::{require_positive, CalcError, CalcResult};

use super::MaterialModel;

/// Default modulus of elasticity Es (MPa, ACI 318 20.2.2.2)
pub const DEFAULT_ES_MPA: f64 = 200_000.0;

fn default_es_mpa() -> f64 {
    DEFAULT_ES_MPA
}

/// Reinforcing steel material.
///
/// ## JSON Example
///
/// ```json
/// { "fy_mpa": 420.0, "es_mpa": 200000.0, "rupture_strain": 0.09 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Steel {
    /// Yield strength fy (MPa)
    pub fy_mpa: f64,

    /// Modulus of elasticity Es (MPa)
    #[serde(default = "default_es_mpa")]
    pub es_mpa: f64,

    /// Rupture strain ε_su (positive magnitude); `None` never ruptures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rupture_strain: Option<f64>,
}

impl Steel {
    /// Steel with the default modulus and no rupture strain
    pub fn new(fy_mpa: f64) -> Self {
        Steel {
            fy_mpa,
            es_mpa: DEFAULT_ES_MPA,
            rupture_strain: None,
        }
    }

    /// ASTM A615 / A706 Grade 60 (fy = 420 MPa)
    pub fn grade_420() -> Self {
        Steel::new(420.0)
    }

    /// Set the rupture strain (builder pattern)
    pub fn with_rupture_strain(mut self, rupture_strain: f64) -> Self {
        self.rupture_strain = Some(rupture_strain);
        self
    }

    /// Yield strain εy = fy / Es
    pub fn yield_strain(&self) -> f64 {
        self.fy_mpa / self.es_mpa
    }

    /// True when the strain magnitude exceeds the rupture strain
    pub fn is_ruptured(&self, strain: f64) -> bool {
        self.rupture_strain.is_some_and(|limit| strain.abs() > limit)
    }

    /// Signed stress (MPa) for a signed strain
    pub fn stress(&self, strain: f64) -> f64 {
        if !strain.is_finite() || self.is_ruptured(strain) {
            return 0.0;
        }
        if strain.abs() <= self.yield_strain() {
            self.es_mpa * strain
        } else {
            self.fy_mpa.copysign(strain)
        }
    }

    pub fn validate(&self) -> CalcResult<()> {
        require_positive("steel.fy_mpa", self.fy_mpa)?;
        require_positive("steel.es_mpa", self.es_mpa)?;
        if let Some(rupture) = self.rupture_strain {
            require_positive("steel.rupture_strain", rupture)?;
            if rupture <= self.yield_strain() {
                return Err(CalcError::validation(
                    "steel.rupture_strain",
                    rupture.to_string(),
                    format!("Rupture strain must exceed yield strain {:.5}", self.yield_strain()),
                ));
            }
        }
        Ok(())
    }

    pub fn display_name(&self) -> String {
        format!("fy = {:.0} MPa", self.fy_mpa)
    }
}

impl Default for Steel {
    fn default() -> Self {
        Steel::grade_420()
    }
}

impl MaterialModel for Steel {
    fn stress(&self, strain: f64) -> f64 {
        Steel::stress(self, strain)
    }

    fn validate(&self) -> CalcResult<()> {
        Steel::validate(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elastic_branch() {
        let s = Steel::grade_420();
        assert!((s.yield_strain() - 0.0021).abs() < 1e-12);
        assert!((s.stress(0.001) - 200.0).abs() < 1e-9);
        assert!((s.stress(-0.001) + 200.0).abs() < 1e-9);
        assert_eq!(s.stress(0.0), 0.0);
    }

    #[test]
    fn test_plastic_branch_is_symmetric() {
        let s = Steel::grade_420();
        assert_eq!(s.stress(0.01), 420.0);
        assert_eq!(s.stress(-0.01), -420.0);
        assert_eq!(s.stress(1.0), 420.0);
    }

    #[test]
    fn test_rupture() {
        let s = Steel::grade_420().with_rupture_strain(0.05);
        assert_eq!(s.stress(0.049), 420.0);
        assert_eq!(s.stress(0.051), 0.0);
        assert_eq!(s.stress(-0.051), 0.0);
        assert!(s.is_ruptured(0.06));
        assert!(!Steel::grade_420().is_ruptured(10.0));
    }

    #[test]
    fn test_total_function() {
        let s = Steel::grade_420();
        assert_eq!(s.stress(f64::NAN), 0.0);
        assert_eq!(s.stress(f64::INFINITY), 0.0);
    }

    #[test]
    fn test_validation() {
        assert!(Steel::grade_420().validate().is_ok());
        assert!(Steel::new(0.0).validate().is_err());
        assert!(Steel::grade_420().with_rupture_strain(0.001).validate().is_err());
    }

    #[test]
    fn test_serialization_defaults() {
        let s: Steel = serde_json::from_str(r#"{ "fy_mpa": 420.0 }"#).unwrap();
        assert_eq!(s, Steel::grade_420());
        let json = serde_json::to_string(&s).unwrap();
        assert!(!json.contains("rupture_strain"));
    }
}
