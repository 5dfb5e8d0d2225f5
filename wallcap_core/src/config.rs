//! Analysis configuration.
//!
//! Parameters that control the fiber sweep and the shear evaluator. Both
//! structs deserialize with per-field defaults, so an input file only names
//! what it changes:
//!
//! ```toml
//! [interaction]
//! fiber_count = 50
//!
//! [shear]
//! method = "Member"
//! phi = 0.6
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::reduction::StrengthReduction;
use crate::errors::{require_positive, CalcError, CalcResult};

/// Upper bound on the number of concrete strips
pub const MAX_FIBER_COUNT: usize = 100_000;

/// Upper bound on intermediate strain states
pub const MAX_INTERMEDIATE_POINTS: usize = 10_000;

/// Configuration for the interaction diagram sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Number of equal-depth concrete strips.
    pub fiber_count: usize,

    /// Strain states between pure compression and pure tension, balanced
    /// excluded. The diagram has `intermediate_points + 3` points.
    pub intermediate_points: usize,

    /// Largest tensile strain imposed on the extreme tension bar on the
    /// tension side of the sweep (capped below the rupture strain).
    pub max_steel_strain: f64,

    /// Acceptable relative change of (P, M) when the fiber count doubles.
    pub convergence_tolerance: f64,

    /// Strength reduction for design envelopes and demand checks.
    pub reduction: StrengthReduction,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            fiber_count: 250,
            intermediate_points: 40,
            max_steel_strain: 0.05,
            convergence_tolerance: 0.01,
            reduction: StrengthReduction::aci(),
        }
    }
}

impl InteractionConfig {
    /// Quick preview (fewer strips and states).
    pub fn coarse() -> Self {
        Self {
            fiber_count: 20,
            intermediate_points: 10,
            ..Default::default()
        }
    }

    /// Report quality (more strips, smoother curve).
    pub fn fine() -> Self {
        Self {
            fiber_count: 1000,
            intermediate_points: 120,
            ..Default::default()
        }
    }

    pub fn with_fiber_count(mut self, fiber_count: usize) -> Self {
        self.fiber_count = fiber_count;
        self
    }

    pub fn validate(&self) -> CalcResult<()> {
        // A zero count is left to the discretization, which reports it as a
        // computation failure
        if self.fiber_count > MAX_FIBER_COUNT {
            return Err(CalcError::validation(
                "interaction.fiber_count",
                self.fiber_count.to_string(),
                format!("At most {MAX_FIBER_COUNT} fibers"),
            ));
        }
        if self.intermediate_points > MAX_INTERMEDIATE_POINTS {
            return Err(CalcError::validation(
                "interaction.intermediate_points",
                self.intermediate_points.to_string(),
                format!("At most {MAX_INTERMEDIATE_POINTS} intermediate states"),
            ));
        }
        require_positive("interaction.max_steel_strain", self.max_steel_strain)?;
        require_positive("interaction.convergence_tolerance", self.convergence_tolerance)?;
        self.reduction.validate()
    }
}

/// Which ACI 318-19 shear provisions apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShearMethod {
    /// In-plane wall shear (318-19 11.5.4, 18.10.4) with the 318-14 `Nu·d/(4·lw)` term
    #[default]
    Wall,
    /// Beam-column member shear (22.5)
    Member,
}

impl ShearMethod {
    pub fn display_name(&self) -> &'static str {
        match self {
            ShearMethod::Wall => "ACI 318-19 wall (11.5.4) + 318-14 Nu·d/4lw",
            ShearMethod::Member => "ACI 318-19 member (22.5)",
        }
    }
}

/// Configuration for the shear evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShearConfig {
    pub method: ShearMethod,

    /// Strength reduction factor for shear.
    pub phi: f64,

    /// Lightweight concrete modification factor λ.
    pub lambda: f64,

    /// Wall height hw (mm) for the hw/lw dependence of αc. `None` uses the
    /// slender-wall coefficient.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wall_height_mm: Option<f64>,

    /// Cap on the transverse reinforcement yield strength (MPa).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_transverse_yield_mpa: Option<f64>,
}

impl Default for ShearConfig {
    fn default() -> Self {
        Self {
            method: ShearMethod::Wall,
            phi: 0.75,
            lambda: 1.0,
            wall_height_mm: None,
            max_transverse_yield_mpa: Some(420.0),
        }
    }
}

impl ShearConfig {
    /// Member provisions with the default factors.
    pub fn member() -> Self {
        Self {
            method: ShearMethod::Member,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> CalcResult<()> {
        if !self.phi.is_finite() || self.phi <= 0.0 || self.phi > 1.0 {
            return Err(CalcError::validation(
                "shear.phi",
                self.phi.to_string(),
                "Factor must lie in (0, 1]",
            ));
        }
        if !self.lambda.is_finite() || self.lambda <= 0.0 || self.lambda > 1.0 {
            return Err(CalcError::validation(
                "shear.lambda",
                self.lambda.to_string(),
                "Factor must lie in (0, 1]",
            ));
        }
        if let Some(hw) = self.wall_height_mm {
            require_positive("shear.wall_height_mm", hw)?;
        }
        if let Some(fyt) = self.max_transverse_yield_mpa {
            require_positive("shear.max_transverse_yield_mpa", fyt)?;
        }
        Ok(())
    }
}
