//! Plane-section strain states.
//!
//! Depths are measured from the compression face of the current bending
//! direction. Strains are negative in compression.

use serde::{Deserialize, Serialize};

use crate::section::Strip;

/// Strain distribution over the section depth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum StrainState {
    /// Same strain everywhere (neutral axis at infinity)
    Uniform { strain: f64 },
    /// Linear distribution with `extreme_strain` at depth 0 and zero strain
    /// at the neutral axis depth `neutral_axis_mm` (> 0)
    Linear { extreme_strain: f64, neutral_axis_mm: f64 },
}

impl StrainState {
    /// State with the compression face at `-compression_strain` passing
    /// through `tension_strain` at `tension_depth_mm`.
    ///
    /// Requires `tension_strain > -compression_strain`, which keeps the
    /// neutral axis depth `c = d_t·εc / (εc + εt)` positive.
    pub fn through(compression_strain: f64, tension_depth_mm: f64, tension_strain: f64) -> Self {
        StrainState::Linear {
            extreme_strain: -compression_strain,
            neutral_axis_mm: tension_depth_mm * compression_strain / (compression_strain + tension_strain),
        }
    }

    /// Strain at a depth from the compression face
    pub fn strain_at(&self, depth_mm: f64) -> f64 {
        match *self {
            StrainState::Uniform { strain } => strain,
            StrainState::Linear {
                extreme_strain,
                neutral_axis_mm,
            } => extreme_strain * (1.0 - depth_mm / neutral_axis_mm),
        }
    }

    /// Neutral axis depth, `None` for a uniform state
    pub fn neutral_axis_depth(&self) -> Option<f64> {
        match *self {
            StrainState::Uniform { .. } => None,
            StrainState::Linear { neutral_axis_mm, .. } => Some(neutral_axis_mm),
        }
    }
}

/// A concrete strip evaluated at one strain state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fiber {
    pub area_mm2: f64,
    pub depth_mm: f64,
    pub strain: f64,
}

impl Fiber {
    pub fn at(strip: &Strip, state: &StrainState) -> Self {
        Fiber {
            area_mm2: strip.area_mm2,
            depth_mm: strip.depth_mm,
            strain: state.strain_at(strip.depth_mm),
        }
    }
}
