//! # Materials
//!
//! Stateless stress-strain models for the two materials of a reinforced
//! concrete section. Every model is an immutable value object passed
//! explicitly into each calculation.
//!
//! - [`Concrete`] - compressive laws selected by [`ConcreteLaw`]
//! - [`Steel`] - elastic-perfectly-plastic reinforcing bar
//!
//! ## Example
//!
//! ```rust
//! use wallcap_core::materials::{Concrete, ConcreteLaw, MaterialModel, Steel};
//!
//! let concrete = Concrete::new(28.0).with_law(ConcreteLaw::parabola_plateau());
//! let steel = Steel::grade_420();
//!
//! // Compression is negative strain
//! assert!(concrete.stress(-0.003) > 0.0);
//! assert_eq!(steel.stress(-0.01), -420.0);
//! ```

pub mod concrete;
pub mod steel;

pub use concrete::{Concrete, ConcreteLaw};
pub use steel::Steel;

use crate::errors::CalcResult;

/// Common capability of every material model: a pure, total map from
/// strain to stress.
pub trait MaterialModel {
    /// Stress (MPa) for a strain. Defined for every input, NaN included.
    fn stress(&self, strain: f64) -> f64;

    /// Check the material parameters.
    fn validate(&self) -> CalcResult<()>;

    /// Sample the stress-strain curve at `samples` evenly spaced strains
    /// between `from` and `to` (inclusive), for reporting.
    fn curve(&self, from: f64, to: f64, samples: usize) -> Vec<(f64, f64)> {
        match samples {
            0 => Vec::new(),
            1 => vec![(from, self.stress(from))],
            n => (0..n)
                .map(|i| {
                    let strain = from + (to - from) * i as f64 / (n - 1) as f64;
                    (strain, self.stress(strain))
                })
                .collect(),
        }
    }
}
