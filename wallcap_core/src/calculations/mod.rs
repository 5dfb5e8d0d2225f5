//! # Capacity Calculations
//!
//! Every calculation is a pure function of a validated [`Section`](crate::section::Section),
//! explicit inputs and a configuration struct. Results are JSON-serializable.
//!
//! ## Available Calculations
//!
//! - [`interaction`] - nominal P-M interaction diagram by fiber strain compatibility
//! - [`reduction`] - strength reduction factors and design envelopes
//! - [`shear`] - ACI 318-19 shear strength (wall and member provisions)
//! - [`demand`] - unity checks of factored demands
//! - [`strain`] - plane-section strain states used by the sweep

pub mod demand;
pub mod interaction;
pub mod reduction;
pub mod shear;
pub mod strain;

pub use demand::{check_axial_flexure, check_shear, FlexureCheck, ShearCheck};
pub use interaction::{
    discretization_error, interaction_diagram, CapacityPoint, ControlKind, DiagramSummary, InteractionDiagram,
};
pub use reduction::{DesignPoint, StrengthReduction};
pub use shear::{shear_capacity, ShearResult, TransverseReinforcement};
pub use strain::{Fiber, StrainState};
