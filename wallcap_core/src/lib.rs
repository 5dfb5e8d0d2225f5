//! # wallcap_core - Reinforced-Concrete Section Capacity Engine
//!
//! `wallcap_core` computes the axial-flexural (P-M) interaction diagram and
//! the shear strength of rectangular reinforced-concrete walls and columns,
//! optionally with boundary elements at either end. All inputs and outputs
//! are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: pure functions of a section, explicit inputs and a config
//! - **Validated once**: a [`Section`] can only exist in a valid state
//! - **JSON-First**: every input and result implements Serialize/Deserialize
//! - **Rich Errors**: structured [`CalcError`]s naming the field or sweep state
//!
//! ## Units and Signs
//!
//! mm, MPa and N internally; results in kN and kN·m. Axial load is positive
//! in compression, strains are negative in compression.
//!
//! ## Quick Start
//!
//! ```rust
//! use wallcap_core::prelude::*;
//!
//! let section = SectionBuilder::new(200.0, 1000.0, Concrete::new(28.0))
//!     .layer(50.0, 4, 16.0, Steel::grade_420())
//!     .layer(950.0, 4, 16.0, Steel::grade_420())
//!     .build()
//!     .unwrap();
//!
//! let config = InteractionConfig::default();
//! let diagram = interaction_diagram(&section, BendingDirection::Positive, &config).unwrap();
//! let check = check_axial_flexure(&diagram, &config.reduction, 1200.0, 150.0).unwrap();
//! assert!(check.passes());
//!
//! let ties = TransverseReinforcement::new(157.0, 200.0, Steel::grade_420());
//! let shear = shear_capacity(&section, 1200.0, &ties, &ShearConfig::default()).unwrap();
//! assert!(check_shear(&shear, 200.0).passes());
//! ```
//!
//! ## Modules
//!
//! - [`materials`] - concrete and steel stress-strain models
//! - [`section`] - section model, builder and fiber discretization
//! - [`calculations`] - interaction diagram, strength reduction, shear, demand checks
//! - [`config`] - analysis settings
//! - [`input`] - TOML/JSON input files
//! - [`units`] - type-safe unit wrappers
//! - [`errors`] - structured error types

pub mod calculations;
pub mod config;
pub mod errors;
pub mod input;
pub mod materials;
pub mod section;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use errors::{CalcError, CalcResult};
pub use section::Section;

/// Everything needed for a typical analysis.
pub mod prelude {
    pub use crate::calculations::{
        check_axial_flexure, check_shear, discretization_error, interaction_diagram, shear_capacity, ControlKind,
        InteractionDiagram, ShearResult, StrengthReduction, TransverseReinforcement,
    };
    pub use crate::config::{InteractionConfig, ShearConfig, ShearMethod};
    pub use crate::errors::{CalcError, CalcResult};
    pub use crate::materials::{Concrete, ConcreteLaw, Steel};
    pub use crate::section::{BendingDirection, Section, SectionBuilder};
}
