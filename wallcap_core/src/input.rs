//! # Input Files
//!
//! A wall input file bundles a section with the optional transverse
//! reinforcement and analysis settings. TOML and JSON are both accepted; the
//! format follows the file extension.
//!
//! ```toml
//! [section]
//! label = "W-1"
//! width_mm = 200.0
//! length_mm = 1000.0
//! concrete = { fc_mpa = 28.0 }
//!
//! [[section.layers]]
//! depth_mm = 50.0
//! count = 4
//! diameter_mm = 16.0
//!
//! [[section.layers]]
//! depth_mm = 950.0
//! count = 4
//! diameter_mm = 16.0
//!
//! [transverse]
//! area_mm2 = 157.0
//! spacing_mm = 200.0
//!
//! [interaction]
//! fiber_count = 50
//! ```
//!
//! Syntax errors are reported as serialization errors. The section is built
//! after parsing, so an invalid section is reported as a validation error
//! naming the offending field.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::calculations::shear::TransverseReinforcement;
use crate::config::{InteractionConfig, ShearConfig};
use crate::errors::{CalcError, CalcResult};
use crate::materials::{Concrete, Steel};
use crate::section::{Section, SectionBuilder, SectionInput};

/// Contents of a wall input file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallInput {
    pub section: Section,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transverse: Option<TransverseReinforcement>,

    #[serde(default)]
    pub interaction: InteractionConfig,

    #[serde(default)]
    pub shear: ShearConfig,
}

impl WallInput {
    /// 200 x 1000 mm wall, f'c = 28 MPa, 4Ø16 at 50 mm from each end, Ø10
    /// horizontal bars on both faces at 200 mm
    pub fn demo() -> CalcResult<Self> {
        let section = SectionBuilder::new(200.0, 1000.0, Concrete::new(28.0))
            .label("Demo wall")
            .layer(50.0, 4, 16.0, Steel::grade_420())
            .layer(950.0, 4, 16.0, Steel::grade_420())
            .build()?;
        Ok(WallInput {
            section,
            transverse: Some(TransverseReinforcement::new(157.0, 200.0, Steel::grade_420())),
            interaction: InteractionConfig::default(),
            shear: ShearConfig::default(),
        })
    }

    /// Transverse reinforcement, or none when the file has no table
    pub fn transverse_or_none(&self) -> TransverseReinforcement {
        self.transverse.unwrap_or_else(TransverseReinforcement::none)
    }
}

/// Wall input as written, before the section is built
#[derive(Deserialize)]
struct WallInputFile {
    section: SectionInput,

    #[serde(default)]
    transverse: Option<TransverseReinforcement>,

    #[serde(default)]
    interaction: InteractionConfig,

    #[serde(default)]
    shear: ShearConfig,
}

impl TryFrom<WallInputFile> for WallInput {
    type Error = CalcError;

    fn try_from(file: WallInputFile) -> CalcResult<Self> {
        Ok(WallInput {
            section: Section::try_from(file.section)?,
            transverse: file.transverse,
            interaction: file.interaction,
            shear: file.shear,
        })
    }
}

/// Input file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Toml,
    Json,
}

impl InputFormat {
    /// Format from the file extension (`.toml` or `.json`)
    pub fn from_path(path: &Path) -> CalcResult<Self> {
        match path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).as_deref() {
            Some("toml") => Ok(InputFormat::Toml),
            Some("json") => Ok(InputFormat::Json),
            other => Err(CalcError::file_error(
                "detect format",
                path.display().to_string(),
                format!("unsupported extension {:?}, expected .toml or .json", other.unwrap_or("")),
            )),
        }
    }
}

/// Parse input text in the given format.
pub fn parse_input(contents: &str, format: InputFormat) -> CalcResult<WallInput> {
    let file: WallInputFile = match format {
        InputFormat::Json => serde_json::from_str(contents)?,
        InputFormat::Toml => {
            toml::from_str(contents).map_err(|e| CalcError::serialization(format!("Invalid TOML: {}", e.message())))?
        }
    };
    WallInput::try_from(file)
}

/// Read and parse an input file.
pub fn load_input(path: &Path) -> CalcResult<WallInput> {
    let format = InputFormat::from_path(path)?;
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
    parse_input(&contents, format).map_err(|err| match err {
        CalcError::Serialization { reason } => {
            CalcError::serialization(format!("{}: {}", path.display(), reason))
        }
        other => other,
    })
}
