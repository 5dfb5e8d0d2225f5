//! Section Builder
//!
//! Validates raw geometric and material input and assembles an immutable
//! [`Section`]. Three equivalent entry points:
//!
//! - [`build`] - width, length, concrete and a list of placements
//! - [`SectionBuilder`] - fluent construction in code
//! - [`SectionInput`] - the JSON/TOML input form (`TryFrom<SectionInput> for Section`)
//!
//! ## Validation
//!
//! Rejected with [`CalcError::Validation`], naming the field:
//! - non-positive or non-finite width/length
//! - invalid concrete or steel parameters
//! - non-positive bar area, or bar position outside the open interval (0, L)
//! - two bars closer than [`POSITION_TOLERANCE_MM`]
//! - no reinforcement at all
//! - boundary elements with non-positive dimensions or that do not leave a web
//! - steel area at or above [`MAX_STEEL_FRACTION`] of the gross area
//!
//! Reinforcement ratios outside the 1 %..8 % engineering limits are logged
//! and reported through [`Section::ratio_within_limits`], not rejected.
//!
//! ## Example
//!
//! ```rust
//! use wallcap_core::materials::{Concrete, Steel};
//! use wallcap_core::section::SectionBuilder;
//!
//! let section = SectionBuilder::new(200.0, 1000.0, Concrete::new(28.0))
//!     .label("W-1")
//!     .layer(50.0, 4, 16.0, Steel::grade_420())
//!     .distributed(200.0, 800.0, 4, 2, 10.0, Steel::grade_420())
//!     .layer(950.0, 4, 16.0, Steel::grade_420())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(section.rebars().len(), 6);
//! assert_eq!(section.centroid_mm(), 500.0);
//! ```

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::errors::{require_positive, CalcError, CalcResult};
use crate::materials::{Concrete, Steel};

use super::{
    BoundaryElement, RebarPlacement, Section, MAX_REINFORCEMENT_RATIO, MAX_STEEL_FRACTION, MIN_REINFORCEMENT_RATIO,
    POSITION_TOLERANCE_MM,
};

/// `count` bars of one diameter at one depth.
///
/// ```toml
/// [[section.layers]]
/// depth_mm = 50.0
/// count = 4
/// diameter_mm = 16.0
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RebarLayer {
    pub depth_mm: f64,
    pub count: u32,
    pub diameter_mm: f64,
    #[serde(default)]
    pub steel: Steel,
}

impl RebarLayer {
    pub fn placement(&self) -> RebarPlacement {
        RebarPlacement::from_bars(self.count, self.diameter_mm, self.depth_mm, self.steel)
    }
}

/// Equal layers spread evenly between two depths (both ends included), the
/// usual web reinforcement of a wall.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributedLayers {
    pub from_depth_mm: f64,
    pub to_depth_mm: f64,
    /// Number of layers (at least 1)
    pub layers: u32,
    /// Bars in each layer across the thickness
    pub bars_per_layer: u32,
    pub diameter_mm: f64,
    #[serde(default)]
    pub steel: Steel,
}

impl DistributedLayers {
    pub fn placements(&self) -> Vec<RebarPlacement> {
        match self.layers {
            0 => Vec::new(),
            1 => vec![RebarPlacement::from_bars(
                self.bars_per_layer,
                self.diameter_mm,
                0.5 * (self.from_depth_mm + self.to_depth_mm),
                self.steel,
            )],
            n => {
                let step = (self.to_depth_mm - self.from_depth_mm) / (n - 1) as f64;
                (0..n)
                    .map(|i| {
                        let depth = self.from_depth_mm + i as f64 * step;
                        RebarPlacement::from_bars(self.bars_per_layer, self.diameter_mm, depth, self.steel)
                    })
                    .collect()
            }
        }
    }
}

/// Raw section input, as read from JSON or TOML.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "W-1",
///   "width_mm": 200.0,
///   "length_mm": 1000.0,
///   "concrete": { "fc_mpa": 28.0 },
///   "layers": [
///     { "depth_mm": 50.0, "count": 4, "diameter_mm": 16.0 },
///     { "depth_mm": 950.0, "count": 4, "diameter_mm": 16.0 }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionInput {
    #[serde(default)]
    pub label: String,

    /// Web thickness (mm)
    pub width_mm: f64,

    /// Overall wall length (mm)
    pub length_mm: f64,

    pub concrete: Concrete,

    /// Individual placements
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rebars: Vec<RebarPlacement>,

    /// Layers given by bar count and diameter
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub layers: Vec<RebarLayer>,

    /// Evenly distributed web layers
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub distributed: Vec<DistributedLayers>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_element: Option<BoundaryElement>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom_element: Option<BoundaryElement>,
}

impl SectionInput {
    /// All placements in input order: explicit rebars, then layers, then
    /// distributed layers
    pub fn placements(&self) -> Vec<RebarPlacement> {
        self.rebars
            .iter()
            .copied()
            .chain(self.layers.iter().map(RebarLayer::placement))
            .chain(self.distributed.iter().flat_map(DistributedLayers::placements))
            .collect()
    }
}

impl TryFrom<SectionInput> for Section {
    type Error = CalcError;

    fn try_from(input: SectionInput) -> CalcResult<Section> {
        let rebars = input.placements();
        assemble(
            input.label,
            input.width_mm,
            input.length_mm,
            input.concrete,
            rebars,
            input.top_element,
            input.bottom_element,
        )
    }
}

impl From<Section> for SectionInput {
    fn from(section: Section) -> Self {
        SectionInput {
            label: section.label().to_string(),
            width_mm: section.width_mm(),
            length_mm: section.length_mm(),
            concrete: *section.concrete(),
            rebars: section.rebars().to_vec(),
            layers: Vec::new(),
            distributed: Vec::new(),
            top_element: section.top_element().copied(),
            bottom_element: section.bottom_element().copied(),
        }
    }
}

/// Build a plain rectangular section from its placements.
pub fn build(width_mm: f64, length_mm: f64, concrete: Concrete, rebars: Vec<RebarPlacement>) -> CalcResult<Section> {
    assemble(String::new(), width_mm, length_mm, concrete, rebars, None, None)
}

/// Fluent section construction.
#[derive(Debug, Clone)]
pub struct SectionBuilder {
    input: SectionInput,
}

impl SectionBuilder {
    pub fn new(width_mm: f64, length_mm: f64, concrete: Concrete) -> Self {
        SectionBuilder {
            input: SectionInput {
                label: String::new(),
                width_mm,
                length_mm,
                concrete,
                rebars: Vec::new(),
                layers: Vec::new(),
                distributed: Vec::new(),
                top_element: None,
                bottom_element: None,
            },
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.input.label = label.into();
        self
    }

    /// Add one placement
    pub fn rebar(mut self, placement: RebarPlacement) -> Self {
        self.input.rebars.push(placement);
        self
    }

    /// Add `count` bars of `diameter_mm` at `depth_mm`
    pub fn layer(mut self, depth_mm: f64, count: u32, diameter_mm: f64, steel: Steel) -> Self {
        self.input.layers.push(RebarLayer {
            depth_mm,
            count,
            diameter_mm,
            steel,
        });
        self
    }

    /// Add `layers` equal layers evenly spaced from `from_depth_mm` to `to_depth_mm`
    pub fn distributed(
        mut self,
        from_depth_mm: f64,
        to_depth_mm: f64,
        layers: u32,
        bars_per_layer: u32,
        diameter_mm: f64,
        steel: Steel,
    ) -> Self {
        self.input.distributed.push(DistributedLayers {
            from_depth_mm,
            to_depth_mm,
            layers,
            bars_per_layer,
            diameter_mm,
            steel,
        });
        self
    }

    /// Boundary element at the top edge
    pub fn top_element(mut self, length_mm: f64, width_mm: f64) -> Self {
        self.input.top_element = Some(BoundaryElement::new(length_mm, width_mm));
        self
    }

    /// Boundary element at the bottom edge
    pub fn bottom_element(mut self, length_mm: f64, width_mm: f64) -> Self {
        self.input.bottom_element = Some(BoundaryElement::new(length_mm, width_mm));
        self
    }

    pub fn build(self) -> CalcResult<Section> {
        Section::try_from(self.input)
    }
}

fn validate_element(field: &str, element: &BoundaryElement) -> CalcResult<()> {
    require_positive(&format!("{field}.length_mm"), element.length_mm)?;
    require_positive(&format!("{field}.width_mm"), element.width_mm)
}

fn validate_placement(index: usize, rebar: &RebarPlacement, length_mm: f64, concrete: &Concrete) -> CalcResult<()> {
    require_positive(&format!("rebars[{index}].area_mm2"), rebar.area_mm2)?;
    let depth = rebar.depth_mm;
    if !depth.is_finite() || depth <= 0.0 || depth >= length_mm {
        return Err(CalcError::validation(
            format!("rebars[{index}].depth_mm"),
            depth.to_string(),
            format!("Bar must lie strictly inside the section depth (0, {length_mm})"),
        ));
    }
    rebar.steel.validate().map_err(|err| match err {
        CalcError::Validation { field, value, reason } => {
            CalcError::validation(format!("rebars[{index}].{field}"), value, reason)
        }
        other => other,
    })?;

    // Bars at the compression face reach the concrete's controlling strain
    let crushing = concrete.controlling_strain();
    match rebar.steel.rupture_strain {
        Some(rupture) if rupture <= crushing => Err(CalcError::validation(
            format!("rebars[{index}].steel.rupture_strain"),
            rupture.to_string(),
            format!("Rupture strain must exceed the concrete controlling strain {crushing}"),
        )),
        _ => Ok(()),
    }
}

fn assemble(
    label: String,
    width_mm: f64,
    length_mm: f64,
    concrete: Concrete,
    rebars: Vec<RebarPlacement>,
    top_element: Option<BoundaryElement>,
    bottom_element: Option<BoundaryElement>,
) -> CalcResult<Section> {
    require_positive("width_mm", width_mm)?;
    require_positive("length_mm", length_mm)?;
    concrete.validate()?;

    if let Some(top) = &top_element {
        validate_element("top_element", top)?;
    }
    if let Some(bottom) = &bottom_element {
        validate_element("bottom_element", bottom)?;
    }
    let element_length = top_element.map_or(0.0, |e| e.length_mm) + bottom_element.map_or(0.0, |e| e.length_mm);
    if element_length >= length_mm {
        return Err(CalcError::validation(
            "top_element.length_mm",
            element_length.to_string(),
            format!("Boundary elements must leave a web inside the {length_mm} mm length"),
        ));
    }

    if rebars.is_empty() {
        return Err(CalcError::validation("rebars", "[]", "At least one reinforcing bar is required"));
    }
    for (index, rebar) in rebars.iter().enumerate() {
        validate_placement(index, rebar, length_mm, &concrete)?;
    }

    // Sort by depth, keeping input indices for error messages
    let mut order: Vec<usize> = (0..rebars.len()).collect();
    order.sort_by(|&a, &b| rebars[a].depth_mm.total_cmp(&rebars[b].depth_mm));
    for pair in order.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let gap = rebars[b].depth_mm - rebars[a].depth_mm;
        if gap <= POSITION_TOLERANCE_MM {
            return Err(CalcError::validation(
                format!("rebars[{b}].depth_mm"),
                rebars[b].depth_mm.to_string(),
                format!("Overlaps rebars[{a}] at {} mm; merge bars at the same depth into one placement", rebars[a].depth_mm),
            ));
        }
    }
    let sorted: Vec<RebarPlacement> = order.iter().map(|&i| rebars[i]).collect();

    let section = Section::from_validated(label, width_mm, length_mm, concrete, sorted, top_element, bottom_element);

    if section.steel_area_mm2() >= MAX_STEEL_FRACTION * section.gross_area_mm2() {
        return Err(CalcError::validation(
            "rebars",
            format!("{:.1} mm²", section.steel_area_mm2()),
            format!(
                "Steel area must stay below {:.0}% of the gross area {:.0} mm²",
                MAX_STEEL_FRACTION * 100.0,
                section.gross_area_mm2()
            ),
        ));
    }

    let ratio = section.reinforcement_ratio();
    if !section.ratio_within_limits() {
        warn!(
            "section '{}': reinforcement ratio {:.4} outside {:.2}..{:.2}",
            section.label(),
            ratio,
            MIN_REINFORCEMENT_RATIO,
            MAX_REINFORCEMENT_RATIO
        );
    }
    debug!(
        "built section '{}': {} x {} mm, Ag = {:.0} mm², As = {:.1} mm², {} bar positions",
        section.label(),
        width_mm,
        length_mm,
        section.gross_area_mm2(),
        section.steel_area_mm2(),
        section.rebars().len()
    );

    Ok(section)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steel() -> Steel {
        Steel::grade_420()
    }

    fn field_of(err: CalcError) -> String {
        match err {
            CalcError::Validation { field, .. } => field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_build_function() {
        let rebars = vec![
            RebarPlacement::new(600.0, 940.0, steel()),
            RebarPlacement::new(600.0, 60.0, steel()),
        ];
        let s = build(300.0, 1000.0, Concrete::new(28.0), rebars).unwrap();
        // sorted by depth
        assert_eq!(s.rebars()[0].depth_mm, 60.0);
        assert_eq!(s.rebars()[1].depth_mm, 940.0);
        assert_eq!(s.steel_area_mm2(), 1200.0);
    }

    #[test]
    fn test_rejects_non_positive_dimensions() {
        let rebars = vec![RebarPlacement::new(500.0, 50.0, steel())];
        let err = build(0.0, 1000.0, Concrete::new(28.0), rebars.clone()).unwrap_err();
        assert_eq!(field_of(err), "width_mm");
        let err = build(200.0, -1.0, Concrete::new(28.0), rebars).unwrap_err();
        assert_eq!(field_of(err), "length_mm");
    }

    #[test]
    fn test_rejects_bar_outside_section() {
        for depth in [0.0, 1000.0, -5.0, 1200.0, f64::NAN] {
            let rebars = vec![RebarPlacement::new(500.0, depth, steel())];
            let err = build(200.0, 1000.0, Concrete::new(28.0), rebars).unwrap_err();
            assert_eq!(field_of(err), "rebars[0].depth_mm");
        }
    }

    #[test]
    fn test_rejects_duplicate_positions() {
        let rebars = vec![
            RebarPlacement::new(500.0, 50.0, steel()),
            RebarPlacement::new(500.0, 950.0, steel()),
            RebarPlacement::new(300.0, 50.0, steel()),
        ];
        let err = build(200.0, 1000.0, Concrete::new(28.0), rebars).unwrap_err();
        assert_eq!(field_of(err), "rebars[2].depth_mm");
    }

    #[test]
    fn test_rejects_empty_reinforcement() {
        let err = build(200.0, 1000.0, Concrete::new(28.0), Vec::new()).unwrap_err();
        assert_eq!(field_of(err), "rebars");
    }

    #[test]
    fn test_rejects_bad_materials() {
        let rebars = vec![RebarPlacement::new(500.0, 50.0, Steel::new(-420.0))];
        let err = build(200.0, 1000.0, Concrete::new(28.0), rebars).unwrap_err();
        assert_eq!(field_of(err), "rebars[0].steel.fy_mpa");

        let rebars = vec![RebarPlacement::new(500.0, 50.0, steel())];
        let err = build(200.0, 1000.0, Concrete::new(0.0), rebars).unwrap_err();
        assert_eq!(field_of(err), "concrete.fc_mpa");
    }

    #[test]
    fn test_rejects_rupture_before_crushing() {
        // yields at 0.0021 but ruptures before the 0.003 crushing strain
        let brittle = steel().with_rupture_strain(0.0025);
        let err = SectionBuilder::new(200.0, 1000.0, Concrete::new(28.0))
            .layer(50.0, 4, 16.0, steel())
            .layer(950.0, 4, 16.0, brittle)
            .build()
            .unwrap_err();
        assert_eq!(field_of(err), "rebars[1].steel.rupture_strain");

        let err = SectionBuilder::new(200.0, 1000.0, Concrete::new(28.0))
            .layer(50.0, 4, 16.0, steel().with_rupture_strain(0.003))
            .build()
            .unwrap_err();
        assert_eq!(field_of(err), "rebars[0].steel.rupture_strain");

        // the decay law only reaches 0.002 in compression
        let decay = Concrete::new(28.0).with_law(crate::materials::ConcreteLaw::ParabolaLinearDecay);
        assert!(SectionBuilder::new(200.0, 1000.0, decay)
            .layer(50.0, 4, 16.0, brittle)
            .layer(950.0, 4, 16.0, brittle)
            .build()
            .is_ok());
    }

    #[test]
    fn test_rejects_excessive_steel() {
        // 60 000 mm² in a 200 000 mm² section
        let rebars = vec![
            RebarPlacement::new(30_000.0, 50.0, steel()),
            RebarPlacement::new(30_000.0, 950.0, steel()),
        ];
        let err = build(200.0, 1000.0, Concrete::new(28.0), rebars).unwrap_err();
        assert_eq!(field_of(err), "rebars");
    }

    #[test]
    fn test_light_reinforcement_is_reported_not_rejected() {
        let s = SectionBuilder::new(200.0, 1000.0, Concrete::new(28.0))
            .layer(500.0, 1, 10.0, steel())
            .build()
            .unwrap();
        assert!(s.reinforcement_ratio() < MIN_REINFORCEMENT_RATIO);
        assert!(!s.ratio_within_limits());
    }

    #[test]
    fn test_boundary_element_validation() {
        let err = SectionBuilder::new(200.0, 1000.0, Concrete::new(28.0))
            .top_element(600.0, 300.0)
            .bottom_element(400.0, 300.0)
            .layer(50.0, 2, 16.0, steel())
            .build()
            .unwrap_err();
        assert_eq!(field_of(err), "top_element.length_mm");

        let err = SectionBuilder::new(200.0, 1000.0, Concrete::new(28.0))
            .bottom_element(300.0, 0.0)
            .layer(50.0, 2, 16.0, steel())
            .build()
            .unwrap_err();
        assert_eq!(field_of(err), "bottom_element.width_mm");
    }

    #[test]
    fn test_distributed_layers() {
        let d = DistributedLayers {
            from_depth_mm: 200.0,
            to_depth_mm: 800.0,
            layers: 4,
            bars_per_layer: 2,
            diameter_mm: 10.0,
            steel: steel(),
        };
        let p = d.placements();
        let depths: Vec<f64> = p.iter().map(|r| r.depth_mm).collect();
        assert_eq!(depths, vec![200.0, 400.0, 600.0, 800.0]);

        let single = DistributedLayers { layers: 1, ..d };
        assert_eq!(single.placements()[0].depth_mm, 500.0);
        assert!(DistributedLayers { layers: 0, ..d }.placements().is_empty());
    }

    #[test]
    fn test_input_from_toml() {
        let toml_src = r#"
            label = "W-1"
            width_mm = 200.0
            length_mm = 1000.0

            [concrete]
            fc_mpa = 28.0

            [[layers]]
            depth_mm = 50.0
            count = 4
            diameter_mm = 16.0

            [[layers]]
            depth_mm = 950.0
            count = 4
            diameter_mm = 16.0
        "#;
        let input: SectionInput = toml::from_str(toml_src).unwrap();
        let section = Section::try_from(input).unwrap();
        assert_eq!(section.label(), "W-1");
        assert_eq!(section.rebars().len(), 2);
        assert_eq!(section.rebars()[0].steel, Steel::grade_420());
    }
}
