//! # Section Model
//!
//! Immutable description of a rectangular reinforced-concrete wall or column
//! cross-section, bent about its thickness axis.
//!
//! ## Geometry
//!
//! ```text
//!  depth 0 (top / reference edge)
//!  ┌──────────┐  ─┐
//!  │  top     │   │ top boundary element (optional, own width)
//!  └─┐      ┌─┘  ─┘
//!    │ web  │       web, width = width_mm
//!  ┌─┘      └─┐  ─┐
//!  │  bottom  │   │ bottom boundary element (optional)
//!  └──────────┘  ─┘
//!  depth L = length_mm
//! ```
//!
//! Rebar positions are measured from the top edge. The centroid is the gross
//! concrete centroid, always derived from the width profile.
//!
//! Sections are created by the [`builder`]; once built they are read-only.
//! Deserialization goes through [`SectionInput`] so a section read from JSON
//! or TOML is validated exactly like one built in code.

pub mod builder;
pub mod geometry;

pub use builder::{build, DistributedLayers, RebarLayer, SectionBuilder, SectionInput};
pub use geometry::{BendingDirection, Strip, WidthSegment};

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::materials::{Concrete, Steel};

/// Minimum spacing between two rebar placements (mm). Closer bars must be
/// merged into one placement so their area is not counted twice.
pub const POSITION_TOLERANCE_MM: f64 = 1e-3;

/// Physical upper bound on total steel area as a fraction of gross area
pub const MAX_STEEL_FRACTION: f64 = 0.25;

/// Lower engineering limit on longitudinal reinforcement ratio (ACI 318 10.6.1.1)
pub const MIN_REINFORCEMENT_RATIO: f64 = 0.01;

/// Upper engineering limit on longitudinal reinforcement ratio (ACI 318 10.6.1.1)
pub const MAX_REINFORCEMENT_RATIO: f64 = 0.08;

/// Area of one round bar (mm²)
pub fn bar_area_mm2(diameter_mm: f64) -> f64 {
    PI * diameter_mm * diameter_mm / 4.0
}

/// A longitudinal bar (or a group of bars at the same depth).
///
/// ## JSON Example
///
/// ```json
/// { "area_mm2": 804.2, "depth_mm": 50.0, "steel": { "fy_mpa": 420.0 } }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RebarPlacement {
    /// Total steel area at this depth (mm²)
    pub area_mm2: f64,

    /// Distance from the top edge (mm)
    pub depth_mm: f64,

    /// Bar material
    #[serde(default)]
    pub steel: Steel,
}

impl RebarPlacement {
    pub fn new(area_mm2: f64, depth_mm: f64, steel: Steel) -> Self {
        RebarPlacement {
            area_mm2,
            depth_mm,
            steel,
        }
    }

    /// `count` bars of `diameter_mm` at one depth
    pub fn from_bars(count: u32, diameter_mm: f64, depth_mm: f64, steel: Steel) -> Self {
        RebarPlacement::new(count as f64 * bar_area_mm2(diameter_mm), depth_mm, steel)
    }
}

/// Rectangular enlargement at one end of a wall.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundaryElement {
    /// Extent along the wall length (mm)
    pub length_mm: f64,

    /// Thickness of the element (mm)
    pub width_mm: f64,
}

impl BoundaryElement {
    pub fn new(length_mm: f64, width_mm: f64) -> Self {
        BoundaryElement { length_mm, width_mm }
    }
}

/// A validated cross-section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SectionInput", into = "SectionInput")]
pub struct Section {
    label: String,
    width_mm: f64,
    length_mm: f64,
    concrete: Concrete,
    rebars: Vec<RebarPlacement>,
    top_element: Option<BoundaryElement>,
    bottom_element: Option<BoundaryElement>,
    gross_area_mm2: f64,
    centroid_mm: f64,
    steel_area_mm2: f64,
}

impl Section {
    /// Assemble a section from already validated parts. Rebars must be
    /// sorted by depth.
    pub(crate) fn from_validated(
        label: String,
        width_mm: f64,
        length_mm: f64,
        concrete: Concrete,
        rebars: Vec<RebarPlacement>,
        top_element: Option<BoundaryElement>,
        bottom_element: Option<BoundaryElement>,
    ) -> Self {
        let segments = geometry::profile(width_mm, length_mm, top_element, bottom_element);
        let gross_area_mm2: f64 = segments.iter().map(WidthSegment::area_mm2).sum();
        let first_moment: f64 = segments.iter().map(|s| s.area_mm2() * s.mid_mm()).sum();
        let steel_area_mm2 = rebars.iter().map(|r| r.area_mm2).sum();

        Section {
            label,
            width_mm,
            length_mm,
            concrete,
            rebars,
            top_element,
            bottom_element,
            gross_area_mm2,
            centroid_mm: first_moment / gross_area_mm2,
            steel_area_mm2,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Web thickness (mm)
    pub fn width_mm(&self) -> f64 {
        self.width_mm
    }

    /// Overall wall length, the bending depth (mm)
    pub fn length_mm(&self) -> f64 {
        self.length_mm
    }

    pub fn concrete(&self) -> &Concrete {
        &self.concrete
    }

    /// Rebar placements sorted by depth from the top edge
    pub fn rebars(&self) -> &[RebarPlacement] {
        &self.rebars
    }

    pub fn top_element(&self) -> Option<&BoundaryElement> {
        self.top_element.as_ref()
    }

    pub fn bottom_element(&self) -> Option<&BoundaryElement> {
        self.bottom_element.as_ref()
    }

    /// Gross concrete area Ag (mm²), bars not deducted
    pub fn gross_area_mm2(&self) -> f64 {
        self.gross_area_mm2
    }

    /// Gross-area centroid measured from the top edge (mm)
    pub fn centroid_mm(&self) -> f64 {
        self.centroid_mm
    }

    /// Total longitudinal steel area As (mm²)
    pub fn steel_area_mm2(&self) -> f64 {
        self.steel_area_mm2
    }

    /// Longitudinal reinforcement ratio ρ = As / Ag
    pub fn reinforcement_ratio(&self) -> f64 {
        self.steel_area_mm2 / self.gross_area_mm2
    }

    /// Whether ρ lies within the 1 %..8 % engineering limits. Reported only;
    /// sections outside the limits are still analyzed.
    pub fn ratio_within_limits(&self) -> bool {
        (MIN_REINFORCEMENT_RATIO..=MAX_REINFORCEMENT_RATIO).contains(&self.reinforcement_ratio())
    }

    /// Concrete width at a depth from the top edge (mm); zero outside the section
    pub fn width_at(&self, depth_mm: f64) -> f64 {
        self.width_profile(BendingDirection::Positive)
            .iter()
            .find(|s| depth_mm >= s.start_mm && depth_mm <= s.end_mm)
            .map_or(0.0, |s| s.width_mm)
    }

    /// Piecewise-constant width profile measured from the compression face
    /// of the given bending direction
    pub fn width_profile(&self, direction: BendingDirection) -> Vec<WidthSegment> {
        let segments = geometry::profile(self.width_mm, self.length_mm, self.top_element, self.bottom_element);
        match direction {
            BendingDirection::Positive => segments,
            BendingDirection::Negative => segments
                .iter()
                .rev()
                .map(|s| WidthSegment {
                    start_mm: self.length_mm - s.end_mm,
                    end_mm: self.length_mm - s.start_mm,
                    width_mm: s.width_mm,
                })
                .collect(),
        }
    }

    /// Depth of the extreme tension bar from the compression face (mm)
    pub fn extreme_tension_depth_mm(&self, direction: BendingDirection) -> f64 {
        self.rebars
            .iter()
            .map(|r| direction.depth_from_compression_face(r.depth_mm, self.length_mm))
            .fold(0.0, f64::max)
    }

    /// The bar farthest from the compression face
    pub fn extreme_tension_bar(&self, direction: BendingDirection) -> Option<&RebarPlacement> {
        match direction {
            BendingDirection::Positive => self.rebars.last(),
            BendingDirection::Negative => self.rebars.first(),
        }
    }

    /// True when geometry and reinforcement are mirror images about mid-length
    pub fn is_symmetric(&self) -> bool {
        let tol = POSITION_TOLERANCE_MM;
        let elements_match = match (self.top_element, self.bottom_element) {
            (None, None) => true,
            (Some(t), Some(b)) => (t.length_mm - b.length_mm).abs() < tol && (t.width_mm - b.width_mm).abs() < tol,
            _ => false,
        };
        elements_match
            && self
                .rebars
                .iter()
                .zip(self.rebars.iter().rev())
                .all(|(a, b)| {
                    (a.depth_mm - (self.length_mm - b.depth_mm)).abs() < tol
                        && (a.area_mm2 - b.area_mm2).abs() < 1e-9 * a.area_mm2.max(1.0)
                        && a.steel == b.steel
                })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall() -> Section {
        SectionBuilder::new(200.0, 1000.0, Concrete::new(28.0))
            .layer(50.0, 4, 16.0, Steel::grade_420())
            .layer(950.0, 4, 16.0, Steel::grade_420())
            .build()
            .unwrap()
    }

    #[test]
    fn test_bar_area() {
        assert!((bar_area_mm2(16.0) - 201.06).abs() < 0.01);
        let p = RebarPlacement::from_bars(4, 16.0, 50.0, Steel::grade_420());
        assert!((p.area_mm2 - 804.25).abs() < 0.01);
    }

    #[test]
    fn test_rectangular_properties() {
        let s = wall();
        assert_eq!(s.gross_area_mm2(), 200_000.0);
        assert_eq!(s.centroid_mm(), 500.0);
        assert!((s.steel_area_mm2() - 1608.5).abs() < 0.1);
        assert!((s.reinforcement_ratio() - 0.008042).abs() < 1e-5);
        assert!(!s.ratio_within_limits());
        assert!(s.is_symmetric());
    }

    #[test]
    fn test_boundary_elements_shift_centroid() {
        let s = SectionBuilder::new(200.0, 3000.0, Concrete::new(28.0))
            .top_element(400.0, 400.0)
            .layer(50.0, 4, 20.0, Steel::grade_420())
            .layer(2950.0, 2, 16.0, Steel::grade_420())
            .build()
            .unwrap();
        // 400x400 head + 2600x200 web
        assert_eq!(s.gross_area_mm2(), 160_000.0 + 520_000.0);
        let expected = (160_000.0 * 200.0 + 520_000.0 * 1700.0) / 680_000.0;
        assert!((s.centroid_mm() - expected).abs() < 1e-9);
        assert_eq!(s.width_at(100.0), 400.0);
        assert_eq!(s.width_at(1500.0), 200.0);
        assert_eq!(s.width_at(3500.0), 0.0);
        assert!(!s.is_symmetric());
    }

    #[test]
    fn test_negative_profile_is_mirrored() {
        let s = SectionBuilder::new(200.0, 3000.0, Concrete::new(28.0))
            .top_element(400.0, 400.0)
            .layer(50.0, 4, 20.0, Steel::grade_420())
            .build()
            .unwrap();
        let profile = s.width_profile(BendingDirection::Negative);
        let last = profile.last().unwrap();
        assert_eq!(last.width_mm, 400.0);
        assert_eq!(last.start_mm, 2600.0);
        assert_eq!(last.end_mm, 3000.0);
        assert_eq!(profile[0].start_mm, 0.0);
    }

    #[test]
    fn test_extreme_tension_bar() {
        let s = wall();
        assert_eq!(s.extreme_tension_depth_mm(BendingDirection::Positive), 950.0);
        assert_eq!(s.extreme_tension_depth_mm(BendingDirection::Negative), 950.0);
        assert_eq!(s.extreme_tension_bar(BendingDirection::Positive).unwrap().depth_mm, 950.0);
        assert_eq!(s.extreme_tension_bar(BendingDirection::Negative).unwrap().depth_mm, 50.0);
    }

    #[test]
    fn test_serialization_revalidates() {
        let s = wall();
        let json = serde_json::to_string(&s).unwrap();
        let back: Section = serde_json::from_str(&json).unwrap();
        assert_eq!(s, back);

        let bad = json.replace("\"length_mm\":1000.0", "\"length_mm\":-1000.0");
        assert!(serde_json::from_str::<Section>(&bad).is_err());
    }
}
