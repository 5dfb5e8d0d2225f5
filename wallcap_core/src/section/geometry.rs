//! Width profile and fiber discretization.
//!
//! The section width is piecewise constant along the wall length, so strip
//! areas and centroids are integrated exactly, including strips that straddle
//! a boundary-element edge.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

use super::{BoundaryElement, Section};

/// Which face is in compression.
///
/// `Positive` puts the top edge (depth 0) in compression and reports
/// positive moments; `Negative` mirrors the section so the bottom edge is in
/// compression and reports negative moments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BendingDirection {
    #[default]
    Positive,
    Negative,
}

impl BendingDirection {
    /// Convert a depth from the top edge into a depth from the compression face
    pub fn depth_from_compression_face(self, depth_mm: f64, length_mm: f64) -> f64 {
        match self {
            BendingDirection::Positive => depth_mm,
            BendingDirection::Negative => length_mm - depth_mm,
        }
    }

    /// Sign applied to moments computed in compression-face coordinates
    pub fn moment_sign(self) -> f64 {
        match self {
            BendingDirection::Positive => 1.0,
            BendingDirection::Negative => -1.0,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            BendingDirection::Positive => "Positive (top in compression)",
            BendingDirection::Negative => "Negative (bottom in compression)",
        }
    }
}

impl std::fmt::Display for BendingDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A depth interval of constant width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WidthSegment {
    pub start_mm: f64,
    pub end_mm: f64,
    pub width_mm: f64,
}

impl WidthSegment {
    pub fn area_mm2(&self) -> f64 {
        self.width_mm * (self.end_mm - self.start_mm)
    }

    pub fn mid_mm(&self) -> f64 {
        0.5 * (self.start_mm + self.end_mm)
    }
}

/// Width profile from the top edge: top element, web, bottom element.
pub(crate) fn profile(
    width_mm: f64,
    length_mm: f64,
    top: Option<BoundaryElement>,
    bottom: Option<BoundaryElement>,
) -> Vec<WidthSegment> {
    let web_start = top.map_or(0.0, |t| t.length_mm);
    let web_end = bottom.map_or(length_mm, |b| length_mm - b.length_mm);

    let mut segments = Vec::with_capacity(3);
    if let Some(t) = top {
        segments.push(WidthSegment {
            start_mm: 0.0,
            end_mm: web_start,
            width_mm: t.width_mm,
        });
    }
    segments.push(WidthSegment {
        start_mm: web_start,
        end_mm: web_end,
        width_mm,
    });
    if let Some(b) = bottom {
        segments.push(WidthSegment {
            start_mm: web_end,
            end_mm: length_mm,
            width_mm: b.width_mm,
        });
    }
    segments
}

/// Geometry of one concrete strip, fixed for a given fiber count.
///
/// Strains are not stored here: they are recomputed for every strain state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Strip {
    /// Strip area (mm²)
    pub area_mm2: f64,
    /// Centroid depth from the compression face (mm)
    pub depth_mm: f64,
}

/// Split the section into `fiber_count` strips of equal depth, measured from
/// the compression face of `direction`.
pub fn discretize(section: &Section, direction: BendingDirection, fiber_count: usize) -> CalcResult<Vec<Strip>> {
    if fiber_count == 0 {
        return Err(CalcError::computation("fiber discretization", "fiber count must be at least 1"));
    }

    let segments = section.width_profile(direction);
    let length = section.length_mm();
    let step = length / fiber_count as f64;

    (0..fiber_count)
        .map(|i| {
            let top = i as f64 * step;
            let bottom = if i + 1 == fiber_count { length } else { top + step };

            let (area, first_moment) = segments.iter().fold((0.0, 0.0), |(area, moment), seg| {
                let start = seg.start_mm.max(top);
                let end = seg.end_mm.min(bottom);
                if end <= start {
                    return (area, moment);
                }
                let a = seg.width_mm * (end - start);
                (area + a, moment + a * 0.5 * (start + end))
            });

            if !area.is_finite() || area <= 0.0 || !first_moment.is_finite() {
                return Err(CalcError::computation(
                    "fiber discretization",
                    format!("strip {} between {:.3} and {:.3} mm has no concrete area", i, top, bottom),
                ));
            }

            Ok(Strip {
                area_mm2: area,
                depth_mm: first_moment / area,
            })
        })
        .collect()
}
