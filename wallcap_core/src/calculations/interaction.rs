//! # P-M Interaction Diagram
//!
//! Nominal axial-flexural capacity of a section by strain compatibility
//! over a fiber discretization.
//!
//! ## Sweep
//!
//! With εc the controlling compressive strain of the concrete law and εt the
//! strain in the extreme tension bar (depth `d_t` from the compression face):
//!
//! ```text
//!  index 0            pure compression, uniform -εc
//!  1 ..= n_c          εt stepped from -εc to εy (both exclusive)
//!  n_c + 1            balanced, εt = εy
//!  .. n_c + 1 + n_t   εt stepped from εy (exclusive) to max_steel_strain
//!  last               pure tension, uniform strain yielding every bar
//! ```
//!
//! where `n_c = ceil(k / 2)`, `n_t = k - n_c` and `k` is
//! `intermediate_points`. Each linear state pins the compression face at
//! `-εc` and the neutral axis at `c = d_t·εc / (εc + εt)`.
//!
//! ## Forces
//!
//! Axial load P is positive in compression. Moments are taken about the
//! gross-section centroid, positive when the compression face of the chosen
//! [`BendingDirection`] is the top edge. Bar areas are deducted from the
//! strips they occupy, so the concrete a bar displaces carries that strip's
//! stress and is never counted twice.
//!
//! ## Example
//!
//! ```rust
//! use wallcap_core::calculations::interaction::interaction_diagram;
//! use wallcap_core::config::InteractionConfig;
//! use wallcap_core::materials::{Concrete, Steel};
//! use wallcap_core::section::{BendingDirection, SectionBuilder};
//!
//! let section = SectionBuilder::new(200.0, 1000.0, Concrete::new(28.0))
//!     .layer(50.0, 4, 16.0, Steel::grade_420())
//!     .layer(950.0, 4, 16.0, Steel::grade_420())
//!     .build()
//!     .unwrap();
//!
//! let diagram = interaction_diagram(&section, BendingDirection::Positive, &InteractionConfig::default()).unwrap();
//! assert_eq!(diagram.points().len(), 43);
//!
//! let summary = diagram.summary();
//! assert!(summary.pure_compression_kn > 5000.0);
//! assert!(summary.pure_tension_kn < 0.0);
//! ```

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::config::InteractionConfig;
use crate::errors::{CalcError, CalcResult};
use crate::materials::{Concrete, Steel};
use crate::section::geometry::discretize;
use crate::section::{BendingDirection, Section, Strip};
use crate::units::{KilonewtonMeters, Kilonewtons, NewtonMillimeters, Newtons};

use super::reduction::{reduce, DesignPoint, StrengthReduction, TENSION_CONTROL_INCREMENT};
use super::strain::{Fiber, StrainState};

/// Fraction of the smallest rupture strain the tension sweep may reach
const RUPTURE_MARGIN: f64 = 0.99;

/// Failure mode classification of a strain state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlKind {
    PureCompression,
    /// Extreme tension bar below yield
    CompressionControlled,
    /// Extreme tension bar exactly at yield
    Balanced,
    /// Between yield and yield + 0.003
    Transition,
    /// At least 0.003 beyond yield
    TensionControlled,
    PureTension,
}

impl ControlKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            ControlKind::PureCompression => "Pure compression",
            ControlKind::CompressionControlled => "Compression-controlled",
            ControlKind::Balanced => "Balanced",
            ControlKind::Transition => "Transition",
            ControlKind::TensionControlled => "Tension-controlled",
            ControlKind::PureTension => "Pure tension",
        }
    }
}

/// One nominal (P, M) capacity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacityPoint {
    /// Nominal axial strength Pn (kN, compression positive)
    pub axial_kn: f64,
    /// Nominal moment Mn about the gross centroid (kN·m)
    pub moment_knm: f64,
    pub strain_state: StrainState,
    pub control: ControlKind,
    /// Strain in the extreme tension bar εt
    pub net_tensile_strain: f64,
    /// Axial force carried by the concrete, bar areas deducted (kN)
    pub concrete_kn: f64,
    /// Axial force carried by the bars (kN)
    pub steel_kn: f64,
}

/// Nominal interaction diagram for one bending direction, in sweep order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InteractionDiagram {
    direction: BendingDirection,
    fiber_count: usize,
    /// Yield strain of the extreme tension bar (drives φ)
    tension_yield_strain: f64,
    fc_mpa: f64,
    gross_area_mm2: f64,
    balanced_index: usize,
    points: Vec<CapacityPoint>,
}

/// Key values of a diagram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiagramSummary {
    /// Po (kN)
    pub pure_compression_kn: f64,
    /// To (kN, negative)
    pub pure_tension_kn: f64,
    pub balanced: CapacityPoint,
    /// Point of largest |M|
    pub max_moment: CapacityPoint,
    /// 0.35·f'c·Ag (kN), axial ceiling for walls designed by the simplified
    /// method (ACI 318-19 11.5.3)
    pub axial_limit_035_kn: f64,
    /// 0.10·f'c·Ag (kN), below which a wall may be designed as a beam
    /// (ACI 318-19 18.10.6.4)
    pub axial_limit_010_kn: f64,
}

impl InteractionDiagram {
    pub fn direction(&self) -> BendingDirection {
        self.direction
    }

    pub fn fiber_count(&self) -> usize {
        self.fiber_count
    }

    pub fn tension_yield_strain(&self) -> f64 {
        self.tension_yield_strain
    }

    pub fn points(&self) -> &[CapacityPoint] {
        &self.points
    }

    pub fn pure_compression(&self) -> &CapacityPoint {
        &self.points[0]
    }

    pub fn balanced(&self) -> &CapacityPoint {
        &self.points[self.balanced_index]
    }

    pub fn pure_tension(&self) -> &CapacityPoint {
        &self.points[self.points.len() - 1]
    }

    pub fn summary(&self) -> DiagramSummary {
        let max_moment = self
            .points
            .iter()
            .fold(self.points[0], |best, p| if p.moment_knm.abs() > best.moment_knm.abs() { *p } else { best });
        let fc_ag_kn = Kilonewtons::from(Newtons(self.fc_mpa * self.gross_area_mm2)).0;

        DiagramSummary {
            pure_compression_kn: self.pure_compression().axial_kn,
            pure_tension_kn: self.pure_tension().axial_kn,
            balanced: *self.balanced(),
            max_moment,
            axial_limit_035_kn: 0.35 * fc_ag_kn,
            axial_limit_010_kn: 0.10 * fc_ag_kn,
        }
    }

    /// (P kN, M kN·m) pairs in sweep order, for plotting
    pub fn curve(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| (p.axial_kn, p.moment_knm)).collect()
    }

    /// Design envelope under a strength reduction rule
    pub fn reduced(&self, reduction: &StrengthReduction) -> CalcResult<Vec<DesignPoint>> {
        reduce(&self.points, self.tension_yield_strain, reduction)
    }
}

/// A bar in compression-face coordinates.
#[derive(Debug, Clone, Copy)]
struct Bar {
    area_mm2: f64,
    depth_mm: f64,
    steel: Steel,
}

/// Fixed geometry of one sweep. Strip areas are net of the bars they hold.
struct SweepGeometry {
    strips: Vec<Strip>,
    bars: Vec<Bar>,
    centroid_mm: f64,
    tension_depth_mm: f64,
}

/// Remove the bar areas from the strips they sit in.
///
/// A bar on the boundary between two strips is split evenly between them.
/// A bar larger than its strip spills into the nearest neighbours (above
/// first), so no net area goes negative and the total deduction always
/// equals the steel area.
fn deduct_bar_areas(mut strips: Vec<Strip>, bars: &[Bar], length_mm: f64) -> Vec<Strip> {
    let n = strips.len();
    if n == 0 {
        return strips;
    }
    let step = length_mm / n as f64;

    for bar in bars {
        let position = bar.depth_mm / step;
        let nearest = position.round();
        let on_boundary = (position - nearest).abs() <= 1e-9 * position.max(1.0) && nearest >= 1.0 && nearest < n as f64;
        if on_boundary {
            let upper = nearest as usize - 1;
            spill(&mut strips, upper, 0.5 * bar.area_mm2);
            spill(&mut strips, upper + 1, 0.5 * bar.area_mm2);
        } else {
            spill(&mut strips, (position as usize).min(n - 1), bar.area_mm2);
        }
    }
    strips
}

/// Deduct `area_mm2` starting at strip `home`, then outward.
fn spill(strips: &mut [Strip], home: usize, area_mm2: f64) {
    let n = strips.len();
    let neighbours = (1..n)
        .flat_map(|d| [home.checked_sub(d), Some(home + d).filter(|&k| k < n)])
        .flatten();

    let mut remaining = area_mm2;
    for k in std::iter::once(home).chain(neighbours) {
        let taken = remaining.min(strips[k].area_mm2);
        strips[k].area_mm2 -= taken;
        remaining -= taken;
        if remaining <= 0.0 {
            break;
        }
    }
}

/// Build the nominal interaction diagram of `section` bent in `direction`.
pub fn interaction_diagram(
    section: &Section,
    direction: BendingDirection,
    config: &InteractionConfig,
) -> CalcResult<InteractionDiagram> {
    config.validate()?;

    let bars: Vec<Bar> = section
        .rebars()
        .iter()
        .map(|r| Bar {
            area_mm2: r.area_mm2,
            depth_mm: direction.depth_from_compression_face(r.depth_mm, section.length_mm()),
            steel: r.steel,
        })
        .collect();
    let strips = deduct_bar_areas(
        discretize(section, direction, config.fiber_count)?,
        &bars,
        section.length_mm(),
    );
    let geometry = SweepGeometry {
        strips,
        bars,
        centroid_mm: direction.depth_from_compression_face(section.centroid_mm(), section.length_mm()),
        tension_depth_mm: section.extreme_tension_depth_mm(direction),
    };
    let tension_steel = section
        .extreme_tension_bar(direction)
        .map(|r| r.steel)
        .ok_or_else(|| CalcError::computation("strain sweep", "section has no reinforcement"))?;

    let states = sweep_states(section, &tension_steel, geometry.tension_depth_mm, config)?;
    debug!(
        "interaction sweep '{}' ({}): {} fibers, {} states, d_t = {:.1} mm",
        section.label(),
        direction,
        geometry.strips.len(),
        states.len(),
        geometry.tension_depth_mm
    );

    let concrete = section.concrete();
    let points = states
        .iter()
        .enumerate()
        .map(|(index, &(state, control))| {
            let point = evaluate(concrete, &geometry, direction, state, control);
            trace!(
                "state {index}: {:?} eps_t = {:.5} P = {:.1} kN M = {:.1} kN·m",
                control,
                point.net_tensile_strain,
                point.axial_kn,
                point.moment_knm
            );
            if point.axial_kn.is_finite() && point.moment_knm.is_finite() {
                Ok(point)
            } else {
                Err(CalcError::computation_at(
                    "strain sweep",
                    index,
                    format!("non-finite capacity (P = {}, M = {})", point.axial_kn, point.moment_knm),
                ))
            }
        })
        .collect::<CalcResult<Vec<CapacityPoint>>>()?;

    check_monotonic(&points)?;

    let balanced_index = config.intermediate_points.div_ceil(2) + 1;
    let diagram = InteractionDiagram {
        direction,
        fiber_count: config.fiber_count,
        tension_yield_strain: tension_steel.yield_strain(),
        fc_mpa: concrete.fc_mpa,
        gross_area_mm2: section.gross_area_mm2(),
        balanced_index,
        points,
    };
    debug!(
        "diagram '{}': Po = {:.1} kN, Pb = {:.1} kN, Mb = {:.1} kN·m, To = {:.1} kN",
        section.label(),
        diagram.pure_compression().axial_kn,
        diagram.balanced().axial_kn,
        diagram.balanced().moment_knm,
        diagram.pure_tension().axial_kn
    );
    Ok(diagram)
}

/// Ordered strain states of the sweep.
fn sweep_states(
    section: &Section,
    tension_steel: &Steel,
    d_t: f64,
    config: &InteractionConfig,
) -> CalcResult<Vec<(StrainState, ControlKind)>> {
    let eps_c = section.concrete().controlling_strain();
    let eps_y = tension_steel.yield_strain();

    let min_rupture = section
        .rebars()
        .iter()
        .filter_map(|r| r.steel.rupture_strain)
        .reduce(f64::min);
    let max_yield = section
        .rebars()
        .iter()
        .map(|r| r.steel.yield_strain())
        .fold(eps_y, f64::max);

    let top = min_rupture.map_or(config.max_steel_strain, |r| config.max_steel_strain.min(RUPTURE_MARGIN * r));
    if top <= eps_y {
        return Err(CalcError::validation(
            "interaction.max_steel_strain",
            top.to_string(),
            format!("Tension sweep limit (after the rupture cap) must exceed the yield strain {eps_y:.5}"),
        ));
    }

    let tension_strain = min_rupture.map_or(2.0 * max_yield, |r| (2.0 * max_yield).min(0.5 * (max_yield + r)));
    if tension_strain <= max_yield {
        return Err(CalcError::computation(
            "strain sweep",
            format!("no uniform tensile strain yields every bar (εy = {max_yield:.5}) below rupture"),
        ));
    }

    let k = config.intermediate_points;
    let n_c = k.div_ceil(2);
    let n_t = k - n_c;

    let mut states = Vec::with_capacity(k + 3);
    states.push((StrainState::Uniform { strain: -eps_c }, ControlKind::PureCompression));
    states.extend((1..=n_c).map(|i| {
        let eps_t = -eps_c + (eps_y + eps_c) * i as f64 / (n_c + 1) as f64;
        (StrainState::through(eps_c, d_t, eps_t), ControlKind::CompressionControlled)
    }));
    states.push((StrainState::through(eps_c, d_t, eps_y), ControlKind::Balanced));
    states.extend((1..=n_t).map(|i| {
        let eps_t = eps_y + (top - eps_y) * i as f64 / n_t as f64;
        let control = if eps_t >= eps_y + TENSION_CONTROL_INCREMENT {
            ControlKind::TensionControlled
        } else {
            ControlKind::Transition
        };
        (StrainState::through(eps_c, d_t, eps_t), control)
    }));
    states.push((StrainState::Uniform { strain: tension_strain }, ControlKind::PureTension));
    Ok(states)
}

/// Integrate one strain state. Pure: no state is carried between calls.
fn evaluate(
    concrete: &Concrete,
    geometry: &SweepGeometry,
    direction: BendingDirection,
    state: StrainState,
    control: ControlKind,
) -> CapacityPoint {
    let centroid = geometry.centroid_mm;

    let (concrete_n, concrete_nmm) = geometry
        .strips
        .iter()
        .map(|strip| Fiber::at(strip, &state))
        .fold((0.0, 0.0), |(force, moment), fiber| {
            let f = concrete.stress(fiber.strain) * fiber.area_mm2;
            (force + f, moment + f * (centroid - fiber.depth_mm))
        });

    let (steel_n, steel_nmm) = geometry.bars.iter().fold((0.0, 0.0), |(force, moment), bar| {
        let f = -bar.steel.stress(state.strain_at(bar.depth_mm)) * bar.area_mm2;
        (force + f, moment + f * (centroid - bar.depth_mm))
    });

    let moment = NewtonMillimeters(concrete_nmm + steel_nmm) * direction.moment_sign();

    CapacityPoint {
        axial_kn: Kilonewtons::from(Newtons(concrete_n + steel_n)).0,
        moment_knm: KilonewtonMeters::from(moment).0,
        strain_state: state,
        control,
        net_tensile_strain: state.strain_at(geometry.tension_depth_mm),
        concrete_kn: Kilonewtons::from(Newtons(concrete_n)).0,
        steel_kn: Kilonewtons::from(Newtons(steel_n)).0,
    }
}

/// Axial load must not increase along the sweep beyond round-off.
fn check_monotonic(points: &[CapacityPoint]) -> CalcResult<()> {
    let scale = points.iter().map(|p| p.axial_kn.abs()).fold(1.0, f64::max);
    let tolerance = 1e-9 * scale;
    match points
        .windows(2)
        .position(|pair| pair[1].axial_kn > pair[0].axial_kn + tolerance)
    {
        Some(i) => Err(CalcError::computation_at(
            "monotonicity check",
            i + 1,
            format!(
                "axial capacity rises from {:.3} kN to {:.3} kN",
                points[i].axial_kn,
                points[i + 1].axial_kn
            ),
        )),
        None => Ok(()),
    }
}

/// Largest relative change of (P, M) between `fiber_count` and twice as
/// many fibers, normalized by the largest |P| and |M| of the coarser
/// diagram.
pub fn discretization_error(
    section: &Section,
    direction: BendingDirection,
    config: &InteractionConfig,
) -> CalcResult<f64> {
    let base = interaction_diagram(section, direction, config)?;
    let refined = interaction_diagram(
        section,
        direction,
        &config.with_fiber_count(config.fiber_count.saturating_mul(2)),
    )?;

    let scale_p = base.points.iter().map(|p| p.axial_kn.abs()).fold(f64::MIN_POSITIVE, f64::max);
    let scale_m = base.points.iter().map(|p| p.moment_knm.abs()).fold(f64::MIN_POSITIVE, f64::max);

    let error = base
        .points
        .iter()
        .zip(&refined.points)
        .map(|(a, b)| {
            let dp = (a.axial_kn - b.axial_kn).abs() / scale_p;
            let dm = (a.moment_knm - b.moment_knm).abs() / scale_m;
            dp.max(dm)
        })
        .fold(0.0, f64::max);

    if error > config.convergence_tolerance {
        warn!(
            "'{}': {} fibers not converged, relative change {:.4} exceeds {:.4}",
            section.label(),
            config.fiber_count,
            error,
            config.convergence_tolerance
        );
    } else {
        debug!("'{}': discretization error {:.5} at {} fibers", section.label(), error, config.fiber_count);
    }
    Ok(error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::ConcreteLaw;
    use crate::section::SectionBuilder;

    fn wall() -> Section {
        SectionBuilder::new(200.0, 1000.0, Concrete::new(28.0))
            .layer(50.0, 4, 16.0, Steel::grade_420())
            .layer(950.0, 4, 16.0, Steel::grade_420())
            .build()
            .unwrap()
    }

    fn diagram(section: &Section, direction: BendingDirection) -> InteractionDiagram {
        interaction_diagram(section, direction, &InteractionConfig::default()).unwrap()
    }

    #[test]
    fn test_point_count_and_order() {
        let d = diagram(&wall(), BendingDirection::Positive);
        assert_eq!(d.points().len(), 43);
        assert_eq!(d.points()[0].control, ControlKind::PureCompression);
        assert_eq!(d.points()[21].control, ControlKind::Balanced);
        assert_eq!(d.points()[42].control, ControlKind::PureTension);
        assert!(d.points()[1..21]
            .iter()
            .all(|p| p.control == ControlKind::CompressionControlled));
        assert_eq!(d.points()[41].control, ControlKind::TensionControlled);
    }

    #[test]
    fn test_odd_intermediate_count() {
        let config = InteractionConfig {
            intermediate_points: 5,
            ..Default::default()
        };
        let d = interaction_diagram(&wall(), BendingDirection::Positive, &config).unwrap();
        assert_eq!(d.points().len(), 8);
        // n_c = 3
        assert_eq!(d.balanced().control, ControlKind::Balanced);
        assert_eq!(d.points()[4].control, ControlKind::Balanced);
    }

    #[test]
    fn test_no_intermediate_points() {
        let config = InteractionConfig {
            intermediate_points: 0,
            ..Default::default()
        };
        let d = interaction_diagram(&wall(), BendingDirection::Positive, &config).unwrap();
        let kinds: Vec<ControlKind> = d.points().iter().map(|p| p.control).collect();
        assert_eq!(
            kinds,
            vec![ControlKind::PureCompression, ControlKind::Balanced, ControlKind::PureTension]
        );
    }

    #[test]
    fn test_pure_compression_and_tension() {
        let s = wall();
        let d = diagram(&s, BendingDirection::Positive);
        let as_ = s.steel_area_mm2();
        let po = (0.85 * 28.0 * (s.gross_area_mm2() - as_) + 420.0 * as_) / 1000.0;
        let to = -420.0 * as_ / 1000.0;

        let summary = d.summary();
        assert!((summary.pure_compression_kn - po).abs() < 1e-6 * po);
        assert!((summary.pure_tension_kn - to).abs() < 1e-6 * to.abs());
        assert!(d.pure_compression().moment_knm.abs() < 1e-6);
        assert!(d.pure_tension().moment_knm.abs() < 1e-6);
    }

    #[test]
    fn test_balanced_strain() {
        let d = diagram(&wall(), BendingDirection::Positive);
        let b = d.balanced();
        assert!((b.net_tensile_strain - 0.0021).abs() < 1e-12);
        let c = b.strain_state.neutral_axis_depth().unwrap();
        assert!((c - 950.0 * 0.003 / 0.0051).abs() < 1e-9);
        assert!(b.moment_knm > 0.0);
    }

    #[test]
    fn test_axial_non_increasing() {
        for law in [
            ConcreteLaw::default(),
            ConcreteLaw::parabola_plateau(),
            ConcreteLaw::ParabolaLinearDecay,
        ] {
            let s = SectionBuilder::new(250.0, 2000.0, Concrete::new(35.0).with_law(law))
                .layer(60.0, 6, 20.0, Steel::grade_420())
                .distributed(300.0, 1700.0, 6, 2, 10.0, Steel::grade_420())
                .layer(1940.0, 2, 16.0, Steel::grade_420())
                .build()
                .unwrap();
            for direction in [BendingDirection::Positive, BendingDirection::Negative] {
                let d = diagram(&s, direction);
                assert!(d.points().windows(2).all(|w| w[1].axial_kn <= w[0].axial_kn));
            }
        }
    }

    #[test]
    fn test_negative_direction_mirrors_symmetric_section() {
        let s = wall();
        let pos = diagram(&s, BendingDirection::Positive);
        let neg = diagram(&s, BendingDirection::Negative);
        for (p, n) in pos.points().iter().zip(neg.points()) {
            assert!((p.axial_kn - n.axial_kn).abs() < 1e-6);
            assert!((p.moment_knm + n.moment_knm).abs() < 1e-6);
        }
        assert!(neg.balanced().moment_knm < 0.0);
    }

    #[test]
    fn test_force_breakdown() {
        let d = diagram(&wall(), BendingDirection::Positive);
        for p in d.points() {
            assert!((p.concrete_kn + p.steel_kn - p.axial_kn).abs() < 1e-9);
            assert!(p.concrete_kn >= 0.0);
        }
        assert_eq!(d.pure_tension().concrete_kn, 0.0);
    }

    #[test]
    fn test_rupture_caps_tension_sweep() {
        let steel = Steel::grade_420().with_rupture_strain(0.02);
        let s = SectionBuilder::new(200.0, 1000.0, Concrete::new(28.0))
            .layer(50.0, 4, 16.0, steel)
            .layer(950.0, 4, 16.0, steel)
            .build()
            .unwrap();
        let d = diagram(&s, BendingDirection::Positive);
        let last_linear = d.points()[d.points().len() - 2];
        assert!((last_linear.net_tensile_strain - 0.99 * 0.02).abs() < 1e-12);
        // every bar yields, none ruptures
        let to = -420.0 * s.steel_area_mm2() / 1000.0;
        assert!((d.pure_tension().axial_kn - to).abs() < 1e-6);
    }

    #[test]
    fn test_sweep_limit_below_yield_rejected() {
        let config = InteractionConfig {
            max_steel_strain: 0.001,
            ..Default::default()
        };
        let err = interaction_diagram(&wall(), BendingDirection::Positive, &config).unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_zero_fibers_is_computation_error() {
        let config = InteractionConfig::default().with_fiber_count(0);
        let err = interaction_diagram(&wall(), BendingDirection::Positive, &config).unwrap_err();
        assert_eq!(err.error_code(), "COMPUTATION_ERROR");
    }

    #[test]
    fn test_bar_area_deduction() {
        let strips = vec![
            Strip {
                area_mm2: 1000.0,
                depth_mm: 5.0,
            },
            Strip {
                area_mm2: 1000.0,
                depth_mm: 15.0,
            },
            Strip {
                area_mm2: 1000.0,
                depth_mm: 25.0,
            },
        ];
        let bar = |area_mm2, depth_mm| Bar {
            area_mm2,
            depth_mm,
            steel: Steel::grade_420(),
        };
        let net = deduct_bar_areas(strips.clone(), &[bar(400.0, 14.0)], 30.0);
        assert_eq!(net[1].area_mm2, 600.0);
        assert_eq!(net[0].area_mm2, 1000.0);

        // 1600 mm² in the middle strip spills into the one above it
        let net = deduct_bar_areas(strips.clone(), &[bar(1600.0, 14.0)], 30.0);
        assert_eq!(net[1].area_mm2, 0.0);
        assert_eq!(net[0].area_mm2, 400.0);
        assert_eq!(net[2].area_mm2, 1000.0);

        // a bar on the last edge stays in the last strip
        let net = deduct_bar_areas(strips.clone(), &[bar(100.0, 30.0)], 30.0);
        assert_eq!(net[2].area_mm2, 900.0);

        // a bar on an interior boundary is shared by both strips
        let net = deduct_bar_areas(strips, &[bar(300.0, 20.0)], 30.0);
        assert_eq!(net[0].area_mm2, 1000.0);
        assert_eq!(net[1].area_mm2, 850.0);
        assert_eq!(net[2].area_mm2, 850.0);
    }

    #[test]
    fn test_bars_on_strip_boundaries_keep_symmetry() {
        // 50 strips of 20 mm put both layers exactly on strip edges
        let s = SectionBuilder::new(200.0, 1000.0, Concrete::new(28.0))
            .layer(40.0, 4, 16.0, Steel::grade_420())
            .layer(960.0, 4, 16.0, Steel::grade_420())
            .build()
            .unwrap();
        let config = InteractionConfig::default().with_fiber_count(50);
        let pos = interaction_diagram(&s, BendingDirection::Positive, &config).unwrap();
        let neg = interaction_diagram(&s, BendingDirection::Negative, &config).unwrap();

        assert!(pos.pure_compression().moment_knm.abs() < 1e-6);
        assert!(pos.pure_tension().moment_knm.abs() < 1e-6);
        for (p, n) in pos.points().iter().zip(neg.points()) {
            assert!((p.moment_knm + n.moment_knm).abs() < 1e-6);
        }
    }

    #[test]
    fn test_fine_block_sweep_is_monotonic() {
        // strips thinner than the bar group
        let d = interaction_diagram(&wall(), BendingDirection::Positive, &InteractionConfig::fine()).unwrap();
        assert!(d.points().windows(2).all(|w| w[1].axial_kn <= w[0].axial_kn));
        let as_ = wall().steel_area_mm2();
        let po = (0.85 * 28.0 * (200_000.0 - as_) + 420.0 * as_) / 1000.0;
        assert!((d.pure_compression().axial_kn - po).abs() < 1e-6 * po);
    }

    #[test]
    fn test_monotonic_check_reports_index() {
        let d = diagram(&wall(), BendingDirection::Positive);
        let mut points = d.points().to_vec();
        points[5].axial_kn = points[3].axial_kn + 100.0;
        match check_monotonic(&points) {
            Err(CalcError::Computation { index, .. }) => assert_eq!(index, Some(5)),
            other => panic!("expected computation error, got {other:?}"),
        }
    }

    #[test]
    fn test_summary_limits() {
        let s = wall();
        let summary = diagram(&s, BendingDirection::Positive).summary();
        assert!((summary.axial_limit_035_kn - 0.35 * 28.0 * 200.0).abs() < 1e-9);
        assert!((summary.axial_limit_010_kn - 0.10 * 28.0 * 200.0).abs() < 1e-9);
        assert!(summary.max_moment.moment_knm >= summary.balanced.moment_knm);
    }

    #[test]
    fn test_reduced_envelope() {
        let d = diagram(&wall(), BendingDirection::Positive);
        let design = d.reduced(&StrengthReduction::aci()).unwrap();
        assert_eq!(design.len(), d.points().len());
        let po = d.pure_compression().axial_kn;
        assert!((design[0].phi_axial_kn - 0.80 * 0.65 * po).abs() < 1e-9);
        assert_eq!(design[0].phi, 0.65);
        assert_eq!(design.last().unwrap().phi, 0.90);

        let nominal = d.reduced(&StrengthReduction::Nominal).unwrap();
        assert_eq!(nominal[10].phi_moment_knm, d.points()[10].moment_knm);
    }

    #[test]
    fn test_curve_matches_points() {
        let d = diagram(&wall(), BendingDirection::Positive);
        let curve = d.curve();
        assert_eq!(curve.len(), d.points().len());
        assert_eq!(curve[21], (d.balanced().axial_kn, d.balanced().moment_knm));
    }
}
