//! Subcommand implementations.

use std::path::Path;

use log::info;
use serde::Serialize;
use wallcap_core::calculations::{DesignPoint, DiagramSummary, FlexureCheck, ShearCheck};
use wallcap_core::input::{load_input, WallInput};
use wallcap_core::materials::MaterialModel;
use wallcap_core::prelude::*;

pub struct DiagramOptions {
    pub negative: bool,
    pub reduced: bool,
    pub fibers: Option<usize>,
    pub convergence: bool,
    pub json: bool,
}

#[derive(Serialize)]
struct DiagramReport<'a> {
    label: &'a str,
    diagram: &'a InteractionDiagram,
    summary: DiagramSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    design: Option<Vec<DesignPoint>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    discretization_error: Option<f64>,
}

#[derive(Serialize)]
struct CheckReport {
    direction: BendingDirection,
    flexure: FlexureCheck,
    #[serde(skip_serializing_if = "Option::is_none")]
    shear: Option<ShearReport>,
}

#[derive(Serialize)]
struct ShearReport {
    result: ShearResult,
    check: ShearCheck,
}

#[derive(Serialize)]
struct MaterialCurve {
    name: String,
    /// (strain, stress MPa)
    points: Vec<(f64, f64)>,
}

fn print_json<T: Serialize>(value: &T) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

fn status(passes: bool) -> &'static str {
    if passes {
        "OK"
    } else {
        "NG"
    }
}

fn print_header(input: &WallInput) {
    let section = &input.section;
    println!("═══════════════════════════════════════════════════════");
    println!("  {}", if section.label().is_empty() { "Section" } else { section.label() });
    println!("═══════════════════════════════════════════════════════");
    println!(
        "  {:.0} x {:.0} mm, {}",
        section.width_mm(),
        section.length_mm(),
        section.concrete().display_name()
    );
    println!(
        "  As = {:.0} mm² (ρ = {:.2}%), {} placements",
        section.steel_area_mm2(),
        100.0 * section.reinforcement_ratio(),
        section.rebars().len()
    );
    println!();
}

pub fn diagram(path: &Path, options: &DiagramOptions) -> CalcResult<()> {
    let input = load_input(path)?;
    let mut config = input.interaction;
    if let Some(fibers) = options.fibers {
        config = config.with_fiber_count(fibers);
    }
    let direction = if options.negative {
        BendingDirection::Negative
    } else {
        BendingDirection::Positive
    };
    info!("computing {} diagram for {}", direction, path.display());

    let diagram = interaction_diagram(&input.section, direction, &config)?;
    let design = if options.reduced {
        Some(diagram.reduced(&config.reduction)?)
    } else {
        None
    };
    let error = if options.convergence {
        Some(discretization_error(&input.section, direction, &config)?)
    } else {
        None
    };

    if options.json {
        return print_json(&DiagramReport {
            label: input.section.label(),
            diagram: &diagram,
            summary: diagram.summary(),
            design,
            discretization_error: error,
        });
    }

    print_header(&input);
    println!("  Bending: {}, {} fibers", direction, diagram.fiber_count());
    println!();
    println!("   #  {:<24} {:>11} {:>11} {:>10}", "control", "P (kN)", "M (kN·m)", "εt");
    for (i, point) in diagram.points().iter().enumerate() {
        println!(
            "  {:>2}  {:<24} {:>11.1} {:>11.1} {:>10.5}",
            i,
            point.control.display_name(),
            point.axial_kn,
            point.moment_knm,
            point.net_tensile_strain
        );
    }

    let summary = diagram.summary();
    println!();
    println!("  Po       = {:>10.1} kN", summary.pure_compression_kn);
    println!("  To       = {:>10.1} kN", summary.pure_tension_kn);
    println!(
        "  Balanced = {:>10.1} kN, {:.1} kN·m",
        summary.balanced.axial_kn, summary.balanced.moment_knm
    );
    println!(
        "  Max M    = {:>10.1} kN·m at {:.1} kN",
        summary.max_moment.moment_knm, summary.max_moment.axial_kn
    );
    println!("  0.35f'cAg = {:.1} kN, 0.10f'cAg = {:.1} kN", summary.axial_limit_035_kn, summary.axial_limit_010_kn);

    if let Some(design) = &design {
        println!();
        println!("  Design envelope");
        println!("   #  {:>6} {:>11} {:>11}", "φ", "φPn (kN)", "φMn (kN·m)");
        for point in design {
            println!(
                "  {:>2}  {:>6.3} {:>11.1} {:>11.1}",
                point.index, point.phi, point.phi_axial_kn, point.phi_moment_knm
            );
        }
    }

    if let Some(error) = error {
        println!();
        println!(
            "  Discretization error {:.3}% ({} vs {} fibers, tolerance {:.2}%)",
            100.0 * error,
            config.fiber_count,
            2 * config.fiber_count,
            100.0 * config.convergence_tolerance
        );
    }
    Ok(())
}

pub fn shear(path: &Path, axial_kn: f64, json: bool) -> CalcResult<()> {
    let input = load_input(path)?;
    let result = shear_capacity(&input.section, axial_kn, &input.transverse_or_none(), &input.shear)?;
    if json {
        return print_json(&result);
    }

    print_header(&input);
    print_shear(&result);
    Ok(())
}

fn print_shear(result: &ShearResult) {
    println!("  Shear ({}), Nu = {:.1} kN", result.method.display_name(), result.axial_load_kn);
    println!("  Vc     = {:>9.1} kN", result.concrete_kn);
    println!("  Vs     = {:>9.1} kN", result.steel_kn);
    println!("  Vn     = {:>9.1} kN", result.nominal_kn);
    println!("  Vn,max = {:>9.1} kN{}", result.upper_limit_kn, if result.is_capped() { " (governs)" } else { "" });
    println!("  φVn    = {:>9.1} kN (φ = {:.2})", result.governing_design_kn(), result.phi);
}

pub fn check(path: &Path, pu_kn: f64, mu_knm: f64, vu_kn: Option<f64>, json: bool) -> CalcResult<()> {
    let input = load_input(path)?;
    let direction = if mu_knm < 0.0 {
        BendingDirection::Negative
    } else {
        BendingDirection::Positive
    };
    let config = input.interaction;
    let diagram = interaction_diagram(&input.section, direction, &config)?;
    let flexure = check_axial_flexure(&diagram, &config.reduction, pu_kn, mu_knm)?;

    let shear = match vu_kn {
        Some(vu) => {
            let result = shear_capacity(&input.section, pu_kn, &input.transverse_or_none(), &input.shear)?;
            let check = check_shear(&result, vu);
            Some(ShearReport { result, check })
        }
        None => None,
    };

    if json {
        return print_json(&CheckReport {
            direction,
            flexure,
            shear,
        });
    }

    print_header(&input);
    println!("  Axial-flexure, {}", direction);
    println!("  Pu = {:.1} kN, Mu = {:.1} kN·m", flexure.pu_kn, flexure.mu_knm);
    println!(
        "  Capacity on the load ray: φPn = {:.1} kN, φMn = {:.1} kN·m",
        flexure.capacity_axial_kn, flexure.capacity_moment_knm
    );
    println!("  Unity = {:.3} {}", flexure.unity, status(flexure.passes()));

    let mut passes = flexure.passes();
    if let Some(report) = &shear {
        println!();
        print_shear(&report.result);
        println!("  Vu = {:.1} kN, unity = {:.3} {}", report.check.vu_kn, report.check.unity, status(report.check.passes()));
        passes &= report.check.passes();
    }

    println!();
    println!("═══════════════════════════════════════════════════════");
    println!("  RESULT: {}", if passes { "PASS" } else { "FAIL" });
    println!("═══════════════════════════════════════════════════════");
    Ok(())
}

pub fn materials(path: &Path, samples: usize, json: bool) -> CalcResult<()> {
    let input = load_input(path)?;
    let concrete = input.section.concrete();
    let mut curves = vec![MaterialCurve {
        name: concrete.display_name(),
        points: concrete.curve(0.0, -concrete.ultimate_strain, samples),
    }];

    let mut steels: Vec<Steel> = Vec::new();
    for rebar in input.section.rebars() {
        if !steels.contains(&rebar.steel) {
            steels.push(rebar.steel);
        }
    }
    if let Some(ties) = input.transverse {
        if !steels.contains(&ties.steel) {
            steels.push(ties.steel);
        }
    }
    for steel in steels {
        let limit = steel.rupture_strain.unwrap_or(input.interaction.max_steel_strain);
        curves.push(MaterialCurve {
            name: steel.display_name(),
            points: steel.curve(-limit, limit, samples),
        });
    }

    if json {
        return print_json(&curves);
    }

    print_header(&input);
    for curve in &curves {
        println!("  {}", curve.name);
        println!("  {:>10} {:>10}", "ε", "σ (MPa)");
        for (strain, stress) in &curve.points {
            println!("  {:>10.5} {:>10.2}", strain, stress);
        }
        println!();
    }
    Ok(())
}

pub fn demo(json: bool) -> CalcResult<()> {
    let input = WallInput::demo()?;
    if json {
        return print_json(&input);
    }
    let text = toml::to_string_pretty(&input).map_err(|e| CalcError::serialization(e.to_string()))?;
    print!("{text}");
    Ok(())
}
