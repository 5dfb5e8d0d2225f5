//! # Wallcap CLI
//!
//! Interaction diagrams, shear strength and demand checks for reinforced
//! concrete walls described in TOML or JSON input files.
//!
//! ```text
//! wallcap demo > wall.toml
//! wallcap diagram wall.toml --reduced
//! wallcap check wall.toml --axial 1200 --moment 150 --shear 200
//! ```
//!
//! Set `RUST_LOG=debug` for sweep and builder diagnostics.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

mod commands;

#[derive(Parser)]
#[command(name = "wallcap")]
#[command(version, about = "Wallcap - RC wall and column section capacity")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the nominal P-M interaction diagram.
    Diagram {
        /// Path to the input file (.toml or .json).
        path: PathBuf,

        /// Put the bottom face in compression.
        #[arg(long)]
        negative: bool,

        /// Also print the strength-reduced design envelope.
        #[arg(long)]
        reduced: bool,

        /// Override the fiber count from the input file.
        #[arg(long)]
        fibers: Option<usize>,

        /// Report the change in the diagram when the fiber count is doubled.
        #[arg(long)]
        convergence: bool,

        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Compute the shear strength under an axial load.
    Shear {
        /// Path to the input file (.toml or .json).
        path: PathBuf,

        /// Axial load Nu in kN, compression positive.
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        axial: f64,

        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Check factored demands against the design capacity.
    Check {
        /// Path to the input file (.toml or .json).
        path: PathBuf,

        /// Factored axial load Pu in kN, compression positive.
        #[arg(long, allow_negative_numbers = true)]
        axial: f64,

        /// Factored moment Mu in kN·m.
        #[arg(long, allow_negative_numbers = true)]
        moment: f64,

        /// Factored shear Vu in kN.
        #[arg(long)]
        shear: Option<f64>,

        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Print the sampled stress-strain curves of the section materials.
    Materials {
        /// Path to the input file (.toml or .json).
        path: PathBuf,

        /// Samples per curve.
        #[arg(long, default_value_t = 21)]
        samples: usize,

        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Print a sample input file.
    Demo {
        #[arg(long, value_enum, default_value_t = DemoFormat::Toml)]
        format: DemoFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DemoFormat {
    Toml,
    Json,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Diagram {
            path,
            negative,
            reduced,
            fibers,
            convergence,
            json,
        } => commands::diagram(
            &path,
            &commands::DiagramOptions {
                negative,
                reduced,
                fibers,
                convergence,
                json,
            },
        ),
        Commands::Shear { path, axial, json } => commands::shear(&path, axial, json),
        Commands::Check {
            path,
            axial,
            moment,
            shear,
            json,
        } => commands::check(&path, axial, moment, shear, json),
        Commands::Materials { path, samples, json } => commands::materials(&path, samples, json),
        Commands::Demo { format } => commands::demo(matches!(format, DemoFormat::Json)),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        if let Ok(json) = serde_json::to_string_pretty(&e) {
            eprintln!();
            eprintln!("Error JSON:");
            eprintln!("{json}");
        }
        std::process::exit(if e.is_input_error() { 2 } else { 1 });
    }
}
