//! dcdc - DC-DC Converter Designer
//!
//! Sizes a Buck or Boost converter and its inductor core from a design file.
//!
//! # Usage
//!
//! ```bash
//! dcdc designs/buck_pc40.dcd
//! dcdc designs/buck_pc40.dcd --format csv --cycles 5 > waveform.csv
//! RUST_LOG=dcdc_core=debug dcdc designs/boost_12_24.dcd --format json
//! ```

use std::io;
use std::path::PathBuf;

use clap::Parser;
use dcdc_core::{
    design::{validate_design, Design},
    dsl,
    error::Result,
    report::{write_report, Format},
    CoreTable,
};

/// DC-DC converter and inductor core designer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the design file (.dcd)
    #[arg(value_name = "DESIGN_FILE", required_unless_present = "list_cores")]
    design_file: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Number of simulated switching periods (overrides `.sim cycles`)
    #[arg(long)]
    cycles: Option<usize>,

    /// Number of waveform samples (overrides `.sim samples`)
    #[arg(long)]
    samples: Option<usize>,

    /// Saturation safety margin as a fraction of Bsat (overrides `.margin`)
    #[arg(long)]
    margin: Option<f64>,

    /// List the built-in core materials and exit
    #[arg(long)]
    list_cores: bool,
}

fn list_cores() {
    let table = CoreTable::builtin();
    println!("{:<10} {:<24} {:>10} {:>8} {:>8}", "NAME", "LABEL", "AL nH/N²", "Bsat T", "Ae mm²");
    for name in table.names() {
        if let Some(entry) = table.get(name) {
            let m = entry.material;
            println!(
                "{:<10} {:<24} {:>10} {:>8} {:>8}",
                name, entry.label, m.al, m.b_sat, m.effective_area
            );
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if args.list_cores {
        list_cores();
        return Ok(());
    }

    let Some(path) = args.design_file.as_deref() else {
        return Ok(());
    };

    // Parse the design file
    let ast = dsl::parse_file(path)?;

    // Build the design, applying command-line overrides
    let mut design = Design::from_ast(ast)?;
    if let Some(cycles) = args.cycles {
        design.config = design.config.with_cycles(cycles);
    }
    if let Some(samples) = args.samples {
        design.config = design.config.with_samples(samples);
    }
    if let Some(margin) = args.margin {
        design.config = design.config.with_safety_margin(margin);
    }

    // Validate
    validate_design(&design)?;

    tracing::info!(path = %path.display(), core = %design.core_name, "evaluating design");
    let eval = design.evaluate()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, args.format, &design, &eval)?;

    Ok(())
}
