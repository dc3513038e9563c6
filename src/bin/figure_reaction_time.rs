//! Figure of torso joint displacements vs. the subject's reaction time,
//! with correct and incorrect responses styled differently.

use std::path::Path;

use clap::Parser;
use tracing::debug;

use kinemetry::data::csv::Table;
use kinemetry::figures::render_reaction_time_figure;
use kinemetry::{AppConfig, Result};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// The input data file to load and create the figure from
    data: String,

    /// Name of output figure
    #[arg(long, default_value = "figure-torso-reaction-time.png")]
    output: String,

    /// Path to config TOML
    #[arg(long, default_value = "config.toml")]
    config: String,

    /// Enable debug output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    kinemetry::init_tracing(args.verbose);
    let cfg = AppConfig::load_or_default(&args.config);

    let mut table = Table::read(Path::new(&args.data))?;
    // Trials without a response carry no reaction time; drop them here.
    let dropped = table.drop_rows_with_missing();
    debug!(dropped, remaining = table.len(), "dropped rows with missing values");

    render_reaction_time_figure(&table, Path::new(&args.output), &cfg.figures)
}
