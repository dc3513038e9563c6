//! Extract joint displacement aggregates for subject responses.
//!
//! For each response in the behavioral log, finds the participant's joint
//! recording, selects the samples between cue onset and the response, and
//! attaches the mean head/torso movement over that window.

use std::path::Path;

use clap::Parser;
use tracing::info;

use kinemetry::core::align::align_responses;
use kinemetry::data::csv::Table;
use kinemetry::{AppConfig, Result};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Name of input response data file
    #[arg(long, default_value = "task-switching-replication.csv")]
    input: String,

    /// Name of output data file
    #[arg(long, default_value = "response-joint-displacements.csv")]
    output: String,

    /// Directory holding the per-participant joint recordings
    /// (defaults to the configured data dir)
    #[arg(long)]
    data_dir: Option<String>,

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

    let mut study = cfg.study.clone();
    if let Some(dir) = args.data_dir {
        study.data_dir = dir;
    }

    let mut responses = Table::read(Path::new(&args.input))?;
    let report = align_responses(&mut responses, &study, &cfg.window)?;
    responses.write(Path::new(&args.output))?;

    info!(
        responses = report.responses,
        aligned = report.aligned,
        dropped = report.dropped,
        participants_skipped = report.participants_skipped,
        output = %args.output,
        "wrote response joint displacements"
    );
    Ok(())
}
