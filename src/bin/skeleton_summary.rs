//! Extract skeleton tracking summaries from the raw per-participant
//! session recordings into a single tidy data file.

use std::path::Path;

use clap::Parser;
use tracing::info;

use kinemetry::core::summary::{collect_summaries, summaries_to_table};
use kinemetry::core::timestamp::parse_timezone;
use kinemetry::{AppConfig, Result};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Directory holding the raw session recordings
    /// (defaults to the configured data dir)
    #[arg(long)]
    data_dir: Option<String>,

    /// Name of output data file
    #[arg(long, default_value = "stroop-replication.csv")]
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

    let data_dir = args.data_dir.unwrap_or_else(|| cfg.study.data_dir.clone());
    let tz = parse_timezone(&cfg.study.timezone)?;

    let summaries = collect_summaries(Path::new(&data_dir))?;
    let table = summaries_to_table(&summaries, tz);
    table.write(Path::new(&args.output))?;

    info!(
        participants = summaries.len(),
        output = %args.output,
        "wrote skeleton tracking summary"
    );
    Ok(())
}
