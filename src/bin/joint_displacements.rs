//! Calculate joint displacements for kinect data. Original data files
//! contain the x,y,z position of 15 skeleton joints; this adds the
//! euclidean distance each joint moved between successive measurements.

use std::path::Path;

use clap::Parser;
use tracing::info;

use kinemetry::core::displacement::{augment_with_displacements, filter_to_default_user};
use kinemetry::data::csv::Table;
use kinemetry::{AppConfig, Result};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Name of input data file
    #[arg(long, default_value = "raw-kinect-joints.csv")]
    input: String,

    /// Name of output data file
    #[arg(long, default_value = "joint-displacements.csv")]
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

    info!(file = %args.input, "kinect joint data file");
    let mut table = Table::read(Path::new(&args.input))?;
    let samples = filter_to_default_user(&mut table, cfg.study.default_user_id)?;
    augment_with_displacements(&mut table)?;
    table.write(Path::new(&args.output))?;

    info!(samples, output = %args.output, "wrote joint displacements");
    Ok(())
}
