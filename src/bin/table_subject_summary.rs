//! Table summarizing all participants run so far: session date, sample
//! count, and head/torso displacement rates.

use std::path::Path;

use clap::Parser;

use kinemetry::data::csv::Table;
use kinemetry::tables::{subject_summary_fragment, write_fragment};
use kinemetry::Result;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// The summary data file to open and process
    data: String,

    /// Name of output table
    #[arg(long, default_value = "table-subject-summary.tex")]
    output: String,

    /// Enable debug output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    kinemetry::init_tracing(args.verbose);

    let table = Table::read(Path::new(&args.data))?;
    let fragment = subject_summary_fragment(&table)?;
    write_fragment(Path::new(&args.output), &fragment)
}
