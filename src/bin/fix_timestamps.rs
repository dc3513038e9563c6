//! One time use tool: convert a recording's millisecond timestamps to the
//! microsecond resolution used by later sessions, rewriting the file in
//! place.

use std::path::Path;

use clap::Parser;

use kinemetry::data::migrate::fix_utc_timestamps;
use kinemetry::Result;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Name of data file to process
    input: String,

    /// Enable debug output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    kinemetry::init_tracing(args.verbose);

    fix_utc_timestamps(Path::new(&args.input))?;
    Ok(())
}
