//! Determine figure and bibliography dependencies for a LaTeX/pandoc
//! document project. Reads the document on stdin and prints Make-style
//! dependency lines.

use std::io;

use clap::Parser;

use kinemetry::deps::scan_dependencies;
use kinemetry::Result;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// The target dependent file we are searching for dependencies
    dep: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let stdin = io::stdin();
    for line in scan_dependencies(&args.dep, stdin.lock())? {
        println!("{line}");
    }
    Ok(())
}
