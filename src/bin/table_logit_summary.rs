//! Table summarizing a logistic model fit of torso joint displacement
//! vs. subject response (correct or incorrect).

use std::path::Path;

use clap::Parser;
use tracing::{debug, warn};

use kinemetry::core::align::{correct_to_value, RESPONSE_CORRECT};
use kinemetry::core::joint::Joint;
use kinemetry::core::logit::fit_logit;
use kinemetry::data::csv::Table;
use kinemetry::tables::{logit_summary_fragment, write_fragment};
use kinemetry::Result;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// The cleaned response displacement data file to open and process
    data: String,

    /// Name of output table
    #[arg(long, default_value = "table-joint-logit-model-summary.tex")]
    output: String,

    /// Enable debug output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    kinemetry::init_tracing(args.verbose);

    let mut table = Table::read(Path::new(&args.data))?;
    let dropped = table.drop_rows_with_missing();
    debug!(dropped, remaining = table.len(), "dropped rows with missing values");

    let torso_col = table.require_column(&Joint::Torso.displacement_column())?;
    let correct_col = table.require_column(RESPONSE_CORRECT)?;

    let mut x = Vec::with_capacity(table.len());
    let mut y = Vec::with_capacity(table.len());
    for row in 0..table.len() {
        if let (Some(torso), Some(correct)) = (
            table.f64_at(row, torso_col),
            correct_to_value(table.value(row, correct_col)),
        ) {
            x.push(torso);
            y.push(correct);
        }
    }

    let fit = fit_logit(&x, &y)?;
    if !fit.converged {
        warn!(iterations = fit.iterations, "logistic fit did not converge");
    }

    let fragment = logit_summary_fragment(&fit, "correctValue", "jointTorsoDisplacement");
    write_fragment(Path::new(&args.output), &fragment)
}
