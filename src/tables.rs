//! Paper tables, written as LaTeX fragments for `\input`.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::core::logit::LogitFit;
use crate::core::summary;
use crate::core::timestamp::parse_summary_date;
use crate::data::csv::Table;
use crate::error::{Error, Result};

/// Displacement rates are recorded in mm/s; the table reports cm/s.
const RATE_TO_CM: f64 = 10.0;

fn fmt4(value: f64) -> String {
    format!("{value:.4}")
}

/// Participant overview table: id, session date, sample count, and head and
/// torso displacement rates in cm/s.
pub fn subject_summary_fragment(table: &Table) -> Result<String> {
    let id_col = table.require_column(summary::SUBJECT_ID)?;
    let samples_col = table.require_column(summary::SAMPLES)?;
    let date_col = table.require_column(summary::START_DATE)?;
    let head_col = table.require_column(summary::RATE_HEAD)?;
    let torso_col = table.require_column(summary::RATE_TORSO)?;

    let mut out = String::new();
    out.push_str("\\begin{table}\n");
    out.push_str("\\centering\n");
    out.push_str(
        "\\caption{Summary of experiment participants results.  Number of samples, \
         and the head and torso displacement rates (cm / sec) during experiment are shown.}\n",
    );
    out.push_str("\\label{table-subject-summary}\n");
    out.push_str("\\begin{tabular}{rlrrr}\n");
    out.push_str("\\toprule\n");
    out.push_str("part & date & samples & head & torso \\\\\n");
    out.push_str("\\midrule\n");

    for row in 0..table.len() {
        let date = parse_summary_date(table.value(row, date_col))
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| table.value(row, date_col).to_string());
        let head = table
            .f64_at(row, head_col)
            .map(|v| fmt4(v / RATE_TO_CM))
            .unwrap_or_default();
        let torso = table
            .f64_at(row, torso_col)
            .map(|v| fmt4(v / RATE_TO_CM))
            .unwrap_or_default();
        out.push_str(&format!(
            "{} & {} & {} & {} & {} \\\\\n",
            table.value(row, id_col),
            date,
            table.value(row, samples_col),
            head,
            torso,
        ));
    }

    out.push_str("\\bottomrule\n");
    out.push_str("\\end{tabular}\n");
    out.push_str("\\end{table}\n");
    Ok(out)
}

/// Logistic model summary in the usual two-block layout: model statistics,
/// then the coefficient table.
pub fn logit_summary_fragment(fit: &LogitFit, dep_name: &str, predictor_name: &str) -> String {
    let [z0, z1] = fit.z_values();
    let [p0, p1] = fit.p_values();
    let [(lo0, hi0), (lo1, hi1)] = fit.conf_int();

    let mut out = String::new();
    out.push_str("\\begin{table}\n");
    out.push_str("\\centering\n");
    out.push_str(
        "\\caption{Summary of Logistic Regression model fit of Torso joint \
         displacement vs. correct response.}\n",
    );
    out.push_str("\\label{table-joint-logit-model-summary}\n");
    out.push_str("\\begin{tabular}{lrlr}\n");
    out.push_str("\\toprule\n");
    out.push_str(&format!(
        "Dep. Variable: & {} & No. Observations: & {} \\\\\n",
        dep_name, fit.n_obs
    ));
    out.push_str(&format!(
        "Model: & Logit & Df Residuals: & {} \\\\\n",
        fit.n_obs.saturating_sub(2)
    ));
    out.push_str("Method: & MLE & Df Model: & 1 \\\\\n");
    out.push_str(&format!(
        "Pseudo R-squ.: & {} & Log-Likelihood: & {} \\\\\n",
        fmt4(fit.pseudo_r2()),
        fmt4(fit.llf)
    ));
    out.push_str(&format!(
        "LL-Null: & {} & LLR p-value: & {} \\\\\n",
        fmt4(fit.ll_null),
        fmt4(fit.llr_pvalue())
    ));
    out.push_str(&format!(
        "Converged: & {} & Iterations: & {} \\\\\n",
        if fit.converged { "True" } else { "False" },
        fit.iterations
    ));
    out.push_str("\\bottomrule\n");
    out.push_str("\\end{tabular}\n");

    out.push_str("\\begin{tabular}{lrrrrrr}\n");
    out.push_str("\\toprule\n");
    out.push_str(" & coef & std err & z & P$>|z|$ & [0.025 & 0.975] \\\\\n");
    out.push_str("\\midrule\n");
    out.push_str(&format!(
        "const & {} & {} & {} & {} & {} & {} \\\\\n",
        fmt4(fit.params[0]),
        fmt4(fit.std_err[0]),
        fmt4(z0),
        fmt4(p0),
        fmt4(lo0),
        fmt4(hi0),
    ));
    out.push_str(&format!(
        "{} & {} & {} & {} & {} & {} & {} \\\\\n",
        predictor_name,
        fmt4(fit.params[1]),
        fmt4(fit.std_err[1]),
        fmt4(z1),
        fmt4(p1),
        fmt4(lo1),
        fmt4(hi1),
    ));
    out.push_str("\\bottomrule\n");
    out.push_str("\\end{tabular}\n");
    out.push_str("\\end{table}\n");
    out
}

pub fn write_fragment(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|e| Error::io(path, e))?;
    info!(path = %path.display(), "saved table fragment");
    Ok(())
}
