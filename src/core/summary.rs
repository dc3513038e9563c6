//! Per-participant session summaries.
//!
//! Raw session recordings are headerless CSVs in the canonical column
//! order. Each file reduces to one summary row: sample count, session
//! bounds, and head/torso movement reductions.

use std::path::Path;

use chrono_tz::Tz;
use tracing::{info, warn};

use crate::core::displacement::{pairwise_displacements, JointColumns};
use crate::core::joint::{canonical_header, Joint};
use crate::core::stats;
use crate::core::timestamp::{format_summary_date, EpochTimestamp};
use crate::data::csv::{format_float, Table};
use crate::data::discovery;
use crate::error::Result;

pub const SUBJECT_ID: &str = "subjectId";
pub const SAMPLES: &str = "samples";
pub const START_TIME: &str = "startTime";
pub const START_DATE: &str = "startDate";
pub const END_TIME: &str = "endTime";
pub const END_DATE: &str = "endDate";
pub const RATE_HEAD: &str = "rateHeadDisplacement";
pub const RATE_TORSO: &str = "rateTorsoDisplacement";

/// Reductions over one joint's displacement series.
#[derive(Debug, Clone, Copy, Default)]
pub struct JointReductions {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    /// Total displacement divided by session duration (mm/s).
    pub rate: Option<f64>,
}

impl JointReductions {
    fn from_series(series: &[f64], duration_secs: f64) -> Self {
        let total: f64 = series.iter().sum();
        let rate = if duration_secs > 0.0 && !series.is_empty() {
            Some(total / duration_secs)
        } else {
            None
        };
        Self {
            min: stats::min(series),
            max: stats::max(series),
            mean: stats::mean(series),
            rate,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParticipantSummary {
    pub subject_id: u32,
    pub samples: usize,
    /// Raw logged timestamp values, preserved in their original unit.
    pub start_raw: i64,
    pub end_raw: i64,
    pub start: EpochTimestamp,
    pub end: EpochTimestamp,
    pub head: JointReductions,
    pub torso: JointReductions,
}

/// Reduce one raw session recording to a summary row.
pub fn summarize_session(path: &Path, subject_id: u32) -> Result<ParticipantSummary> {
    let table = Table::read_headerless(path, canonical_header())?;
    let joints = JointColumns::resolve(&table)?;
    let time_col = 1; // canonical header: userId, timestamp, joints...

    let samples = table.len();
    let start_raw = table.i64_at(0, time_col).unwrap_or(0);
    let end_raw = table.i64_at(samples - 1, time_col).unwrap_or(start_raw);
    let start = EpochTimestamp::from_raw(start_raw);
    let end = EpochTimestamp::from_raw(end_raw);
    let duration_secs = end.as_secs_f64() - start.as_secs_f64();

    let mut heads = Vec::with_capacity(samples);
    let mut torsos = Vec::with_capacity(samples);
    for row in 0..samples {
        if let (Some(head), Some(torso)) = (
            joints.position(&table, row, Joint::Head),
            joints.position(&table, row, Joint::Torso),
        ) {
            heads.push(head);
            torsos.push(torso);
        }
    }

    Ok(ParticipantSummary {
        subject_id,
        samples,
        start_raw,
        end_raw,
        start,
        end,
        head: JointReductions::from_series(&pairwise_displacements(&heads), duration_secs),
        torso: JointReductions::from_series(&pairwise_displacements(&torsos), duration_secs),
    })
}

/// Summarize every session recording under `data_dir`, in filename order.
pub fn collect_summaries(data_dir: &Path) -> Result<Vec<ParticipantSummary>> {
    let mut summaries = Vec::new();
    for path in discovery::session_files(data_dir)? {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let subject_id = match discovery::parse_participant_id(&name) {
            Some(id) => id,
            None => {
                warn!(file = %name, "cannot parse participant id, skipping");
                continue;
            }
        };
        info!(file = %name, subject_id, "processing session recording");
        summaries.push(summarize_session(&path, subject_id)?);
    }
    Ok(summaries)
}

/// Tidy summary table, one row per participant, dates localized for display.
pub fn summaries_to_table(summaries: &[ParticipantSummary], tz: Tz) -> Table {
    let mut headers: Vec<String> = vec![
        SUBJECT_ID.to_string(),
        SAMPLES.to_string(),
        START_TIME.to_string(),
        START_DATE.to_string(),
        END_TIME.to_string(),
        END_DATE.to_string(),
    ];
    for joint in [Joint::Head, Joint::Torso] {
        let name = joint.name().trim_start_matches("joint");
        headers.push(format!("min{name}Displacement"));
        headers.push(format!("max{name}Displacement"));
        headers.push(format!("mean{name}Displacement"));
    }
    headers.push(RATE_HEAD.to_string());
    headers.push(RATE_TORSO.to_string());

    let mut table = Table::new(headers);
    for summary in summaries {
        let mut row = vec![
            summary.subject_id.to_string(),
            summary.samples.to_string(),
            summary.start_raw.to_string(),
            format_summary_date(&summary.start.to_zone(tz)),
            summary.end_raw.to_string(),
            format_summary_date(&summary.end.to_zone(tz)),
        ];
        for reductions in [&summary.head, &summary.torso] {
            row.push(format_float(reductions.min));
            row.push(format_float(reductions.max));
            row.push(format_float(reductions.mean));
        }
        row.push(format_float(summary.head.rate));
        row.push(format_float(summary.torso.rate));
        table.rows.push(row);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reductions_match_direct_computation() {
        let series = [1.0, 2.0, 3.0, 4.0, 5.0];
        let reductions = JointReductions::from_series(&series, 10.0);
        assert_eq!(reductions.min, Some(1.0));
        assert_eq!(reductions.max, Some(5.0));
        assert_eq!(reductions.mean, Some(3.0));
        assert_eq!(reductions.rate, Some(1.5));
    }

    #[test]
    fn empty_series_reduces_to_missing() {
        let reductions = JointReductions::from_series(&[], 10.0);
        assert_eq!(reductions.min, None);
        assert_eq!(reductions.max, None);
        assert_eq!(reductions.mean, None);
        assert_eq!(reductions.rate, None);
    }
}
