//! Aligning behavioral responses with each participant's joint stream.
//!
//! The response log covers every participant in one file; the joint
//! recordings are one file per participant. Responses arrive grouped by
//! participant, so the pass reloads the joint stream only when the
//! participant id changes, then aggregates head and torso movement over
//! each response's window.

use std::path::Path;

use tracing::{info, warn};

use crate::config::{StudyConfig, WindowConfig};
use crate::core::displacement::JointColumns;
use crate::core::joint::{Joint, MICROS_COLUMN, MILLIS_COLUMN};
use crate::core::timestamp::EpochTimestamp;
use crate::core::window::{window_mean_displacements, AlignedSample, ResponseWindow};
use crate::data::csv::{format_float, Table};
use crate::data::discovery;
use crate::error::{Error, Result};

pub const RESPONSE_PARTICIPANT: &str = "participant";
pub const RESPONSE_UTC_TIME: &str = "utcTime";
pub const RESPONSE_REACTION_TIME: &str = "reactionTime";
pub const RESPONSE_CORRECT: &str = "correct";

/// Numeric coding of the `correct` response label.
pub fn correct_to_value(label: &str) -> Option<f64> {
    match label.trim() {
        "yes" => Some(1.0),
        "no" => Some(0.0),
        _ => None,
    }
}

#[derive(Debug, Default)]
pub struct AlignReport {
    pub responses: usize,
    pub aligned: usize,
    pub dropped: usize,
    pub participants_skipped: usize,
}

/// Attach mean head/torso displacement aggregates to every response row,
/// then drop the rows whose window produced no aggregate.
pub fn align_responses(
    responses: &mut Table,
    study: &StudyConfig,
    window_cfg: &WindowConfig,
) -> Result<AlignReport> {
    let participant_col = responses.require_column(RESPONSE_PARTICIPANT)?;
    let utc_col = responses.require_column(RESPONSE_UTC_TIME)?;
    let reaction_col = responses.require_column(RESPONSE_REACTION_TIME)?;

    let data_dir = Path::new(&study.data_dir);
    let mut report = AlignReport {
        responses: responses.len(),
        ..AlignReport::default()
    };

    let mut current_participant: Option<u32> = None;
    let mut session: Option<Vec<AlignedSample>> = None;

    let mut head_values = Vec::with_capacity(responses.len());
    let mut torso_values = Vec::with_capacity(responses.len());

    for row in 0..responses.len() {
        let participant = responses.i64_at(row, participant_col).map(|id| id as u32);

        if participant != current_participant {
            current_participant = participant;
            session = match participant {
                Some(id) => {
                    info!(participant = id, "processing participant");
                    match load_session(data_dir, id, &study.study_name) {
                        Ok(samples) => Some(samples),
                        Err(err) => {
                            warn!(participant = id, %err, "skipping participant");
                            report.participants_skipped += 1;
                            None
                        }
                    }
                }
                None => {
                    warn!(row, "response row without participant id");
                    None
                }
            };
        }

        let aggregate = match (&session, responses.f64_at(row, utc_col)) {
            (Some(samples), Some(response_time)) => {
                let reaction_time = responses.f64_at(row, reaction_col);
                let window =
                    ResponseWindow::for_response(response_time, reaction_time, window_cfg);
                let means = window_mean_displacements(samples, &window);
                if means.is_none() {
                    warn!(
                        participant = ?current_participant,
                        response_time,
                        "no joint samples in response window"
                    );
                }
                means
            }
            _ => None,
        };

        match aggregate {
            Some((head, torso)) => {
                report.aligned += 1;
                head_values.push(format_float(Some(head)));
                torso_values.push(format_float(Some(torso)));
            }
            None => {
                head_values.push(String::new());
                torso_values.push(String::new());
            }
        }
    }

    responses.push_column(&Joint::Head.displacement_column(), head_values);
    responses.push_column(&Joint::Torso.displacement_column(), torso_values);

    // Terminal drop: responses whose window produced nothing carry no
    // information for the downstream figures and models.
    let head_col = responses.require_column(&Joint::Head.displacement_column())?;
    let torso_col = responses.require_column(&Joint::Torso.displacement_column())?;
    let before = responses.len();
    responses.retain_rows(|row| {
        !row[head_col].is_empty() && !row[torso_col].is_empty()
    });
    report.dropped = before - responses.len();

    Ok(report)
}

/// Load one participant's joint recording and reduce it to the timestamped
/// head/torso trace the aligner consumes.
pub fn load_session(
    data_dir: &Path,
    participant: u32,
    study_name: &str,
) -> Result<Vec<AlignedSample>> {
    let path = discovery::participant_session(data_dir, participant, study_name)?;
    info!(path = %path.display(), "kinect joint data file");
    let table = Table::read(&path)?;

    let time_col = table
        .column(MICROS_COLUMN)
        .or_else(|| table.column(MILLIS_COLUMN))
        .ok_or_else(|| Error::MissingColumn {
            path: path.clone(),
            column: MICROS_COLUMN.to_string(),
        })?;
    let joints = JointColumns::resolve(&table)?;

    let mut samples = Vec::with_capacity(table.len());
    for row in 0..table.len() {
        let raw = match table.i64_at(row, time_col) {
            Some(v) => v,
            None => continue,
        };
        let head = joints.position(&table, row, Joint::Head);
        let torso = joints.position(&table, row, Joint::Torso);
        if let (Some(head), Some(torso)) = (head, torso) {
            samples.push(AlignedSample {
                t_secs: EpochTimestamp::from_raw(raw).as_secs_f64(),
                head,
                torso,
            });
        }
    }
    Ok(samples)
}
