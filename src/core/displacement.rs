//! Per-sample joint displacement derivation.
//!
//! For every tracked joint the displacement is the Euclidean distance
//! between the joint's position in two time-adjacent samples. The first
//! sample of a session has no predecessor and therefore no defined
//! displacement; it stays missing rather than zero.

use tracing::{debug, warn};

use crate::core::joint::{Joint, USER_ID_COLUMN};
use crate::core::position::Position3;
use crate::data::csv::{format_float, Table};
use crate::error::Result;

/// Resolved x/y/z column indices for every tracked joint.
pub struct JointColumns {
    cols: [[usize; 3]; Joint::COUNT],
}

impl JointColumns {
    pub fn resolve(table: &Table) -> Result<Self> {
        let mut cols = [[0usize; 3]; Joint::COUNT];
        for (slot, joint) in cols.iter_mut().zip(Joint::ALL) {
            *slot = [
                table.require_column(&joint.column_x())?,
                table.require_column(&joint.column_y())?,
                table.require_column(&joint.column_z())?,
            ];
        }
        Ok(Self { cols })
    }

    pub fn position(&self, table: &Table, row: usize, joint: Joint) -> Option<Position3> {
        let [cx, cy, cz] = self.cols[joint as usize];
        Some(Position3::new(
            table.f64_at(row, cx)?,
            table.f64_at(row, cy)?,
            table.f64_at(row, cz)?,
        ))
    }
}

/// Restrict a recording to a single tracked user.
///
/// Joint rows from several users interleave in one file, which would make
/// consecutive-sample displacements meaningless; the fallback policy is to
/// keep only rows tagged with the default user id. Returns the number of
/// retained samples.
pub fn filter_to_default_user(table: &mut Table, default_user: i64) -> Result<usize> {
    let col = table.require_column(USER_ID_COLUMN)?;

    let mut ids: Vec<i64> = Vec::new();
    for row in 0..table.len() {
        if let Some(id) = table.i64_at(row, col) {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
    }

    if ids.len() > 1 {
        warn!(
            path = %table.path.display(),
            user_ids = ?ids,
            "multiple user ids detected, keeping user {default_user} only"
        );
        table.retain_rows(|row| parse_user_id(&row[col]) == Some(default_user));
    }
    Ok(table.len())
}

fn parse_user_id(field: &str) -> Option<i64> {
    let field = field.trim();
    field
        .parse::<i64>()
        .ok()
        .or_else(|| field.parse::<f64>().ok().map(|v| v as i64))
}

/// Append a `<joint>Displacement` column for each of the 15 joints.
pub fn augment_with_displacements(table: &mut Table) -> Result<()> {
    let joints = JointColumns::resolve(table)?;
    let num_samples = table.len();

    let mut columns: Vec<Vec<String>> =
        (0..Joint::COUNT).map(|_| Vec::with_capacity(num_samples)).collect();

    for row in 0..num_samples {
        for (values, joint) in columns.iter_mut().zip(Joint::ALL) {
            let displacement = if row == 0 {
                None
            } else {
                match (
                    joints.position(table, row - 1, joint),
                    joints.position(table, row, joint),
                ) {
                    (Some(prev), Some(curr)) => Some(prev.distance_to(&curr)),
                    _ => None,
                }
            };
            values.push(format_float(displacement));
        }

        // Slow pass over large recordings; keep some progress visible.
        if row > 0 && row % 1000 == 0 {
            debug!(sample = row, total = num_samples, "computing joint displacements");
        }
    }

    for (joint, values) in Joint::ALL.iter().zip(columns) {
        table.push_column(&joint.displacement_column(), values);
    }
    Ok(())
}

/// Pairwise displacement series over a position trace: one value per
/// consecutive sample pair, so the series is one shorter than the trace.
pub fn pairwise_displacements(positions: &[Position3]) -> Vec<f64> {
    positions
        .windows(2)
        .map(|w| w[0].distance_to(&w[1]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::joint::canonical_header;

    /// Two-sample table with the head joint moving (0,0,0) -> (3,4,0) and
    /// every other coordinate fixed at zero.
    fn head_move_table() -> Table {
        let mut table = Table::new(canonical_header());
        let mut first = vec!["0".to_string(); table.headers.len()];
        first[0] = "1".to_string();
        first[1] = "1579287816000".to_string();
        let mut second = first.clone();
        second[1] = "1579287816033".to_string();
        second[2] = "3".to_string(); // jointHeadX
        second[3] = "4".to_string(); // jointHeadY
        table.rows.push(first);
        table.rows.push(second);
        table
    }

    #[test]
    fn head_displacement_is_euclidean() {
        let mut table = head_move_table();
        augment_with_displacements(&mut table).unwrap();

        let head = table.column("jointHeadDisplacement").unwrap();
        assert_eq!(table.f64_at(1, head), Some(5.0));

        let torso = table.column("jointTorsoDisplacement").unwrap();
        assert_eq!(table.f64_at(1, torso), Some(0.0));
    }

    #[test]
    fn first_sample_has_no_displacement() {
        let mut table = head_move_table();
        augment_with_displacements(&mut table).unwrap();
        for joint in Joint::ALL {
            let col = table.column(&joint.displacement_column()).unwrap();
            assert_eq!(table.f64_at(0, col), None);
        }
    }

    #[test]
    fn multi_user_rows_are_filtered() {
        let mut table = head_move_table();
        let mut intruder = table.rows[0].clone();
        intruder[0] = "2".to_string();
        table.rows.push(intruder);

        let kept = filter_to_default_user(&mut table, 1).unwrap();
        assert_eq!(kept, 2);
        let user_col = table.column("userId").unwrap();
        for row in 0..table.len() {
            assert_eq!(table.i64_at(row, user_col), Some(1));
        }
    }

    #[test]
    fn single_user_table_is_untouched() {
        let mut table = head_move_table();
        let kept = filter_to_default_user(&mut table, 1).unwrap();
        assert_eq!(kept, 2);
    }

    #[test]
    fn pairwise_series_is_one_shorter() {
        let trace = [
            Position3::new(0.0, 0.0, 0.0),
            Position3::new(3.0, 4.0, 0.0),
            Position3::new(3.0, 4.0, 12.0),
        ];
        let series = pairwise_displacements(&trace);
        assert_eq!(series, vec![5.0, 12.0]);
    }
}
