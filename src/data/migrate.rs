//! One-time timestamp unit migration.
//!
//! The first thirteen participants were recorded with millisecond
//! timestamps before the logger switched to microsecond resolution. This
//! rewrites such a file in place: the column is renamed and every value
//! multiplied by 1000, widening it to the 16-digit form. The sub-
//! millisecond digits are zeros since they were never recorded.

use std::path::Path;

use tracing::info;

use crate::core::joint::{MICROS_COLUMN, MILLIS_COLUMN};
use crate::data::csv::Table;
use crate::error::{Error, Result};

/// Convert a file's millisecond timestamp column to microseconds, in place.
/// Returns the number of rewritten rows.
pub fn fix_utc_timestamps(path: &Path) -> Result<usize> {
    let mut table = Table::read(path)?;
    if !table.rename_column(MILLIS_COLUMN, MICROS_COLUMN) {
        return Err(Error::MissingColumn {
            path: path.to_path_buf(),
            column: MILLIS_COLUMN.to_string(),
        });
    }
    let col = table.require_column(MICROS_COLUMN)?;

    for row in 0..table.len() {
        let raw = table.i64_at(row, col).ok_or_else(|| Error::Parse {
            path: path.to_path_buf(),
            line: row + 2,
            message: format!("unparseable timestamp `{}`", table.value(row, col)),
        })?;
        table.rows[row][col] = (raw * 1000).to_string();
    }

    table.write(path)?;
    info!(path = %path.display(), rows = table.len(), "converted timestamps to microseconds");
    Ok(table.len())
}
