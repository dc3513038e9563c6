//! Minimal CSV tables for the study's machine-generated logs.
//!
//! The raw recordings and response logs are plain comma-separated numeric
//! files with no quoting or embedded separators, so a line split is the
//! whole parser. Columns the pipeline does not understand are carried
//! through untouched, which keeps the experiment runner's bookkeeping
//! columns intact across augmentation passes.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct Table {
    pub path: PathBuf,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            path: PathBuf::new(),
            headers,
            rows: Vec::new(),
        }
    }

    /// Read a CSV whose first line is the header.
    pub fn read(path: &Path) -> Result<Self> {
        let contents =
            fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let mut lines = contents.lines();
        let header_line = lines.next().ok_or_else(|| Error::EmptyTable {
            path: path.to_path_buf(),
        })?;
        let headers: Vec<String> =
            header_line.split(',').map(|f| f.to_string()).collect();

        let mut table = Self {
            path: path.to_path_buf(),
            headers,
            rows: Vec::new(),
        };
        for (idx, line) in lines.enumerate() {
            if line.is_empty() {
                continue;
            }
            table.push_parsed_line(line, idx + 2)?;
        }
        Ok(table)
    }

    /// Read a headerless CSV against a caller-supplied column order.
    pub fn read_headerless(path: &Path, headers: Vec<String>) -> Result<Self> {
        let contents =
            fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let mut table = Self {
            path: path.to_path_buf(),
            headers,
            rows: Vec::new(),
        };
        for (idx, line) in contents.lines().enumerate() {
            if line.is_empty() {
                continue;
            }
            table.push_parsed_line(line, idx + 1)?;
        }
        if table.rows.is_empty() {
            return Err(Error::EmptyTable {
                path: path.to_path_buf(),
            });
        }
        Ok(table)
    }

    fn push_parsed_line(&mut self, line: &str, line_no: usize) -> Result<()> {
        let fields: Vec<String> = line.split(',').map(|f| f.to_string()).collect();
        if fields.len() != self.headers.len() {
            return Err(Error::Parse {
                path: self.path.clone(),
                line: line_no,
                message: format!(
                    "expected {} fields, found {}",
                    self.headers.len(),
                    fields.len()
                ),
            });
        }
        self.rows.push(fields);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column(name).ok_or_else(|| Error::MissingColumn {
            path: self.path.clone(),
            column: name.to_string(),
        })
    }

    pub fn value(&self, row: usize, col: usize) -> &str {
        &self.rows[row][col]
    }

    /// Parse a field as f64. Empty, unparseable, and non-finite fields all
    /// read as missing.
    pub fn f64_at(&self, row: usize, col: usize) -> Option<f64> {
        let field = self.rows[row][col].trim();
        if field.is_empty() {
            return None;
        }
        match field.parse::<f64>() {
            Ok(v) if v.is_finite() => Some(v),
            _ => None,
        }
    }

    /// Parse a field as an integer, tolerating float-formatted ids ("7.0").
    pub fn i64_at(&self, row: usize, col: usize) -> Option<i64> {
        let field = self.rows[row][col].trim();
        if field.is_empty() {
            return None;
        }
        if let Ok(v) = field.parse::<i64>() {
            return Some(v);
        }
        match field.parse::<f64>() {
            Ok(v) if v.is_finite() => Some(v as i64),
            _ => None,
        }
    }

    /// Append a column; `values` must have one entry per row.
    pub fn push_column(&mut self, name: &str, values: Vec<String>) {
        debug_assert_eq!(values.len(), self.rows.len());
        self.headers.push(name.to_string());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
    }

    pub fn rename_column(&mut self, from: &str, to: &str) -> bool {
        match self.column(from) {
            Some(idx) => {
                self.headers[idx] = to.to_string();
                true
            }
            None => false,
        }
    }

    pub fn retain_rows<F: FnMut(&[String]) -> bool>(&mut self, mut keep: F) {
        self.rows.retain(|row| keep(row));
    }

    /// Drop every row containing a missing (empty) field, the terminal
    /// cleanup applied before figures and models consume a file.
    pub fn drop_rows_with_missing(&mut self) -> usize {
        let before = self.rows.len();
        self.rows
            .retain(|row| row.iter().all(|f| !f.trim().is_empty()));
        before - self.rows.len()
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let mut out = String::new();
        out.push_str(&join_line(&self.headers));
        out.push('\n');
        for row in &self.rows {
            out.push_str(&join_line(row));
            out.push('\n');
        }
        fs::write(path, out).map_err(|e| Error::io(path, e))
    }
}

fn join_line(fields: &[String]) -> String {
    let escaped: Vec<String> = fields.iter().map(|f| escape_field(f)).collect();
    escaped.join(",")
}

fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Format a float for CSV output; missing values serialize as empty fields.
pub fn format_float(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v}"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unique_path(name: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!(
            "kinemetry_csv_test_{}_{}",
            name,
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        p
    }

    #[test]
    fn read_write_round_trip() {
        let path = unique_path("round_trip.csv");
        fs::write(&path, "a,b\n1,2\n3,\n").unwrap();

        let table = Table::read(&path).unwrap();
        assert_eq!(table.headers, vec!["a", "b"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.f64_at(0, 1), Some(2.0));
        assert_eq!(table.f64_at(1, 1), None);

        let out = unique_path("round_trip_out.csv");
        table.write(&out).unwrap();
        assert_eq!(fs::read_to_string(&out).unwrap(), "a,b\n1,2\n3,\n");

        let _ = fs::remove_file(&path);
        let _ = fs::remove_file(&out);
    }

    #[test]
    fn ragged_row_is_a_parse_error() {
        let path = unique_path("ragged.csv");
        fs::write(&path, "a,b\n1,2,3\n").unwrap();
        let err = Table::read(&path).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn drop_rows_with_missing_is_blanket() {
        let path = unique_path("missing.csv");
        fs::write(&path, "a,b,c\n1,2,3\n4,,6\n7,8,9\n").unwrap();
        let mut table = Table::read(&path).unwrap();
        let dropped = table.drop_rows_with_missing();
        assert_eq!(dropped, 1);
        assert_eq!(table.len(), 2);
        assert_eq!(table.value(1, 0), "7");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn i64_tolerates_float_formatted_ids() {
        let mut table = Table::new(vec!["participant".into()]);
        table.rows.push(vec!["7".into()]);
        table.rows.push(vec!["8.0".into()]);
        assert_eq!(table.i64_at(0, 0), Some(7));
        assert_eq!(table.i64_at(1, 0), Some(8));
    }
}
