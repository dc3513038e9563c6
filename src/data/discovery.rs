//! Locating per-participant recording files in the data directory.
//!
//! Recordings follow the experiment runner's naming convention: a
//! zero-padded four-digit participant id, then underscore-separated
//! study/session/date segments, e.g.
//! `0007_task-switching-replication_2020_Jan_17_1403.csv`.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Parse the participant id from a recording file name
/// (`"0007_..."` -> `7`).
pub fn parse_participant_id(file_name: &str) -> Option<u32> {
    let (prefix, _) = file_name.split_once('_')?;
    if prefix.len() != 4 || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    prefix.parse().ok()
}

/// Whether a file name looks like a raw session recording: four-digit id
/// prefix, at least six underscore-separated segments, `.csv` extension,
/// and not one of the runner's `trials` bookkeeping files.
pub fn is_session_file(file_name: &str) -> bool {
    if !file_name.ends_with(".csv") || file_name.contains("trials") {
        return false;
    }
    if parse_participant_id(file_name).is_none() {
        return false;
    }
    file_name.split('_').count() >= 6
}

/// All raw session recordings directly under `data_dir`, in lexicographic
/// order (zero-padded ids make that numeric participant order).
pub fn session_files(data_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(data_dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| {
            Error::io(
                data_dir,
                e.into_io_error().unwrap_or_else(|| {
                    std::io::Error::other("walkdir error")
                }),
            )
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if is_session_file(&name) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// The unique joint recording for one participant of the named study.
/// Zero or several matches is an error; the caller decides whether that
/// skips the participant or aborts the run.
pub fn participant_session(
    data_dir: &Path,
    participant: u32,
    study_name: &str,
) -> Result<PathBuf> {
    let prefix = format!("{participant:04}_{study_name}_");
    let mut matches = Vec::new();
    for entry in WalkDir::new(data_dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| {
            Error::io(
                data_dir,
                e.into_io_error().unwrap_or_else(|| {
                    std::io::Error::other("walkdir error")
                }),
            )
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with(&prefix) && name.ends_with(".csv") {
            matches.push(entry.into_path());
        }
    }
    if matches.len() != 1 {
        return Err(Error::ParticipantFile {
            id: participant,
            found: matches.len(),
        });
    }
    Ok(matches.remove(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn participant_id_from_file_name() {
        assert_eq!(
            parse_participant_id("0007_something-joint-positions-displacements.csv"),
            Some(7)
        );
        assert_eq!(parse_participant_id("0123_x.csv"), Some(123));
        assert_eq!(parse_participant_id("12_x.csv"), None);
        assert_eq!(parse_participant_id("abcd_x.csv"), None);
        assert_eq!(parse_participant_id("no-underscore.csv"), None);
    }

    #[test]
    fn session_file_filter() {
        assert!(is_session_file(
            "0007_task-switching-replication_2020_Jan_17_1403.csv"
        ));
        assert!(!is_session_file(
            "0007_task-switching-replication_trials_2020_Jan_17.csv"
        ));
        assert!(!is_session_file("0007_task-switching-replication.csv"));
        assert!(!is_session_file(
            "0007_task-switching-replication_2020_Jan_17_1403.txt"
        ));
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!(
            "kinemetry_discovery_test_{}_{}",
            name,
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        fs::create_dir_all(&p).unwrap();
        p
    }

    #[test]
    fn unique_participant_session() {
        let dir = scratch_dir("unique");
        fs::write(dir.join("0007_study_2020_Jan_17_1403.csv"), "x\n").unwrap();
        fs::write(dir.join("0008_study_2020_Jan_18_0930.csv"), "x\n").unwrap();

        let found = participant_session(&dir, 7, "study").unwrap();
        assert!(found.ends_with("0007_study_2020_Jan_17_1403.csv"));

        let missing = participant_session(&dir, 9, "study").unwrap_err();
        assert!(matches!(
            missing,
            Error::ParticipantFile { id: 9, found: 0 }
        ));

        fs::write(dir.join("0007_study_2020_Jan_17_1500.csv"), "x\n").unwrap();
        let ambiguous = participant_session(&dir, 7, "study").unwrap_err();
        assert!(matches!(
            ambiguous,
            Error::ParticipantFile { id: 7, found: 2 }
        ));

        let _ = fs::remove_dir_all(&dir);
    }
}
