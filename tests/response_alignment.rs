//! Aligning a synthetic response log against a participant's joint stream.

use std::fs;
use std::path::PathBuf;

use kinemetry::config::{StudyConfig, WindowConfig};
use kinemetry::core::align::align_responses;
use kinemetry::data::csv::Table;

const T0: f64 = 1_579_287_816.0;

fn scratch_dir(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!(
        "kinemetry_alignment_{}_{}",
        name,
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    fs::create_dir_all(&path).unwrap();
    path
}

/// Joint recording for participant 7: samples every 100 ms for three
/// seconds, head and torso both advancing 1 mm per sample so every
/// pairwise displacement is exactly 1.0.
fn write_joint_recording(dir: &PathBuf) {
    let mut header = vec![
        "userId".to_string(),
        "utcMillisecondsSinceEpoch".to_string(),
    ];
    for joint in kinemetry::core::joint::Joint::ALL {
        header.push(joint.column_x());
        header.push(joint.column_y());
        header.push(joint.column_z());
    }
    let mut out = format!("{}\n", header.join(","));
    for i in 0..31 {
        let mut fields = vec!["0".to_string(); 47];
        fields[0] = "1".to_string();
        fields[1] = format!("{}", (T0 * 1000.0) as i64 + 100 * i);
        fields[2] = i.to_string(); // jointHeadX
        fields[14] = i.to_string(); // jointTorsoX
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    fs::write(
        dir.join("0007_task-switching-replication_2020_Jan_17_1403.csv"),
        out,
    )
    .unwrap();
}

fn response_table(rows: &[(u32, f64, &str, &str)]) -> Table {
    let mut table = Table::new(vec![
        "participant".to_string(),
        "trialType".to_string(),
        "utcTime".to_string(),
        "reactionTime".to_string(),
        "correct".to_string(),
    ]);
    for (participant, utc_time, reaction_time, correct) in rows {
        table.rows.push(vec![
            participant.to_string(),
            "switch".to_string(),
            format!("{utc_time}"),
            reaction_time.to_string(),
            correct.to_string(),
        ]);
    }
    table
}

fn study(dir: &PathBuf) -> StudyConfig {
    StudyConfig {
        data_dir: dir.to_string_lossy().to_string(),
        ..StudyConfig::default()
    }
}

fn window_cfg() -> WindowConfig {
    WindowConfig {
        cue_offset_secs: 1.0,
        timeout_window_secs: 2.5,
    }
}

#[test]
fn responses_gain_window_means() {
    let dir = scratch_dir("means");
    write_joint_recording(&dir);

    let mut responses = response_table(&[
        (7, T0 + 2.0, "0.5", "yes"),
        (7, T0 + 2.5, "", "no"), // timed out, falls back to the fixed window
    ]);
    let report = align_responses(&mut responses, &study(&dir), &window_cfg()).unwrap();

    assert_eq!(report.responses, 2);
    assert_eq!(report.aligned, 2);
    assert_eq!(report.dropped, 0);
    assert_eq!(responses.len(), 2);

    let head = responses.column("jointHeadDisplacement").unwrap();
    let torso = responses.column("jointTorsoDisplacement").unwrap();
    for row in 0..responses.len() {
        assert!((responses.f64_at(row, head).unwrap() - 1.0).abs() < 1e-9);
        assert!((responses.f64_at(row, torso).unwrap() - 1.0).abs() < 1e-9);
    }

    // Original response columns ride along untouched.
    let trial = responses.column("trialType").unwrap();
    assert_eq!(responses.value(0, trial), "switch");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn empty_windows_are_dropped_at_the_end() {
    let dir = scratch_dir("empty_window");
    write_joint_recording(&dir);

    let mut responses = response_table(&[
        (7, T0 + 2.0, "0.5", "yes"),
        (7, T0 + 500.0, "0.5", "no"), // far outside the recording
    ]);
    let report = align_responses(&mut responses, &study(&dir), &window_cfg()).unwrap();

    assert_eq!(report.aligned, 1);
    assert_eq!(report.dropped, 1);
    assert_eq!(responses.len(), 1);
    let correct = responses.column("correct").unwrap();
    assert_eq!(responses.value(0, correct), "yes");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn unknown_participant_is_skipped() {
    let dir = scratch_dir("unknown_participant");
    write_joint_recording(&dir);

    let mut responses = response_table(&[
        (9, T0 + 2.0, "0.5", "yes"), // no recording for participant 9
        (7, T0 + 2.0, "0.5", "yes"),
    ]);
    let report = align_responses(&mut responses, &study(&dir), &window_cfg()).unwrap();

    assert_eq!(report.participants_skipped, 1);
    assert_eq!(report.aligned, 1);
    assert_eq!(responses.len(), 1);
    let participant = responses.column("participant").unwrap();
    assert_eq!(responses.value(0, participant), "7");

    let _ = fs::remove_dir_all(&dir);
}
