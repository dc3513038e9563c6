//! End-to-end displacement augmentation over a synthetic raw recording.

use std::fs;
use std::path::PathBuf;

use kinemetry::core::displacement::{augment_with_displacements, filter_to_default_user};
use kinemetry::core::joint::{canonical_header, Joint};
use kinemetry::data::csv::Table;

fn scratch_file(name: &str, contents: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!(
        "kinemetry_displacement_{}_{}",
        name,
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    fs::write(&path, contents).unwrap();
    path
}

/// Raw CSV with a header line; the head joint moves (0,0,0) -> (3,4,0)
/// while every other coordinate stays at zero.
fn raw_recording(user_ids: &[i64]) -> String {
    let header = canonical_header().join(",");
    let mut out = format!("{header}\n");
    for (i, user) in user_ids.iter().enumerate() {
        let mut fields = vec!["0".to_string(); 47];
        fields[0] = user.to_string();
        fields[1] = format!("{}", 1_579_287_816_000i64 + 33 * i as i64);
        if i == 1 {
            fields[2] = "3".to_string(); // jointHeadX
            fields[3] = "4".to_string(); // jointHeadY
        }
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

#[test]
fn augmented_file_round_trips_through_csv() {
    let path = scratch_file("round_trip", &raw_recording(&[1, 1]));
    let mut table = Table::read(&path).unwrap();
    filter_to_default_user(&mut table, 1).unwrap();
    augment_with_displacements(&mut table).unwrap();

    let mut out_path = path.clone();
    out_path.set_extension("out.csv");
    table.write(&out_path).unwrap();

    let reread = Table::read(&out_path).unwrap();
    assert_eq!(reread.headers.len(), 47 + Joint::COUNT);

    let head = reread.column("jointHeadDisplacement").unwrap();
    assert_eq!(reread.f64_at(0, head), None, "first sample must stay missing");
    assert_eq!(reread.f64_at(1, head), Some(5.0));

    // Untouched joints moved by zero.
    let knee = reread.column("jointLeftKneeDisplacement").unwrap();
    assert_eq!(reread.f64_at(1, knee), Some(0.0));

    let _ = fs::remove_file(&path);
    let _ = fs::remove_file(&out_path);
}

#[test]
fn second_user_rows_are_dropped_before_augmentation() {
    let path = scratch_file("multi_user", &raw_recording(&[1, 2, 1]));
    let mut table = Table::read(&path).unwrap();

    let kept = filter_to_default_user(&mut table, 1).unwrap();
    assert_eq!(kept, 2);

    augment_with_displacements(&mut table).unwrap();
    let head = table.column("jointHeadDisplacement").unwrap();
    // Rows 0 and 2 of the original file remain; the displacement pairs the
    // two retained samples with each other.
    assert_eq!(table.f64_at(0, head), None);
    assert_eq!(table.f64_at(1, head), Some(0.0));

    let _ = fs::remove_file(&path);
}
