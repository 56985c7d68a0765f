use super::*;
use std::fs;
use tempfile::TempDir;

fn record(name: &str, id: u64, target_type: &str) -> InstallationRecord {
    InstallationRecord {
        app_name: name.to_string(),
        app_id: id,
        target_type: target_type.to_string(),
    }
}

#[test]
fn when_writing_a_single_record_it_should_emit_header_and_row() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("github_apps.csv");

    let outcome = write_records(&[record("a", 1, "Organization")], &path).unwrap();

    assert_eq!(
        outcome,
        WriteOutcome::Written {
            path: path.clone(),
            rows: 1
        }
    );
    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines, vec!["App Name,App ID,Target Type", "a,1,Organization"]);
}

#[test]
fn when_writing_it_should_terminate_lines_with_crlf() {
    let mut buffer = Vec::new();

    write_to(&[record("a", 1, "Organization")], &mut buffer).unwrap();

    assert_eq!(
        String::from_utf8(buffer).unwrap(),
        "App Name,App ID,Target Type\r\na,1,Organization\r\n"
    );
}

#[test]
fn when_there_are_no_records_it_should_not_create_a_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("github_apps.csv");

    let outcome = write_records(&[], &path).unwrap();

    assert_eq!(outcome, WriteOutcome::NoRecords);
    assert!(!path.exists());
}

#[test]
fn when_reading_back_the_file_it_should_match_the_records() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("github_apps.csv");
    let records = vec![
        record("dependabot", 29110, "Organization"),
        record("my-app, with comma", 42, "User"),
        record("renovate", 2740, "Organization"),
    ];

    write_records(&records, &path).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let read_back: Vec<InstallationRecord> = reader
        .deserialize()
        .collect::<std::result::Result<_, _>>()
        .unwrap();
    assert_eq!(read_back, records);
}

#[test]
fn when_the_target_directory_does_not_exist_it_should_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("github_apps.csv");

    let result = write_records(&[record("a", 1, "Organization")], &path);

    assert!(result.is_err());
}
