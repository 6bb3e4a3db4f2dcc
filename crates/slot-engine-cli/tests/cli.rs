use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn slot() -> Command {
    Command::cargo_bin("slot").unwrap()
}

fn calendar_file(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

const CALENDAR: &str = r#"[
    {"id": "e1", "title": "Existing Meeting", "userId": "u1",
     "startTime": "2025-08-02T09:00:00Z", "endTime": "2025-08-02T10:00:00Z"},
    {"id": "e2", "title": "Existing Meeting", "participantId": "u2",
     "start": "2025-08-02T10:00:00Z", "end": "2025-08-02T11:00:00Z"}
]"#;

#[test]
fn test_find_best_slot() {
    let file = calendar_file(CALENDAR);
    let output = slot()
        .args(["find", "--participants", "u1,u2", "--duration", "60"])
        .args(["--start", "2025-08-02T09:00:00Z", "--end", "2025-08-02T17:00:00Z"])
        .arg("--calendar")
        .arg(file.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let best: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    // 11:00 is back-to-back with u2 (+10); 11:30 is a clean 22 + 0.
    assert_eq!(best["start"], "2025-08-02T11:30:00Z");
    assert_eq!(best["end"], "2025-08-02T12:30:00Z");
    assert_eq!(best["score"], 22);
}

#[test]
fn test_find_all_candidates() {
    let output = slot()
        .args(["find", "-p", "u1", "-d", "60", "--all"])
        .args(["--start", "2025-08-02T09:00:00Z", "--end", "2025-08-02T11:00:00Z"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0]["start"], "2025-08-02T09:00:00Z");
    assert!(rows[0].get("score").is_none());
}

#[test]
fn test_find_explain_includes_scores() {
    let output = slot()
        .args(["find", "-p", "u1", "-d", "60", "--explain"])
        .args(["--start", "2025-08-02T16:00:00Z", "--end", "2025-08-02T19:00:00Z"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let scores: Vec<_> = rows
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["score"].as_u64().unwrap())
        .collect();
    // 16:xx => 32, 17:xx => 34, 18:00 => 36 + 20
    assert_eq!(scores, vec![32, 32, 32, 32, 34, 34, 34, 34, 56]);
}

#[test]
fn test_find_in_display_timezone() {
    slot()
        .args(["find", "-p", "u1", "-d", "30", "--timezone", "Asia/Kolkata"])
        .args(["--start", "2025-08-02T09:00:00Z", "--end", "2025-08-02T10:00:00Z"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2025-08-02T14:30:00+05:30"));
}

#[test]
fn test_no_slot_exit_code() {
    let file = calendar_file(CALENDAR);
    slot()
        .args(["find", "-p", "u1", "-d", "60"])
        .args(["--start", "2025-08-02T09:00:00Z", "--end", "2025-08-02T10:00:00Z"])
        .arg("--calendar")
        .arg(file.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No available time slot"));
}

#[test]
fn test_invalid_datetime() {
    slot()
        .args(["find", "-p", "u1", "-d", "60"])
        .args(["--start", "tomorrow", "--end", "2025-08-02T10:00:00Z"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid datetime"));
}

#[test]
fn test_non_positive_duration() {
    slot()
        .args(["find", "-p", "u1", "-d", "0"])
        .args(["--start", "2025-08-02T09:00:00Z", "--end", "2025-08-02T10:00:00Z"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid duration"));
}

#[test]
fn test_oversized_step_rejected() {
    slot()
        .args(["find", "-p", "u1", "-d", "30", "--step", "200000000000"])
        .args(["--start", "2025-08-02T09:00:00Z", "--end", "2025-08-02T17:00:00Z"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid policy"));
}

#[test]
fn test_malformed_calendar_file() {
    let file = calendar_file("{not json");
    slot()
        .args(["find", "-p", "u1", "-d", "30"])
        .args(["--start", "2025-08-02T09:00:00Z", "--end", "2025-08-02T10:00:00Z"])
        .arg("--calendar")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("parsing calendar"));
}

#[test]
fn test_help() {
    slot()
        .args(["find", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--participants"));
}
