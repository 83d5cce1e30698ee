use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("tests")
        .join("fixtures")
}

#[test]
fn test_stats_json_output() {
    let mut cmd = Command::cargo_bin("shrike").unwrap();
    cmd.arg("stats")
        .arg(fixture_dir())
        .args(["--format", "json"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"total_requests\": 6"))
        .stdout(predicate::str::contains("session_a.csv"));
}

#[test]
fn test_stats_table_output() {
    let mut cmd = Command::cargo_bin("shrike").unwrap();
    cmd.arg("stats")
        .arg(fixture_dir())
        .args(["--format", "table"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Total Requests,6"));
}

#[test]
fn test_filter_json_to_stdout() {
    let mut cmd = Command::cargo_bin("shrike").unwrap();
    cmd.arg("filter")
        .arg(fixture_dir())
        .args(["--exclude-ext", "js"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("https://app.example.test/login"))
        .stdout(predicate::str::contains("app.js").not());
}

#[test]
fn test_completion_generates_script() {
    let mut cmd = Command::cargo_bin("shrike").unwrap();
    cmd.args(["completion", "bash"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("shrike"));
}

#[test]
fn test_stats_with_custom_time_format() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let input = temp_dir.path().join("export.csv");
    std::fs::write(
        &input,
        "Request.Time,Request.URL,Request.Tool\n\
         22.07.2025 10:30,https://app.example.test/login,Proxy\n",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("shrike").unwrap();
    cmd.arg("stats")
        .arg(&input)
        .args(["--time-format", "%d.%m.%Y %H:%M"])
        .args(["--format", "table"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Total Requests,1"));
}

#[test]
fn test_missing_path_fails() {
    let mut cmd = Command::cargo_bin("shrike").unwrap();
    cmd.arg("stats").arg("definitely/not/here.csv");

    cmd.assert().failure();
}
