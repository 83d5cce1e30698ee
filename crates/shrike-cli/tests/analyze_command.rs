use shrike_core::filter::FilterSpec;
use shrike_core::log::TimestampFormats;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to get path to test fixtures
fn fixture_path(filename: &str) -> PathBuf {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("tests")
        .join("fixtures");
    if filename.is_empty() {
        root
    } else {
        root.join(filename)
    }
}

/// Test that run_analysis merges a directory of exports and computes stats
#[test]
fn test_run_analysis_on_fixture_directory() {
    // Arrange
    let input = fixture_path("");

    // Act
    let result = shrike_cli::commands::analyze::run_analysis(
        &input,
        &FilterSpec::new(),
        &TimestampFormats::default(),
    );

    // Assert
    assert!(result.is_ok(), "Should successfully analyze fixture dir");
    let (report, outcome) = result.unwrap();

    // session_a: 4 loaded + 1 dropped; session_b: 2 loaded
    assert_eq!(report.summary.total_requests, 6);
    assert_eq!(report.summary.active_days, 2);
    assert_eq!(report.summary.peak_day_requests, 4);
    assert_eq!(report.summary.unique_targets, 2);
    assert_eq!(outcome.files_attempted(), 2);
    assert_eq!(outcome.files_failed(), 0);
    assert_eq!(outcome.rows_dropped(), 1);
}

/// Test that the fallback Date: header timestamp is used for the blank-time row
#[test]
fn test_run_analysis_recovers_fallback_timestamp() {
    // Arrange
    let input = fixture_path("session_a.csv");

    // Act
    let (report, outcome) =
        shrike_cli::commands::analyze::run_analysis(
            &input,
            &FilterSpec::new(),
            &TimestampFormats::default(),
        )
        .unwrap();

    // Assert - the blank-time row resolves via its Date: response header
    assert_eq!(report.summary.total_requests, 4);
    assert_eq!(outcome.reports[0].rows_dropped, 1);

    let fallback = outcome
        .dataset
        .iter()
        .find(|r| r.url == "https://app.example.test/api/orders")
        .unwrap();
    assert_eq!(fallback.timestamp.to_string(), "2025-07-22 14:30:00");
}

/// Test that files with different column orders map fields independently
#[test]
fn test_run_analysis_maps_reordered_columns() {
    // Arrange
    let input = fixture_path("");

    // Act
    let (_, outcome) =
        shrike_cli::commands::analyze::run_analysis(
            &input,
            &FilterSpec::new(),
            &TimestampFormats::default(),
        )
        .unwrap();

    // Assert - session_b has URL in column 0, time in column 2
    let from_b: Vec<_> = outcome
        .dataset
        .iter()
        .filter(|r| r.source_file == "session_b.csv")
        .collect();
    assert_eq!(from_b.len(), 2);
    assert_eq!(from_b[0].url, "https://cdn.example.test/lib.js");
    assert_eq!(from_b[0].tool, "Proxy");
    assert_eq!(from_b[0].extension, "js");
    assert_eq!(from_b[1].method, "POST");
}

/// Test that execute writes the HTML report to the requested path
#[test]
fn test_analyze_execute_writes_html_report() {
    // Arrange
    let input = fixture_path("");
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("report.html");

    // Act
    let result = shrike_cli::commands::analyze::execute(
        &input,
        &["js".to_string()],
        &[],
        &[],
        &output,
    );

    // Assert
    assert!(result.is_ok(), "Should generate the report");
    let html = std::fs::read_to_string(&output).unwrap();
    assert!(html.contains("Traffic Analysis Report"));
    assert!(html.contains("Excluded extensions:"));
    assert!(
        !html.contains("app.js"),
        "Excluded endpoints must not appear in the report"
    );
}

/// Test that excluding everything is an error, not an empty report
#[test]
fn test_analyze_execute_rejects_fully_filtered_dataset() {
    // Arrange
    let input = fixture_path("session_b.csv");
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("report.html");

    // Act - session_b only has Proxy and Intruder records
    let result = shrike_cli::commands::analyze::execute(
        &input,
        &[],
        &["Proxy,Intruder".to_string()],
        &[],
        &output,
    );

    // Assert
    assert!(result.is_err());
    assert!(
        result.unwrap_err().to_string().contains("filtered out"),
        "Error should mention filtering"
    );
    assert!(!output.exists(), "No report should be written on error");
}
