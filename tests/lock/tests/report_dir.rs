//! Run reports persisted to disk: clean round-trip, and fail-closed reads of
//! tampered directories.

use fathom_harness::agent::SearchAgent;
use fathom_harness::report::{build_report, ReportError, RunReportV1};
use fathom_harness::report_dir::{read_report_dir, write_report_dir, ReportDirError};
use fathom_harness::worlds::n_queens::NQueens;
use fathom_kernel::proof::canon::is_canonical;
use fathom_search::{SearchProblem, Strategy};
use lock_tests::{calibration_plan, CALIBRATION_BOARD_SIZE, CALIBRATION_NODES_EXPANDED};

fn calibration_report() -> RunReportV1 {
    let problem = NQueens::new(CALIBRATION_BOARD_SIZE);
    let strategy = Strategy::iterative_deepening();
    let agent = SearchAgent::default();
    let result = agent.run(&problem, &strategy);
    build_report(problem.problem_id(), &strategy, agent.policy(), &result).unwrap()
}

#[test]
fn calibration_report_content() {
    let value = calibration_report().to_value().unwrap();
    assert_eq!(value["problem_id"], "n_queens_8");
    assert_eq!(value["outcome"]["type"], "solution");
    assert_eq!(
        value["instrumentation"]["nodesExpanded"],
        CALIBRATION_NODES_EXPANDED
    );
    assert_eq!(value["plan"], serde_json::json!(calibration_plan()));
    assert_eq!(value["policy"]["schema_version"], "search_policy.v1");
    assert!(value["plan_digest"].as_str().unwrap().starts_with("sha256:"));
}

#[test]
fn roundtrip_preserves_bytes_and_digest() {
    let report = calibration_report();
    let dir = tempfile::tempdir().unwrap();
    write_report_dir(&report, dir.path()).unwrap();

    let on_disk = std::fs::read(dir.path().join("run_report.json")).unwrap();
    assert!(is_canonical(&on_disk));
    let stored_digest = std::fs::read_to_string(dir.path().join("report_digest.txt")).unwrap();
    assert_eq!(stored_digest, report.digest().as_str());

    let loaded = read_report_dir(dir.path()).unwrap();
    assert_eq!(loaded.bytes(), report.bytes());
    assert_eq!(loaded.digest(), report.digest());
}

#[test]
fn rewriting_is_idempotent() {
    let report = calibration_report();
    let dir = tempfile::tempdir().unwrap();
    write_report_dir(&report, dir.path()).unwrap();
    write_report_dir(&report, dir.path()).unwrap();
    assert_eq!(read_report_dir(dir.path()).unwrap(), report);
}

#[test]
fn missing_digest_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    write_report_dir(&calibration_report(), dir.path()).unwrap();
    std::fs::remove_file(dir.path().join("report_digest.txt")).unwrap();
    let err = read_report_dir(dir.path()).unwrap_err();
    assert!(
        matches!(&err, ReportDirError::MissingFile { filename } if filename == "report_digest.txt"),
        "got {err:?}"
    );
}

#[test]
fn edited_counter_fails_digest_check() {
    let report = calibration_report();
    let dir = tempfile::tempdir().unwrap();
    write_report_dir(&report, dir.path()).unwrap();

    let tampered = String::from_utf8(report.bytes().to_vec())
        .unwrap()
        .replace("\"nodesExpanded\":3656", "\"nodesExpanded\":3655");
    assert_ne!(tampered.as_bytes(), report.bytes());
    std::fs::write(dir.path().join("run_report.json"), tampered).unwrap();

    let err = read_report_dir(dir.path()).unwrap_err();
    assert!(matches!(err, ReportDirError::DigestMismatch { .. }), "got {err:?}");
}

#[test]
fn foreign_schema_fails() {
    let dir = tempfile::tempdir().unwrap();
    write_report_dir(&calibration_report(), dir.path()).unwrap();
    std::fs::write(
        dir.path().join("run_report.json"),
        b"{\"schema_version\":\"run_report.v0\"}",
    )
    .unwrap();
    let err = read_report_dir(dir.path()).unwrap_err();
    assert!(
        matches!(
            err,
            ReportDirError::Report(ReportError::SchemaMismatch { .. })
        ),
        "got {err:?}"
    );
}
