//! Integration tests for build-log evaluation over a directory of files.

use std::fs;

use tempfile::TempDir;

use mvngraph::logs::{evaluate_build_logs, FailureClass};

fn log_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    fs::write(
        dir.path().join("01-ok.log"),
        "[INFO] Scanning for projects...\n\
         [INFO] BUILD SUCCESS\n\
         [INFO] Finished at: 2025-05-01T10:00:00+02:00\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("02-deps.log"),
        "[INFO] Scanning for projects...\n\
         [INFO] BUILD FAILURE\n\
         [ERROR] Failed to execute goal on project demo: Could not resolve dependencies for project com.acme:demo:jar:1.0\n\
         [ERROR] -> [Help 1]\n\
         [INFO] Finished at: 2025-05-01T10:05:00+02:00\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("03-compile.log"),
        "[INFO] BUILD FAILURE\n\
         [ERROR] Compilation failure\n\
         [ERROR] /src/Main.java:[7,5] cannot find symbol\n\
         [ERROR] To see the full stack trace of the errors, re-run Maven with the -e switch.\n",
    )
    .unwrap();
    fs::write(dir.path().join("04-junk.log"), "nothing conclusive here\n").unwrap();
    // Non-log files are ignored entirely.
    fs::write(dir.path().join("notes.txt"), "BUILD FAILURE\n").unwrap();
    dir
}

#[test]
fn evaluates_directory_in_name_order() {
    let dir = log_dir();
    let report = evaluate_build_logs(dir.path()).unwrap();

    assert_eq!(report.successes, vec!["01-ok.log"]);
    assert_eq!(report.failures.len(), 2);
    assert_eq!(report.failures[0].file, "02-deps.log");
    assert_eq!(report.failures[1].file, "03-compile.log");
    assert_eq!(report.unreadable, vec!["04-junk.log"]);
    assert_eq!(report.total_evaluated(), 3);
}

#[test]
fn classifies_failures_and_extracts_error_blocks() {
    let dir = log_dir();
    let report = evaluate_build_logs(dir.path()).unwrap();

    let deps = &report.failures[0];
    assert_eq!(deps.class, FailureClass::DependencyResolution);
    // The help pointer line is trimmed off the block.
    assert_eq!(deps.last_error_block.len(), 1);
    assert!(deps.last_error_block[0].contains("Could not resolve dependencies"));
    assert_eq!(deps.finished_at.as_deref(), Some("2025-05-01T10:05:00+02:00"));

    let compile = &report.failures[1];
    assert_eq!(compile.class, FailureClass::CompilationFailure);
    assert_eq!(compile.last_error_block.len(), 2);
    assert!(compile.last_error_block[1].contains("cannot find symbol"));
}

#[test]
fn text_report_summarizes_by_class() {
    let dir = log_dir();
    let report = evaluate_build_logs(dir.path()).unwrap();
    let text = report.to_text();

    assert!(text.contains("Total Builds Evaluated: 3"));
    assert!(text.contains("Successful Builds: 1"));
    assert!(text.contains("Failed Builds: 2"));
    assert!(text.contains("  Dependency Resolution: 1"));
    assert!(text.contains("  Compilation Failure: 1"));
    assert!(text.contains("Unreadable / Inconclusive logs:"));
    assert!(text.contains("  - 04-junk.log"));
}

#[test]
fn empty_directory_reports_no_failures() {
    let dir = tempfile::tempdir().unwrap();
    let report = evaluate_build_logs(dir.path()).unwrap();
    assert_eq!(report.total_evaluated(), 0);
    assert!(report.to_text().contains("  (no failures found)"));
}
