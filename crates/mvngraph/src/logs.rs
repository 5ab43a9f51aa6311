//! Maven build-log evaluation.
//!
//! An independent batch-text subsystem with no dependency on the graph
//! engine: scans a directory of `*.log` files, classifies each build as
//! success or failure, groups failures by error class, and extracts the
//! trailing error block of each failed build.
//!
//! Unlike the graph pipeline this is best-effort: a log that cannot be
//! read, or that carries neither a success nor a failure marker, is
//! recorded as unreadable/inconclusive and processing continues.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

use chrono::{DateTime, NaiveDateTime};
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::error::Result;

/// Maven's stack-trace hint; everything from this line on is noise.
const STACK_TRACE_HINT: &str =
    "[ERROR] To see the full stack trace of the errors, re-run Maven with the -e switch.";
/// Maven's closing help pointer, the other trim marker.
const HELP_POINTER: &str = "[ERROR] -> [Help 1]";

/// Coarse classification of a failed build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum FailureClass {
    /// `Could not resolve dependencies` seen in the log.
    DependencyResolution,
    /// `Compilation failure` seen in the log.
    CompilationFailure,
    /// A failure with no recognized cause line.
    Other,
}

impl fmt::Display for FailureClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DependencyResolution => write!(f, "Dependency Resolution"),
            Self::CompilationFailure => write!(f, "Compilation Failure"),
            Self::Other => write!(f, "Other Errors"),
        }
    }
}

/// One failed build with its extracted context.
#[derive(Debug, Clone, Serialize)]
pub struct FailureDetail {
    /// Log file name.
    pub file: String,
    /// Failure classification.
    pub class: FailureClass,
    /// `Finished at:` timestamp, RFC 3339 when parseable, raw otherwise.
    pub finished_at: Option<String>,
    /// The last run of `[ERROR]` lines, timestamp prefixes stripped,
    /// trimmed at the stack-trace hint.
    pub last_error_block: Vec<String>,
}

/// Aggregated evaluation of a directory of build logs.
#[derive(Debug, Default, Serialize)]
pub struct BuildLogReport {
    /// Files whose build succeeded.
    pub successes: Vec<String>,
    /// Failed builds in scan order.
    pub failures: Vec<FailureDetail>,
    /// Files that could not be read, or carried no build marker at all.
    pub unreadable: Vec<String>,
}

impl BuildLogReport {
    /// Number of logs with a definite outcome.
    #[must_use]
    pub fn total_evaluated(&self) -> usize {
        self.successes.len() + self.failures.len()
    }

    /// Failures grouped by class, classes in enum order.
    #[must_use]
    pub fn failures_by_class(&self) -> BTreeMap<FailureClass, Vec<&FailureDetail>> {
        let mut grouped: BTreeMap<FailureClass, Vec<&FailureDetail>> = BTreeMap::new();
        for failure in &self.failures {
            grouped.entry(failure.class).or_default().push(failure);
        }
        grouped
    }

    /// Render the human-readable summary report.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut lines = vec![
            format!("Total Builds Evaluated: {}", self.total_evaluated()),
            format!("Successful Builds: {}", self.successes.len()),
        ];
        if !self.successes.is_empty() {
            lines.push("Successful build files:".to_string());
            for file in &self.successes {
                lines.push(format!("  - {file}"));
            }
        }
        lines.push(format!("Failed Builds: {}", self.failures.len()));
        lines.push("Failure Classification:".to_string());
        let grouped = self.failures_by_class();
        if grouped.is_empty() {
            lines.push("  (no failures found)".to_string());
        } else {
            for (class, failures) in &grouped {
                lines.push(format!("  {class}: {}", failures.len()));
                for failure in failures {
                    lines.push(format!("    - {}", failure.file));
                }
            }
        }
        if !self.unreadable.is_empty() {
            lines.push("Unreadable / Inconclusive logs:".to_string());
            for file in &self.unreadable {
                lines.push(format!("  - {file}"));
            }
        }
        lines.join("\n")
    }
}

/// Evaluate every `*.log` file under `log_dir`, sorted by name.
///
/// # Errors
///
/// Only when the directory itself cannot be listed; individual files never
/// fail the run.
pub fn evaluate_build_logs(log_dir: &Path) -> Result<BuildLogReport> {
    let mut log_files: Vec<_> = std::fs::read_dir(log_dir)?
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file() && path.extension().is_some_and(|ext| ext == "log")
        })
        .collect();
    log_files.sort();

    let mut report = BuildLogReport::default();
    for path in log_files {
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        debug!(file = %name, "reading build log");

        let Ok(bytes) = std::fs::read(&path) else {
            report.unreadable.push(name);
            continue;
        };
        match scan_log(&bytes) {
            Outcome::Success => report.successes.push(name),
            Outcome::Failure(mut detail) => {
                detail.file = name;
                report.failures.push(detail);
            }
            Outcome::Inconclusive => report.unreadable.push(name),
        }
    }
    Ok(report)
}

enum Outcome {
    Success,
    Failure(FailureDetail),
    Inconclusive,
}

/// Scan one log, decoding line by line and skipping undecodable lines.
fn scan_log(bytes: &[u8]) -> Outcome {
    let mut detected_success = false;
    let mut detected_failure = false;
    let mut class: Option<FailureClass> = None;
    let mut finished_at: Option<String> = None;
    let mut last_block: Vec<String> = Vec::new();
    let mut current_block: Vec<String> = Vec::new();

    for raw_line in bytes.split(|&b| b == b'\n') {
        let raw_line = raw_line.strip_suffix(b"\r").unwrap_or(raw_line);
        let Ok(line) = std::str::from_utf8(raw_line) else {
            continue;
        };

        if line.contains("BUILD SUCCESS") {
            detected_success = true;
        }
        if line.contains("BUILD FAILURE") {
            detected_failure = true;
        }
        if class.is_none() {
            if line.contains("Could not resolve dependencies") {
                class = Some(FailureClass::DependencyResolution);
            } else if line.contains("Compilation failure") {
                class = Some(FailureClass::CompilationFailure);
            }
        }
        if let Some(rest) = line.split_once("Finished at:").map(|(_, rest)| rest) {
            if let Some(token) = rest.split_whitespace().next() {
                finished_at = Some(normalize_timestamp(token));
            }
        }

        if line.contains("[ERROR]") || line.trim_start().starts_with("ERROR") {
            current_block.push(strip_timestamp_prefix(line.trim()).to_string());
        } else if !current_block.is_empty() {
            last_block = std::mem::take(&mut current_block);
        }
    }
    if !current_block.is_empty() {
        last_block = current_block;
    }

    if detected_success {
        Outcome::Success
    } else if detected_failure {
        Outcome::Failure(FailureDetail {
            file: String::new(),
            class: class.unwrap_or(FailureClass::Other),
            finished_at,
            last_error_block: trim_error_block(last_block),
        })
    } else {
        Outcome::Inconclusive
    }
}

/// Drop the stack-trace hint line and everything after it.
fn trim_error_block(block: Vec<String>) -> Vec<String> {
    let cut = block
        .iter()
        .position(|line| line.contains(STACK_TRACE_HINT) || line.contains(HELP_POINTER));
    match cut {
        Some(idx) => block.into_iter().take(idx).collect(),
        None => block,
    }
}

/// Strip a leading `HH:MM:SS,mmm` timestamp (optionally dated) directly
/// preceding an `[ERROR]` tag.
fn strip_timestamp_prefix(line: &str) -> &str {
    static PREFIX: OnceLock<Regex> = OnceLock::new();
    let prefix = PREFIX.get_or_init(|| {
        Regex::new(r"^(?:\d{4}-\d{2}-\d{2}[ T])?\d{2}:\d{2}:\d{2}[.,]\d{3}\s+")
            .expect("timestamp prefix regex is valid")
    });
    if let Some(m) = prefix.find(line) {
        let rest = &line[m.end()..];
        if rest.starts_with("[ERROR]") {
            return rest;
        }
    }
    line
}

/// Normalize a `Finished at:` token to RFC 3339 when possible; keep the raw
/// token otherwise.
fn normalize_timestamp(token: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(token) {
        return dt.to_rfc3339();
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(token, "%Y-%m-%dT%H:%M:%S") {
        return naive.and_utc().to_rfc3339();
    }
    token.to_string()
}
