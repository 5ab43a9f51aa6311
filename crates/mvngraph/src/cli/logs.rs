//! `logs` subcommand: evaluate Maven build logs.

use std::path::Path;

use mvngraph::logs::evaluate_build_logs;
use mvngraph::{Error, Result};

use super::{output, ReportFormat};

pub fn run(log_dir: &Path, format: ReportFormat, outfile: Option<&Path>) -> Result<()> {
    if !log_dir.is_dir() {
        return Err(Error::Config(format!(
            "log directory '{}' does not exist or is not a directory",
            log_dir.display()
        )));
    }

    let report = evaluate_build_logs(log_dir)?;
    let rendered = match format {
        ReportFormat::Text => report.to_text(),
        ReportFormat::Json => serde_json::to_string_pretty(&report)?,
    };
    output::emit(&rendered, outfile)
}
