//! Output formatting module

mod json;
mod text;

use std::path::PathBuf;

use lintbridge_core::{LintError, ReportItem, UndefVarTemplate};
use miette::Result;

use crate::cli::OutputFormat;

/// Outcome of checking one file.
pub struct FileReport {
    pub path: PathBuf,
    pub result: Result<Vec<ReportItem>, LintError>,
}

impl FileReport {
    /// Returns the findings, or an empty slice if the check failed.
    pub fn items(&self) -> &[ReportItem] {
        self.result.as_deref().unwrap_or_default()
    }

    /// Names of undefined variables reported in this file, in report order.
    pub fn undefined_variables<'a>(&'a self, template: &UndefVarTemplate) -> Vec<&'a str> {
        self.items()
            .iter()
            .filter_map(|item| item.undefined_variable(template))
            .collect()
    }
}

/// Prints `reports` and returns whether any file has findings.
///
/// `template` is set when undefined variables should be listed.
pub fn output_reports(
    reports: &[FileReport],
    format: OutputFormat,
    template: Option<&UndefVarTemplate>,
) -> Result<bool> {
    let has_findings = reports.iter().any(|r| !r.items().is_empty());

    match format {
        OutputFormat::Json => json::output_json(reports, template)?,
        OutputFormat::Text => text::output_text(reports, template),
    }

    Ok(has_findings)
}
