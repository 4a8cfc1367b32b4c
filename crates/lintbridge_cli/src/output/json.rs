//! JSON output formatter

use lintbridge_core::UndefVarTemplate;
use miette::{IntoDiagnostic, Result};

use super::FileReport;

pub fn output_json(reports: &[FileReport], template: Option<&UndefVarTemplate>) -> Result<()> {
    let output: Vec<_> = reports
        .iter()
        .map(|r| {
            let mut entry = serde_json::json!({
                "path": r.path.display().to_string(),
                "items": r.items(),
            });
            if let Err(e) = &r.result {
                entry["error"] = serde_json::Value::String(e.to_string());
            }
            if let Some(template) = template {
                entry["undefined_variables"] = serde_json::json!(r.undefined_variables(template));
            }
            entry
        })
        .collect();
    println!(
        "{}",
        serde_json::to_string_pretty(&output).into_diagnostic()?
    );
    Ok(())
}
