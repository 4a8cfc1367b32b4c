//! Text output formatter

use lintbridge_core::{ReportItem, ReportKind, UndefVarTemplate};

use super::FileReport;

pub fn output_text(reports: &[FileReport], template: Option<&UndefVarTemplate>) {
    for report in reports {
        let items = report.items();
        if items.is_empty() {
            continue;
        }

        println!("\n{}:", report.path.display());
        for item in items {
            println!("  {}", format_item(item));
        }

        if let Some(template) = template {
            let names = report.undefined_variables(template);
            if !names.is_empty() {
                println!("  undefined variables: {}", names.join(", "));
            }
        }
    }

    let total_files = reports.len();
    let failed = reports.iter().filter(|r| r.result.is_err()).count();
    let total_issues: usize = reports.iter().map(|r| r.items().len()).sum();

    println!();
    println!(
        "Checked {} files ({} failed), found {} issues",
        total_files, failed, total_issues
    );
}

/// Formats an item with 1-based line and column.
fn format_item(item: &ReportItem) -> String {
    match item.kind() {
        ReportKind::Error => {
            let mut line = format!(
                "{}:{} error: {}",
                item.line().saturating_add(1),
                item.column().saturating_add(1),
                item.primary_text()
            );
            let evidence = item.secondary_text().trim();
            if !evidence.is_empty() {
                line.push_str(&format!("\n      {}", evidence));
            }
            line
        }
        ReportKind::UnusedVariable => format!(
            "{}:1 unused: '{}' in {}",
            item.line().saturating_add(1),
            item.primary_text(),
            item.secondary_text()
        ),
    }
}
