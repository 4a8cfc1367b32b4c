//! Conversion of the linter's `data()` object into report items.
//!
//! The result object is loosely typed: lists may be missing, and entries may
//! be `null` or otherwise malformed (JSLint appends `null` when it stops
//! early). Each entry is decoded as a fixed-shape record and skipped when it
//! does not fit.

use serde::Deserialize;
use serde_json::Value;
use tracing::trace;

use crate::tab_width::correct_column;
use crate::{AnalysisRequest, ReportItem};

/// An entry of the `errors` list.
#[derive(Debug, Deserialize)]
struct RawError {
    #[serde(default)]
    line: i64,
    #[serde(default)]
    character: i64,
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    evidence: Option<String>,
}

/// An entry of the `unused` list.
#[derive(Debug, Deserialize)]
struct RawUnused {
    #[serde(default)]
    line: i64,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    function: Option<String>,
}

/// Builds report items from the linter's result object.
///
/// Errors come first, then unused variables, each in the linter's order.
pub fn extract(result: &Value, request: &AnalysisRequest) -> Vec<ReportItem> {
    let mut items = Vec::new();

    for entry in list(result, "errors") {
        let Some(raw) = decode::<RawError>(entry) else {
            trace!("Skipping malformed error entry: {}", entry);
            continue;
        };

        let character = correct_column(
            &request.source,
            raw.line,
            raw.character,
            request.linter_tab_width,
            request.editor_tab_width,
        );

        items.push(ReportItem::error(
            zero_based(raw.line),
            zero_based(character),
            raw.reason.unwrap_or_default(),
            raw.evidence.unwrap_or_default(),
        ));
    }

    for entry in list(result, "unused") {
        let Some(raw) = decode::<RawUnused>(entry) else {
            trace!("Skipping malformed unused entry: {}", entry);
            continue;
        };

        items.push(ReportItem::unused_variable(
            zero_based(raw.line),
            raw.name.unwrap_or_default(),
            raw.function.unwrap_or_default(),
        ));
    }

    items
}

/// Entries of `result[key]`, or nothing when it is not an array.
fn list<'a>(result: &'a Value, key: &str) -> &'a [Value] {
    result
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn decode<'de, T: Deserialize<'de>>(entry: &'de Value) -> Option<T> {
    if !entry.is_object() {
        return None;
    }
    T::deserialize(entry).ok()
}

/// Converts a 1-based position to 0-based, clamping at 0.
fn zero_based(value: i64) -> u64 {
    value.saturating_sub(1).max(0).unsigned_abs()
}
