//! Report items produced by an analysis.

use serde::Serialize;

use crate::UndefVarTemplate;

/// Kind of finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    /// A linter error or warning.
    Error,
    /// A variable that is declared but never used.
    UnusedVariable,
}

/// One diagnostic, already in the editor's coordinates.
///
/// Lines and columns are zero-based. Fields are read-only once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ReportItem {
    kind: ReportKind,
    line: u64,
    column: u64,
    primary_text: String,
    secondary_text: String,
}

impl ReportItem {
    /// Creates an error item from the linter's reason and evidence.
    pub fn error(
        line: u64,
        column: u64,
        reason: impl Into<String>,
        evidence: impl Into<String>,
    ) -> Self {
        Self {
            kind: ReportKind::Error,
            line,
            column,
            primary_text: reason.into(),
            secondary_text: evidence.into(),
        }
    }

    /// Creates an unused-variable item. The column is always 0.
    pub fn unused_variable(
        line: u64,
        name: impl Into<String>,
        function: impl Into<String>,
    ) -> Self {
        Self {
            kind: ReportKind::UnusedVariable,
            line,
            column: 0,
            primary_text: name.into(),
            secondary_text: function.into(),
        }
    }

    pub fn kind(&self) -> ReportKind {
        self.kind
    }

    pub fn line(&self) -> u64 {
        self.line
    }

    pub fn column(&self) -> u64 {
        self.column
    }

    /// Reason for errors, variable name for unused variables.
    pub fn primary_text(&self) -> &str {
        &self.primary_text
    }

    /// Evidence for errors, enclosing function for unused variables.
    pub fn secondary_text(&self) -> &str {
        &self.secondary_text
    }

    /// Returns the undefined variable named by this error, if its reason
    /// was produced from `template`.
    ///
    /// Always `None` for unused-variable items.
    pub fn undefined_variable<'a>(&'a self, template: &UndefVarTemplate) -> Option<&'a str> {
        match self.kind {
            ReportKind::Error => template.extract(&self.primary_text),
            ReportKind::UnusedVariable => None,
        }
    }

    /// Returns `true` if this error reports an undefined variable.
    pub fn is_undefined_variable(&self, template: &UndefVarTemplate) -> bool {
        self.undefined_variable(template).is_some()
    }
}
