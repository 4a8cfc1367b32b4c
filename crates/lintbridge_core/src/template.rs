//! Undefined-variable message templates.
//!
//! Linters report undefined variables with an interpolated message such as
//! `'%s' is not defined.`. Matching a reason against the template recovers
//! the variable name without the linter exposing it as a field.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder marking where the variable name is substituted.
pub const PLACEHOLDER: &str = "%s";

/// A message template with a single `%s` placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UndefVarTemplate(String);

impl UndefVarTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `(prefix, suffix)` around the first placeholder.
    fn split(&self) -> Option<(&str, &str)> {
        let at = self.0.find(PLACEHOLDER)?;
        Some((&self.0[..at], &self.0[at + PLACEHOLDER.len()..]))
    }

    /// Extracts the variable name from `reason`.
    ///
    /// Returns `None` when the reason does not start with the template's
    /// prefix and end with its suffix, when the two would overlap, when the
    /// name is empty, or when the template has no placeholder.
    pub fn extract<'a>(&self, reason: &'a str) -> Option<&'a str> {
        let (prefix, suffix) = self.split()?;

        if reason.len() < prefix.len() + suffix.len() {
            return None;
        }
        if !reason.starts_with(prefix) || !reason.ends_with(suffix) {
            return None;
        }

        let name = &reason[prefix.len()..reason.len() - suffix.len()];
        (!name.is_empty()).then_some(name)
    }
}

impl fmt::Display for UndefVarTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
