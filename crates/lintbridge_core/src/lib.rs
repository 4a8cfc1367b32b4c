//! # lintbridge_core
//!
//! Runs JSLint or JSHint scripts against a text buffer and turns their
//! results into report items in the editor's coordinates.
//!
//! This crate provides:
//! - The `Analyzer` that drives one linter invocation per call
//! - Extraction of the linter's `data()` object into `ReportItem`s
//! - Tab-width column correction
//! - Recovery of undefined variable names from message templates
//! - Script sources and configuration loading
//!
//! ## Example
//!
//! ```rust,ignore
//! use lintbridge_core::{Analyzer, LintBridgeConfig, Sandbox};
//!
//! let config = LintBridgeConfig::from_file(".lintbridge.jsonc")?;
//! let analyzer = Analyzer::new(
//!     Sandbox::default().with_limits(config.limits),
//!     config.script_sources()?,
//!     config.descriptor(),
//! );
//!
//! for item in analyzer.analyze(&config.request(source), analyzer.descriptor())? {
//!     println!("{}:{} {}", item.line() + 1, item.column() + 1, item.primary_text());
//! }
//! ```

mod analyzer;
mod config;
mod error;
mod extract;
mod report;
mod source;
mod tab_width;
mod template;

pub use analyzer::{AnalysisRequest, Analyzer, DEFAULT_TAB_WIDTH};
pub use config::{CONFIG_FILE_NAMES, LintBridgeConfig};
pub use error::LintError;
pub use extract::extract;
pub use report::{ReportItem, ReportKind};
pub use source::{
    BundledScripts, DownloadedScripts, Linter, ScriptProvider, ScriptSourceDescriptor,
    ScriptSourceMode, ScriptSources,
};
pub use tab_width::{correct_column, count_tabs};
pub use template::{PLACEHOLDER, UndefVarTemplate};

pub use lintbridge_script::{Sandbox, SandboxLimits, ScriptError};

#[cfg(feature = "boa")]
pub use analyzer::BoaAnalyzer;
