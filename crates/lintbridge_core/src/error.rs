//! Analysis error types.

use lintbridge_script::ScriptError;
use thiserror::Error;

/// Errors that can occur while running a linter script.
#[derive(Debug, Error)]
pub enum LintError {
    /// The script source returned no usable linter script.
    #[error("Cannot run linter: {0}")]
    MissingScript(String),

    /// The linter script itself failed to compile.
    #[error("Invalid linter script: {0}")]
    InvalidScript(String),

    /// The options text is not a valid JavaScript object literal.
    #[error("Invalid linter options (probably an error in additional options): {0}")]
    InvalidOptions(String),

    /// The linter's entry point or `data()` accessor failed, e.g. the
    /// script does not define the expected namespace or the linter threw.
    #[error("Unexpected linter error: {0}")]
    UnexpectedLinter(String),

    /// The script failed while running.
    #[error("Script error: {0}")]
    Script(#[from] ScriptError),

    /// A bundled linter script could not be located.
    #[error("Failed to load bundled script: {0}")]
    ResourceLoad(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LintError {
    /// Creates a missing script error.
    pub fn missing_script(message: impl Into<String>) -> Self {
        Self::MissingScript(message.into())
    }

    /// Creates a resource load error.
    pub fn resource_load(message: impl Into<String>) -> Self {
        Self::ResourceLoad(message.into())
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Maps a compile failure to `on_compile`, passing other failures through.
    pub(crate) fn from_script(error: ScriptError, on_compile: fn(String) -> Self) -> Self {
        match error {
            ScriptError::Compile(message) => on_compile(message),
            other => Self::Script(other),
        }
    }

    /// Maps any compile or runtime failure of the linter call to
    /// `UnexpectedLinter`. Conversion failures pass through.
    pub(crate) fn unexpected_linter(error: ScriptError) -> Self {
        match error {
            ScriptError::Compile(message) | ScriptError::Runtime(message) => {
                Self::UnexpectedLinter(message)
            }
            other => Self::Script(other),
        }
    }
}
