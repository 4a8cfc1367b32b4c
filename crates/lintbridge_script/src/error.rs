//! Script runtime error types.

use thiserror::Error;

/// Errors that can occur while running a script in the sandbox.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    /// The source text could not be parsed.
    #[error("Failed to compile script: {0}")]
    Compile(String),

    /// The script threw, or ran past its execution budget.
    #[error("Script execution failed: {0}")]
    Runtime(String),

    /// The completion value could not be converted to JSON.
    #[error("Failed to convert script value: {0}")]
    Conversion(String),
}

impl ScriptError {
    /// Creates a compile error.
    pub fn compile(message: impl Into<String>) -> Self {
        Self::Compile(message.into())
    }

    /// Creates a runtime error.
    pub fn runtime(message: impl Into<String>) -> Self {
        Self::Runtime(message.into())
    }

    /// Creates a conversion error.
    pub fn conversion(message: impl Into<String>) -> Self {
        Self::Conversion(message.into())
    }

    /// Returns `true` if the script never got as far as executing.
    pub fn is_compile(&self) -> bool {
        matches!(self, Self::Compile(_))
    }
}
