//! Script runtime abstraction.
//!
//! This module provides the `ScriptRuntime` trait which abstracts
//! the JavaScript engine, allowing the linter driver to run against
//! Boa in production and against a scripted fake in tests.

use serde::{Deserialize, Serialize};

use crate::ScriptError;

/// Default cap on the iterations of any single loop.
pub const DEFAULT_LOOP_ITERATION_LIMIT: u64 = 100_000_000;

/// Default cap on nested function calls.
pub const DEFAULT_RECURSION_LIMIT: usize = 1024;

/// Execution budget applied to every fresh runtime.
///
/// Linter scripts run against untrusted input, so a runaway loop or
/// unbounded recursion must end in an error instead of hanging the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxLimits {
    /// Maximum iterations of a single loop before the script is aborted.
    pub loop_iteration_limit: u64,
    /// Maximum call depth before the script is aborted.
    pub recursion_limit: usize,
}

impl Default for SandboxLimits {
    fn default() -> Self {
        Self {
            loop_iteration_limit: DEFAULT_LOOP_ITERATION_LIMIT,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }
}

/// Trait for a single JavaScript execution context.
///
/// A runtime is created for one analysis and dropped afterwards; it must not
/// share globals or compiled code with any other runtime.
pub trait ScriptRuntime {
    /// Installs a string as a global variable.
    ///
    /// # Arguments
    ///
    /// * `name` - Global variable name
    /// * `value` - String value
    fn bind_string(&mut self, name: &str, value: &str) -> Result<(), ScriptError>;

    /// Compiles and runs `source`, discarding its completion value.
    ///
    /// Parse failures are reported as [`ScriptError::Compile`], uncaught
    /// exceptions as [`ScriptError::Runtime`].
    fn run(&mut self, source: &str) -> Result<(), ScriptError>;

    /// Compiles and runs `source`, returning its completion value as JSON.
    ///
    /// The value goes through `JSON.stringify` semantics: `undefined`
    /// properties are dropped and a bare `undefined` becomes `null`.
    fn evaluate_json(&mut self, source: &str) -> Result<serde_json::Value, ScriptError>;
}

/// Creates fresh runtimes for the sandbox.
pub trait RuntimeFactory {
    /// The runtime type produced by this factory.
    type Runtime: ScriptRuntime;

    /// Creates a new, empty runtime with `limits` applied.
    fn create(&self, limits: &SandboxLimits) -> Result<Self::Runtime, ScriptError>;
}
