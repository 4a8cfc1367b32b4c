//! Sandbox for running untrusted scripts.
//!
//! This module provides the `Sandbox` which creates a fresh runtime for
//! every call using the configured factory, and tears it down before
//! returning.

use tracing::debug;

use crate::fpu::FpuGuard;
use crate::runtime::{RuntimeFactory, SandboxLimits, ScriptRuntime};
use crate::ScriptError;

#[cfg(feature = "boa")]
use crate::runtime_boa::BoaFactory;

/// Hands out one isolated runtime per call.
///
/// # Example
///
/// ```rust,ignore
/// use lintbridge_script::{Sandbox, ScriptRuntime};
///
/// let sandbox = Sandbox::default();
/// let data = sandbox.with_fresh_runtime(|runtime| {
///     runtime.bind_string("script", "var a = 1;")?;
///     runtime.run(&linter_source)?;
///     runtime.evaluate_json("JSLINT.data();")
/// })?;
/// ```
#[derive(Debug, Clone)]
pub struct Sandbox<F> {
    /// Creates the runtimes.
    factory: F,
    /// Execution budget applied to each runtime.
    limits: SandboxLimits,
}

impl<F: RuntimeFactory> Sandbox<F> {
    /// Creates a sandbox with default limits.
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            limits: SandboxLimits::default(),
        }
    }

    /// Sets the execution budget.
    pub fn with_limits(mut self, limits: SandboxLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Returns the execution budget.
    pub fn limits(&self) -> &SandboxLimits {
        &self.limits
    }

    /// Returns the runtime factory.
    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Runs `f` against a runtime that no other call has seen.
    ///
    /// Floating-point exceptions are masked before the runtime is created
    /// and restored after it is dropped, on both success and failure.
    pub fn with_fresh_runtime<T, E>(
        &self,
        f: impl FnOnce(&mut F::Runtime) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<ScriptError>,
    {
        let _fpu = FpuGuard::acquire();

        let mut runtime = self.factory.create(&self.limits)?;
        debug!("Created fresh script runtime");

        let result = f(&mut runtime);
        drop(runtime);

        debug!("Disposed script runtime");
        result
    }

    /// Binds `bindings` as global strings, runs `script` and returns its
    /// completion value.
    pub fn run_in_fresh_sandbox(
        &self,
        script: &str,
        bindings: &[(&str, &str)],
    ) -> Result<serde_json::Value, ScriptError> {
        self.with_fresh_runtime(|runtime| {
            for (name, value) in bindings {
                runtime.bind_string(name, value)?;
            }
            runtime.evaluate_json(script)
        })
    }
}

#[cfg(feature = "boa")]
impl Default for Sandbox<BoaFactory> {
    fn default() -> Self {
        Self::new(BoaFactory)
    }
}
