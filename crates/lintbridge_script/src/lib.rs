//! # lintbridge_script
//!
//! Sandboxed JavaScript runtime for lintbridge.
//!
//! This crate provides:
//! - The `ScriptRuntime` capability trait (bind globals, run, evaluate)
//! - A `Sandbox` that hands out one fresh runtime per call
//! - The floating-point exception guard wrapped around every sandbox
//!
//! ## Architecture
//!
//! Linter scripts are untrusted and mutate global state while they run, so
//! every call gets a brand new engine context that is dropped on return.
//! The engine itself sits behind `RuntimeFactory`:
//!
//! - **Boa** (default): pure Rust JavaScript engine
//! - **Fake** (`test-utils`): scripted runtime for testing callers without an engine
//!
//! ## Features
//!
//! - `boa` (default): Enable the Boa backend
//! - `test-utils`: Export the fake runtime used by downstream tests
//!
//! ## Example
//!
//! ```rust,ignore
//! use lintbridge_script::Sandbox;
//!
//! let sandbox = Sandbox::default();
//! let value = sandbox.run_in_fresh_sandbox("input.length;", &[("input", "abc")])?;
//! assert_eq!(value, serde_json::json!(3));
//! ```

mod error;
mod fpu;
mod runtime;
mod sandbox;

#[cfg(feature = "boa")]
mod runtime_boa;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::ScriptError;
pub use fpu::FpuGuard;
pub use runtime::{
    DEFAULT_LOOP_ITERATION_LIMIT, DEFAULT_RECURSION_LIMIT, RuntimeFactory, SandboxLimits,
    ScriptRuntime,
};
pub use sandbox::Sandbox;

#[cfg(feature = "boa")]
pub use runtime_boa::{BoaFactory, BoaRuntime};
