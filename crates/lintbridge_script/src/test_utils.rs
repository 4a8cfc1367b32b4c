//! Test utilities for lintbridge_script.
//!
//! `FakeFactory` produces runtimes that do not execute anything. Each source
//! string is matched against the configured behaviours (first substring
//! match wins) and every call is recorded per runtime, so tests can check
//! what a caller bound and ran, and in which runtime.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::{RuntimeFactory, SandboxLimits, ScriptError, ScriptRuntime};

/// A call observed by a fake runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeCall {
    Bind { name: String, value: String },
    Run(String),
    Evaluate(String),
}

impl FakeCall {
    /// Shorthand for a `Bind` call.
    pub fn bind(name: &str, value: &str) -> Self {
        Self::Bind {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
enum Behaviour {
    CompileError,
    RuntimeError,
    Respond(serde_json::Value),
}

#[derive(Debug, Default)]
struct Shared {
    sessions: Vec<Vec<FakeCall>>,
    last_limits: Option<SandboxLimits>,
}

/// Factory for scripted fake runtimes.
#[derive(Debug, Clone, Default)]
pub struct FakeFactory {
    behaviours: Vec<(String, Behaviour)>,
    shared: Arc<Mutex<Shared>>,
}

impl FakeFactory {
    /// Creates a factory whose runtimes accept everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails with a compile error for sources containing `needle`.
    pub fn compile_error_on(mut self, needle: &str) -> Self {
        self.behaviours
            .push((needle.to_string(), Behaviour::CompileError));
        self
    }

    /// Fails with a runtime error for sources containing `needle`.
    pub fn runtime_error_on(mut self, needle: &str) -> Self {
        self.behaviours
            .push((needle.to_string(), Behaviour::RuntimeError));
        self
    }

    /// Returns `value` when evaluating sources containing `needle`.
    pub fn respond_with(mut self, needle: &str, value: serde_json::Value) -> Self {
        self.behaviours
            .push((needle.to_string(), Behaviour::Respond(value)));
        self
    }

    /// Calls recorded by each disposed runtime, in creation order.
    pub fn sessions(&self) -> Vec<Vec<FakeCall>> {
        self.shared.lock().sessions.clone()
    }

    /// Limits passed to the most recent `create`.
    pub fn last_limits(&self) -> Option<SandboxLimits> {
        self.shared.lock().last_limits
    }
}

impl RuntimeFactory for FakeFactory {
    type Runtime = FakeRuntime;

    fn create(&self, limits: &SandboxLimits) -> Result<FakeRuntime, ScriptError> {
        self.shared.lock().last_limits = Some(*limits);
        Ok(FakeRuntime {
            behaviours: self.behaviours.clone(),
            calls: Vec::new(),
            shared: Arc::clone(&self.shared),
        })
    }
}

/// Runtime produced by [`FakeFactory`].
///
/// Its recorded calls are handed back to the factory when it is dropped.
#[derive(Debug)]
pub struct FakeRuntime {
    behaviours: Vec<(String, Behaviour)>,
    calls: Vec<FakeCall>,
    shared: Arc<Mutex<Shared>>,
}

impl FakeRuntime {
    fn behaviour(&self, source: &str) -> Option<&Behaviour> {
        self.behaviours
            .iter()
            .find(|(needle, _)| source.contains(needle.as_str()))
            .map(|(_, behaviour)| behaviour)
    }

    fn execute(&self, source: &str) -> Result<serde_json::Value, ScriptError> {
        match self.behaviour(source) {
            Some(Behaviour::CompileError) => Err(ScriptError::compile(format!(
                "SyntaxError: unexpected token in {:?}",
                source
            ))),
            Some(Behaviour::RuntimeError) => {
                Err(ScriptError::runtime(format!("Error: thrown by {:?}", source)))
            }
            Some(Behaviour::Respond(value)) => Ok(value.clone()),
            None => Ok(serde_json::Value::Null),
        }
    }
}

impl ScriptRuntime for FakeRuntime {
    fn bind_string(&mut self, name: &str, value: &str) -> Result<(), ScriptError> {
        self.calls.push(FakeCall::bind(name, value));
        Ok(())
    }

    fn run(&mut self, source: &str) -> Result<(), ScriptError> {
        self.calls.push(FakeCall::Run(source.to_string()));
        self.execute(source).map(|_| ())
    }

    fn evaluate_json(&mut self, source: &str) -> Result<serde_json::Value, ScriptError> {
        self.calls.push(FakeCall::Evaluate(source.to_string()));
        self.execute(source)
    }
}

impl Drop for FakeRuntime {
    fn drop(&mut self) {
        let calls = std::mem::take(&mut self.calls);
        self.shared.lock().sessions.push(calls);
    }
}
