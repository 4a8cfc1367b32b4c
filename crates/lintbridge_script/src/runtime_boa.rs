//! Boa-based script runtime.
//!
//! This module runs scripts with the Boa JavaScript engine. Every runtime
//! owns its own `Context`, so nothing leaks between analyses.

use boa_engine::property::Attribute;
use boa_engine::vm::RuntimeLimits;
use boa_engine::{Context, JsError, JsString, JsValue, Script, Source, js_string};
use tracing::trace;

use crate::runtime::{RuntimeFactory, SandboxLimits, ScriptRuntime};
use crate::ScriptError;

/// Factory producing [`BoaRuntime`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoaFactory;

impl RuntimeFactory for BoaFactory {
    type Runtime = BoaRuntime;

    fn create(&self, limits: &SandboxLimits) -> Result<BoaRuntime, ScriptError> {
        BoaRuntime::new(limits)
    }
}

/// A single Boa context.
pub struct BoaRuntime {
    context: Context,
}

impl BoaRuntime {
    /// Creates a new context with `limits` applied.
    pub fn new(limits: &SandboxLimits) -> Result<Self, ScriptError> {
        let mut context = Context::builder()
            .build()
            .map_err(|e| ScriptError::runtime(format!("Failed to create context: {}", e)))?;

        let mut runtime_limits = RuntimeLimits::default();
        runtime_limits.set_loop_iteration_limit(limits.loop_iteration_limit);
        runtime_limits.set_recursion_limit(limits.recursion_limit);
        context.set_runtime_limits(runtime_limits);

        Ok(Self { context })
    }

    fn compile(&mut self, source: &str) -> Result<Script, ScriptError> {
        Script::parse(Source::from_bytes(source), None, &mut self.context)
            .map_err(|e| ScriptError::compile(e.to_string()))
    }

    fn execute(&mut self, source: &str) -> Result<JsValue, ScriptError> {
        let script = self.compile(source)?;
        trace!("Evaluating script ({} bytes)", source.len());
        script
            .evaluate(&mut self.context)
            .map_err(|e| runtime_error(&e))
    }

    /// Serializes `value` with the script's own `JSON.stringify`.
    fn stringify(&mut self, value: JsValue) -> Result<Option<String>, ScriptError> {
        let json = self
            .context
            .global_object()
            .get(js_string!("JSON"), &mut self.context)
            .map_err(|e| runtime_error(&e))?;
        let json_object = json
            .as_object()
            .ok_or_else(|| ScriptError::conversion("global JSON object is missing"))?;
        let stringify = json_object
            .get(js_string!("stringify"), &mut self.context)
            .map_err(|e| runtime_error(&e))?;
        let stringify = stringify
            .as_callable()
            .ok_or_else(|| ScriptError::conversion("JSON.stringify is not callable"))?;

        let text = stringify
            .call(&json, &[value], &mut self.context)
            .map_err(|e| ScriptError::conversion(e.to_string()))?;

        if text.is_undefined() {
            return Ok(None);
        }

        let text = text
            .to_string(&mut self.context)
            .map_err(|e| ScriptError::conversion(e.to_string()))?;
        Ok(Some(text.to_std_string_escaped()))
    }
}

fn runtime_error(error: &JsError) -> ScriptError {
    ScriptError::runtime(error.to_string())
}

impl ScriptRuntime for BoaRuntime {
    fn bind_string(&mut self, name: &str, value: &str) -> Result<(), ScriptError> {
        self.context
            .register_global_property(
                JsString::from(name),
                JsString::from(value),
                Attribute::all(),
            )
            .map_err(|e| runtime_error(&e))
    }

    fn run(&mut self, source: &str) -> Result<(), ScriptError> {
        self.execute(source).map(|_| ())
    }

    fn evaluate_json(&mut self, source: &str) -> Result<serde_json::Value, ScriptError> {
        let value = self.execute(source)?;
        match self.stringify(value)? {
            Some(text) => serde_json::from_str(&text)
                .map_err(|e| ScriptError::conversion(format!("Invalid JSON from script: {}", e))),
            None => Ok(serde_json::Value::Null),
        }
    }
}
