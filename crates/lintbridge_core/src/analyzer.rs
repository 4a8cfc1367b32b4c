//! Linter invocation.
//!
//! An analysis runs entirely inside one fresh sandbox:
//!
//! 1. the linter script is executed to install its global object,
//! 2. the source text is bound as the global `script`,
//! 3. the options literal is assigned to the global `options`,
//! 4. the linter's entry point is called and its `data()` result is read,
//! 5. the result is converted into report items.

use lintbridge_script::{RuntimeFactory, Sandbox, ScriptRuntime};
use serde_json::Value;
use tracing::{debug, info};

use crate::extract::extract;
use crate::source::{ScriptProvider, ScriptSourceDescriptor};
use crate::{LintError, ReportItem};

#[cfg(feature = "boa")]
use lintbridge_script::BoaFactory;

/// Tab width assumed when none is configured.
pub const DEFAULT_TAB_WIDTH: u32 = 4;

/// Input of a single analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    /// Options as JavaScript object literal text.
    pub options: String,
    /// Text to analyze.
    pub source: String,
    /// Tab width of the editor.
    pub editor_tab_width: u32,
    /// Tab width the linter assumes.
    pub linter_tab_width: u32,
}

impl AnalysisRequest {
    pub fn new(options: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            options: options.into(),
            source: source.into(),
            editor_tab_width: DEFAULT_TAB_WIDTH,
            linter_tab_width: DEFAULT_TAB_WIDTH,
        }
    }

    pub fn with_editor_tab_width(mut self, width: u32) -> Self {
        self.editor_tab_width = width;
        self
    }

    pub fn with_linter_tab_width(mut self, width: u32) -> Self {
        self.linter_tab_width = width;
        self
    }
}

/// Runs linter scripts against source text.
pub struct Analyzer<F, P> {
    sandbox: Sandbox<F>,
    provider: P,
    descriptor: ScriptSourceDescriptor,
}

/// Analyzer backed by the Boa engine.
#[cfg(feature = "boa")]
pub type BoaAnalyzer<P = crate::ScriptSources> = Analyzer<BoaFactory, P>;

impl<F, P> Analyzer<F, P>
where
    F: RuntimeFactory,
    P: ScriptProvider,
{
    /// Creates an analyzer running the script described by `descriptor`.
    pub fn new(sandbox: Sandbox<F>, provider: P, descriptor: ScriptSourceDescriptor) -> Self {
        Self {
            sandbox,
            provider,
            descriptor,
        }
    }

    /// Returns the configured script descriptor.
    pub fn descriptor(&self) -> &ScriptSourceDescriptor {
        &self.descriptor
    }

    /// Returns the script provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Analyzes `source_text` with the configured linter.
    pub fn check_script(
        &self,
        options_text: &str,
        source_text: &str,
        editor_tab_width: u32,
        linter_tab_width: u32,
    ) -> Result<Vec<ReportItem>, LintError> {
        let request = AnalysisRequest::new(options_text, source_text)
            .with_editor_tab_width(editor_tab_width)
            .with_linter_tab_width(linter_tab_width);

        self.analyze(&request, &self.descriptor)
    }

    /// Analyzes `request` with the linter described by `descriptor`.
    ///
    /// Findings are returned errors first, then unused variables, each in
    /// the order the linter reported them.
    pub fn analyze(
        &self,
        request: &AnalysisRequest,
        descriptor: &ScriptSourceDescriptor,
    ) -> Result<Vec<ReportItem>, LintError> {
        let script = self.provider.load(descriptor)?;
        if script.is_empty() {
            return Err(LintError::missing_script(format!(
                "{} script is empty",
                descriptor.linter
            )));
        }

        let namespace = descriptor.namespace();
        debug!(
            "Running {} ({} bytes of script) on {} bytes of source",
            descriptor.linter,
            script.len(),
            request.source.len()
        );

        let data = self.sandbox.with_fresh_runtime(|runtime| {
            invoke(runtime, &script, namespace, request)
        })?;

        let items = extract(&data, request);
        info!("{} reported {} finding(s)", descriptor.linter, items.len());

        Ok(items)
    }
}

fn invoke<R: ScriptRuntime>(
    runtime: &mut R,
    script: &str,
    namespace: &str,
    request: &AnalysisRequest,
) -> Result<Value, LintError> {
    runtime
        .run(script)
        .map_err(|e| LintError::from_script(e, LintError::InvalidScript))?;
    debug!("Installed linter global {}", namespace);

    runtime.bind_string("script", &request.source)?;

    runtime
        .run(&format!("options = {};", request.options))
        .map_err(|e| LintError::from_script(e, LintError::InvalidOptions))?;
    debug!("Evaluated options {}", request.options);

    runtime
        .run(&format!("{}(script, options);", namespace))
        .map_err(LintError::unexpected_linter)?;

    let data = runtime
        .evaluate_json(&format!("{}.data();", namespace))
        .map_err(LintError::unexpected_linter)?;
    debug!("Retrieved {}.data()", namespace);

    Ok(data)
}
