//! Bridge configuration.

use std::fs;
use std::path::{Path, PathBuf};

use jsonc_parser::ParseOptions;
use lintbridge_script::SandboxLimits;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::analyzer::DEFAULT_TAB_WIDTH;
use crate::source::{
    BundledScripts, DownloadedScripts, Linter, ScriptSourceDescriptor, ScriptSourceMode,
    ScriptSources,
};
use crate::{AnalysisRequest, LintError, UndefVarTemplate};

/// Configuration file names, in lookup order.
pub const CONFIG_FILE_NAMES: [&str; 2] = [".lintbridge.jsonc", ".lintbridge.json"];

/// Configuration for running a linter script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LintBridgeConfig {
    /// Linter to run.
    pub linter: Linter,

    /// Bundled script or a downloaded version.
    pub script_source: ScriptSourceMode,

    /// Overrides the linter's global object name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Undefined-variable message of a downloaded script.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub undef_var_template: Option<UndefVarTemplate>,

    /// Whether `undef_var_template` applies.
    pub spec_undef_var_template: bool,

    /// Linter options, rendered as an object literal.
    pub options: Map<String, Value>,

    /// Raw JavaScript property list appended to the options literal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_options: Option<String>,

    /// Tab width of the editor displaying the results.
    pub editor_tab_width: u32,

    /// Tab width the linter assumes when reporting columns.
    pub linter_tab_width: u32,

    /// Script file registered as the bundled script.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundled_script: Option<PathBuf>,

    /// Directory holding downloaded scripts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scripts_dir: Option<PathBuf>,

    /// Execution budget of each sandbox.
    pub limits: SandboxLimits,

    /// Directory containing the configuration file.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl Default for LintBridgeConfig {
    fn default() -> Self {
        Self {
            linter: Linter::default(),
            script_source: ScriptSourceMode::default(),
            namespace: None,
            undef_var_template: None,
            spec_undef_var_template: false,
            options: Map::new(),
            additional_options: None,
            editor_tab_width: DEFAULT_TAB_WIDTH,
            linter_tab_width: DEFAULT_TAB_WIDTH,
            bundled_script: None,
            scripts_dir: None,
            limits: SandboxLimits::default(),
            base_dir: None,
        }
    }
}

impl LintBridgeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file.
    ///
    /// Supports `.lintbridge.jsonc` and `.lintbridge.json`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LintError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            LintError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let mut config = Self::from_jsonc(&content)?;
        config.base_dir = path.parent().map(Path::to_path_buf);

        Ok(config)
    }

    /// Parses configuration from JSON with comments and trailing commas.
    pub fn from_jsonc(text: &str) -> Result<Self, LintError> {
        let value = jsonc_parser::parse_to_serde_value(text, &ParseOptions::default())
            .map_err(|e| LintError::config(format!("Invalid JSON: {}", e)))?
            .unwrap_or_else(|| Value::Object(Map::new()));

        let config: Self = serde_json::from_value(value)
            .map_err(|e| LintError::config(format!("Invalid config: {}", e)))?;
        config.validate()?;

        Ok(config)
    }

    /// Finds the nearest configuration file in `dir` or its ancestors.
    pub fn discover(dir: impl AsRef<Path>) -> Option<PathBuf> {
        dir.as_ref().ancestors().find_map(|ancestor| {
            CONFIG_FILE_NAMES
                .iter()
                .map(|name| ancestor.join(name))
                .find(|candidate| candidate.is_file())
        })
    }

    fn validate(&self) -> Result<(), LintError> {
        if self.editor_tab_width == 0 {
            return Err(LintError::config("editor_tab_width must be at least 1"));
        }
        if self.linter_tab_width == 0 {
            return Err(LintError::config("linter_tab_width must be at least 1"));
        }
        if self.namespace.as_deref().is_some_and(str::is_empty) {
            return Err(LintError::config("namespace must not be empty"));
        }
        Ok(())
    }

    /// Renders the options as a JavaScript object literal.
    pub fn options_text(&self) -> String {
        let mut properties: Vec<String> = self
            .options
            .iter()
            .map(|(key, value)| format!("{}: {}", Value::String(key.clone()), value))
            .collect();

        if let Some(additional) = self.additional_options.as_deref().map(str::trim)
            && !additional.is_empty()
        {
            properties.push(additional.to_string());
        }

        format!("{{{}}}", properties.join(", "))
    }

    /// Describes the configured linter script.
    pub fn descriptor(&self) -> ScriptSourceDescriptor {
        ScriptSourceDescriptor {
            linter: self.linter,
            mode: self.script_source.clone(),
            namespace: self.namespace.clone(),
            undef_var_template: self.undef_var_template.clone(),
            spec_undef_var_template: self.spec_undef_var_template,
        }
    }

    /// Builds a request for `source` with the configured options and widths.
    pub fn request(&self, source: impl Into<String>) -> AnalysisRequest {
        AnalysisRequest::new(self.options_text(), source)
            .with_editor_tab_width(self.editor_tab_width)
            .with_linter_tab_width(self.linter_tab_width)
    }

    /// Builds the script providers named by `bundled_script` and `scripts_dir`.
    pub fn script_sources(&self) -> Result<ScriptSources, LintError> {
        let mut bundled = BundledScripts::new();
        if let Some(path) = &self.bundled_script {
            bundled.insert_file(self.linter, &self.resolve_path(path))?;
        }

        let downloaded = self
            .scripts_dir
            .as_deref()
            .map(|dir| DownloadedScripts::new(self.resolve_path(dir)));

        Ok(ScriptSources {
            bundled,
            downloaded,
        })
    }

    /// Resolves `path` against the configuration file's directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = LintBridgeConfig::new();
        assert_eq!(config.linter, Linter::JsLint);
        assert_eq!(config.script_source, ScriptSourceMode::Builtin);
        assert_eq!(config.editor_tab_width, 4);
        assert_eq!(config.linter_tab_width, 4);
        assert_eq!(config.options_text(), "{}");
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(
            LintBridgeConfig::from_jsonc("").unwrap(),
            LintBridgeConfig::default()
        );
        assert_eq!(
            LintBridgeConfig::from_jsonc("{}").unwrap(),
            LintBridgeConfig::default()
        );
    }

    #[test]
    fn test_config_from_jsonc() {
        let text = r#"{
            // JSHint from the scripts directory
            "linter": "jshint",
            "script_source": { "downloaded": "2.1.10" },
            "undef_var_template": "Undefined: %s",
            "spec_undef_var_template": true,
            "options": { "browser": true, "maxlen": 80 },
            "additional_options": "predef: ['$']",
            "editor_tab_width": 2,
            "linter_tab_width": 8,
            "scripts_dir": "scripts",
            "limits": { "recursion_limit": 64 },
        }"#;

        let config = LintBridgeConfig::from_jsonc(text).unwrap();

        assert_eq!(config.linter, Linter::JsHint);
        assert_eq!(
            config.script_source,
            ScriptSourceMode::Downloaded("2.1.10".to_string())
        );
        assert_eq!(config.editor_tab_width, 2);
        assert_eq!(config.linter_tab_width, 8);
        assert_eq!(config.limits.recursion_limit, 64);
        assert_eq!(
            config.limits.loop_iteration_limit,
            SandboxLimits::default().loop_iteration_limit
        );
        assert_eq!(
            config.options_text(),
            r#"{"browser": true, "maxlen": 80, predef: ['$']}"#
        );
    }

    #[test]
    fn test_descriptor() {
        let config = LintBridgeConfig {
            linter: Linter::JsHint,
            script_source: ScriptSourceMode::Downloaded("r1".to_string()),
            undef_var_template: Some(UndefVarTemplate::new("Undefined: %s")),
            spec_undef_var_template: true,
            ..LintBridgeConfig::default()
        };

        let descriptor = config.descriptor();
        assert_eq!(descriptor.namespace(), "JSHINT");
        assert_eq!(
            descriptor.undef_var_template(),
            UndefVarTemplate::new("Undefined: %s")
        );
    }

    #[test]
    fn test_request() {
        let config = LintBridgeConfig {
            editor_tab_width: 1,
            additional_options: Some("  ".to_string()),
            ..LintBridgeConfig::default()
        };

        let request = config.request("\tx;");
        assert_eq!(request.options, "{}");
        assert_eq!(request.source, "\tx;");
        assert_eq!(request.editor_tab_width, 1);
        assert_eq!(request.linter_tab_width, 4);
    }

    #[rstest]
    #[case(r#"{ "editor_tab_width": 0 }"#, "editor_tab_width")]
    #[case(r#"{ "linter_tab_width": 0 }"#, "linter_tab_width")]
    #[case(r#"{ "namespace": "" }"#, "namespace")]
    #[case(r#"{ "linter": "eslint" }"#, "Invalid config")]
    #[case(r#"{ "tab_width": 4 }"#, "Invalid config")]
    #[case(r#"{ "options": [] }"#, "Invalid config")]
    #[case(r#"{ "linter": "#, "Invalid JSON")]
    fn test_config_validation_errors(#[case] text: &str, #[case] expected: &str) {
        let err = LintBridgeConfig::from_jsonc(text).unwrap_err();
        assert!(matches!(err, LintError::Config(_)));
        assert!(
            err.to_string().contains(expected),
            "'{}' does not mention '{}'",
            err,
            expected
        );
    }

    #[test]
    fn test_from_file_sets_base_dir() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".lintbridge.json");
        fs::write(&path, r#"{ "bundled_script": "vendor/jslint.js" }"#).unwrap();

        let config = LintBridgeConfig::from_file(&path).unwrap();

        assert_eq!(config.base_dir.as_deref(), Some(dir.path()));
        assert_eq!(
            config.resolve_path(Path::new("vendor/jslint.js")),
            dir.path().join("vendor/jslint.js")
        );
        assert_eq!(
            config.resolve_path(Path::new("/abs/jslint.js")),
            PathBuf::from("/abs/jslint.js")
        );
    }

    #[test]
    fn test_script_sources() {
        use crate::source::ScriptProvider;

        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("jshint.js"), "var JSHINT;").unwrap();
        fs::create_dir_all(dir.path().join("scripts/jshint")).unwrap();
        fs::write(dir.path().join("scripts/jshint/2.0.js"), "var JSHINT = 2;").unwrap();

        let path = dir.path().join(".lintbridge.jsonc");
        fs::write(
            &path,
            r#"{ "linter": "jshint", "bundled_script": "jshint.js", "scripts_dir": "scripts" }"#,
        )
        .unwrap();

        let config = LintBridgeConfig::from_file(&path).unwrap();
        let sources = config.script_sources().unwrap();
        let descriptor = config.descriptor();

        assert_eq!(sources.load(&descriptor).unwrap(), "var JSHINT;");
        assert_eq!(
            sources
                .load(&descriptor.with_mode(ScriptSourceMode::Downloaded("2.0".to_string())))
                .unwrap(),
            "var JSHINT = 2;"
        );
    }

    #[test]
    fn test_script_sources_missing_bundled_file() {
        let config = LintBridgeConfig {
            bundled_script: Some(PathBuf::from("/nonexistent/jslint.js")),
            ..LintBridgeConfig::default()
        };
        assert!(matches!(
            config.script_sources(),
            Err(LintError::ResourceLoad(_))
        ));
    }

    #[test]
    fn test_from_file_missing() {
        let err = LintBridgeConfig::from_file("/nonexistent/.lintbridge.json").unwrap_err();
        assert!(matches!(err, LintError::Config(_)));
    }

    #[test]
    fn test_discover_walks_up() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join(".lintbridge.json"), "{}").unwrap();

        assert_eq!(
            LintBridgeConfig::discover(&nested),
            Some(dir.path().join(".lintbridge.json"))
        );
    }

    #[test]
    fn test_discover_prefers_jsonc() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".lintbridge.json"), "{}").unwrap();
        fs::write(dir.path().join(".lintbridge.jsonc"), "{}").unwrap();

        assert_eq!(
            LintBridgeConfig::discover(dir.path()),
            Some(dir.path().join(".lintbridge.jsonc"))
        );
    }
}
