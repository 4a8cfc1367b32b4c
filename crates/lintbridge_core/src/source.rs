//! Linter script sources.
//!
//! A `ScriptSourceDescriptor` says which linter to run and where its script
//! comes from. A `ScriptProvider` turns a descriptor into script text:
//! either a script bundled with the host, or a copy downloaded earlier into
//! a scripts directory laid out as `<root>/<linter>/<version>.js`.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{LintError, UndefVarTemplate};

/// Supported linters.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Linter {
    #[default]
    JsLint,
    JsHint,
}

impl Linter {
    /// Identifier used in configuration and directory names.
    pub fn id(self) -> &'static str {
        match self {
            Linter::JsLint => "jslint",
            Linter::JsHint => "jshint",
        }
    }

    /// Global object exposing the analysis function and `data()`.
    pub fn namespace(self) -> &'static str {
        match self {
            Linter::JsLint => "JSLINT",
            Linter::JsHint => "JSHINT",
        }
    }

    /// Message the linter's bundled script uses for undefined variables.
    pub fn default_undef_var_template(self) -> UndefVarTemplate {
        match self {
            Linter::JsLint => UndefVarTemplate::new("'%s' was used before it was defined."),
            Linter::JsHint => UndefVarTemplate::new("'%s' is not defined."),
        }
    }
}

impl fmt::Display for Linter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Linter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jslint" => Ok(Linter::JsLint),
            "jshint" => Ok(Linter::JsHint),
            other => Err(format!("unknown linter '{}' (expected jslint or jshint)", other)),
        }
    }
}

/// Where the linter script comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptSourceMode {
    /// The script bundled with the host.
    #[default]
    Builtin,
    /// A previously downloaded version.
    Downloaded(String),
}

/// Identifies the linter script to run and how to talk to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptSourceDescriptor {
    pub linter: Linter,
    pub mode: ScriptSourceMode,
    /// Overrides the linter's default namespace.
    pub namespace: Option<String>,
    /// Undefined-variable message of a downloaded script.
    pub undef_var_template: Option<UndefVarTemplate>,
    /// Whether `undef_var_template` was set deliberately.
    pub spec_undef_var_template: bool,
}

impl ScriptSourceDescriptor {
    /// Describes the bundled script of `linter`.
    pub fn new(linter: Linter) -> Self {
        Self {
            linter,
            ..Self::default()
        }
    }

    pub fn with_mode(mut self, mode: ScriptSourceMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Declares a deliberate undefined-variable message override.
    pub fn with_undef_var_template(mut self, template: UndefVarTemplate) -> Self {
        self.undef_var_template = Some(template);
        self.spec_undef_var_template = true;
        self
    }

    /// Global object the invocation statements are built from.
    pub fn namespace(&self) -> &str {
        self.namespace
            .as_deref()
            .unwrap_or_else(|| self.linter.namespace())
    }

    /// Template used to recover undefined variable names.
    ///
    /// The override only applies to downloaded scripts; a bundled script
    /// always produces the linter's default message.
    pub fn undef_var_template(&self) -> UndefVarTemplate {
        match (&self.mode, self.spec_undef_var_template, &self.undef_var_template) {
            (ScriptSourceMode::Downloaded(_), true, Some(template)) => template.clone(),
            _ => self.linter.default_undef_var_template(),
        }
    }
}

/// Supplies linter script text for a descriptor.
pub trait ScriptProvider {
    /// Returns the script text, or an error when it is unavailable.
    fn load(&self, descriptor: &ScriptSourceDescriptor) -> Result<String, LintError>;
}

/// Scripts registered by the host, keyed by linter.
#[derive(Debug, Clone, Default)]
pub struct BundledScripts {
    scripts: HashMap<Linter, String>,
}

impl BundledScripts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the script text for `linter`.
    pub fn with_script(mut self, linter: Linter, script: impl Into<String>) -> Self {
        self.insert(linter, script);
        self
    }

    pub fn insert(&mut self, linter: Linter, script: impl Into<String>) {
        self.scripts.insert(linter, script.into());
    }

    /// Registers the contents of `path` as the script for `linter`.
    pub fn insert_file(&mut self, linter: Linter, path: &Path) -> Result<(), LintError> {
        let script = fs::read_to_string(path).map_err(|e| {
            LintError::resource_load(format!("{}: {}", path.display(), e))
        })?;
        self.insert(linter, script);
        Ok(())
    }

    pub fn contains(&self, linter: Linter) -> bool {
        self.scripts.contains_key(&linter)
    }
}

impl ScriptProvider for BundledScripts {
    fn load(&self, descriptor: &ScriptSourceDescriptor) -> Result<String, LintError> {
        let script = self.scripts.get(&descriptor.linter).ok_or_else(|| {
            LintError::resource_load(format!("no bundled script for {}", descriptor.linter))
        })?;

        if script.trim().is_empty() {
            return Err(LintError::missing_script(format!(
                "bundled {} script is empty",
                descriptor.linter
            )));
        }

        Ok(script.clone())
    }
}

/// Previously downloaded scripts stored on disk.
#[derive(Debug, Clone)]
pub struct DownloadedScripts {
    root: PathBuf,
}

impl DownloadedScripts {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of `version` of `linter`'s script.
    pub fn path_for(&self, linter: Linter, version: &str) -> Result<PathBuf, LintError> {
        if !is_safe_version(version) {
            return Err(LintError::missing_script(format!(
                "invalid {} version '{}'",
                linter, version
            )));
        }
        Ok(self.root.join(linter.id()).join(format!("{}.js", version)))
    }

    /// Versions of `linter` present on disk, sorted.
    pub fn versions(&self, linter: Linter) -> Result<Vec<String>, LintError> {
        let dir = self.root.join(linter.id());
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut versions = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "js")
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                versions.push(stem.to_string());
            }
        }
        versions.sort();
        Ok(versions)
    }
}

fn is_safe_version(version: &str) -> bool {
    !version.is_empty()
        && version != "."
        && version != ".."
        && !version.contains(['/', '\\'])
}

impl ScriptProvider for DownloadedScripts {
    fn load(&self, descriptor: &ScriptSourceDescriptor) -> Result<String, LintError> {
        let ScriptSourceMode::Downloaded(version) = &descriptor.mode else {
            return Err(LintError::missing_script(format!(
                "no downloaded {} version selected",
                descriptor.linter
            )));
        };

        let path = self.path_for(descriptor.linter, version)?;
        debug!("Loading downloaded script from {}", path.display());

        let script = fs::read_to_string(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => LintError::missing_script(format!(
                "{} {} has not been downloaded",
                descriptor.linter, version
            )),
            _ => LintError::missing_script(format!("{}: {}", path.display(), e)),
        })?;

        if script.trim().is_empty() {
            return Err(LintError::missing_script(format!(
                "{} is empty",
                path.display()
            )));
        }

        Ok(script)
    }
}

/// Dispatches on the descriptor's source mode.
#[derive(Debug, Clone, Default)]
pub struct ScriptSources {
    pub bundled: BundledScripts,
    pub downloaded: Option<DownloadedScripts>,
}

impl ScriptProvider for ScriptSources {
    fn load(&self, descriptor: &ScriptSourceDescriptor) -> Result<String, LintError> {
        match (&descriptor.mode, &self.downloaded) {
            (ScriptSourceMode::Builtin, _) => self.bundled.load(descriptor),
            (ScriptSourceMode::Downloaded(_), Some(downloaded)) => downloaded.load(descriptor),
            (ScriptSourceMode::Downloaded(version), None) => Err(LintError::missing_script(
                format!("no scripts directory configured for {} {}", descriptor.linter, version),
            )),
        }
    }
}
