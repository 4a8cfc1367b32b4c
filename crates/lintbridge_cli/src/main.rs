//! lintbridge CLI
//!
//! Runs JSLint or JSHint scripts against JavaScript files and reports the
//! findings in the editor's coordinates.

mod cli;
mod output;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use miette::{IntoDiagnostic, Result};
use rayon::prelude::*;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use lintbridge_core::{
    Analyzer, BoaAnalyzer, DownloadedScripts, LintBridgeConfig, LintError, Linter, ReportItem,
    Sandbox, ScriptSourceMode,
};

use crate::cli::{CheckArgs, Cli, Commands};
use crate::output::{FileReport, output_reports};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Check(args) => run_check(config, &args),
        Commands::Versions {
            linter,
            scripts_dir,
        } => run_versions(&config, linter, scripts_dir).map(|_| ExitCode::SUCCESS),
    }
}

/// Loads the given configuration file, or the nearest one above the
/// current directory, or the defaults.
fn load_config(path: Option<&Path>) -> Result<LintBridgeConfig> {
    if let Some(path) = path {
        return LintBridgeConfig::from_file(path).into_diagnostic();
    }

    let cwd = std::env::current_dir().into_diagnostic()?;
    match LintBridgeConfig::discover(&cwd) {
        Some(path) => {
            debug!("Using configuration {}", path.display());
            LintBridgeConfig::from_file(&path).into_diagnostic()
        }
        None => Ok(LintBridgeConfig::default()),
    }
}

fn run_check(mut config: LintBridgeConfig, args: &CheckArgs) -> Result<ExitCode> {
    if let Some(linter) = args.linter {
        config.linter = linter;
    }
    if let Some(version) = &args.script_version {
        config.script_source = ScriptSourceMode::Downloaded(version.clone());
    }
    if let Some(width) = args.editor_tab_width {
        config.editor_tab_width = width;
    }
    if let Some(width) = args.linter_tab_width {
        config.linter_tab_width = width;
    }

    let mut sources = config.script_sources().into_diagnostic()?;
    if let Some(script) = &args.script {
        sources
            .bundled
            .insert_file(config.linter, script)
            .into_diagnostic()?;
    }
    if let Some(dir) = &args.scripts_dir {
        sources.downloaded = Some(DownloadedScripts::new(dir));
    }

    if config.script_source == ScriptSourceMode::Builtin && !sources.bundled.contains(config.linter)
    {
        return Err(miette::miette!(
            "No {} script configured. Pass --script or set bundled_script in .lintbridge.jsonc",
            config.linter
        ));
    }

    let options = args
        .options
        .clone()
        .unwrap_or_else(|| config.options_text());
    let descriptor = config.descriptor();
    let analyzer = Analyzer::new(
        Sandbox::default().with_limits(config.limits),
        sources,
        descriptor,
    );

    let reports: Vec<FileReport> = args
        .files
        .par_iter()
        .map(|path| FileReport {
            path: path.clone(),
            result: check_file(&analyzer, &config, &options, path),
        })
        .collect();

    for report in &reports {
        if let Err(e) = &report.result {
            error!("{}: {}", report.path.display(), e);
        }
    }

    let template = args
        .undefined_vars
        .then(|| analyzer.descriptor().undef_var_template());
    let has_findings = output_reports(&reports, args.format, template.as_ref())?;

    let code = if reports.iter().any(|r| r.result.is_err()) {
        ExitCode::from(2)
    } else if has_findings {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    };
    Ok(code)
}

fn check_file(
    analyzer: &BoaAnalyzer,
    config: &LintBridgeConfig,
    options: &str,
    path: &Path,
) -> Result<Vec<ReportItem>, LintError> {
    let source = fs::read_to_string(path)?;
    debug!("Checking {}", path.display());

    analyzer.check_script(
        options,
        &source,
        config.editor_tab_width,
        config.linter_tab_width,
    )
}

fn run_versions(
    config: &LintBridgeConfig,
    linter: Option<Linter>,
    scripts_dir: Option<PathBuf>,
) -> Result<()> {
    let dir = scripts_dir
        .or_else(|| {
            config
                .scripts_dir
                .as_deref()
                .map(|dir| config.resolve_path(dir))
        })
        .ok_or_else(|| {
            miette::miette!("No scripts directory. Pass --scripts-dir or set scripts_dir")
        })?;

    let linter = linter.unwrap_or(config.linter);
    let versions = DownloadedScripts::new(dir)
        .versions(linter)
        .into_diagnostic()?;

    for version in versions {
        println!("{}", version);
    }
    Ok(())
}
