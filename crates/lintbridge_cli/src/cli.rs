//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use lintbridge_core::Linter;

/// lintbridge - Run JSLint or JSHint on JavaScript files
#[derive(Parser)]
#[command(name = "lintbridge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check files with the configured linter
    Check(CheckArgs),

    /// List downloaded script versions
    Versions {
        /// Linter whose versions to list (default: the configured one)
        #[arg(short, long)]
        linter: Option<Linter>,

        /// Directory holding downloaded scripts
        #[arg(long)]
        scripts_dir: Option<PathBuf>,
    },
}

#[derive(clap::Args)]
pub struct CheckArgs {
    /// Files to check
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Linter to run (jslint, jshint)
    #[arg(short, long)]
    pub linter: Option<Linter>,

    /// Linter options as a JavaScript object literal, e.g. "{browser: true}"
    #[arg(short, long)]
    pub options: Option<String>,

    /// Linter script to use as the bundled script
    #[arg(short, long)]
    pub script: Option<PathBuf>,

    /// Run a downloaded script version instead of the bundled one
    #[arg(long)]
    pub script_version: Option<String>,

    /// Directory holding downloaded scripts
    #[arg(long)]
    pub scripts_dir: Option<PathBuf>,

    /// Tab width of the editor reading the results
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub editor_tab_width: Option<u32>,

    /// Tab width the linter assumes
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub linter_tab_width: Option<u32>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// List the undefined variables found in each file
    #[arg(long)]
    pub undefined_vars: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
