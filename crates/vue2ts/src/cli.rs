//! CLI argument parsing.

use camino::Utf8PathBuf;
use clap::{ArgAction, Parser, ValueEnum};

/// Convert Vue 2 Options API components to class components.
#[derive(Debug, Parser)]
#[command(name = "vue2ts")]
#[command(version, about, long_about = None, disable_version_flag = true)]
pub struct Args {
    /// Component file or directory to convert
    #[arg(short, long)]
    pub input: Utf8PathBuf,

    /// Glob patterns to ignore when converting a directory
    #[arg(long)]
    pub ignore: Vec<String>,

    /// Parse scripts with JSX enabled
    #[arg(long)]
    pub jsx: bool,

    /// Print converted components instead of writing them next to the input
    #[arg(long)]
    pub stdout: bool,

    /// Report format
    #[arg(long, value_enum, default_value = "human")]
    pub output: OutputFormat,

    /// Print version
    #[arg(short = 'v', long, action = ArgAction::Version)]
    pub version: Option<bool>,
}

/// Report format options.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output
    Json,
}
