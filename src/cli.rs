use std::path::PathBuf;

use clap::Parser;

use crate::executor::{DEFAULT_PYTHON, DEFAULT_SHELLCHECK};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "codecheck")]
#[command(author, version, about = "Run Python and shell checks over a repository in parallel")]
#[command(long_about = "Plans type, syntax, style, doctest, import, unit-test and shell-lint \
    checks for the files of a repository and runs them concurrently.\n\n\
    Exit codes:\n  \
    0 - All checks passed\n  \
    1 - Some checks failed, or a configuration or runtime error occurred")]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Files to check (default: tracked files under the root)
    pub files: Vec<PathBuf>,

    /// Project root directory
    #[arg(short = 'C', long, default_value = ".")]
    pub root: PathBuf,

    /// Path to configuration file (default: <root>/codecheck.toml if present)
    #[arg(short, long, conflicts_with = "no_config")]
    pub config: Option<PathBuf>,

    /// Skip loading configuration file
    #[arg(long)]
    pub no_config: bool,

    /// Only check files whose base name matches *PATTERN*
    #[arg(short = 'f', long, value_name = "PATTERN")]
    pub file_pattern: Option<String>,

    /// Number of checks to run in parallel (default: available parallelism)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Python interpreter used to run Python checks
    #[arg(long, default_value = DEFAULT_PYTHON)]
    pub python: String,

    /// Shell linter executable
    #[arg(long, default_value = DEFAULT_SHELLCHECK)]
    pub shellcheck: String,

    /// Output format [possible values: text, json]
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,

    /// Attach diagnostics to check results and enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Hide the progress bar
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
