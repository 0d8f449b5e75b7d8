use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::cli::Cli;
use crate::config::{Config, ConfigLoader, FileConfigLoader};
use crate::discovery::discover_files;
use crate::error::{CodecheckError, Result};
use crate::executor::{ProcessExecutor, Toolchain};
use crate::output::{CheckProgress, OutputFormat, Reporter, render_json, render_text};
use crate::planner::{Plan, Planner};
use crate::runner::{RunSummary, Runner};
use crate::{EXIT_FAILURE, EXIT_SUCCESS};

#[must_use]
pub fn run_check(cli: &Cli) -> i32 {
    match run_check_impl(cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_FAILURE
        }
    }
}

pub(crate) fn run_check_impl(cli: &Cli) -> Result<i32> {
    // 1. Resolve the project root
    let root = dunce::canonicalize(&cli.root).map_err(|e| {
        CodecheckError::Discovery(format!(
            "Cannot access project root {}: {e}",
            cli.root.display()
        ))
    })?;
    if !root.is_dir() {
        return Err(CodecheckError::Discovery(format!(
            "Project root is not a directory: {}",
            root.display()
        )));
    }

    // 2. Load configuration
    let config = load_config(&root, cli.config.as_deref(), cli.no_config)?;

    // 3. Collect candidate files
    let files = if cli.files.is_empty() {
        discover_files(&root)?
    } else {
        cli.files
            .iter()
            .map(|f| resolve_cli_path(f))
            .collect::<Result<Vec<_>>>()?
    };
    debug!(count = files.len(), "candidate files");

    // 4. Plan work items
    let plan = Planner::new(&root, &config)
        .with_name_filter(cli.file_pattern.as_deref())?
        .plan(&files)?;
    if let Some(stats) = &plan.name_filter {
        notice(
            cli.format,
            &format!(
                "Filtered {} file paths to {} paths using pattern {}",
                stats.before, stats.after, stats.pattern
            ),
        );
    }
    info!(
        items = plan.len(),
        directories = plan.checks_by_dir.len(),
        "planned checks"
    );

    // 5. Run
    let summary = execute_plan(cli, &root, &config, &plan)?;

    // 6. Summary and verdict
    let output = match cli.format {
        OutputFormat::Text => render_text(&summary),
        OutputFormat::Json => render_json(&summary)?,
    };
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;

    Ok(if summary.success {
        EXIT_SUCCESS
    } else {
        EXIT_FAILURE
    })
}

fn load_config(root: &Path, config_path: Option<&Path>, no_config: bool) -> Result<Config> {
    if no_config {
        return Ok(Config::default());
    }
    let loader = FileConfigLoader::new();
    match config_path {
        Some(path) => loader.load_from_path(&root.join(path)),
        None => loader.load(root),
    }
}

fn execute_plan(cli: &Cli, root: &Path, config: &Config, plan: &Plan) -> Result<RunSummary> {
    let tools = Toolchain {
        python: cli.python.clone(),
        shellcheck: cli.shellcheck.clone(),
    };
    let executor = ProcessExecutor::new(root, config, &tools)?.with_verbose(cli.verbose);

    // Failure blocks go to stderr when stdout carries the JSON document.
    let sink: Box<dyn Write + Send> = match cli.format {
        OutputFormat::Text => Box::new(std::io::stdout()),
        OutputFormat::Json => Box::new(std::io::stderr()),
    };
    let reporter = Reporter::new(sink);
    let progress = CheckProgress::new(plan.len() as u64, cli.quiet);

    Runner::new(root, &executor, &reporter)
        .with_jobs(cli.jobs.unwrap_or(0))
        .with_progress(progress)
        .run(&plan.items)
}

/// Make a command-line path absolute without following a symlink at its last component.
fn resolve_cli_path(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path)?;
    if let (Some(parent), Some(name)) = (absolute.parent(), absolute.file_name())
        && let Ok(parent) = dunce::canonicalize(parent)
    {
        return Ok(parent.join(name));
    }
    Ok(absolute)
}

fn notice(format: OutputFormat, message: &str) {
    match format {
        OutputFormat::Text => println!("{message}"),
        OutputFormat::Json => eprintln!("{message}"),
    }
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
