//! Turning a work item into a finished child process.

mod command;
pub mod search_path;

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicUsize, Ordering};

use tempfile::TempDir;
use tracing::debug;

use crate::config::Config;
use crate::error::{CodecheckError, Result};
use crate::planner::WorkItem;
use crate::result::CheckResult;

pub use command::{
    CommandBuilder, CommandSpec, DEFAULT_PYTHON, DEFAULT_SHELLCHECK, Toolchain,
};

/// Exit code recorded when the child was terminated without one (e.g. by a signal).
pub const NO_EXIT_CODE: i32 = -1;

/// Runs one check.
///
/// A tool that runs and exits nonzero is an `Ok` result. An `Err` means the check
/// could not be run at all; the runner turns it into a failure entry.
pub trait CheckExecutor: Sync {
    /// # Errors
    /// Returns an error if the command cannot be built or the process cannot be started.
    fn execute(&self, item: &WorkItem) -> Result<CheckResult>;
}

/// Executes checks as blocking child processes.
pub struct ProcessExecutor<'a> {
    root: &'a Path,
    builder: CommandBuilder<'a>,
    verbose: bool,
    cache_root: TempDir,
    cache_counter: AtomicUsize,
}

impl<'a> ProcessExecutor<'a> {
    /// # Errors
    /// Returns an error if the temporary cache directory cannot be created.
    pub fn new(root: &'a Path, config: &'a Config, tools: &'a Toolchain) -> Result<Self> {
        let builder = CommandBuilder::new(root, config, tools, search_path::inherited_entries());
        let cache_root = tempfile::Builder::new().prefix("codecheck-").tempdir()?;
        Ok(Self {
            root,
            builder,
            verbose: false,
            cache_root,
            cache_counter: AtomicUsize::new(0),
        })
    }

    /// Attach resolved module names and search path additions to results.
    #[must_use]
    pub const fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn next_cache_dir(&self) -> PathBuf {
        let n = self.cache_counter.fetch_add(1, Ordering::Relaxed);
        self.cache_root.path().join(format!("mypy-{n}"))
    }
}

impl CheckExecutor for ProcessExecutor<'_> {
    fn execute(&self, item: &WorkItem) -> Result<CheckResult> {
        let spec = self.builder.build(item, &self.next_cache_dir())?;
        let Some((program, rest)) = spec.args.split_first() else {
            return Err(CodecheckError::Config(format!(
                "Empty command for {}",
                item.check_type
            )));
        };

        debug!(check = %item.check_type, command = ?spec.args, "starting check");
        let output = Command::new(program)
            .args(rest)
            .envs(spec.env.iter().map(|(key, value)| (*key, value)))
            .current_dir(self.root)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| CodecheckError::Launch {
                program: program.clone(),
                source,
            })?;

        let return_code = output.status.code().unwrap_or(NO_EXIT_CODE);
        debug!(check = %item.check_type, file = %item.file_path.display(), return_code, "check finished");

        let extra_messages = if self.verbose {
            spec.extra_messages
        } else {
            Vec::new()
        };
        Ok(CheckResult::new(
            item.check_type,
            item.file_path.clone(),
            spec.args,
            return_code,
        )
        .with_output(
            String::from_utf8_lossy(&output.stdout).into_owned(),
            String::from_utf8_lossy(&output.stderr).into_owned(),
        )
        .with_extra_messages(extra_messages))
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
