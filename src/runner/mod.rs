//! Bounded-parallel execution of work items and reduction of their results.

mod stats;

use std::any::Any;
use std::io::Write;
use std::num::NonZeroUsize;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, error, warn};

use crate::error::{CodecheckError, Result, error_chain};
use crate::executor::CheckExecutor;
use crate::output::{CheckProgress, Reporter};
use crate::planner::WorkItem;
use crate::result::CheckResult;

pub use stats::{Aggregator, LaunchFailure, Outcome, RunSummary};

/// Worker count used when none is given: the host's available parallelism.
#[must_use]
pub fn default_jobs() -> usize {
    std::thread::available_parallelism().map_or(1, NonZeroUsize::get)
}

/// Drives an executor over all work items with at most `jobs` checks in flight.
pub struct Runner<'a, E: CheckExecutor + ?Sized, W: Write + Send> {
    root: &'a Path,
    executor: &'a E,
    reporter: &'a Reporter<W>,
    progress: CheckProgress,
    jobs: usize,
}

impl<'a, E: CheckExecutor + ?Sized, W: Write + Send> Runner<'a, E, W> {
    #[must_use]
    pub fn new(root: &'a Path, executor: &'a E, reporter: &'a Reporter<W>) -> Self {
        Self {
            root,
            executor,
            reporter,
            progress: CheckProgress::hidden(),
            jobs: default_jobs(),
        }
    }

    /// Zero means "use the default".
    #[must_use]
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = if jobs == 0 { default_jobs() } else { jobs };
        self
    }

    #[must_use]
    pub fn with_progress(mut self, progress: CheckProgress) -> Self {
        self.progress = progress;
        self
    }

    /// Run every item exactly once and return the aggregated statistics.
    ///
    /// Individual check failures, launch errors and panics are contained and counted;
    /// only a failure to create the worker pool is returned as an error.
    ///
    /// # Errors
    /// Returns an error if the thread pool cannot be built.
    pub fn run(&self, items: &[WorkItem]) -> Result<RunSummary> {
        let start = Instant::now();
        let aggregator = Aggregator::new(self.root);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .thread_name(|i| format!("codecheck-worker-{i}"))
            .build()?;
        debug!(jobs = self.jobs, items = items.len(), "running checks");

        pool.install(|| {
            items.par_iter().for_each(|item| {
                let outcome = self.execute_isolated(item);
                self.progress.suspend(|| self.record(&aggregator, item, outcome));
                self.progress.inc();
            });
        });
        self.progress.finish();

        Ok(aggregator.finish(start.elapsed()))
    }

    fn execute_isolated(&self, item: &WorkItem) -> Result<CheckResult> {
        panic::catch_unwind(AssertUnwindSafe(|| self.executor.execute(item)))
            .unwrap_or_else(|payload| Err(CodecheckError::Panicked(panic_message(&*payload))))
    }

    fn record(&self, aggregator: &Aggregator<'_>, item: &WorkItem, outcome: Result<CheckResult>) {
        match outcome {
            Ok(result) => {
                aggregator.record_result(&result);
                if let Err(e) = self.reporter.report(&result) {
                    warn!(error = %e, "failed to write check report");
                }
            }
            Err(err) => {
                let message = error_chain(&err);
                error!(
                    check = %item.check_type,
                    file = %item.file_path.display(),
                    error = %message,
                    "check could not be run"
                );
                if let Err(e) = self.reporter.report_launch_failure(item, &message) {
                    warn!(error = %e, "failed to write check report");
                }
                aggregator.record_launch_failure(item, message);
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
