use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use serde::Serialize;

use crate::check_type::CheckType;
use crate::path_utils::relative_dir;
use crate::planner::WorkItem;
use crate::result::CheckResult;

/// Result bucket of a finished work item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Failure,
    Success,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failure => f.write_str("failure"),
            Self::Success => f.write_str("success"),
        }
    }
}

/// A work item whose check could not be run at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchFailure {
    pub check_type: CheckType,
    pub file_path: PathBuf,
    pub message: String,
}

/// Final statistics of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub success: bool,
    pub elapsed_seconds: f64,
    pub checks_by_directory: BTreeMap<String, usize>,
    pub checks_by_type: BTreeMap<CheckType, usize>,
    pub checks_by_result: BTreeMap<Outcome, usize>,
    /// Checks that ran and exited nonzero, sorted by file then check type.
    pub failures: Vec<CheckResult>,
    /// Checks that could not be run, sorted by file then check type.
    pub launch_failures: Vec<LaunchFailure>,
}

impl RunSummary {
    #[must_use]
    pub fn total(&self) -> usize {
        self.checks_by_result.values().sum()
    }

    #[must_use]
    pub fn count(&self, outcome: Outcome) -> usize {
        self.checks_by_result.get(&outcome).copied().unwrap_or(0)
    }
}

#[derive(Debug)]
struct Tally {
    by_dir: BTreeMap<String, usize>,
    by_type: BTreeMap<CheckType, usize>,
    by_result: BTreeMap<Outcome, usize>,
    failures: Vec<CheckResult>,
    launch_failures: Vec<LaunchFailure>,
    success: bool,
}

/// Counters shared by all workers.
///
/// Every update is a plain increment under one lock, so totals do not depend on
/// the order in which checks complete.
#[derive(Debug)]
pub struct Aggregator<'a> {
    root: &'a Path,
    tally: Mutex<Tally>,
}

impl<'a> Aggregator<'a> {
    #[must_use]
    pub const fn new(root: &'a Path) -> Self {
        Self {
            root,
            tally: Mutex::new(Tally {
                by_dir: BTreeMap::new(),
                by_type: BTreeMap::new(),
                by_result: BTreeMap::new(),
                failures: Vec::new(),
                launch_failures: Vec::new(),
                success: true,
            }),
        }
    }

    pub fn record_result(&self, result: &CheckResult) {
        let outcome = if result.is_success() {
            Outcome::Success
        } else {
            Outcome::Failure
        };
        let dir = relative_dir(self.root, result.file_path());
        let mut tally = self.lock();
        tally.count(dir, result.check_type(), outcome);
        if outcome == Outcome::Failure {
            tally.failures.push(result.clone());
        }
    }

    pub fn record_launch_failure(&self, item: &WorkItem, message: String) {
        let dir = relative_dir(self.root, &item.file_path);
        let mut tally = self.lock();
        tally.count(dir, item.check_type, Outcome::Failure);
        tally.launch_failures.push(LaunchFailure {
            check_type: item.check_type,
            file_path: item.file_path.clone(),
            message,
        });
    }

    #[must_use]
    pub fn finish(self, elapsed: Duration) -> RunSummary {
        let mut tally = self.tally.into_inner().unwrap_or_else(PoisonError::into_inner);
        tally
            .failures
            .sort_by(|a, b| (a.file_path(), a.check_type()).cmp(&(b.file_path(), b.check_type())));
        tally
            .launch_failures
            .sort_by(|a, b| (&a.file_path, a.check_type).cmp(&(&b.file_path, b.check_type)));
        RunSummary {
            success: tally.success,
            elapsed_seconds: elapsed.as_secs_f64(),
            checks_by_directory: tally.by_dir,
            checks_by_type: tally.by_type,
            checks_by_result: tally.by_result,
            failures: tally.failures,
            launch_failures: tally.launch_failures,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Tally> {
        self.tally.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Tally {
    fn count(&mut self, dir: String, check_type: CheckType, outcome: Outcome) {
        *self.by_dir.entry(dir).or_default() += 1;
        *self.by_type.entry(check_type).or_default() += 1;
        *self.by_result.entry(outcome).or_default() += 1;
        if outcome == Outcome::Failure {
            self.success = false;
        }
    }
}
