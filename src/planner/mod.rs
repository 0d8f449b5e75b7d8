//! Expansion of a candidate file list into the set of checks to run.

mod filter;
mod suffix;

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::check_type::CheckType;
use crate::config::Config;
use crate::error::Result;
use crate::module_name;
use crate::path_utils::{absolutize, relative_dir, relative_path};

pub use filter::{ENTRY_POINT_NAMES, NameFilter, is_in_scope, is_vetoed};
pub use suffix::SuffixMap;

/// One scheduled (file, check type) pair.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct WorkItem {
    pub file_path: PathBuf,
    pub check_type: CheckType,
}

impl WorkItem {
    #[must_use]
    pub fn new(file_path: impl Into<PathBuf>, check_type: CheckType) -> Self {
        Self {
            file_path: file_path.into(),
            check_type,
        }
    }
}

/// Outcome of the command-line name filter, for the "Filtered ..." message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameFilterStats {
    pub pattern: String,
    pub before: usize,
    pub after: usize,
}

/// Work items plus the per-dimension counts of what was scheduled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    /// Sorted and unique.
    pub items: Vec<WorkItem>,
    pub checks_by_dir: BTreeMap<String, usize>,
    pub checks_by_type: BTreeMap<CheckType, usize>,
    pub name_filter: Option<NameFilterStats>,
}

impl Plan {
    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

pub struct Planner<'a> {
    root: &'a Path,
    config: &'a Config,
    suffix_map: SuffixMap,
    name_filter: Option<NameFilter>,
}

impl<'a> Planner<'a> {
    #[must_use]
    pub fn new(root: &'a Path, config: &'a Config) -> Self {
        Self {
            root,
            config,
            suffix_map: SuffixMap::default(),
            name_filter: None,
        }
    }

    #[must_use]
    pub fn with_suffix_map(mut self, suffix_map: SuffixMap) -> Self {
        self.suffix_map = suffix_map;
        self
    }

    /// Restrict planning to files whose base name matches `*pattern*`.
    ///
    /// # Errors
    /// Returns an error if the pattern is not a valid glob.
    pub fn with_name_filter(mut self, pattern: Option<&str>) -> Result<Self> {
        self.name_filter = pattern
            .filter(|p| !p.is_empty())
            .map(NameFilter::new)
            .transpose()?;
        Ok(self)
    }

    /// Expand `files` into work items.
    ///
    /// # Errors
    /// Returns [`crate::CodecheckError::ModuleResolution`] when a unit-test file has no
    /// importable module name.
    pub fn plan<I, P>(&self, files: I) -> Result<Plan>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let candidates: BTreeSet<PathBuf> = files
            .into_iter()
            .map(|p| absolutize(self.root, p.as_ref()))
            .filter(|p| self.suffix_map.matches(p))
            .filter(|p| is_regular_file(p))
            .filter(|p| is_in_scope(&self.config.include_exclude_rules, &relative_path(self.root, p)))
            .collect();

        let (candidates, name_filter) = self.apply_name_filter(candidates);

        let mut items = BTreeSet::new();
        for path in &candidates {
            for check_type in self.suffix_map.check_types_for(path) {
                if !self.config.is_enabled(check_type) || is_vetoed(check_type, path) {
                    continue;
                }
                if check_type == CheckType::UnitTest {
                    module_name::resolve(path, self.root)?;
                }
                items.insert(WorkItem::new(path.clone(), check_type));
            }
        }

        let mut plan = Plan {
            items: items.into_iter().collect(),
            name_filter,
            ..Plan::default()
        };
        for item in &plan.items {
            *plan
                .checks_by_dir
                .entry(relative_dir(self.root, &item.file_path))
                .or_default() += 1;
            *plan.checks_by_type.entry(item.check_type).or_default() += 1;
        }
        debug!(
            files = candidates.len(),
            items = plan.items.len(),
            "planned checks"
        );
        Ok(plan)
    }

    fn apply_name_filter(
        &self,
        candidates: BTreeSet<PathBuf>,
    ) -> (BTreeSet<PathBuf>, Option<NameFilterStats>) {
        let Some(filter) = &self.name_filter else {
            return (candidates, None);
        };
        let before = candidates.len();
        let kept: BTreeSet<PathBuf> = candidates
            .into_iter()
            .filter(|p| filter.matches(p))
            .collect();
        let stats = NameFilterStats {
            pattern: filter.pattern().to_string(),
            before,
            after: kept.len(),
        };
        (kept, Some(stats))
    }
}

/// Existing, non-symlink regular file.
fn is_regular_file(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok_and(|meta| meta.file_type().is_file())
}

#[cfg(test)]
#[path = "planner_tests.rs"]
mod tests;
