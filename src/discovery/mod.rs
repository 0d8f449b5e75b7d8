//! Candidate file discovery.

mod git_index;
mod walk;

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;

pub use git_index::GitIndexLister;
pub use walk::DirectoryWalker;

/// Produces the absolute paths of candidate files under a root.
pub trait FileLister {
    /// # Errors
    /// Returns an error if the file source cannot be read.
    fn list_files(&self, root: &Path) -> Result<Vec<PathBuf>>;
}

/// List candidate files under `root`.
///
/// Inside a git work tree the tracked files are used; otherwise the directory is walked.
///
/// # Errors
/// Returns an error if the git index exists but cannot be read.
pub fn discover_files(root: &Path) -> Result<Vec<PathBuf>> {
    match GitIndexLister::discover(root) {
        Ok(lister) => lister.list_files(root),
        Err(e) => {
            debug!(error = %e, "no git repository, walking directory");
            DirectoryWalker.list_files(root)
        }
    }
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
