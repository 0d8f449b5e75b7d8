use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::debug;

use super::FileLister;
use crate::error::Result;
use crate::module_name::VCS_MARKER;

/// Lists regular files under the root, honoring `.gitignore` files.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectoryWalker;

impl FileLister for DirectoryWalker {
    fn list_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut files: Vec<PathBuf> = WalkBuilder::new(root)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .require_git(false)
            .hidden(false)
            .parents(false)
            .filter_entry(|entry| entry.file_name() != VCS_MARKER)
            .build()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_some_and(|ft| ft.is_file()))
            .map(ignore::DirEntry::into_path)
            .collect();
        files.sort();

        debug!(root = %root.display(), count = files.len(), "walked directory");
        Ok(files)
    }
}
