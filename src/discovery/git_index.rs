use std::path::{Path, PathBuf};

use tracing::debug;

use super::FileLister;
use crate::error::{CodecheckError, Result};

/// Lists the files recorded in the git index of the repository containing the root.
pub struct GitIndexLister {
    repo_path: PathBuf,
    workdir: PathBuf,
}

impl GitIndexLister {
    /// Open the repository that contains `path`.
    ///
    /// # Errors
    /// Returns an error if no git repository is found or it has no working directory.
    pub fn discover(path: &Path) -> Result<Self> {
        let repo = gix::discover(path)
            .map_err(|e| CodecheckError::Git(format!("Failed to discover git repository: {e}")))?;
        let workdir = repo
            .workdir()
            .ok_or_else(|| CodecheckError::Git("Repository has no working directory".into()))?;
        let workdir = dunce::canonicalize(workdir).unwrap_or_else(|_| workdir.to_path_buf());
        Ok(Self {
            repo_path: repo.path().to_path_buf(),
            workdir,
        })
    }

    #[must_use]
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn open_repo(&self) -> Result<gix::Repository> {
        gix::open(&self.repo_path)
            .map_err(|e| CodecheckError::Git(format!("Failed to open git repository: {e}")))
    }
}

impl FileLister for GitIndexLister {
    fn list_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let repo = self.open_repo()?;
        let index = repo
            .open_index()
            .map_err(|e| CodecheckError::Git(format!("Failed to open git index: {e}")))?;

        let mut files: Vec<PathBuf> = index
            .entries()
            .iter()
            .map(|entry| {
                let relative = String::from_utf8_lossy(entry.path(&index)).to_string();
                self.workdir.join(relative)
            })
            .filter(|path| path.starts_with(root))
            .collect();
        files.sort();
        files.dedup();

        debug!(
            workdir = %self.workdir.display(),
            count = files.len(),
            "listed tracked files from git index"
        );
        Ok(files)
    }
}
