use std::env;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::error::{CodecheckError, Result};

/// Interpreter module search path variable.
pub const PYTHONPATH: &str = "PYTHONPATH";

/// Type-checker search path variable.
pub const MYPYPATH: &str = "MYPYPATH";

/// Entries of the parent's `PYTHONPATH`, empty entries dropped.
#[must_use]
pub fn inherited_entries() -> Vec<PathBuf> {
    env::var_os(PYTHONPATH)
        .map(|value| split(&value))
        .unwrap_or_default()
}

#[must_use]
pub fn split(value: &OsStr) -> Vec<PathBuf> {
    env::split_paths(value)
        .filter(|entry| !entry.as_os_str().is_empty())
        .collect()
}

/// Whether `entry` may appear in the type-checker's search path.
///
/// Third-party and system library directories are rejected by the type checker,
/// so `site-packages` directories, macOS framework installs and any directory
/// holding a `typing.py` (a standard library root) are left out.
#[must_use]
pub fn is_valid_checker_entry(entry: &Path) -> bool {
    let text = entry.to_string_lossy();
    entry.file_name().is_none_or(|name| name != "site-packages")
        && !text.contains("/site-packages/")
        && !text.contains("/Library/Frameworks/Python.framework/")
        && !entry.join("typing.py").exists()
}

/// `extra` followed by `inherited`, joined for use as an environment value.
///
/// # Errors
/// Returns an error if an entry contains the platform path separator.
pub fn join(extra: &[PathBuf], inherited: &[PathBuf]) -> Result<OsString> {
    env::join_paths(extra.iter().chain(inherited))
        .map_err(|e| CodecheckError::Config(format!("Invalid search path entry: {e}")))
}

/// Like [`join`], keeping only entries accepted by [`is_valid_checker_entry`].
///
/// # Errors
/// Returns an error if an entry contains the platform path separator.
pub fn join_for_checker(extra: &[PathBuf], inherited: &[PathBuf]) -> Result<OsString> {
    let kept: Vec<&PathBuf> = extra
        .iter()
        .chain(inherited)
        .filter(|entry| is_valid_checker_entry(entry))
        .collect();
    env::join_paths(kept)
        .map_err(|e| CodecheckError::Config(format!("Invalid search path entry: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_packages_entries_are_rejected() {
        assert!(!is_valid_checker_entry(Path::new(
            "/usr/lib/python3/site-packages"
        )));
        assert!(!is_valid_checker_entry(Path::new(
            "/venv/lib/python3.12/site-packages/extra"
        )));
    }

    #[test]
    fn framework_entries_are_rejected() {
        assert!(!is_valid_checker_entry(Path::new(
            "/Library/Frameworks/Python.framework/Versions/3.12/lib"
        )));
    }

    #[test]
    fn stdlib_root_is_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("typing.py"), "").unwrap();
        assert!(!is_valid_checker_entry(dir.path()));
    }

    #[test]
    fn project_entries_are_kept() {
        assert!(is_valid_checker_entry(Path::new("/home/dev/project/python")));
    }

    #[cfg(unix)]
    #[test]
    fn extra_entries_come_first() {
        let joined = join(
            &[PathBuf::from("/repo/python")],
            &[PathBuf::from("/opt/lib")],
        )
        .unwrap();
        assert_eq!(joined, OsString::from("/repo/python:/opt/lib"));
    }

    #[cfg(unix)]
    #[test]
    fn checker_path_filters_library_dirs() {
        let joined = join_for_checker(
            &[PathBuf::from("/repo/python")],
            &[PathBuf::from("/venv/lib/site-packages")],
        )
        .unwrap();
        assert_eq!(joined, OsString::from("/repo/python"));
    }

    #[cfg(unix)]
    #[test]
    fn split_drops_empty_entries() {
        let entries = split(OsStr::new("/a::/b:"));
        assert_eq!(entries, vec![PathBuf::from("/a"), PathBuf::from("/b")]);
    }

    #[cfg(unix)]
    #[test]
    fn separator_inside_entry_is_an_error() {
        assert!(join(&[PathBuf::from("/a:b")], &[]).is_err());
    }
}
