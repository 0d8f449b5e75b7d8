//! Resolution of the dotted module name an interpreter would use to import a file.
//!
//! Starting at the file's directory, the walk moves upward while the directory is a
//! package and is neither a VCS root nor the project root. Each stop condition is a
//! separate predicate so it can be exercised on its own.

use std::path::{Path, PathBuf};

use crate::error::{CodecheckError, Result};

/// Marker file that makes a directory an importable package.
pub const PACKAGE_MARKER: &str = "__init__.py";

/// Entry whose presence marks a version-control root.
pub const VCS_MARKER: &str = ".git";

/// How to import a file as a module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleName {
    /// Fully qualified name, outermost package first, e.g. `pkg.sub.mod`.
    pub dotted: String,
    /// Directory that must be on the search path for `dotted` to import.
    pub search_root: PathBuf,
}

#[must_use]
pub fn is_package_dir(dir: &Path) -> bool {
    dir.join(PACKAGE_MARKER).is_file()
}

#[must_use]
pub fn is_vcs_root(dir: &Path) -> bool {
    dir.join(VCS_MARKER).exists()
}

#[must_use]
pub fn is_project_root(dir: &Path, project_root: &Path) -> bool {
    let canonical = |p: &Path| dunce::canonicalize(p).unwrap_or_else(|_| p.to_path_buf());
    canonical(dir) == canonical(project_root)
}

/// Whether `name` can be used as one component of a dotted module name.
#[must_use]
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first == '_' || first.is_alphabetic())
        && chars.all(|c| c == '_' || c.is_alphanumeric())
}

/// Resolve the module name for `file` inside `project_root`.
///
/// # Errors
/// Returns [`CodecheckError::ModuleResolution`] if the file has no usable stem or any
/// component of the resulting name is not a valid identifier.
pub fn resolve(file: &Path, project_root: &Path) -> Result<ModuleName> {
    let file = std::path::absolute(file)?;
    let unresolvable = |reason: String| CodecheckError::ModuleResolution {
        path: file.clone(),
        reason,
    };

    let stem = file
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| unresolvable("file name is not valid UTF-8".to_string()))?;
    let mut components = vec![stem.to_string()];

    let mut dir = file
        .parent()
        .ok_or_else(|| unresolvable("file has no parent directory".to_string()))?;
    while is_package_dir(dir) && !is_vcs_root(dir) && !is_project_root(dir, project_root) {
        let Some(name) = dir.file_name().and_then(|n| n.to_str()) else {
            break;
        };
        components.push(name.to_string());
        let Some(parent) = dir.parent() else {
            break;
        };
        dir = parent;
    }
    components.reverse();

    if let Some(bad) = components.iter().find(|c| !is_identifier(c)) {
        return Err(unresolvable(format!("'{bad}' is not a valid identifier")));
    }

    Ok(ModuleName {
        dotted: components.join("."),
        search_root: dir.to_path_buf(),
    })
}

#[cfg(test)]
#[path = "module_name_tests.rs"]
mod tests;
