use std::path::Path;

use globset::{Glob, GlobMatcher};

use crate::check_type::CheckType;
use crate::config::{PathRule, Polarity};
use crate::error::{CodecheckError, Result};

/// Base names that mark a program entry point; doctests are not run against them.
pub const ENTRY_POINT_NAMES: &[&str] = &["__main__.py"];

/// Decide whether a relative path is in scope under the include/exclude rules.
///
/// The last rule that matches decides. With rules configured, a path matching none
/// of them is out of scope; with no rules, every path is in scope.
#[must_use]
pub fn is_in_scope(rules: &[PathRule], relative_path: &str) -> bool {
    if rules.is_empty() {
        return true;
    }
    rules
        .iter()
        .rev()
        .find(|rule| rule.is_match(relative_path))
        .is_some_and(|rule| rule.polarity == Polarity::Include)
}

/// Whether a per-file-type policy forbids running `check_type` against `path`.
#[must_use]
pub fn is_vetoed(check_type: CheckType, path: &Path) -> bool {
    match check_type {
        CheckType::Doctest => path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| ENTRY_POINT_NAMES.contains(&name)),
        CheckType::ImportCheck
        | CheckType::ShellLint
        | CheckType::StyleCheck
        | CheckType::SyntaxCheck
        | CheckType::TypeCheck
        | CheckType::UnitTest => false,
    }
}

/// Command-line base-name filter: a file passes if its name matches `*pattern*`.
#[derive(Debug, Clone)]
pub struct NameFilter {
    pattern: String,
    matcher: GlobMatcher,
}

impl NameFilter {
    /// # Errors
    /// Returns an error if the resulting glob is invalid.
    pub fn new(pattern: &str) -> Result<Self> {
        let effective = format!("*{pattern}*");
        let glob = Glob::new(&effective).map_err(|source| CodecheckError::InvalidGlob {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            pattern: pattern.to_string(),
            matcher: glob.compile_matcher(),
        })
    }

    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        path.file_name()
            .is_some_and(|name| self.matcher.is_match(Path::new(name)))
    }
}
