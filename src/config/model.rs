use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::check_type::CheckType;
use crate::error::{CodecheckError, Result};

/// Default type-checker configuration file, relative to the project root.
pub const DEFAULT_CHECKER_CONFIG: &str = "mypy.ini";

/// Prefix that turns a `files.included_regex_list` entry into an exclusion.
pub const EXCLUDE_PREFIX: char = '!';

// ============================================================================
// On-disk representation (codecheck.toml)
// ============================================================================

/// Raw contents of `codecheck.toml` as written by the user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub default: DefaultSection,

    /// Check name (canonical or tool alias) to enabled flag.
    #[serde(default)]
    pub checks: BTreeMap<String, bool>,

    #[serde(default)]
    pub files: FilesSection,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DefaultSection {
    /// Type-checker configuration file.
    #[serde(default = "default_mypy_config")]
    pub mypy_config: String,

    /// Style-checker configuration file, passed as `--config=<path>` when set.
    #[serde(default)]
    pub pycodestyle_config: Option<String>,
}

impl Default for DefaultSection {
    fn default() -> Self {
        Self {
            mypy_config: default_mypy_config(),
            pycodestyle_config: None,
        }
    }
}

fn default_mypy_config() -> String {
    DEFAULT_CHECKER_CONFIG.to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilesSection {
    #[serde(default)]
    pub included_regex_list: Option<PatternList>,
}

/// Include/exclude patterns, either a TOML array or one newline-separated string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum PatternList {
    List(Vec<String>),
    Lines(String),
}

impl PatternList {
    /// Non-blank, trimmed entries in declaration order.
    #[must_use]
    pub fn entries(&self) -> Vec<&str> {
        let raw: Vec<&str> = match self {
            Self::List(items) => items.iter().map(String::as_str).collect(),
            Self::Lines(text) => text.lines().collect(),
        };
        raw.into_iter()
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .collect()
    }
}

// ============================================================================
// Decoded configuration
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Include,
    Exclude,
}

/// One compiled entry of the include/exclude list.
#[derive(Debug, Clone)]
pub struct PathRule {
    pub polarity: Polarity,
    pub pattern: Regex,
}

impl PathRule {
    /// Parse a list entry; a leading `!` marks an exclusion.
    ///
    /// # Errors
    /// Returns an error if the regular expression does not compile.
    pub fn parse(entry: &str) -> Result<Self> {
        let (polarity, pattern) = entry.strip_prefix(EXCLUDE_PREFIX).map_or(
            (Polarity::Include, entry),
            |rest| (Polarity::Exclude, rest),
        );
        let pattern = Regex::new(pattern).map_err(|source| CodecheckError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { polarity, pattern })
    }

    #[must_use]
    pub fn is_match(&self, relative_path: &str) -> bool {
        self.pattern.is_match(relative_path)
    }
}

/// Configuration in effect for a run. Immutable once loaded.
#[derive(Debug, Clone)]
pub struct Config {
    pub checker_config_path: PathBuf,
    pub style_config_path: Option<PathBuf>,
    pub disabled_check_types: BTreeSet<CheckType>,
    pub include_exclude_rules: Vec<PathRule>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            checker_config_path: PathBuf::from(DEFAULT_CHECKER_CONFIG),
            style_config_path: None,
            disabled_check_types: BTreeSet::new(),
            include_exclude_rules: Vec::new(),
        }
    }
}

impl Config {
    #[must_use]
    pub fn is_enabled(&self, check_type: CheckType) -> bool {
        !self.disabled_check_types.contains(&check_type)
    }

    #[must_use]
    pub fn with_disabled(mut self, check_type: CheckType) -> Self {
        self.disabled_check_types.insert(check_type);
        self
    }

    #[must_use]
    pub fn with_rules(mut self, rules: Vec<PathRule>) -> Self {
        self.include_exclude_rules = rules;
        self
    }
}

impl TryFrom<ConfigFile> for Config {
    type Error = CodecheckError;

    fn try_from(file: ConfigFile) -> Result<Self> {
        let mut disabled_check_types = BTreeSet::new();
        for (name, enabled) in &file.checks {
            let check_type: CheckType = name.parse()?;
            if !enabled {
                disabled_check_types.insert(check_type);
            }
        }

        let include_exclude_rules = file
            .files
            .included_regex_list
            .as_ref()
            .map(PatternList::entries)
            .unwrap_or_default()
            .into_iter()
            .map(PathRule::parse)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            checker_config_path: PathBuf::from(file.default.mypy_config),
            style_config_path: file.default.pycodestyle_config.map(PathBuf::from),
            disabled_check_types,
            include_exclude_rules,
        })
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
