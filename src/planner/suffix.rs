use std::path::Path;

use crate::check_type::CheckType;

/// Static table from file-name suffix to the check types that apply to it.
///
/// A file can match several suffixes (`x_test.py` matches both `.py` and `_test.py`);
/// [`SuffixMap::check_types_for`] yields the union without duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixMap {
    entries: Vec<(String, Vec<CheckType>)>,
}

impl Default for SuffixMap {
    fn default() -> Self {
        Self::new([
            (
                ".py",
                vec![
                    CheckType::TypeCheck,
                    CheckType::SyntaxCheck,
                    CheckType::StyleCheck,
                    CheckType::Doctest,
                    CheckType::ImportCheck,
                ],
            ),
            (".sh", vec![CheckType::ShellLint]),
            ("_test.py", vec![CheckType::UnitTest]),
        ])
    }
}

impl SuffixMap {
    #[must_use]
    pub fn new<S: Into<String>>(entries: impl IntoIterator<Item = (S, Vec<CheckType>)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(suffix, checks)| (suffix.into(), checks))
                .collect(),
        }
    }

    /// Registered suffixes in declaration order.
    pub fn suffixes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(suffix, _)| suffix.as_str())
    }

    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        file_name(path).is_some_and(|name| self.suffixes().any(|s| name.ends_with(s)))
    }

    /// All check types applicable to `path`, in table order, each at most once.
    #[must_use]
    pub fn check_types_for(&self, path: &Path) -> Vec<CheckType> {
        let Some(name) = file_name(path) else {
            return Vec::new();
        };
        let mut checks = Vec::new();
        for (suffix, types) in &self.entries {
            if !name.ends_with(suffix.as_str()) {
                continue;
            }
            for check in types {
                if !checks.contains(check) {
                    checks.push(*check);
                }
            }
        }
        checks
    }
}

fn file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|n| n.to_str())
}
