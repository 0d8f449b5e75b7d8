use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::CodecheckError;

/// One of the external verification procedures codecheck knows how to run.
///
/// Variants are declared in alphabetical order of their canonical names so that
/// the derived `Ord` sorts summary tables by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckType {
    Doctest,
    ImportCheck,
    ShellLint,
    StyleCheck,
    SyntaxCheck,
    TypeCheck,
    UnitTest,
}

impl CheckType {
    pub const ALL: [Self; 7] = [
        Self::Doctest,
        Self::ImportCheck,
        Self::ShellLint,
        Self::StyleCheck,
        Self::SyntaxCheck,
        Self::TypeCheck,
        Self::UnitTest,
    ];

    /// Canonical kebab-case name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Doctest => "doctest",
            Self::ImportCheck => "import-check",
            Self::ShellLint => "shell-lint",
            Self::StyleCheck => "style-check",
            Self::SyntaxCheck => "syntax-check",
            Self::TypeCheck => "type-check",
            Self::UnitTest => "unit-test",
        }
    }

    /// Name of the tool this check was historically keyed by in configuration files.
    #[must_use]
    pub const fn tool_alias(self) -> &'static str {
        match self {
            Self::Doctest => "doctest",
            Self::ImportCheck => "import",
            Self::ShellLint => "shellcheck",
            Self::StyleCheck => "pycodestyle",
            Self::SyntaxCheck => "compile",
            Self::TypeCheck => "mypy",
            Self::UnitTest => "unittest",
        }
    }

    /// Whether the check imports the file as a module instead of passing its path.
    #[must_use]
    pub const fn needs_module_name(self) -> bool {
        matches!(self, Self::ImportCheck | Self::UnitTest)
    }
}

impl fmt::Display for CheckType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CheckType {
    type Err = CodecheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|check| check.name() == needle || check.tool_alias() == needle)
            .ok_or_else(|| CodecheckError::UnknownCheckType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_names() {
        for check in CheckType::ALL {
            assert_eq!(check.name().parse::<CheckType>().unwrap(), check);
        }
    }

    #[test]
    fn parses_tool_aliases() {
        assert_eq!("mypy".parse::<CheckType>().unwrap(), CheckType::TypeCheck);
        assert_eq!("compile".parse::<CheckType>().unwrap(), CheckType::SyntaxCheck);
        assert_eq!(
            "pycodestyle".parse::<CheckType>().unwrap(),
            CheckType::StyleCheck
        );
        assert_eq!("import".parse::<CheckType>().unwrap(), CheckType::ImportCheck);
        assert_eq!("shellcheck".parse::<CheckType>().unwrap(), CheckType::ShellLint);
        assert_eq!("unittest".parse::<CheckType>().unwrap(), CheckType::UnitTest);
    }

    #[test]
    fn parsing_tolerates_case_and_underscores() {
        assert_eq!(
            "Style_Check".parse::<CheckType>().unwrap(),
            CheckType::StyleCheck
        );
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = "lint".parse::<CheckType>().unwrap_err();
        assert!(matches!(err, CodecheckError::UnknownCheckType(name) if name == "lint"));
    }

    #[test]
    fn ordering_follows_names() {
        let mut sorted = CheckType::ALL;
        sorted.sort_by_key(|check| check.name());
        assert_eq!(sorted, CheckType::ALL);
        assert!(CheckType::Doctest < CheckType::UnitTest);
    }

    #[test]
    fn module_checks() {
        assert!(CheckType::ImportCheck.needs_module_name());
        assert!(CheckType::UnitTest.needs_module_name());
        assert!(!CheckType::TypeCheck.needs_module_name());
    }

    #[test]
    fn serializes_as_kebab_case() {
        let json = serde_json::to_string(&CheckType::TypeCheck).unwrap();
        assert_eq!(json, "\"type-check\"");
    }
}
