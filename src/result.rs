use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::check_type::CheckType;

/// Outcome of one executed check.
///
/// Built once by the executor when the child process terminates and never modified
/// afterwards; all fields are read through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    check_type: CheckType,
    file_path: PathBuf,
    cmd_args: Vec<String>,
    stdout: String,
    stderr: String,
    return_code: i32,
    extra_messages: Vec<String>,
}

impl CheckResult {
    #[must_use]
    pub const fn new(
        check_type: CheckType,
        file_path: PathBuf,
        cmd_args: Vec<String>,
        return_code: i32,
    ) -> Self {
        Self {
            check_type,
            file_path,
            cmd_args,
            stdout: String::new(),
            stderr: String::new(),
            return_code,
            extra_messages: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_output(mut self, stdout: String, stderr: String) -> Self {
        self.stdout = stdout;
        self.stderr = stderr;
        self
    }

    #[must_use]
    pub fn with_extra_messages(mut self, extra_messages: Vec<String>) -> Self {
        self.extra_messages = extra_messages;
        self
    }

    #[must_use]
    pub const fn check_type(&self) -> CheckType {
        self.check_type
    }

    #[must_use]
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    #[must_use]
    pub fn cmd_args(&self) -> &[String] {
        &self.cmd_args
    }

    #[must_use]
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    #[must_use]
    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    #[must_use]
    pub const fn return_code(&self) -> i32 {
        self.return_code
    }

    #[must_use]
    pub fn extra_messages(&self) -> &[String] {
        &self.extra_messages
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.return_code == 0
    }

    /// One-line description used as the header of failure reports.
    #[must_use]
    pub fn description(&self) -> String {
        format!(
            "Check '{}' for {}",
            self.check_type,
            self.file_path.display()
        )
    }
}
