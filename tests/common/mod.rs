#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the codecheck binary.
#[macro_export]
macro_rules! codecheck {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("codecheck"))
    };
}

/// Creates a temporary directory with test fixtures for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
    /// Holds fake tool executables, outside the project so they are never checked.
    pub tools: TempDir,
}

impl TestFixture {
    /// Creates a new test fixture with an empty temp directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
            tools: TempDir::new().expect("Failed to create tools directory"),
        }
    }

    /// Creates a file with the given content in the temp directory.
    pub fn create_file(&self, relative_path: &str, content: &str) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    /// Returns the path to the temp directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Returns the project root as a string argument for `--root`.
    pub fn root_arg(&self) -> String {
        self.dir.path().to_string_lossy().into_owned()
    }

    /// Creates a `codecheck.toml` in the project root.
    pub fn create_config(&self, content: &str) {
        self.create_file("codecheck.toml", content);
    }

    /// Writes an executable shell script into the tools directory and returns its path.
    #[cfg(unix)]
    pub fn create_tool(&self, name: &str, script: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.tools.path().join(name);
        fs::write(&path, script).expect("Failed to write tool");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("Failed to make tool executable");
        path
    }

    /// A stand-in interpreter that fails whenever its last argument mentions `bad`.
    #[cfg(unix)]
    pub fn create_fake_python(&self) -> PathBuf {
        self.create_tool("python", FAKE_PYTHON)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Prints its arguments and exits 1 when the last one contains `bad`.
pub const FAKE_PYTHON: &str = r#"#!/bin/sh
for last; do :; done
case "$last" in
  *bad*)
    echo "problem reported for $last"
    exit 1
    ;;
esac
exit 0
"#;

/// Reports the search path it was started with, then fails.
pub const ENV_REPORTING_PYTHON: &str = r#"#!/bin/sh
echo "PYTHONPATH=$PYTHONPATH"
exit 3
"#;

/// A small, valid Python module.
pub const GOOD_PY: &str = "def add(a, b):\n    return a + b\n";
