use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{CodecheckError, Result};

use super::model::{Config, ConfigFile};

/// Name of the configuration file looked up in the project root.
pub const DEFAULT_CONFIG_NAME: &str = "codecheck.toml";

/// Trait for loading configuration from various sources.
pub trait ConfigLoader {
    /// Load `codecheck.toml` from the project root, or defaults if it does not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or decoded.
    fn load(&self, project_root: &Path) -> Result<Config>;

    /// Load configuration from an explicit path, which must exist.
    ///
    /// # Errors
    /// Returns an error if the file is missing, unreadable or invalid.
    fn load_from_path(&self, path: &Path) -> Result<Config>;
}

/// Trait for filesystem operations (for testability).
pub trait FileSystem {
    /// Read file contents as a string.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

    /// Check if a path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Real filesystem implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Loads and decodes `codecheck.toml`.
///
/// Defaults for absent fields are applied here, once; the resulting [`Config`]
/// carries no optional values that callers need to interpret.
#[derive(Debug)]
pub struct FileConfigLoader<F: FileSystem = RealFileSystem> {
    fs: F,
}

impl Default for FileConfigLoader<RealFileSystem> {
    fn default() -> Self {
        Self::new()
    }
}

impl FileConfigLoader<RealFileSystem> {
    #[must_use]
    pub const fn new() -> Self {
        Self { fs: RealFileSystem }
    }
}

impl<F: FileSystem> FileConfigLoader<F> {
    #[must_use]
    pub const fn with_fs(fs: F) -> Self {
        Self { fs }
    }

    /// Decode configuration text.
    ///
    /// # Errors
    /// Returns an error on TOML syntax errors, unknown check names or bad patterns.
    pub fn parse(content: &str) -> Result<Config> {
        let file: ConfigFile = toml::from_str(content)?;
        Config::try_from(file)
    }

    fn read(&self, path: &Path) -> Result<Config> {
        let content = self
            .fs
            .read_to_string(path)
            .map_err(|source| CodecheckError::FileRead {
                path: path.to_path_buf(),
                source,
            })?;
        let config = Self::parse(&content)?;
        debug!(
            path = %path.display(),
            disabled = config.disabled_check_types.len(),
            rules = config.include_exclude_rules.len(),
            "loaded configuration"
        );
        Ok(config)
    }
}

impl<F: FileSystem> ConfigLoader for FileConfigLoader<F> {
    fn load(&self, project_root: &Path) -> Result<Config> {
        let path: PathBuf = project_root.join(DEFAULT_CONFIG_NAME);
        if self.fs.exists(&path) {
            self.read(&path)
        } else {
            debug!(path = %path.display(), "no configuration file, using defaults");
            Ok(Config::default())
        }
    }

    fn load_from_path(&self, path: &Path) -> Result<Config> {
        if !self.fs.exists(path) {
            return Err(CodecheckError::Config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }
        self.read(path)
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
