use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecheckError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid regular expression: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid glob pattern: {pattern}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Unknown check type: {0}")]
    UnknownCheckType(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("Git error: {0}")]
    Git(String),

    #[error("File discovery error: {0}")]
    Discovery(String),

    #[error("Cannot resolve module name for {path}: {reason}")]
    ModuleResolution { path: PathBuf, reason: String },

    #[error("Failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Check panicked: {0}")]
    Panicked(String),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl CodecheckError {
    /// Short, stable name of the error variant.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Config(_) => "Config",
            Self::FileRead { .. } => "FileRead",
            Self::InvalidPattern { .. } => "InvalidPattern",
            Self::InvalidGlob { .. } => "InvalidGlob",
            Self::UnknownCheckType(_) => "UnknownCheckType",
            Self::Io(_) => "Io",
            Self::TomlParse(_) => "TomlParse",
            Self::JsonSerialize(_) => "JsonSerialize",
            Self::Git(_) => "Git",
            Self::Discovery(_) => "Discovery",
            Self::ModuleResolution { .. } => "ModuleResolution",
            Self::Launch { .. } => "Launch",
            Self::Panicked(_) => "Panicked",
            Self::ThreadPool(_) => "ThreadPool",
        }
    }
}

pub type Result<T> = std::result::Result<T, CodecheckError>;

/// Render an error followed by its chain of sources, separated by `: `.
#[must_use]
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.ends_with(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
