mod loader;
mod model;

pub use loader::{ConfigLoader, DEFAULT_CONFIG_NAME, FileConfigLoader, FileSystem, RealFileSystem};
pub use model::{
    Config, ConfigFile, DEFAULT_CHECKER_CONFIG, DefaultSection, EXCLUDE_PREFIX, FilesSection,
    PathRule, PatternList, Polarity,
};
