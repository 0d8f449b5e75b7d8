mod progress;
mod report;
mod summary;

pub use progress::CheckProgress;
pub use report::{
    DEFAULT_LINE_WIDTH, Reporter, format_failure, format_launch_failure, shell_join, shell_quote,
};
pub use summary::{render_json, render_text};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown output format: {s}")),
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
