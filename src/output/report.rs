use std::fmt::Write;
use std::io::Write as IoWrite;
use std::sync::{Mutex, PoisonError};

use crate::planner::WorkItem;
use crate::result::CheckResult;

pub const DEFAULT_LINE_WIDTH: usize = 80;

/// Prints failure reports to a shared sink.
///
/// Each report is rendered in full first and then written with a single `write_all`
/// under the sink lock, so blocks from concurrent workers never interleave.
pub struct Reporter<W: IoWrite + Send> {
    sink: Mutex<W>,
    line_width: usize,
}

impl<W: IoWrite + Send> Reporter<W> {
    #[must_use]
    pub const fn new(sink: W) -> Self {
        Self {
            sink: Mutex::new(sink),
            line_width: DEFAULT_LINE_WIDTH,
        }
    }

    #[must_use]
    pub const fn with_line_width(mut self, line_width: usize) -> Self {
        self.line_width = line_width;
        self
    }

    /// Print the report block of a failed check. Successful checks print nothing.
    ///
    /// # Errors
    /// Returns an error if writing to the sink fails.
    pub fn report(&self, result: &CheckResult) -> std::io::Result<()> {
        if result.is_success() {
            return Ok(());
        }
        self.write(&format_failure(result, self.line_width))
    }

    /// Print the one-line notice for a check that could not be run.
    ///
    /// # Errors
    /// Returns an error if writing to the sink fails.
    pub fn report_launch_failure(&self, item: &WorkItem, message: &str) -> std::io::Result<()> {
        self.write(&format_launch_failure(item, message))
    }

    pub fn into_inner(self) -> W {
        self.sink.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self, block: &str) -> std::io::Result<()> {
        let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        sink.write_all(block.as_bytes())?;
        sink.flush()
    }
}

/// Render the full text block for a failed check.
#[must_use]
pub fn format_failure(result: &CheckResult, line_width: usize) -> String {
    let rule = "-".repeat(line_width);
    let mut output = String::new();

    writeln!(output, "{rule}").ok();
    writeln!(output, "{}", result.description()).ok();
    writeln!(output, "{rule}").ok();
    writeln!(output, "Command: {}", shell_join(result.cmd_args())).ok();
    writeln!(output, "Exit code: {}", result.return_code()).ok();

    push_stream(&mut output, "Standard output:", result.stdout(), false);
    push_stream(&mut output, "Standard error:", result.stderr(), true);

    if !result.extra_messages().is_empty() {
        output.push('\n');
        for message in result.extra_messages() {
            writeln!(output, "{message}").ok();
        }
    }

    output.push('\n');
    output
}

#[must_use]
pub fn format_launch_failure(item: &WorkItem, message: &str) -> String {
    format!(
        "Check '{}' for {} generated an exception: {message}\n",
        item.check_type,
        item.file_path.display()
    )
}

/// Append a captured stream under `heading`. Standard error is set off from its heading by
/// an empty line.
fn push_stream(output: &mut String, heading: &str, text: &str, spaced: bool) {
    if text.trim().is_empty() {
        return;
    }
    output.push('\n');
    output.push_str(heading);
    output.push('\n');
    if spaced {
        output.push('\n');
    }
    output.push_str(text);
    if !text.ends_with('\n') {
        output.push('\n');
    }
}

/// Join arguments into a command line that a POSIX shell would split back identically.
#[must_use]
pub fn shell_join(args: &[String]) -> String {
    args.iter()
        .map(|arg| shell_quote(arg))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Quote a single argument for a POSIX shell. Arguments made only of safe characters are
/// returned unchanged; everything else is wrapped in single quotes.
#[must_use]
pub fn shell_quote(arg: &str) -> String {
    if arg.is_empty() {
        return "''".to_string();
    }
    if arg.chars().all(is_shell_safe) {
        return arg.to_string();
    }
    format!("'{}'", arg.replace('\'', r#"'"'"'"#))
}

const fn is_shell_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '@' | '%' | '+' | '=' | ':' | ',' | '.' | '/' | '-')
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
