use std::collections::BTreeMap;
use std::fmt::{Display, Write};

use crate::error::Result;
use crate::runner::RunSummary;

/// Render the end-of-run statistics and verdict as text.
#[must_use]
pub fn render_text(summary: &RunSummary) -> String {
    let mut output = String::new();
    push_table(
        &mut output,
        "Checks by directory (relative to repo root)",
        &summary.checks_by_directory,
    );
    push_table(&mut output, "Checks by type", &summary.checks_by_type);
    push_table(&mut output, "Checks by result", &summary.checks_by_result);
    writeln!(output, "Elapsed time: {:.1} seconds", summary.elapsed_seconds).ok();
    output.push('\n');
    if summary.success {
        output.push_str("All checks are successful\n");
    } else {
        output.push_str("Some checks failed\n");
    }
    output.push('\n');
    output
}

/// Render the whole run as a single JSON document.
///
/// # Errors
/// Returns an error if serialization fails.
pub fn render_json(summary: &RunSummary) -> Result<String> {
    let mut json = serde_json::to_string_pretty(summary)?;
    json.push('\n');
    Ok(json)
}

fn push_table<K: Display, V: Display>(output: &mut String, title: &str, table: &BTreeMap<K, V>) {
    writeln!(output, "{title}:").ok();
    for (key, value) in table {
        writeln!(output, "    {key}: {value}").ok();
    }
}
