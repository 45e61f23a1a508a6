//! Rendering label rows.

use std::fmt::Write;

use layered_reports::LabelRow;
use unicode_width::UnicodeWidthStr;

use crate::config::OutputFormat;

const UNNAMED: &str = "-";
const FAILED: &str = "ERR";

pub fn render(rows: &[LabelRow], heuristics: &[&str], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => render_json(rows),
        OutputFormat::Table => Ok(render_table(rows, heuristics)),
    }
}

fn render_json(rows: &[LabelRow]) -> anyhow::Result<String> {
    let mut output = String::new();
    for row in rows {
        output.push_str(&serde_json::to_string(&row.summary())?);
        output.push('\n');
    }
    Ok(output)
}

/// One column per heuristic, one line per document.
fn render_table(rows: &[LabelRow], heuristics: &[&str]) -> String {
    let id_width = rows
        .iter()
        .map(|row| row.document_id.as_deref().unwrap_or(UNNAMED).width())
        .chain(std::iter::once("document".width()))
        .max()
        .unwrap_or(0);

    let mut output = String::new();
    pad(&mut output, "document", id_width);
    for name in heuristics {
        output.push_str("  ");
        output.push_str(name);
    }
    output.push('\n');

    for row in rows {
        pad(&mut output, row.document_id.as_deref().unwrap_or(UNNAMED), id_width);
        for (name, value) in heuristics.iter().zip(row.label_values()) {
            let cell = match value {
                Some(value) => value.to_string(),
                None => FAILED.to_string(),
            };
            output.push_str("  ");
            pad(&mut output, &cell, name.width());
        }
        let trimmed = output.trim_end_matches(' ').len();
        output.truncate(trimmed);
        output.push('\n');
    }
    output
}

fn pad(output: &mut String, text: &str, width: usize) {
    let _ = write!(output, "{}{}", text, " ".repeat(width.saturating_sub(text.width())));
}
