//! Output formatting utilities.
//!
//! Renders validation outcomes and table listings for the command line as
//! an ASCII table (like the MySQL CLI), a Markdown table, or JSON.

use crate::models::{ConnectionOutcome, ConnectionStatus, TableInfo};
use clap::ValueEnum;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// ASCII table format (like MySQL CLI)
    #[default]
    Table,
    /// Markdown table format
    Markdown,
    Json,
}

#[derive(Serialize)]
struct OutcomeReport<'a> {
    state: ConnectionStatus,
    label: &'static str,
    message: String,
    #[serde(flatten)]
    outcome: &'a ConnectionOutcome,
}

pub fn format_outcome(outcome: &ConnectionOutcome, format: OutputFormat) -> String {
    let status = ConnectionStatus::from_outcome(outcome);
    match format {
        OutputFormat::Json => {
            let report = OutcomeReport {
                state: status,
                label: status.label(),
                message: outcome.message(),
                outcome,
            };
            serde_json::to_string_pretty(&report).unwrap_or_default()
        }
        OutputFormat::Table | OutputFormat::Markdown => {
            format!("Status: {}\n{}\n", status.label(), outcome.message())
        }
    }
}

pub fn format_tables(tables: &[TableInfo], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(tables).unwrap_or_default(),
        OutputFormat::Table => format_as_table(tables),
        OutputFormat::Markdown => format_as_markdown(tables),
    }
}

const NAME_HEADER: &str = "Table";
const COUNT_HEADER: &str = "Rows";

pub fn format_as_table(tables: &[TableInfo]) -> String {
    if tables.is_empty() {
        return "Empty set\n".to_string();
    }

    let counts: Vec<String> = tables.iter().map(|t| t.row_count.to_string()).collect();
    let name_width = tables
        .iter()
        .map(|t| t.name.width())
        .chain(std::iter::once(NAME_HEADER.width()))
        .max()
        .unwrap_or_default();
    let count_width = counts
        .iter()
        .map(|c| c.width())
        .chain(std::iter::once(COUNT_HEADER.width()))
        .max()
        .unwrap_or_default();

    let separator = format!(
        "+{}+{}+\n",
        "-".repeat(name_width + 2),
        "-".repeat(count_width + 2)
    );

    let mut output = String::new();
    output.push_str(&separator);
    output.push_str(&format!(
        "| {} | {} |\n",
        pad_center(NAME_HEADER, name_width),
        pad_center(COUNT_HEADER, count_width)
    ));
    output.push_str(&separator);

    for (table, count) in tables.iter().zip(&counts) {
        output.push_str(&format!(
            "| {} | {} |\n",
            pad_right(&table.name, name_width),
            pad_left(count, count_width)
        ));
    }

    output.push_str(&separator);

    let row_text = if tables.len() == 1 { "table" } else { "tables" };
    output.push_str(&format!("{} {} in set\n", tables.len(), row_text));

    output
}

pub fn format_as_markdown(tables: &[TableInfo]) -> String {
    if tables.is_empty() {
        return "*Empty set*\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("| {} | {} |\n", NAME_HEADER, COUNT_HEADER));
    output.push_str("|---|---:|\n");

    for table in tables {
        output.push_str(&format!("| {} | {} |\n", table.name, table.row_count));
    }

    output.push_str(&format!("\n*{} tables*\n", tables.len()));

    output
}

// `format!` width specifiers count chars, not display columns, so CJK names
// are padded by hand.
fn pad_right(s: &str, width: usize) -> String {
    format!("{}{}", s, " ".repeat(width.saturating_sub(s.width())))
}

fn pad_left(s: &str, width: usize) -> String {
    format!("{}{}", " ".repeat(width.saturating_sub(s.width())), s)
}

fn pad_center(s: &str, width: usize) -> String {
    let total = width.saturating_sub(s.width());
    let left = total / 2;
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(total - left))
}
