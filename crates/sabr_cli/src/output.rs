//! Table and JSON rendering of command results.

use clap::ValueEnum;
use serde::Serialize;

use crate::Result;

/// Output format shared by the reporting commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Box-drawn table on stdout
    #[default]
    Table,
    /// Pretty-printed JSON on stdout
    Json,
}

/// Column width used for every table cell.
const CELL_WIDTH: usize = 12;

/// Render rows as a box-drawn table.
pub fn render_table(headers: &[&str], rows: &[Vec<f64>]) -> String {
    let rule = |left: &str, mid: &str, right: &str| {
        let cells: Vec<String> = headers.iter().map(|_| "─".repeat(CELL_WIDTH)).collect();
        format!("{}{}{}\n", left, cells.join(mid), right)
    };

    let mut out = rule("┌", "┬", "┐");
    let titles: Vec<String> = headers
        .iter()
        .map(|h| format!(" {:<width$}", h, width = CELL_WIDTH - 1))
        .collect();
    out.push_str(&format!("│{}│\n", titles.join("│")));
    out.push_str(&rule("├", "┼", "┤"));

    if rows.is_empty() {
        let blanks: Vec<String> = headers
            .iter()
            .enumerate()
            .map(|(i, _)| {
                let text = if i == 0 { "(no data)" } else { "" };
                format!(" {:<width$}", text, width = CELL_WIDTH - 1)
            })
            .collect();
        out.push_str(&format!("│{}│\n", blanks.join("│")));
    }
    for row in rows {
        let cells: Vec<String> = row
            .iter()
            .map(|v| format!(" {:>width$.6} ", v, width = CELL_WIDTH - 2))
            .collect();
        out.push_str(&format!("│{}│\n", cells.join("│")));
    }

    out.push_str(&rule("└", "┴", "┘"));
    out
}

/// Print `rows` in the requested format; `records` backs the JSON form.
pub fn emit<R: Serialize>(
    format: OutputFormat,
    headers: &[&str],
    rows: &[Vec<f64>],
    records: &R,
) -> Result<()> {
    match format {
        OutputFormat::Table => print!("{}", render_table(headers, rows)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(records)?),
    }
    Ok(())
}
