//! Table rendering in tabular, JSON and raw-grid form.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{ContentBlock, Table};
use crate::table::{reconstruct_table, ReconstructedTable, TableFrame};

use super::RenderMode;

/// A rendered table block plus the cell text used to place it on its page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTable {
    /// Page the table belongs to (1-indexed)
    pub page_number: u32,

    /// The `table` block carrying rendered text
    pub block: ContentBlock,

    /// Non-empty cell texts in input order
    pub flat_text: Vec<String>,
}

/// Reconstruct and render a table.
///
/// Returns `None` when no row of the table holds any text.
pub fn render_table(table: &Table, mode: RenderMode) -> Result<Option<RenderedTable>> {
    let rebuilt = reconstruct_table(table)?;
    if rebuilt.is_empty() {
        log::debug!(
            "Skipping table on page {}: all {} rows are empty",
            table.page_number,
            table.row_count
        );
        return Ok(None);
    }

    let content = render_reconstructed(&rebuilt, mode)?;
    Ok(Some(RenderedTable {
        page_number: rebuilt.page_number,
        block: ContentBlock::table(content),
        flat_text: rebuilt.flat_text,
    }))
}

/// Render an already reconstructed table.
pub fn render_reconstructed(table: &ReconstructedTable, mode: RenderMode) -> Result<String> {
    match mode {
        RenderMode::Tabular => Ok(to_tabular(&table.frame)),
        RenderMode::Json => to_json_table(&table.frame),
        RenderMode::RawGrid => Ok(to_raw_grid(&table.grid_rows)),
    }
}

/// Render a frame as a pipe-delimited grid table.
///
/// ```text
/// | Name  | Age |
/// |-------|-----|
/// | Alice | 30  |
/// ```
pub fn to_tabular(frame: &TableFrame) -> String {
    if frame.is_empty() {
        return String::new();
    }

    let header: Vec<String> = frame.columns.iter().map(|c| flatten(c)).collect();
    let body: Vec<Vec<String>> = frame
        .rows
        .iter()
        .map(|row| row.iter().map(|c| flatten(c)).collect())
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|col| {
            body.iter()
                .map(|row| display_width(&row[col]))
                .chain(std::iter::once(display_width(&header[col])))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = Vec::with_capacity(body.len() + 2);
    lines.push(format_row(&header, &widths));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(w + 2))
            .fold(String::from("|"), |mut line, dashes| {
                line.push_str(&dashes);
                line.push('|');
                line
            }),
    );
    for row in &body {
        lines.push(format_row(row, &widths));
    }
    lines.join("\n")
}

#[derive(Serialize)]
struct JsonTable<'a> {
    fields: &'a [String],
    data: &'a [Vec<String>],
}

/// Render a frame as `{"fields": [...], "data": [[...]]}`.
pub fn to_json_table(frame: &TableFrame) -> Result<String> {
    if frame.is_empty() {
        return Ok(String::new());
    }
    let table = JsonTable {
        fields: &frame.columns,
        data: &frame.rows,
    };
    serde_json::to_string(&table).map_err(|e| Error::Render(format!("JSON table error: {}", e)))
}

/// Render grid rows as tab-separated lines.
pub fn to_raw_grid(rows: &[Vec<String>]) -> String {
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|c| flatten(c))
                .collect::<Vec<_>>()
                .join("\t")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::from("|");
    for (cell, width) in cells.iter().zip(widths) {
        let pad = width - display_width(cell);
        line.push(' ');
        line.push_str(cell);
        line.push_str(&" ".repeat(pad + 1));
        line.push('|');
    }
    line
}

fn flatten(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
}

fn display_width(text: &str) -> usize {
    text.chars().count()
}
