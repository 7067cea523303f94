//! Dense grid construction from sparse, spanning cells.

use crate::error::{Error, Result};
use crate::model::Cell;

/// A dense `row_count x col_count` grid of cell text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellGrid {
    rows: Vec<Vec<String>>,
    col_count: usize,
    flat: Vec<String>,
}

impl CellGrid {
    /// Number of rows (always the declared row count).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns (always the declared column count).
    pub fn col_count(&self) -> usize {
        self.col_count
    }

    /// Grid rows, top to bottom.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Text at `(row, col)`, if inside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// Non-empty cell contents in input order, one entry per cell.
    pub fn flat_text(&self) -> &[String] {
        &self.flat
    }

    /// Rows that hold at least one non-empty entry.
    pub fn non_empty_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .filter(|row| row.iter().any(|cell| !cell.is_empty()))
            .cloned()
            .collect()
    }

    /// Split into rows and flat text.
    pub fn into_parts(self) -> (Vec<Vec<String>>, Vec<String>) {
        (self.rows, self.flat)
    }
}

/// Upper bound on `row_count * col_count` for a single table.
pub const MAX_GRID_SLOTS: usize = 1 << 20;

/// Build a dense grid from cells.
///
/// The declared size is checked against [`MAX_GRID_SLOTS`] and every cell
/// against the declared bounds before anything is allocated. Each cell's text is then copied into every slot it covers, in
/// input order, so later cells overwrite earlier ones where they overlap.
pub fn build_grid(row_count: usize, col_count: usize, cells: &[Cell]) -> Result<CellGrid> {
    match row_count.checked_mul(col_count) {
        Some(slots) if slots <= MAX_GRID_SLOTS => {}
        _ => {
            return Err(Error::TableTooLarge {
                row_count,
                col_count,
                max: MAX_GRID_SLOTS,
            });
        }
    }
    for cell in cells {
        validate_cell(cell, row_count, col_count)?;
    }

    let mut rows = vec![vec![String::new(); col_count]; row_count];
    let mut flat = Vec::new();

    for cell in cells {
        if !cell.content.is_empty() {
            flat.push(cell.content.clone());
        }
        for row in &mut rows[cell.row..cell.row + cell.row_span] {
            for slot in &mut row[cell.col..cell.col + cell.col_span] {
                slot.clone_from(&cell.content);
            }
        }
    }

    Ok(CellGrid {
        rows,
        col_count,
        flat,
    })
}

fn validate_cell(cell: &Cell, row_count: usize, col_count: usize) -> Result<()> {
    if cell.row_span == 0 || cell.col_span == 0 {
        return Err(Error::InvalidSpan {
            row: cell.row,
            col: cell.col,
        });
    }

    let row_end = cell.row.checked_add(cell.row_span);
    let col_end = cell.col.checked_add(cell.col_span);
    let fits = matches!((row_end, col_end), (Some(r), Some(c)) if r <= row_count && c <= col_count);
    if !fits {
        return Err(Error::CellOutOfBounds {
            row: cell.row,
            col: cell.col,
            row_span: cell.row_span,
            col_span: cell.col_span,
            row_count,
            col_count,
        });
    }

    Ok(())
}
