//! Table reconstruction: sparse cells to a dense grid to a named frame.

mod frame;
mod matrix;

pub use frame::{make_unique, TableFrame, HEADER_JOINER};
pub use matrix::{build_grid, CellGrid, MAX_GRID_SLOTS};

use crate::error::Result;
use crate::model::Table;

/// A table rebuilt from its cells, ready for rendering and merging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconstructedTable {
    /// Page the table belongs to (1-indexed)
    pub page_number: u32,

    /// Named columns and deduplicated data rows
    pub frame: TableFrame,

    /// Grid rows that hold any text, headers included
    pub grid_rows: Vec<Vec<String>>,

    /// Non-empty cell texts in input order
    pub flat_text: Vec<String>,
}

impl ReconstructedTable {
    /// Check if no row of the table holds any text.
    pub fn is_empty(&self) -> bool {
        self.grid_rows.is_empty()
    }
}

/// Rebuild one table: grid, header rows, frame and flat cell text.
pub fn reconstruct_table(table: &Table) -> Result<ReconstructedTable> {
    let grid = build_grid(table.row_count, table.col_count, &table.cells)?;
    let frame = TableFrame::from_grid(&grid, table.header_rows());
    let grid_rows = grid.non_empty_rows();
    let (_, flat_text) = grid.into_parts();

    Ok(ReconstructedTable {
        page_number: table.page_number,
        frame,
        grid_rows,
        flat_text,
    })
}
