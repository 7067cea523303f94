//! Table types.

use super::RawTable;
use crate::render::CleanupPipeline;
use serde::{Deserialize, Serialize};

/// A table with its declared size and sparse, possibly spanning cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Declared number of rows
    pub row_count: usize,

    /// Declared number of columns
    pub col_count: usize,

    /// Cells in input order (later cells win on overlap)
    pub cells: Vec<Cell>,

    /// Page the table was found on (1-indexed)
    pub page_number: u32,
}

impl Table {
    /// Create a new empty table.
    pub fn new(row_count: usize, col_count: usize) -> Self {
        Self {
            row_count,
            col_count,
            cells: Vec::new(),
            page_number: 1,
        }
    }

    /// Build a table from raw analysis output, cleaning cell text.
    pub fn from_raw(raw: &RawTable, cleanup: &CleanupPipeline) -> Self {
        let cells = raw
            .cells
            .iter()
            .map(|c| Cell {
                row: c.row_index,
                col: c.column_index,
                row_span: c.row_span,
                col_span: c.column_span,
                content: cleanup.process(&c.content),
                kind: c.kind,
            })
            .collect();

        Self {
            row_count: raw.row_count,
            col_count: raw.column_count,
            cells,
            page_number: raw.page_number(),
        }
    }

    /// Set the page number and return self.
    pub fn on_page(mut self, page_number: u32) -> Self {
        self.page_number = page_number;
        self
    }

    /// Add a cell to the table.
    pub fn add_cell(&mut self, cell: Cell) {
        self.cells.push(cell);
    }

    /// Add a cell and return self.
    pub fn with_cell(mut self, cell: Cell) -> Self {
        self.add_cell(cell);
        self
    }

    /// Number of leading rows covered by column header cells (0 = no header).
    pub fn header_rows(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| c.is_column_header())
            .map(|c| c.row + c.row_span)
            .max()
            .unwrap_or(0)
    }

    /// Check if the table has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Check if the table has complex structure (merged cells).
    pub fn has_merged_cells(&self) -> bool {
        self.cells.iter().any(|c| c.is_merged())
    }
}

/// A table cell occupying `[row, row + row_span) x [col, col + col_span)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Row index (0-based)
    pub row: usize,

    /// Column index (0-based)
    pub col: usize,

    /// Number of rows this cell spans
    pub row_span: usize,

    /// Number of columns this cell spans
    pub col_span: usize,

    /// Cell text
    pub content: String,

    /// Cell kind, if reported
    pub kind: Option<CellKind>,
}

impl Cell {
    /// Create a new single-slot cell with text content.
    pub fn text(row: usize, col: usize, content: impl Into<String>) -> Self {
        Self {
            row,
            col,
            row_span: 1,
            col_span: 1,
            content: content.into(),
            kind: None,
        }
    }

    /// Create a single-slot column header cell.
    pub fn header(row: usize, col: usize, content: impl Into<String>) -> Self {
        Self::text(row, col, content).kind(CellKind::ColumnHeader)
    }

    /// Set colspan and return self.
    pub fn colspan(mut self, span: usize) -> Self {
        self.col_span = span;
        self
    }

    /// Set rowspan and return self.
    pub fn rowspan(mut self, span: usize) -> Self {
        self.row_span = span;
        self
    }

    /// Set kind and return self.
    pub fn kind(mut self, kind: CellKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Check if this cell is a column header.
    pub fn is_column_header(&self) -> bool {
        self.kind == Some(CellKind::ColumnHeader)
    }

    /// Check if this cell spans multiple rows or columns.
    pub fn is_merged(&self) -> bool {
        self.row_span > 1 || self.col_span > 1
    }
}

/// Kind of a table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CellKind {
    /// Column header; defines header rows
    ColumnHeader,
    /// Row header
    RowHeader,
    /// Top-left header cell
    StubHead,
    /// Regular content
    Content,
    /// Caption-like description cell
    Description,
}

impl CellKind {
    /// Wire name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            CellKind::ColumnHeader => "columnHeader",
            CellKind::RowHeader => "rowHeader",
            CellKind::StubHead => "stubHead",
            CellKind::Content => "content",
            CellKind::Description => "description",
        }
    }
}

impl From<String> for CellKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "columnHeader" | "column_header" | "header" => CellKind::ColumnHeader,
            "rowHeader" | "row_header" => CellKind::RowHeader,
            "stubHead" | "stub_head" => CellKind::StubHead,
            "description" => CellKind::Description,
            _ => CellKind::Content,
        }
    }
}

impl From<CellKind> for String {
    fn from(kind: CellKind) -> Self {
        kind.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RawCell;

    #[test]
    fn test_table_new() {
        let table = Table::new(2, 3);
        assert!(table.is_empty());
        assert_eq!(table.header_rows(), 0);
        assert_eq!(table.page_number, 1);
    }

    #[test]
    fn test_header_rows_from_spans() {
        let table = Table::new(4, 2)
            .with_cell(Cell::header(0, 0, "Group").colspan(2))
            .with_cell(Cell::header(1, 0, "A"))
            .with_cell(Cell::header(1, 1, "B").rowspan(2))
            .with_cell(Cell::text(3, 0, "x"));

        assert_eq!(table.header_rows(), 3);
        assert!(table.has_merged_cells());
    }

    #[test]
    fn test_row_header_does_not_count() {
        let table = Table::new(2, 2).with_cell(Cell::text(1, 0, "r").kind(CellKind::RowHeader));
        assert_eq!(table.header_rows(), 0);
    }

    #[test]
    fn test_from_raw_cleans_content() {
        let raw = RawTable::new(1, 2, 4)
            .with_cell(RawCell::new(0, 0, " Yes\n:selected: "))
            .with_cell(RawCell::new(0, 1, "No").span(1, 1));

        let table = Table::from_raw(&raw, &CleanupPipeline::default());
        assert_eq!(table.page_number, 4);
        assert_eq!(table.cells[0].content, "Yes");
        assert_eq!(table.col_count, 2);
    }

    #[test]
    fn test_cell_kind_names() {
        assert_eq!(CellKind::from("columnHeader".to_string()), CellKind::ColumnHeader);
        assert_eq!(CellKind::from("somethingNew".to_string()), CellKind::Content);
        assert_eq!(String::from(CellKind::StubHead), "stubHead");
    }
}
