//! Raw layout-analysis input.
//!
//! These types mirror the JSON produced by a layout-analysis service
//! (pages, paragraphs, tables and their cells, each tagged with bounding
//! regions). Both camelCase and snake_case field names are accepted.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::io::Read;

use super::CellKind;

/// A raw analysis result for one document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Pages detected by the analysis service
    #[serde(default)]
    pub pages: Vec<AnalyzedPage>,

    /// Paragraphs in reading order
    #[serde(default)]
    pub paragraphs: Vec<RawParagraph>,

    /// Tables in document order
    #[serde(default)]
    pub tables: Vec<RawTable>,
}

impl AnalysisResult {
    /// Create an empty analysis result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an analysis result from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse an analysis result from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Number of pages the document spans.
    ///
    /// An analysis that lists no pages still has one (possibly empty) page.
    pub fn page_count(&self) -> u32 {
        page_count_of(self.pages.len()).max(1)
    }
}

/// A page entry in the analysis result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzedPage {
    /// Page number (1-indexed)
    #[serde(default = "first_page", alias = "pageNumber")]
    pub page_number: u32,
}

/// Region of a page an item was found on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundingRegion {
    /// Page number (1-indexed)
    #[serde(default = "first_page", alias = "pageNumber")]
    pub page_number: u32,
}

impl BoundingRegion {
    /// Create a region on the given page.
    pub fn on_page(page_number: u32) -> Self {
        Self { page_number }
    }
}

/// A paragraph as reported by the analysis service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawParagraph {
    /// Semantic role (title, sectionHeading, pageFooter, ...)
    #[serde(default)]
    pub role: Option<String>,

    /// Text content
    #[serde(default)]
    pub content: String,

    /// Regions the paragraph occupies
    #[serde(default, alias = "boundingRegions")]
    pub bounding_regions: Vec<BoundingRegion>,
}

impl RawParagraph {
    /// Create a paragraph on the given page.
    pub fn new(content: impl Into<String>, page_number: u32) -> Self {
        Self {
            role: None,
            content: content.into(),
            bounding_regions: vec![BoundingRegion::on_page(page_number)],
        }
    }

    /// Set the role and return self.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Page number from the first bounding region, 1 when there is none.
    pub fn page_number(&self) -> u32 {
        page_of(&self.bounding_regions)
    }
}

/// A table as reported by the analysis service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTable {
    /// Declared number of rows
    #[serde(default, alias = "rowCount")]
    pub row_count: usize,

    /// Declared number of columns
    #[serde(default, alias = "columnCount")]
    pub column_count: usize,

    /// Cells in service order
    #[serde(default)]
    pub cells: Vec<RawCell>,

    /// Regions the table occupies
    #[serde(default, alias = "boundingRegions")]
    pub bounding_regions: Vec<BoundingRegion>,
}

impl RawTable {
    /// Create an empty table on the given page.
    pub fn new(row_count: usize, column_count: usize, page_number: u32) -> Self {
        Self {
            row_count,
            column_count,
            cells: Vec::new(),
            bounding_regions: vec![BoundingRegion::on_page(page_number)],
        }
    }

    /// Add a cell and return self.
    pub fn with_cell(mut self, cell: RawCell) -> Self {
        self.cells.push(cell);
        self
    }

    /// Page number from the first bounding region, 1 when there is none.
    pub fn page_number(&self) -> u32 {
        page_of(&self.bounding_regions)
    }
}

/// A table cell as reported by the analysis service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCell {
    /// Cell kind; absent for plain content cells
    #[serde(default)]
    pub kind: Option<CellKind>,

    /// Row index (0-based)
    #[serde(default, alias = "rowIndex")]
    pub row_index: usize,

    /// Column index (0-based)
    #[serde(default, alias = "columnIndex")]
    pub column_index: usize,

    /// Number of rows covered
    #[serde(default = "single_span", alias = "rowSpan")]
    pub row_span: usize,

    /// Number of columns covered
    #[serde(default = "single_span", alias = "columnSpan")]
    pub column_span: usize,

    /// Text content
    #[serde(default)]
    pub content: String,
}

impl RawCell {
    /// Create a single-slot content cell.
    pub fn new(row_index: usize, column_index: usize, content: impl Into<String>) -> Self {
        Self {
            kind: None,
            row_index,
            column_index,
            row_span: 1,
            column_span: 1,
            content: content.into(),
        }
    }

    /// Create a single-slot column header cell.
    pub fn header(row_index: usize, column_index: usize, content: impl Into<String>) -> Self {
        Self::new(row_index, column_index, content).kind(CellKind::ColumnHeader)
    }

    /// Set the spans and return self.
    pub fn span(mut self, row_span: usize, column_span: usize) -> Self {
        self.row_span = row_span;
        self.column_span = column_span;
        self
    }

    /// Set the kind and return self.
    pub fn kind(mut self, kind: CellKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

/// Page count for `len` entries, saturating at `u32::MAX`.
pub(crate) fn page_count_of(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

fn first_page() -> u32 {
    1
}

fn single_span() -> usize {
    1
}

fn page_of(regions: &[BoundingRegion]) -> u32 {
    regions.first().map(|r| r.page_number).unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_camel_case() {
        let json = r#"{
            "pages": [{"pageNumber": 1}, {"pageNumber": 2}],
            "paragraphs": [
                {"role": "title", "content": "Report", "boundingRegions": [{"pageNumber": 2, "polygon": [1, 2]}]}
            ],
            "tables": [{
                "rowCount": 1,
                "columnCount": 2,
                "cells": [
                    {"kind": "columnHeader", "rowIndex": 0, "columnIndex": 0, "content": "A"},
                    {"rowIndex": 0, "columnIndex": 1, "columnSpan": 1, "content": "B"}
                ],
                "boundingRegions": [{"pageNumber": 1}]
            }]
        }"#;

        let analysis = AnalysisResult::from_json(json).unwrap();
        assert_eq!(analysis.page_count(), 2);
        assert_eq!(analysis.paragraphs[0].page_number(), 2);
        assert_eq!(analysis.paragraphs[0].role.as_deref(), Some("title"));

        let table = &analysis.tables[0];
        assert_eq!(table.column_count, 2);
        assert_eq!(table.cells[0].kind, Some(CellKind::ColumnHeader));
        assert_eq!(table.cells[1].kind, None);
        assert_eq!(table.cells[1].row_span, 1);
    }

    #[test]
    fn test_page_count_saturates() {
        assert_eq!(page_count_of(0), 0);
        assert_eq!(page_count_of(3), 3);
        assert_eq!(page_count_of(usize::MAX), u32::MAX);
    }

    #[test]
    fn test_parse_snake_case() {
        let json = r#"{
            "tables": [{
                "row_count": 2,
                "column_count": 1,
                "cells": [{"row_index": 1, "column_index": 0, "row_span": 1, "column_span": 1, "content": "x"}],
                "bounding_regions": [{"page_number": 3}]
            }]
        }"#;

        let analysis = AnalysisResult::from_json(json).unwrap();
        assert_eq!(analysis.page_count(), 1);
        assert_eq!(analysis.tables[0].page_number(), 3);
        assert_eq!(analysis.tables[0].cells[0].row_index, 1);
    }

    #[test]
    fn test_missing_bounding_region_defaults_to_first_page() {
        let para = RawParagraph {
            content: "loose".to_string(),
            ..Default::default()
        };
        assert_eq!(para.page_number(), 1);
    }

    #[test]
    fn test_invalid_json() {
        assert!(AnalysisResult::from_json("{\"tables\": 5}").is_err());
    }
}
