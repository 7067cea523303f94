//! Error types for pageweave library.

use std::io;
use thiserror::Error;

/// Result type alias for pageweave operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reconstructing or chunking a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The analysis result could not be deserialized.
    #[error("Invalid analysis JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A table cell covers coordinates outside the declared table size.
    #[error(
        "Cell at ({row}, {col}) spanning {row_span}x{col_span} exceeds table bounds {row_count}x{col_count}"
    )]
    CellOutOfBounds {
        row: usize,
        col: usize,
        row_span: usize,
        col_span: usize,
        row_count: usize,
        col_count: usize,
    },

    /// A table declares more grid slots than [`crate::table::MAX_GRID_SLOTS`].
    #[error("Table of {row_count}x{col_count} exceeds the {max} slot grid limit")]
    TableTooLarge {
        row_count: usize,
        col_count: usize,
        max: usize,
    },

    /// A table cell declares a zero row or column span.
    #[error("Cell at ({row}, {col}) has a zero span")]
    InvalidSpan { row: usize, col: usize },

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// The host token counter failed.
    #[error("Token counting failed: {0}")]
    Tokenizer(String),

    /// The host identifier sanitizer failed.
    #[error("Sanitizing failed: {0}")]
    Sanitize(String),

    /// Invalid configuration values.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Error during rendering (tabular, JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}
