//! Rendering module: tables to text, pages to page-delimited document text.

mod cleanup;
mod json;
mod options;
mod result;
mod table;
mod text;

pub use cleanup::{CleanupOptions, CleanupPipeline, CleanupPreset};
pub use json::{to_json, JsonFormat};
pub use options::{PageLabel, RenderMode, RenderOptions};
pub use result::{ExtractionStats, Reconstruction};
pub use table::{
    render_reconstructed, render_table, to_json_table, to_raw_grid, to_tabular, RenderedTable,
};
pub use text::{
    assemble_page, assemble_pages, page_delimiter, reconstruct_pages, to_delimited_text, to_text,
};
