//! Rendering options and configuration.

use super::{CleanupOptions, CleanupPreset};

/// Options for reconstructing document text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// How tables are rendered into text
    pub mode: RenderMode,

    /// Prefix each block with `##TABLE##` / `##PARAGRAPH##`
    pub tag_blocks: bool,

    /// Which number the `=== Page N ===` delimiter carries
    pub page_label: PageLabel,

    /// Cleanup applied to paragraph and cell text
    pub cleanup: CleanupOptions,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the table render mode.
    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    /// Enable or disable block tags.
    pub fn with_tags(mut self, tag_blocks: bool) -> Self {
        self.tag_blocks = tag_blocks;
        self
    }

    /// Set the page label numbering.
    pub fn with_page_label(mut self, label: PageLabel) -> Self {
        self.page_label = label;
        self
    }

    /// Set cleanup options.
    pub fn with_cleanup(mut self, cleanup: CleanupOptions) -> Self {
        self.cleanup = cleanup;
        self
    }

    /// Set cleanup preset.
    pub fn with_cleanup_preset(mut self, preset: CleanupPreset) -> Self {
        self.cleanup = CleanupOptions::from_preset(preset);
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            mode: RenderMode::Tabular,
            tag_blocks: false,
            page_label: PageLabel::Ordinal,
            cleanup: CleanupOptions::default(),
        }
    }
}

/// How a reconstructed table is turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Pipe-delimited grid table with a header separator
    #[default]
    Tabular,
    /// `{"fields": [...], "data": [[...]]}`
    Json,
    /// Tab-separated grid rows
    RawGrid,
}

impl RenderMode {
    /// Parse a mode name (`tabular`, `json`, `raw-grid`).
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tabular" | "markdown" => Ok(RenderMode::Tabular),
            "json" => Ok(RenderMode::Json),
            "raw-grid" | "raw_grid" | "raw" => Ok(RenderMode::RawGrid),
            other => Err(format!("Unknown render mode: {}", other)),
        }
    }
}

/// Numbering used in `=== Page N ===` delimiters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageLabel {
    /// Position among emitted (non-empty) pages, starting at 1
    #[default]
    Ordinal,
    /// The page's number in the source document
    Source,
}
