//! # pageweave
//!
//! Page-aware text reconstruction and chunking for layout-analysis output.
//!
//! A layout analysis service returns paragraphs and tables tagged with page
//! numbers. This library rebuilds each table as a grid, renders it as text,
//! merges it into the paragraph flow where its cells were also extracted as
//! loose paragraphs, and assembles a page-delimited document. That document
//! is then cut into one retrieval chunk per page.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pageweave::{chunk, reconstruct, AnalysisResult, RenderMode, WhitespaceTokenCounter};
//!
//! fn main() -> pageweave::Result<()> {
//!     let json = std::fs::read_to_string("analysis.json")?;
//!     let analysis = AnalysisResult::from_json(&json)?;
//!
//!     let text = reconstruct(&analysis, RenderMode::Tabular, false)?;
//!     let chunks = chunk(&text, "report.pdf", &WhitespaceTokenCounter, 20)?;
//!     for c in &chunks {
//!         println!("{}: {} chars", c.chunk_id, c.content.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Table reconstruction**: spans, header rows, duplicate-row removal
//! - **Layout merge**: tables replace the paragraphs they duplicate
//! - **Page chunking**: token threshold with pluggable counters
//! - **Window splitting**: overlapping token windows for raw page text
//! - **Parallel batches**: one rayon task per document

pub mod batch;
pub mod chunk;
pub mod error;
pub mod layout;
pub mod model;
pub mod pipeline;
pub mod render;
pub mod table;

// Re-export commonly used types
pub use batch::{process_batch, reconstruct_batch, BatchItem};
pub use chunk::{
    BpeTokenCounter, ChunkIdStrategy, ChunkOptions, EstimateTokenCounter, KeySanitizer,
    PageChunker, Sanitizer, TokenCounter, WhitespaceTokenCounter, WindowOptions, WindowSplitter,
    DEFAULT_MIN_TOKENS,
};
pub use error::{Error, Result};
pub use model::{
    AnalysisResult, Cell, CellKind, Chunk, ContentBlock, Page, Paragraph, RawCell, RawParagraph,
    RawTable, Table,
};
pub use pipeline::{PipelineOptions, ProcessedDocument};
pub use render::{
    CleanupOptions, CleanupPreset, ExtractionStats, JsonFormat, PageLabel, Reconstruction,
    RenderMode, RenderOptions,
};

use std::path::Path;

/// Reconstruct an analysis result into page-delimited text.
///
/// # Arguments
///
/// * `analysis` - Layout analysis output
/// * `mode` - How tables are rendered
/// * `tag_blocks` - Prefix each block with `##TABLE##` or `##PARAGRAPH##`
///
/// # Example
///
/// ```
/// use pageweave::{reconstruct, AnalysisResult, RawParagraph, RenderMode};
///
/// let mut analysis = AnalysisResult::new();
/// analysis.paragraphs.push(RawParagraph::new("Hello", 1));
///
/// let text = reconstruct(&analysis, RenderMode::Tabular, false).unwrap();
/// assert_eq!(text, "=== Page 1 ===\nHello");
/// ```
pub fn reconstruct(analysis: &AnalysisResult, mode: RenderMode, tag_blocks: bool) -> Result<String> {
    let options = RenderOptions::new().with_mode(mode).with_tags(tag_blocks);
    render::to_text(analysis, &options)
}

/// Reconstruct an analysis result with full render options.
pub fn reconstruct_with_options(analysis: &AnalysisResult, options: &RenderOptions) -> Result<String> {
    render::to_text(analysis, options)
}

/// Cut page-delimited text into one chunk per page.
///
/// Pages whose token count is at or below `min_tokens` are dropped. Chunk
/// ids use the default [`KeySanitizer`].
///
/// # Example
///
/// ```
/// use pageweave::{chunk, WhitespaceTokenCounter};
///
/// let text = "=== Page 1 ===\ntoo short\n\n=== Page 2 ===\nlong enough to keep";
/// let chunks = chunk(text, "a.pdf", &WhitespaceTokenCounter, 2).unwrap();
/// assert_eq!(chunks.len(), 1);
/// assert_eq!(chunks[0].chunk_id, "a_pdf_p2");
/// ```
pub fn chunk<C: TokenCounter + ?Sized>(
    text: &str,
    filename: &str,
    counter: &C,
    min_tokens: usize,
) -> Result<Vec<Chunk>> {
    PageChunker::new(counter)
        .with_min_tokens(min_tokens)
        .chunk(text, filename)
}

/// Load an analysis result from a JSON file.
pub fn load_analysis<P: AsRef<Path>>(path: P) -> Result<AnalysisResult> {
    let file = std::fs::File::open(path)?;
    AnalysisResult::from_reader(std::io::BufReader::new(file))
}

/// Builder for reconstructing and chunking documents.
///
/// # Example
///
/// ```no_run
/// use pageweave::{Pageweave, RenderMode, WhitespaceTokenCounter};
///
/// let result = Pageweave::new()
///     .with_render_mode(RenderMode::Tabular)
///     .with_tags(true)
///     .with_min_tokens(10)
///     .load("analysis.json")?;
///
/// let text = result.to_text();
/// let chunks = result.chunk("report.pdf", &WhitespaceTokenCounter)?;
/// # Ok::<(), pageweave::Error>(())
/// ```
pub struct Pageweave {
    options: PipelineOptions,
}

impl Pageweave {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            options: PipelineOptions::default(),
        }
    }

    /// Use a complete options record.
    pub fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the table render mode.
    pub fn with_render_mode(mut self, mode: RenderMode) -> Self {
        self.options = self.options.with_render_mode(mode);
        self
    }

    /// Prefix blocks with role tags.
    pub fn with_tags(mut self, tag_blocks: bool) -> Self {
        self.options = self.options.with_tags(tag_blocks);
        self
    }

    /// Set delimiter numbering.
    pub fn with_page_label(mut self, label: PageLabel) -> Self {
        self.options = self.options.with_page_label(label);
        self
    }

    /// Set cleanup preset.
    pub fn with_cleanup(mut self, preset: CleanupPreset) -> Self {
        self.options.render = self.options.render.with_cleanup_preset(preset);
        self
    }

    /// Set the minimum chunk token count.
    pub fn with_min_tokens(mut self, min_tokens: usize) -> Self {
        self.options = self.options.with_min_tokens(min_tokens);
        self
    }

    /// Set the chunk id strategy.
    pub fn with_id_strategy(mut self, strategy: ChunkIdStrategy) -> Self {
        self.options = self.options.with_id_strategy(strategy);
        self
    }

    /// Reconstruct an analysis result.
    pub fn reconstruct(self, analysis: &AnalysisResult) -> Result<PageweaveResult> {
        let reconstruction = render::reconstruct_pages(analysis, &self.options.render)?;
        Ok(PageweaveResult {
            reconstruction,
            options: self.options,
        })
    }

    /// Load and reconstruct an analysis JSON file.
    pub fn load<P: AsRef<Path>>(self, path: P) -> Result<PageweaveResult> {
        let analysis = load_analysis(path)?;
        self.reconstruct(&analysis)
    }

    /// Parse and reconstruct analysis JSON.
    pub fn from_json(self, json: &str) -> Result<PageweaveResult> {
        let analysis = AnalysisResult::from_json(json)?;
        self.reconstruct(&analysis)
    }
}

impl Default for Pageweave {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of reconstructing a document.
pub struct PageweaveResult {
    /// Pages and statistics
    pub reconstruction: Reconstruction,
    /// Options to use for text and chunks
    options: PipelineOptions,
}

impl PageweaveResult {
    /// Page-delimited document text.
    pub fn to_text(&self) -> String {
        self.reconstruction
            .to_delimited_text(self.options.render.page_label)
    }

    /// Convert pages and stats to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        self.reconstruction.to_json(format)
    }

    /// Chunk the document text with the default sanitizer.
    pub fn chunk<C: TokenCounter + ?Sized>(&self, filename: &str, counter: &C) -> Result<Vec<Chunk>> {
        self.chunk_with(filename, counter, &KeySanitizer)
    }

    /// Chunk the document text with a custom sanitizer.
    pub fn chunk_with<C, S>(&self, filename: &str, counter: &C, sanitizer: &S) -> Result<Vec<Chunk>>
    where
        C: TokenCounter + ?Sized,
        S: Sanitizer + ?Sized,
    {
        PageChunker::new(counter)
            .with_sanitizer(sanitizer)
            .with_options(self.options.chunk.clone())
            .chunk(&self.to_text(), filename)
    }

    /// Extraction statistics.
    pub fn stats(&self) -> &ExtractionStats {
        &self.reconstruction.stats
    }

    /// Options this result was built with.
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }
}
