//! End-to-end processing of one document: reconstruction then chunking.

use serde::{Deserialize, Serialize};

use crate::chunk::{ChunkIdStrategy, ChunkOptions, PageChunker, Sanitizer, TokenCounter};
use crate::error::Result;
use crate::model::{AnalysisResult, Chunk};
use crate::render::{reconstruct_pages, PageLabel, Reconstruction, RenderMode, RenderOptions};

/// Options for a full reconstruct-and-chunk run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Reconstruction options
    pub render: RenderOptions,

    /// Chunking options
    pub chunk: ChunkOptions,
}

impl PipelineOptions {
    /// Create default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the table render mode.
    pub fn with_render_mode(mut self, mode: RenderMode) -> Self {
        self.render = self.render.with_mode(mode);
        self
    }

    /// Prefix blocks with role tags.
    pub fn with_tags(mut self, tag_blocks: bool) -> Self {
        self.render = self.render.with_tags(tag_blocks);
        self
    }

    /// Set how page delimiters are numbered.
    pub fn with_page_label(mut self, label: PageLabel) -> Self {
        self.render = self.render.with_page_label(label);
        self
    }

    /// Set the minimum chunk token count.
    pub fn with_min_tokens(mut self, min_tokens: usize) -> Self {
        self.chunk = self.chunk.with_min_tokens(min_tokens);
        self
    }

    /// Set the chunk id strategy.
    pub fn with_id_strategy(mut self, strategy: ChunkIdStrategy) -> Self {
        self.chunk = self.chunk.with_id_strategy(strategy);
        self
    }
}

/// Output of processing one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedDocument {
    /// Source file name
    pub filename: String,

    /// Page-delimited document text
    pub text: String,

    /// Chunks cut from `text`
    pub chunks: Vec<Chunk>,

    /// Pages and statistics behind `text`
    pub reconstruction: Reconstruction,
}

/// Reconstruct `analysis` and chunk the resulting text.
pub fn process<C, S>(
    analysis: &AnalysisResult,
    filename: &str,
    options: &PipelineOptions,
    counter: &C,
    sanitizer: &S,
) -> Result<ProcessedDocument>
where
    C: TokenCounter + ?Sized,
    S: Sanitizer + ?Sized,
{
    let reconstruction = reconstruct_pages(analysis, &options.render)?;
    let text = reconstruction.to_delimited_text(options.render.page_label);
    let chunks = PageChunker::new(counter)
        .with_sanitizer(sanitizer)
        .with_options(options.chunk.clone())
        .chunk(&text, filename)?;

    log::info!(
        "Processed {}: {} pages, {} chunks",
        filename,
        reconstruction.pages.len(),
        chunks.len()
    );

    Ok(ProcessedDocument {
        filename: filename.to_string(),
        text,
        chunks,
        reconstruction,
    })
}
