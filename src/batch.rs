//! Parallel processing of many documents.
//!
//! Each document is reconstructed and chunked on its own rayon task. Work
//! inside one document stays sequential, so the token counter still sees
//! one document's pages in order.

use rayon::prelude::*;

use crate::chunk::{Sanitizer, TokenCounter};
use crate::error::Result;
use crate::model::AnalysisResult;
use crate::pipeline::{process, PipelineOptions, ProcessedDocument};

/// A named analysis result queued for batch processing.
#[derive(Debug, Clone)]
pub struct BatchItem {
    /// Source file name, used for chunk ids
    pub filename: String,

    /// Layout analysis of the file
    pub analysis: AnalysisResult,
}

impl BatchItem {
    /// Create a batch item.
    pub fn new(filename: impl Into<String>, analysis: AnalysisResult) -> Self {
        Self {
            filename: filename.into(),
            analysis,
        }
    }
}

/// Process every item in parallel.
///
/// Results come back in input order, one per item. A failing document does
/// not stop the others.
pub fn process_batch<C, S>(
    items: &[BatchItem],
    options: &PipelineOptions,
    counter: &C,
    sanitizer: &S,
) -> Vec<Result<ProcessedDocument>>
where
    C: TokenCounter + Sync + ?Sized,
    S: Sanitizer + Sync + ?Sized,
{
    items
        .par_iter()
        .map(|item| {
            let result = process(&item.analysis, &item.filename, options, counter, sanitizer);
            if let Err(ref e) = result {
                log::warn!("Failed to process {}: {}", item.filename, e);
            }
            result
        })
        .collect()
}

/// Reconstruct every item to page-delimited text in parallel, in input order.
pub fn reconstruct_batch(items: &[BatchItem], options: &PipelineOptions) -> Vec<Result<String>> {
    items
        .par_iter()
        .map(|item| {
            crate::render::reconstruct_pages(&item.analysis, &options.render)
                .map(|r| r.to_delimited_text(options.render.page_label))
        })
        .collect()
}
