//! One-chunk-per-page splitting of page-delimited document text.

use regex::Regex;
use std::sync::OnceLock;

use crate::error::Result;
use crate::model::Chunk;

use super::{ChunkOptions, KeySanitizer, Sanitizer, TokenCounter};

static DEFAULT_SANITIZER: KeySanitizer = KeySanitizer;

/// A page recovered from delimited text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSection<'t> {
    /// Number written in the page's delimiter
    pub label: &'t str,

    /// Text between this delimiter and the next, untrimmed
    pub content: &'t str,
}

/// Split delimited text into pages, in order.
///
/// Text before the first `=== Page N ===` line belongs to no page and is
/// ignored.
pub fn split_pages(text: &str) -> Vec<PageSection<'_>> {
    let markers: Vec<_> = marker_regex().captures_iter(text).collect();

    markers
        .iter()
        .enumerate()
        .filter_map(|(i, caps)| {
            let whole = caps.get(0)?;
            let label = caps.get(1)?.as_str();
            let end = markers
                .get(i + 1)
                .and_then(|next| next.get(0))
                .map(|m| m.start())
                .unwrap_or(text.len());
            Some(PageSection {
                label,
                content: &text[whole.end()..end],
            })
        })
        .collect()
}

fn marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"=== Page (\d+) ===").expect("valid page marker pattern"))
}

/// Emits one chunk per page of delimited text, dropping low-content pages.
pub struct PageChunker<'a, C: ?Sized, S: ?Sized = KeySanitizer> {
    counter: &'a C,
    sanitizer: &'a S,
    options: ChunkOptions,
}

impl<'a, C: TokenCounter + ?Sized> PageChunker<'a, C, KeySanitizer> {
    /// Create a chunker with the default key sanitizer.
    pub fn new(counter: &'a C) -> Self {
        Self {
            counter,
            sanitizer: &DEFAULT_SANITIZER,
            options: ChunkOptions::default(),
        }
    }
}

impl<'a, C, S> PageChunker<'a, C, S>
where
    C: TokenCounter + ?Sized,
    S: Sanitizer + ?Sized,
{
    /// Use a different sanitizer.
    pub fn with_sanitizer<S2: Sanitizer + ?Sized>(self, sanitizer: &'a S2) -> PageChunker<'a, C, S2> {
        PageChunker {
            counter: self.counter,
            sanitizer,
            options: self.options,
        }
    }

    /// Set chunk options.
    pub fn with_options(mut self, options: ChunkOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the token threshold at or below which pages are dropped.
    pub fn with_min_tokens(mut self, min_tokens: usize) -> Self {
        self.options.min_tokens = min_tokens;
        self
    }

    /// Current options.
    pub fn options(&self) -> &ChunkOptions {
        &self.options
    }

    /// Chunk delimited text belonging to `filename`.
    ///
    /// Pages are visited in order and the token counter is called once per
    /// page. Counter and sanitizer errors are returned unchanged.
    pub fn chunk(&self, text: &str, filename: &str) -> Result<Vec<Chunk>> {
        let mut chunks = Vec::new();
        let mut sanitized: Option<String> = None;

        for section in split_pages(text) {
            let content = section.content.trim();
            let tokens = self.counter.count_tokens(content)?;
            if tokens <= self.options.min_tokens {
                log::debug!(
                    "Dropping page {} of {}: {} tokens (minimum {})",
                    section.label,
                    filename,
                    tokens,
                    self.options.min_tokens
                );
                continue;
            }

            if sanitized.is_none() {
                sanitized = Some(self.sanitizer.sanitize(filename)?);
            }
            let key = sanitized.as_deref().unwrap_or_default();

            chunks.push(Chunk {
                content: content.to_string(),
                page_number: section.label.to_string(),
                filename: filename.to_string(),
                chunk_id: self.options.id_strategy.chunk_id(key, section.label, content),
            });
        }

        log::debug!("Chunked {} into {} page chunks", filename, chunks.len());
        Ok(chunks)
    }
}
