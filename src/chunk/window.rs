//! Overlapping token windows for unstructured page text.

use std::cell::RefCell;

use serde::{Deserialize, Serialize};
use text_splitter::{ChunkConfig, ChunkSizer, TextSplitter};

use crate::error::{Error, Result};
use crate::model::Chunk;

use super::{Sanitizer, TokenCounter};

/// Options for the window splitter. Sizes are in tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowOptions {
    /// Maximum tokens per window
    pub chunk_size: usize,

    /// Tokens carried over from the end of one window into the next
    pub chunk_overlap: usize,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

impl WindowOptions {
    /// Set the window size.
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    /// Set the overlap.
    pub fn with_chunk_overlap(mut self, overlap: usize) -> Self {
        self.chunk_overlap = overlap;
        self
    }

    /// Check that the options describe a usable window.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(Error::InvalidConfig("chunk size must be greater than 0".into()));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(Error::InvalidConfig(format!(
                "chunk overlap ({}) must be smaller than chunk size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }
        Ok(())
    }
}

/// Sizes text-splitter chunks with a [`TokenCounter`].
///
/// `ChunkSizer` cannot fail, so the first counter error is parked in `error`
/// and the chunk is sized as empty.
struct CounterSizer<'s, C: ?Sized> {
    counter: &'s C,
    error: &'s RefCell<Option<Error>>,
}

impl<C: TokenCounter + ?Sized> ChunkSizer for CounterSizer<'_, C> {
    fn size(&self, chunk: &str) -> usize {
        match self.counter.count_tokens(chunk) {
            Ok(count) => count,
            Err(e) => {
                let mut slot = self.error.borrow_mut();
                if slot.is_none() {
                    *slot = Some(e);
                }
                0
            }
        }
    }
}

/// Splits text into overlapping windows measured by a token counter.
pub struct WindowSplitter<'a, C: ?Sized> {
    counter: &'a C,
    options: WindowOptions,
}

impl<'a, C: TokenCounter + ?Sized> WindowSplitter<'a, C> {
    /// Create a splitter, validating the options.
    pub fn new(counter: &'a C, options: WindowOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { counter, options })
    }

    /// Splitter options.
    pub fn options(&self) -> &WindowOptions {
        &self.options
    }

    /// Split `text` into trimmed windows of at most `chunk_size` tokens.
    ///
    /// Boundaries prefer the coarsest unit that fits: blank lines, then
    /// lines, sentences, words and finally characters.
    pub fn split(&self, text: &str) -> Result<Vec<String>> {
        let error = RefCell::new(None);
        let sizer = CounterSizer {
            counter: self.counter,
            error: &error,
        };
        let config = ChunkConfig::new(self.options.chunk_size)
            .with_sizer(sizer)
            .with_trim(true)
            .with_overlap(self.options.chunk_overlap)
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;

        let windows: Vec<String> = TextSplitter::new(config)
            .chunks(text)
            .map(str::to_string)
            .collect();

        if let Some(e) = error.borrow_mut().take() {
            return Err(e);
        }
        Ok(windows)
    }

    /// Split each `(page_number, text)` pair into windows and wrap them as
    /// chunks with ids `{sanitized}_p{page}_c{i}`. Blank pages are skipped.
    pub fn chunk_pages<'t, I, S>(&self, pages: I, filename: &str, sanitizer: &S) -> Result<Vec<Chunk>>
    where
        I: IntoIterator<Item = (u32, &'t str)>,
        S: Sanitizer + ?Sized,
    {
        let key = sanitizer.sanitize(filename)?;
        let mut chunks = Vec::new();

        for (page, text) in pages {
            if text.trim().is_empty() {
                continue;
            }
            for (i, window) in self.split(text)?.into_iter().enumerate() {
                chunks.push(Chunk {
                    content: window,
                    page_number: page.to_string(),
                    filename: filename.to_string(),
                    chunk_id: format!("{}_p{}_c{}", key, page, i),
                });
            }
        }

        log::debug!("Split {} into {} windows", filename, chunks.len());
        Ok(chunks)
    }
}
