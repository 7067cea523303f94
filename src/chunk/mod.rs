//! Chunking module: page-delimited text to retrieval chunks.
//!
//! [`PageChunker`] emits one chunk per `=== Page N ===` section and drops
//! pages too small to be useful. [`WindowSplitter`] cuts unstructured page
//! text into overlapping token windows.

mod options;
mod page;
mod sanitize;
mod tokenizer;
mod window;

pub use options::{ChunkIdStrategy, ChunkOptions, DEFAULT_MIN_TOKENS};
pub use page::{split_pages, PageChunker, PageSection};
pub use sanitize::{KeySanitizer, Sanitizer};
pub use tokenizer::{BpeTokenCounter, EstimateTokenCounter, TokenCounter, WhitespaceTokenCounter};
pub use window::{WindowOptions, WindowSplitter};
