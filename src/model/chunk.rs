//! Chunk records emitted for indexing.

use serde::{Deserialize, Serialize};

/// A unit of text with identifying metadata, sized for indexing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Chunk text
    pub content: String,

    /// Page label the chunk came from
    pub page_number: String,

    /// Owning file name, unsanitized
    pub filename: String,

    /// Identifier derived from the sanitized file name and page
    pub chunk_id: String,
}

impl Chunk {
    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }

    /// Text to embed: file base name and page ahead of the content.
    pub fn embedding_text(&self) -> String {
        let name = self
            .filename
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(&self.filename);
        format!("Filename: {}\nPage number: {}\n{}", name, self.page_number, self.content)
    }
}
