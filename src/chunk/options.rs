//! Chunking options.

use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};

/// Pages with this many tokens or fewer are dropped.
pub const DEFAULT_MIN_TOKENS: usize = 20;

/// How chunk ids are built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkIdStrategy {
    /// `{sanitized}_p{page}`
    #[default]
    PageOnly,
    /// `{sanitized}_p{page}_{hash}` with the first 8 hex digits of the
    /// content's MD5 digest
    ContentHash,
}

impl ChunkIdStrategy {
    /// Build an id for a chunk of `content` on page `label` of the document
    /// whose sanitized name is `key`.
    pub fn chunk_id(&self, key: &str, label: &str, content: &str) -> String {
        match self {
            Self::PageOnly => format!("{}_p{}", key, label),
            Self::ContentHash => {
                let digest = Md5::digest(content.as_bytes());
                let hex: String = digest.iter().take(4).map(|b| format!("{:02x}", b)).collect();
                format!("{}_p{}_{}", key, label, hex)
            }
        }
    }

    /// Parse a strategy name.
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "page" | "page-only" | "page_only" => Ok(Self::PageOnly),
            "hash" | "content-hash" | "content_hash" => Ok(Self::ContentHash),
            _ => Err(format!("Unknown chunk id strategy: {}", s)),
        }
    }
}

/// Options for page chunking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkOptions {
    /// Pages whose token count is at or below this are dropped
    pub min_tokens: usize,

    /// Chunk id layout
    pub id_strategy: ChunkIdStrategy,
}

impl Default for ChunkOptions {
    fn default() -> Self {
        Self {
            min_tokens: DEFAULT_MIN_TOKENS,
            id_strategy: ChunkIdStrategy::default(),
        }
    }
}

impl ChunkOptions {
    /// Create default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the token threshold.
    pub fn with_min_tokens(mut self, min_tokens: usize) -> Self {
        self.min_tokens = min_tokens;
        self
    }

    /// Set the chunk id strategy.
    pub fn with_id_strategy(mut self, strategy: ChunkIdStrategy) -> Self {
        self.id_strategy = strategy;
        self
    }
}
