//! Page-level types.

use super::Paragraph;
use serde::{Deserialize, Serialize};

/// Tag prefixed to table blocks in tagged output.
pub const TABLE_TAG: &str = "##TABLE##";

/// Tag prefixed to paragraph blocks in tagged output.
pub const PARAGRAPH_TAG: &str = "##PARAGRAPH##";

/// A reconstructed page: ordered blocks and their assembled text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,

    /// Content blocks in reading order
    pub blocks: Vec<ContentBlock>,

    /// Block contents joined by newlines
    pub text: String,
}

impl Page {
    /// Check if the page carries no text.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Get the number of blocks on the page.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Number of table blocks on the page.
    pub fn table_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_table()).count()
    }
}

/// A normalized unit of page content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    /// What kind of content this is
    pub role: BlockRole,

    /// Text (for tables, the rendered table)
    pub content: String,
}

impl ContentBlock {
    /// Create a paragraph-like block.
    pub fn paragraph(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: BlockRole::Paragraph(role.into()),
            content: content.into(),
        }
    }

    /// Create a table block from rendered table text.
    pub fn table(content: impl Into<String>) -> Self {
        Self {
            role: BlockRole::Table,
            content: content.into(),
        }
    }

    /// Check if this block is a table.
    pub fn is_table(&self) -> bool {
        matches!(self.role, BlockRole::Table)
    }

    /// Check if this block is a paragraph.
    pub fn is_paragraph(&self) -> bool {
        matches!(self.role, BlockRole::Paragraph(_))
    }

    /// Block content, prefixed by its role tag when `tagged` is set.
    pub fn text(&self, tagged: bool) -> String {
        if !tagged {
            return self.content.clone();
        }
        let tag = if self.is_table() {
            TABLE_TAG
        } else {
            PARAGRAPH_TAG
        };
        format!("{}\n{}", tag, self.content)
    }
}

impl From<&Paragraph> for ContentBlock {
    fn from(para: &Paragraph) -> Self {
        ContentBlock::paragraph(para.role.clone(), para.content.clone())
    }
}

/// Role of a content block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockRole {
    /// Paragraph-like text with its analysis role
    Paragraph(String),
    /// Rendered table
    Table,
}

impl BlockRole {
    /// Role name as written in output.
    pub fn as_str(&self) -> &str {
        match self {
            BlockRole::Paragraph(role) => role,
            BlockRole::Table => "table",
        }
    }
}

impl From<String> for BlockRole {
    fn from(role: String) -> Self {
        if role == "table" {
            BlockRole::Table
        } else {
            BlockRole::Paragraph(role)
        }
    }
}

impl From<BlockRole> for String {
    fn from(role: BlockRole) -> Self {
        role.as_str().to_string()
    }
}
