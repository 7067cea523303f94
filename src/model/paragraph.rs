//! Paragraph types.

use super::RawParagraph;
use crate::render::CleanupPipeline;
use serde::{Deserialize, Serialize};

/// Role given to paragraphs the analysis did not classify.
pub const DEFAULT_ROLE: &str = "paragraph";

/// A paragraph of text content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Semantic role (paragraph, title, sectionHeading, ...)
    pub role: String,

    /// Text content
    pub content: String,

    /// Page the paragraph was found on (1-indexed)
    pub page_number: u32,
}

impl Paragraph {
    /// Create a plain paragraph on the given page.
    pub fn new(content: impl Into<String>, page_number: u32) -> Self {
        Self {
            role: DEFAULT_ROLE.to_string(),
            content: content.into(),
            page_number,
        }
    }

    /// Build a paragraph from raw analysis output, cleaning its text.
    pub fn from_raw(raw: &RawParagraph, cleanup: &CleanupPipeline) -> Self {
        Self {
            role: raw.role.clone().unwrap_or_else(|| DEFAULT_ROLE.to_string()),
            content: cleanup.process(&raw.content),
            page_number: raw.page_number(),
        }
    }

    /// Set the role and return self.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    /// Check if the paragraph is empty.
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_defaults_role() {
        let raw = RawParagraph::new("  Body text :unselected:", 2);
        let para = Paragraph::from_raw(&raw, &CleanupPipeline::default());

        assert_eq!(para.role, "paragraph");
        assert_eq!(para.content, "Body text");
        assert_eq!(para.page_number, 2);
    }

    #[test]
    fn test_from_raw_keeps_role() {
        let raw = RawParagraph::new("Annual Report", 1).with_role("title");
        let para = Paragraph::from_raw(&raw, &CleanupPipeline::default());
        assert_eq!(para.role, "title");
    }

    #[test]
    fn test_is_empty() {
        assert!(Paragraph::new("   ", 1).is_empty());
        assert!(!Paragraph::new("x", 1).is_empty());
    }
}
