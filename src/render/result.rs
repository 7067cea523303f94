//! Reconstruction result with pages and statistics.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::model::Page;
use serde::{Deserialize, Serialize};

use super::{to_delimited_text, JsonFormat, PageLabel};

/// A reconstructed document: assembled pages plus extraction statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reconstruction {
    /// Pages `1..=page_count` in order, empty ones included
    pub pages: Vec<Page>,

    /// Extraction statistics
    pub stats: ExtractionStats,
}

impl Reconstruction {
    /// Create a new reconstruction.
    pub fn new(pages: Vec<Page>, stats: ExtractionStats) -> Self {
        Self { pages, stats }
    }

    /// Get a page by number (1-indexed).
    pub fn get_page(&self, page_number: u32) -> Option<&Page> {
        self.pages.iter().find(|p| p.number == page_number)
    }

    /// Page text keyed by page number.
    pub fn page_texts(&self) -> BTreeMap<u32, &str> {
        self.pages
            .iter()
            .map(|p| (p.number, p.text.as_str()))
            .collect()
    }

    /// Page texts in page order.
    pub fn page_text_list(&self) -> Vec<&str> {
        self.pages.iter().map(|p| p.text.as_str()).collect()
    }

    /// Page-delimited document text.
    pub fn to_delimited_text(&self, label: PageLabel) -> String {
        to_delimited_text(&self.pages, label)
    }

    /// Serialize pages and stats to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        super::to_json(self, format)
    }
}

/// Statistics collected during reconstruction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Total number of pages
    pub page_count: u32,

    /// Pages with no text after assembly
    pub empty_page_count: u32,

    /// Number of paragraphs read
    pub paragraph_count: u32,

    /// Number of tables read
    pub table_count: u32,

    /// Tables that replaced echoed paragraphs
    pub merged_table_count: u32,

    /// Tables appended at the end of their page
    pub appended_table_count: u32,

    /// Tables dropped because every row was empty
    pub empty_table_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl ExtractionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment table count.
    pub fn add_table(&mut self) {
        self.table_count += 1;
    }

    /// Increment page count.
    pub fn add_page(&mut self) {
        self.page_count += 1;
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &ExtractionStats) {
        self.page_count += other.page_count;
        self.empty_page_count += other.empty_page_count;
        self.paragraph_count += other.paragraph_count;
        self.table_count += other.table_count;
        self.merged_table_count += other.merged_table_count;
        self.appended_table_count += other.appended_table_count;
        self.empty_table_count += other.empty_table_count;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}
