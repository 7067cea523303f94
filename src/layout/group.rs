//! Bucketing paragraphs and tables by page.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::model::{page_count_of, ContentBlock, Paragraph};
use crate::render::RenderedTable;

/// Content of every page `1..=page_count`, keyed by page number.
///
/// Every page in range has an entry, even when nothing lands on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageGroups<T> {
    pages: BTreeMap<u32, Vec<T>>,
}

impl<T> PageGroups<T> {
    /// Create empty entries for pages `1..=page_count`.
    pub fn new(page_count: u32) -> Self {
        Self {
            pages: (1..=page_count).map(|p| (p, Vec::new())).collect(),
        }
    }

    /// Number of pages.
    pub fn page_count(&self) -> u32 {
        page_count_of(self.pages.len())
    }

    /// Append an item to a page, rejecting pages outside the range.
    pub fn push(&mut self, page_number: u32, item: T) -> Result<()> {
        let page_count = self.page_count();
        self.pages
            .get_mut(&page_number)
            .ok_or(Error::PageOutOfRange(page_number, page_count))?
            .push(item);
        Ok(())
    }

    /// Items on a page.
    pub fn get(&self, page_number: u32) -> &[T] {
        self.pages.get(&page_number).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Take the items of a page, leaving it empty.
    pub fn take(&mut self, page_number: u32) -> Vec<T> {
        self.pages
            .get_mut(&page_number)
            .map(std::mem::take)
            .unwrap_or_default()
    }

    /// Iterate pages in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &[T])> {
        self.pages.iter().map(|(p, items)| (*p, items.as_slice()))
    }
}

impl<T> IntoIterator for PageGroups<T> {
    type Item = (u32, Vec<T>);
    type IntoIter = std::collections::btree_map::IntoIter<u32, Vec<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.into_iter()
    }
}

/// Group paragraphs into page blocks, keeping document order.
pub fn group_paragraphs(paragraphs: &[Paragraph], page_count: u32) -> Result<PageGroups<ContentBlock>> {
    let mut groups = PageGroups::new(page_count);
    for para in paragraphs {
        groups.push(para.page_number, ContentBlock::from(para))?;
    }
    Ok(groups)
}

/// Group rendered tables by page, keeping document order.
pub fn group_tables(tables: Vec<RenderedTable>, page_count: u32) -> Result<PageGroups<RenderedTable>> {
    let mut groups = PageGroups::new(page_count);
    for table in tables {
        groups.push(table.page_number, table)?;
    }
    Ok(groups)
}
