//! Page layout: grouping content by page and merging tables into the flow.

mod group;
mod merge;

pub use group::{group_paragraphs, group_tables, PageGroups};
pub use merge::{merge_table, MergeOutcome};

use crate::error::Result;
use crate::model::{AnalysisResult, ContentBlock, Paragraph, Table};
use crate::render::{render_table, CleanupPipeline, ExtractionStats, RenderOptions};

/// Turn an analysis result into ordered content blocks per page.
///
/// Paragraphs are placed first in document order, then each page's tables
/// are merged in, also in document order.
pub fn arrange(
    analysis: &AnalysisResult,
    options: &RenderOptions,
    stats: &mut ExtractionStats,
) -> Result<PageGroups<ContentBlock>> {
    let cleanup = CleanupPipeline::new(options.cleanup.clone());
    let page_count = analysis.page_count();

    let paragraphs: Vec<Paragraph> = analysis
        .paragraphs
        .iter()
        .map(|raw| Paragraph::from_raw(raw, &cleanup))
        .collect();
    stats.paragraph_count += paragraphs.len() as u32;

    let mut rendered = Vec::with_capacity(analysis.tables.len());
    for raw in &analysis.tables {
        let table = Table::from_raw(raw, &cleanup);
        stats.add_table();
        match render_table(&table, options.mode)? {
            Some(t) => rendered.push(t),
            None => stats.empty_table_count += 1,
        }
    }

    let mut blocks = group_paragraphs(&paragraphs, page_count)?;
    let mut tables = group_tables(rendered, page_count)?;

    for page in 1..=page_count {
        let page_tables = tables.take(page);
        if page_tables.is_empty() {
            continue;
        }

        let mut page_blocks = blocks.take(page);
        for table in page_tables {
            match merge_table(&mut page_blocks, table.block, &table.flat_text) {
                MergeOutcome::Replaced { start, end } => {
                    log::debug!(
                        "Page {}: table replaced paragraphs {}..={}",
                        page,
                        start,
                        end
                    );
                    stats.merged_table_count += 1;
                }
                MergeOutcome::Appended => {
                    log::debug!("Page {}: no paragraph matched table text, appending", page);
                    stats.appended_table_count += 1;
                }
            }
        }
        for block in page_blocks {
            blocks.push(page, block)?;
        }
    }

    Ok(blocks)
}
