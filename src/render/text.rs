//! Page text assembly and page-delimited document text.

use crate::error::Result;
use crate::layout::{arrange, PageGroups};
use crate::model::{AnalysisResult, ContentBlock, Page};

use super::{ExtractionStats, PageLabel, Reconstruction, RenderOptions};

/// Delimiter line that opens page `number` in document text.
pub fn page_delimiter(number: u32) -> String {
    format!("=== Page {} ===", number)
}

/// Join a page's blocks into its text, one block per line.
pub fn assemble_page(number: u32, blocks: Vec<ContentBlock>, tagged: bool) -> Page {
    let text = blocks
        .iter()
        .map(|block| block.text(tagged))
        .collect::<Vec<_>>()
        .join("\n");
    Page {
        number,
        blocks,
        text,
    }
}

/// Assemble every page of a grouped layout, in page order.
pub fn assemble_pages(groups: PageGroups<ContentBlock>, tagged: bool) -> Vec<Page> {
    groups
        .into_iter()
        .map(|(number, blocks)| assemble_page(number, blocks, tagged))
        .collect()
}

/// Join pages into one delimited document.
///
/// Pages with only whitespace are skipped. Each remaining page is written
/// as its delimiter line, its trimmed text and a blank line; the result is
/// trimmed. With `PageLabel::Ordinal` the delimiter counts emitted pages, so
/// labels shift when interior pages are skipped.
pub fn to_delimited_text(pages: &[Page], label: PageLabel) -> String {
    let mut output = String::new();
    let mut ordinal = 0;

    for page in pages {
        let text = page.text.trim();
        if text.is_empty() {
            continue;
        }
        ordinal += 1;
        let number = match label {
            PageLabel::Ordinal => ordinal,
            PageLabel::Source => page.number,
        };
        output.push_str(&page_delimiter(number));
        output.push('\n');
        output.push_str(text);
        output.push_str("\n\n");
    }

    output.trim().to_string()
}

/// Reconstruct all pages of an analysis result.
pub fn reconstruct_pages(analysis: &AnalysisResult, options: &RenderOptions) -> Result<Reconstruction> {
    let mut stats = ExtractionStats::new();
    let groups = arrange(analysis, options, &mut stats)?;
    let pages = assemble_pages(groups, options.tag_blocks);

    for page in &pages {
        stats.add_page();
        if page.is_empty() {
            stats.empty_page_count += 1;
        }
        stats.count_text(&page.text);
    }

    Ok(Reconstruction::new(pages, stats))
}

/// Reconstruct an analysis result into page-delimited document text.
pub fn to_text(analysis: &AnalysisResult, options: &RenderOptions) -> Result<String> {
    let result = reconstruct_pages(analysis, options)?;
    Ok(result.to_delimited_text(options.page_label))
}
