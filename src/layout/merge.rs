//! Placing table blocks into a page's paragraph flow.
//!
//! Layout analysis often reports a table's cell text a second time as loose
//! paragraphs. A table replaces the run of paragraphs that echo its cells,
//! which also puts it where its text sat in reading order.

use crate::model::ContentBlock;

/// Where a table block ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Replaced paragraphs `start..=end` (indices before the merge)
    Replaced { start: usize, end: usize },
    /// No paragraph matched; the table was appended
    Appended,
}

/// Merge one table block into `blocks`.
///
/// Paragraph blocks containing any of `flat_text` as a substring are
/// matches. The span from the first to the last match is replaced by the
/// table; table blocks inside that span stay, in order, ahead of it.
pub fn merge_table(
    blocks: &mut Vec<ContentBlock>,
    table: ContentBlock,
    flat_text: &[String],
) -> MergeOutcome {
    let mut matches = blocks
        .iter()
        .enumerate()
        .filter(|(_, block)| block.is_paragraph() && contains_any(&block.content, flat_text))
        .map(|(i, _)| i);

    let Some(start) = matches.next() else {
        blocks.push(table);
        return MergeOutcome::Appended;
    };
    let end = matches.last().unwrap_or(start);

    let tail = blocks.split_off(end + 1);
    let replaced = blocks.split_off(start);
    blocks.extend(replaced.into_iter().filter(ContentBlock::is_table));
    blocks.push(table);
    blocks.extend(tail);

    MergeOutcome::Replaced { start, end }
}

fn contains_any(text: &str, tokens: &[String]) -> bool {
    tokens.iter().any(|token| text.contains(token.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraphs(texts: &[&str]) -> Vec<ContentBlock> {
        texts
            .iter()
            .map(|t| ContentBlock::paragraph("paragraph", *t))
            .collect()
    }

    fn contents(blocks: &[ContentBlock]) -> Vec<&str> {
        blocks.iter().map(|b| b.content.as_str()).collect()
    }

    fn flat(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_replaces_matching_span() {
        let mut blocks = paragraphs(&["intro text", "A B C", "outro text"]);
        let outcome = merge_table(&mut blocks, ContentBlock::table("<table>"), &flat(&["B", "C"]));

        assert_eq!(outcome, MergeOutcome::Replaced { start: 1, end: 1 });
        assert_eq!(contents(&blocks), vec!["intro text", "<table>", "outro text"]);
        assert!(blocks[1].is_table());
    }

    #[test]
    fn test_span_covers_unmatched_paragraphs_between_matches() {
        let mut blocks = paragraphs(&["head", "Total", "stray", "42", "tail"]);
        merge_table(&mut blocks, ContentBlock::table("T"), &flat(&["Total", "42"]));
        assert_eq!(contents(&blocks), vec!["head", "T", "tail"]);
    }

    #[test]
    fn test_appends_without_match() {
        let mut blocks = paragraphs(&["alpha", "beta"]);
        let outcome = merge_table(&mut blocks, ContentBlock::table("T"), &flat(&["gamma"]));

        assert_eq!(outcome, MergeOutcome::Appended);
        assert_eq!(contents(&blocks), vec!["alpha", "beta", "T"]);
    }

    #[test]
    fn test_empty_flat_text_appends() {
        let mut blocks = paragraphs(&["alpha"]);
        let outcome = merge_table(&mut blocks, ContentBlock::table("T"), &[]);
        assert_eq!(outcome, MergeOutcome::Appended);
    }

    #[test]
    fn test_earlier_table_inside_span_is_kept() {
        let mut blocks = vec![
            ContentBlock::paragraph("paragraph", "x1"),
            ContentBlock::table("first table mentions x2"),
            ContentBlock::paragraph("paragraph", "x2"),
        ];
        merge_table(&mut blocks, ContentBlock::table("second"), &flat(&["x1", "x2"]));

        assert_eq!(contents(&blocks), vec!["first table mentions x2", "second"]);
        assert!(blocks.iter().all(ContentBlock::is_table));
    }

    #[test]
    fn test_match_is_case_sensitive_substring() {
        let mut blocks = paragraphs(&["Revenue grew", "revenue"]);
        merge_table(&mut blocks, ContentBlock::table("T"), &flat(&["Revenue"]));
        assert_eq!(contents(&blocks), vec!["T", "revenue"]);
    }
}
