//! Integration tests for reconstruction and chunking end to end.

use pageweave::model::{AnalyzedPage, ContentBlock};
use pageweave::table::reconstruct_table;
use pageweave::{
    chunk, reconstruct, AnalysisResult, Cell, Error, PageLabel, Pageweave, RawCell, RawParagraph,
    RawTable, RenderMode, Table, WhitespaceTokenCounter,
};

fn pages(n: u32) -> Vec<AnalyzedPage> {
    (1..=n).map(|page_number| AnalyzedPage { page_number }).collect()
}

fn words(prefix: &str, n: usize) -> String {
    (0..n)
        .map(|i| format!("{}{}", prefix, i))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Two header cells, the first spanning two columns, over one data row.
fn name_table() -> RawTable {
    RawTable::new(2, 3, 1)
        .with_cell(RawCell::header(0, 0, "Name").span(1, 2))
        .with_cell(RawCell::header(0, 2, "Name"))
        .with_cell(RawCell::new(1, 0, "Alice"))
        .with_cell(RawCell::new(1, 1, "30"))
        .with_cell(RawCell::new(1, 2, "NYC"))
}

#[test]
fn test_name_table_columns() {
    let table = Table::new(2, 3)
        .with_cell(Cell::header(0, 0, "Name").colspan(2))
        .with_cell(Cell::header(0, 2, "Name"))
        .with_cell(Cell::text(1, 0, "Alice"))
        .with_cell(Cell::text(1, 1, "30"))
        .with_cell(Cell::text(1, 2, "NYC"));

    let rebuilt = reconstruct_table(&table).unwrap();
    assert_eq!(rebuilt.frame.columns, vec!["Name", "Name ", "Name  "]);
    assert_eq!(rebuilt.frame.rows, vec![vec!["Alice", "30", "NYC"]]);

    // Unique names, and trimming trailing spaces gives the header text back
    let mut seen = std::collections::HashSet::new();
    for name in &rebuilt.frame.columns {
        assert!(seen.insert(name.clone()));
        assert_eq!(name.trim_end(), "Name");
    }
}

#[test]
fn test_name_table_rendered_in_page() {
    let mut analysis = AnalysisResult::new();
    analysis.pages = pages(1);
    analysis.tables = vec![name_table()];

    let text = reconstruct(&analysis, RenderMode::Tabular, false).unwrap();
    let expected = "\
=== Page 1 ===
| Name  | Name  | Name   |
|-------|-------|--------|
| Alice | 30    | NYC    |";
    assert_eq!(text, expected);
}

#[test]
fn test_table_replaces_echoed_paragraphs() {
    let mut analysis = AnalysisResult::new();
    analysis.pages = pages(1);
    analysis.paragraphs = vec![
        RawParagraph::new("intro text", 1),
        RawParagraph::new("Alice 30 NYC", 1),
        RawParagraph::new("outro text", 1),
    ];
    analysis.tables = vec![name_table()];

    let result = Pageweave::new().reconstruct(&analysis).unwrap();
    let blocks: &[ContentBlock] = &result.reconstruction.pages[0].blocks;

    assert_eq!(blocks.len(), 3);
    assert_eq!(blocks[0].content, "intro text");
    assert!(blocks[1].is_table());
    assert_eq!(blocks[2].content, "outro text");
    assert_eq!(result.stats().merged_table_count, 1);
}

#[test]
fn test_grid_shape_ignores_cell_order() {
    let cells = vec![
        Cell::text(2, 1, "f"),
        Cell::text(0, 0, "a"),
        Cell::text(1, 1, "d"),
        Cell::text(0, 1, "b"),
        Cell::text(2, 0, "e"),
        Cell::text(1, 0, "c"),
    ];
    let mut reversed = cells.clone();
    reversed.reverse();

    let grid = pageweave::table::build_grid(3, 2, &cells).unwrap();
    let other = pageweave::table::build_grid(3, 2, &reversed).unwrap();

    assert_eq!(grid.rows().len(), 3);
    assert!(grid.rows().iter().all(|row| row.len() == 2));
    assert_eq!(grid.rows(), other.rows());
}

#[test]
fn test_out_of_bounds_cell_is_fatal() {
    let mut analysis = AnalysisResult::new();
    analysis.tables = vec![RawTable::new(1, 1, 1).with_cell(RawCell::new(0, 3, "x"))];

    let err = reconstruct(&analysis, RenderMode::Tabular, false).unwrap_err();
    assert!(matches!(err, Error::CellOutOfBounds { .. }));
}

#[test]
fn test_declared_size_is_bounded() {
    let json = r#"{
        "tables": [{
            "rowCount": 4000000000,
            "columnCount": 4000000000,
            "cells": [{"rowIndex": 0, "columnIndex": 0, "content": "x"}],
            "boundingRegions": [{"pageNumber": 1}]
        }]
    }"#;
    let analysis = AnalysisResult::from_json(json).unwrap();

    let err = reconstruct(&analysis, RenderMode::Tabular, false).unwrap_err();
    assert!(matches!(err, Error::TableTooLarge { .. }));
}

#[test]
fn test_empty_pages_are_skipped_and_labels_follow_option() {
    let mut analysis = AnalysisResult::new();
    analysis.pages = pages(3);
    analysis.paragraphs = vec![RawParagraph::new("first", 1), RawParagraph::new("third", 3)];

    let ordinal = reconstruct(&analysis, RenderMode::Tabular, false).unwrap();
    assert_eq!(ordinal, "=== Page 1 ===\nfirst\n\n=== Page 2 ===\nthird");

    let source = Pageweave::new()
        .with_page_label(PageLabel::Source)
        .reconstruct(&analysis)
        .unwrap()
        .to_text();
    assert_eq!(source, "=== Page 1 ===\nfirst\n\n=== Page 3 ===\nthird");
}

#[test]
fn test_chunks_follow_page_order() {
    let mut analysis = AnalysisResult::new();
    analysis.pages = pages(4);
    analysis.paragraphs = (1..=4)
        .rev()
        .map(|page| RawParagraph::new(words(&format!("p{}w", page), 30), page))
        .collect();

    let text = reconstruct(&analysis, RenderMode::Tabular, false).unwrap();
    let chunks = chunk(&text, "report.pdf", &WhitespaceTokenCounter, 20).unwrap();

    let labels: Vec<u32> = chunks
        .iter()
        .map(|c| c.page_number.parse().unwrap())
        .collect();
    assert_eq!(labels, vec![1, 2, 3, 4]);
    assert!(chunks[0].content.starts_with("p1w0"));
    assert_eq!(chunks[3].chunk_id, "report_pdf_p4");
}

#[test]
fn test_reconstruct_then_chunk_is_idempotent() {
    let mut analysis = AnalysisResult::new();
    analysis.pages = pages(2);
    analysis.paragraphs = vec![
        RawParagraph::new(words("a", 25), 1),
        RawParagraph::new("Alice 30 NYC", 1),
        RawParagraph::new(words("b", 40), 2),
    ];
    analysis.tables = vec![name_table()];

    let run = || {
        let text = reconstruct(&analysis, RenderMode::Tabular, true).unwrap();
        chunk(&text, "same.pdf", &WhitespaceTokenCounter, 20).unwrap()
    };
    assert_eq!(run(), run());
}

#[test]
fn test_json_mode_inside_pages() {
    let mut analysis = AnalysisResult::new();
    analysis.tables = vec![name_table()];

    let text = reconstruct(&analysis, RenderMode::Json, false).unwrap();
    assert_eq!(
        text,
        "=== Page 1 ===\n{\"fields\":[\"Name\",\"Name \",\"Name  \"],\"data\":[[\"Alice\",\"30\",\"NYC\"]]}"
    );
}
