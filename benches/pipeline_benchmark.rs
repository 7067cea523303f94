//! Benchmarks for reconstruction and chunking.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic analysis results with a table per page.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pageweave::model::AnalyzedPage;
use pageweave::{
    AnalysisResult, RawCell, RawParagraph, RawTable, RenderMode, WhitespaceTokenCounter,
};

/// Creates a synthetic analysis with paragraphs and one table on every page.
fn create_test_analysis(page_count: u32) -> AnalysisResult {
    let mut analysis = AnalysisResult::new();
    analysis.pages = (1..=page_count)
        .map(|page_number| AnalyzedPage { page_number })
        .collect();

    for page in 1..=page_count {
        for i in 0..8 {
            analysis.paragraphs.push(RawParagraph::new(
                format!("Page {} paragraph {} with benchmark content for measurement.", page, i),
                page,
            ));
        }
        analysis.paragraphs.push(RawParagraph::new(format!("Item-{} 42 ok", page), page));

        let mut table = RawTable::new(6, 3, page)
            .with_cell(RawCell::header(0, 0, "Item"))
            .with_cell(RawCell::header(0, 1, "Qty"))
            .with_cell(RawCell::header(0, 2, "Status"));
        for row in 1..6 {
            table = table
                .with_cell(RawCell::new(row, 0, format!("Item-{}", page * 10 + row as u32)))
                .with_cell(RawCell::new(row, 1, "42"))
                .with_cell(RawCell::new(row, 2, "ok"));
        }
        analysis.tables.push(table);
    }

    analysis
}

/// Benchmark reconstruction at various sizes.
fn bench_reconstruct(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconstruct");

    for page_count in [1, 10, 50].iter() {
        let analysis = create_test_analysis(*page_count);

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| pageweave::reconstruct(black_box(&analysis), RenderMode::Tabular, false).unwrap());
        });
    }

    group.finish();
}

/// Benchmark page chunking of reconstructed text.
fn bench_chunk(c: &mut Criterion) {
    let analysis = create_test_analysis(50);
    let text = pageweave::reconstruct(&analysis, RenderMode::Tabular, false).unwrap();

    c.bench_function("chunk_50_pages", |b| {
        b.iter(|| {
            pageweave::chunk(black_box(&text), "bench.pdf", &WhitespaceTokenCounter, 20).unwrap()
        });
    });
}

/// Benchmark builder pattern overhead.
fn bench_builder_creation(c: &mut Criterion) {
    c.bench_function("builder_creation", |b| {
        b.iter(|| {
            let _builder = pageweave::Pageweave::new()
                .with_tags(true)
                .with_min_tokens(10)
                .with_cleanup(pageweave::CleanupPreset::Standard);
        });
    });
}

criterion_group!(benches, bench_reconstruct, bench_chunk, bench_builder_creation);
criterion_main!(benches);
