//! pageweave CLI - page text reconstruction and chunking tool

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pageweave::{
    load_analysis, process_batch, BatchItem, BpeTokenCounter, ChunkIdStrategy, Chunk,
    CleanupPreset, EstimateTokenCounter, JsonFormat, KeySanitizer, PageChunker, PageLabel, Pageweave,
    PipelineOptions, ProcessedDocument, RenderMode, TokenCounter, WhitespaceTokenCounter,
    WindowOptions, WindowSplitter,
};

type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "pageweave")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Rebuild page text from layout analysis JSON and split it into chunks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rebuild page-delimited text from an analysis JSON file
    Reconstruct {
        /// Analysis JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Table rendering mode
        #[arg(long, value_enum, default_value = "tabular")]
        mode: TableMode,

        /// Prefix blocks with ##TABLE## / ##PARAGRAPH## tags
        #[arg(long)]
        tags: bool,

        /// Number page delimiters by source page instead of position
        #[arg(long)]
        source_page_labels: bool,

        /// Text cleanup preset
        #[arg(long, value_enum)]
        cleanup: Option<CleanupLevel>,

        /// Emit pages and statistics as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Split page-delimited text into one chunk per page
    Chunk {
        /// Page-delimited text file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// File name used for chunk ids (defaults to the input's name)
        #[arg(long)]
        filename: Option<String>,

        /// Pages with this many tokens or fewer are dropped
        #[arg(long, env = "PAGEWEAVE_MIN_TOKENS", default_value_t = pageweave::DEFAULT_MIN_TOKENS)]
        min_tokens: usize,

        /// Token counter
        #[arg(long, value_enum, env = "PAGEWEAVE_COUNTER", default_value = "bpe")]
        counter: CounterKind,

        /// Append a content hash to chunk ids
        #[arg(long)]
        hash_ids: bool,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Reconstruct and chunk analysis files, writing one file per chunk
    Process {
        /// Analysis JSON files
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        out_dir: PathBuf,

        /// Table rendering mode
        #[arg(long, value_enum, default_value = "tabular")]
        mode: TableMode,

        /// Prefix blocks with ##TABLE## / ##PARAGRAPH## tags
        #[arg(long)]
        tags: bool,

        /// Pages with this many tokens or fewer are dropped
        #[arg(long, env = "PAGEWEAVE_MIN_TOKENS", default_value_t = pageweave::DEFAULT_MIN_TOKENS)]
        min_tokens: usize,

        /// Token counter
        #[arg(long, value_enum, env = "PAGEWEAVE_COUNTER", default_value = "bpe")]
        counter: CounterKind,

        /// Append a content hash to chunk ids
        #[arg(long)]
        hash_ids: bool,
    },

    /// Split raw page text into overlapping windows
    Split {
        /// Plain text file holding one page
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// File name used for chunk ids (defaults to the input's name)
        #[arg(long)]
        filename: Option<String>,

        /// Page number of the text
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Window size in tokens
        #[arg(long, default_value_t = 1000)]
        size: usize,

        /// Overlap between windows in tokens
        #[arg(long, default_value_t = 200)]
        overlap: usize,

        /// Token counter
        #[arg(long, value_enum, env = "PAGEWEAVE_COUNTER", default_value = "bpe")]
        counter: CounterKind,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show analysis information
    Info {
        /// Analysis JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum CleanupLevel {
    /// Strip selection marks and trim (default)
    Minimal,
    /// Also normalize Unicode and collapse whitespace runs
    Standard,
}

impl From<CleanupLevel> for CleanupPreset {
    fn from(level: CleanupLevel) -> Self {
        match level {
            CleanupLevel::Minimal => CleanupPreset::Minimal,
            CleanupLevel::Standard => CleanupPreset::Standard,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum TableMode {
    /// Pipe-delimited text grid
    Tabular,
    /// JSON object with fields and data
    Json,
    /// Tab-separated raw cell grid
    RawGrid,
}

impl From<TableMode> for RenderMode {
    fn from(mode: TableMode) -> Self {
        match mode {
            TableMode::Tabular => RenderMode::Tabular,
            TableMode::Json => RenderMode::Json,
            TableMode::RawGrid => RenderMode::RawGrid,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum CounterKind {
    /// GPT-4o BPE tokens (o200k_base)
    Bpe,
    /// Character-class estimate of BPE tokens
    Estimate,
    /// Whitespace-separated words
    Whitespace,
}

impl CounterKind {
    fn counter(self) -> CliResult<&'static (dyn TokenCounter + Sync)> {
        static BPE: OnceLock<BpeTokenCounter> = OnceLock::new();

        let counter: &'static (dyn TokenCounter + Sync) = match self {
            CounterKind::Bpe => match BPE.get() {
                Some(bpe) => bpe,
                None => {
                    let bpe = BpeTokenCounter::o200k()?;
                    BPE.get_or_init(|| bpe)
                }
            },
            CounterKind::Estimate => &EstimateTokenCounter,
            CounterKind::Whitespace => &WhitespaceTokenCounter,
        };
        Ok(counter)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Reconstruct {
            input,
            output,
            mode,
            tags,
            source_page_labels,
            cleanup,
            json,
        } => cmd_reconstruct(
            &input,
            output.as_deref(),
            mode,
            tags,
            source_page_labels,
            cleanup,
            json,
        ),
        Commands::Chunk {
            input,
            filename,
            min_tokens,
            counter,
            hash_ids,
            output,
        } => cmd_chunk(
            &input,
            filename.as_deref(),
            min_tokens,
            counter,
            hash_ids,
            output.as_deref(),
        ),
        Commands::Process {
            inputs,
            out_dir,
            mode,
            tags,
            min_tokens,
            counter,
            hash_ids,
        } => {
            let options = pipeline_options(mode, tags, min_tokens, hash_ids);
            cmd_process(&inputs, &out_dir, &options, counter)
        }
        Commands::Split {
            input,
            filename,
            page,
            size,
            overlap,
            counter,
            output,
        } => cmd_split(
            &input,
            filename.as_deref(),
            page,
            size,
            overlap,
            counter,
            output.as_deref(),
        ),
        Commands::Info { input } => cmd_info(&input),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn pipeline_options(mode: TableMode, tags: bool, min_tokens: usize, hash_ids: bool) -> PipelineOptions {
    PipelineOptions::new()
        .with_render_mode(mode.into())
        .with_tags(tags)
        .with_min_tokens(min_tokens)
        .with_id_strategy(id_strategy(hash_ids))
}

fn id_strategy(hash_ids: bool) -> ChunkIdStrategy {
    if hash_ids {
        ChunkIdStrategy::ContentHash
    } else {
        ChunkIdStrategy::PageOnly
    }
}

fn file_name_of(input: &Path, filename: Option<&str>) -> String {
    filename.map(str::to_string).unwrap_or_else(|| {
        input
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .into_owned()
    })
}

fn write_or_print(output: Option<&Path>, content: &str) -> CliResult {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_reconstruct(
    input: &Path,
    output: Option<&Path>,
    mode: TableMode,
    tags: bool,
    source_page_labels: bool,
    cleanup: Option<CleanupLevel>,
    json: bool,
) -> CliResult {
    let mut builder = Pageweave::new().with_render_mode(mode.into()).with_tags(tags);
    if source_page_labels {
        builder = builder.with_page_label(PageLabel::Source);
    }
    if let Some(level) = cleanup {
        builder = builder.with_cleanup(level.into());
    }

    let result = builder.load(input)?;
    let content = if json {
        result.to_json(JsonFormat::Pretty)?
    } else {
        result.to_text()
    };

    write_or_print(output, &content)
}

fn cmd_chunk(
    input: &Path,
    filename: Option<&str>,
    min_tokens: usize,
    counter: CounterKind,
    hash_ids: bool,
    output: Option<&Path>,
) -> CliResult {
    let text = fs::read_to_string(input)?;
    let filename = file_name_of(input, filename);

    let options = pageweave::ChunkOptions::new()
        .with_min_tokens(min_tokens)
        .with_id_strategy(id_strategy(hash_ids));
    let chunks = PageChunker::new(counter.counter()?)
        .with_options(options)
        .chunk(&text, &filename)?;

    log::info!("{}: {} chunks", filename, chunks.len());
    write_or_print(output, &serde_json::to_string_pretty(&chunks)?)
}

fn cmd_process(
    inputs: &[PathBuf],
    out_dir: &Path,
    options: &PipelineOptions,
    counter: CounterKind,
) -> CliResult {
    fs::create_dir_all(out_dir)?;

    let pb = ProgressBar::new(inputs.len() as u64 * 2);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Loading analysis files...");
    let mut items = Vec::with_capacity(inputs.len());
    for input in inputs {
        let analysis = load_analysis(input)?;
        items.push(BatchItem::new(file_name_of(input, None), analysis));
        pb.inc(1);
    }

    pb.set_message("Reconstructing and chunking...");
    let results = process_batch(&items, options, counter.counter()?, &KeySanitizer);

    let mut written = Vec::new();
    let mut failed = 0;
    for (input, result) in inputs.iter().zip(results) {
        match result {
            Ok(doc) => {
                let dir = write_chunk_dir(out_dir, input, &doc)?;
                written.push((dir, doc.chunks.len()));
            }
            Err(e) => {
                pb.println(format!("{} {}: {}", "Failed".red(), input.display(), e));
                failed += 1;
            }
        }
        pb.inc(1);
    }

    pb.finish_with_message("Done!");

    println!("\n{}", "Output directories:".green().bold());
    for (i, (dir, count)) in written.iter().enumerate() {
        let branch = if i + 1 == written.len() { "└─" } else { "├─" };
        println!("  {} {} ({} chunks)", branch.dimmed(), dir.display(), count);
    }

    if failed > 0 {
        return Err(format!("{} of {} documents failed", failed, inputs.len()).into());
    }
    Ok(())
}

/// Write `{stem}_chunks/{chunk_id}.txt` for every chunk plus `chunks.json`.
fn write_chunk_dir(out_dir: &Path, input: &Path, doc: &ProcessedDocument) -> CliResult<PathBuf> {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let dir = out_dir.join(format!("{}_chunks", stem));
    fs::create_dir_all(&dir)?;

    for chunk in &doc.chunks {
        fs::write(dir.join(format!("{}.txt", chunk.chunk_id)), &chunk.content)?;
    }
    let chunks: &[Chunk] = &doc.chunks;
    fs::write(dir.join("chunks.json"), serde_json::to_string_pretty(chunks)?)?;

    Ok(dir)
}

fn cmd_split(
    input: &Path,
    filename: Option<&str>,
    page: u32,
    size: usize,
    overlap: usize,
    counter: CounterKind,
    output: Option<&Path>,
) -> CliResult {
    let text = fs::read_to_string(input)?;
    let filename = file_name_of(input, filename);

    let options = WindowOptions::default()
        .with_chunk_size(size)
        .with_chunk_overlap(overlap);
    let splitter = WindowSplitter::new(counter.counter()?, options)?;
    let chunks = splitter.chunk_pages([(page, text.as_str())], &filename, &KeySanitizer)?;

    write_or_print(output, &serde_json::to_string_pretty(&chunks)?)
}

fn cmd_info(input: &Path) -> CliResult {
    let analysis = load_analysis(input)?;
    let result = Pageweave::new().reconstruct(&analysis)?;
    let stats = result.stats();

    println!("{}", "Analysis Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), analysis.page_count());
    println!("{}: {}", "Paragraphs".bold(), analysis.paragraphs.len());
    println!("{}: {}", "Tables".bold(), analysis.tables.len());

    println!();
    println!("{}", "Reconstruction".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Empty pages".bold(), stats.empty_page_count);
    println!("{}: {}", "Merged tables".bold(), stats.merged_table_count);
    println!("{}: {}", "Appended tables".bold(), stats.appended_table_count);
    println!("{}: {}", "Empty tables".bold(), stats.empty_table_count);
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pageweave".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Page text reconstruction and chunking tool");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;
    use pageweave::{AnalysisResult, RawParagraph};

    #[test]
    fn test_file_name_of() {
        assert_eq!(file_name_of(Path::new("dir/report.json"), None), "report.json");
        assert_eq!(file_name_of(Path::new("dir/report.json"), Some("r.pdf")), "r.pdf");
    }

    #[test]
    fn test_pipeline_options_from_flags() {
        let options = pipeline_options(TableMode::RawGrid, true, 5, true);
        assert_eq!(options.render.mode, RenderMode::RawGrid);
        assert!(options.render.tag_blocks);
        assert_eq!(options.chunk.min_tokens, 5);
        assert_eq!(options.chunk.id_strategy, ChunkIdStrategy::ContentHash);
    }

    #[test]
    fn test_bpe_is_default_counter() {
        let cli = Cli::try_parse_from(["pageweave", "chunk", "doc.txt"]).unwrap();
        match cli.command {
            Commands::Chunk { counter, .. } => assert!(counter == CounterKind::Bpe),
            _ => panic!("expected chunk command"),
        }

        let counter = CounterKind::Bpe.counter().unwrap();
        assert_eq!(counter.count_tokens("hello world").unwrap(), 2);
    }

    #[test]
    fn test_write_chunk_dir() {
        let dir = tempfile::tempdir().unwrap();

        let mut analysis = AnalysisResult::new();
        analysis.paragraphs = vec![RawParagraph::new("one two three four", 1)];
        let options = PipelineOptions::new().with_min_tokens(1);
        let doc = pageweave::pipeline::process(
            &analysis,
            "scan.pdf",
            &options,
            &WhitespaceTokenCounter,
            &KeySanitizer,
        )
        .unwrap();

        let out = write_chunk_dir(dir.path(), Path::new("in/scan.json"), &doc).unwrap();
        assert_eq!(out, dir.path().join("scan_chunks"));

        let content = fs::read_to_string(out.join("scan_pdf_p1.txt")).unwrap();
        assert_eq!(content, "one two three four");

        let json = fs::read_to_string(out.join("chunks.json")).unwrap();
        let chunks: Vec<Chunk> = serde_json::from_str(&json).unwrap();
        assert_eq!(chunks, doc.chunks);
    }

    #[test]
    fn test_process_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("memo.json");
        fs::write(
            &input,
            r#"{"paragraphs": [{"content": "alpha beta gamma", "boundingRegions": [{"pageNumber": 1}]}]}"#,
        )
        .unwrap();

        let options = pipeline_options(TableMode::Tabular, false, 1, false);
        cmd_process(&[input], dir.path(), &options, CounterKind::Whitespace).unwrap();

        let chunk = fs::read_to_string(dir.path().join("memo_chunks").join("memo_json_p1.txt")).unwrap();
        assert_eq!(chunk, "alpha beta gamma");
    }
}
