//! kbharvest CLI - wiki page extraction and corpus statistics tool

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use kbharvest::{
    read_keyword_map, render, CorpusStats, ExtractOptions, ExtractionStats, JsonFormat, PageExtractor, PageInput,
    Pipeline, PipelineOptions, SimpleAnalyzer, StatsOptions,
};

#[derive(Parser)]
#[command(name = "kbharvest")]
#[command(version)]
#[command(about = "Extract wiki pages and build corpus term statistics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct SourceArgs {
    /// Base URL for resolving relative links
    #[arg(long, env = "KBHARVEST_BASE_URL", value_name = "URL")]
    base_url: String,

    /// CSS selector of the content container
    #[arg(long, value_name = "SELECTOR", default_value = kbharvest::extract::DEFAULT_CONTAINER_SELECTOR)]
    container: String,
}

impl SourceArgs {
    fn extractor(&self) -> kbharvest::Result<PageExtractor> {
        let options = ExtractOptions::new().with_container_selector(self.container.as_str());
        PageExtractor::with_options(&self.base_url, options)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Extract one HTML page to text or JSON
    Extract {
        /// Input HTML file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        source: SourceArgs,

        /// Output the structured content as JSON
        #[arg(long)]
        json: bool,

        /// Output compact JSON
        #[arg(long, requires = "json")]
        compact: bool,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Ingest a directory of HTML pages into the corpus statistics
    Stats {
        /// Directory containing *.html files
        #[arg(value_name = "DIR")]
        input: PathBuf,

        #[command(flatten)]
        source: SourceArgs,

        /// Directory holding domain_stats.json and symspell_dictionary.txt
        #[arg(long, value_name = "DIR")]
        state: PathBuf,

        /// Minimum df and tf for a term to be written
        #[arg(long, default_value_t = kbharvest::stats::DEFAULT_MIN_DF)]
        min_df: u64,

        /// JSON file mapping file names to keyword lists
        #[arg(long, value_name = "FILE")]
        keywords: Option<PathBuf>,

        /// Extract pages on the calling thread only
        #[arg(long)]
        sequential: bool,
    },

    /// Show extraction information for one HTML page
    Info {
        /// Input HTML file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract {
            input,
            source,
            json,
            compact,
            output,
        } => cmd_extract(&input, &source, json, compact, output.as_deref()),
        Commands::Stats {
            input,
            source,
            state,
            min_df,
            keywords,
            sequential,
        } => cmd_stats(&input, &source, &state, min_df, keywords.as_deref(), sequential),
        Commands::Info { input, source } => cmd_info(&input, &source),
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

/// URL of a local page file: the base URL joined with the file name.
fn page_url(extractor: &PageExtractor, path: &Path) -> String {
    let name = path.file_name().unwrap_or_default().to_string_lossy();
    extractor.resolver().resolve(&name)
}

fn cmd_extract(
    input: &Path,
    source: &SourceArgs,
    json: bool,
    compact: bool,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let extractor = source.extractor()?;
    let html = fs::read_to_string(input)?;
    let page = extractor.extract_page(&page_url(&extractor, input), &html);

    let rendered = if json {
        let format = if compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        };
        render::to_json(&page, format)?
    } else {
        render::page_to_text(&page)
    };

    if let Some(path) = output {
        fs::write(path, &rendered)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", rendered);
    }

    Ok(())
}

fn cmd_stats(
    input: &Path,
    source: &SourceArgs,
    state: &Path,
    min_df: u64,
    keywords: Option<&Path>,
    sequential: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let extractor = source.extractor()?;

    let keyword_map = match keywords {
        Some(path) => read_keyword_map(path)?,
        None => HashMap::new(),
    };

    let mut files: Vec<PathBuf> = fs::read_dir(input)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "html").unwrap_or(false))
        .collect();
    files.sort();

    let mut pages = Vec::with_capacity(files.len());
    for path in &files {
        let mut page = PageInput::new(page_url(&extractor, path), fs::read_to_string(path)?);
        let name = path.file_name().unwrap_or_default().to_string_lossy();
        if let Some(words) = keyword_map.get(&*name) {
            page = page.with_keywords(words.clone());
        }
        pages.push(page);
    }

    let options = StatsOptions::new().with_min_df(min_df);
    let mut stats = CorpusStats::load(state, SimpleAnalyzer::new(), options)?;
    let before = stats.doc_count();
    log::info!("Resuming from {} documents in {}", before, state.display());

    let pb = ProgressBar::new(pages.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let pipeline = Pipeline::with_options(extractor, PipelineOptions::new().with_parallel(!sequential));
    let output = pipeline.run_with_progress(&pages, &mut stats, |doc| {
        pb.set_message(doc.title.clone());
        pb.inc(1);
    })?;
    pb.finish_with_message("Done!");

    let paths = stats.dump(state)?;

    println!("\n{}", "Corpus Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Pages read".bold(), pages.len());
    println!("{}: {}", "Documents consumed".bold(), output.consumed);
    println!("{}: {}", "Skipped URLs".bold(), output.skipped.len());
    println!("{}: {} -> {}", "Corpus size".bold(), before, stats.doc_count());
    println!("{}: {}", "Observed terms".bold(), stats.term_count());
    println!("{}: {}", "Stop terms".bold(), stats.stop_terms().len());

    println!("\n{}", "Output files:".green().bold());
    println!("  {} {}", "├─".dimmed(), paths.stats.display());
    println!("  {} {}", "└─".dimmed(), paths.dictionary.display());

    Ok(())
}

fn cmd_info(input: &Path, source: &SourceArgs) -> Result<(), Box<dyn std::error::Error>> {
    let extractor = source.extractor()?;
    let html = fs::read_to_string(input)?;
    let url = page_url(&extractor, input);
    let page = extractor.extract_page(&url, &html);
    let stats = ExtractionStats::from_content(&page.content);

    println!("{}", "Page Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "URL".bold(), url);
    println!("{}: {}", "Title".bold(), page.title);
    println!(
        "{}: {}",
        "Indexable".bold(),
        if kbharvest::is_indexable_url(&url) { "Yes" } else { "No" }
    );

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Blocks".bold(), stats.block_count);
    println!("{}: {}", "Text blocks".bold(), stats.text_block_count);
    println!("{}: {}", "Tables".bold(), stats.table_count);
    println!("{}: {}", "Lists".bold(), stats.list_count);
    println!("{}: {}", "List items".bold(), stats.list_item_count);
    println!("{}: {}", "Links".bold(), stats.link_count);
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "kbharvest".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Wiki page extraction and corpus statistics tool");
    println!();
    println!("License: MIT");
}
