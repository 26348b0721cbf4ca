//! Learn-Digest main entry point
//!
//! This is the command-line interface for the Learn-Digest course summarizer.

use anyhow::Context;
use clap::Parser;
use learn_digest::config::{load_config_with_hash, Config};
use learn_digest::crawler::{ChromeLoader, CrawlWalker, FetchTimings, PageFetcher};
use learn_digest::output::{parse_log, RawDumpHandler, SummaryLog, SummaryLogHandler};
use learn_digest::server::{serve, AppState};
use learn_digest::summarizer::{load_format_example, GeminiClient};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Learn-Digest: crawl a training course and summarize every module
///
/// With no mode flag the HTTP API is served. `--course` runs a batch crawl
/// that appends to the summary log, `--module` summarizes one page and
/// `--parse-log` prints the summary log as JSON.
#[derive(Parser, Debug)]
#[command(name = "learn-digest")]
#[command(version)]
#[command(about = "Crawl a training course and summarize every module", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Crawl a course, append summaries to the log and dump raw text
    #[arg(long, value_name = "URL", conflicts_with_all = ["module", "parse_log"])]
    course: Option<String>,

    /// Summarize a single module page and print the result
    #[arg(long, value_name = "URL", conflicts_with_all = ["course", "parse_log"])]
    module: Option<String>,

    /// Parse the summary log and print it as JSON
    #[arg(long, conflicts_with_all = ["course", "module"])]
    parse_log: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    if let Some(course_url) = &cli.course {
        handle_course(&config, course_url).await
    } else if let Some(module_url) = &cli.module {
        handle_module(&config, module_url).await
    } else if cli.parse_log {
        handle_parse_log(&config)
    } else {
        handle_serve(config).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("learn_digest=info,warn"),
            1 => EnvFilter::new("learn_digest=debug,tower_http=debug,info"),
            2 => EnvFilter::new("learn_digest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

fn build_summarizer(config: &Config) -> anyhow::Result<Arc<GeminiClient>> {
    let client = GeminiClient::from_config(&config.summarizer)
        .context("Failed to build summarizer client")?;
    Ok(Arc::new(client))
}

fn build_fetcher(config: &Config) -> PageFetcher {
    PageFetcher::new(
        Arc::new(ChromeLoader::new(&config.browser)),
        FetchTimings::from(&config.browser),
    )
}

/// Serves the HTTP API
async fn handle_serve(config: Config) -> anyhow::Result<()> {
    let loader = Arc::new(ChromeLoader::new(&config.browser));
    let summarizer = build_summarizer(&config)?;
    let state = AppState::new(config, loader, summarizer);

    serve(state).await.context("API server failed")
}

/// Handles the --course mode: full crawl with file output
async fn handle_course(config: &Config, course_url: &str) -> anyhow::Result<()> {
    let format_example = load_format_example(Path::new(&config.files.format_example)).await?;

    let raw_dump = RawDumpHandler::create(Path::new(&config.files.raw_output))
        .with_context(|| format!("Failed to create {}", config.files.raw_output))?;
    let summary_log = SummaryLogHandler::new(SummaryLog::new(&config.files.summary_log));

    let walker = CrawlWalker::new(build_fetcher(config), build_summarizer(config)?, format_example)
        .with_handler(Box::new(raw_dump))
        .with_handler(Box::new(summary_log));

    let report = match walker.crawl_course(course_url).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    let modules: usize = report.learning_paths.iter().map(|p| p.modules.len()).sum();
    println!(
        "✓ Summarized {} modules across {} learning paths",
        modules, report.total_paths
    );
    println!("✓ Summaries appended to: {}", config.files.summary_log);
    println!("✓ Raw text written to: {}", config.files.raw_output);

    Ok(())
}

/// Handles the --module mode: summarize one page and print it
async fn handle_module(config: &Config, module_url: &str) -> anyhow::Result<()> {
    let format_example = load_format_example(Path::new(&config.files.format_example)).await?;
    let walker = CrawlWalker::new(build_fetcher(config), build_summarizer(config)?, format_example);

    let single = walker.scrape_single_module(module_url).await?;
    println!("=== {} ===", single.module.scraped_title);
    println!("URL: {}", single.module.url);
    println!("Scraped characters: {}\n", single.content_length);
    println!("{}", single.module.summary);

    Ok(())
}

/// Handles the --parse-log mode: print the summary log as JSON
fn handle_parse_log(config: &Config) -> anyhow::Result<()> {
    let parsed = parse_log(Path::new(&config.files.summary_log))?;
    println!("{}", serde_json::to_string_pretty(&parsed)?);
    Ok(())
}
