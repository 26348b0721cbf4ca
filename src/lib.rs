//! Learn-Digest: a course crawler and summarizer
//!
//! This crate walks a training catalog (course → learning paths → modules)
//! through a headless browser, asks a hosted language model to summarize each
//! module, and keeps an append-only summary log that can be parsed back into
//! structured records.

pub mod config;
pub mod crawler;
pub mod model;
pub mod output;
pub mod server;
pub mod summarizer;
pub mod url;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Learn-Digest operations
#[derive(Debug, Error)]
pub enum DigestError {
    #[error("No learning paths found at {url}")]
    NoPathsFound { url: String },

    #[error("{} file not found", .path.display())]
    MissingFormatFile { path: PathBuf },

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Page loading errors
///
/// These never escape a content fetch; they are folded into an error-shaped
/// [`model::ModuleContent`] instead.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("Navigation to {url} timed out after {timeout_ms}ms")]
    NavigationTimeout { url: String, timeout_ms: u64 },

    #[error("Timed out after {timeout_ms}ms waiting for selector \"{selector}\"")]
    SelectorTimeout { selector: String, timeout_ms: u64 },

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        source: ::url::ParseError,
    },
}

/// Result type alias for Learn-Digest operations
pub type Result<T> = std::result::Result<T, DigestError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlWalker, FetchMode, FetchResult, PageFetcher, PageLoader};
pub use model::{CourseReport, LinkRef, ModuleContent, ModuleData, SummaryRecord};
pub use summarizer::TextSummarizer;
