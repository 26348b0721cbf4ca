//! Crawler module for catalog page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - Browser-backed page loading
//! - HTML extraction of links and module text
//! - The three-level course walk

mod fetcher;
mod loader;
mod parser;
mod walker;

pub use fetcher::{FetchMode, FetchResult, FetchTimings, PageFetcher};
pub use loader::{ChromeLoader, LoadPlan, PageLoader, RenderedPage, SelectorWait};
pub use parser::{extract_content, extract_module_links, extract_path_links, NO_TITLE};
pub use walker::CrawlWalker;
