//! Page fetcher
//!
//! This module loads one catalog page through a [`PageLoader`] and extracts
//! the fields required by the crawl level it belongs to:
//! - course pages yield learning path links
//! - learning path pages yield module links (with a selector fallback)
//! - module pages yield title and body text
//!
//! Failures never escape [`PageFetcher::fetch`]. Link pages degrade to an
//! empty list and module pages to an error-shaped [`ModuleContent`].

use crate::config::BrowserConfig;
use crate::crawler::loader::{LoadPlan, PageLoader, SelectorWait};
use crate::crawler::parser::{
    extract_content, extract_module_links, extract_path_links, HEADING_SELECTOR,
};
use crate::model::{LinkRef, ModuleContent};
use crate::FetchError;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Which level of the catalog a page belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchMode {
    /// Course page listing learning paths
    Index,
    /// Learning path page listing modules, with a fallback selector
    FallbackIndex,
    /// Module page whose text is summarized
    Content,
}

/// Result of a fetch operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// Child pages found on an index page
    Links(Vec<LinkRef>),
    /// Text of a module page
    Content(ModuleContent),
}

impl FetchResult {
    /// Returns the links, or an empty list for a content result
    pub fn into_links(self) -> Vec<LinkRef> {
        match self {
            Self::Links(links) => links,
            Self::Content(_) => Vec::new(),
        }
    }

    /// Returns the content, or an empty record for a link result
    pub fn into_content(self) -> ModuleContent {
        match self {
            Self::Content(content) => content,
            Self::Links(_) => ModuleContent {
                title: String::new(),
                body: String::new(),
            },
        }
    }
}

/// Wait budgets applied per fetch mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTimings {
    pub navigation_timeout: Duration,
    pub index_settle: Duration,
    pub nested_index_settle: Duration,
    pub heading_timeout: Duration,
}

impl From<&BrowserConfig> for FetchTimings {
    fn from(config: &BrowserConfig) -> Self {
        Self {
            navigation_timeout: Duration::from_millis(config.navigation_timeout_ms),
            index_settle: Duration::from_millis(config.index_settle_ms),
            nested_index_settle: Duration::from_millis(config.nested_index_settle_ms),
            heading_timeout: Duration::from_millis(config.heading_timeout_ms),
        }
    }
}

impl Default for FetchTimings {
    fn default() -> Self {
        Self::from(&BrowserConfig::default())
    }
}

impl FetchTimings {
    /// Builds the load plan for one fetch mode
    ///
    /// | Mode | Settle delay | Explicit wait |
    /// |------|--------------|---------------|
    /// | Index | `index_settle` | none |
    /// | FallbackIndex | `nested_index_settle` | none |
    /// | Content | none | `h1`, up to `heading_timeout` |
    pub fn plan(&self, mode: FetchMode) -> LoadPlan {
        let (settle_delay, wait_for) = match mode {
            FetchMode::Index => (self.index_settle, None),
            FetchMode::FallbackIndex => (self.nested_index_settle, None),
            FetchMode::Content => (
                Duration::ZERO,
                Some(SelectorWait {
                    selector: HEADING_SELECTOR.to_string(),
                    timeout: self.heading_timeout,
                }),
            ),
        };

        LoadPlan {
            navigation_timeout: self.navigation_timeout,
            settle_delay,
            wait_for,
        }
    }
}

/// Loads catalog pages and extracts their fields
#[derive(Clone)]
pub struct PageFetcher {
    loader: Arc<dyn PageLoader>,
    timings: FetchTimings,
}

impl PageFetcher {
    pub fn new(loader: Arc<dyn PageLoader>, timings: FetchTimings) -> Self {
        Self { loader, timings }
    }

    /// Fetches a page in the given mode
    ///
    /// Index modes return [`FetchResult::Links`]; content mode returns
    /// [`FetchResult::Content`].
    pub async fn fetch(&self, url: &str, mode: FetchMode) -> FetchResult {
        match mode {
            FetchMode::Index | FetchMode::FallbackIndex => {
                FetchResult::Links(self.fetch_links(url, mode).await)
            }
            FetchMode::Content => FetchResult::Content(self.fetch_content(url).await),
        }
    }

    /// Fetches an index page and returns its child links
    ///
    /// A page that cannot be loaded is logged and treated as having no links.
    pub async fn fetch_links(&self, url: &str, mode: FetchMode) -> Vec<LinkRef> {
        match self.try_fetch_links(url, mode).await {
            Ok(links) => {
                tracing::debug!("Found {} links on {} ({:?})", links.len(), url, mode);
                links
            }
            Err(e) => {
                tracing::warn!("Failed to load index page {}: {}", url, e);
                Vec::new()
            }
        }
    }

    /// Fetches a module page and returns its title and text
    ///
    /// Any failure is folded into the result: the title becomes
    /// `Error loading page: <url>` and the body the error message.
    pub async fn fetch_content(&self, url: &str) -> ModuleContent {
        match self.try_fetch_content(url).await {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Failed to load module page {}: {}", url, e);
                ModuleContent {
                    title: format!("Error loading page: {}", url),
                    body: e.to_string(),
                }
            }
        }
    }

    async fn try_fetch_links(&self, url: &str, mode: FetchMode) -> Result<Vec<LinkRef>, FetchError> {
        let requested = parse_url(url)?;
        let page = self.loader.load(url, &self.timings.plan(mode)).await?;
        let page_url = Url::parse(&page.url).unwrap_or(requested);

        Ok(match mode {
            FetchMode::Index => extract_path_links(&page.html, &page_url),
            _ => extract_module_links(&page.html, &page_url),
        })
    }

    async fn try_fetch_content(&self, url: &str) -> Result<ModuleContent, FetchError> {
        parse_url(url)?;
        let page = self
            .loader
            .load(url, &self.timings.plan(FetchMode::Content))
            .await?;
        Ok(extract_content(&page.html))
    }
}

fn parse_url(url: &str) -> Result<Url, FetchError> {
    Url::parse(url).map_err(|source| FetchError::InvalidUrl {
        url: url.to_string(),
        source,
    })
}
