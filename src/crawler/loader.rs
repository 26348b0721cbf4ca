//! Browser-backed page loading
//!
//! [`PageLoader`] is the seam between the crawler and a real browser. The
//! crawler only ever needs the rendered HTML of one page at a time, so the
//! interface is a single call that navigates, waits and snapshots the DOM.

use crate::config::BrowserConfig;
use crate::FetchError;
use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::page::NavigateParams;
use chromiumoxide::{Browser, BrowserConfig as ChromeConfig, Page};
use futures::StreamExt;
use std::time::{Duration, Instant};

/// Interval between checks while waiting for a selector to appear
const SELECTOR_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Interval between `document.readyState` checks after navigation
const READY_STATE_POLL_INTERVAL: Duration = Duration::from_millis(100);

const READY_STATE_EXPRESSION: &str = "document.readyState";

/// How a page should be loaded before its DOM is captured
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadPlan {
    /// Upper bound for navigation to reach DOM readiness
    pub navigation_timeout: Duration,

    /// Fixed pause after navigation so client-side rendering can finish
    pub settle_delay: Duration,

    /// Selector that must be present before capture, with its own budget
    pub wait_for: Option<SelectorWait>,
}

/// An explicit wait for an element to be rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorWait {
    pub selector: String,
    pub timeout: Duration,
}

/// DOM snapshot of a loaded page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    /// URL the browser ended up on
    pub url: String,

    /// Serialized document after rendering
    pub html: String,
}

/// Loads one page and returns its rendered DOM
#[async_trait]
pub trait PageLoader: Send + Sync {
    async fn load(&self, url: &str, plan: &LoadPlan) -> Result<RenderedPage, FetchError>;
}

/// Headless Chrome loader built on chromiumoxide
///
/// Every call launches a fresh browser and closes it before returning, so no
/// cookies or cached state leak from one page into the next.
#[derive(Debug, Clone)]
pub struct ChromeLoader {
    headless: bool,
    chrome_executable: Option<String>,
}

impl ChromeLoader {
    pub fn new(config: &BrowserConfig) -> Self {
        Self {
            headless: config.headless,
            chrome_executable: config.chrome_executable.clone(),
        }
    }

    fn launch_config(&self, plan: &LoadPlan) -> Result<ChromeConfig, FetchError> {
        let mut builder = ChromeConfig::builder()
            .no_sandbox()
            .request_timeout(plan.navigation_timeout)
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage");

        if !self.headless {
            builder = builder.with_head();
        }
        if let Some(path) = &self.chrome_executable {
            builder = builder.chrome_executable(path);
        }

        builder.build().map_err(FetchError::Browser)
    }

    async fn render(
        &self,
        browser: &Browser,
        url: &str,
        plan: &LoadPlan,
    ) -> Result<RenderedPage, FetchError> {
        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| FetchError::Browser(e.to_string()))?;

        match tokio::time::timeout(plan.navigation_timeout, navigate(&page, url)).await {
            Err(_) => {
                return Err(FetchError::NavigationTimeout {
                    url: url.to_string(),
                    timeout_ms: plan.navigation_timeout.as_millis() as u64,
                })
            }
            Ok(result) => result?,
        }

        if !plan.settle_delay.is_zero() {
            tokio::time::sleep(plan.settle_delay).await;
        }

        if let Some(wait) = &plan.wait_for {
            wait_for_selector(&page, wait).await?;
        }

        let html = page
            .content()
            .await
            .map_err(|e| FetchError::Browser(e.to_string()))?;
        let final_url = page
            .url()
            .await
            .ok()
            .flatten()
            .unwrap_or_else(|| url.to_string());

        Ok(RenderedPage {
            url: final_url,
            html,
        })
    }
}

#[async_trait]
impl PageLoader for ChromeLoader {
    async fn load(&self, url: &str, plan: &LoadPlan) -> Result<RenderedPage, FetchError> {
        let config = self.launch_config(plan)?;
        let (mut browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| FetchError::Browser(format!("Failed to launch Chrome: {}", e)))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        tracing::trace!("Browser launched for {}", url);
        let result = self.render(&browser, url, plan).await;

        if let Err(e) = browser.close().await {
            tracing::warn!("Failed to close browser after loading {}: {}", url, e);
        }
        if let Err(e) = browser.wait().await {
            tracing::debug!("Browser process did not exit cleanly: {}", e);
        }
        handler_task.abort();

        result
    }
}

/// Navigates and returns once the document has been parsed
///
/// Readiness is DOMContentLoaded, not `load`: the navigation is committed,
/// then `document.readyState` is polled until it leaves `loading`.
async fn navigate(page: &Page, url: &str) -> Result<(), FetchError> {
    let navigation_error = |message: String| FetchError::Navigation {
        url: url.to_string(),
        message,
    };

    let response = page
        .execute(NavigateParams::new(url))
        .await
        .map_err(|e| navigation_error(e.to_string()))?;
    if let Some(error_text) = response.result.error_text.clone() {
        return Err(navigation_error(error_text));
    }

    loop {
        let state = page
            .evaluate(READY_STATE_EXPRESSION)
            .await
            .ok()
            .and_then(|result| result.into_value::<String>().ok());
        if state.as_deref().is_some_and(dom_ready) {
            return Ok(());
        }
        tokio::time::sleep(READY_STATE_POLL_INTERVAL).await;
    }
}

/// True once DOMContentLoaded has fired
fn dom_ready(ready_state: &str) -> bool {
    matches!(ready_state, "interactive" | "complete")
}

async fn wait_for_selector(page: &Page, wait: &SelectorWait) -> Result<(), FetchError> {
    let started = Instant::now();
    loop {
        if page.find_element(wait.selector.as_str()).await.is_ok() {
            return Ok(());
        }
        if started.elapsed() >= wait.timeout {
            return Err(FetchError::SelectorTimeout {
                selector: wait.selector.clone(),
                timeout_ms: wait.timeout.as_millis() as u64,
            });
        }
        tokio::time::sleep(SELECTOR_POLL_INTERVAL).await;
    }
}
