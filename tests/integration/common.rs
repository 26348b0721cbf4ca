//! Shared stubs for the integration tests

use async_trait::async_trait;
use learn_digest::crawler::{LoadPlan, PageLoader, RenderedPage};
use learn_digest::{FetchError, TextSummarizer};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const COURSE_URL: &str = "https://learn.test/training/courses/az-900/";
pub const PATH_URL: &str = "https://learn.test/training/paths/cloud-concepts/";
pub const MODULE_URL: &str = "https://learn.test/training/modules/intro/";

/// Serves canned HTML keyed by URL; unknown URLs fail navigation
#[derive(Default)]
pub struct StubLoader {
    pages: HashMap<String, String>,
}

impl StubLoader {
    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    /// One course, one learning path, one module titled "Intro"
    pub fn single_module_course() -> Self {
        Self::default()
            .with_page(
                COURSE_URL,
                r#"<html><body>
                     <a class="card-title" href="/training/paths/cloud-concepts/"> Cloud concepts </a>
                   </body></html>"#,
            )
            .with_page(
                PATH_URL,
                r#"<html><body>
                     <a class="unit-title" href="../../../training/modules/intro/">Introduction</a>
                   </body></html>"#,
            )
            .with_page(
                MODULE_URL,
                "<html><body><h1>Intro</h1><main><p>Hello world</p></main></body></html>",
            )
    }
}

#[async_trait]
impl PageLoader for StubLoader {
    async fn load(&self, url: &str, _plan: &LoadPlan) -> Result<RenderedPage, FetchError> {
        match self.pages.get(url) {
            Some(html) => Ok(RenderedPage {
                url: url.to_string(),
                html: html.clone(),
            }),
            None => Err(FetchError::Navigation {
                url: url.to_string(),
                message: "net::ERR_NAME_NOT_RESOLVED".to_string(),
            }),
        }
    }
}

/// Answers with a fixed summary and counts calls
pub struct StubSummarizer {
    pub reply: String,
    pub calls: AtomicUsize,
}

impl StubSummarizer {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextSummarizer for StubSummarizer {
    async fn summarize(&self, _content: &str, _format_example: &str) -> String {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone()
    }
}
