//! Crawl walker - course crawl orchestration
//!
//! This module walks the three catalog levels in order:
//! 1. Course page → learning paths
//! 2. Each learning path → modules
//! 3. Each module → page text → summary
//!
//! Everything runs sequentially, one page load and one model call at a time.
//! Leaf failures are already folded into text by the fetcher and the
//! summarizer, so only an empty course or a broken output handler stops a
//! walk early.

use crate::crawler::fetcher::{FetchMode, PageFetcher};
use crate::model::{
    CourseReport, LearningPathReport, LinkRef, ModuleContent, ModuleData, SingleModule,
};
use crate::output::OutputHandler;
use crate::summarizer::TextSummarizer;
use crate::DigestError;
use std::sync::Arc;
use std::time::Instant;

/// Walks a course and summarizes every module in it
pub struct CrawlWalker {
    fetcher: PageFetcher,
    summarizer: Arc<dyn TextSummarizer>,
    format_example: String,
    handlers: Vec<Box<dyn OutputHandler>>,
}

impl CrawlWalker {
    /// Creates a walker
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Loads and extracts catalog pages
    /// * `summarizer` - Produces the summary for each module
    /// * `format_example` - Reference report the summaries should imitate
    pub fn new(
        fetcher: PageFetcher,
        summarizer: Arc<dyn TextSummarizer>,
        format_example: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            summarizer,
            format_example: format_example.into(),
            handlers: Vec::new(),
        }
    }

    /// Adds an output handler notified as modules are summarized
    pub fn with_handler(mut self, handler: Box<dyn OutputHandler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Crawls a course and summarizes every module of every learning path
    ///
    /// # Returns
    ///
    /// * `Ok(CourseReport)` - The nested report, possibly with degraded modules
    /// * `Err(DigestError::NoPathsFound)` - The course page lists no learning paths
    /// * `Err(DigestError::Output)` - An output handler failed to write
    pub async fn crawl_course(&self, course_url: &str) -> crate::Result<CourseReport> {
        let start_time = Instant::now();
        tracing::info!("Crawling course {}", course_url);

        let paths = self
            .fetcher
            .fetch(course_url, FetchMode::Index)
            .await
            .into_links();
        if paths.is_empty() {
            return Err(DigestError::NoPathsFound {
                url: course_url.to_string(),
            });
        }
        tracing::info!("Found {} learning paths", paths.len());

        for handler in &self.handlers {
            handler.begin_course(course_url, &paths)?;
        }

        let mut report = CourseReport {
            course_url: course_url.to_string(),
            total_paths: paths.len(),
            learning_paths: Vec::with_capacity(paths.len()),
        };
        let mut modules_done = 0;

        for (path_index, path) in paths.iter().enumerate() {
            let path_number = path_index + 1;
            let modules = self
                .fetcher
                .fetch(&path.url, FetchMode::FallbackIndex)
                .await
                .into_links();
            tracing::info!(
                "Path {}/{} \"{}\": {} modules",
                path_number,
                paths.len(),
                path.title,
                modules.len()
            );

            let mut path_report = LearningPathReport {
                path_number,
                title: path.title.clone(),
                url: path.url.clone(),
                modules: Vec::with_capacity(modules.len()),
            };

            for (module_index, module) in modules.iter().enumerate() {
                let (data, content) = self.summarize_module(module_index + 1, module).await;
                for handler in &self.handlers {
                    handler.record_module(path, &data, &content)?;
                }
                path_report.modules.push(data);
                modules_done += 1;
            }

            report.learning_paths.push(path_report);
        }

        for handler in &self.handlers {
            handler.finalize(&report)?;
        }

        tracing::info!(
            "Course crawl completed: {} paths, {} modules in {:?}",
            report.total_paths,
            modules_done,
            start_time.elapsed()
        );

        Ok(report)
    }

    /// Summarizes one module page without discovering it through a course
    ///
    /// The scraped heading doubles as the module title. Output handlers are
    /// not notified.
    pub async fn scrape_single_module(&self, module_url: &str) -> crate::Result<SingleModule> {
        tracing::info!("Scraping single module {}", module_url);

        let link = LinkRef {
            url: module_url.to_string(),
            title: String::new(),
        };
        let (mut module, content) = self.summarize_module(1, &link).await;
        module.title = module.scraped_title.clone();

        Ok(SingleModule {
            module,
            content_length: content.body.chars().count(),
        })
    }

    async fn summarize_module(&self, module_number: usize, link: &LinkRef) -> (ModuleData, ModuleContent) {
        let content = self
            .fetcher
            .fetch(&link.url, FetchMode::Content)
            .await
            .into_content();
        tracing::debug!(
            "Module {} \"{}\": {} characters scraped",
            module_number,
            content.title,
            content.body.len()
        );

        let summary = self
            .summarizer
            .summarize(&content.body, &self.format_example)
            .await;

        let data = ModuleData {
            module_number,
            title: link.title.clone(),
            url: link.url.clone(),
            scraped_title: content.title.clone(),
            summary,
        };
        (data, content)
    }
}
