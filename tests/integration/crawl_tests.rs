//! End-to-end crawls over stubbed pages

use crate::common::{StubLoader, StubSummarizer, COURSE_URL, MODULE_URL, PATH_URL};
use learn_digest::crawler::{CrawlWalker, FetchTimings, PageFetcher};
use learn_digest::output::{parse_log, RawDumpHandler, SummaryLog, SummaryLogHandler};
use learn_digest::DigestError;
use std::sync::Arc;
use tempfile::TempDir;

fn walker(loader: StubLoader, summarizer: Arc<StubSummarizer>) -> CrawlWalker {
    let fetcher = PageFetcher::new(Arc::new(loader), FetchTimings::default());
    CrawlWalker::new(fetcher, summarizer, "Module: <title>\nKey points: ...")
}

#[tokio::test]
async fn test_full_crawl_single_module() {
    let summarizer = Arc::new(StubSummarizer::new("A short overview."));
    let report = walker(StubLoader::single_module_course(), summarizer.clone())
        .crawl_course(COURSE_URL)
        .await
        .expect("crawl should succeed");

    assert_eq!(report.course_url, COURSE_URL);
    assert_eq!(report.total_paths, 1);

    let path = &report.learning_paths[0];
    assert_eq!(path.path_number, 1);
    assert_eq!(path.title, "Cloud concepts");
    assert_eq!(path.url, PATH_URL);

    let module = &path.modules[0];
    assert_eq!(module.module_number, 1);
    assert_eq!(module.title, "Introduction");
    assert_eq!(module.url, MODULE_URL);
    assert_eq!(module.scraped_title, "Intro");
    assert_eq!(module.summary, "A short overview.");

    assert_eq!(summarizer.call_count(), 1);
}

#[tokio::test]
async fn test_empty_course_never_calls_the_model() {
    let summarizer = Arc::new(StubSummarizer::new("unused"));
    let loader = StubLoader::default().with_page(COURSE_URL, "<html><body></body></html>");

    let result = walker(loader, summarizer.clone()).crawl_course(COURSE_URL).await;

    assert!(matches!(result, Err(DigestError::NoPathsFound { .. })));
    assert_eq!(summarizer.call_count(), 0);
}

#[tokio::test]
async fn test_batch_outputs_append_and_dump() {
    let dir = TempDir::new().unwrap();
    let log_path = dir.path().join("summaries.txt");
    let dump_path = dir.path().join("output.txt");

    for _ in 0..2 {
        let summarizer = Arc::new(StubSummarizer::new("A short overview."));
        walker(StubLoader::single_module_course(), summarizer)
            .with_handler(Box::new(RawDumpHandler::create(&dump_path).unwrap()))
            .with_handler(Box::new(SummaryLogHandler::new(SummaryLog::new(&log_path))))
            .crawl_course(COURSE_URL)
            .await
            .unwrap();
    }

    // The log accumulates runs and is renumbered on read
    let parsed = parse_log(&log_path).unwrap();
    assert_eq!(parsed.total_modules, 2);
    assert_eq!(parsed.modules[0].module_number, 1);
    assert_eq!(parsed.modules[1].module_number, 2);
    assert_eq!(parsed.modules[1].title, "Introduction");
    assert_eq!(parsed.modules[1].url, MODULE_URL);
    assert_eq!(parsed.modules[1].text, "A short overview.");

    // The raw dump only holds the latest run
    let dump = std::fs::read_to_string(&dump_path).unwrap();
    assert_eq!(dump.matches("Hello world").count(), 1);
    assert!(dump.starts_with(&format!("Course: {}", COURSE_URL)));
}

#[tokio::test]
async fn test_single_module_scrape() {
    let summarizer = Arc::new(StubSummarizer::new("Summary text"));
    let single = walker(StubLoader::single_module_course(), summarizer)
        .scrape_single_module(MODULE_URL)
        .await
        .unwrap();

    assert_eq!(single.module.title, "Intro");
    assert_eq!(single.module.summary, "Summary text");
    assert_eq!(single.content_length, "Hello world".chars().count());
}

#[tokio::test]
async fn test_single_module_unreachable_still_summarizes() {
    let summarizer = Arc::new(StubSummarizer::new("Summary text"));
    let url = "https://learn.test/training/modules/gone/";
    let single = walker(StubLoader::default(), summarizer.clone())
        .scrape_single_module(url)
        .await
        .unwrap();

    assert_eq!(single.module.title, format!("Error loading page: {}", url));
    assert!(single.content_length > 0);
    assert_eq!(summarizer.call_count(), 1);
}
