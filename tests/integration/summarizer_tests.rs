//! Gemini client against a mock generateContent endpoint

use crate::common::{StubLoader, COURSE_URL, PATH_URL};
use learn_digest::config::SummarizerConfig;
use learn_digest::crawler::{CrawlWalker, FetchTimings, PageFetcher};
use learn_digest::summarizer::{GeminiClient, ERROR_MARKER};
use learn_digest::TextSummarizer;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/models/gemini-2.0-flash:generateContent";

fn client_for(server: &MockServer) -> GeminiClient {
    let config = SummarizerConfig {
        endpoint: server.uri(),
        ..SummarizerConfig::default()
    };
    GeminiClient::new(&config, Some("test-key".to_string())).expect("client should build")
}

#[tokio::test]
async fn test_summary_from_first_candidate() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_string_contains("Hello world"))
        .and(body_string_contains("Example Summary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Intro: " }, { "text": "greets the world" }] },
                "finishReason": "STOP"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let summary = client_for(&server)
        .summarize("Hello world", "Module: <title>")
        .await;

    assert_eq!(summary, "Intro: greets the world");
}

#[tokio::test]
async fn test_api_error_becomes_inline_marker() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": { "code": 500, "message": "Internal error encountered.", "status": "INTERNAL" }
        })))
        .mount(&server)
        .await;

    let summary = client_for(&server).summarize("Hello world", "fmt").await;

    assert!(summary.starts_with(ERROR_MARKER));
    assert!(summary.contains("Internal error encountered."));
}

#[tokio::test]
async fn test_blocked_prompt_becomes_inline_marker() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        })))
        .mount(&server)
        .await;

    let summary = client_for(&server).summarize("Hello world", "fmt").await;

    assert!(summary.starts_with(ERROR_MARKER));
    assert!(summary.contains("SAFETY"));
}

#[tokio::test]
async fn test_missing_key_skips_the_network() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = SummarizerConfig {
        endpoint: server.uri(),
        ..SummarizerConfig::default()
    };
    let client = GeminiClient::new(&config, None).unwrap();
    let summary = client.summarize("Hello world", "fmt").await;

    assert_eq!(
        summary,
        "[Gemini Error] missing API key (set the GEMINI_API_KEY environment variable)"
    );
}

#[tokio::test]
async fn test_unreachable_model_degrades_each_module() {
    // Nothing listens on port 1, so every call fails at connect time
    let config = SummarizerConfig {
        endpoint: "http://127.0.0.1:1".to_string(),
        ..SummarizerConfig::default()
    };
    let client = GeminiClient::new(&config, Some("test-key".to_string())).unwrap();

    let loader = StubLoader::default()
        .with_page(
            COURSE_URL,
            r#"<a class="card-title" href="/training/paths/cloud-concepts/">Cloud concepts</a>"#,
        )
        .with_page(
            PATH_URL,
            r#"<a class="unit-title" href="/training/modules/first/">First</a>
               <a class="unit-title" href="/training/modules/second/">Second</a>"#,
        )
        .with_page(
            "https://learn.test/training/modules/first/",
            "<h1>First</h1><main>One</main>",
        )
        .with_page(
            "https://learn.test/training/modules/second/",
            "<h1>Second</h1><main>Two</main>",
        );

    let walker = CrawlWalker::new(
        PageFetcher::new(Arc::new(loader), FetchTimings::default()),
        Arc::new(client),
        "fmt",
    );
    let report = walker.crawl_course(COURSE_URL).await.unwrap();

    let modules = &report.learning_paths[0].modules;
    assert_eq!(modules.len(), 2);
    for module in modules {
        assert!(
            module.summary.starts_with("[Gemini Error] request failed"),
            "unexpected summary: {}",
            module.summary
        );
    }
    assert_eq!(modules[1].module_number, 2);
    assert_eq!(modules[1].scraped_title, "Second");
}
