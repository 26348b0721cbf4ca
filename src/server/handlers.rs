//! Request handlers for the HTTP API

use axum::{body::Bytes, extract::State, Json};
use serde_json::{json, Value};
use std::path::Path;

use crate::model::{CourseReport, SingleModuleReport};
use crate::output::parse_log;
use crate::server::errors::ApiError;
use crate::server::AppState;
use crate::summarizer::load_format_example;

/// Capability listing
pub async fn index() -> Json<Value> {
    Json(json!({
        "message": "Microsoft Learn Course Scraper API",
        "endpoints": {
            "/summaries": "GET - Returns summaries from the summary log as JSON",
            "/scrape": "POST - Scrapes a course and returns summaries",
            "/scrape-single-module": "POST - Scrapes and summarizes one module",
            "/health": "GET - Health check"
        }
    }))
}

/// Liveness probe
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy", "message": "API is running" }))
}

/// Parses the summary log
///
/// Always answers 200; a missing or unreadable log becomes an `error` object.
pub async fn summaries(State(state): State<AppState>) -> Json<Value> {
    let path = state.config.files.summary_log.clone();
    let parsed = tokio::task::spawn_blocking(move || parse_log(Path::new(&path))).await;

    let body = match parsed {
        Ok(Ok(log)) => json!(log),
        Ok(Err(e)) => {
            tracing::warn!("Summary log unavailable: {}", e);
            json!({ "error": e.to_string() })
        }
        Err(e) => json!({ "error": format!("Error parsing summaries file: {}", e) }),
    };
    Json(body)
}

/// Crawls a course: `{"course_url": "..."}`
pub async fn scrape(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<CourseReport>, ApiError> {
    let course_url = required_field(&body, "course_url")?;
    let format_example =
        load_format_example(Path::new(&state.config.files.format_example)).await?;

    let report = state.walker(format_example).crawl_course(&course_url).await?;
    Ok(Json(report))
}

/// Summarizes one module: `{"module_url": "..."}`
pub async fn scrape_single_module(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SingleModuleReport>, ApiError> {
    let module_url = required_field(&body, "module_url")?;
    let format_example =
        load_format_example(Path::new(&state.config.files.format_example)).await?;

    let single = state
        .walker(format_example)
        .scrape_single_module(&module_url)
        .await?;
    Ok(Json(single.into()))
}

/// Pulls a string field out of a JSON object body
///
/// Bodies that are not JSON objects count as missing the field.
fn required_field(body: &[u8], field: &'static str) -> Result<String, ApiError> {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|value| value.get(field)?.as_str().map(str::to_string))
        .ok_or(ApiError::MissingField(field))
}
