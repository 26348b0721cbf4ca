use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::DigestError;

/// Errors surfaced by the scrape endpoints
///
/// Every variant renders as `{"error": "..."}`.
#[derive(Debug)]
pub enum ApiError {
    /// The request body lacks a required field
    MissingField(&'static str),
    /// A crawl could not produce a report
    Digest(DigestError),
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::MissingField(field) => (
                StatusCode::BAD_REQUEST,
                format!("Missing '{}' in request body", field),
            ),
            Self::Digest(DigestError::NoPathsFound { .. }) => {
                (StatusCode::NOT_FOUND, "No learning paths found".to_string())
            }
            Self::Digest(err @ DigestError::MissingFormatFile { .. }) => {
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            Self::Digest(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error during scraping: {}", err),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            tracing::error!("{}", message);
        } else {
            tracing::debug!("Rejected request: {}", message);
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<DigestError> for ApiError {
    fn from(err: DigestError) -> Self {
        Self::Digest(err)
    }
}
