//! Summarizer module
//!
//! This module turns raw module text into a report shaped like a reference
//! example, using a hosted language model. Failures are never propagated:
//! a summarizer always answers with text, and a failed call answers with an
//! inline `[Gemini Error] ...` marker so one bad module cannot abort a crawl.

mod gemini;

pub use gemini::GeminiClient;

use crate::DigestError;
use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// Prefix of the text returned in place of a summary when the model call fails
pub const ERROR_MARKER: &str = "[Gemini Error]";

/// Errors from a single model call
#[derive(Debug, Error)]
pub enum SummarizerError {
    #[error("missing API key (set the {0} environment variable)")]
    MissingApiKey(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model API returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Produces a summary for one module
#[async_trait]
pub trait TextSummarizer: Send + Sync {
    /// Summarizes `content` in the shape of `format_example`
    ///
    /// Never fails; errors come back as text starting with [`ERROR_MARKER`].
    async fn summarize(&self, content: &str, format_example: &str) -> String;
}

/// Renders a failed call as inline summary text
pub fn error_text(error: &SummarizerError) -> String {
    format!("{} {}", ERROR_MARKER, error)
}

/// Builds the prompt sent to the model
///
/// The format example and the raw content are embedded literally, example
/// first.
pub fn build_prompt(content: &str, format_example: &str) -> String {
    format!(
        "You are a helpful assistant. I will give you raw content from a Microsoft Learn training module.\n\
         Summarize it using the same format as the example below.\n\
         \n\
         ---\n\
         Example Summary:\n\
         {format_example}\n\
         \n\
         ---\n\
         Module Content:\n\
         {content}\n"
    )
}

/// Reads the format example the model should imitate
///
/// A missing file is reported as [`DigestError::MissingFormatFile`] so callers
/// can refuse to start a crawl before touching the network.
pub async fn load_format_example(path: &Path) -> crate::Result<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(example) => Ok(example),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(DigestError::MissingFormatFile {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(DigestError::Io(e)),
    }
}
