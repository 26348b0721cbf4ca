//! Integration tests for Learn-Digest
//!
//! Browser and model are replaced by in-memory stubs; the Gemini client is
//! exercised against a wiremock server.

mod common;
mod crawl_tests;
mod log_tests;
mod summarizer_tests;
