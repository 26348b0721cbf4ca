//! Records produced by a crawl and by the summary log parser

use serde::{Deserialize, Serialize};

/// A child page discovered on an index page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRef {
    /// Absolute URL of the child page
    pub url: String,
    /// Anchor text, trimmed (may be empty)
    pub title: String,
}

/// Text extracted from a leaf module page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleContent {
    pub title: String,
    pub body: String,
}

/// One summarized module as stored in the summary log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub module_number: usize,
    pub title: String,
    pub url: String,
    #[serde(rename = "summary")]
    pub text: String,
}

/// One summarized module inside a [`CourseReport`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleData {
    pub module_number: usize,
    /// Anchor text from the learning path page
    pub title: String,
    pub url: String,
    /// Heading found on the module page itself
    pub scraped_title: String,
    pub summary: String,
}

impl ModuleData {
    /// The log entry for this module, numbered by the caller
    pub fn to_record(&self, module_number: usize) -> SummaryRecord {
        SummaryRecord {
            module_number,
            title: self.title.clone(),
            url: self.url.clone(),
            text: self.summary.clone(),
        }
    }
}

/// One learning path and its summarized modules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningPathReport {
    pub path_number: usize,
    pub title: String,
    pub url: String,
    pub modules: Vec<ModuleData>,
}

/// Full result of crawling one course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseReport {
    pub course_url: String,
    pub total_paths: usize,
    pub learning_paths: Vec<LearningPathReport>,
}

/// Result of summarizing a single module outside of a course crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleModule {
    pub module: ModuleData,
    /// Character count of the scraped body
    pub content_length: usize,
}

/// Response body for a single-module scrape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleModuleReport {
    pub module_url: String,
    pub title: String,
    pub summary: String,
    pub content_length: usize,
}

impl From<SingleModule> for SingleModuleReport {
    fn from(single: SingleModule) -> Self {
        Self {
            module_url: single.module.url,
            title: single.module.scraped_title,
            summary: single.module.summary,
            content_length: single.content_length,
        }
    }
}

/// Structured contents of a summary log file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedLog {
    pub total_modules: usize,
    pub modules: Vec<SummaryRecord>,
    /// Chunks that did not carry a `URL:` line and were dropped
    #[serde(default, skip_serializing_if = "is_zero")]
    pub skipped_chunks: usize,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}
