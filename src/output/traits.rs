//! Output handler traits and types
//!
//! This module defines the trait interface for output handlers, which observe
//! a course crawl as it progresses.

use crate::model::{CourseReport, LinkRef, ModuleContent, ModuleData};
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for output handlers
///
/// Output handlers receive every summarized module while a crawl is running,
/// so results reach disk even if a later module stalls the crawl.
/// Implementations must be thread-safe.
pub trait OutputHandler: Send + Sync {
    /// Called once the learning paths of a course are known
    ///
    /// # Arguments
    ///
    /// * `course_url` - The course being crawled
    /// * `paths` - The learning paths that will be visited, in order
    fn begin_course(&self, course_url: &str, paths: &[LinkRef]) -> OutputResult<()> {
        let _ = (course_url, paths);
        Ok(())
    }

    /// Records one summarized module
    ///
    /// # Arguments
    ///
    /// * `path` - The learning path the module was listed on
    /// * `module` - The assembled module record, summary included
    /// * `content` - The raw text the summary was generated from
    fn record_module(
        &self,
        path: &LinkRef,
        module: &ModuleData,
        content: &ModuleContent,
    ) -> OutputResult<()>;

    /// Finalizes the output after the last module
    ///
    /// # Arguments
    ///
    /// * `report` - The complete course report
    fn finalize(&self, report: &CourseReport) -> OutputResult<()> {
        let _ = report;
        Ok(())
    }
}
