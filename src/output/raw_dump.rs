//! Raw text dump of a course crawl
//!
//! Batch runs keep the unsummarized page text next to the summary log so a
//! bad summary can be checked against what the model was actually given.

use crate::model::{CourseReport, LinkRef, ModuleContent, ModuleData};
use crate::output::traits::{OutputHandler, OutputResult};
use chrono::Utc;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;

/// Output handler writing every scraped module body to one text file
///
/// The file is truncated when the handler is created.
#[derive(Debug)]
pub struct RawDumpHandler {
    writer: Mutex<BufWriter<File>>,
}

impl RawDumpHandler {
    pub fn create(path: &Path) -> OutputResult<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    fn write(&self, text: &str) -> OutputResult<()> {
        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        writer.write_all(text.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

impl OutputHandler for RawDumpHandler {
    fn begin_course(&self, course_url: &str, paths: &[LinkRef]) -> OutputResult<()> {
        self.write(&format!(
            "Course: {}\nCrawled: {}\nLearning paths: {}\n\n",
            course_url,
            Utc::now().to_rfc3339(),
            paths.len()
        ))
    }

    fn record_module(
        &self,
        path: &LinkRef,
        module: &ModuleData,
        content: &ModuleContent,
    ) -> OutputResult<()> {
        self.write(&format!(
            "--- {} / {} ---\nURL: {}\nTitle: {}\n\n{}\n\n",
            path.title, module.title, module.url, content.title, content.body
        ))
    }

    fn finalize(&self, report: &CourseReport) -> OutputResult<()> {
        let modules: usize = report
            .learning_paths
            .iter()
            .map(|path| path.modules.len())
            .sum();
        self.write(&format!(
            "--- end of crawl: {} paths, {} modules ---\n",
            report.total_paths, modules
        ))
    }
}
