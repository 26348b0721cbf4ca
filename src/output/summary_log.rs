//! Append-only summary log
//!
//! Every summarized module is appended to a plain text file in this shape:
//!
//! ```text
//! === Summary for Module <n>: <title> ===
//! URL: <url>
//!
//! <summary text>
//! ====================================================================================================
//!
//! ```
//!
//! [`encode_record`] and [`decode_log`] are the only two places that know the
//! grammar. The file is never truncated, so it may hold several runs back to
//! back; decoding renumbers whatever it finds from 1.
//!
//! Appends from one process are serialized through [`SummaryLog`]. Several
//! processes appending to the same file can interleave records.

use crate::model::{LinkRef, ModuleContent, ModuleData, ParsedLog, SummaryRecord};
use crate::output::traits::{OutputHandler, OutputResult};
use regex::Regex;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, OnceLock};
use thiserror::Error;

/// Width of the `=` rule closing each record
pub const RECORD_RULE_WIDTH: usize = 100;

/// Prefix of a field line holding the module URL
const URL_FIELD: &str = "URL:";

/// Errors from reading the summary log
#[derive(Debug, Error)]
pub enum LogError {
    #[error("{} file not found", display_name(.0))]
    NotFound(PathBuf),

    #[error("Error parsing summaries file: {0}")]
    Io(#[from] std::io::Error),
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Splits a log into records; deliberately loose on the number of `=`
fn header_pattern() -> &'static Regex {
    static HEADER: OnceLock<Regex> = OnceLock::new();
    HEADER.get_or_init(|| {
        Regex::new(r"=+ Summary for Module \d+:").expect("summary header pattern is valid")
    })
}

/// Encodes one record in the log grammar
///
/// Line breaks inside the title or URL are flattened to spaces so the record
/// keeps its header and field lines intact.
pub fn encode_record(record: &SummaryRecord) -> String {
    format!(
        "=== Summary for Module {}: {} ===\n{} {}\n\n{}\n{}\n\n",
        record.module_number,
        single_line(&record.title),
        URL_FIELD,
        single_line(&record.url),
        record.text,
        "=".repeat(RECORD_RULE_WIDTH)
    )
}

fn single_line(value: &str) -> String {
    value.lines().map(str::trim).collect::<Vec<_>>().join(" ")
}

/// Decodes the full text of a summary log
///
/// Chunks between headers that carry no `URL:` line are rejected and counted
/// in [`ParsedLog::skipped_chunks`]. Summary lines are trimmed, blank lines
/// dropped, and lines starting with `=` treated as rules.
pub fn decode_log(content: &str) -> ParsedLog {
    let mut modules = Vec::new();
    let mut skipped_chunks = 0;

    for chunk in header_pattern().split(content) {
        let chunk = chunk.trim();
        if chunk.is_empty() {
            continue;
        }

        match decode_chunk(chunk, modules.len() + 1) {
            Some(record) => modules.push(record),
            None => {
                skipped_chunks += 1;
                tracing::warn!(
                    "Skipping summary log chunk without a {} line: {:?}",
                    URL_FIELD,
                    chunk.lines().next().unwrap_or_default()
                );
            }
        }
    }

    ParsedLog {
        total_modules: modules.len(),
        modules,
        skipped_chunks,
    }
}

fn decode_chunk(chunk: &str, module_number: usize) -> Option<SummaryRecord> {
    let first = chunk.lines().next().unwrap_or_default();
    let title = if first.contains("===") {
        first.replace("===", "").trim().to_string()
    } else {
        String::new()
    };

    let mut url = None;
    let mut summary_lines = Vec::new();
    for line in chunk.lines() {
        if url.is_none() {
            if let Some(value) = line.strip_prefix(URL_FIELD) {
                url = Some(value.trim().to_string());
            }
            continue;
        }
        if !line.trim().is_empty() && !line.starts_with('=') {
            summary_lines.push(line.trim());
        }
    }

    Some(SummaryRecord {
        module_number,
        title,
        url: url?,
        text: summary_lines.join("\n"),
    })
}

/// Reads and decodes a summary log file
///
/// # Returns
///
/// * `Ok(ParsedLog)` - The decoded records
/// * `Err(LogError::NotFound)` - The file does not exist
/// * `Err(LogError::Io)` - The file could not be read
pub fn parse_log(path: &Path) -> Result<ParsedLog, LogError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(LogError::NotFound(path.to_path_buf()))
        }
        Err(e) => return Err(LogError::Io(e)),
    };
    Ok(decode_log(&content))
}

/// Handle on a summary log file
#[derive(Debug)]
pub struct SummaryLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl SummaryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one record, creating the file if needed
    pub fn append(&self, record: &SummaryRecord) -> std::io::Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(encode_record(record).as_bytes())?;
        file.flush()
    }

    /// Reads the whole log back
    pub fn parse(&self) -> Result<ParsedLog, LogError> {
        parse_log(&self.path)
    }
}

/// Output handler appending each summarized module to a [`SummaryLog`]
///
/// Modules are numbered in the order they are recorded, across all learning
/// paths of the crawl.
#[derive(Debug)]
pub struct SummaryLogHandler {
    log: SummaryLog,
    recorded: AtomicUsize,
}

impl SummaryLogHandler {
    pub fn new(log: SummaryLog) -> Self {
        Self {
            log,
            recorded: AtomicUsize::new(0),
        }
    }
}

impl OutputHandler for SummaryLogHandler {
    fn record_module(
        &self,
        _path: &LinkRef,
        module: &ModuleData,
        _content: &ModuleContent,
    ) -> OutputResult<()> {
        let number = self.recorded.fetch_add(1, Ordering::SeqCst) + 1;
        self.log.append(&module.to_record(number))?;
        tracing::debug!("Appended module {} to {}", number, self.log.path().display());
        Ok(())
    }
}
