//! Output module for crawl results
//!
//! This module handles:
//! - Appending summaries to the summary log and parsing it back
//! - Dumping raw scraped text during batch runs
//! - The handler trait the crawl walker reports progress through

mod raw_dump;
mod summary_log;
mod traits;

pub use raw_dump::RawDumpHandler;
pub use summary_log::{
    decode_log, encode_record, parse_log, LogError, SummaryLog, SummaryLogHandler,
    RECORD_RULE_WIDTH,
};
pub use traits::{OutputError, OutputHandler, OutputResult};
