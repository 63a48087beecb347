//! Output module for run reporting
//!
//! This module handles:
//! - Logging saved pages, downloaded assets and non-fatal failures
//! - Recording crawl statistics for the end-of-run summary

mod report;
pub mod stats;

pub use report::CrawlReport;
pub use stats::{log_statistics, CrawlStatistics};
