//! End-of-run crawl statistics

use crate::FailureKind;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::time::Duration;

/// Crawl statistics summary
#[derive(Debug, Clone)]
pub struct CrawlStatistics {
    /// When the run started
    pub started_at: DateTime<Utc>,

    /// Wall-clock duration of the run
    pub elapsed: Duration,

    /// Pages dispatched to the renderer
    pub pages_visited: u64,

    /// Pages whose markup was written
    pub pages_saved: u64,

    /// Assets downloaded and written
    pub assets_saved: u64,

    /// Non-fatal failures by category
    pub failures_by_kind: HashMap<FailureKind, u64>,
}

impl CrawlStatistics {
    /// Total number of non-fatal failures
    pub fn total_failures(&self) -> u64 {
        self.failures_by_kind.values().sum()
    }

    /// Share of visited pages that were saved, as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.pages_visited == 0 {
            return 0.0;
        }
        (self.pages_saved as f64 / self.pages_visited as f64) * 100.0
    }
}

/// Logs the statistics at `info` level
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn log_statistics(stats: &CrawlStatistics) {
    tracing::info!(
        "Crawl started {} finished in {:.1}s",
        stats.started_at.to_rfc3339(),
        stats.elapsed.as_secs_f64()
    );
    tracing::info!(
        "Pages: {} visited, {} saved ({:.1}%)",
        stats.pages_visited,
        stats.pages_saved,
        stats.success_rate()
    );
    tracing::info!("Assets: {} downloaded", stats.assets_saved);

    if stats.total_failures() > 0 {
        let mut failure_counts: Vec<_> = stats.failures_by_kind.iter().collect();
        failure_counts.sort_by(|a, b| b.1.cmp(a.1));

        for (kind, count) in failure_counts {
            tracing::info!("  {:?} failures: {}", kind, count);
        }
    }
}
