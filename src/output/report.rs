//! Per-run reporting sink
//!
//! Every event the orchestrator wants surfaced goes through [`CrawlReport`]:
//! saved pages and assets are counted and logged at `info`, non-fatal
//! failures are logged at `warn` with the offending URL and counted by kind
//! for the end-of-run statistics.

use crate::output::stats::CrawlStatistics;
use crate::{CrawlFailure, FailureKind};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;
use url::Url;

/// Accumulates the outcome of one crawl run
#[derive(Debug)]
pub struct CrawlReport {
    started_at: DateTime<Utc>,
    started: Instant,
    pages_visited: u64,
    pages_saved: u64,
    assets_saved: u64,
    failures_by_kind: HashMap<FailureKind, u64>,
}

impl CrawlReport {
    /// Starts a new report, stamped with the current time
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            started: Instant::now(),
            pages_visited: 0,
            pages_saved: 0,
            assets_saved: 0,
            failures_by_kind: HashMap::new(),
        }
    }

    /// Records that a page was dispatched to the renderer
    pub fn page_visited(&mut self, url: &Url) {
        self.pages_visited += 1;
        tracing::info!("Visiting: {}", url);
    }

    /// Records a page whose markup was written to disk
    pub fn page_saved(&mut self, url: &Url, path: &Path) {
        self.pages_saved += 1;
        tracing::info!("Saved HTML for {}: {}", url, path.display());
    }

    /// Records a downloaded asset
    pub fn asset_saved(&mut self, url: &Url, path: &Path) {
        self.assets_saved += 1;
        tracing::info!("Downloaded: {} -> {}", url, path.display());
    }

    /// Records a non-fatal failure
    ///
    /// The failure is logged and counted; only the count outlives this call.
    pub fn failure(&mut self, failure: CrawlFailure) {
        tracing::warn!(kind = ?failure.kind(), url = %failure.url(), "{}", failure);
        *self.failures_by_kind.entry(failure.kind()).or_insert(0) += 1;
    }

    /// Number of failures of the given kind
    pub fn failure_count(&self, kind: FailureKind) -> u64 {
        self.failures_by_kind.get(&kind).copied().unwrap_or(0)
    }

    /// Snapshot of the run's counters
    pub fn statistics(&self) -> CrawlStatistics {
        CrawlStatistics {
            started_at: self.started_at,
            elapsed: self.started.elapsed(),
            pages_visited: self.pages_visited,
            pages_saved: self.pages_saved,
            assets_saved: self.assets_saved,
            failures_by_kind: self.failures_by_kind.clone(),
        }
    }
}

impl Default for CrawlReport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FetchError, RenderError};
    use std::path::PathBuf;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_counts() {
        let mut report = CrawlReport::new();
        report.page_visited(&url("https://example.com/en"));
        report.page_saved(&url("https://example.com/en"), Path::new("site/en/index.html"));
        report.asset_saved(
            &url("https://example.com/logo.png"),
            Path::new("site/en/logo.png"),
        );

        let stats = report.statistics();
        assert_eq!(stats.pages_visited, 1);
        assert_eq!(stats.pages_saved, 1);
        assert_eq!(stats.assets_saved, 1);
        assert_eq!(stats.total_failures(), 0);
    }

    #[test]
    fn test_failures_by_kind() {
        let mut report = CrawlReport::new();
        report.failure(CrawlFailure::Render {
            url: "https://example.com/en/broken".to_string(),
            source: RenderError::Status(500),
        });
        report.failure(CrawlFailure::Fetch {
            url: "https://example.com/a.js".to_string(),
            source: FetchError::Status(404),
        });
        report.failure(CrawlFailure::Fetch {
            url: "https://example.com/b.js".to_string(),
            source: FetchError::MissingFileName,
        });
        report.failure(CrawlFailure::Persist {
            url: "https://example.com/en".to_string(),
            path: PathBuf::from("site/en/index.html"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        });

        assert_eq!(report.failure_count(FailureKind::Render), 1);
        assert_eq!(report.failure_count(FailureKind::Fetch), 2);
        assert_eq!(report.failure_count(FailureKind::Persist), 1);

        let stats = report.statistics();
        assert_eq!(stats.total_failures(), 4);
        assert_eq!(stats.failures_by_kind.get(&FailureKind::Fetch), Some(&2));
    }
}
