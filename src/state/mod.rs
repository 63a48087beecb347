//! Crawl state tracking
//!
//! This module holds the per-run visited set and the short-lived work items
//! passed between the orchestrator, the asset extractor and the fetcher.

mod task;
mod visited;

pub use task::{AssetReference, PageTask};
pub use visited::VisitedSet;
