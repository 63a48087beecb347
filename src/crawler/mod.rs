//! Crawler module for page rendering, asset download and traversal
//!
//! This module contains the core mirroring logic, including:
//! - Page rendering through a pluggable renderer
//! - HTML parsing, link discovery and asset selection
//! - Concurrent asset download into page folders
//! - Overall depth-first crawl coordination

mod assets;
#[cfg(feature = "browser")]
mod browser;
mod coordinator;
mod fetcher;
mod parser;
mod renderer;

pub use assets::AssetExtractor;
#[cfg(feature = "browser")]
pub use browser::BrowserRenderer;
pub use coordinator::{run_mirror, Coordinator};
pub use fetcher::{build_http_client, FetchOutcome, ResourceFetcher};
pub use parser::{extract_asset_urls, parse_html, AssetSelectors, ParsedPage};
pub use renderer::{HttpRenderer, Navigation, PageRenderer};

use crate::config::Config;
use crate::output::{log_statistics, CrawlStatistics};
use crate::MirrorError;

/// Runs a complete mirror and logs its statistics
///
/// This is the main entry point for starting a mirror. It will:
/// 1. Start the configured renderer
/// 2. Walk the site depth-first from the seed page
/// 3. Save every page's markup and assets
/// 4. Close the renderer and log the run statistics
///
/// # Arguments
///
/// * `config` - The mirror configuration
///
/// # Returns
///
/// * `Ok(CrawlStatistics)` - The run finished; individual pages may still have failed
/// * `Err(MirrorError)` - The run could not start
pub async fn crawl(config: Config) -> Result<CrawlStatistics, MirrorError> {
    let stats = run_mirror(config).await?;
    log_statistics(&stats);
    Ok(stats)
}
