//! HTTP fetcher implementation
//!
//! This module handles asset downloads, including:
//! - Building HTTP clients with proper user agent strings
//! - GET requests for asset bytes
//! - Deriving the local file name from the asset URL
//! - Error classification into non-fatal crawl failures

use crate::config::UserAgentConfig;
use crate::state::AssetReference;
use crate::storage::OutputStore;
use crate::url::asset_file_name;
use crate::{CrawlFailure, FetchError};
use reqwest::Client;
use std::path::PathBuf;

/// Result of downloading one asset
///
/// * `Ok(PathBuf)` - Where the asset was written
/// * `Err(CrawlFailure)` - A fetch or persist failure for this asset only
pub type FetchOutcome = Result<PathBuf, CrawlFailure>;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use sumi_mirror::config::UserAgentConfig;
/// use sumi_mirror::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Downloads assets and writes them into their page folder
///
/// There is no retry and no backoff: every download is attempted once.
#[derive(Debug, Clone)]
pub struct ResourceFetcher {
    client: Client,
    store: OutputStore,
}

impl ResourceFetcher {
    /// Creates a fetcher writing through `store`
    pub fn new(client: Client, store: OutputStore) -> Self {
        Self { client, store }
    }

    /// Downloads one asset into `<folder>/<basename>`
    ///
    /// # Request Flow
    ///
    /// 1. Derive the file name from the last URL path segment
    ///    - No usable segment → `FetchError::MissingFileName`
    /// 2. Send GET request
    ///    - Network error → `FetchError::Network`
    ///    - Non-2xx status → `FetchError::Status`
    /// 3. Write the body, replacing any file of the same name
    ///    - Write error → `CrawlFailure::Persist`
    ///
    /// Failures are returned as values; this never panics or aborts the
    /// caller.
    pub async fn fetch(&self, asset: &AssetReference) -> FetchOutcome {
        let url = asset.url.as_str();

        let file_name = asset_file_name(&asset.url).ok_or_else(|| CrawlFailure::Fetch {
            url: url.to_string(),
            source: FetchError::MissingFileName,
        })?;

        let bytes = self.download(asset).await.map_err(|source| CrawlFailure::Fetch {
            url: url.to_string(),
            source,
        })?;

        let path = asset.folder.join(file_name);
        self.store
            .write(&path, &bytes)
            .await
            .map_err(|source| CrawlFailure::Persist {
                url: url.to_string(),
                path: path.clone(),
                source,
            })?;

        Ok(path)
    }

    async fn download(&self, asset: &AssetReference) -> Result<Vec<u8>, FetchError> {
        let response = self.client.get(asset.url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        Ok(response.bytes().await?.to_vec())
    }
}
