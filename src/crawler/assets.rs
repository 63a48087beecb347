//! Asset extraction and concurrent download for a single page

use crate::crawler::fetcher::{FetchOutcome, ResourceFetcher};
use crate::crawler::parser::{extract_asset_urls, AssetSelectors};
use crate::state::AssetReference;
use futures::future::join_all;
use std::path::PathBuf;
use url::Url;

/// Finds a page's assets and downloads them all at once
pub struct AssetExtractor {
    fetcher: ResourceFetcher,
    selectors: AssetSelectors,
    root: PathBuf,
}

impl AssetExtractor {
    /// Creates an extractor writing assets under `root`
    pub fn new(fetcher: ResourceFetcher, selectors: AssetSelectors, root: impl Into<PathBuf>) -> Self {
        Self {
            fetcher,
            selectors,
            root: root.into(),
        }
    }

    /// Resolves every asset reference in `markup` against `page_url`
    ///
    /// Duplicates are not merged.
    pub fn references(&self, markup: &str, page_url: &Url) -> Vec<AssetReference> {
        extract_asset_urls(markup, page_url, &self.selectors)
            .into_iter()
            .map(|url| AssetReference::for_page(url, &self.root, page_url))
            .collect()
    }

    /// Downloads every asset referenced by a page
    ///
    /// All downloads are dispatched together and this returns once each of
    /// them has finished, successfully or not. Outcomes come back in
    /// reference order.
    pub async fn extract(&self, markup: &str, page_url: &Url) -> Vec<(AssetReference, FetchOutcome)> {
        let references = self.references(markup, page_url);
        if references.is_empty() {
            return Vec::new();
        }

        tracing::debug!("Fetching {} assets for {}", references.len(), page_url);

        let outcomes = join_all(references.iter().map(|asset| self.fetcher.fetch(asset))).await;

        references.into_iter().zip(outcomes).collect()
    }
}
