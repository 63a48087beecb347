//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the traversal engine and the run driver around it:
//! - Committing URLs to the visited set before any work is done
//! - Rendering pages and persisting their markup
//! - Handing each page to the asset extractor
//! - Discovering in-scope links and walking them depth-first
//! - Starting and tearing down the page renderer

use crate::config::{Config, RendererKind};
use crate::crawler::assets::AssetExtractor;
use crate::crawler::fetcher::{build_http_client, ResourceFetcher};
use crate::crawler::parser::{parse_html, AssetSelectors};
use crate::crawler::renderer::{HttpRenderer, Navigation, PageRenderer};
use crate::output::{CrawlReport, CrawlStatistics};
use crate::state::{PageTask, VisitedSet};
use crate::storage::OutputStore;
use crate::url::{normalize, CrawlScope};
use crate::{CrawlFailure, MirrorError, RenderError};
use std::sync::Arc;
use url::Url;

/// Main crawler coordinator structure
///
/// Owns the visited set for one run. Pages are processed one at a time;
/// only the assets of the current page are fetched concurrently.
pub struct Coordinator {
    config: Arc<Config>,
    renderer: Arc<dyn PageRenderer>,
    extractor: AssetExtractor,
    store: OutputStore,
    scope: CrawlScope,
    visited: VisitedSet,
    report: CrawlReport,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The run configuration
    /// * `renderer` - The renderer used for every page of the run
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(MirrorError)` - Invalid configuration or HTTP client failure
    pub fn new(config: Config, renderer: Arc<dyn PageRenderer>) -> Result<Self, MirrorError> {
        let scope = CrawlScope::from_config(&config)?;
        let store = OutputStore::new(config.output_root());

        let client = build_http_client(&config.user_agent)?;
        let fetcher = ResourceFetcher::new(client, store.clone());
        let selectors = AssetSelectors::from_config(&config.assets)?;
        let extractor = AssetExtractor::new(fetcher, selectors, store.root());

        Ok(Self {
            config: Arc::new(config),
            renderer,
            extractor,
            store,
            scope,
            visited: VisitedSet::new(),
            report: CrawlReport::new(),
        })
    }

    /// The URLs visited so far
    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    /// The run's report
    pub fn report(&self) -> &CrawlReport {
        &self.report
    }

    /// Visits `url` and every in-scope page reachable from it
    ///
    /// Visiting a URL that was already visited in this run is a no-op.
    /// Failures are recorded in the report and never returned: when this
    /// returns, the reachable link graph has been exhausted.
    pub async fn visit(&mut self, url: &Url) {
        let url = match normalize(url.clone()) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Cannot visit {}: {}", url, e);
                return;
            }
        };

        // Pending pages, next one on top. Children are pushed in reverse so
        // they pop in document order, each subtree finishing before the next
        // sibling starts.
        let mut pending = vec![PageTask::new(url, self.store.root(), 0)];

        while let Some(task) = pending.pop() {
            let links = self.visit_page(task).await;
            pending.extend(links.into_iter().rev());
        }
    }

    /// Visits one page and returns the links to walk next
    ///
    /// Returns nothing when the page is skipped, already visited or fails to
    /// render.
    async fn visit_page(&mut self, task: PageTask) -> Vec<PageTask> {
        if let Some(max_depth) = self.config.crawler.max_depth {
            if task.depth > max_depth {
                tracing::debug!("Skipping {}: depth {} exceeds limit", task.url, task.depth);
                return Vec::new();
            }
        }

        if let Some(max_pages) = self.config.crawler.max_pages {
            if self.visited.len() >= max_pages {
                tracing::debug!("Skipping {}: page limit {} reached", task.url, max_pages);
                return Vec::new();
            }
        }

        // Commit before work so a page linking back to itself is a no-op
        if !self.visited.insert(&task.url) {
            tracing::debug!("Already visited: {}", task.url);
            return Vec::new();
        }

        self.report.page_visited(&task.url);

        match self.process_page(&task).await {
            Ok(links) => links,
            Err(failure) => {
                self.report.failure(failure);
                Vec::new()
            }
        }
    }

    /// Processes a single page
    ///
    /// This method:
    /// 1. Renders the page under the render timeout
    /// 2. Applies the settle policy and captures the markup
    /// 3. Writes the markup (a write failure is reported, not returned)
    /// 4. Downloads the page's assets
    /// 5. Returns the in-scope links to walk next
    ///
    /// Only a render failure is returned: it means there is nothing to save
    /// and no links to follow.
    async fn process_page(&mut self, task: &PageTask) -> Result<Vec<PageTask>, CrawlFailure> {
        let url = &task.url;

        let navigation = self.render(url).await?;
        if navigation.final_url != *url {
            tracing::debug!("{} redirected to {}", url, navigation.final_url);
        }

        self.config.crawler.settle.settle().await;

        let markup = self
            .renderer
            .content()
            .await
            .map_err(|source| CrawlFailure::Render {
                url: url.to_string(),
                source,
            })?;

        match self.store.write(&task.output_path, markup.as_bytes()).await {
            Ok(()) => self.report.page_saved(url, &task.output_path),
            Err(source) => self.report.failure(CrawlFailure::Persist {
                url: url.to_string(),
                path: task.output_path.clone(),
                source,
            }),
        }

        for (asset, outcome) in self.extractor.extract(&markup, url).await {
            match outcome {
                Ok(path) => self.report.asset_saved(&asset.url, &path),
                Err(failure) => self.report.failure(failure),
            }
        }

        Ok(self.discover_links(task, &markup))
    }

    /// Navigates to `url`, treating timeouts and non-2xx statuses as failures
    async fn render(&self, url: &Url) -> Result<Navigation, CrawlFailure> {
        let timeout = self.config.crawler.render_timeout();

        let result = match tokio::time::timeout(timeout, self.renderer.navigate(url)).await {
            Ok(result) => result,
            Err(_) => Err(RenderError::Timeout {
                timeout_ms: self.config.crawler.render_timeout,
            }),
        };

        let navigation = result.map_err(|source| CrawlFailure::Render {
            url: url.to_string(),
            source,
        })?;

        if !navigation.is_success() {
            return Err(CrawlFailure::Render {
                url: url.to_string(),
                source: RenderError::Status(navigation.status),
            });
        }

        Ok(navigation)
    }

    /// Finds the in-scope links on a page, in document order
    fn discover_links(&self, task: &PageTask, markup: &str) -> Vec<PageTask> {
        let parsed = parse_html(markup);

        if let Some(title) = &parsed.title {
            tracing::debug!("Page title for {}: {}", task.url, title);
        }

        parsed
            .anchors
            .iter()
            .filter_map(|href| {
                let admitted = self.scope.admit(href);
                if admitted.is_none() {
                    tracing::trace!("Out of scope on {}: {}", task.url, href);
                }
                admitted
            })
            .map(|url| task.child(url, self.store.root()))
            .collect()
    }
}

/// Runs a complete mirror operation
///
/// This function orchestrates the entire run:
///
/// 1. Resolve the seed URL
/// 2. Start the configured page renderer
/// 3. Visit the seed page and everything reachable in scope
/// 4. Close the renderer
/// 5. Return the run statistics
///
/// Page and asset failures do not make this fail; only start-up problems do.
///
/// # Example
///
/// ```no_run
/// use sumi_mirror::config::load_config;
/// use sumi_mirror::crawler::run_mirror;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("mirror.toml"))?;
/// let stats = run_mirror(config).await?;
/// println!("{} pages saved", stats.pages_saved);
/// # Ok(())
/// # }
/// ```
pub async fn run_mirror(config: Config) -> Result<CrawlStatistics, MirrorError> {
    let seed = config.seed_url()?;
    let renderer = start_renderer(&config).await?;

    let mut coordinator = match Coordinator::new(config, Arc::clone(&renderer)) {
        Ok(coordinator) => coordinator,
        Err(e) => {
            close_renderer(renderer.as_ref()).await;
            return Err(e);
        }
    };

    tracing::info!("Starting mirror at {}", seed);
    coordinator.visit(&seed).await;

    close_renderer(renderer.as_ref()).await;

    Ok(coordinator.report().statistics())
}

/// Starts the renderer selected in the configuration
async fn start_renderer(config: &Config) -> Result<Arc<dyn PageRenderer>, MirrorError> {
    match config.crawler.renderer {
        RendererKind::Http => Ok(Arc::new(HttpRenderer::from_config(&config.user_agent)?)),
        #[cfg(feature = "browser")]
        RendererKind::Browser => {
            let renderer = crate::crawler::browser::BrowserRenderer::launch(
                config.crawler.render_timeout(),
                &config.user_agent.header_value(),
            )
            .await?;
            Ok(Arc::new(renderer))
        }
        #[cfg(not(feature = "browser"))]
        RendererKind::Browser => Err(crate::ConfigError::Validation(
            "renderer = \"browser\" requires building with the `browser` feature".to_string(),
        )
        .into()),
    }
}

async fn close_renderer(renderer: &dyn PageRenderer) {
    if let Err(e) = renderer.close().await {
        tracing::warn!("Failed to close renderer: {}", e);
    }
}
