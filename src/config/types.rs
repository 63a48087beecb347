use crate::ConfigError;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Main configuration structure for Sumi-Mirror
///
/// Every section is optional. A missing section or key falls back to the
/// built-in defaults, so an empty file (or no file at all) mirrors
/// `https://google.com/en` into `./site`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default, rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub assets: AssetConfig,
}

impl Config {
    /// Parses the configured base URL
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.site.base_url).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid base-url '{}': {}", self.site.base_url, e))
        })
    }

    /// Resolves the seed page URL (`base-url` joined with `seed-path`)
    pub fn seed_url(&self) -> Result<Url, ConfigError> {
        self.base_url()?.join(&self.site.seed_path).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid seed-path '{}': {}", self.site.seed_path, e))
        })
    }

    /// Returns the output root directory
    pub fn output_root(&self) -> PathBuf {
        PathBuf::from(&self.output.root)
    }
}

/// Site being mirrored
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Base URL of the site; discovered links are resolved against it
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Path of the first page, joined onto the base URL
    #[serde(rename = "seed-path")]
    pub seed_path: String,

    /// Only links whose path starts with this prefix are followed
    #[serde(rename = "scope-prefix")]
    pub scope_prefix: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://google.com".to_string(),
            seed_path: "/en".to_string(),
            scope_prefix: "/en".to_string(),
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Upper bound on a single page render (milliseconds)
    #[serde(rename = "render-timeout")]
    pub render_timeout: u64,

    /// How long to let a page settle before its markup is captured
    pub settle: SettlePolicy,

    /// Which renderer drives page loads
    pub renderer: RendererKind,

    /// Maximum link depth below the seed page (unbounded when absent)
    #[serde(rename = "max-depth")]
    pub max_depth: Option<u32>,

    /// Maximum number of pages visited in one run (unbounded when absent)
    #[serde(rename = "max-pages")]
    pub max_pages: Option<usize>,
}

impl CrawlerConfig {
    /// Returns the render timeout as a `Duration`
    pub fn render_timeout(&self) -> Duration {
        Duration::from_millis(self.render_timeout)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            render_timeout: 60_000,
            settle: SettlePolicy::default(),
            renderer: RendererKind::default(),
            max_depth: None,
            max_pages: None,
        }
    }
}

/// Wait applied between navigation and markup capture
///
/// This is a heuristic pause for deferred scripts, not a completion
/// guarantee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "strategy", rename_all = "kebab-case")]
pub enum SettlePolicy {
    /// Capture markup as soon as navigation finishes
    Immediate,
    /// Pause for a fixed number of milliseconds
    Fixed { millis: u64 },
}

impl SettlePolicy {
    /// Returns the pause this policy applies, if any
    pub fn delay(&self) -> Option<Duration> {
        match self {
            Self::Immediate => None,
            Self::Fixed { millis: 0 } => None,
            Self::Fixed { millis } => Some(Duration::from_millis(*millis)),
        }
    }

    /// Waits according to the policy
    pub async fn settle(&self) {
        if let Some(delay) = self.delay() {
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for SettlePolicy {
    fn default() -> Self {
        Self::Fixed { millis: 2_000 }
    }
}

/// Available page renderers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RendererKind {
    /// Plain HTTP GET; markup is captured as served
    #[default]
    Http,
    /// Headless Chromium; requires the `browser` feature
    Browser,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: Option<String>,
}

impl UserAgentConfig {
    /// Formats the `User-Agent` header value
    ///
    /// Format: `CrawlerName/Version` or `CrawlerName/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        match &self.contact_url {
            Some(contact) => format!(
                "{}/{} (+{})",
                self.crawler_name, self.crawler_version, contact
            ),
            None => format!("{}/{}", self.crawler_name, self.crawler_version),
        }
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "SumiMirror".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: None,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the mirror is written into
    pub root: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root: "./site".to_string(),
        }
    }
}

/// Asset extraction configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// CSS selectors for resource-bearing elements
    ///
    /// The URL is read from `src`, falling back to `href`.
    pub selectors: Vec<String>,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            selectors: vec![
                "link[href]".to_string(),
                "script[src]".to_string(),
                "img[src]".to_string(),
                "video source[src]".to_string(),
                "source[src]".to_string(),
            ],
        }
    }
}
