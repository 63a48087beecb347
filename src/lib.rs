//! Sumi-Mirror: a same-site web mirror
//!
//! This crate walks a website depth-first from a seed URL, saves each page's
//! rendered markup under a local output root, and downloads the static assets
//! (stylesheets, scripts, images, media sources) every page references.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod storage;
pub mod url;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Sumi-Mirror operations
///
/// These errors are fatal and only arise while starting a run: loading the
/// configuration, building the HTTP client or launching the renderer. Once a
/// crawl is under way every failure is reported as a [`CrawlFailure`] instead.
#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid asset selector: {0}")]
    InvalidSelector(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Errors produced by a page renderer
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Render timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Page returned HTTP {0}")]
    Status(u16),

    #[error("Failed to read rendered markup: {0}")]
    Content(String),
}

/// Errors produced while downloading a single asset
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server returned HTTP {0}")]
    Status(u16),

    #[error("Asset URL has no file name")]
    MissingFileName,
}

/// Non-fatal failures recorded during a crawl
///
/// Each variant is caught at the boundary of the operation that produced it
/// and handed to the run's [`output::CrawlReport`]. None of them stops the
/// traversal.
#[derive(Debug, Error)]
pub enum CrawlFailure {
    #[error("Failed to render {url}: {source}")]
    Render { url: String, source: RenderError },

    #[error("Failed to write {} for {url}: {source}", .path.display())]
    Persist {
        url: String,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to download {url}: {source}")]
    Fetch { url: String, source: FetchError },
}

impl CrawlFailure {
    /// Returns the URL the failure is about
    pub fn url(&self) -> &str {
        match self {
            Self::Render { url, .. } | Self::Persist { url, .. } | Self::Fetch { url, .. } => url,
        }
    }

    /// Returns the failure category
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Render { .. } => FailureKind::Render,
            Self::Persist { .. } => FailureKind::Persist,
            Self::Fetch { .. } => FailureKind::Fetch,
        }
    }
}

/// Failure categories used for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    Render,
    Persist,
    Fetch,
}

/// Result type alias for Sumi-Mirror operations
pub type Result<T> = std::result::Result<T, MirrorError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_mirror, Coordinator};
pub use state::VisitedSet;
pub use url::{normalize_url, CrawlScope};
