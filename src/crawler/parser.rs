//! HTML parser for extracting anchors and asset references
//!
//! Everything here is synchronous and returns owned data: the parsed
//! document never lives across an await point.

use crate::config::AssetConfig;
use crate::ConfigError;
use scraper::{Html, Selector};
use url::Url;

/// Extracted information from a rendered page
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// The page title (from <title> tag)
    pub title: Option<String>,

    /// Raw `href` values of every `<a href>`, in document order
    pub anchors: Vec<String>,
}

/// Parses rendered markup and extracts its title and anchors
///
/// Anchors are returned unresolved; deciding which ones to follow is the
/// crawl scope's job.
///
/// # Example
///
/// ```
/// use sumi_mirror::crawler::parse_html;
///
/// let html = r##"<html><head><title>Home</title></head>
///     <body><a href="/en/about">About</a><a href="#top">Top</a></body></html>"##;
/// let parsed = parse_html(html);
/// assert_eq!(parsed.title.as_deref(), Some("Home"));
/// assert_eq!(parsed.anchors, vec!["/en/about", "#top"]);
/// ```
pub fn parse_html(html: &str) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        title: extract_title(&document),
        anchors: extract_anchors(&document),
    }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extracts every anchor `href` from the HTML document
fn extract_anchors(document: &Html) -> Vec<String> {
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}

/// Compiled selectors for resource-bearing elements
#[derive(Debug, Clone)]
pub struct AssetSelectors {
    selectors: Vec<Selector>,
}

impl AssetSelectors {
    /// Compiles a list of CSS selectors
    pub fn new<S: AsRef<str>>(selectors: &[S]) -> Result<Self, ConfigError> {
        let selectors = selectors
            .iter()
            .map(|s| {
                Selector::parse(s.as_ref()).map_err(|e| {
                    ConfigError::InvalidSelector(format!("'{}': {:?}", s.as_ref(), e))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { selectors })
    }

    /// Compiles the selectors from the `[assets]` section
    pub fn from_config(config: &AssetConfig) -> Result<Self, ConfigError> {
        Self::new(&config.selectors)
    }
}

/// Finds every asset referenced by a page
///
/// Selectors are applied in order, each matching in document order. The URL
/// comes from `src`, falling back to `href`, and is resolved against the
/// page URL. Duplicates are kept: an element matched by two selectors, or
/// the same URL referenced twice, yields two entries. Only HTTP(S) URLs are
/// returned, so inline `data:` sources are skipped.
pub fn extract_asset_urls(html: &str, page_url: &Url, selectors: &AssetSelectors) -> Vec<Url> {
    let document = Html::parse_document(html);
    let mut assets = Vec::new();

    for selector in &selectors.selectors {
        for element in document.select(selector) {
            let attr = element
                .value()
                .attr("src")
                .or_else(|| element.value().attr("href"));

            let Some(attr) = attr.map(str::trim).filter(|a| !a.is_empty()) else {
                continue;
            };

            match page_url.join(attr) {
                Ok(url) if url.scheme() == "http" || url.scheme() == "https" => assets.push(url),
                Ok(url) => {
                    tracing::debug!("Skipping non-HTTP asset on {}: {}", page_url, url.scheme());
                }
                Err(e) => {
                    tracing::debug!("Skipping unresolvable asset '{}' on {}: {}", attr, page_url, e);
                }
            }
        }
    }

    assets
}
