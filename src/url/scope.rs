use crate::config::Config;
use crate::url::normalize::normalize;
use crate::ConfigError;
use url::Url;

/// The rule deciding which discovered links the crawl recurses into
///
/// A link is in scope when it is not a pure in-page fragment, resolves
/// against the site's base URL to the same origin, and its path starts
/// with the configured prefix.
///
/// Links are resolved against the fixed base URL, never against the page
/// they were found on. Assets, by contrast, resolve against their page.
#[derive(Debug, Clone)]
pub struct CrawlScope {
    base: Url,
    prefix: String,
}

impl CrawlScope {
    /// Creates a scope rooted at `base` covering paths under `prefix`
    pub fn new(base: Url, prefix: impl Into<String>) -> Self {
        Self {
            base,
            prefix: prefix.into(),
        }
    }

    /// Builds the scope described by the `[site]` section
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self::new(config.base_url()?, config.site.scope_prefix.clone()))
    }

    /// The base URL links are resolved against
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// The path prefix in-scope links must start with
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Decides whether a discovered `href` is followed
    ///
    /// # Returns
    ///
    /// * `Some(Url)` - The absolute, fragment-free URL to visit
    /// * `None` - The link is out of scope
    ///
    /// # Examples
    ///
    /// ```
    /// use sumi_mirror::url::CrawlScope;
    /// use url::Url;
    ///
    /// let scope = CrawlScope::new(Url::parse("https://example.com/").unwrap(), "/en");
    ///
    /// assert!(scope.admit("/en/about").is_some());
    /// assert!(scope.admit("/fr/about").is_none());
    /// assert!(scope.admit("#top").is_none());
    /// ```
    pub fn admit(&self, href: &str) -> Option<Url> {
        let href = href.trim();

        // Empty and fragment-only hrefs point back at the current page
        if href.is_empty() || href.starts_with('#') {
            return None;
        }

        let resolved = self.base.join(href).ok()?;
        let resolved = normalize(resolved).ok()?;

        if self.contains(&resolved) {
            Some(resolved)
        } else {
            None
        }
    }

    /// Returns true if an absolute URL lies inside the scope
    pub fn contains(&self, url: &Url) -> bool {
        url.origin() == self.base.origin() && url.path().starts_with(&self.prefix)
    }
}
