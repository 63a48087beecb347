use crate::UrlError;
use url::Url;

/// Normalizes a URL into the key used for visit deduplication
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Only HTTP and HTTPS are accepted
/// 3. The host must be present (the parser lowercases it, drops default
///    ports and removes dot segments from the path)
/// 4. Remove the fragment
///
/// The query string is kept as-is: two pages that differ only by query are
/// different visits.
///
/// # Examples
///
/// ```
/// use sumi_mirror::url::normalize_url;
///
/// let url = normalize_url("HTTPS://Example.COM:443/en/./docs/#intro").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/en/docs/");
/// ```
pub fn normalize_url(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;
    normalize(url)
}

/// Normalizes an already parsed URL
pub fn normalize(mut url: Url) -> Result<Url, UrlError> {
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost);
    }

    // A link with a fragment is followed as the page without it, so
    // `/en/a#s` and `/en/a` are the same visit. Fragment-only hrefs never
    // get here: the crawl scope drops them.
    url.set_fragment(None);

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_host() {
        let url = normalize_url("https://EXAMPLE.COM/En/Page").unwrap();
        // Host is case-insensitive, path is not
        assert_eq!(url.as_str(), "https://example.com/En/Page");
    }

    #[test]
    fn test_default_port_removed() {
        let url = normalize_url("http://example.com:80/en").unwrap();
        assert_eq!(url.as_str(), "http://example.com/en");

        let url = normalize_url("http://127.0.0.1:8080/en").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/en");
    }

    #[test]
    fn test_dot_segments_removed() {
        let url = normalize_url("https://example.com/en/a/../b/./c").unwrap();
        assert_eq!(url.path(), "/en/b/c");
    }

    #[test]
    fn test_fragment_removed() {
        let url = normalize_url("https://example.com/en/page#section").unwrap();
        assert_eq!(url.as_str(), "https://example.com/en/page");
    }

    #[test]
    fn test_query_kept() {
        let url = normalize_url("https://example.com/en/search?q=rust&page=2").unwrap();
        assert_eq!(url.query(), Some("q=rust&page=2"));
    }

    #[test]
    fn test_empty_path_becomes_root() {
        let url = normalize_url("https://example.com").unwrap();
        assert_eq!(url.path(), "/");
    }

    #[test]
    fn test_trailing_slash_preserved() {
        let with = normalize_url("https://example.com/en/").unwrap();
        let without = normalize_url("https://example.com/en").unwrap();
        assert_ne!(with, without);
    }

    #[test]
    fn test_invalid_scheme() {
        assert!(matches!(
            normalize_url("ftp://example.com/file"),
            Err(UrlError::InvalidScheme(_))
        ));
        assert!(matches!(
            normalize_url("mailto:someone@example.com"),
            Err(UrlError::InvalidScheme(_))
        ));
    }

    #[test]
    fn test_malformed_url() {
        assert!(matches!(normalize_url("not a url"), Err(UrlError::Parse(_))));
        assert!(matches!(normalize_url("/relative/path"), Err(UrlError::Parse(_))));
    }
}
