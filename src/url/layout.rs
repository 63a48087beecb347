//! Mapping from URLs to locations inside the output root
//!
//! A page at path `P` is written to `<root>/P/index.html`; its assets go
//! next to it as `<root>/P/<basename>`. Path segments are used as they
//! appear in the URL (still percent-encoded), and the query string is not
//! part of the layout.

use std::path::{Path, PathBuf};
use url::Url;

/// File name used for a page's markup
pub const PAGE_FILE_NAME: &str = "index.html";

/// Returns the directory holding a page's markup and assets
pub fn page_dir(root: &Path, url: &Url) -> PathBuf {
    let mut dir = root.to_path_buf();
    for segment in path_segments(url) {
        dir.push(segment);
    }
    dir
}

/// Returns the file a page's markup is written to
pub fn page_file(root: &Path, url: &Url) -> PathBuf {
    page_dir(root, url).join(PAGE_FILE_NAME)
}

/// Derives an asset's file name from the last segment of its URL path
///
/// Returns `None` when the path has no usable segment (e.g. `/`).
/// Assets sharing a basename map to the same file name.
pub fn asset_file_name(url: &Url) -> Option<String> {
    path_segments(url).last().map(|s| s.to_string())
}

/// Non-empty path segments, minus anything that could climb out of the root
fn path_segments(url: &Url) -> Vec<&str> {
    url.path_segments()
        .map(|segments| {
            segments
                .filter(|s| !s.is_empty() && *s != "." && *s != "..")
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_page_file() {
        let root = Path::new("/tmp/site");
        assert_eq!(
            page_file(root, &url("https://example.com/en/about")),
            PathBuf::from("/tmp/site/en/about/index.html")
        );
    }

    #[test]
    fn test_root_page_file() {
        let root = Path::new("site");
        assert_eq!(
            page_file(root, &url("https://example.com/")),
            PathBuf::from("site/index.html")
        );
    }

    #[test]
    fn test_trailing_slash_same_dir() {
        let root = Path::new("site");
        assert_eq!(
            page_dir(root, &url("https://example.com/en/")),
            page_dir(root, &url("https://example.com/en"))
        );
    }

    #[test]
    fn test_query_ignored() {
        let root = Path::new("site");
        assert_eq!(
            page_dir(root, &url("https://example.com/en/list?page=2")),
            PathBuf::from("site/en/list")
        );
    }

    #[test]
    fn test_encoded_segments_stay_inside_root() {
        let root = Path::new("site");
        let dir = page_dir(root, &url("https://example.com/en/%2E%2E/%2E%2E/etc"));
        assert!(dir.starts_with(root));
        assert!(!dir.components().any(|c| c == std::path::Component::ParentDir));
    }

    #[test]
    fn test_asset_file_name() {
        assert_eq!(
            asset_file_name(&url("https://cdn.example.com/static/css/site.css?v=3")),
            Some("site.css".to_string())
        );
        assert_eq!(
            asset_file_name(&url("https://example.com/img/")),
            Some("img".to_string())
        );
        assert_eq!(asset_file_name(&url("https://example.com/")), None);
    }
}
