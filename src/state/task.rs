use crate::url::{page_dir, page_file};
use std::path::{Path, PathBuf};
use url::Url;

/// An in-scope page waiting to be visited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTask {
    /// Absolute, normalized page URL
    pub url: Url,

    /// Where the page's markup is written
    pub output_path: PathBuf,

    /// Link distance from the seed page
    pub depth: u32,
}

impl PageTask {
    /// Creates a task for `url`, laid out under `root`
    pub fn new(url: Url, root: &Path, depth: u32) -> Self {
        let output_path = page_file(root, &url);
        Self {
            url,
            output_path,
            depth,
        }
    }

    /// Creates the task for a link found on this page
    pub fn child(&self, url: Url, root: &Path) -> Self {
        Self::new(url, root, self.depth + 1)
    }
}

/// A sub-resource referenced by a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetReference {
    /// Absolute asset URL, resolved against the referring page
    pub url: Url,

    /// Folder the asset is written into (the referring page's folder)
    pub folder: PathBuf,
}

impl AssetReference {
    /// Creates a reference for an asset found on the page at `page_url`
    pub fn for_page(url: Url, root: &Path, page_url: &Url) -> Self {
        Self {
            url,
            folder: page_dir(root, page_url),
        }
    }
}
