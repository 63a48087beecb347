use std::collections::HashSet;
use url::Url;

/// URLs already dispatched for a visit during one run
///
/// A URL goes in when traversal commits to visiting it, before any work is
/// done, so re-entrant recursion into the same page is a no-op. Insertion
/// reports whether the URL was new, which keeps check-and-commit a single
/// step.
#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: HashSet<String>,
}

impl VisitedSet {
    /// Creates an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Commits to visiting `url`
    ///
    /// # Returns
    ///
    /// * `true` - The URL was not seen before and is now marked visited
    /// * `false` - The URL was already visited
    pub fn insert(&mut self, url: &Url) -> bool {
        self.urls.insert(url.as_str().to_string())
    }

    /// Returns true if `url` has been visited
    pub fn contains(&self, url: &Url) -> bool {
        self.urls.contains(url.as_str())
    }

    /// Number of URLs visited so far
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// Returns true if nothing has been visited yet
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}
