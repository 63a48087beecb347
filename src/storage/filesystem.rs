//! Filesystem-backed output store

use std::io;
use std::path::{Path, PathBuf};

/// Writes mirrored pages and assets under an output root
///
/// Folder creation is idempotent, so concurrent asset writes into the same
/// page folder need no coordination. Existing files are overwritten.
#[derive(Debug, Clone)]
pub struct OutputStore {
    root: PathBuf,
}

impl OutputStore {
    /// Creates a store rooted at `root`
    ///
    /// Nothing is created on disk until the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The output root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes `bytes` to `path`, creating parent folders as needed
    pub async fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, bytes).await
    }
}
