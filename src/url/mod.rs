//! URL handling module for Sumi-Mirror
//!
//! This module provides visit-key normalization, the crawl scope rule, and
//! the mapping from URLs to paths inside the output root.

pub mod layout;
mod normalize;
mod scope;

// Re-export main functions
pub use layout::{asset_file_name, page_dir, page_file};
pub use normalize::{normalize, normalize_url};
pub use scope::CrawlScope;
