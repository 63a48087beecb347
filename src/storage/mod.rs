//! Storage module for persisting the mirror
//!
//! Pages and assets are plain files under the output root; see
//! [`crate::url::layout`] for how URLs map to paths.

mod filesystem;

pub use filesystem::OutputStore;
