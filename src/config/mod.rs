//! Configuration module for Sumi-Mirror
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so a run without a configuration file is valid.
//!
//! # Example
//!
//! ```no_run
//! use sumi_mirror::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("mirror.toml")).unwrap();
//! println!("Render timeout: {}ms", config.crawler.render_timeout);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    AssetConfig, Config, CrawlerConfig, OutputConfig, RendererKind, SettlePolicy, SiteConfig,
    UserAgentConfig,
};

// Re-export parser functions
pub use parser::{
    compute_config_hash, default_config, load_config, load_config_with_hash, parse_config,
};
