//! Sumi-Mirror main entry point
//!
//! This is the command-line interface for the Sumi-Mirror site mirror.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use sumi_mirror::config::{default_config, load_config_with_hash, Config, SettlePolicy};
use sumi_mirror::crawler::crawl;
use tracing_subscriber::EnvFilter;

/// Sumi-Mirror: a same-site web mirror
///
/// Sumi-Mirror walks a website depth-first from a seed page, saves every
/// in-scope page as `<output>/<path>/index.html` and downloads the
/// stylesheets, scripts, images and media each page references next to it.
#[derive(Parser, Debug)]
#[command(name = "sumi-mirror")]
#[command(version = "1.0.0")]
#[command(about = "A same-site web mirror", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be mirrored without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using built-in defaults");
            default_config().context("Built-in configuration is invalid")?
        }
    };

    if cli.dry_run {
        handle_dry_run(&config)?;
    } else {
        handle_mirror(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sumi_mirror=info,warn"),
            1 => EnvFilter::new("sumi_mirror=debug,info"),
            2 => EnvFilter::new("sumi_mirror=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would be mirrored
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    let seed = config.seed_url()?;

    println!("=== Sumi-Mirror Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);
    println!("  Seed page: {}", seed);
    println!("  Scope prefix: {}", config.site.scope_prefix);

    println!("\nCrawler Configuration:");
    println!("  Renderer: {:?}", config.crawler.renderer);
    println!("  Render timeout: {}ms", config.crawler.render_timeout);
    match config.crawler.settle {
        SettlePolicy::Immediate => println!("  Settle: immediate"),
        SettlePolicy::Fixed { millis } => println!("  Settle: fixed {}ms", millis),
    }
    match config.crawler.max_depth {
        Some(depth) => println!("  Max depth: {}", depth),
        None => println!("  Max depth: unlimited"),
    }
    match config.crawler.max_pages {
        Some(pages) => println!("  Max pages: {}", pages),
        None => println!("  Max pages: unlimited"),
    }

    println!("\nUser Agent: {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!("  Root: {}", config.output.root);

    println!("\nAsset Selectors ({}):", config.assets.selectors.len());
    for selector in &config.assets.selectors {
        println!("  - {}", selector);
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would start mirroring at {}", seed);

    Ok(())
}

/// Handles the main mirror operation
async fn handle_mirror(config: Config) -> anyhow::Result<()> {
    tracing::info!(
        "Mirroring {} (scope {}) into {}",
        config.site.base_url,
        config.site.scope_prefix,
        config.output.root
    );

    match crawl(config).await {
        Ok(stats) => {
            tracing::info!(
                "Mirror completed: {} pages saved, {} failures",
                stats.pages_saved,
                stats.total_failures()
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Mirror failed: {}", e);
            Err(e.into())
        }
    }
}
