//! Shelf-Scrape main entry point
//!
//! This is the command-line interface for the Shelf-Scrape book scraper.

use clap::Parser;
use shelf_scrape::config::{load_config_with_hash, validate, Config, RendererKind};
use shelf_scrape::crawler::crawl;
use shelf_scrape::output::{print_summary, write_table};
use shelf_scrape::url::{category_label, parse_entry_point};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Shelf-Scrape: a catalog book scraper
///
/// Walks every listing page of the configured categories, visits each
/// book's detail page, and writes title, price, rating and category to a
/// CSV file.
#[derive(Parser, Debug)]
#[command(name = "shelf-scrape")]
#[command(version)]
#[command(about = "Scrapes book records from a paginated catalog", long_about = None)]
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

    /// Renderer to use: browser or http
    #[arg(long, value_name = "KIND")]
    renderer: Option<RendererKind>,

    /// Show the browser window instead of running headless
    #[arg(long)]
    headed: bool,

    /// Write the CSV table here instead of the configured path
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Validate config and show what would be crawled without launching a renderer
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => {
            tracing::info!("No configuration file given, using built-in defaults");
            Config::default()
        }
    };

    apply_overrides(&mut config, &cli);
    validate(&config)?;

    if cli.dry_run {
        handle_dry_run(&config)?;
    } else {
        handle_crawl(&config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("shelf_scrape=info,warn"),
            1 => EnvFilter::new("shelf_scrape=debug,info"),
            2 => EnvFilter::new("shelf_scrape=trace,debug"),
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

/// Applies command-line overrides on top of the loaded configuration
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(kind) = cli.renderer {
        config.renderer.kind = kind;
    }

    if cli.headed {
        config.renderer.headless = false;
    }

    if let Some(path) = &cli.output {
        config.output.path = path.display().to_string();
    }
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Shelf-Scrape Dry Run ===\n");

    println!("Crawl Configuration:");
    println!("  Page load timeout: {}s", config.crawl.page_load_timeout_secs);
    println!(
        "  Detail load timeout: {}s",
        config.crawl.detail_load_timeout_secs
    );
    println!("  Poll interval: {}ms", config.crawl.poll_interval_ms);
    println!("  Settle delay: {}ms", config.crawl.settle_delay_ms);

    println!("\nRenderer:");
    println!("  Kind: {:?}", config.renderer.kind);
    println!("  Headless: {}", config.renderer.headless);
    println!(
        "  Window: {}x{}",
        config.renderer.window_width, config.renderer.window_height
    );
    println!("  User agent: {}", config.renderer.user_agent);

    println!("\nOutput:");
    println!("  Table: {}", config.output.path);

    println!("\nCategories ({}):", config.crawl.categories.len());
    for entry in &config.crawl.categories {
        let url = parse_entry_point(entry)?;
        println!("  - {} <- {}", category_label(&url)?, url);
    }

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Crawling {} categories with the {:?} renderer",
        config.crawl.categories.len(),
        config.renderer.kind
    );

    let report = match crawl(config).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    let output_path = Path::new(&config.output.path);
    write_table(&report.records, output_path)?;

    print_summary(&report, config.output.preview_rows, output_path);

    Ok(())
}
