//! Shelf-Scrape: a catalog book scraper
//!
//! This crate walks the paginated category listings of a book catalog,
//! visits every book's detail page through a page renderer, and collects
//! title, price, rating and category into a table.

pub mod config;
pub mod crawler;
pub mod output;
pub mod record;
pub mod render;
pub mod url;

use thiserror::Error;

/// Main error type for Shelf-Scrape operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("Renderer error: {0}")]
    Render(#[from] RenderError),

    #[error("Extraction failed for {url}: {source}")]
    Extract { url: String, source: ExtractError },

    #[error("Detail page did not finish loading within {timeout_secs}s: {url}")]
    DetailLoadTimeout { url: String, timeout_secs: u64 },

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector for {name}: '{selector}'")]
    InvalidSelector { name: String, selector: String },
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("URL has no path segments: {0}")]
    CannotBeABase(String),

    #[error("URL has no category directory segment: {0}")]
    MissingCategorySegment(String),

    #[error("Cannot derive page {page} from entry point {url}")]
    PageDerivation { url: String, page: u32 },
}

/// Errors raised while reading fields out of a detail page
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Unrecognized star rating in class list '{0}'")]
    InvalidRating(String),
}

/// Errors raised by a page renderer
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to launch browser: {0}")]
    Launch(String),

    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("No page has been loaded yet")]
    NoPage,

    #[error("Invalid selector: '{0}'")]
    InvalidSelector(String),

    #[error("Browser error: {0}")]
    Browser(String),
}

/// Result type alias for Shelf-Scrape operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Coordinator, SiteMarkup};
pub use record::{BookRecord, CategoryTally, CrawlReport, StarRating};
pub use render::PageRenderer;
pub use url::{category_label, page_url};
