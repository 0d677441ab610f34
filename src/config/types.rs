use crate::crawler::SiteMarkup;
use serde::Deserialize;
use std::time::Duration;

/// Entry points crawled when no configuration file is given
pub const DEFAULT_CATEGORIES: [&str; 2] = [
    "https://books.toscrape.com/catalogue/category/books/travel_2/index.html",
    "https://books.toscrape.com/catalogue/category/books/nonfiction_13/index.html",
];

/// Main configuration structure for Shelf-Scrape
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawl: CrawlConfig,
    #[serde(default)]
    pub renderer: RendererConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub markup: SiteMarkup,
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CrawlConfig {
    /// Category entry points, crawled in this order
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,

    /// How long to wait for a listing page's loaded marker (seconds)
    #[serde(default = "default_load_timeout")]
    pub page_load_timeout_secs: u64,

    /// How long to wait for a detail page's content container (seconds)
    #[serde(default = "default_load_timeout")]
    pub detail_load_timeout_secs: u64,

    /// Delay between checks while waiting for an element (milliseconds)
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,

    /// Extra pause after a detail page is ready, before extraction (milliseconds)
    #[serde(default)]
    pub settle_delay_ms: u64,
}

impl CrawlConfig {
    pub fn page_load_timeout(&self) -> Duration {
        Duration::from_secs(self.page_load_timeout_secs)
    }

    pub fn detail_load_timeout(&self) -> Duration {
        Duration::from_secs(self.detail_load_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            page_load_timeout_secs: default_load_timeout(),
            detail_load_timeout_secs: default_load_timeout(),
            poll_interval_ms: default_poll_interval(),
            settle_delay_ms: 0,
        }
    }
}

/// Which renderer drives page loads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    /// Chromium over the DevTools protocol
    #[default]
    Browser,
    /// Plain HTTP fetch, no script execution
    Http,
}

impl std::str::FromStr for RendererKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "browser" => Ok(Self::Browser),
            "http" => Ok(Self::Http),
            other => Err(format!("unknown renderer '{}' (expected browser or http)", other)),
        }
    }
}

/// Renderer session configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RendererConfig {
    #[serde(default)]
    pub kind: RendererKind,

    /// Run Chromium without a visible window
    #[serde(default = "default_true")]
    pub headless: bool,

    #[serde(default = "default_window_width")]
    pub window_width: u32,

    #[serde(default = "default_window_height")]
    pub window_height: u32,

    /// Per-request timeout for navigation (seconds)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            kind: RendererKind::default(),
            headless: true,
            window_width: default_window_width(),
            window_height: default_window_height(),
            request_timeout_secs: default_request_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Path of the CSV file written after the crawl
    #[serde(default = "default_output_path")]
    pub path: String,

    /// Number of rows echoed to the console after the crawl
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            preview_rows: default_preview_rows(),
        }
    }
}

fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect()
}

fn default_load_timeout() -> u64 {
    20
}

fn default_poll_interval() -> u64 {
    250
}

fn default_true() -> bool {
    true
}

fn default_window_width() -> u32 {
    1920
}

fn default_window_height() -> u32 {
    1080
}

fn default_request_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("shelf-scrape/{}", env!("CARGO_PKG_VERSION"))
}

fn default_output_path() -> String {
    "books_details.csv".to_string()
}

fn default_preview_rows() -> usize {
    10
}
