//! Configuration module for Shelf-Scrape
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key is optional; an absent file section falls back to the built-in
//! books.toscrape.com defaults.
//!
//! # Example
//!
//! ```no_run
//! use shelf_scrape::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("shelf-scrape.toml")).unwrap();
//! println!("Writing rows to: {}", config.output.path);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlConfig, OutputConfig, RendererConfig, RendererKind, DEFAULT_CATEGORIES,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
