//! Output module for crawl results
//!
//! This module handles:
//! - Writing the result table to a CSV file, once, after the crawl
//! - Printing a console preview and the table shape

mod preview;
mod table;

pub use preview::{format_preview, print_summary};
pub use table::{write_table, write_table_to};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write table: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
