//! URL handling module for Shelf-Scrape
//!
//! This module derives everything the crawl needs from a category entry
//! point: listing page URLs, the human-readable category label, and
//! absolute detail links resolved from listing anchors.

mod category;
mod pagination;
mod resolve;

// Re-export main functions
pub use category::category_label;
pub use pagination::{page_url, page_url_with_template, DEFAULT_PAGE_TEMPLATE};
pub use resolve::resolve_link;

use crate::UrlError;
use url::Url;

/// Parses a category entry point string into a [`Url`]
///
/// # Examples
///
/// ```
/// use shelf_scrape::url::parse_entry_point;
///
/// let url = parse_entry_point(
///     "https://books.toscrape.com/catalogue/category/books/travel_2/index.html",
/// )
/// .unwrap();
/// assert_eq!(url.host_str(), Some("books.toscrape.com"));
/// ```
pub fn parse_entry_point(entry: &str) -> Result<Url, UrlError> {
    let url = Url::parse(entry.trim()).map_err(|e| UrlError::Parse(format!("{}: {}", entry, e)))?;

    if url.cannot_be_a_base() {
        return Err(UrlError::CannotBeABase(entry.to_string()));
    }

    Ok(url)
}
