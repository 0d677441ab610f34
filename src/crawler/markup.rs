//! Site markup adapter
//!
//! Every selector and naming convention tied to the catalog's HTML lives
//! here. A markup change on the site should only require touching this
//! file (or the `[markup]` section of the configuration).

use crate::record::StarRating;
use crate::url::{page_url_with_template, DEFAULT_PAGE_TEMPLATE};
use crate::{ConfigError, ExtractError, UrlError};
use scraper::Selector;
use serde::Deserialize;
use url::Url;

/// Selectors and conventions describing the catalog's markup
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SiteMarkup {
    /// Element whose presence means a listing page has rendered
    pub loaded_marker: String,

    /// Anchors on a listing page pointing to detail pages
    pub item_link: String,

    /// Container holding a detail page's fields
    pub content: String,

    /// Title element, searched inside `content`
    pub title: String,

    /// Price element, searched inside `content`
    pub price: String,

    /// Rating element, searched inside `content`
    pub rating: String,

    /// Class token that precedes the rating word on the rating element
    pub rating_marker: String,

    /// File name of listing pages after the first; `{page}` is replaced
    pub page_template: String,
}

impl Default for SiteMarkup {
    fn default() -> Self {
        Self {
            loaded_marker: ".page_inner".to_string(),
            item_link: "h3 > a".to_string(),
            content: ".content".to_string(),
            title: "h1".to_string(),
            price: "p.price_color".to_string(),
            rating: "p.star-rating".to_string(),
            rating_marker: "star-rating".to_string(),
            page_template: DEFAULT_PAGE_TEMPLATE.to_string(),
        }
    }
}

impl SiteMarkup {
    /// All CSS selectors with their key names, for validation
    pub fn selectors(&self) -> [(&'static str, &str); 6] {
        [
            ("loaded-marker", self.loaded_marker.as_str()),
            ("item-link", self.item_link.as_str()),
            ("content", self.content.as_str()),
            ("title", self.title.as_str()),
            ("price", self.price.as_str()),
            ("rating", self.rating.as_str()),
        ]
    }

    /// URL of listing page `page` for a category entry point
    pub fn page_url(&self, entry: &Url, page: u32) -> Result<Url, UrlError> {
        page_url_with_template(entry, page, &self.page_template)
    }

    /// Reads the star rating out of the rating element's class attribute
    pub fn parse_rating(&self, class_attr: &str) -> Result<StarRating, ExtractError> {
        parse_star_rating(class_attr, &self.rating_marker)
    }
}

/// Parses a star rating from a class list such as `"star-rating Three"`
///
/// The rating word is the token right after `marker`. A missing marker, a
/// missing word, or a word outside `One`..`Five` is an error.
pub fn parse_star_rating(class_attr: &str, marker: &str) -> Result<StarRating, ExtractError> {
    let invalid = || ExtractError::InvalidRating(class_attr.to_string());

    let mut tokens = class_attr.split_whitespace();
    if !tokens.any(|token| token == marker) {
        return Err(invalid());
    }

    tokens
        .next()
        .ok_or_else(invalid)?
        .parse::<StarRating>()
        .map_err(|_| invalid())
}

/// Parses a CSS selector from the markup, naming the key on failure
pub(crate) fn compile(name: &str, css: &str) -> Result<Selector, ConfigError> {
    Selector::parse(css).map_err(|_| ConfigError::InvalidSelector {
        name: name.to_string(),
        selector: css.to_string(),
    })
}
