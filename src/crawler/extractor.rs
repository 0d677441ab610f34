//! Detail page extraction
//!
//! Pure functions over already-rendered HTML; no renderer access happens
//! here.

use crate::crawler::markup::{compile, SiteMarkup};
use crate::record::BookDetails;
use crate::{ConfigError, ExtractError};
use scraper::{ElementRef, Html, Selector};

/// Reads title, price and rating from a book's detail page
pub struct DetailExtractor {
    markup: SiteMarkup,
    content: Selector,
    title: Selector,
    price: Selector,
    rating: Selector,
}

impl DetailExtractor {
    /// Compiles the detail page selectors
    ///
    /// # Arguments
    ///
    /// * `markup` - Site markup naming the content, title, price and rating elements
    ///
    /// # Returns
    ///
    /// * `Ok(DetailExtractor)` - Ready to extract
    /// * `Err(ConfigError::InvalidSelector)` - One of the selectors does not parse
    pub fn new(markup: &SiteMarkup) -> Result<Self, ConfigError> {
        Ok(Self {
            markup: markup.clone(),
            content: compile("content", &markup.content)?,
            title: compile("title", &markup.title)?,
            price: compile("price", &markup.price)?,
            rating: compile("rating", &markup.rating)?,
        })
    }

    /// Extracts one book's fields from detail page HTML
    ///
    /// The price is kept exactly as displayed. Any missing element fails
    /// the whole extraction; no partial details are returned.
    pub fn extract(&self, html: &str) -> Result<BookDetails, ExtractError> {
        let document = Html::parse_document(html);

        let content = document
            .select(&self.content)
            .next()
            .ok_or(ExtractError::MissingField("content"))?;

        let title = first_text(content, &self.title).ok_or(ExtractError::MissingField("title"))?;
        let price = first_text(content, &self.price).ok_or(ExtractError::MissingField("price"))?;

        let rating_class = content
            .select(&self.rating)
            .next()
            .and_then(|element| element.value().attr("class"))
            .ok_or(ExtractError::MissingField("rating"))?;
        let rating = self.markup.parse_rating(rating_class)?;

        Ok(BookDetails {
            title,
            price,
            rating,
        })
    }
}

/// Text of the first element matching `selector` under `scope`
///
/// Leading and trailing whitespace from the markup's indentation is
/// dropped; inner text is kept as displayed.
fn first_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope
        .select(selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
}
