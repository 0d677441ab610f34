use crate::UrlError;
use url::Url;

/// Derives a human-readable category label from an entry point URL
///
/// The label is the directory holding the entry point's file, cut at the
/// first underscore and capitalized: `.../books/travel_2/index.html`
/// becomes `Travel`.
///
/// # Examples
///
/// ```
/// use shelf_scrape::url::category_label;
/// use url::Url;
///
/// let entry = Url::parse("https://books.toscrape.com/catalogue/category/books/nonfiction_13/index.html").unwrap();
/// assert_eq!(category_label(&entry).unwrap(), "Nonfiction");
/// ```
pub fn category_label(entry: &Url) -> Result<String, UrlError> {
    let missing = || UrlError::MissingCategorySegment(entry.to_string());

    let segments: Vec<&str> = entry.path_segments().ok_or_else(missing)?.collect();
    if segments.len() < 2 {
        return Err(missing());
    }

    let directory = segments[segments.len() - 2];
    let stem = directory.split('_').next().unwrap_or_default();
    if stem.is_empty() {
        return Err(missing());
    }

    Ok(capitalize(stem))
}

/// Uppercases the first character and lowercases the rest
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
