use crate::UrlError;
use url::Url;

/// File name pattern of listing pages after the first, `{page}` is the page number
pub const DEFAULT_PAGE_TEMPLATE: &str = "page-{page}.html";

/// Derives the URL of listing page `page` of a category
///
/// Page 1 is the entry point itself. Later pages live in the same
/// directory as the entry point, with its file name replaced by
/// `page-<n>.html`. Entry points that do not follow this layout get URLs
/// that simply do not exist, which ends pagination at page 2.
///
/// # Examples
///
/// ```
/// use shelf_scrape::url::page_url;
/// use url::Url;
///
/// let entry = Url::parse("https://books.toscrape.com/catalogue/category/books/travel_2/index.html").unwrap();
/// assert_eq!(page_url(&entry, 1).unwrap(), entry);
/// assert_eq!(
///     page_url(&entry, 3).unwrap().as_str(),
///     "https://books.toscrape.com/catalogue/category/books/travel_2/page-3.html"
/// );
/// ```
pub fn page_url(entry: &Url, page: u32) -> Result<Url, UrlError> {
    page_url_with_template(entry, page, DEFAULT_PAGE_TEMPLATE)
}

/// Same as [`page_url`] with a custom file name template
pub fn page_url_with_template(entry: &Url, page: u32, template: &str) -> Result<Url, UrlError> {
    let derivation_error = || UrlError::PageDerivation {
        url: entry.to_string(),
        page,
    };

    match page {
        0 => Err(derivation_error()),
        1 => Ok(entry.clone()),
        n => {
            if entry.cannot_be_a_base() {
                return Err(UrlError::CannotBeABase(entry.to_string()));
            }

            let file_name = template.replace("{page}", &n.to_string());
            if file_name.is_empty() || file_name.contains('/') {
                return Err(derivation_error());
            }

            // Relative join replaces the last path segment and drops query/fragment
            entry.join(&file_name).map_err(|_| derivation_error())
        }
    }
}
