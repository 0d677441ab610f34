//! Category pagination
//!
//! Walks the listing pages of one category, in order, until a page fails to
//! render its loaded marker or renders with no items. Either case ends the
//! category; neither is an error.

use crate::config::CrawlConfig;
use crate::crawler::markup::{compile, SiteMarkup};
use crate::render::PageRenderer;
use crate::url::resolve_link;
use crate::{ConfigError, ScrapeError};
use scraper::{Html, Selector};
use std::time::Duration;
use url::Url;

/// What a single listing page yielded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// The page rendered and listed these detail links
    Links(Vec<String>),
    /// The loaded marker never appeared; treated as the end of the category
    LoadTimeout,
    /// The page rendered without any item anchors; the end of the category
    Empty,
}

/// Produces the ordered detail links of a category
pub struct CategoryPaginator {
    markup: SiteMarkup,
    item_link: Selector,
    load_timeout: Duration,
    poll_interval: Duration,
}

impl CategoryPaginator {
    pub fn new(markup: &SiteMarkup, crawl: &CrawlConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            markup: markup.clone(),
            item_link: compile("item-link", &markup.item_link)?,
            load_timeout: crawl.page_load_timeout(),
            poll_interval: crawl.poll_interval(),
        })
    }

    /// Collects the detail links of every listing page of a category
    ///
    /// Links are returned in page order, then in on-page order. Duplicates
    /// are kept. There is no page limit: pagination only stops on a load
    /// timeout or an empty page.
    ///
    /// # Arguments
    ///
    /// * `renderer` - Session used to load each listing page
    /// * `entry` - The category's first listing page
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<String>)` - Absolute detail page URLs
    /// * `Err(ScrapeError)` - A renderer failure or an underivable page URL
    pub async fn discover_detail_links<R>(
        &self,
        renderer: &mut R,
        entry: &Url,
    ) -> Result<Vec<String>, ScrapeError>
    where
        R: PageRenderer + ?Sized,
    {
        let mut detail_links = Vec::new();
        let mut page_num: u32 = 1;

        loop {
            let page_url = self.markup.page_url(entry, page_num)?;

            match self.visit_listing_page(renderer, &page_url).await? {
                PageOutcome::Links(links) => {
                    tracing::debug!("Page {} of {}: {} items", page_num, entry, links.len());
                    detail_links.extend(links);
                    page_num += 1;
                }
                PageOutcome::LoadTimeout => {
                    tracing::warn!(
                        "Listing page {} did not load within {:?}, page load complete",
                        page_url,
                        self.load_timeout
                    );
                    break;
                }
                PageOutcome::Empty => {
                    tracing::debug!("Listing page {} has no items", page_url);
                    break;
                }
            }
        }

        tracing::info!(
            "Discovered {} detail links across {} listing pages",
            detail_links.len(),
            page_num - 1
        );

        Ok(detail_links)
    }

    /// Loads one listing page and classifies what it holds
    pub async fn visit_listing_page<R>(
        &self,
        renderer: &mut R,
        page_url: &Url,
    ) -> Result<PageOutcome, ScrapeError>
    where
        R: PageRenderer + ?Sized,
    {
        renderer.navigate(page_url.as_str()).await?;

        let loaded = renderer
            .wait_for_selector(
                &self.markup.loaded_marker,
                self.load_timeout,
                self.poll_interval,
            )
            .await?;
        if !loaded {
            return Ok(PageOutcome::LoadTimeout);
        }

        let page = renderer.snapshot().await?;
        let base = Url::parse(&page.url).unwrap_or_else(|_| page_url.clone());
        let links = self.listing_links(&page.html, &base);

        if links.is_empty() {
            Ok(PageOutcome::Empty)
        } else {
            Ok(PageOutcome::Links(links))
        }
    }

    /// Extracts absolute detail links from listing page HTML
    pub fn listing_links(&self, html: &str, base: &Url) -> Vec<String> {
        let document = Html::parse_document(html);

        document
            .select(&self.item_link)
            .filter_map(|anchor| match anchor.value().attr("href") {
                Some(href) => resolve_link(href, base),
                None => {
                    tracing::debug!("Item anchor without href on {}", base);
                    None
                }
            })
            .collect()
    }
}
