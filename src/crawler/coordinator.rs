//! Crawler coordinator - main crawl orchestration logic
//!
//! Drives the paginator and the extractor across the configured category
//! entry points with a single renderer session. Everything runs
//! sequentially: one page is loaded at a time.

use crate::config::{Config, CrawlConfig};
use crate::crawler::extractor::DetailExtractor;
use crate::crawler::markup::SiteMarkup;
use crate::crawler::paginator::CategoryPaginator;
use crate::record::{BookDetails, BookRecord, CategoryTally, CrawlReport};
use crate::render::PageRenderer;
use crate::url::{category_label, parse_entry_point};
use crate::{RenderError, ScrapeError};
use chrono::Utc;
use url::Url;

/// The page-processing stages of a crawl, compiled from the markup
///
/// Building these is the only fallible part of setting up a coordinator,
/// so it can happen before any renderer session exists.
pub struct CrawlStages {
    paginator: CategoryPaginator,
    extractor: DetailExtractor,
}

impl CrawlStages {
    /// Compiles the paginator and extractor selectors
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration whose `[markup]` and `[crawl]` sections drive both stages
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlStages)` - Both stages compiled
    /// * `Err(ScrapeError::Config)` - A markup selector does not parse
    pub fn build(config: &Config) -> Result<Self, ScrapeError> {
        Ok(Self {
            paginator: CategoryPaginator::new(&config.markup, &config.crawl)?,
            extractor: DetailExtractor::new(&config.markup)?,
        })
    }
}

/// Main crawler coordinator structure
///
/// Owns the renderer for the whole run. Call [`Coordinator::shutdown`] once
/// done, whether the run succeeded or not.
pub struct Coordinator<R: PageRenderer> {
    renderer: R,
    crawl: CrawlConfig,
    markup: SiteMarkup,
    paginator: CategoryPaginator,
    extractor: DetailExtractor,
}

impl<R: PageRenderer> Coordinator<R> {
    /// Creates a new coordinator around an acquired renderer session
    ///
    /// On error the renderer is dropped without being closed; use
    /// [`CrawlStages::build`] first when the session must be released.
    pub fn new(renderer: R, config: &Config) -> Result<Self, ScrapeError> {
        Ok(Self::with_stages(renderer, config, CrawlStages::build(config)?))
    }

    /// Creates a coordinator from already compiled stages
    pub fn with_stages(renderer: R, config: &Config, stages: CrawlStages) -> Self {
        Self {
            renderer,
            crawl: config.crawl.clone(),
            markup: config.markup.clone(),
            paginator: stages.paginator,
            extractor: stages.extractor,
        }
    }

    /// The renderer this coordinator drives
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Crawls every configured category, in configured order
    pub async fn run_configured(&mut self) -> Result<CrawlReport, ScrapeError> {
        let entries = self
            .crawl
            .categories
            .iter()
            .map(|entry| parse_entry_point(entry))
            .collect::<Result<Vec<_>, _>>()?;

        self.run(&entries).await
    }

    /// Crawls the given categories and returns every record in crawl order
    ///
    /// Only the end-of-category signals of pagination are absorbed. Any
    /// other failure aborts the run and no records are returned.
    ///
    /// # Arguments
    ///
    /// * `entries` - Category entry points, crawled in this order
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlReport)` - Records in crawl order plus per-category tallies
    /// * `Err(ScrapeError)` - The first renderer, URL or extraction failure
    pub async fn run(&mut self, entries: &[Url]) -> Result<CrawlReport, ScrapeError> {
        let started_at = Utc::now();
        let mut records = Vec::new();
        let mut tallies = Vec::with_capacity(entries.len());

        tracing::info!(
            "Starting crawl of {} categories with the {} renderer",
            entries.len(),
            self.renderer.name()
        );

        for entry in entries {
            let tally = self.crawl_category(entry, &mut records).await?;
            tallies.push(tally);
        }

        let report = CrawlReport {
            records,
            tallies,
            started_at,
            finished_at: Utc::now(),
        };

        tracing::info!(
            "Crawl finished: {} books in {}s",
            report.records.len(),
            report.duration_seconds()
        );

        Ok(report)
    }

    /// Crawls one category, appending its records
    async fn crawl_category(
        &mut self,
        entry: &Url,
        records: &mut Vec<BookRecord>,
    ) -> Result<CategoryTally, ScrapeError> {
        let category = category_label(entry)?;
        tracing::info!("Category: {}", category);

        let detail_links = self
            .paginator
            .discover_detail_links(&mut self.renderer, entry)
            .await?;

        let mut category_books = Vec::with_capacity(detail_links.len());

        for url in &detail_links {
            let record = self.visit_detail(url).await?.into_record(&category);
            tracing::info!("- {}", record.title);
            category_books.push(record.title.clone());
            records.push(record);
        }

        tracing::info!("Total {} Books: {}", category, category_books.len());

        Ok(CategoryTally {
            category,
            books: category_books.len(),
        })
    }

    /// Loads a detail page, waits for its content, and extracts it
    async fn visit_detail(&mut self, url: &str) -> Result<BookDetails, ScrapeError> {
        self.renderer.navigate(url).await?;

        let ready = self
            .renderer
            .wait_for_selector(
                &self.markup.content,
                self.crawl.detail_load_timeout(),
                self.crawl.poll_interval(),
            )
            .await?;
        if !ready {
            return Err(ScrapeError::DetailLoadTimeout {
                url: url.to_string(),
                timeout_secs: self.crawl.detail_load_timeout_secs,
            });
        }

        let settle_delay = self.crawl.settle_delay();
        if !settle_delay.is_zero() {
            tokio::time::sleep(settle_delay).await;
        }

        let html = self.renderer.content().await?;
        self.extractor
            .extract(&html)
            .map_err(|source| ScrapeError::Extract {
                url: url.to_string(),
                source,
            })
    }

    /// Releases the renderer session
    pub async fn shutdown(mut self) -> Result<(), RenderError> {
        tracing::debug!("Closing {} renderer", self.renderer.name());
        self.renderer.close().await
    }
}
