//! Crawler module for category pagination and book extraction
//!
//! This module contains the core crawling logic, including:
//! - Walking a category's listing pages until they run out
//! - Reading each book's detail page into a record
//! - Coordinating both across the configured categories
//! - The site markup adapter holding every selector

mod coordinator;
mod extractor;
mod markup;
mod paginator;

pub use coordinator::{Coordinator, CrawlStages};
pub use extractor::DetailExtractor;
pub use markup::{parse_star_rating, SiteMarkup};
pub use paginator::{CategoryPaginator, PageOutcome};

use crate::config::{Config, RendererKind};
use crate::record::CrawlReport;
use crate::render::{BrowserRenderer, HttpRenderer, PageRenderer};
use crate::ScrapeError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Compile the markup selectors, before any renderer is started
/// 2. Acquire the configured renderer session
/// 3. Crawl every configured category in order
/// 4. Release the renderer, whether the crawl succeeded or not
///
/// Writing the results is left to the caller.
///
/// # Arguments
///
/// * `config` - The crawl configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Every record in crawl order
/// * `Err(ScrapeError)` - Setup or crawl failure; no partial records are kept
pub async fn crawl(config: &Config) -> Result<CrawlReport, ScrapeError> {
    let stages = CrawlStages::build(config)?;

    match config.renderer.kind {
        RendererKind::Browser => {
            let renderer = BrowserRenderer::launch(&config.renderer).await?;
            drive(renderer, config, stages).await
        }
        RendererKind::Http => {
            let renderer = HttpRenderer::new(&config.renderer)?;
            drive(renderer, config, stages).await
        }
    }
}

/// Crawls the configured categories with an already acquired renderer
///
/// The renderer is closed exactly once before returning, including when
/// the markup in `config` fails to compile.
pub async fn run_with<R: PageRenderer>(
    mut renderer: R,
    config: &Config,
) -> Result<CrawlReport, ScrapeError> {
    match CrawlStages::build(config) {
        Ok(stages) => drive(renderer, config, stages).await,
        Err(e) => {
            release(&mut renderer).await;
            Err(e)
        }
    }
}

async fn drive<R: PageRenderer>(
    renderer: R,
    config: &Config,
    stages: CrawlStages,
) -> Result<CrawlReport, ScrapeError> {
    let mut coordinator = Coordinator::with_stages(renderer, config, stages);
    let result = coordinator.run_configured().await;

    if let Err(e) = coordinator.shutdown().await {
        tracing::warn!("Failed to close renderer: {}", e);
    }

    result
}

async fn release<R: PageRenderer>(renderer: &mut R) {
    tracing::debug!("Closing {} renderer", renderer.name());
    if let Err(e) = renderer.close().await {
        tracing::warn!("Failed to close renderer: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::fixture::{detail_page, listing_page, FixtureRenderer};
    use crate::{ExtractError, RenderError};
    use std::sync::atomic::Ordering;

    const TRAVEL: &str = "https://books.example/catalogue/category/books/travel_2";

    fn test_config() -> Config {
        let mut config = Config::default();
        config.crawl.categories = vec![format!("{}/index.html", TRAVEL)];
        config.crawl.page_load_timeout_secs = 1;
        config.crawl.detail_load_timeout_secs = 1;
        config.crawl.poll_interval_ms = 10;
        config
    }

    fn travel_renderer(detail: String) -> FixtureRenderer {
        FixtureRenderer::new(vec![
            (format!("{}/index.html", TRAVEL), listing_page(&["t1.html"])),
            (format!("{}/t1.html", TRAVEL), detail),
        ])
    }

    #[tokio::test(start_paused = true)]
    async fn test_renderer_closed_after_success() {
        let renderer = travel_renderer(detail_page("Trip", "£9.99", "Four"));
        let closed = renderer.closed_flag();

        let report = run_with(renderer, &test_config()).await.unwrap();

        assert_eq!(report.records.len(), 1);
        assert!(closed.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_renderer_closed_after_navigation_failure() {
        let mut renderer = travel_renderer(detail_page("Trip", "£9.99", "Four"));
        renderer.fail_on = Some(format!("{}/t1.html", TRAVEL));
        let closed = renderer.closed_flag();

        let err = run_with(renderer, &test_config()).await.unwrap_err();

        assert!(matches!(err, ScrapeError::Render(RenderError::Navigation { .. })));
        assert!(closed.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_renderer_closed_after_extraction_failure() {
        let renderer = travel_renderer(
            r#"<div class="content"><p class="price_color">£1</p></div>"#.to_string(),
        );
        let closed = renderer.closed_flag();

        let err = run_with(renderer, &test_config()).await.unwrap_err();

        assert!(matches!(
            err,
            ScrapeError::Extract {
                source: ExtractError::MissingField("title"),
                ..
            }
        ));
        assert!(closed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_renderer_closed_when_markup_does_not_compile() {
        let renderer = travel_renderer(detail_page("Trip", "£9.99", "Four"));
        let closed = renderer.closed_flag();
        let mut config = test_config();
        config.markup.title = "h1[[".to_string();

        let err = run_with(renderer, &config).await.unwrap_err();

        assert!(matches!(err, ScrapeError::Config(_)));
        assert!(closed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_bad_markup_rejected_before_launch() {
        let mut config = test_config();
        config.markup.item_link = "a[[".to_string();

        // Browser kind: a launch attempt would fail differently without Chromium
        let err = crawl(&config).await.unwrap_err();

        assert!(matches!(err, ScrapeError::Config(_)));
    }
}
