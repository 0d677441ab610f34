//! Page renderers
//!
//! A [`PageRenderer`] is one browser-like session: it loads a URL, exposes
//! the resulting DOM as HTML, and can wait for an element to show up. The
//! crawler owns exactly one renderer for a whole run and drives it
//! sequentially.
//!
//! - [`BrowserRenderer`] drives Chromium over the DevTools protocol
//! - [`HttpRenderer`] fetches static HTML with `reqwest`

mod browser;
#[cfg(test)]
pub(crate) mod fixture;
mod http;

pub use browser::BrowserRenderer;
pub use http::HttpRenderer;

use crate::RenderError;
use async_trait::async_trait;
use scraper::{Html, Selector};
use std::time::Duration;
use tokio::time::Instant;

/// A loaded page: its final URL and the DOM serialized as HTML
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub url: String,
    pub html: String,
}

/// One rendering session
#[async_trait]
pub trait PageRenderer: Send {
    /// Short name used in log lines
    fn name(&self) -> &'static str;

    /// Loads `url`, replacing the current page
    ///
    /// Failing HTTP statuses are not errors: the error page becomes the
    /// current page, as in a browser. Only failures to load anything at
    /// all are reported.
    async fn navigate(&mut self, url: &str) -> Result<(), RenderError>;

    /// Current DOM serialized as HTML
    async fn content(&mut self) -> Result<String, RenderError>;

    /// URL of the current page after redirects
    async fn current_url(&mut self) -> Result<Option<String>, RenderError>;

    /// Whether the current DOM contains an element matching `css`
    async fn has_element(&mut self, css: &str) -> Result<bool, RenderError> {
        let html = self.content().await?;
        html_contains(&html, css)
    }

    /// Polls for an element matching `css` until it appears or `timeout` elapses
    ///
    /// Returns `Ok(false)` on timeout; the caller decides what a missing
    /// element means.
    async fn wait_for_selector(
        &mut self,
        css: &str,
        timeout: Duration,
        poll_interval: Duration,
    ) -> Result<bool, RenderError> {
        let deadline = Instant::now() + timeout;

        loop {
            if self.has_element(css).await? {
                return Ok(true);
            }

            let now = Instant::now();
            if now >= deadline {
                return Ok(false);
            }

            tokio::time::sleep(poll_interval.min(deadline - now)).await;
        }
    }

    /// Snapshot of the current page
    async fn snapshot(&mut self) -> Result<RenderedPage, RenderError> {
        let html = self.content().await?;
        let url = self.current_url().await?.ok_or(RenderError::NoPage)?;
        Ok(RenderedPage { url, html })
    }

    /// Releases the session
    async fn close(&mut self) -> Result<(), RenderError> {
        Ok(())
    }
}

/// Checks whether an HTML document contains an element matching `css`
pub fn html_contains(html: &str, css: &str) -> Result<bool, RenderError> {
    let selector =
        Selector::parse(css).map_err(|_| RenderError::InvalidSelector(css.to_string()))?;
    let document = Html::parse_document(html);
    let found = document.select(&selector).next().is_some();
    Ok(found)
}
