//! Static HTML renderer
//!
//! Loads pages with a plain HTTP GET. Nothing is executed, so the DOM is
//! exactly the served markup. Good enough for server-rendered catalogs and
//! for tests against a mock server.

use crate::config::RendererConfig;
use crate::render::{PageRenderer, RenderedPage};
use crate::RenderError;
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;

/// Renderer backed by a `reqwest` client
pub struct HttpRenderer {
    client: Client,
    current: Option<RenderedPage>,
    pages_loaded: usize,
}

impl HttpRenderer {
    /// Builds the HTTP client from renderer settings
    pub fn new(config: &RendererConfig) -> Result<Self, RenderError> {
        let client = build_http_client(config).map_err(|e| RenderError::Launch(e.to_string()))?;
        Ok(Self {
            client,
            current: None,
            pages_loaded: 0,
        })
    }

    /// Number of successful navigations so far
    pub fn pages_loaded(&self) -> usize {
        self.pages_loaded
    }
}

/// Builds an HTTP client with proper configuration
pub fn build_http_client(config: &RendererConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

#[async_trait]
impl PageRenderer for HttpRenderer {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn navigate(&mut self, url: &str) -> Result<(), RenderError> {
        let http_error = |source| RenderError::Http {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(http_error)?;
        let status = response.status();
        let final_url = response.url().to_string();

        if !status.is_success() {
            tracing::debug!("{} answered {}", url, status);
        }

        let html = response.text().await.map_err(http_error)?;

        self.current = Some(RenderedPage {
            url: final_url,
            html,
        });
        self.pages_loaded += 1;
        Ok(())
    }

    async fn content(&mut self) -> Result<String, RenderError> {
        self.current
            .as_ref()
            .map(|page| page.html.clone())
            .ok_or(RenderError::NoPage)
    }

    async fn current_url(&mut self) -> Result<Option<String>, RenderError> {
        Ok(self.current.as_ref().map(|page| page.url.clone()))
    }

    async fn snapshot(&mut self) -> Result<RenderedPage, RenderError> {
        self.current.clone().ok_or(RenderError::NoPage)
    }

    async fn close(&mut self) -> Result<(), RenderError> {
        self.current = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&RendererConfig::default());
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_content_before_navigation() {
        let mut renderer = HttpRenderer::new(&RendererConfig::default()).unwrap();
        assert!(matches!(
            renderer.content().await,
            Err(RenderError::NoPage)
        ));
        assert_eq!(renderer.current_url().await.unwrap(), None);
        assert_eq!(renderer.pages_loaded(), 0);
    }
}
