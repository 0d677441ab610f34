//! Chromium renderer
//!
//! Launches a local Chromium (or attaches to a remote one) through
//! `chromiumoxide` and keeps a single tab for the whole session.

use crate::config::RendererConfig;
use crate::render::PageRenderer;
use crate::RenderError;
use async_trait::async_trait;
use chromiumoxide::error::CdpError;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Environment variable naming a DevTools endpoint to attach to instead of launching
pub const REMOTE_DEBUGGING_URL_ENV: &str = "CHROMIUM_REMOTE_DEBUGGING_URL";

/// Renderer backed by a Chromium tab
pub struct BrowserRenderer {
    browser: Browser,
    page: Page,
    handler: Option<JoinHandle<()>>,
}

impl BrowserRenderer {
    /// Starts the browser session
    ///
    /// The window is sized to the configured viewport, which stands in for
    /// a maximized window in headless mode.
    pub async fn launch(config: &RendererConfig) -> Result<Self, RenderError> {
        let remote_debugging_url = std::env::var(REMOTE_DEBUGGING_URL_ENV).ok();

        let (browser, mut handler) = if let Some(ref url) = remote_debugging_url {
            tracing::info!("Connecting to remote Chrome instance at: {}", url);
            Browser::connect(url)
                .await
                .map_err(|e| RenderError::Launch(format!("remote Chrome at {}: {}", url, e)))?
        } else {
            let mut builder = BrowserConfig::builder()
                .no_sandbox()
                .window_size(config.window_width, config.window_height)
                .request_timeout(Duration::from_secs(config.request_timeout_secs))
                .arg("--disable-gpu")
                .arg("--disable-dev-shm-usage")
                .arg("--start-maximized");

            if !config.headless {
                builder = builder.with_head();
            }

            let browser_config = builder.build().map_err(RenderError::Launch)?;
            Browser::launch(browser_config)
                .await
                .map_err(|e| RenderError::Launch(e.to_string()))?
        };

        // The handler drives the CDP connection and must be polled for the session's lifetime
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| RenderError::Browser(e.to_string()))?;

        page.set_user_agent(config.user_agent.as_str())
            .await
            .map_err(|e| RenderError::Browser(e.to_string()))?;

        tracing::debug!(
            "Browser session ready ({}x{}, headless: {})",
            config.window_width,
            config.window_height,
            config.headless
        );

        Ok(Self {
            browser,
            page,
            handler: Some(handler),
        })
    }
}

#[async_trait]
impl PageRenderer for BrowserRenderer {
    fn name(&self) -> &'static str {
        "browser"
    }

    async fn navigate(&mut self, url: &str) -> Result<(), RenderError> {
        self.page
            .goto(url)
            .await
            .map_err(|e| RenderError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    async fn content(&mut self) -> Result<String, RenderError> {
        self.page
            .content()
            .await
            .map_err(|e| RenderError::Browser(e.to_string()))
    }

    async fn current_url(&mut self) -> Result<Option<String>, RenderError> {
        self.page
            .url()
            .await
            .map_err(|e| RenderError::Browser(e.to_string()))
    }

    async fn has_element(&mut self, css: &str) -> Result<bool, RenderError> {
        match self.page.find_element(css).await {
            Ok(_) => Ok(true),
            Err(e) => absent_or_failed(e),
        }
    }

    async fn close(&mut self) -> Result<(), RenderError> {
        self.browser
            .close()
            .await
            .map_err(|e| RenderError::Browser(e.to_string()))?;

        if let Err(e) = self.browser.wait().await {
            tracing::debug!("Browser process did not exit cleanly: {}", e);
        }

        if let Some(handler) = self.handler.take() {
            let _ = handler.await;
        }

        Ok(())
    }
}

/// Sorts a failed element lookup into "not there yet" or a session failure
///
/// Chrome answers a query with no match with a protocol error. Transport
/// errors mean the browser or its handler is gone and must propagate.
fn absent_or_failed(err: CdpError) -> Result<bool, RenderError> {
    match err {
        CdpError::Chrome(_) | CdpError::NotFound => Ok(false),
        other => Err(RenderError::Browser(other.to_string())),
    }
}
