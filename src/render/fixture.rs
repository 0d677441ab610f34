//! In-memory renderer for tests

use crate::render::PageRenderer;
use crate::RenderError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Serves fixed pages by URL; unknown URLs render an empty document
#[derive(Default)]
pub struct FixtureRenderer {
    pub pages: HashMap<String, String>,
    pub visited: Vec<String>,
    pub fail_on: Option<String>,
    pub closed: Arc<AtomicBool>,
    current: Option<String>,
}

impl FixtureRenderer {
    pub fn new<I, U, H>(pages: I) -> Self
    where
        I: IntoIterator<Item = (U, H)>,
        U: Into<String>,
        H: Into<String>,
    {
        Self {
            pages: pages
                .into_iter()
                .map(|(url, html)| (url.into(), html.into()))
                .collect(),
            ..Self::default()
        }
    }

    /// Handle that still reports closure after the renderer has been moved
    pub fn closed_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.closed)
    }
}

#[async_trait]
impl PageRenderer for FixtureRenderer {
    fn name(&self) -> &'static str {
        "fixture"
    }

    async fn navigate(&mut self, url: &str) -> Result<(), RenderError> {
        self.visited.push(url.to_string());
        if self.fail_on.as_deref() == Some(url) {
            return Err(RenderError::Navigation {
                url: url.to_string(),
                message: "renderer crashed".to_string(),
            });
        }
        self.current = Some(url.to_string());
        Ok(())
    }

    async fn content(&mut self) -> Result<String, RenderError> {
        let url = self.current.as_ref().ok_or(RenderError::NoPage)?;
        Ok(self
            .pages
            .get(url)
            .cloned()
            .unwrap_or_else(|| "<html><body></body></html>".to_string()))
    }

    async fn current_url(&mut self) -> Result<Option<String>, RenderError> {
        Ok(self.current.clone())
    }

    async fn close(&mut self) -> Result<(), RenderError> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// Listing page with one item anchor per href
pub fn listing_page(hrefs: &[&str]) -> String {
    let items: String = hrefs
        .iter()
        .map(|href| {
            format!(
                r#"<li><article class="product_pod"><h3><a href="{}">x</a></h3></article></li>"#,
                href
            )
        })
        .collect();
    format!(
        r#"<html><body><div class="page_inner"><ol class="row">{}</ol></div></body></html>"#,
        items
    )
}

/// Detail page in the catalog's layout
pub fn detail_page(title: &str, price: &str, rating: &str) -> String {
    format!(
        r#"<html><body><div class="page_inner"><div class="content">
        <h1>{}</h1><p class="price_color">{}</p><p class="star-rating {}"></p>
        </div></div></body></html>"#,
        title, price, rating
    )
}
