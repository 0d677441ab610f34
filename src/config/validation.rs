use crate::config::types::{Config, CrawlConfig, OutputConfig, RendererConfig};
use crate::crawler::SiteMarkup;
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawl_config(&config.crawl)?;
    validate_renderer_config(&config.renderer)?;
    validate_output_config(&config.output)?;
    validate_markup(&config.markup)?;
    Ok(())
}

/// Validates crawl configuration
fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    if config.categories.is_empty() {
        return Err(ConfigError::Validation(
            "at least one category entry point is required".to_string(),
        ));
    }

    for category in &config.categories {
        validate_entry_point(category)?;
    }

    if config.page_load_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "page_load_timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.detail_load_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "detail_load_timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.poll_interval_ms == 0 {
        return Err(ConfigError::Validation(
            "poll_interval_ms must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates a category entry point URL
fn validate_entry_point(entry: &str) -> Result<(), ConfigError> {
    let url = Url::parse(entry)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid category URL '{}': {}", entry, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "Category URL '{}' must use http or https",
            entry
        )));
    }

    Ok(())
}

/// Validates renderer configuration
fn validate_renderer_config(config: &RendererConfig) -> Result<(), ConfigError> {
    if config.window_width == 0 || config.window_height == 0 {
        return Err(ConfigError::Validation(format!(
            "window size must be non-zero, got {}x{}",
            config.window_width, config.window_height
        )));
    }

    if config.request_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "request_timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "output path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Checks that every markup selector parses
fn validate_markup(markup: &SiteMarkup) -> Result<(), ConfigError> {
    for (name, selector) in markup.selectors() {
        if Selector::parse(selector).is_err() {
            return Err(ConfigError::InvalidSelector {
                name: name.to_string(),
                selector: selector.to_string(),
            });
        }
    }

    if markup.rating_marker.trim().is_empty() {
        return Err(ConfigError::Validation(
            "rating_marker cannot be empty".to_string(),
        ));
    }

    if !markup.page_template.contains("{page}") || markup.page_template.contains('/') {
        return Err(ConfigError::Validation(format!(
            "page_template must be a file name containing '{{page}}', got '{}'",
            markup.page_template
        )));
    }

    Ok(())
}
