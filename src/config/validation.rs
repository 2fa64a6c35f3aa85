use crate::config::types::{Config, HttpConfig, OutputConfig, SiteConfig};
use crate::crawler::Selectors;
use crate::ConfigError;
use url::Url;

/// Placeholder replaced by the page index in `page-path`
pub const PAGE_PLACEHOLDER: &str = "{page}";

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    Selectors::compile(&config.selectors)?;
    validate_http_config(&config.http)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the base URL and page path template
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let base = Url::parse(&config.base_url).map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid base-url '{}': {}", config.base_url, e))
    })?;

    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "base-url '{}' must use http or https",
            config.base_url
        )));
    }

    // Url::join replaces the last segment unless the path ends with a slash
    if !base.path().ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "base-url '{}' must end with '/'",
            config.base_url
        )));
    }

    validate_page_path(&config.page_path)
}

/// Validates a page path template
fn validate_page_path(page_path: &str) -> Result<(), ConfigError> {
    if page_path.is_empty() {
        return Err(ConfigError::Validation(
            "page-path cannot be empty".to_string(),
        ));
    }

    if page_path.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "page-path '{}' must be relative to base-url",
            page_path
        )));
    }

    if !page_path.contains(PAGE_PLACEHOLDER) {
        return Err(ConfigError::Validation(format!(
            "page-path '{}' must contain {}",
            page_path, PAGE_PLACEHOLDER
        )));
    }

    Ok(())
}

/// Validates HTTP client settings
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_ms == Some(0) {
        return Err(ConfigError::Validation(
            "timeout-ms must be > 0 when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.csv_path.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "csv-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
