use crate::config::types::{Config, CrawlerConfig, SearchConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_search_config(&config.search)?;
    validate_user_agent_config(&config.user_agent)?;
    Ok(())
}

/// Validates that search API credentials are present
///
/// Kept separate from [`validate`]: library users driving the crawler with
/// their own seed list never need credentials, but the CLI does before it
/// can resolve a query.
pub fn validate_credentials(config: &SearchConfig) -> Result<(), ConfigError> {
    if config.api_key.is_empty() {
        return Err(ConfigError::Validation(
            "search api-key is not set (config file or WEBSWEEP_API_KEY)".to_string(),
        ));
    }

    if config.engine_id.is_empty() {
        return Err(ConfigError::Validation(
            "search engine-id is not set (config file or WEBSWEEP_ENGINE_ID)".to_string(),
        ));
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.budget < 1 {
        return Err(ConfigError::Validation(format!(
            "budget must be >= 1, got {}",
            config.budget
        )));
    }

    if config.batch_size < 1 || config.batch_size > 100 {
        return Err(ConfigError::Validation(format!(
            "batch-size must be between 1 and 100, got {}",
            config.batch_size
        )));
    }

    if config.fetch_timeout_ms < 100 {
        return Err(ConfigError::Validation(format!(
            "fetch-timeout-ms must be >= 100ms, got {}ms",
            config.fetch_timeout_ms
        )));
    }

    if config.robots_timeout_ms < 100 {
        return Err(ConfigError::Validation(format!(
            "robots-timeout-ms must be >= 100ms, got {}ms",
            config.robots_timeout_ms
        )));
    }

    Ok(())
}

/// Validates search configuration (credentials excluded, see above)
fn validate_search_config(config: &SearchConfig) -> Result<(), ConfigError> {
    if config.result_count < 1 || config.result_count > 10 {
        return Err(ConfigError::Validation(format!(
            "result-count must be between 1 and 10, got {}",
            config.result_count
        )));
    }

    Url::parse(&config.endpoint).map_err(|e| {
        ConfigError::Validation(format!("invalid search endpoint '{}': {}", config.endpoint, e))
    })?;

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler-name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler-name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if !config.contact_url.is_empty() {
        Url::parse(&config.contact_url).map_err(|e| {
            ConfigError::Validation(format!("invalid contact-url '{}': {}", config.contact_url, e))
        })?;
    }

    Ok(())
}
