//! Configuration loading and validation
//!
//! Crawl tuning lives in an optional TOML file; every field has a default
//! and CLI flags override file values. Search API credentials may come from
//! the file or from the `WEBSWEEP_API_KEY` / `WEBSWEEP_ENGINE_ID`
//! environment variables.

mod types;
mod validation;

pub use types::{
    Config, CrawlerConfig, SearchConfig, UserAgentConfig, DEFAULT_SEARCH_ENDPOINT,
};
pub use validation::{validate, validate_credentials};

use crate::ConfigError;
use std::path::Path;

/// Environment variable supplying the search API key
pub const API_KEY_ENV: &str = "WEBSWEEP_API_KEY";

/// Environment variable supplying the search engine id
pub const ENGINE_ID_ENV: &str = "WEBSWEEP_ENGINE_ID";

/// Loads and validates a configuration file
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to read, parse, or validate
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;

    let config: Config = toml::from_str(&content)?;

    validate(&config)?;

    Ok(config)
}

impl Config {
    /// Fills in search credentials from the environment
    ///
    /// Environment variables win over file values when both are set, so a
    /// checked-in config file never needs to carry secrets.
    pub fn apply_env_credentials(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.is_empty() {
                self.search.api_key = key;
            }
        }
        if let Ok(id) = std::env::var(ENGINE_ID_ENV) {
            if !id.is_empty() {
                self.search.engine_id = id;
            }
        }
    }
}
