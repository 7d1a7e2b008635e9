//! Websweep: a bounded, polite breadth-first web crawler
//!
//! Given a search keyword, websweep resolves a handful of seed pages through
//! a search API and then explores outbound links breadth-first, in strictly
//! synchronous concurrent batches, until a page budget is exhausted. Robots
//! exclusions are honored per origin and binary/media resources are filtered
//! out before they ever reach the work queue.

pub mod config;
pub mod crawler;
pub mod output;
pub mod robots;
pub mod search;
pub mod url;

use thiserror::Error;

/// Main error type for websweep operations
///
/// Per-URL fetch failures are deliberately absent here: they are values
/// ([`crawler::FetchResult`] variants), not errors, so the batch loop never
/// handles per-URL exceptions. Only failures that end the whole run live in
/// this enum.
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Seed resolution failed: {0}")]
    SeedResolution(String),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for websweep operations
pub type Result<T> = std::result::Result<T, SweepError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlReport, Crawler, FetchResult, Frontier};
pub use output::{CollectSink, StdoutSink, UrlSink};
pub use robots::{RobotsCache, RobotsPolicy};
pub use self::url::{has_ignored_extension, origin_of, resolve_link};
