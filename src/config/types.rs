use serde::Deserialize;
use std::time::Duration;

/// Default search API endpoint (Google Custom Search)
pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

/// Main configuration structure for websweep
///
/// Every field has a default, so the TOML config file is optional and may
/// be partial; CLI flags override whatever the file provides.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub search: SearchConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum total number of URLs dispatched before the crawl halts
    pub budget: u32,

    /// Number of URLs fetched concurrently per round
    #[serde(rename = "batch-size")]
    pub batch_size: u32,

    /// Per-request timeout for page fetches (milliseconds)
    #[serde(rename = "fetch-timeout-ms")]
    pub fetch_timeout_ms: u64,

    /// Per-request timeout for robots.txt fetches (milliseconds)
    #[serde(rename = "robots-timeout-ms")]
    pub robots_timeout_ms: u64,

    /// Optional wall-clock limit for the whole run (milliseconds)
    #[serde(rename = "max-runtime-ms")]
    pub max_runtime_ms: Option<u64>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            budget: 100,
            batch_size: 8,
            fetch_timeout_ms: 5_000,
            robots_timeout_ms: 3_000,
            max_runtime_ms: None,
        }
    }
}

impl CrawlerConfig {
    /// Per-request page fetch timeout as a [`Duration`]
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    /// Per-request robots fetch timeout as a [`Duration`]
    pub fn robots_timeout(&self) -> Duration {
        Duration::from_millis(self.robots_timeout_ms)
    }

    /// Optional whole-run wall-clock limit as a [`Duration`]
    pub fn max_runtime(&self) -> Option<Duration> {
        self.max_runtime_ms.map(Duration::from_millis)
    }
}

/// Seed-resolution search API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// API key; may also come from the `WEBSWEEP_API_KEY` environment variable
    #[serde(rename = "api-key")]
    pub api_key: String,

    /// Search engine id; may also come from `WEBSWEEP_ENGINE_ID`
    #[serde(rename = "engine-id")]
    pub engine_id: String,

    /// Base URL of the search API
    pub endpoint: String,

    /// Number of seed results to request (1-10)
    #[serde(rename = "result-count")]
    pub result_count: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            engine_id: String::new(),
            endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
            result_count: 10,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler, included in the UA string
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "websweep".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: String::new(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header value
    ///
    /// `Name/Version` with the contact URL appended as `(+url)` when one is
    /// configured.
    pub fn header_value(&self) -> String {
        if self.contact_url.is_empty() {
            format!("{}/{}", self.crawler_name, self.crawler_version)
        } else {
            format!(
                "{}/{} (+{})",
                self.crawler_name, self.crawler_version, self.contact_url
            )
        }
    }
}
