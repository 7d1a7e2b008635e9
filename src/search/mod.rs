//! Seed resolution via a search API
//!
//! A crawl starts from a keyword, not from URLs: one request against a
//! Google-Custom-Search-shaped API turns the keyword into a small ordered
//! list of seed URLs. This is the only failure in the system that is fatal
//! to the whole run; without seeds there is nothing to crawl.

use crate::config::SearchConfig;
use crate::SweepError;
use reqwest::Client;
use serde::Deserialize;

/// Top-level search API response
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

/// A single search result entry
#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(rename = "formattedUrl")]
    formatted_url: String,
}

/// Resolves a query into an ordered list of seed URLs
///
/// Performs one GET against the configured endpoint with the standard
/// `key`/`cx`/`q`/`num` query parameters and collects the `formattedUrl`
/// of each result item.
///
/// # Arguments
///
/// * `client` - The shared HTTP client
/// * `config` - Search endpoint and credentials
/// * `query` - The search keyword(s)
///
/// # Returns
///
/// * `Ok(Vec<String>)` - Seed URLs in result order, never empty
/// * `Err(SweepError::SeedResolution)` - Any HTTP, network, or payload
///   problem; the caller is expected to abort the run
pub async fn resolve_seeds(
    client: &Client,
    config: &SearchConfig,
    query: &str,
) -> Result<Vec<String>, SweepError> {
    tracing::info!("Resolving seeds for query: {}", query);

    let response = client
        .get(&config.endpoint)
        .query(&[
            ("key", config.api_key.as_str()),
            ("cx", config.engine_id.as_str()),
            ("q", query),
            ("num", &config.result_count.to_string()),
        ])
        .send()
        .await
        .map_err(|e| SweepError::SeedResolution(format!("request failed: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(SweepError::SeedResolution(format!(
            "search API returned {}",
            status
        )));
    }

    let parsed: SearchResponse = response
        .json()
        .await
        .map_err(|e| SweepError::SeedResolution(format!("invalid response payload: {}", e)))?;

    let seeds: Vec<String> = parsed
        .items
        .into_iter()
        .map(|item| item.formatted_url)
        .collect();

    if seeds.is_empty() {
        return Err(SweepError::SeedResolution(format!(
            "no results for query '{}'",
            query
        )));
    }

    tracing::info!("Resolved {} seed URLs", seeds.len());
    Ok(seeds)
}
