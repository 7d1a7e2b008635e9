//! Crawl coordination - the batch loop
//!
//! The coordinator owns every piece of crawl state (frontier, robots cache,
//! HTTP client, budget counter) and drives the machine
//! `Seeding -> BatchDispatch -> BatchMerge -> (loop | Done)`:
//!
//! 1. Seeding admits each resolved seed URL through the same normalization,
//!    extension-filter, robots, and dedup rules as discovered links.
//! 2. BatchDispatch takes a FIFO slice of the frontier, bounded by the batch
//!    size and the remaining budget, and spawns one fetch+extract+filter
//!    task per URL.
//! 3. BatchMerge joins the whole batch, then folds every newly discovered
//!    URL into the frontier. A failed fetch contributes an empty set.
//!
//! Strictly batch-synchronous: batch N is fully merged before batch N+1 is
//! computed, so the frontier is only ever touched by this single writer
//! between joins.

use crate::config::{CrawlerConfig, UserAgentConfig};
use crate::crawler::fetcher::{build_http_client, fetch_page, FetchResult};
use crate::crawler::frontier::Frontier;
use crate::crawler::parser::extract_links;
use crate::output::{CrawlReport, UrlSink};
use crate::robots::RobotsCache;
use crate::url::has_ignored_extension;
use crate::SweepError;
use reqwest::Client;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;
use url::Url;

/// The crawl orchestrator
pub struct Crawler {
    config: CrawlerConfig,
    client: Client,
    frontier: Frontier,
    robots: Arc<RobotsCache>,
    sink: Box<dyn UrlSink + Send>,
    cancel: Arc<AtomicBool>,
}

impl Crawler {
    /// Creates a crawler with an empty frontier
    ///
    /// # Arguments
    ///
    /// * `config` - Crawl tuning (budget, batch size, timeouts)
    /// * `user_agent` - Identification used for all outbound requests
    /// * `sink` - Receives every URL accepted into the frontier
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to seed and run
    /// * `Err(SweepError)` - The HTTP client could not be built
    pub fn new(
        config: CrawlerConfig,
        user_agent: &UserAgentConfig,
        sink: Box<dyn UrlSink + Send>,
    ) -> Result<Self, SweepError> {
        let client = build_http_client(user_agent)?;
        let robots = Arc::new(RobotsCache::new(client.clone(), config.robots_timeout()));

        Ok(Self {
            config,
            client,
            frontier: Frontier::new(),
            robots,
            sink,
            cancel: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Returns the flag that stops the crawl between batches when set
    ///
    /// Setting it never aborts in-flight fetches; the current batch still
    /// joins under its own per-request timeouts.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Admits seed URLs into the frontier
    ///
    /// Seeds follow the identical admission pipeline as discovered links:
    /// parse, fragment strip, extension filter, robots check, dedup.
    ///
    /// # Arguments
    ///
    /// * `seeds` - Raw absolute URL strings, typically from seed resolution
    ///
    /// # Returns
    ///
    /// The number of seeds actually admitted
    pub async fn seed<I>(&mut self, seeds: I) -> usize
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut admitted = 0;
        for seed in seeds {
            let seed = seed.as_ref();
            let Some(url) = parse_seed(seed) else {
                tracing::warn!("Skipping unparseable seed: {}", seed);
                continue;
            };
            if self.admit(url).await {
                admitted += 1;
            }
        }
        tracing::info!("Seeded frontier with {} URLs", admitted);
        admitted
    }

    /// Runs the batch loop until the budget, frontier, clock, or a
    /// cancellation ends it
    ///
    /// Per-URL failures never surface here; the run always completes with a
    /// report.
    pub async fn run(&mut self) -> CrawlReport {
        let start = Instant::now();
        let mut dispatched: u64 = 0;
        let mut batches: u64 = 0;
        let budget = u64::from(self.config.budget);

        loop {
            if self.cancel.load(Ordering::Relaxed) {
                tracing::info!("Cancellation requested, stopping after {} batches", batches);
                break;
            }

            if let Some(limit) = self.config.max_runtime() {
                if start.elapsed() >= limit {
                    tracing::info!("Runtime limit {:?} reached, stopping", limit);
                    break;
                }
            }

            if dispatched >= budget {
                tracing::info!("Budget of {} dispatched URLs exhausted", budget);
                break;
            }

            let room = (budget - dispatched).min(u64::from(self.config.batch_size)) as usize;
            let batch = self.frontier.next_batch(room);
            if batch.is_empty() {
                tracing::info!("Frontier drained, crawl complete");
                break;
            }

            dispatched += batch.len() as u64;
            batches += 1;
            tracing::debug!(
                "Batch {}: dispatching {} URLs ({}/{} budget used)",
                batches,
                batch.len(),
                dispatched,
                budget
            );

            let discovered = self.dispatch_batch(batch).await;

            let mut accepted = 0;
            for url in discovered {
                if self.frontier.insert(url.clone()) {
                    self.sink.accept(&url);
                    accepted += 1;
                }
            }

            tracing::info!(
                "Batch {}: merged {} new URLs ({} pending, {} distinct)",
                batches,
                accepted,
                self.frontier.pending(),
                self.frontier.seen()
            );
        }

        CrawlReport {
            distinct_urls: self.frontier.seen(),
            dispatched,
            batches,
            elapsed: start.elapsed(),
        }
    }

    /// Spawns one pipeline task per URL and joins the whole batch
    ///
    /// Completion order within the batch is unspecified; the union of every
    /// task's discoveries is returned once all tasks have resolved.
    async fn dispatch_batch(&self, batch: Vec<Url>) -> Vec<Url> {
        let mut tasks = JoinSet::new();

        for url in batch {
            let client = self.client.clone();
            let robots = Arc::clone(&self.robots);
            let timeout = self.config.fetch_timeout();
            tasks.spawn(async move { crawl_page(client, robots, url, timeout).await });
        }

        let mut discovered = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(links) => discovered.extend(links),
                // A panicked task loses its links but never the batch
                Err(e) => tracing::error!("Crawl task failed to join: {}", e),
            }
        }
        discovered
    }

    /// Runs the shared admission pipeline for one URL
    async fn admit(&mut self, url: Url) -> bool {
        if has_ignored_extension(&url) {
            tracing::debug!("Skipping ignored extension: {}", url);
            return false;
        }

        if !self.robots.is_allowed(&url).await {
            tracing::debug!("Disallowed by robots policy: {}", url);
            return false;
        }

        if self.frontier.insert(url.clone()) {
            self.sink.accept(&url);
            true
        } else {
            false
        }
    }
}

/// Fetches one page and returns the allowed URLs it links to
///
/// Every failure mode contributes an empty set; nothing here can abort the
/// batch.
async fn crawl_page(
    client: Client,
    robots: Arc<RobotsCache>,
    url: Url,
    timeout: std::time::Duration,
) -> Vec<Url> {
    match fetch_page(&client, url.as_str(), timeout).await {
        FetchResult::Html { body } => {
            let links = extract_links(&body, &url);
            tracing::debug!("{}: extracted {} candidate links", url, links.len());

            let mut allowed = Vec::with_capacity(links.len());
            for link in links {
                if robots.is_allowed(&link).await {
                    allowed.push(link);
                } else {
                    tracing::debug!("Disallowed by robots policy: {}", link);
                }
            }
            allowed
        }
        FetchResult::NonHtml { content_type } => {
            tracing::debug!("{}: non-HTML content type '{}', skipping", url, content_type);
            Vec::new()
        }
        FetchResult::HttpError { status } => {
            tracing::warn!("{}: HTTP {}", url, status);
            Vec::new()
        }
        FetchResult::NetworkError { error } => {
            tracing::warn!("{}: {}", url, error);
            Vec::new()
        }
    }
}

/// Parses a raw seed string into a crawlable URL
///
/// Search APIs sometimes return display-formatted URLs without a scheme;
/// those get an `https://` prefix before parsing. The fragment is stripped
/// like everywhere else.
fn parse_seed(seed: &str) -> Option<Url> {
    let seed = seed.trim();
    if seed.is_empty() {
        return None;
    }

    let mut url = match Url::parse(seed) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(&format!("https://{}", seed)).ok()?
        }
        Err(_) => return None,
    };

    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }

    url.set_fragment(None);
    Some(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::CollectSink;

    fn test_crawler(config: CrawlerConfig) -> (Crawler, CollectSink) {
        let sink = CollectSink::new();
        let crawler = Crawler::new(
            config,
            &UserAgentConfig::default(),
            Box::new(sink.clone()),
        )
        .unwrap();
        (crawler, sink)
    }

    fn quick_config() -> CrawlerConfig {
        CrawlerConfig {
            budget: 10,
            batch_size: 3,
            fetch_timeout_ms: 500,
            robots_timeout_ms: 500,
            max_runtime_ms: None,
        }
    }

    #[test]
    fn test_parse_seed_absolute() {
        let url = parse_seed("https://example.com/page#frag").unwrap();
        assert_eq!(url.as_str(), "https://example.com/page");
    }

    #[test]
    fn test_parse_seed_without_scheme() {
        let url = parse_seed("example.com/page").unwrap();
        assert_eq!(url.as_str(), "https://example.com/page");
    }

    #[test]
    fn test_parse_seed_rejects_garbage() {
        assert!(parse_seed("").is_none());
        assert!(parse_seed("ftp://example.com/x").is_none());
    }

    #[tokio::test]
    async fn test_seed_deduplicates() {
        // Unreachable origin: robots fetch fails open, so admission works
        let (mut crawler, sink) = test_crawler(quick_config());
        let admitted = crawler
            .seed([
                "http://127.0.0.1:1/a",
                "http://127.0.0.1:1/a#section",
                "http://127.0.0.1:1/b",
            ])
            .await;
        assert_eq!(admitted, 2);
        assert_eq!(sink.collected().len(), 2);
    }

    #[tokio::test]
    async fn test_seed_applies_extension_filter() {
        let (mut crawler, _sink) = test_crawler(quick_config());
        let admitted = crawler
            .seed(["http://127.0.0.1:1/photo.png", "http://127.0.0.1:1/page"])
            .await;
        assert_eq!(admitted, 1);
    }

    #[tokio::test]
    async fn test_cancelled_run_dispatches_nothing() {
        let (mut crawler, _sink) = test_crawler(quick_config());
        crawler.seed(["http://127.0.0.1:1/a"]).await;
        crawler.cancel_flag().store(true, Ordering::Relaxed);

        let report = crawler.run().await;
        assert_eq!(report.dispatched, 0);
        assert_eq!(report.batches, 0);
        assert_eq!(report.distinct_urls, 1);
    }

    #[tokio::test]
    async fn test_empty_frontier_completes_immediately() {
        let (mut crawler, _sink) = test_crawler(quick_config());
        let report = crawler.run().await;
        assert_eq!(report.dispatched, 0);
        assert_eq!(report.distinct_urls, 0);
    }

    #[tokio::test]
    async fn test_unreachable_seeds_stay_within_budget() {
        // Every fetch fails; the run must still terminate with the
        // dispatched count bounded by the seed count.
        let (mut crawler, _sink) = test_crawler(quick_config());
        crawler
            .seed(["http://127.0.0.1:1/a", "http://127.0.0.1:1/b"])
            .await;

        let report = crawler.run().await;
        assert_eq!(report.dispatched, 2);
        assert_eq!(report.batches, 1);
        assert_eq!(report.distinct_urls, 2);
    }
}
