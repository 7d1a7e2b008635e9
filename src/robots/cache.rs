//! Per-origin robots policy cache
//!
//! Policies are fetched lazily on the first check against an origin and are
//! immutable for the rest of the run. Concurrent first access to the same
//! origin is single-flighted through a per-origin `OnceCell`, so one batch
//! containing several URLs on an uncached origin still performs exactly one
//! robots.txt fetch.

use crate::robots::RobotsPolicy;
use crate::url::origin_of;
use reqwest::Client;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::sync::OnceCell;
use url::Url;

/// Caches one [`RobotsPolicy`] per origin for the lifetime of a run
pub struct RobotsCache {
    client: Client,
    timeout: Duration,
    origins: RwLock<HashMap<String, Arc<OnceCell<RobotsPolicy>>>>,
}

impl RobotsCache {
    /// Creates an empty cache
    ///
    /// # Arguments
    ///
    /// * `client` - The shared HTTP client used for robots.txt fetches
    /// * `timeout` - Per-request timeout for robots.txt fetches
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self {
            client,
            timeout,
            origins: RwLock::new(HashMap::new()),
        }
    }

    /// Checks whether a URL is allowed by its origin's robots policy
    ///
    /// The first call for an origin fetches `<origin>/robots.txt`; every
    /// later call reuses the cached policy. Fetch failures and error
    /// statuses fail open: the origin is treated as unrestricted for the
    /// remainder of the run.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to check; only its path is matched against the
    ///   policy's disallowed prefixes
    pub async fn is_allowed(&self, url: &Url) -> bool {
        let Some(origin) = origin_of(url) else {
            // http(s) URLs always carry a host; nothing to enforce otherwise
            return true;
        };

        let cell = self.cell_for(&origin);
        let policy = cell
            .get_or_init(|| self.fetch_policy(origin.clone()))
            .await;

        policy.allows(url.path())
    }

    /// Returns the number of origins with a cached (or in-flight) policy
    pub fn cached_origins(&self) -> usize {
        self.origins.read().expect("robots cache lock poisoned").len()
    }

    /// Looks up or creates the once-cell for an origin
    ///
    /// The map locks are held only for the lookup itself, never across an
    /// await; the cell is what serializes the actual fetch.
    fn cell_for(&self, origin: &str) -> Arc<OnceCell<RobotsPolicy>> {
        {
            let origins = self.origins.read().expect("robots cache lock poisoned");
            if let Some(cell) = origins.get(origin) {
                return Arc::clone(cell);
            }
        }

        let mut origins = self.origins.write().expect("robots cache lock poisoned");
        Arc::clone(origins.entry(origin.to_string()).or_default())
    }

    /// Fetches and parses `<origin>/robots.txt`, failing open on any problem
    async fn fetch_policy(&self, origin: String) -> RobotsPolicy {
        let robots_url = format!("{}/robots.txt", origin);
        tracing::debug!("Fetching robots policy from {}", robots_url);

        let response = match self
            .client
            .get(&robots_url)
            .timeout(self.timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!("Robots fetch failed for {}: {} (allowing all)", origin, e);
                return RobotsPolicy::allow_all();
            }
        };

        if !response.status().is_success() {
            tracing::debug!(
                "Robots fetch for {} returned {} (allowing all)",
                origin,
                response.status()
            );
            return RobotsPolicy::allow_all();
        }

        match response.text().await {
            Ok(body) => {
                let policy = RobotsPolicy::from_content(&body);
                tracing::debug!(
                    "Cached robots policy for {} ({} disallow rules)",
                    origin,
                    policy.rule_count()
                );
                policy
            }
            Err(e) => {
                tracing::debug!("Robots body read failed for {}: {} (allowing all)", origin, e);
                RobotsPolicy::allow_all()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn cache() -> RobotsCache {
        RobotsCache::new(Client::new(), Duration::from_secs(2))
    }

    #[tokio::test]
    async fn test_disallowed_prefix_is_enforced() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/robots.txt"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Disallow: /private/"))
            .mount(&server)
            .await;

        let cache = cache();
        let blocked = Url::parse(&format!("{}/private/data", server.uri())).unwrap();
        let allowed = Url::parse(&format!("{}/public/data", server.uri())).unwrap();

        assert!(!cache.is_allowed(&blocked).await);
        assert!(cache.is_allowed(&allowed).await);
    }

    #[tokio::test]
    async fn test_missing_robots_fails_open() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/robots.txt"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let cache = cache();
        let url = Url::parse(&format!("{}/anything", server.uri())).unwrap();
        assert!(cache.is_allowed(&url).await);
    }

    #[tokio::test]
    async fn test_unreachable_origin_fails_open() {
        // Nothing listens on this port; the connect error must fail open.
        let cache = RobotsCache::new(Client::new(), Duration::from_millis(500));
        let url = Url::parse("http://127.0.0.1:1/page").unwrap();
        assert!(cache.is_allowed(&url).await);
    }

    #[tokio::test]
    async fn test_policy_is_fetched_once_per_origin() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/robots.txt"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Disallow: /x/"))
            .expect(1)
            .mount(&server)
            .await;

        let cache = cache();
        for i in 0..5 {
            let url = Url::parse(&format!("{}/page{}", server.uri(), i)).unwrap();
            assert!(cache.is_allowed(&url).await);
        }
        assert_eq!(cache.cached_origins(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_first_access_single_flight() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/robots.txt"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("Disallow: /private/")
                    .set_delay(Duration::from_millis(100)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let cache = Arc::new(cache());
        let mut handles = Vec::new();
        for i in 0..8 {
            let cache = Arc::clone(&cache);
            let url = Url::parse(&format!("{}/page{}", server.uri(), i)).unwrap();
            handles.push(tokio::spawn(async move { cache.is_allowed(&url).await }));
        }
        for handle in handles {
            assert!(handle.await.unwrap());
        }
    }
}
