//! Crawl output
//!
//! The externally observable result of a run is the stream of accepted URLs
//! plus a final summary. The stream goes through the [`UrlSink`] trait so
//! the engine never knows whether it is feeding a terminal, a file, or a
//! test collector; the summary is the [`CrawlReport`] the coordinator
//! returns.

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;

/// Receives every URL accepted into the frontier, in acceptance order
pub trait UrlSink {
    /// Called once per distinct URL, at the moment it is admitted
    fn accept(&mut self, url: &Url);
}

/// Writes each accepted URL to standard output
#[derive(Debug, Default)]
pub struct StdoutSink;

impl StdoutSink {
    pub fn new() -> Self {
        Self
    }
}

impl UrlSink for StdoutSink {
    fn accept(&mut self, url: &Url) {
        println!("{}", url);
    }
}

/// Collects accepted URLs in memory
///
/// Cloning shares the underlying buffer, so a test can keep one handle
/// while the crawler owns the other.
#[derive(Debug, Clone, Default)]
pub struct CollectSink {
    urls: Arc<Mutex<Vec<String>>>,
}

impl CollectSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of everything collected so far
    pub fn collected(&self) -> Vec<String> {
        self.urls.lock().expect("collect sink lock poisoned").clone()
    }
}

impl UrlSink for CollectSink {
    fn accept(&mut self, url: &Url) {
        self.urls
            .lock()
            .expect("collect sink lock poisoned")
            .push(url.as_str().to_string());
    }
}

/// Discards every accepted URL
#[derive(Debug, Default)]
pub struct NullSink;

impl UrlSink for NullSink {
    fn accept(&mut self, _url: &Url) {}
}

/// Summary of a completed crawl run
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Distinct URLs discovered (visited or pending)
    pub distinct_urls: usize,

    /// Total URLs dispatched for fetching
    pub dispatched: u64,

    /// Number of batch rounds performed
    pub batches: u64,

    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl fmt::Display for CrawlReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Crawl complete: {} distinct URLs discovered in {:.3}s ({} dispatched over {} batches)",
            self.distinct_urls,
            self.elapsed.as_secs_f64(),
            self.dispatched,
            self.batches
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_collect_sink_shares_buffer() {
        let sink = CollectSink::new();
        let mut handle = sink.clone();

        handle.accept(&url("https://a.com/1"));
        handle.accept(&url("https://a.com/2"));

        assert_eq!(
            sink.collected(),
            vec!["https://a.com/1", "https://a.com/2"]
        );
    }

    #[test]
    fn test_null_sink_accepts_silently() {
        let mut sink = NullSink;
        sink.accept(&url("https://a.com/1"));
    }

    #[test]
    fn test_report_display() {
        let report = CrawlReport {
            distinct_urls: 42,
            dispatched: 10,
            batches: 4,
            elapsed: Duration::from_millis(3_214),
        };
        let rendered = report.to_string();
        assert!(rendered.contains("42 distinct URLs"));
        assert!(rendered.contains("3.214s"));
        assert!(rendered.contains("10 dispatched over 4 batches"));
    }
}
