//! Crawl engine
//!
//! The core of websweep: bounded single-URL fetches, pure link extraction,
//! the deduplicating frontier, and the batch-synchronous coordinator that
//! ties them together.

mod coordinator;
mod fetcher;
mod frontier;
mod parser;

pub use coordinator::Crawler;
pub use fetcher::{build_http_client, fetch_page, FetchResult};
pub use frontier::Frontier;
pub use parser::extract_links;

pub use crate::output::CrawlReport;
