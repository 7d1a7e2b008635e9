//! HTML link extraction
//!
//! Turns a fetched HTML body into the set of crawl-candidate URLs it links
//! to. Extraction is a pure function of the document text: parse problems
//! and empty documents yield an empty list, never an error.

use crate::url::{has_ignored_extension, resolve_link};
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Extracts candidate links from an HTML body
///
/// Every `<a href>` is resolved against the page URL via the normalizer,
/// then screened by the extension ignore-list. The result is deduplicated
/// by the normalized key but keeps document order.
///
/// Robots policy is deliberately not consulted here; that check needs the
/// shared per-origin cache and happens in the coordinator's merge step.
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base` - The URL the document was fetched from
///
/// # Returns
///
/// Normalized absolute URLs, extension-filtered and deduplicated
pub fn extract_links(html: &str, base: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);

    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let Some(resolved) = resolve_link(href, base) else {
            continue;
        };

        if has_ignored_extension(&resolved) {
            continue;
        }

        if seen.insert(resolved.as_str().to_string()) {
            links.push(resolved);
        }
    }

    links
}
