use url::Url;

/// Resolves a raw link against its base page into a normalized absolute URL
///
/// Relative links resolve against the base page's origin; a link that names
/// its own host keeps that host. The fragment is always stripped, so two
/// links differing only by fragment produce the same key. The query string
/// is kept and participates in the key.
///
/// # Arguments
///
/// * `href` - The raw href attribute value, possibly relative
/// * `base` - The URL of the page the link was found on
///
/// # Returns
///
/// * `Some(Url)` - A normalized absolute http(s) URL
/// * `None` - The link is empty, unparseable, or not crawlable
///
/// # Examples
///
/// ```
/// use url::Url;
/// use websweep::url::resolve_link;
///
/// let base = Url::parse("https://example.com/docs/").unwrap();
/// let resolved = resolve_link("guide#intro", &base).unwrap();
/// assert_eq!(resolved.as_str(), "https://example.com/docs/guide");
/// ```
pub fn resolve_link(href: &str, base: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    // Non-navigable schemes
    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    // Fragment-only links point back at the same page
    if href.starts_with('#') {
        return None;
    }

    let mut resolved = base.join(href).ok()?;

    if resolved.scheme() != "http" && resolved.scheme() != "https" {
        return None;
    }

    resolved.set_fragment(None);

    Some(resolved)
}

/// Returns the origin key (`scheme://host[:port]`) for a URL
///
/// This is the granularity at which robots policies are cached: all pages
/// on one scheme+host share a single policy.
///
/// # Arguments
///
/// * `url` - The URL to derive the origin from
///
/// # Returns
///
/// * `Some(String)` - The origin, without a trailing slash
/// * `None` - The URL has no host (e.g. `file:` URLs)
pub fn origin_of(url: &Url) -> Option<String> {
    let host = url.host_str()?;

    match url.port() {
        Some(port) => Some(format!("{}://{}:{}", url.scheme(), host, port)),
        None => Some(format!("{}://{}", url.scheme(), host)),
    }
}
