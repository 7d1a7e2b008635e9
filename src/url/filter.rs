use url::Url;

/// File extensions that are never worth fetching
///
/// Binary, media, and legacy script resources carry no links; matching URLs
/// are dropped before they reach the frontier, independently of robots
/// rules.
pub const IGNORED_EXTENSIONS: &[&str] = &[
    "img", "jpg", "jpeg", "png", "gif", "mp3", "mp4", "wav", "avi", "wmv", "flv", "cgi",
];

/// Checks whether a URL's path ends in an ignored extension
///
/// The comparison is case-insensitive; only the final path segment's
/// extension is considered, never the query string.
///
/// # Arguments
///
/// * `url` - The URL to classify
///
/// # Returns
///
/// * `true` - The URL points at a binary/media resource and must be skipped
/// * `false` - The URL is a crawl candidate
pub fn has_ignored_extension(url: &Url) -> bool {
    let path = url.path();

    let last_segment = path.rsplit('/').next().unwrap_or("");

    match last_segment.rsplit_once('.') {
        Some((name, ext)) if !name.is_empty() => {
            let ext = ext.to_ascii_lowercase();
            IGNORED_EXTENSIONS.contains(&ext.as_str())
        }
        _ => false,
    }
}
