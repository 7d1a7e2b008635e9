//! Simplified robots.txt parsing
//!
//! Websweep implements a deliberately flat subset of the robots exclusion
//! protocol: every `Disallow:` line contributes a path prefix, and the
//! resulting set applies to all user agents. Wildcard matching and
//! `User-agent` rule groups are not interpreted.

/// Parsed crawl exclusions for one origin
///
/// Holds the disallowed path prefixes recorded from a robots.txt body.
/// An empty set means everything is allowed, which is also the fail-open
/// default when robots.txt cannot be fetched.
#[derive(Debug, Clone, Default)]
pub struct RobotsPolicy {
    disallowed: Vec<String>,
}

impl RobotsPolicy {
    /// Parses a robots.txt body into a policy
    ///
    /// Each line beginning with the case-sensitive directive `Disallow:`
    /// records its trimmed remainder as a disallowed path prefix. A bare
    /// `Disallow: /` excludes the entire origin. Lines with an empty
    /// remainder are ignored (an empty prefix would match every path).
    ///
    /// # Arguments
    ///
    /// * `content` - The raw robots.txt file content
    pub fn from_content(content: &str) -> Self {
        let disallowed = content
            .lines()
            .map(str::trim_start)
            .filter_map(|line| line.strip_prefix("Disallow:"))
            .map(str::trim)
            .filter(|prefix| !prefix.is_empty())
            .map(str::to_string)
            .collect();

        Self { disallowed }
    }

    /// Creates a permissive policy that allows every path
    ///
    /// Used when robots.txt is absent, unfetchable, or returns an error
    /// status.
    pub fn allow_all() -> Self {
        Self::default()
    }

    /// Checks whether a path is allowed under this policy
    ///
    /// # Arguments
    ///
    /// * `path` - The URL path to check (e.g. `/private/data`)
    ///
    /// # Returns
    ///
    /// * `true` - No disallowed prefix matches the path
    /// * `false` - The path starts with a recorded disallowed prefix
    pub fn allows(&self, path: &str) -> bool {
        !self
            .disallowed
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }

    /// Returns the number of recorded disallow prefixes
    pub fn rule_count(&self) -> usize {
        self.disallowed.len()
    }
}
