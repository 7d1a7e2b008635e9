//! Robots exclusion handling
//!
//! Implements the simplified subset of the robots exclusion protocol used by
//! websweep: a flat list of `Disallow:` path prefixes per origin, applied to
//! all user agents, cached for the whole run and fail-open when robots.txt
//! cannot be retrieved.

mod cache;
mod parser;

pub use cache::RobotsCache;
pub use parser::RobotsPolicy;
