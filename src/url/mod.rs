//! URL normalization and filtering
//!
//! Everything that decides whether a raw link is even a candidate for the
//! frontier lives here: resolving relative links against their page, the
//! fragment-stripped canonical key, and the binary/media extension
//! ignore-list.

mod filter;
mod normalize;

pub use filter::{has_ignored_extension, IGNORED_EXTENSIONS};
pub use normalize::{origin_of, resolve_link};
