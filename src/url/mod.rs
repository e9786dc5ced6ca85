//! URL handling module for Robots-Scope
//!
//! This module parses URLs and derives robots.txt locations from site URLs.

mod location;

pub use location::{derive_robots_location, RobotsLocation};

use crate::UrlError;
use url::Url;

/// Parses a URL string, keeping the input in the error
///
/// # Examples
///
/// ```
/// use robots_scope::url::parse_url;
///
/// assert!(parse_url("https://example.com/page").is_ok());
/// assert!(parse_url("not a url").is_err());
/// ```
pub fn parse_url(url: &str) -> Result<Url, UrlError> {
    Url::parse(url).map_err(|source| UrlError::Parse {
        url: url.to_string(),
        source,
    })
}
