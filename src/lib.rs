//! Robots-Scope: robots.txt disallow rules for a single site
//!
//! This crate fetches a site's robots.txt, extracts the `Disallow:` rules that
//! apply to a crawler's user agent, and answers allow/disallow questions for
//! URLs on that site.

pub mod client;
pub mod config;
pub mod robots;
pub mod url;

use thiserror::Error;

/// Main error type for Robots-Scope operations
#[derive(Debug, Error)]
pub enum RobotsError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] UrlError),

    #[error("{domain} does not allow robots.")]
    RobotsDisallowed { domain: String },

    #[error("Robots.txt read error: {0}")]
    Read(#[from] robots::ReadError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL '{url}': {source}")]
    Parse {
        url: String,
        source: ::url::ParseError,
    },
}

/// Result type alias for Robots-Scope operations
pub type Result<T> = std::result::Result<T, RobotsError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use crate::client::{FetchOutcome, HttpFetcher, RobotsFetcher, SiteClient};
pub use crate::config::Config;
pub use crate::robots::{read_rules, DisallowRule, RuleSet};
pub use crate::url::{derive_robots_location, RobotsLocation};
