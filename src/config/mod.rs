//! Configuration module for Robots-Scope
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use robots_scope::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("robots-scope.toml")).unwrap();
//! println!("Request timeout: {}s", config.http.timeout_secs);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{CacheConfig, Config, HttpConfig, RobotsConfig};

// Re-export parser functions
pub use parser::{load_config, parse_config};
