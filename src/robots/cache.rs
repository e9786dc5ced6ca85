//! Cached robots.txt rules
//!
//! This module holds the per-client snapshot of a site's disallow rules along
//! with the domain they belong to and when they were fetched.

use crate::robots::RuleSet;
use chrono::{DateTime, Duration, Utc};

/// Cached disallow rules for one site
///
/// A snapshot is always replaced as a whole; it is never merged with a
/// previous one.
#[derive(Debug, Clone, Default)]
pub struct CachedRules {
    /// Site root the rules apply to, always ending in `/`
    domain: Option<String>,

    /// The disallow rules
    rules: RuleSet,

    /// When the rules were loaded
    fetched_at: Option<DateTime<Utc>>,
}

impl CachedRules {
    /// Creates a snapshot for `domain` stamped with the current time
    pub fn new(domain: String, rules: RuleSet) -> Self {
        Self {
            domain: Some(domain),
            rules,
            fetched_at: Some(Utc::now()),
        }
    }

    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    /// Returns the age of the snapshot, if it was ever loaded
    pub fn age(&self) -> Option<Duration> {
        self.fetched_at.map(|at| Utc::now() - at)
    }

    /// Checks if the snapshot is older than `max_age`
    ///
    /// An empty snapshot that was never loaded is always stale.
    pub fn is_stale(&self, max_age: Duration) -> bool {
        match self.age() {
            Some(age) => age > max_age,
            None => true,
        }
    }

    /// Checks a URL path against the cached rules
    pub fn is_allowed(&self, target: &str) -> bool {
        !self.rules.disallows(target)
    }

    /// Returns each rule prefixed with the domain
    pub fn disallowed_urls(&self) -> Vec<String> {
        let domain = self.domain.as_deref().unwrap_or_default();
        self.rules
            .iter()
            .map(|rule| format!("{}{}", domain, rule))
            .collect()
    }
}
