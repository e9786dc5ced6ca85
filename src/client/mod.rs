//! Site client module
//!
//! This module contains the per-site robots.txt lifecycle:
//! - Deriving the robots.txt location from any URL on a site
//! - Fetching robots.txt through a [`RobotsFetcher`]
//! - Replacing the cached rules atomically
//! - Answering allow/disallow queries and filtering URL lists

mod fetcher;

pub use fetcher::{build_http_client, FetchOutcome, HttpFetcher, RobotsFetcher};

use crate::robots::{read_rules, read_rules_from, CachedRules, ReadError, RuleSet};
use crate::url::{derive_robots_location, parse_url, RobotsLocation};
use crate::RobotsError;
use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use std::io::BufRead;
use tokio::sync::Mutex;
use url::Url;

/// Robots.txt rules for one site, scoped to one user agent
///
/// The client starts empty and allows everything until rules are loaded with
/// [`fetch_and_cache`](Self::fetch_and_cache) or [`load`](Self::load). Each
/// load replaces the cached domain and rules as a whole.
///
/// Queries take a shared lock on the cache. Concurrent `fetch_and_cache`
/// calls on one client run one at a time.
///
/// # Example
///
/// ```
/// use robots_scope::{FetchOutcome, SiteClient};
///
/// let mut client = SiteClient::new(None);
/// let robots = FetchOutcome::from_body("User-agent: *\nDisallow: /404.htm");
/// client.load("http://example.com", robots).unwrap();
///
/// assert!(client.is_allowed("http://example.com/about.htm").unwrap());
/// assert!(!client.is_allowed("http://example.com/404.htm").unwrap());
/// ```
#[derive(Debug, Default)]
pub struct SiteClient {
    user_agent: Option<String>,
    cache: RwLock<CachedRules>,
    refresh: Mutex<()>,
}

impl SiteClient {
    /// Creates a client; `None` matches only `User-agent: *` blocks
    pub fn new(user_agent: Option<String>) -> Self {
        Self {
            user_agent,
            ..Self::default()
        }
    }

    /// Creates a client for a named user agent
    pub fn with_user_agent(user_agent: impl Into<String>) -> Self {
        Self::new(Some(user_agent.into()))
    }

    /// Derives the robots.txt URL and domain for a site URL
    pub fn derive_robots_location(&self, site_url: &str) -> Result<RobotsLocation, RobotsError> {
        Ok(derive_robots_location(site_url)?)
    }

    /// Fetches robots.txt for the site and replaces the cached rules
    ///
    /// # Request Flow
    ///
    /// 1. Derive the robots.txt URL and domain from `site_url`
    /// 2. Ask `fetcher` for the robots.txt lines
    /// 3. Replace the cache:
    ///    - `NotFound` → no rules
    ///    - lines → the rules parsed for this client's user agent
    ///    - `Disallow: /` in scope → a rule matching every URL
    ///
    /// # Errors
    ///
    /// * `RobotsError::InvalidUrl` - `site_url` is not a URL; the cache is untouched
    /// * `RobotsError::RobotsDisallowed` - the site denies this agent entirely;
    ///   the cache now disallows everything
    pub async fn fetch_and_cache<F>(&self, site_url: &str, fetcher: &F) -> Result<(), RobotsError>
    where
        F: RobotsFetcher,
    {
        let _refresh = self.refresh.lock().await;

        let location = derive_robots_location(site_url)?;
        tracing::debug!("Fetching {}", location.robots_url());
        let outcome = fetcher.fetch(location.robots_url()).await;

        self.replace(location, outcome)
    }

    /// Fetches robots.txt again only when the cache is missing or older than `max_age`
    ///
    /// Returns `Ok(true)` when a fetch was made. Errors are those of
    /// [`fetch_and_cache`](Self::fetch_and_cache).
    pub async fn refresh_if_stale<F>(
        &self,
        site_url: &str,
        fetcher: &F,
        max_age: Duration,
    ) -> Result<bool, RobotsError>
    where
        F: RobotsFetcher,
    {
        if !self.is_stale(max_age) {
            tracing::debug!("Cached rules for {} are fresh", site_url);
            return Ok(false);
        }
        self.fetch_and_cache(site_url, fetcher).await?;
        Ok(true)
    }

    /// Replaces the cached rules from an already fetched outcome
    ///
    /// This is [`fetch_and_cache`](Self::fetch_and_cache) without the fetch,
    /// for callers that retrieve robots.txt themselves.
    pub fn load(&mut self, site_url: &str, outcome: FetchOutcome) -> Result<(), RobotsError> {
        let location = derive_robots_location(site_url)?;
        self.replace(location, outcome)
    }

    /// Replaces the cached rules from robots.txt text in a reader
    ///
    /// # Errors
    ///
    /// * `RobotsError::InvalidUrl` - `site_url` is not a URL; the cache is untouched
    /// * `RobotsError::Read` - a line could not be read; the cache is untouched
    /// * `RobotsError::RobotsDisallowed` - as for [`load`](Self::load)
    pub fn load_reader<R: BufRead>(&mut self, site_url: &str, reader: R) -> Result<(), RobotsError> {
        let location = derive_robots_location(site_url)?;
        let parsed = read_rules_from(reader, self.user_agent.as_deref());
        self.store(location.domain().to_string(), parsed)
    }

    fn replace(&self, location: RobotsLocation, outcome: FetchOutcome) -> Result<(), RobotsError> {
        let (robots_url, domain) = location.into_parts();

        let parsed = match outcome {
            FetchOutcome::NotFound => {
                tracing::debug!("No robots.txt at {}, allowing everything", robots_url);
                Ok(RuleSet::new())
            }
            FetchOutcome::Found(lines) => read_rules(&lines, self.user_agent.as_deref()),
        };

        self.store(domain, parsed)
    }

    fn store(&self, domain: String, parsed: Result<RuleSet, ReadError>) -> Result<(), RobotsError> {
        let (rules, result) = match parsed {
            Ok(rules) => (rules, Ok(())),
            Err(ReadError::DisallowedAll) => {
                tracing::warn!("{} disallows all robots", domain);
                let err = RobotsError::RobotsDisallowed {
                    domain: domain.clone(),
                };
                (RuleSet::deny_all(), Err(err))
            }
            Err(e @ ReadError::Io(_)) => return Err(e.into()),
        };

        tracing::info!("Cached {} disallow rules for {}", rules.len(), domain);
        let snapshot = CachedRules::new(domain, rules);
        *self.cache.write() = snapshot;

        result
    }

    /// Checks if a URL may be crawled under the cached rules
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - No cached rule occurs in the URL's path
    /// * `Ok(false)` - The URL is disallowed
    /// * `Err(RobotsError::InvalidUrl)` - `url` is not a URL
    pub fn is_allowed(&self, url: &str) -> Result<bool, RobotsError> {
        let url = parse_url(url)?;
        Ok(self.is_allowed_url(&url))
    }

    /// Checks a parsed URL against the cached rules
    pub fn is_allowed_url(&self, url: &Url) -> bool {
        self.cache.read().is_allowed(url.path())
    }

    /// Keeps the allowed URLs, in order
    ///
    /// Entries that do not parse as URLs are dropped.
    pub fn filter<I, S>(&self, urls: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let cache = self.cache.read();
        urls.into_iter()
            .filter_map(|raw| {
                let raw = raw.as_ref();
                match Url::parse(raw) {
                    Ok(url) if cache.is_allowed(url.path()) => Some(raw.to_string()),
                    Ok(_) => None,
                    Err(e) => {
                        tracing::debug!("Dropping unparsable URL '{}': {}", raw, e);
                        None
                    }
                }
            })
            .collect()
    }

    /// Keeps the allowed parsed URLs, in order
    pub fn filter_urls(&self, urls: &[Url]) -> Vec<Url> {
        let cache = self.cache.read();
        urls.iter()
            .filter(|url| cache.is_allowed(url.path()))
            .cloned()
            .collect()
    }

    /// Returns each cached rule prefixed with the domain
    pub fn disallowed_urls(&self) -> Vec<String> {
        self.cache.read().disallowed_urls()
    }

    /// Returns the cached rules without the domain
    pub fn disallowed_paths(&self) -> Vec<String> {
        self.cache.read().rules().paths()
    }

    /// Returns true when no rules are cached
    pub fn is_unrestricted(&self) -> bool {
        self.cache.read().rules().is_empty()
    }

    /// The domain of the last load, ending in `/`
    pub fn domain(&self) -> Option<String> {
        self.cache.read().domain().map(str::to_string)
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    /// When the cached rules were loaded
    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.cache.read().fetched_at()
    }

    /// Checks if the cached rules are missing or older than `max_age`
    pub fn is_stale(&self, max_age: Duration) -> bool {
        self.cache.read().is_stale(max_age)
    }
}
