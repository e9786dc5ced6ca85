//! Robots.txt fetcher implementation
//!
//! This module defines the collaborator that retrieves robots.txt for a
//! [`SiteClient`](crate::client::SiteClient), including:
//! - The [`RobotsFetcher`] trait and its [`FetchOutcome`]
//! - A reqwest-backed [`HttpFetcher`]
//! - Building HTTP clients from [`HttpConfig`]
//!
//! Every transport failure is collapsed into [`FetchOutcome::NotFound`].

use crate::config::HttpConfig;
use reqwest::{redirect::Policy, Client};
use std::future::{self, Future};
use std::time::Duration;

/// Result of fetching a robots.txt resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The resource was retrieved; its lines in order
    Found(Vec<String>),

    /// The resource is missing or could not be retrieved
    NotFound,
}

impl FetchOutcome {
    /// Splits a response body into lines (`\n` or `\r\n`)
    pub fn from_body(body: &str) -> Self {
        Self::Found(body.lines().map(str::to_string).collect())
    }
}

/// Retrieves robots.txt content for a fully-qualified robots.txt URL
///
/// Implementors decide their own timeout and retry policy. Any plain
/// `Fn(&str) -> FetchOutcome` closure is also a fetcher.
pub trait RobotsFetcher {
    fn fetch(&self, robots_url: &str) -> impl Future<Output = FetchOutcome> + Send;
}

impl<F> RobotsFetcher for F
where
    F: Fn(&str) -> FetchOutcome + Sync,
{
    fn fetch(&self, robots_url: &str) -> impl Future<Output = FetchOutcome> + Send {
        future::ready(self(robots_url))
    }
}

/// Builds an HTTP client for robots.txt requests
///
/// # Arguments
///
/// * `config` - The HTTP configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.agent_header.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .redirect(Policy::limited(config.max_redirects))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches robots.txt over HTTP(S)
///
/// | Condition | Outcome |
/// |-----------|---------|
/// | HTTP 2xx | `Found` with the body's lines |
/// | Any other status | `NotFound` |
/// | Timeout, connection or TLS error | `NotFound` |
/// | Body not readable as text | `NotFound` |
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a client built from `config`
    pub fn new(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn get(&self, robots_url: &str) -> FetchOutcome {
        let response = match self.client.get(robots_url).send().await {
            Ok(response) => response,
            Err(e) => {
                if e.is_timeout() {
                    tracing::warn!("Timed out fetching {}", robots_url);
                } else if e.is_connect() {
                    tracing::warn!("Connection failed for {}: {}", robots_url, e);
                } else {
                    tracing::warn!("Failed to fetch {}: {}", robots_url, e);
                }
                return FetchOutcome::NotFound;
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("{} returned HTTP {}", robots_url, status.as_u16());
            return FetchOutcome::NotFound;
        }

        match response.text().await {
            Ok(body) => FetchOutcome::from_body(&body),
            Err(e) => {
                tracing::warn!("Failed to read body of {}: {}", robots_url, e);
                FetchOutcome::NotFound
            }
        }
    }
}

impl RobotsFetcher for HttpFetcher {
    fn fetch(&self, robots_url: &str) -> impl Future<Output = FetchOutcome> + Send {
        self.get(robots_url)
    }
}
