use serde::Deserialize;

/// Main configuration structure for Robots-Scope
///
/// Every section is optional; missing sections use their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub robots: RobotsConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Robots.txt matching configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RobotsConfig {
    /// Agent name matched against `User-agent:` lines (unset matches only `*`)
    #[serde(rename = "user-agent", default)]
    pub user_agent: Option<String>,
}

/// HTTP fetcher configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpConfig {
    /// Value of the HTTP `User-Agent` request header
    #[serde(rename = "agent-header", default = "default_agent_header")]
    pub agent_header: String,

    /// Total request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection timeout (seconds)
    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Maximum redirects followed when fetching robots.txt
    #[serde(rename = "max-redirects", default = "default_max_redirects")]
    pub max_redirects: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            agent_header: default_agent_header(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            max_redirects: default_max_redirects(),
        }
    }
}

/// Rule cache configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    /// Age after which cached rules should be fetched again (hours)
    #[serde(rename = "max-age-hours", default = "default_max_age_hours")]
    pub max_age_hours: u32,
}

impl CacheConfig {
    /// Maximum age of cached rules as a duration
    pub fn max_age(&self) -> chrono::Duration {
        chrono::Duration::hours(i64::from(self.max_age_hours))
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_age_hours: default_max_age_hours(),
        }
    }
}

fn default_agent_header() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_max_redirects() -> usize {
    10
}

fn default_max_age_hours() -> u32 {
    24
}
