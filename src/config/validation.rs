use crate::config::types::{CacheConfig, Config, HttpConfig, RobotsConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_robots_config(&config.robots)?;
    validate_http_config(&config.http)?;
    validate_cache_config(&config.cache)?;
    Ok(())
}

/// Validates the robots.txt agent name
fn validate_robots_config(config: &RobotsConfig) -> Result<(), ConfigError> {
    let Some(agent) = &config.user_agent else {
        return Ok(());
    };

    if agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty; omit it to match only '*' blocks".to_string(),
        ));
    }

    if agent.contains(|c: char| c == '\n' || c == '\r') {
        return Err(ConfigError::Validation(format!(
            "user-agent must be a single line, got '{}'",
            agent.escape_debug()
        )));
    }

    Ok(())
}

/// Validates HTTP fetcher configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.agent_header.trim().is_empty() {
        return Err(ConfigError::Validation(
            "agent-header cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "timeout-secs must be >= 1".to_string(),
        ));
    }

    if config.connect_timeout_secs == 0 || config.connect_timeout_secs > config.timeout_secs {
        return Err(ConfigError::Validation(format!(
            "connect-timeout-secs must be between 1 and timeout-secs ({}), got {}",
            config.timeout_secs, config.connect_timeout_secs
        )));
    }

    if config.max_redirects > 20 {
        return Err(ConfigError::Validation(format!(
            "max-redirects must be <= 20, got {}",
            config.max_redirects
        )));
    }

    Ok(())
}

/// Validates cache configuration
fn validate_cache_config(config: &CacheConfig) -> Result<(), ConfigError> {
    if config.max_age_hours == 0 {
        return Err(ConfigError::Validation(
            "max-age-hours must be >= 1".to_string(),
        ));
    }

    Ok(())
}
