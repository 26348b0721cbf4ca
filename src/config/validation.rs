use crate::config::types::{BrowserConfig, Config, FilesConfig, ServerConfig, SummarizerConfig};
use crate::ConfigError;
use std::net::SocketAddr;
use url::Url;

/// Shortest timeout accepted for any bounded wait (milliseconds)
const MIN_TIMEOUT_MS: u64 = 1_000;

/// Longest settle delay accepted (milliseconds)
const MAX_SETTLE_MS: u64 = 60_000;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_server_config(&config.server)?;
    validate_browser_config(&config.browser)?;
    validate_summarizer_config(&config.summarizer)?;
    validate_files_config(&config.files)?;
    Ok(())
}

fn validate_server_config(config: &ServerConfig) -> Result<(), ConfigError> {
    config.bind_address.parse::<SocketAddr>().map_err(|e| {
        ConfigError::Validation(format!(
            "bind_address '{}' is not a socket address: {}",
            config.bind_address, e
        ))
    })?;
    Ok(())
}

fn validate_browser_config(config: &BrowserConfig) -> Result<(), ConfigError> {
    for (name, value) in [
        ("navigation_timeout_ms", config.navigation_timeout_ms),
        ("heading_timeout_ms", config.heading_timeout_ms),
    ] {
        if value < MIN_TIMEOUT_MS {
            return Err(ConfigError::Validation(format!(
                "{} must be >= {}ms, got {}ms",
                name, MIN_TIMEOUT_MS, value
            )));
        }
    }

    for (name, value) in [
        ("index_settle_ms", config.index_settle_ms),
        ("nested_index_settle_ms", config.nested_index_settle_ms),
    ] {
        if value > MAX_SETTLE_MS {
            return Err(ConfigError::Validation(format!(
                "{} must be <= {}ms, got {}ms",
                name, MAX_SETTLE_MS, value
            )));
        }
    }

    if matches!(&config.chrome_executable, Some(path) if path.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "chrome_executable cannot be empty when set".to_string(),
        ));
    }

    Ok(())
}

fn validate_summarizer_config(config: &SummarizerConfig) -> Result<(), ConfigError> {
    let endpoint = Url::parse(&config.endpoint)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid summarizer endpoint: {}", e)))?;

    if endpoint.scheme() != "http" && endpoint.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Summarizer endpoint '{}' must use http or https",
            config.endpoint
        )));
    }

    if config.model.trim().is_empty() {
        return Err(ConfigError::Validation("model cannot be empty".to_string()));
    }

    if config.api_key_env.trim().is_empty() {
        return Err(ConfigError::Validation(
            "api_key_env cannot be empty".to_string(),
        ));
    }

    if config.request_timeout_ms < MIN_TIMEOUT_MS {
        return Err(ConfigError::Validation(format!(
            "request_timeout_ms must be >= {}ms, got {}ms",
            MIN_TIMEOUT_MS, config.request_timeout_ms
        )));
    }

    Ok(())
}

fn validate_files_config(config: &FilesConfig) -> Result<(), ConfigError> {
    for (name, value) in [
        ("format_example", &config.format_example),
        ("summary_log", &config.summary_log),
        ("raw_output", &config.raw_output),
    ] {
        if value.trim().is_empty() {
            return Err(ConfigError::Validation(format!("{} cannot be empty", name)));
        }
    }
    Ok(())
}
