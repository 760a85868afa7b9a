//! Configuration validation logic.

use crate::config::loader::Config;
use crate::error::{Error, Result};

/// Minimum length for user agent.
const MIN_USER_AGENT_LENGTH: usize = 10;

/// Upper bound for the request delay (one minute).
const MAX_REQUEST_DELAY_MS: u64 = 60_000;

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_target(&config.target)?;
    validate_user_agent(&config.options.user_agent)?;

    if config.options.request_delay_ms > MAX_REQUEST_DELAY_MS {
        return Err(Error::ConfigValidation {
            field: "request_delay_ms".to_string(),
            message: format!(
                "Delay must be at most {} ms (got {})",
                MAX_REQUEST_DELAY_MS, config.options.request_delay_ms
            ),
        });
    }

    if config.options.connect_timeout_secs == 0 {
        return Err(Error::ConfigValidation {
            field: "connect_timeout_secs".to_string(),
            message: "Timeout must be greater than zero".to_string(),
        });
    }

    Ok(())
}

/// Validate the target username. Existence and format are checked remotely.
pub fn validate_target(target: &str) -> Result<()> {
    if target.trim().is_empty() {
        return Err(Error::ConfigValidation {
            field: "username".to_string(),
            message: "Target username cannot be empty".to_string(),
        });
    }

    Ok(())
}

/// Validate the user agent string.
pub fn validate_user_agent(user_agent: &str) -> Result<()> {
    if user_agent.len() < MIN_USER_AGENT_LENGTH {
        return Err(Error::ConfigValidation {
            field: "user_agent".to_string(),
            message: format!(
                "User agent must be at least {} characters (got {})",
                MIN_USER_AGENT_LENGTH,
                user_agent.len()
            ),
        });
    }

    Ok(())
}
