//! Configuration validation logic.

use crate::config::loader::Config;
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_user_id(&config.account.user_id)?;
    validate_session_token(&config.account.session_token)?;
    validate_user_agent(&config.account.user_agent)?;
    validate_threads(config.options.threads)?;
    validate_page_limit(config.options.page_limit)?;

    Ok(())
}

/// Validate the numeric user id.
pub fn validate_user_id(user_id: &str) -> Result<()> {
    if user_id.is_empty() {
        return Err(Error::MissingConfig("user_id".to_string()));
    }

    if !user_id.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::ConfigValidation {
            field: "user_id".to_string(),
            message: format!("User id must be numeric (got '{}')", user_id),
        });
    }

    Ok(())
}

/// Validate the `SUB` session token.
pub fn validate_session_token(token: &str) -> Result<()> {
    if token.trim().is_empty() {
        return Err(Error::MissingConfig("session_token".to_string()));
    }

    // Check for placeholder values
    let token_lower = token.to_lowercase();
    if token_lower.contains("replaceme") || token_lower.contains("your_token") {
        return Err(Error::ConfigValidation {
            field: "session_token".to_string(),
            message: "Token appears to be a placeholder. Please provide your SUB cookie value."
                .to_string(),
        });
    }

    if token.contains(';') || token.contains(char::is_whitespace) {
        return Err(Error::ConfigValidation {
            field: "session_token".to_string(),
            message: "Token must be the bare SUB value, not a full cookie header".to_string(),
        });
    }

    Ok(())
}

/// Validate the user agent string.
pub fn validate_user_agent(user_agent: &str) -> Result<()> {
    if user_agent.trim().is_empty() {
        return Err(Error::MissingConfig("user_agent".to_string()));
    }

    Ok(())
}

/// Validate the download worker count.
pub fn validate_threads(threads: usize) -> Result<()> {
    if threads == 0 {
        return Err(Error::ConfigValidation {
            field: "threads".to_string(),
            message: "At least one download thread is required".to_string(),
        });
    }

    Ok(())
}

/// Validate the optional page limit.
pub fn validate_page_limit(limit: Option<u32>) -> Result<()> {
    if limit == Some(0) {
        return Err(Error::ConfigValidation {
            field: "page_limit".to_string(),
            message: "Page limit must be a positive number".to_string(),
        });
    }

    Ok(())
}
