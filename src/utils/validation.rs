//! Input validation utilities
//!
//! Checks applied to command line arguments and job file values before any
//! network activity happens.

use crate::error::CliError;

/// Validate that a URL is properly formatted
pub fn validate_url(url: &str) -> crate::Result<()> {
    if url.is_empty() {
        return Err(CliError::InvalidArguments("URL cannot be empty".to_string()).into());
    }

    // Basic URL validation - must start with http:// or https://
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(CliError::InvalidArguments(format!(
            "Invalid URL '{}': URL must start with http:// or https://",
            url
        ))
        .into());
    }

    Ok(())
}

/// Validate that a required argument is present and not blank
pub fn validate_required(name: &str, value: &str) -> crate::Result<()> {
    if value.trim().is_empty() {
        return Err(CliError::InvalidArguments(format!("{} cannot be empty", name)).into());
    }
    Ok(())
}
