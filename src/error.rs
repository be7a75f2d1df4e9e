//! Error types for the storefront client.
//!
//! This module contains the configuration error type. Transport, API and
//! newsletter errors live next to the code that produces them.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use showcase_storefront::{ApiBaseUrl, ConfigError};
//!
//! let result = ApiBaseUrl::new("");
//! assert!(matches!(result, Err(ConfigError::InvalidApiBaseUrl { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring the storefront client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The API base URL is not an absolute http(s) URL.
    #[error("Invalid API base URL '{url}'. Expected an absolute http(s) URL (e.g., 'https://shop.example.com/api/v1').")]
    InvalidApiBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// The number of request attempts must be at least one.
    #[error("Invalid number of tries: {tries}. At least one attempt is required.")]
    InvalidTries {
        /// The rejected value.
        tries: u32,
    },

    /// A duration setting must be non-zero.
    #[error("Invalid duration for '{field}': it must be greater than zero.")]
    ZeroDuration {
        /// The name of the offending setting.
        field: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_base_url_error_message() {
        let error = ConfigError::InvalidApiBaseUrl {
            url: "ftp://nope".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("ftp://nope"));
        assert!(message.contains("http(s)"));
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField {
            field: "api_base_url",
        };
        let message = error.to_string();
        assert!(message.contains("api_base_url"));
        assert!(message.contains("must be set"));
    }

    #[test]
    fn test_invalid_tries_message() {
        let error = ConfigError::InvalidTries { tries: 0 };
        assert!(error.to_string().contains("At least one attempt"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::ZeroDuration {
            field: "retry_base_delay",
        };
        let _: &dyn std::error::Error = &error;
    }
}
