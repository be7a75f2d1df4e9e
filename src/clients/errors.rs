//! HTTP-specific error types for the storefront client.
//!
//! - [`HttpResponseError`]: Non-2xx HTTP responses from the backend
//! - [`MaxHttpRetriesExceededError`]: When retry attempts are exhausted
//! - [`InvalidHttpRequestError`]: When a request fails validation before sending
//! - [`HttpError`]: Unified error type encompassing all HTTP-related errors
//!
//! # Example
//!
//! ```rust,ignore
//! use showcase_storefront::clients::HttpError;
//!
//! match client.request(request).await {
//!     Ok(response) => println!("Success: {}", response.body),
//!     Err(HttpError::Response(e)) => println!("API error {}: {}", e.code, e.detail()),
//!     Err(HttpError::MaxRetries(e)) => println!("Retries exhausted after {} tries", e.tries),
//!     Err(HttpError::InvalidRequest(e)) => println!("Invalid request: {e}"),
//!     Err(HttpError::Network(e)) => println!("Network error: {e}"),
//! }
//! ```

use thiserror::Error;

/// Extracts a human readable message from a serialized error body.
///
/// Django REST Framework style bodies are understood: `error`, `detail`,
/// `message`, then the first entry of the first field error list.
fn human_message(serialized: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(serialized).ok()?;
    let object = value.as_object()?;

    for key in ["error", "detail", "message"] {
        if let Some(text) = object.get(key).and_then(serde_json::Value::as_str) {
            return Some(text.to_string());
        }
    }

    object
        .iter()
        .filter(|(key, _)| key.as_str() != "error_reference")
        .find_map(|(_, field)| match field {
            serde_json::Value::Array(items) => items
                .first()
                .and_then(serde_json::Value::as_str)
                .map(String::from),
            serde_json::Value::String(text) => Some(text.clone()),
            _ => None,
        })
}

/// Error returned when an HTTP request receives a non-successful response.
///
/// The `message` field holds the error body re-serialized as JSON, keeping
/// only the `errors`, `error`, `detail`, `message` and field-error entries.
///
/// # Example
///
/// ```rust
/// use showcase_storefront::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 404,
///     message: r#"{"detail":"Not found."}"#.to_string(),
///     error_reference: Some("abc-123".to_string()),
/// };
///
/// assert_eq!(error.detail(), "Not found.");
/// ```
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Serialized error message in JSON format.
    pub message: String,
    /// Reference ID for error reporting (from X-Request-Id header).
    pub error_reference: Option<String>,
}

impl HttpResponseError {
    /// Returns the most specific human readable message available.
    ///
    /// Falls back to the raw serialized message when no known key is present.
    #[must_use]
    pub fn detail(&self) -> String {
        human_message(&self.message).unwrap_or_else(|| self.message.clone())
    }

    /// Returns `true` for 4xx responses.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.code >= 400 && self.code < 500
    }
}

/// Error returned when maximum retry attempts have been exhausted.
///
/// Raised when a request keeps failing with 429 or 5xx responses after all
/// configured attempts have been made.
#[derive(Debug, Error)]
#[error("Exceeded maximum retry count of {tries}. Last message: {message}")]
pub struct MaxHttpRetriesExceededError {
    /// The HTTP status code of the last response.
    pub code: u16,
    /// The number of tries that were attempted.
    pub tries: u32,
    /// Serialized error message from the last response.
    pub message: String,
    /// Reference ID for error reporting (from X-Request-Id header).
    pub error_reference: Option<String>,
}

/// Error returned when an HTTP request fails validation.
///
/// # Example
///
/// ```rust
/// use showcase_storefront::clients::InvalidHttpRequestError;
///
/// let error = InvalidHttpRequestError::MissingBody {
///     method: "post".to_string(),
/// };
///
/// assert_eq!(error.to_string(), "Cannot use post without specifying data.");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A request body was provided without specifying the body type.
    #[error("Cannot set a body without also setting body_type.")]
    MissingBodyType,

    /// A POST request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// The number of attempts was zero.
    #[error("A request needs at least one attempt.")]
    ZeroTries,
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Maximum retry attempts exhausted.
    #[error(transparent)]
    MaxRetries(#[from] MaxHttpRetriesExceededError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns the HTTP status code, when the error came from a response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.code),
            Self::MaxRetries(e) => Some(e.code),
            Self::InvalidRequest(_) | Self::Network(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_response_error_displays_message() {
        let error = HttpResponseError {
            code: 404,
            message: r#"{"detail":"Not found."}"#.to_string(),
            error_reference: None,
        };
        assert_eq!(error.to_string(), r#"{"detail":"Not found."}"#);
    }

    #[test]
    fn test_detail_prefers_error_key() {
        let error = HttpResponseError {
            code: 400,
            message: r#"{"error":"Token invalide","detail":"ignored"}"#.to_string(),
            error_reference: None,
        };
        assert_eq!(error.detail(), "Token invalide");
    }

    #[test]
    fn test_detail_reads_first_field_error() {
        let error = HttpResponseError {
            code: 400,
            message: r#"{"email":["Enter a valid email address."]}"#.to_string(),
            error_reference: None,
        };
        assert_eq!(error.detail(), "Enter a valid email address.");
        assert!(error.is_client_error());
    }

    #[test]
    fn test_detail_falls_back_to_raw_message() {
        let error = HttpResponseError {
            code: 502,
            message: "{}".to_string(),
            error_reference: None,
        };
        assert_eq!(error.detail(), "{}");
        assert!(!error.is_client_error());
    }

    #[test]
    fn test_max_retries_error_includes_retry_count() {
        let error = MaxHttpRetriesExceededError {
            code: 503,
            tries: 3,
            message: r#"{"detail":"Unavailable"}"#.to_string(),
            error_reference: None,
        };
        let message = error.to_string();
        assert!(message.contains('3'));
        assert!(message.contains("Exceeded maximum retry count"));
    }

    #[test]
    fn test_http_error_status() {
        let error = HttpError::from(HttpResponseError {
            code: 404,
            message: String::new(),
            error_reference: None,
        });
        assert_eq!(error.status(), Some(404));

        let error = HttpError::from(InvalidHttpRequestError::MissingBodyType);
        assert_eq!(error.status(), None);
    }
}
