//! HTTP client for the storefront REST backend.
//!
//! This module provides the [`HttpClient`] type for making requests to the
//! backend with automatic retry handling.

use std::collections::HashMap;
use std::time::Duration;

use crate::clients::errors::{HttpError, HttpResponseError, MaxHttpRetriesExceededError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::{ApiBaseUrl, StorefrontConfig};

/// Upper bound for a single retry delay.
pub const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

/// Library version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to the storefront backend.
///
/// The client handles:
/// - URL construction from the configured base URL
/// - Default headers including User-Agent and Accept
/// - Automatic retry logic for 429 and 5xx responses with exponential backoff
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use showcase_storefront::{ApiBaseUrl, StorefrontConfig};
/// use showcase_storefront::clients::{HttpClient, HttpRequest, HttpMethod};
///
/// let config = StorefrontConfig::builder()
///     .api_base_url(ApiBaseUrl::new("http://localhost:8000/api/v1").unwrap())
///     .build()?;
/// let client = HttpClient::new(&config)?;
///
/// let request = HttpRequest::builder(HttpMethod::Get, "categories/")
///     .tries(3)
///     .build()?;
///
/// let response = client.request(request).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URL (e.g., `https://shop.example.com/api/v1`).
    base_url: ApiBaseUrl,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
    /// Base delay for exponential backoff.
    retry_base_delay: Duration,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g., TLS initialization failure).
    pub fn new(config: &StorefrontConfig) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Showcase Storefront v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url().clone(),
            default_headers,
            retry_base_delay: config.retry_base_delay(),
        })
    }

    /// Returns the base URL for this client.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_ref()
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends an HTTP request to the backend.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - Network error occurs (`Network`)
    /// - Non-2xx response received (`Response`)
    /// - Max retries exceeded (`MaxRetries`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = self.base_url.join(&request.path);

        let mut headers = self.default_headers.clone();
        if let Some(body_type) = &request.body_type {
            headers.insert(
                "Content-Type".to_string(),
                body_type.as_content_type().to_string(),
            );
        }
        for (key, value) in &request.extra_headers {
            headers.insert(key.clone(), value.clone());
        }

        let mut tries: u32 = 0;
        loop {
            tries += 1;

            let mut req_builder = match request.http_method {
                HttpMethod::Get => self.client.get(&url),
                HttpMethod::Post => self.client.post(&url),
            };

            for (key, value) in &headers {
                req_builder = req_builder.header(key, value);
            }

            if !request.query.is_empty() {
                req_builder = req_builder.query(&request.query);
            }

            if let Some(body) = &request.body {
                req_builder = req_builder.body(body.to_string());
            }

            let res = req_builder.send().await?;

            let code = res.status().as_u16();
            let res_headers = Self::parse_response_headers(res.headers());
            let body_text = res.text().await?;

            let body = if body_text.trim().is_empty() {
                serde_json::json!({})
            } else {
                serde_json::from_str(&body_text).unwrap_or_else(|_| {
                    if code >= 500 {
                        serde_json::json!({ "raw_body": body_text })
                    } else {
                        serde_json::json!({})
                    }
                })
            };

            let response = HttpResponse::new(code, res_headers, body);

            if response.is_ok() {
                tracing::debug!(
                    method = %request.http_method,
                    path = %request.path,
                    status = code,
                    "storefront request succeeded"
                );
                return Ok(response);
            }

            let error_message = Self::serialize_error(&response);
            let error_reference = response.request_id().map(String::from);

            if !response.is_retryable() {
                return Err(HttpError::Response(HttpResponseError {
                    code,
                    message: error_message,
                    error_reference,
                }));
            }

            let delay = if tries < request.tries {
                self.calculate_retry_delay(&response, tries)
            } else {
                None
            };

            let Some(delay) = delay else {
                if request.tries == 1 {
                    return Err(HttpError::Response(HttpResponseError {
                        code,
                        message: error_message,
                        error_reference,
                    }));
                }
                return Err(HttpError::MaxRetries(MaxHttpRetriesExceededError {
                    code,
                    tries,
                    message: error_message,
                    error_reference,
                }));
            };

            tracing::warn!(
                path = %request.path,
                status = code,
                attempt = tries,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                "storefront request failed, retrying"
            );
            tokio::time::sleep(delay).await;
        }
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Calculates the delay before the next attempt.
    ///
    /// 429 responses honour `Retry-After`; everything else backs off
    /// exponentially from the base delay, capped at [`MAX_RETRY_DELAY`].
    /// Returns `None` when `Retry-After` asks for longer than
    /// [`MAX_RETRY_DELAY`], in which case the request is not retried.
    fn calculate_retry_delay(&self, response: &HttpResponse, attempt: u32) -> Option<Duration> {
        if response.code == 429 {
            if let Some(retry_after) = response.retry_request_after {
                return Duration::try_from_secs_f64(retry_after)
                    .ok()
                    .filter(|delay| *delay <= MAX_RETRY_DELAY);
            }
        }
        let exponent = attempt.saturating_sub(1).min(16);
        Some(
            self.retry_base_delay
                .saturating_mul(1 << exponent)
                .min(MAX_RETRY_DELAY),
        )
    }

    /// Serializes an error response body, keeping only the message-bearing keys.
    fn serialize_error(response: &HttpResponse) -> String {
        let mut error_body = serde_json::Map::new();

        if let Some(object) = response.body.as_object() {
            for (key, value) in object {
                let keep = matches!(key.as_str(), "errors" | "error" | "detail" | "message")
                    || value.is_array();
                if keep {
                    error_body.insert(key.clone(), value.clone());
                }
            }
        }

        if let Some(request_id) = response.request_id() {
            error_body.insert(
                "error_reference".to_string(),
                serde_json::json!(format!(
                    "If you report this error, please include this id: {request_id}."
                )),
            );
        }

        serde_json::to_string(&error_body).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> StorefrontConfig {
        StorefrontConfig::builder()
            .api_base_url(ApiBaseUrl::new("https://shop.example.com/api/v1").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_client_construction_uses_base_url() {
        let client = HttpClient::new(&create_test_config()).unwrap();
        assert_eq!(client.base_url(), "https://shop.example.com/api/v1");
    }

    #[test]
    fn test_user_agent_header_format() {
        let client = HttpClient::new(&create_test_config()).unwrap();

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.contains("Showcase Storefront v"));
        assert!(user_agent.contains("Rust"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let config = StorefrontConfig::builder()
            .api_base_url(ApiBaseUrl::new("https://shop.example.com/api/v1").unwrap())
            .user_agent_prefix("Kiosk/1.0")
            .build()
            .unwrap();

        let client = HttpClient::new(&config).unwrap();

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("Kiosk/1.0 | "));
    }

    #[test]
    fn test_accept_header_is_json() {
        let client = HttpClient::new(&create_test_config()).unwrap();

        assert_eq!(
            client.default_headers().get("Accept"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_retry_delay_backs_off_exponentially() {
        let client = HttpClient::new(&create_test_config()).unwrap();
        let response = HttpResponse::new(503, HashMap::new(), serde_json::json!({}));

        assert_eq!(
            client.calculate_retry_delay(&response, 1),
            Some(Duration::from_secs(1))
        );
        assert_eq!(
            client.calculate_retry_delay(&response, 2),
            Some(Duration::from_secs(2))
        );
        assert_eq!(
            client.calculate_retry_delay(&response, 3),
            Some(Duration::from_secs(4))
        );
        assert_eq!(
            client.calculate_retry_delay(&response, 10),
            Some(MAX_RETRY_DELAY)
        );
    }

    #[test]
    fn test_retry_delay_honours_retry_after_for_429() {
        let client = HttpClient::new(&create_test_config()).unwrap();
        let mut headers = HashMap::new();
        headers.insert("retry-after".to_string(), vec!["0.5".to_string()]);
        let response = HttpResponse::new(429, headers, serde_json::json!({}));

        assert_eq!(
            client.calculate_retry_delay(&response, 1),
            Some(Duration::from_millis(500))
        );
    }

    #[test]
    fn test_retry_after_beyond_cap_stops_retrying() {
        let client = HttpClient::new(&create_test_config()).unwrap();
        for value in ["31", "1e20", "1e300"] {
            let mut headers = HashMap::new();
            headers.insert("retry-after".to_string(), vec![value.to_string()]);
            let response = HttpResponse::new(429, headers, serde_json::json!({}));

            assert_eq!(client.calculate_retry_delay(&response, 1), None, "{value}");
        }
    }

    #[test]
    fn test_serialize_error_keeps_message_keys_and_field_errors() {
        let body = serde_json::json!({
            "detail": "Bad",
            "email": ["Invalid"],
            "count": 3
        });
        let response = HttpResponse::new(400, HashMap::new(), body);
        let serialized: serde_json::Value =
            serde_json::from_str(&HttpClient::serialize_error(&response)).unwrap();

        assert_eq!(serialized["detail"], "Bad");
        assert_eq!(serialized["email"][0], "Invalid");
        assert!(serialized.get("count").is_none());
    }
}
