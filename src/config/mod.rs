//! Configuration types for the storefront client.
//!
//! This module provides the configuration used to initialize the HTTP
//! client, the resource cache and the newsletter flow.
//!
//! # Overview
//!
//! - [`StorefrontConfig`]: The main configuration struct holding all client settings
//! - [`StorefrontConfigBuilder`]: A builder for constructing [`StorefrontConfig`] instances
//! - [`ApiBaseUrl`]: A validated base URL for the REST backend
//!
//! # Example
//!
//! ```rust
//! use showcase_storefront::{ApiBaseUrl, StorefrontConfig};
//!
//! let config = StorefrontConfig::builder()
//!     .api_base_url(ApiBaseUrl::new("https://shop.example.com/api/v1").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.tries(), 3);
//! ```

mod newtypes;

pub use newtypes::ApiBaseUrl;

use std::time::Duration;

use crate::api::CachePolicy;
use crate::error::ConfigError;

/// Default number of attempts per request (one attempt plus two retries).
pub const DEFAULT_TRIES: u32 = 3;

/// Default base delay for exponential retry backoff.
pub const DEFAULT_RETRY_BASE_DELAY: Duration = Duration::from_secs(1);

/// Default interval between newsletter status checks.
pub const DEFAULT_NEWSLETTER_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Default `source` sent with newsletter subscriptions.
pub const DEFAULT_NEWSLETTER_SOURCE: &str = "page";

/// Default currency label appended to formatted prices.
pub const DEFAULT_CURRENCY_LABEL: &str = "FCFA";

/// Configuration for the storefront client.
///
/// # Thread Safety
///
/// `StorefrontConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use showcase_storefront::{ApiBaseUrl, StorefrontConfig};
///
/// let config = StorefrontConfig::builder()
///     .api_base_url(ApiBaseUrl::new("http://localhost:8000/api/v1").unwrap())
///     .user_agent_prefix("Kiosk/2.0")
///     .tries(1)
///     .newsletter_poll_interval(Duration::from_secs(5))
///     .build()
///     .unwrap();
///
/// assert_eq!(config.user_agent_prefix(), Some("Kiosk/2.0"));
/// ```
#[derive(Clone, Debug)]
pub struct StorefrontConfig {
    api_base_url: ApiBaseUrl,
    user_agent_prefix: Option<String>,
    tries: u32,
    retry_base_delay: Duration,
    cache_policy: CachePolicy,
    newsletter_poll_interval: Duration,
    newsletter_source: String,
    currency_label: String,
}

impl StorefrontConfig {
    /// Creates a new builder for constructing a `StorefrontConfig`.
    #[must_use]
    pub fn builder() -> StorefrontConfigBuilder {
        StorefrontConfigBuilder::new()
    }

    /// Returns the base URL of the REST backend.
    #[must_use]
    pub const fn api_base_url(&self) -> &ApiBaseUrl {
        &self.api_base_url
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the number of attempts made for each read request.
    #[must_use]
    pub const fn tries(&self) -> u32 {
        self.tries
    }

    /// Returns the base delay used for exponential retry backoff.
    #[must_use]
    pub const fn retry_base_delay(&self) -> Duration {
        self.retry_base_delay
    }

    /// Returns the staleness policy applied to cached resources.
    #[must_use]
    pub const fn cache_policy(&self) -> &CachePolicy {
        &self.cache_policy
    }

    /// Returns the interval between newsletter status checks.
    #[must_use]
    pub const fn newsletter_poll_interval(&self) -> Duration {
        self.newsletter_poll_interval
    }

    /// Returns the `source` sent with newsletter subscriptions.
    #[must_use]
    pub fn newsletter_source(&self) -> &str {
        &self.newsletter_source
    }

    /// Returns the currency label used when formatting prices.
    #[must_use]
    pub fn currency_label(&self) -> &str {
        &self.currency_label
    }
}

// Verify StorefrontConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<StorefrontConfig>();
};

/// Builder for constructing [`StorefrontConfig`] instances.
///
/// `api_base_url` is required. All other fields have defaults:
///
/// - `tries`: 3
/// - `retry_base_delay`: 1 second
/// - `cache_policy`: [`CachePolicy::default`]
/// - `newsletter_poll_interval`: 2 seconds
/// - `newsletter_source`: `"page"`
/// - `currency_label`: `"FCFA"`
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct StorefrontConfigBuilder {
    api_base_url: Option<ApiBaseUrl>,
    user_agent_prefix: Option<String>,
    tries: Option<u32>,
    retry_base_delay: Option<Duration>,
    cache_policy: Option<CachePolicy>,
    newsletter_poll_interval: Option<Duration>,
    newsletter_source: Option<String>,
    currency_label: Option<String>,
}

impl StorefrontConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL of the REST backend (required).
    #[must_use]
    pub fn api_base_url(mut self, url: ApiBaseUrl) -> Self {
        self.api_base_url = Some(url);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the number of attempts made for each read request.
    #[must_use]
    pub const fn tries(mut self, tries: u32) -> Self {
        self.tries = Some(tries);
        self
    }

    /// Sets the base delay for exponential retry backoff.
    #[must_use]
    pub const fn retry_base_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = Some(delay);
        self
    }

    /// Sets the staleness policy for cached resources.
    #[must_use]
    pub fn cache_policy(mut self, policy: CachePolicy) -> Self {
        self.cache_policy = Some(policy);
        self
    }

    /// Sets the interval between newsletter status checks.
    #[must_use]
    pub const fn newsletter_poll_interval(mut self, interval: Duration) -> Self {
        self.newsletter_poll_interval = Some(interval);
        self
    }

    /// Sets the `source` sent with newsletter subscriptions.
    #[must_use]
    pub fn newsletter_source(mut self, source: impl Into<String>) -> Self {
        self.newsletter_source = Some(source.into());
        self
    }

    /// Sets the currency label used when formatting prices.
    #[must_use]
    pub fn currency_label(mut self, label: impl Into<String>) -> Self {
        self.currency_label = Some(label.into());
        self
    }

    /// Builds the [`StorefrontConfig`], validating the settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `api_base_url` is not set,
    /// [`ConfigError::InvalidTries`] if `tries` is zero, and
    /// [`ConfigError::ZeroDuration`] if the poll interval is zero.
    pub fn build(self) -> Result<StorefrontConfig, ConfigError> {
        let api_base_url = self.api_base_url.ok_or(ConfigError::MissingRequiredField {
            field: "api_base_url",
        })?;

        let tries = self.tries.unwrap_or(DEFAULT_TRIES);
        if tries == 0 {
            return Err(ConfigError::InvalidTries { tries });
        }

        let newsletter_poll_interval = self
            .newsletter_poll_interval
            .unwrap_or(DEFAULT_NEWSLETTER_POLL_INTERVAL);
        if newsletter_poll_interval.is_zero() {
            return Err(ConfigError::ZeroDuration {
                field: "newsletter_poll_interval",
            });
        }

        Ok(StorefrontConfig {
            api_base_url,
            user_agent_prefix: self.user_agent_prefix,
            tries,
            retry_base_delay: self.retry_base_delay.unwrap_or(DEFAULT_RETRY_BASE_DELAY),
            cache_policy: self.cache_policy.unwrap_or_default(),
            newsletter_poll_interval,
            newsletter_source: self
                .newsletter_source
                .unwrap_or_else(|| DEFAULT_NEWSLETTER_SOURCE.to_string()),
            currency_label: self
                .currency_label
                .unwrap_or_else(|| DEFAULT_CURRENCY_LABEL.to_string()),
        })
    }
}
