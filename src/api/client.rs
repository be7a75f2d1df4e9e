//! Resource-level client for the storefront backend.
//!
//! This module provides [`StorefrontApi`], which exposes one async method per
//! backend resource and serves repeated reads from a [`QueryCache`].

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::json;
use tokio::task::JoinHandle;

use crate::api::cache::{CachePolicy, QueryCache};
use crate::api::errors::ApiError;
use crate::catalog::ProductQuery;
use crate::clients::{DataType, HttpClient, HttpError, HttpMethod, HttpRequest};
use crate::config::StorefrontConfig;
use crate::resources::{
    Category, ConfirmRequest, ListResponse, Product, Service, SiteSettings, SubscribeOutcome,
    SubscribeRequest, SubscriptionStatus,
};

/// Message shown when the backend accepts a subscription without saying why.
pub const DEFAULT_SUBSCRIBE_MESSAGE: &str =
    "Merci! Vérifiez votre email pour confirmer votre inscription.";

/// Message shown when the backend confirms an email without a message.
pub const DEFAULT_CONFIRM_MESSAGE: &str = "Email confirmé avec succès!";

/// Client for the storefront REST resources.
///
/// Reads go through a shared [`QueryCache`]: an entry younger than the
/// resource's stale time (see [`CachePolicy`]) is returned without a request.
/// Writes (view tracking, newsletter) are never cached and are attempted once.
///
/// Cloning is cheap; clones share the HTTP client and the cache.
///
/// # Thread Safety
///
/// `StorefrontApi` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use showcase_storefront::{ApiBaseUrl, StorefrontApi, StorefrontConfig};
/// use showcase_storefront::catalog::ProductQuery;
///
/// let config = StorefrontConfig::builder()
///     .api_base_url(ApiBaseUrl::new("https://shop.example.com/api/v1")?)
///     .build()?;
/// let api = StorefrontApi::new(&config)?;
///
/// let categories = api.main_categories().await?;
/// let page = api.products(&ProductQuery::new().category_slug("audio")).await?;
/// ```
#[derive(Clone, Debug)]
pub struct StorefrontApi {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    http: HttpClient,
    cache: QueryCache,
    policy: CachePolicy,
    tries: u32,
}

// Verify StorefrontApi is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<StorefrontApi>();
};

impl StorefrontApi {
    /// Creates a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying HTTP client cannot be
    /// created.
    pub fn new(config: &StorefrontConfig) -> Result<Self, ApiError> {
        let http = HttpClient::new(config)?;
        Ok(Self {
            inner: Arc::new(Inner {
                http,
                cache: QueryCache::with_max_age(config.cache_policy().max_stale_time()),
                policy: *config.cache_policy(),
                tries: config.tries(),
            }),
        })
    }

    /// Returns the shared response cache.
    #[must_use]
    pub fn cache(&self) -> &QueryCache {
        &self.inner.cache
    }

    /// Returns the staleness policy in use.
    #[must_use]
    pub fn cache_policy(&self) -> &CachePolicy {
        &self.inner.policy
    }

    /// Returns the base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.inner.http.base_url()
    }

    // -- Categories --------------------------------------------------------

    /// Lists categories (`GET /categories/`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on HTTP failure or an unexpected body.
    pub async fn categories(&self) -> Result<ListResponse<Category>, ApiError> {
        let request = self.get("categories/", Vec::new())?;
        self.fetch_cached("categories", request, self.inner.policy.categories)
            .await
    }

    /// Lists level 0 categories (`GET /categories/?level=0`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on HTTP failure or an unexpected body.
    pub async fn main_categories(&self) -> Result<Vec<Category>, ApiError> {
        let request = self.get("categories/", vec![("level".to_string(), "0".to_string())])?;
        let list: ListResponse<Category> = self
            .fetch_cached("categories", request, self.inner.policy.main_categories)
            .await?;
        Ok(list.into_results())
    }

    /// Lists every category as a flat vector.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on HTTP failure or an unexpected body.
    pub async fn all_categories(&self) -> Result<Vec<Category>, ApiError> {
        Ok(self.categories().await?.into_results())
    }

    /// Fetches one category (`GET /categories/{slug}/`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::EmptySlug`] without sending a request when `slug`
    /// is blank, otherwise [`ApiError`] on HTTP or decode failure.
    pub async fn category(&self, slug: &str) -> Result<Category, ApiError> {
        let slug = encoded_slug(slug, "category")?;
        let request = self.get(&format!("categories/{slug}/"), Vec::new())?;
        self.fetch_cached("category", request, self.inner.policy.category)
            .await
    }

    /// Lists the products of one category (`GET /categories/{slug}/products/`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::EmptySlug`] without sending a request when `slug`
    /// is blank, otherwise [`ApiError`] on HTTP or decode failure.
    pub async fn category_products(&self, slug: &str) -> Result<ListResponse<Product>, ApiError> {
        let slug = encoded_slug(slug, "category")?;
        let request = self.get(&format!("categories/{slug}/products/"), Vec::new())?;
        self.fetch_cached(
            "category products",
            request,
            self.inner.policy.category_products,
        )
        .await
    }

    // -- Products ----------------------------------------------------------

    /// Lists products matching `query` (`GET /products/?...`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on HTTP failure or an unexpected body.
    pub async fn products(&self, query: &ProductQuery) -> Result<ListResponse<Product>, ApiError> {
        let request = self.get("products/", query.to_pairs())?;
        self.fetch_cached("products", request, self.inner.policy.products)
            .await
    }

    /// Fetches one product (`GET /products/{slug}/`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::EmptySlug`] without sending a request when `slug`
    /// is blank, otherwise [`ApiError`] on HTTP or decode failure.
    pub async fn product(&self, slug: &str) -> Result<Product, ApiError> {
        let slug = encoded_slug(slug, "product")?;
        let request = self.get(&format!("products/{slug}/"), Vec::new())?;
        self.fetch_cached("product", request, self.inner.policy.products)
            .await
    }

    /// Lists featured products, best score first, up to twenty.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on HTTP failure or an unexpected body.
    pub async fn featured_products(&self) -> Result<ListResponse<Product>, ApiError> {
        self.products(&ProductQuery::featured_products()).await
    }

    /// Lists the eight most recently created products.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on HTTP failure or an unexpected body.
    pub async fn recent_products(&self) -> Result<ListResponse<Product>, ApiError> {
        self.products(&ProductQuery::recent_products()).await
    }

    /// Lists recommended products (`GET /products/recommended/`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on HTTP failure or an unexpected body.
    pub async fn recommended_products(&self) -> Result<ListResponse<Product>, ApiError> {
        let request = self.get("products/recommended/", Vec::new())?;
        self.fetch_cached("recommended products", request, self.inner.policy.products)
            .await
    }

    /// Records a product view (`POST /products/{slug}/track_view/`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on a blank slug or HTTP failure.
    pub async fn track_product_view(&self, slug: &str) -> Result<(), ApiError> {
        let slug = encoded_slug(slug, "product")?;
        let request = HttpRequest::builder(HttpMethod::Post, format!("products/{slug}/track_view/"))
            .body(json!({}))
            .body_type(DataType::Json)
            .build()
            .map_err(HttpError::from)?;
        self.inner.http.request(request).await?;
        Ok(())
    }

    /// Records a product view in the background.
    ///
    /// Failures are logged and never reported to the caller. The returned
    /// handle may be dropped.
    pub fn track_product_view_detached(&self, slug: &str) -> JoinHandle<()> {
        let api = self.clone();
        let slug = slug.to_string();
        tokio::spawn(async move {
            if let Err(error) = api.track_product_view(&slug).await {
                tracing::warn!(slug = %slug, error = %error, "failed to track product view");
            }
        })
    }

    // -- Services and settings ---------------------------------------------

    /// Lists services ordered by display order.
    ///
    /// With `only_active`, inactive services are filtered out by the backend.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on HTTP failure or an unexpected body.
    pub async fn services(&self, only_active: bool) -> Result<Vec<Service>, ApiError> {
        let mut query = Vec::with_capacity(2);
        if only_active {
            query.push(("is_active".to_string(), "true".to_string()));
        }
        query.push(("ordering".to_string(), "order".to_string()));

        let request = self.get("services/", query)?;
        let list: ListResponse<Service> = self
            .fetch_cached("services", request, self.inner.policy.services)
            .await?;
        Ok(list.into_results())
    }

    /// Fetches the site settings (`GET /settings/`).
    ///
    /// The backend may answer with a list envelope; its first element is used.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on HTTP failure or an unexpected body.
    pub async fn site_settings(&self) -> Result<SiteSettings, ApiError> {
        let request = self.get("settings/", Vec::new())?;
        let payload: serde_json::Value = self
            .fetch_cached("site settings", request, self.inner.policy.site_settings)
            .await?;
        SiteSettings::from_payload(payload).map_err(|source| ApiError::Decode {
            resource: "site settings",
            source,
        })
    }

    // -- Newsletter --------------------------------------------------------

    /// Subscribes an email address (`POST /newsletter/subscribers/`).
    ///
    /// A 4xx answer (duplicate or invalid address) is returned as an outcome
    /// with `success == false` carrying the backend's message.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] for network failures and 5xx answers.
    pub async fn subscribe(&self, body: &SubscribeRequest) -> Result<SubscribeOutcome, ApiError> {
        let request = HttpRequest::builder(HttpMethod::Post, "newsletter/subscribers/")
            .body(json!({ "email": body.email, "source": body.source }))
            .body_type(DataType::Json)
            .build()
            .map_err(HttpError::from)?;

        match self.inner.http.request(request).await {
            Ok(response) => Ok(SubscribeOutcome {
                success: true,
                message: message_or(&response.body, DEFAULT_SUBSCRIBE_MESSAGE),
            }),
            Err(HttpError::Response(error)) if error.is_client_error() => {
                tracing::debug!(status = error.code, "subscription rejected");
                Ok(SubscribeOutcome {
                    success: false,
                    message: error.detail(),
                })
            }
            Err(error) => Err(error.into()),
        }
    }

    /// Looks up the subscription status of `email`.
    ///
    /// Never cached: the status changes when the visitor clicks the emailed
    /// link.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on HTTP failure or an unexpected body.
    pub async fn subscription_status(&self, email: &str) -> Result<SubscriptionStatus, ApiError> {
        let request = HttpRequest::builder(HttpMethod::Get, "newsletter/subscribers/status/")
            .query_param("email", email)
            .build()
            .map_err(HttpError::from)?;
        let response = self.inner.http.request(request).await?;
        decode("subscription status", response.body)
    }

    /// Confirms a subscription with the emailed token.
    ///
    /// Returns the backend's message, or [`DEFAULT_CONFIRM_MESSAGE`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on HTTP failure, including an invalid token.
    pub async fn confirm_subscription(&self, token: &str) -> Result<String, ApiError> {
        let body = ConfirmRequest {
            token: token.to_string(),
        };
        let request = HttpRequest::builder(HttpMethod::Post, "newsletter/subscribers/confirm/")
            .body(json!({ "token": body.token }))
            .body_type(DataType::Json)
            .build()
            .map_err(HttpError::from)?;
        let response = self.inner.http.request(request).await?;
        Ok(message_or(&response.body, DEFAULT_CONFIRM_MESSAGE))
    }

    // -- Internals ---------------------------------------------------------

    fn get(&self, path: &str, query: Vec<(String, String)>) -> Result<HttpRequest, ApiError> {
        HttpRequest::builder(HttpMethod::Get, path)
            .query(query)
            .tries(self.inner.tries)
            .build()
            .map_err(|e| ApiError::Http(e.into()))
    }

    /// Serves `request` from the cache when fresh, otherwise fetches it.
    ///
    /// Only bodies that decode successfully are stored.
    async fn fetch_cached<T: DeserializeOwned>(
        &self,
        resource: &'static str,
        request: HttpRequest,
        stale_time: Duration,
    ) -> Result<T, ApiError> {
        let key = request.path_and_query();

        if let Some(value) = self.inner.cache.get_fresh(&key, stale_time) {
            tracing::debug!(key = %key, "cache hit");
            return decode(resource, value);
        }
        tracing::debug!(key = %key, "cache miss");

        let response = self.inner.http.request(request).await?;
        let decoded = decode(resource, response.body.clone())?;
        self.inner.cache.insert(key, response.body);
        Ok(decoded)
    }
}

fn decode<T: DeserializeOwned>(
    resource: &'static str,
    value: serde_json::Value,
) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|source| ApiError::Decode { resource, source })
}

fn encoded_slug(slug: &str, resource: &'static str) -> Result<String, ApiError> {
    let slug = slug.trim();
    if slug.is_empty() {
        return Err(ApiError::EmptySlug { resource });
    }
    Ok(urlencoding::encode(slug).into_owned())
}

fn message_or(body: &serde_json::Value, default: &str) -> String {
    body.get("message")
        .and_then(serde_json::Value::as_str)
        .filter(|message| !message.trim().is_empty())
        .map_or_else(|| default.to_string(), str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoded_slug_rejects_blank() {
        assert!(matches!(
            encoded_slug("  ", "product"),
            Err(ApiError::EmptySlug { resource: "product" })
        ));
    }

    #[test]
    fn test_encoded_slug_percent_encodes() {
        assert_eq!(encoded_slug("café noir", "product").unwrap(), "caf%C3%A9%20noir");
    }

    #[test]
    fn test_message_or_falls_back_on_missing_or_blank() {
        assert_eq!(message_or(&json!({}), "default"), "default");
        assert_eq!(message_or(&json!({"message": " "}), "default"), "default");
        assert_eq!(message_or(&json!({"message": "ok"}), "default"), "ok");
    }

    #[test]
    fn test_storefront_api_is_clone_and_shares_cache() {
        let config = StorefrontConfig::builder()
            .api_base_url(crate::config::ApiBaseUrl::new("http://localhost:8000/api/v1").unwrap())
            .build()
            .unwrap();
        let api = StorefrontApi::new(&config).unwrap();
        let clone = api.clone();

        api.cache().insert("settings/", json!({}));
        assert_eq!(clone.cache().len(), 1);
        assert_eq!(clone.base_url(), "http://localhost:8000/api/v1");
    }
}
