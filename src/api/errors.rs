//! Error type for storefront resource operations.

use crate::clients::HttpError;
use thiserror::Error;

/// Error type for [`StorefrontApi`](crate::api::StorefrontApi) operations.
///
/// # Example
///
/// ```rust
/// use showcase_storefront::api::ApiError;
///
/// let error = ApiError::EmptySlug { resource: "product" };
/// assert!(error.to_string().contains("product"));
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The response body did not match the expected shape.
    #[error("Failed to decode {resource} response: {source}")]
    Decode {
        /// The resource being decoded.
        resource: &'static str,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },

    /// A slug-addressed resource was requested with an empty slug.
    ///
    /// No request is sent in that case.
    #[error("A non-empty slug is required to fetch a {resource}.")]
    EmptySlug {
        /// The resource that was requested.
        resource: &'static str,
    },
}

impl ApiError {
    /// Returns `true` when the backend answered 404.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Http(e) if matches!(e.status(), Some(404)))
    }
}
