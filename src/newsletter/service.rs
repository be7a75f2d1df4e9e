//! Newsletter operations over the API and the pending email store.

use std::sync::Arc;

use crate::api::StorefrontApi;
use crate::config::StorefrontConfig;
use crate::newsletter::errors::NewsletterError;
use crate::newsletter::storage::PendingEmailStore;
use crate::resources::{SubscribeOutcome, SubscribeRequest, SubscriptionStatus};

/// Shown when the form is submitted without an email or without consent.
pub const MISSING_FIELDS_MESSAGE: &str =
    "Veuillez remplir tous les champs et accepter les conditions";

/// Shown when a confirmation link carries no token.
pub const INVALID_TOKEN_MESSAGE: &str = "Token invalide";

/// Newsletter subscription, status lookup and confirmation.
///
/// The email of an accepted subscription is kept in the
/// [`PendingEmailStore`] until it is confirmed, so that a later visit can
/// resume waiting for confirmation.
///
/// Cloning is cheap; clones share the API client and the store.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use showcase_storefront::newsletter::{MemoryEmailStore, NewsletterService};
///
/// let service = NewsletterService::new(api, Arc::new(MemoryEmailStore::new()), "footer");
/// let outcome = service.subscribe("visiteur@example.com", true).await?;
/// if outcome.success {
///     assert!(service.saved_email()?.is_some());
/// }
/// ```
#[derive(Clone, Debug)]
pub struct NewsletterService {
    api: StorefrontApi,
    store: Arc<dyn PendingEmailStore>,
    source: String,
}

// Verify NewsletterService is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<NewsletterService>();
};

impl NewsletterService {
    /// Creates a service tagging subscriptions with `source`.
    #[must_use]
    pub fn new(
        api: StorefrontApi,
        store: Arc<dyn PendingEmailStore>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            api,
            store,
            source: source.into(),
        }
    }

    /// Creates a service using the configured newsletter source.
    #[must_use]
    pub fn from_config(
        api: StorefrontApi,
        store: Arc<dyn PendingEmailStore>,
        config: &StorefrontConfig,
    ) -> Self {
        Self::new(api, store, config.newsletter_source())
    }

    /// Returns the source tag sent with subscriptions.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the email awaiting confirmation, if any.
    ///
    /// # Errors
    ///
    /// Returns [`NewsletterError::Storage`] when the store cannot be read.
    pub fn saved_email(&self) -> Result<Option<String>, NewsletterError> {
        Ok(self.store.load()?)
    }

    /// Forgets the email awaiting confirmation.
    ///
    /// # Errors
    ///
    /// Returns [`NewsletterError::Storage`] when the store cannot be written.
    pub fn forget_email(&self) -> Result<(), NewsletterError> {
        Ok(self.store.clear()?)
    }

    /// Subscribes `email`.
    ///
    /// Nothing is sent unless `email` is non-blank and `consent` is given.
    /// An accepted subscription is remembered as pending. A rejection by the
    /// backend is an outcome with `success == false`.
    ///
    /// # Errors
    ///
    /// Returns [`NewsletterError::Validation`] for missing input,
    /// [`NewsletterError::Api`] when the backend cannot be reached, and
    /// [`NewsletterError::Storage`] when the accepted email cannot be
    /// remembered (the subscription itself stands).
    pub async fn subscribe(
        &self,
        email: &str,
        consent: bool,
    ) -> Result<SubscribeOutcome, NewsletterError> {
        let email = email.trim();
        if email.is_empty() || !consent {
            return Err(NewsletterError::Validation {
                message: MISSING_FIELDS_MESSAGE.to_string(),
            });
        }

        let request = SubscribeRequest {
            email: email.to_string(),
            source: self.source.clone(),
        };
        let outcome = self.api.subscribe(&request).await?;

        if outcome.success {
            self.store.save(email)?;
            tracing::debug!(source = %self.source, "newsletter subscription pending confirmation");
        }
        Ok(outcome)
    }

    /// Looks up the status of the pending email.
    ///
    /// Returns `None` without a request when no email is pending.
    ///
    /// # Errors
    ///
    /// Returns [`NewsletterError`] when the store or the backend fails.
    pub async fn check_status(
        &self,
    ) -> Result<Option<(String, SubscriptionStatus)>, NewsletterError> {
        let Some(email) = self.saved_email()? else {
            return Ok(None);
        };
        let status = self.api.subscription_status(&email).await?;
        Ok(Some((email, status)))
    }

    /// Confirms a subscription with the emailed token.
    ///
    /// On success the pending email is forgotten and the backend's message
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns [`NewsletterError::Validation`] for a blank token, otherwise
    /// [`NewsletterError::Api`] or [`NewsletterError::Storage`].
    pub async fn confirm(&self, token: &str) -> Result<String, NewsletterError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(NewsletterError::Validation {
                message: INVALID_TOKEN_MESSAGE.to_string(),
            });
        }

        let message = self.api.confirm_subscription(token).await?;
        self.store.clear()?;
        Ok(message)
    }
}
