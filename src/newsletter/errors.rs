//! Error type for the newsletter flow.

use thiserror::Error;

use crate::api::ApiError;
use crate::clients::HttpError;
use crate::newsletter::storage::StorageError;

/// Shown when an unexpected failure interrupts a subscription.
pub const GENERIC_FAILURE_MESSAGE: &str = "Une erreur est survenue. Veuillez réessayer.";

/// Shown when a confirmation fails without a backend message.
pub const CONFIRM_FAILURE_MESSAGE: &str = "Erreur lors de la confirmation";

/// Error type for [`NewsletterService`](crate::newsletter::NewsletterService).
///
/// # Example
///
/// ```rust
/// use showcase_storefront::newsletter::NewsletterError;
///
/// let error = NewsletterError::Validation {
///     message: "Token invalide".to_string(),
/// };
/// assert_eq!(error.user_message(), "Token invalide");
/// ```
#[derive(Debug, Error)]
pub enum NewsletterError {
    /// Input was rejected locally; no request was sent.
    #[error("{message}")]
    Validation {
        /// Message for the visitor.
        message: String,
    },

    /// The backend call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The pending email could not be read or written.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl NewsletterError {
    /// Returns a message suitable for the visitor.
    ///
    /// Validation messages and backend 4xx details are passed through;
    /// anything else becomes [`GENERIC_FAILURE_MESSAGE`].
    #[must_use]
    pub fn user_message(&self) -> String {
        self.user_message_or(GENERIC_FAILURE_MESSAGE)
    }

    /// Like [`NewsletterError::user_message`] with a custom fallback.
    #[must_use]
    pub fn user_message_or(&self, fallback: &str) -> String {
        match self {
            Self::Validation { message } => message.clone(),
            Self::Api(ApiError::Http(HttpError::Response(error))) if error.is_client_error() => {
                error.detail()
            }
            Self::Api(_) | Self::Storage(_) => fallback.to_string(),
        }
    }
}
