//! Newsletter request and response records.

use serde::{Deserialize, Serialize};

/// Body of a subscription request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscribeRequest {
    /// Subscriber email.
    pub email: String,
    /// Where the form was shown (e.g. `page`, `footer`).
    pub source: String,
}

/// Result of a subscription attempt that reached the backend.
///
/// A rejected subscription (duplicate or invalid email) is an outcome with
/// `success == false`, not an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubscribeOutcome {
    /// Whether the backend accepted the subscription.
    pub success: bool,
    /// Message to show to the visitor.
    pub message: String,
}

/// Subscription status of an email address.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionStatus {
    /// The address is known to the backend.
    #[serde(default)]
    pub exists: bool,
    /// The subscription is active.
    #[serde(default)]
    pub subscribed: bool,
    /// The address has been confirmed through the emailed link.
    #[serde(default)]
    pub confirmed: bool,
}

impl SubscriptionStatus {
    /// Returns `true` for an active, confirmed subscription.
    #[must_use]
    pub const fn is_confirmed_subscriber(&self) -> bool {
        self.confirmed && self.subscribed
    }

    /// Returns `true` when the backend knows the address but it is unconfirmed.
    #[must_use]
    pub const fn is_pending_confirmation(&self) -> bool {
        self.exists && !self.confirmed
    }
}

/// Body of a confirmation request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmRequest {
    /// Token from the confirmation email.
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_decodes_with_missing_fields() {
        let status: SubscriptionStatus = serde_json::from_str(r#"{"exists": true}"#).unwrap();
        assert!(status.is_pending_confirmation());
        assert!(!status.is_confirmed_subscriber());
    }

    #[test]
    fn test_confirmed_subscriber() {
        let status = SubscriptionStatus {
            exists: true,
            subscribed: true,
            confirmed: true,
        };
        assert!(status.is_confirmed_subscriber());
        assert!(!status.is_pending_confirmation());
    }
}
