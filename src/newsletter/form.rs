//! Newsletter signup form state.

use crate::newsletter::errors::NewsletterError;
use crate::newsletter::poller::StatusSnapshot;
use crate::newsletter::service::NewsletterService;
use crate::resources::SubscribeOutcome;

/// Where the form is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormState {
    /// Waiting for the first status check.
    #[default]
    Loading,
    /// The visitor is already a confirmed subscriber; nothing is rendered.
    Hidden,
    /// Editable.
    Idle,
    /// A subscription request is in flight.
    Submitting,
    /// Subscribed, waiting for the emailed confirmation.
    Success,
    /// The last submission failed; editable.
    Error,
}

/// Tone of a [`Notice`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    /// Positive feedback.
    Success,
    /// Something went wrong.
    Error,
}

/// A transient message (toast) for the visitor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    /// Tone.
    pub kind: NoticeKind,
    /// Short heading.
    pub title: String,
    /// Body text.
    pub description: String,
}

impl Notice {
    /// A success notice.
    #[must_use]
    pub fn success(description: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: "Succès!".to_string(),
            description: description.into(),
        }
    }

    /// An error notice.
    #[must_use]
    pub fn error(description: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: "Erreur".to_string(),
            description: description.into(),
        }
    }
}

/// The signup form.
///
/// Inputs are editable in [`FormState::Idle`] and [`FormState::Error`].
///
/// # Example
///
/// ```rust
/// use showcase_storefront::newsletter::{FormState, NewsletterForm, StatusSnapshot};
///
/// let mut form = NewsletterForm::new();
/// assert_eq!(form.state(), FormState::Loading);
///
/// form.apply_snapshot(&StatusSnapshot::default());
/// assert!(form.is_editable());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewsletterForm {
    state: FormState,
    email: String,
    consent: bool,
}

impl NewsletterForm {
    /// Creates a form waiting for its first status check.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> FormState {
        self.state
    }

    /// Returns the typed email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns whether consent is given.
    #[must_use]
    pub const fn consent(&self) -> bool {
        self.consent
    }

    /// Returns `true` when the inputs accept changes.
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        matches!(self.state, FormState::Idle | FormState::Error)
    }

    /// Returns `true` when the form should not be rendered.
    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        matches!(self.state, FormState::Hidden)
    }

    /// Updates the email; ignored unless editable.
    pub fn set_email(&mut self, email: impl Into<String>) {
        if self.is_editable() {
            self.email = email.into();
        }
    }

    /// Updates the consent box; ignored unless editable.
    pub fn set_consent(&mut self, consent: bool) {
        if self.is_editable() {
            self.consent = consent;
        }
    }

    /// Applies a status check result.
    ///
    /// A confirmed subscriber hides the form. A known but unconfirmed
    /// address shows the waiting-for-confirmation state with that address.
    /// Otherwise the form only leaves its loading state.
    pub fn apply_snapshot(&mut self, snapshot: &StatusSnapshot) {
        if matches!(self.state, FormState::Submitting) {
            return;
        }

        match (&snapshot.email, snapshot.status) {
            (Some(email), Some(status)) if status.is_confirmed_subscriber() => {
                self.email.clone_from(email);
                self.state = FormState::Hidden;
            }
            (Some(email), Some(status)) if status.is_pending_confirmation() => {
                self.email.clone_from(email);
                self.state = FormState::Success;
            }
            _ => {
                if matches!(self.state, FormState::Loading) {
                    self.state = FormState::Idle;
                }
            }
        }
    }

    /// Submits the form through `service`.
    ///
    /// Returns the notice to show. Submitting while not editable does
    /// nothing and returns `None`.
    pub async fn submit(&mut self, service: &NewsletterService) -> Option<Notice> {
        if !self.is_editable() {
            return None;
        }
        let previous = self.state;
        self.state = FormState::Submitting;

        let result = service.subscribe(&self.email, self.consent).await;
        Some(self.finish_submit(previous, result))
    }

    fn finish_submit(
        &mut self,
        previous: FormState,
        result: Result<SubscribeOutcome, NewsletterError>,
    ) -> Notice {
        match result {
            Ok(outcome) if outcome.success => {
                self.state = FormState::Success;
                self.consent = false;
                Notice::success(outcome.message)
            }
            Ok(outcome) => {
                self.state = FormState::Error;
                Notice::error(outcome.message)
            }
            Err(error @ NewsletterError::Validation { .. }) => {
                self.state = previous;
                Notice::error(error.user_message())
            }
            Err(error) => {
                tracing::warn!(error = %error, "newsletter subscription failed");
                self.state = FormState::Error;
                Notice::error(error.user_message())
            }
        }
    }
}
