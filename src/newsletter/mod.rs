//! Newsletter subscription flow.
//!
//! A visitor subscribes through the [`NewsletterForm`]; the address is kept
//! in a [`PendingEmailStore`] under the `newsletter_email` key until the
//! emailed link is followed. Meanwhile a [`StatusPoller`] watches the
//! backend so the form can hide itself once the address is confirmed.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use showcase_storefront::newsletter::{
//!     FileEmailStore, NewsletterForm, NewsletterService, StatusPoller,
//! };
//!
//! let store = Arc::new(FileEmailStore::new("storage.json"));
//! let service = NewsletterService::from_config(api, store, &config);
//! let mut poller = StatusPoller::spawn(service.clone(), config.newsletter_poll_interval());
//!
//! let mut form = NewsletterForm::new();
//! if let Some(snapshot) = poller.next_snapshot().await {
//!     form.apply_snapshot(&snapshot);
//! }
//! form.set_email("visiteur@example.com");
//! form.set_consent(true);
//! let notice = form.submit(&service).await;
//! ```

mod errors;
mod form;
mod poller;
mod service;
mod storage;

pub use errors::{NewsletterError, CONFIRM_FAILURE_MESSAGE, GENERIC_FAILURE_MESSAGE};
pub use form::{FormState, NewsletterForm, Notice, NoticeKind};
pub use poller::{StatusPoller, StatusSnapshot};
pub use service::{NewsletterService, INVALID_TOKEN_MESSAGE, MISSING_FIELDS_MESSAGE};
pub use storage::{
    FileEmailStore, MemoryEmailStore, PendingEmailStore, StorageError, PENDING_EMAIL_KEY,
};
