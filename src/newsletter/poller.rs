//! Background polling of the pending subscription status.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::newsletter::service::NewsletterService;
use crate::resources::SubscriptionStatus;

/// Result of one status check.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusSnapshot {
    /// The pending email, if one was stored.
    pub email: Option<String>,
    /// Its status, when the lookup succeeded.
    pub status: Option<SubscriptionStatus>,
}

/// Checks the pending subscription status at a fixed interval.
///
/// A check also runs immediately on start and whenever
/// [`StatusPoller::notify_visible`] is called. Failed checks are logged and
/// otherwise ignored: the last good snapshot is kept, and the first check
/// publishes an empty-status snapshot so that the form leaves its loading
/// state.
///
/// The background task stops when the poller is stopped or dropped.
///
/// # Example
///
/// ```rust,ignore
/// use std::time::Duration;
/// use showcase_storefront::newsletter::StatusPoller;
///
/// let mut poller = StatusPoller::spawn(service, Duration::from_secs(2));
/// let mut updates = poller.subscribe();
/// updates.changed().await?;
/// form.apply_snapshot(&updates.borrow().clone().unwrap_or_default());
/// ```
#[derive(Debug)]
pub struct StatusPoller {
    handle: JoinHandle<()>,
    wake: Arc<Notify>,
    updates: watch::Receiver<Option<StatusSnapshot>>,
}

impl StatusPoller {
    /// Starts polling with `service` every `interval`.
    ///
    /// Must be called from within a tokio runtime. A zero interval is raised
    /// to one millisecond.
    #[must_use]
    pub fn spawn(service: NewsletterService, interval: Duration) -> Self {
        let interval = interval.max(Duration::from_millis(1));
        let wake = Arc::new(Notify::new());
        let (sender, updates) = watch::channel(None);

        let handle = tokio::spawn(run(service, interval, Arc::clone(&wake), sender));

        Self {
            handle,
            wake,
            updates,
        }
    }

    /// Triggers a check now (the page became visible again).
    pub fn notify_visible(&self) {
        self.wake.notify_one();
    }

    /// Returns the most recent snapshot; `None` before the first check.
    #[must_use]
    pub fn latest(&self) -> Option<StatusSnapshot> {
        self.updates.borrow().clone()
    }

    /// Returns a receiver notified on every published snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<StatusSnapshot>> {
        self.updates.clone()
    }

    /// Waits for the next published snapshot and returns it.
    ///
    /// Returns `None` when the poller has stopped.
    pub async fn next_snapshot(&mut self) -> Option<StatusSnapshot> {
        self.updates.changed().await.ok()?;
        self.updates.borrow_and_update().clone()
    }

    /// Returns `true` once the background task has ended.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stops polling.
    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for StatusPoller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn run(
    service: NewsletterService,
    interval: Duration,
    wake: Arc<Notify>,
    sender: watch::Sender<Option<StatusSnapshot>>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            () = wake.notified() => {}
        }

        match service.check_status().await {
            Ok(found) => {
                let snapshot = match found {
                    Some((email, status)) => StatusSnapshot {
                        email: Some(email),
                        status: Some(status),
                    },
                    None => StatusSnapshot::default(),
                };
                sender.send_replace(Some(snapshot));
            }
            Err(error) => {
                tracing::warn!(error = %error, "newsletter status check failed");
                if sender.borrow().is_none() {
                    let email = service.saved_email().ok().flatten();
                    sender.send_replace(Some(StatusSnapshot {
                        email,
                        status: None,
                    }));
                }
            }
        }

        if sender.is_closed() {
            break;
        }
    }
}
