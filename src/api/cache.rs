//! Key-addressed response cache with per-resource staleness.
//!
//! Entries are stored as raw JSON together with the instant they were
//! fetched. A lookup only returns an entry younger than the stale time the
//! caller asks for, so one store can serve resources with different
//! freshness requirements.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use tokio::time::Instant;

const MINUTE: u64 = 60;

/// Maximum number of entries a [`QueryCache`] keeps.
pub const MAX_CACHE_ENTRIES: usize = 256;

/// How long each resource stays fresh after a successful fetch.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use showcase_storefront::api::CachePolicy;
///
/// let policy = CachePolicy {
///     products: Duration::from_secs(30),
///     ..CachePolicy::default()
/// };
/// assert_eq!(policy.categories, Duration::from_secs(30 * 60));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CachePolicy {
    /// Category listings.
    pub categories: Duration,
    /// Main (level 0) categories.
    pub main_categories: Duration,
    /// A single category.
    pub category: Duration,
    /// Products of a single category.
    pub category_products: Duration,
    /// Product listings and product details.
    pub products: Duration,
    /// Services.
    pub services: Duration,
    /// Site settings.
    pub site_settings: Duration,
}

impl CachePolicy {
    /// A policy under which nothing is ever served from the cache.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            categories: Duration::ZERO,
            main_categories: Duration::ZERO,
            category: Duration::ZERO,
            category_products: Duration::ZERO,
            products: Duration::ZERO,
            services: Duration::ZERO,
            site_settings: Duration::ZERO,
        }
    }
}

impl CachePolicy {
    /// The longest stale time of any resource.
    ///
    /// Entries older than this can never be served again.
    #[must_use]
    pub fn max_stale_time(&self) -> Duration {
        [
            self.categories,
            self.main_categories,
            self.category,
            self.category_products,
            self.products,
            self.services,
            self.site_settings,
        ]
        .into_iter()
        .max()
        .unwrap_or(Duration::ZERO)
    }
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            categories: Duration::from_secs(30 * MINUTE),
            main_categories: Duration::from_secs(60 * MINUTE),
            category: Duration::from_secs(30 * MINUTE),
            category_products: Duration::from_secs(10 * MINUTE),
            products: Duration::from_secs(5 * MINUTE),
            services: Duration::from_secs(60 * MINUTE),
            site_settings: Duration::from_secs(60 * MINUTE),
        }
    }
}

#[derive(Debug)]
struct CacheEntry {
    fetched_at: Instant,
    value: serde_json::Value,
}

/// Thread-safe store of decoded-able JSON responses keyed by request.
///
/// Every insert drops entries older than `max_age` and, past
/// [`MAX_CACHE_ENTRIES`], the oldest remaining ones.
///
/// The lock is never held across an `.await`.
#[derive(Debug)]
pub struct QueryCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    max_age: Duration,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::with_max_age(CachePolicy::default().max_stale_time())
    }
}

impl QueryCache {
    /// Creates an empty cache sized for the default [`CachePolicy`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty cache that forgets entries older than `max_age`.
    #[must_use]
    pub fn with_max_age(max_age: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_age,
        }
    }

    /// Returns the cached value for `key` if it is younger than `stale_time`.
    #[must_use]
    pub fn get_fresh(&self, key: &str, stale_time: Duration) -> Option<serde_json::Value> {
        if stale_time.is_zero() {
            return None;
        }
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(key)
            .filter(|entry| entry.fetched_at.elapsed() < stale_time)
            .map(|entry| entry.value.clone())
    }

    /// Stores `value` under `key`, stamped with the current instant.
    pub fn insert(&self, key: impl Into<String>, value: serde_json::Value) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.retain(|_, entry| entry.fetched_at.elapsed() < self.max_age);
        entries.insert(
            key.into(),
            CacheEntry {
                fetched_at: Instant::now(),
                value,
            },
        );

        while entries.len() > MAX_CACHE_ENTRIES {
            let oldest = entries
                .iter()
                .min_by_key(|(_, entry)| entry.fetched_at)
                .map(|(key, _)| key.clone());
            match oldest {
                Some(key) => {
                    entries.remove(&key);
                }
                None => break,
            }
        }
    }

    /// Removes every entry whose key starts with `prefix`.
    ///
    /// Returns the number of removed entries.
    pub fn invalidate(&self, prefix: &str) -> usize {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        before - entries.len()
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Returns the number of stored entries, fresh or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` when nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
