//! Persistence of the email awaiting confirmation.

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use thiserror::Error;

/// Key under which the pending email is stored.
pub const PENDING_EMAIL_KEY: &str = "newsletter_email";

/// Error raised by a [`PendingEmailStore`].
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing file could not be read or written.
    #[error("Failed to access the newsletter store: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file does not hold a JSON object of strings.
    #[error("Newsletter store is corrupted: {0}")]
    Corrupted(#[from] serde_json::Error),
}

/// Storage for the single email address awaiting confirmation.
///
/// Implementations must be safe to share between the form and the status
/// poller.
pub trait PendingEmailStore: Debug + Send + Sync {
    /// Returns the stored email, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the store cannot be read.
    fn load(&self) -> Result<Option<String>, StorageError>;

    /// Stores `email`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the store cannot be written.
    fn save(&self, email: &str) -> Result<(), StorageError>;

    /// Removes the stored email.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the store cannot be written.
    fn clear(&self) -> Result<(), StorageError>;
}

/// In-process store, lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryEmailStore {
    email: Mutex<Option<String>>,
}

impl MemoryEmailStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding `email`.
    #[must_use]
    pub fn with_email(email: impl Into<String>) -> Self {
        Self {
            email: Mutex::new(Some(email.into())),
        }
    }
}

impl PendingEmailStore for MemoryEmailStore {
    fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self
            .email
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, email: &str) -> Result<(), StorageError> {
        *self.email.lock().unwrap_or_else(PoisonError::into_inner) = Some(email.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.email.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// Store backed by a JSON object file of string values.
///
/// Other keys present in the file are preserved. A missing file reads as
/// empty and is created on the first write.
///
/// # Example
///
/// ```rust,ignore
/// use showcase_storefront::newsletter::{FileEmailStore, PendingEmailStore};
///
/// let store = FileEmailStore::new("/var/lib/storefront/local-storage.json");
/// store.save("visiteur@example.com")?;
/// assert_eq!(store.load()?.as_deref(), Some("visiteur@example.com"));
/// ```
#[derive(Debug)]
pub struct FileEmailStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileEmailStore {
    /// Creates a store writing to `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(error) => Err(error.into()),
        }
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl PendingEmailStore for FileEmailStore {
    fn load(&self) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self
            .read_entries()?
            .remove(PENDING_EMAIL_KEY)
            .filter(|email| !email.is_empty()))
    }

    fn save(&self, email: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.read_entries()?;
        entries.insert(PENDING_EMAIL_KEY.to_string(), email.to_string());
        self.write_entries(&entries)
    }

    fn clear(&self) -> Result<(), StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.read_entries()?;
        if entries.remove(PENDING_EMAIL_KEY).is_some() {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryEmailStore::new();
        assert_eq!(store.load().unwrap(), None);

        store.save("a@b.co").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("a@b.co"));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileEmailStore::new(dir.path().join("absent.json"));
        assert_eq!(store.load().unwrap(), None);
        store.clear().unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn test_file_store_preserves_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{"theme": "dark"}"#).unwrap();

        let store = FileEmailStore::new(&path);
        store.save("a@b.co").unwrap();
        store.clear().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let entries: BTreeMap<String, String> = serde_json::from_str(&content).unwrap();
        assert_eq!(entries.get("theme").map(String::as_str), Some("dark"));
        assert!(!entries.contains_key(PENDING_EMAIL_KEY));
    }

    #[test]
    fn test_file_store_reports_corruption() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileEmailStore::new(path);
        assert!(matches!(store.load(), Err(StorageError::Corrupted(_))));
    }
}
