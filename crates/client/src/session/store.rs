//! Durable session persistence.
//!
//! The session is one record under the fixed key set in
//! [`fonelli_core::keys`]. Stores treat `write` and `clear` as single
//! logical operations over the whole record: a reader sees either the full
//! key set or nothing.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use fonelli_core::Session;

/// Errors raised by a session store.
///
/// Faults are reported upward, never collapsed into an absent session.
/// Callers treat them as fatal to the current session and force a re-login.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Filesystem read/write failed.
    #[error("session storage I/O error: {0}")]
    Io(#[from] io::Error),

    /// The stored record could not be encoded or decoded.
    #[error("session record corrupt: {0}")]
    Record(#[from] serde_json::Error),
}

/// Durable key-value persistence of the authenticated session.
///
/// Not safe for concurrent writers; [`SessionManager`](crate::SessionManager)
/// serializes access.
pub trait SessionStore: Send {
    /// Persist the full session record, replacing any existing one.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the record cannot be written; the
    /// previous record stays intact in that case.
    fn write(&self, session: &Session) -> Result<(), StorageError>;

    /// Read the current session, or `None` when no session is stored.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the record exists but cannot be read.
    fn read(&self) -> Result<Option<Session>, StorageError>;

    /// Remove the whole session record. Succeeds when none exists.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when an existing record cannot be removed.
    fn clear(&self) -> Result<(), StorageError>;
}

/// File-backed session store.
///
/// The record is a single JSON document. Writes go to a temp file first and
/// are renamed into place, so a crashed write leaves the previous record
/// intact and readers never observe a partial key set.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Create a store persisting at `path`. Parent directories are created
    /// on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionStore for FileSessionStore {
    fn write(&self, session: &Session) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let record = serde_json::to_vec_pretty(session)?;

        // Atomic replace: write to temp file then rename
        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, record)?;
        fs::rename(&temp_path, &self.path)?;

        Ok(())
    }

    fn read(&self) -> Result<Option<Session>, StorageError> {
        let record = match fs::read(&self.path) {
            Ok(record) => record,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let session = serde_json::from_slice(&record)?;
        Ok(Some(session))
    }

    fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory session store for tests and ephemeral shells.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    fn slot(&self) -> std::sync::MutexGuard<'_, Option<Session>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStore for MemorySessionStore {
    fn write(&self, session: &Session) -> Result<(), StorageError> {
        *self.slot() = Some(session.clone());
        Ok(())
    }

    fn read(&self) -> Result<Option<Session>, StorageError> {
        Ok(self.slot().clone())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.slot() = None;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use fonelli_core::UserId;

    fn session(token: &str, name: &str) -> Session {
        Session {
            token: token.to_string(),
            user_id: UserId::new(1),
            user_role: "customer".to_string(),
            user_name: name.to_string(),
            user_email: format!("{name}@example.com"),
            user_image: None,
        }
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));

        store.write(&session("tok-1", "ana")).unwrap();
        let read = store.read().unwrap().unwrap();
        assert_eq!(read.token, "tok-1");
        assert_eq!(read.user_name, "ana");
    }

    #[test]
    fn test_file_store_reads_absent_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));

        assert!(store.read().unwrap().is_none());
    }

    #[test]
    fn test_file_store_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("fonelli").join("session.json"));

        store.write(&session("tok-1", "ana")).unwrap();
        assert!(store.read().unwrap().is_some());
    }

    #[test]
    fn test_file_store_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));

        store.clear().unwrap();

        store.write(&session("tok-1", "ana")).unwrap();
        store.clear().unwrap();
        store.clear().unwrap();
        assert!(store.read().unwrap().is_none());
    }

    #[test]
    fn test_file_store_write_replaces_whole_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));

        store.write(&session("tok-1", "ana")).unwrap();
        store.write(&session("tok-2", "bruno")).unwrap();

        let read = store.read().unwrap().unwrap();
        assert_eq!(read.token, "tok-2");
        assert_eq!(read.user_name, "bruno");
        assert_eq!(read.user_email, "bruno@example.com");
    }

    #[test]
    fn test_file_store_surfaces_corrupt_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, b"{not json").unwrap();

        let store = FileSessionStore::new(path);
        assert!(matches!(store.read(), Err(StorageError::Record(_))));
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemorySessionStore::default();
        assert!(store.read().unwrap().is_none());

        store.write(&session("tok-1", "ana")).unwrap();
        assert_eq!(store.read().unwrap().unwrap().token, "tok-1");

        store.clear().unwrap();
        assert!(store.read().unwrap().is_none());
    }
}
