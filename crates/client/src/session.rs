//! File-backed session store.
//!
//! The browser storefront kept the bearer token and a cached copy of the
//! user in local storage; this is the same cache as a JSON file. The stored
//! user is only ever a snapshot of the last successful auth response - it is
//! invalidated wholesale on logout and never treated as authoritative.
//!
//! Restore happens synchronously at construction. A corrupt session file is
//! treated as "no session" and deleted on the spot; it is never surfaced to
//! the caller as an error.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use easy_gadget_core::UserRole;

use crate::types::User;

/// Errors that can occur when persisting the session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading or writing the session file failed.
    #[error("session file I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing the session failed.
    #[error("session serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// On-disk session shape.
#[derive(Serialize, Deserialize)]
struct SessionFile {
    token: String,
    user: User,
}

/// In-memory session state.
struct Session {
    token: SecretString,
    user: User,
}

/// Persistent session store shared between the API client and services.
///
/// Cheap to clone; all clones share the same state.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<SessionStoreInner>,
}

struct SessionStoreInner {
    path: PathBuf,
    state: RwLock<Option<Session>>,
}

impl SessionStore {
    /// Open the session store at `path`, restoring any persisted session.
    ///
    /// A missing file means no session. A file that exists but fails to
    /// parse is deleted and also means no session.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let state = restore(&path);

        Self {
            inner: Arc::new(SessionStoreInner {
                path,
                state: RwLock::new(state),
            }),
        }
    }

    /// Persist a new session (token + user) to memory and disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the session file cannot be written. The in-memory
    /// session is updated regardless, so the current process stays logged in.
    pub fn save(&self, token: &str, user: &User) -> Result<(), SessionError> {
        {
            let mut state = self.write_state();
            *state = Some(Session {
                token: SecretString::from(token.to_owned()),
                user: user.clone(),
            });
        }

        let file = SessionFile {
            token: token.to_owned(),
            user: user.clone(),
        };
        let json = serde_json::to_string_pretty(&file)?;

        if let Some(parent) = self.inner.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.inner.path, json)?;
        Ok(())
    }

    /// The bearer token, if a session exists.
    #[must_use]
    pub fn token(&self) -> Option<SecretString> {
        self.read_state()
            .as_ref()
            .map(|session| session.token.clone())
    }

    /// The cached user from the last successful auth response, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.read_state().as_ref().map(|session| session.user.clone())
    }

    /// Whether a bearer token is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read_state().is_some()
    }

    /// Whether the cached user has the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.read_state()
            .as_ref()
            .is_some_and(|session| session.user.role == UserRole::Admin)
    }

    /// Drop the session from memory and disk.
    ///
    /// Removal of the file is best-effort: a failure is logged and the
    /// in-memory session is cleared regardless.
    pub fn clear(&self) {
        {
            let mut state = self.write_state();
            *state = None;
        }

        if let Err(e) = std::fs::remove_file(&self.inner.path)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            tracing::warn!(path = %self.inner.path.display(), "failed to remove session file: {e}");
        }
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, Option<Session>> {
        // A poisoned lock means a writer panicked mid-update; the session
        // data itself is a plain swap and safe to read.
        self.inner
            .state
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, Option<Session>> {
        self.inner
            .state
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("path", &self.inner.path)
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

/// Read and parse the session file, deleting it if corrupt.
fn restore(path: &Path) -> Option<Session> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            tracing::warn!(path = %path.display(), "failed to read session file: {e}");
            return None;
        }
    };

    match serde_json::from_str::<SessionFile>(&contents) {
        Ok(file) => Some(Session {
            token: SecretString::from(file.token),
            user: file.user,
        }),
        Err(e) => {
            tracing::warn!(path = %path.display(), "corrupt session file, discarding: {e}");
            if let Err(e) = std::fs::remove_file(path) {
                tracing::warn!(path = %path.display(), "failed to remove corrupt session file: {e}");
            }
            None
        }
    }
}

/// Expose the token for attaching to a request header.
pub(crate) fn bearer_value(token: &SecretString) -> String {
    format!("Bearer {}", token.expose_secret())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use easy_gadget_core::UserId;

    fn test_user(role: UserRole) -> User {
        User {
            id: UserId::new("u1"),
            email: "x@y.com".to_string(),
            name: "Test".to_string(),
            role,
            phone: None,
            address: None,
        }
    }

    #[test]
    fn test_missing_file_means_no_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path().join("session.json"));
        assert!(!store.is_authenticated());
        assert!(store.current_user().is_none());
        assert!(store.token().is_none());
    }

    #[test]
    fn test_save_and_restore() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = SessionStore::open(&path);
        store.save("tok-123", &test_user(UserRole::Customer)).unwrap();
        assert!(store.is_authenticated());

        // A fresh store restores from disk
        let restored = SessionStore::open(&path);
        assert!(restored.is_authenticated());
        assert_eq!(restored.current_user().unwrap().email, "x@y.com");
        assert_eq!(restored.token().unwrap().expose_secret(), "tok-123");
    }

    #[test]
    fn test_corrupt_file_deleted_and_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = SessionStore::open(&path);
        assert!(!store.is_authenticated());
        assert!(store.current_user().is_none());
        // The corrupt entry is removed, not left to fail again
        assert!(!path.exists());
    }

    #[test]
    fn test_clear_removes_file_and_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = SessionStore::open(&path);
        store.save("tok", &test_user(UserRole::Admin)).unwrap();
        assert!(path.exists());
        assert!(store.is_admin());

        store.clear();
        assert!(!store.is_authenticated());
        assert!(!store.is_admin());
        assert!(!path.exists());
    }

    #[test]
    fn test_is_admin_requires_admin_role() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path().join("session.json"));
        store.save("tok", &test_user(UserRole::Customer)).unwrap();
        assert!(store.is_authenticated());
        assert!(!store.is_admin());
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("dirs").join("session.json");

        let store = SessionStore::open(&path);
        store.save("tok", &test_user(UserRole::Customer)).unwrap();
        assert!(path.exists());
    }
}
