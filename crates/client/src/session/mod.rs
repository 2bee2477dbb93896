//! Session lifecycle: login, logout, and authentication state.
//!
//! [`SessionManager`] owns the one [`SessionStore`] and is the only writer
//! to it. Login and logout take the same lock, so a logout can never
//! interleave with a login's clear-then-write and leave a partial record.

mod error;
pub mod store;

pub use error::AuthError;

use std::sync::{Mutex, MutexGuard, PoisonError};

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;

use fonelli_core::{Session, UserId};

use crate::config::ClientConfig;
use store::{FileSessionStore, SessionStore, StorageError};

/// Login credentials as entered on the login screen.
#[derive(Clone)]
pub struct Credentials {
    /// Account email address.
    pub email: String,
    /// Password, kept out of logs and debug output.
    pub password: SecretString,
}

impl Credentials {
    /// Build credentials from raw input.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// `POST /login` response body.
#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
    user: LoginUser,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginUser {
    id: UserId,
    role: String,
    name: String,
    email: String,
    #[serde(default)]
    image_url: Option<String>,
}

/// Orchestrates login and logout against the backend and the session store.
///
/// Injected into every component needing authorization context; there is no
/// ambient session global.
pub struct SessionManager {
    http: reqwest::Client,
    base: String,
    store: Mutex<Box<dyn SessionStore>>,
}

impl SessionManager {
    /// Create a manager over the given store.
    #[must_use]
    pub fn new(config: &ClientConfig, store: impl SessionStore + 'static) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: config.endpoint_base(),
            store: Mutex::new(Box::new(store)),
        }
    }

    /// Create a manager backed by the configured on-disk session record.
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config, FileSessionStore::new(config.session_file.clone()))
    }

    fn store(&self) -> MutexGuard<'_, Box<dyn SessionStore>> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Authenticate against the backend and persist the resulting session.
    ///
    /// The full session record is written as one unit; a pre-existing
    /// session is fully replaced.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the backend rejects the
    /// email/password pair, `AuthError::Transport` on network failure, and
    /// `AuthError::Storage` if the record cannot be persisted (in which case
    /// the caller is not logged in).
    pub async fn login(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        let body = json!({
            "email": credentials.email,
            "password": credentials.password.expose_secret(),
        });

        let response = self
            .http
            .post(format!("{}/login", self.base))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AuthError::InvalidCredentials);
        }
        if !status.is_success() {
            return Err(AuthError::Rejected(status));
        }

        let login: LoginResponse = response.json().await?;
        let session = Session {
            token: login.token,
            user_id: login.user.id,
            user_role: login.user.role,
            user_name: login.user.name,
            user_email: login.user.email,
            user_image: login.user.image_url,
        };

        self.store().write(&session)?;
        tracing::debug!(user = %session.user_id, "session established");

        Ok(session)
    }

    /// Clear the session record. Succeeds when no session exists.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when an existing record cannot be removed.
    pub fn logout(&self) -> Result<(), StorageError> {
        self.store().clear()?;
        tracing::debug!("session cleared");
        Ok(())
    }

    /// True iff a session with a non-empty token is stored.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] on a storage fault; an unreadable record is
    /// reported, never treated as "not logged in".
    pub fn is_authenticated(&self) -> Result<bool, StorageError> {
        Ok(self
            .store()
            .read()?
            .is_some_and(|session| session.is_authenticated()))
    }

    /// The stored session, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] on a storage fault.
    pub fn current_session(&self) -> Result<Option<Session>, StorageError> {
        self.store().read()
    }

    /// The current token, or `None` when unauthenticated.
    pub(crate) fn token(&self) -> Result<Option<String>, StorageError> {
        Ok(self
            .store()
            .read()?
            .filter(Session::is_authenticated)
            .map(|session| session.token))
    }
}
