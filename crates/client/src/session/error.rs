//! Authentication error types.

use thiserror::Error;

use crate::session::store::StorageError;

/// Errors that can occur during login and logout.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The backend rejected the email/password pair.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The backend answered with an unexpected status.
    #[error("login rejected with status {0}")]
    Rejected(reqwest::StatusCode),

    /// Network or timeout failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Local session persistence fault; the login did not take effect.
    #[error("session storage error: {0}")]
    Storage(#[from] StorageError),
}
