//! Client error taxonomy.
//!
//! Every failure is converted into one of these at the call site, before it
//! reaches a view. Nothing here is retried automatically.

use thiserror::Error;

use crate::storage::StorageError;

/// Authentication failures a form can show and recover from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Email unknown or password wrong. Deliberately indistinguishable.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Registration with an email that already has an account.
    #[error("an account with this email already exists")]
    EmailTaken,

    /// A required form field was left blank.
    #[error("all fields are required")]
    MissingFields,

    /// A restricted endpoint was called without a marker.
    #[error("sign in required")]
    SessionRequired,
}

/// Errors surfaced to client views.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Missing or malformed input. Shown inline, never fatal.
    #[error("validation error: {0}")]
    Validation(String),

    /// Authentication failed. Shown as a dismissible message.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A book or order does not exist. Shown as a not-found page.
    #[error("not found: {0}")]
    NotFound(String),

    /// The durable store rejected a write.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The request never produced a usable response.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a status this client does not expect.
    #[error("unexpected response ({status}): {message}")]
    Unexpected {
        /// HTTP status code.
        status: u16,
        /// Server-provided message, if any.
        message: String,
    },
}

impl ClientError {
    /// Whether this error should be shown as a full not-found page.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
