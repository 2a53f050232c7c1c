//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Login without an email or password.
    #[error("email and password are required")]
    MissingCredentials,

    /// Registration without a name, email or password.
    #[error("name, email and password are required")]
    MissingRegistrationFields,

    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] bookstore_core::EmailError),

    /// Invalid credentials (wrong password or user not found).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// User already exists.
    #[error("user already exists")]
    UserAlreadyExists,

    /// No marker was presented.
    #[error("authentication required")]
    AuthenticationRequired,

    /// The marker does not resolve to an account.
    #[error("user not found")]
    UserNotFound,

    /// Repository error.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}
