//! In-memory repositories standing in for a database.
//!
//! Each repository is a cheaply cloneable handle to a collection behind a
//! `tokio::sync::RwLock`. Every method takes the lock for one straight-line
//! operation, so callers never observe a half-applied change.
//!
//! # Collections
//!
//! - `users` - Accounts with plaintext passwords, searched in insertion order
//! - `books` - The catalog
//! - `orders` - Placed orders for tracking
//! - `tokens` - Issued markers and the account each belongs to
//!
//! Data lives for the lifetime of the process. [`seed`] holds the demo
//! records loaded at start-up.

pub mod books;
pub mod orders;
pub mod seed;
pub mod tokens;
pub mod users;

use thiserror::Error;

pub use books::BookRepository;
pub use orders::OrderRepository;
pub use tokens::TokenRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// A record is missing required fields.
    #[error("invalid record: {0}")]
    Invalid(String),

    /// The collection outgrew its id space.
    #[error("id space exhausted")]
    IdsExhausted,
}

/// Next sequential id for a collection of `len` records.
///
/// Ids are `len + 1`, so after a deletion a new record may reuse the id of
/// an existing one.
pub(crate) fn next_id(len: usize) -> Result<u32, RepositoryError> {
    u32::try_from(len)
        .ok()
        .and_then(|n| n.checked_add(1))
        .ok_or(RepositoryError::IdsExhausted)
}
