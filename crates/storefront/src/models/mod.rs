//! Domain models for the storefront.
//!
//! Server-side records that never cross the wire as-is: users carry their
//! password, and book payloads are partial until validated.

pub mod book;
pub mod user;

pub use book::{BookPatch, NewBook};
pub use user::User;
