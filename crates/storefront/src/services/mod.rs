//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `auth` - Credential checks, registration and marker resolution
pub mod auth;
