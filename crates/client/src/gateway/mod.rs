//! Auth gateway.
//!
//! The only place credentials are checked. Session holder and route guard
//! never see passwords, so swapping this implementation for a real
//! credential scheme touches nothing else.
//!
//! - [`StorefrontClient`] talks to the storefront REST API.
//! - [`FixtureGateway`] checks credentials against a bundled list, as the
//!   fixture-only front ends do.

mod fixture;
mod http;

pub use fixture::{Credential, FixtureGateway};
pub use http::StorefrontClient;

use async_trait::async_trait;
use bookstore_core::Identity;

use crate::error::ClientError;
use crate::session::Marker;

/// Prefix of every marker the demo gateways issue.
pub const MARKER_PREFIX: &str = "demo-token-";

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authenticated {
    pub identity: Identity,
    pub marker: Marker,
}

/// Validates credentials and resolves markers.
///
/// Email comparison is exact and case-sensitive; the first matching account
/// wins.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Check an email/password pair.
    ///
    /// # Errors
    ///
    /// `AuthError::InvalidCredentials` for an unknown email or wrong
    /// password, `AuthError::MissingFields` for blank input.
    async fn login(&self, email: &str, password: &str) -> Result<Authenticated, ClientError>;

    /// Create an account. Does not sign the new account in.
    ///
    /// # Errors
    ///
    /// `AuthError::MissingFields` for blank input, `AuthError::EmailTaken`
    /// for an email that already has an account, `ClientError::Validation`
    /// for a malformed email.
    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Identity, ClientError>;

    /// Tell the gateway the marker is no longer in use.
    ///
    /// # Errors
    ///
    /// Transport failures only.
    async fn logout(&self, marker: Option<&Marker>) -> Result<(), ClientError>;

    /// Resolve a marker to the identity it was issued for.
    ///
    /// # Errors
    ///
    /// `AuthError::SessionRequired` for an empty marker,
    /// `ClientError::NotFound` if no account matches.
    async fn current_user(&self, marker: &Marker) -> Result<Identity, ClientError>;
}
