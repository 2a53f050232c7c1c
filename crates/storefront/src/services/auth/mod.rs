//! Authentication service.
//!
//! Checks plaintext credentials against the user repository and issues
//! markers. Email comparison is exact and the first matching account wins.

mod error;

pub use error::AuthError;

use bookstore_core::{Email, Identity};

use crate::db::{RepositoryError, TokenRepository, UserRepository};

/// Authentication service.
pub struct AuthService<'a> {
    users: &'a UserRepository,
    tokens: &'a TokenRepository,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(users: &'a UserRepository, tokens: &'a TokenRepository) -> Self {
        Self { users, tokens }
    }

    /// Login with email and password, issuing a marker.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingCredentials` if either field is blank and
    /// `AuthError::InvalidCredentials` if the email/password is wrong.
    pub async fn login(&self, email: &str, password: &str) -> Result<(Identity, String), AuthError> {
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let user = self
            .users
            .find_by_email(email)
            .await
            .filter(|u| u.password == password)
            .ok_or(AuthError::InvalidCredentials)?;

        let token = self.tokens.issue(user.id).await;
        Ok((user.identity(), token))
    }

    /// Register a new account with role `user`. Does not issue a marker.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingRegistrationFields` if a field is blank,
    /// `AuthError::InvalidEmail` if the email is malformed and
    /// `AuthError::UserAlreadyExists` if the email is taken.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Identity, AuthError> {
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingRegistrationFields);
        }
        let email = Email::parse(email)?;

        let user = self
            .users
            .create(name, email, password)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        Ok(user.identity())
    }

    /// Forget a marker, if one was presented.
    pub async fn logout(&self, token: Option<&str>) {
        if let Some(token) = token {
            self.tokens.revoke(token).await;
        }
    }

    /// The account a marker was issued to.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AuthenticationRequired` for an empty marker and
    /// `AuthError::UserNotFound` if it resolves to no account.
    pub async fn current_user(&self, token: &str) -> Result<Identity, AuthError> {
        if token.is_empty() {
            return Err(AuthError::AuthenticationRequired);
        }

        let id = self
            .tokens
            .resolve(token)
            .await
            .ok_or(AuthError::UserNotFound)?;
        let user = self.users.get(id).await.ok_or(AuthError::UserNotFound)?;
        Ok(user.identity())
    }
}
