//! Gateway backed by a bundled credential list.

use std::collections::HashMap;

use async_trait::async_trait;
use bookstore_core::{Email, Identity, UserId};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{AuthGateway, Authenticated, MARKER_PREFIX};
use crate::error::{AuthError, ClientError};
use crate::session::Marker;

/// A stored account: public identity plus its plaintext password.
#[derive(Debug, Clone)]
pub struct Credential {
    pub identity: Identity,
    pub password: String,
}

#[derive(Default)]
struct Inner {
    accounts: Vec<Credential>,
    markers: HashMap<String, UserId>,
}

/// In-process credential check, no network.
pub struct FixtureGateway {
    inner: Mutex<Inner>,
}

impl FixtureGateway {
    /// Build a gateway over the given accounts, searched in order.
    #[must_use]
    pub fn new(accounts: Vec<Credential>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                accounts,
                markers: HashMap::new(),
            }),
        }
    }
}

#[async_trait]
impl AuthGateway for FixtureGateway {
    async fn login(&self, email: &str, password: &str) -> Result<Authenticated, ClientError> {
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields.into());
        }

        let mut inner = self.inner.lock().await;
        let identity = inner
            .accounts
            .iter()
            .find(|c| c.identity.email.matches(email))
            .filter(|c| c.password == password)
            .map(|c| c.identity.clone())
            .ok_or(AuthError::InvalidCredentials)?;

        let marker = format!("{MARKER_PREFIX}{}", Uuid::new_v4());
        inner.markers.insert(marker.clone(), identity.id);

        Ok(Authenticated {
            identity,
            marker: Marker::new(marker),
        })
    }

    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Identity, ClientError> {
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields.into());
        }
        let email = Email::parse(email).map_err(|e| ClientError::Validation(e.to_string()))?;

        let mut inner = self.inner.lock().await;
        if inner.accounts.iter().any(|c| c.identity.email == email) {
            return Err(AuthError::EmailTaken.into());
        }

        let next = u32::try_from(inner.accounts.len())
            .map_err(|_| ClientError::Validation("too many accounts".to_owned()))?
            + 1;
        let identity = Identity::new(UserId::new(next), name, email);
        inner.accounts.push(Credential {
            identity: identity.clone(),
            password: password.to_owned(),
        });
        Ok(identity)
    }

    async fn logout(&self, marker: Option<&Marker>) -> Result<(), ClientError> {
        if let Some(marker) = marker {
            self.inner.lock().await.markers.remove(marker.expose());
        }
        Ok(())
    }

    async fn current_user(&self, marker: &Marker) -> Result<Identity, ClientError> {
        if marker.is_empty() {
            return Err(AuthError::SessionRequired.into());
        }

        let inner = self.inner.lock().await;
        inner
            .markers
            .get(marker.expose())
            .and_then(|id| inner.accounts.iter().find(|c| c.identity.id == *id))
            .map(|c| c.identity.clone())
            .ok_or_else(|| ClientError::NotFound("user".to_owned()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use bookstore_core::Role;

    fn accounts() -> Vec<Credential> {
        let account = |id, name: &str, email: &str, password: &str, role| Credential {
            identity: Identity::new(UserId::new(id), name, Email::parse(email).unwrap())
                .with_role(role),
            password: password.to_owned(),
        };
        vec![
            account(1, "John Doe", "user@example.com", "password", Role::User),
            account(2, "John Smith", "john@example.com", "password123", Role::User),
            account(3, "Jane Doe", "jane@example.com", "password123", Role::Admin),
            // Shadowed by the first jane@example.com entry.
            account(4, "Jane Again", "jane@example.com", "other", Role::User),
        ]
    }

    #[tokio::test]
    async fn test_every_valid_pair_logs_in() {
        let gateway = FixtureGateway::new(accounts());
        for credential in accounts().into_iter().take(3) {
            let auth = gateway
                .login(credential.identity.email.as_str(), &credential.password)
                .await
                .unwrap();
            assert_eq!(auth.identity, credential.identity);
            assert!(auth.marker.expose().starts_with(MARKER_PREFIX));
        }
    }

    #[tokio::test]
    async fn test_invalid_pairs_are_rejected() {
        let gateway = FixtureGateway::new(accounts());
        for (email, password) in [
            ("user@example.com", "wrong"),
            ("nobody@example.com", "password"),
            ("USER@example.com", "password"),
            ("user@example.com ", "password"),
        ] {
            let err = gateway.login(email, password).await.unwrap_err();
            assert!(
                matches!(err, ClientError::Auth(AuthError::InvalidCredentials)),
                "{email}"
            );
        }
    }

    #[tokio::test]
    async fn test_first_match_wins() {
        let gateway = FixtureGateway::new(accounts());
        let err = gateway.login("jane@example.com", "other").await.unwrap_err();
        assert!(matches!(err, ClientError::Auth(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_blank_login_is_missing_fields() {
        let gateway = FixtureGateway::new(accounts());
        let err = gateway.login("", "password").await.unwrap_err();
        assert!(matches!(err, ClientError::Auth(AuthError::MissingFields)));
    }

    #[tokio::test]
    async fn test_register() {
        let gateway = FixtureGateway::new(accounts());

        let created = gateway
            .register("New Reader", "reader@example.com", "secret")
            .await
            .unwrap();
        assert_eq!(created.id, UserId::new(5));
        assert_eq!(created.role, Role::User);

        let err = gateway
            .register("Dup", "john@example.com", "x")
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Auth(AuthError::EmailTaken)));

        let err = gateway.register("", "a@b.c", "x").await.unwrap_err();
        assert!(matches!(err, ClientError::Auth(AuthError::MissingFields)));

        // Case differs, so this is a different account.
        assert!(
            gateway
                .register("Shouty", "JOHN@example.com", "x")
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_marker_resolution_and_logout() {
        let gateway = FixtureGateway::new(accounts());
        let auth = gateway.login("john@example.com", "password123").await.unwrap();

        let me = gateway.current_user(&auth.marker).await.unwrap();
        assert_eq!(me.name, "John Smith");

        gateway.logout(Some(&auth.marker)).await.unwrap();
        assert!(gateway.current_user(&auth.marker).await.unwrap_err().is_not_found());

        let err = gateway.current_user(&Marker::default()).await.unwrap_err();
        assert!(matches!(err, ClientError::Auth(AuthError::SessionRequired)));
    }
}
