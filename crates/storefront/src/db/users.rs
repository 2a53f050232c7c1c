//! User repository.

use std::sync::Arc;

use bookstore_core::{Email, Role, UserId};
use tokio::sync::RwLock;

use super::{RepositoryError, next_id};
use crate::models::User;

/// Repository for storefront accounts.
#[derive(Clone, Default)]
pub struct UserRepository {
    users: Arc<RwLock<Vec<User>>>,
}

impl UserRepository {
    /// Create a repository holding the given accounts, in search order.
    #[must_use]
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(RwLock::new(users)),
        }
    }

    /// First account whose email matches `email` exactly.
    pub async fn find_by_email(&self, email: &str) -> Option<User> {
        self.users
            .read()
            .await
            .iter()
            .find(|u| u.email.matches(email))
            .cloned()
    }

    /// Get an account by id.
    pub async fn get(&self, id: UserId) -> Option<User> {
        self.users.read().await.iter().find(|u| u.id == id).cloned()
    }

    /// Create an account with role `user`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already has an
    /// account.
    pub async fn create(
        &self,
        name: &str,
        email: Email,
        password: &str,
    ) -> Result<User, RepositoryError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == email) {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }

        let user = User {
            id: UserId::new(next_id(users.len())?),
            name: name.to_owned(),
            email,
            password: password.to_owned(),
            role: Role::User,
            headline: None,
        };
        users.push(user.clone());
        Ok(user)
    }

    /// Number of accounts.
    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::seed;

    #[tokio::test]
    async fn test_find_is_exact() {
        let repo = UserRepository::new(seed::users());
        assert_eq!(
            repo.find_by_email("jane@example.com").await.unwrap().role,
            Role::Admin
        );
        assert!(repo.find_by_email("Jane@example.com").await.is_none());
        assert!(repo.find_by_email("jane@example.com ").await.is_none());
    }

    #[tokio::test]
    async fn test_create_assigns_next_id_and_user_role() {
        let repo = UserRepository::new(seed::users());
        let email = Email::parse("reader@example.com").unwrap();

        let user = repo.create("Reader", email.clone(), "pw").await.unwrap();
        assert_eq!(user.id, UserId::new(4));
        assert_eq!(user.role, Role::User);
        assert_eq!(repo.get(user.id).await.unwrap().name, "Reader");

        let err = repo.create("Again", email, "pw").await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
        assert_eq!(repo.count().await, 4);
    }
}
