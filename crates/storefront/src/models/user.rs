//! User domain types.

use core::fmt;

use bookstore_core::{Email, Identity, Role, UserId};

/// A storefront account.
///
/// The password is stored as given. `Debug` redacts it.
#[derive(Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Login email, compared exactly.
    pub email: Email,
    /// Plaintext password.
    pub password: String,
    /// Account role.
    pub role: Role,
    /// Optional profile headline.
    pub headline: Option<String>,
}

impl User {
    /// The public view of this account, without the password.
    #[must_use]
    pub fn identity(&self) -> Identity {
        Identity {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
            headline: self.headline.clone(),
        }
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn jane() -> User {
        User {
            id: UserId::new(3),
            name: "Jane Doe".to_owned(),
            email: Email::parse("jane@example.com").unwrap(),
            password: "password123".to_owned(),
            role: Role::Admin,
            headline: None,
        }
    }

    #[test]
    fn test_identity_has_no_password() {
        let json = serde_json::to_value(jane().identity()).unwrap();
        assert_eq!(json["role"], "admin");
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_debug_redacts_password() {
        let debug_output = format!("{:?}", jane());
        assert!(debug_output.contains("jane@example.com"));
        assert!(!debug_output.contains("password123"));
    }
}
