//! Authenticated user identity.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::email::Email;
use super::id::UserId;

/// Account role.
///
/// Older payloads carry no role at all; those deserialize as [`Role::User`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

/// An authenticated user's public record.
///
/// There is deliberately no password field: this is the only user shape
/// that leaves the credential store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// User ID assigned by the credential store.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Login email, exactly as registered.
    pub email: Email,
    /// Account role.
    #[serde(default)]
    pub role: Role,
    /// Profile headline shown on the social feed (e.g. "Engineer at Acme").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
}

impl Identity {
    /// Create an identity with the default role and no headline.
    #[must_use]
    pub fn new(id: UserId, name: impl Into<String>, email: Email) -> Self {
        Self {
            id,
            name: name.into(),
            email,
            role: Role::User,
            headline: None,
        }
    }

    /// Set the role.
    #[must_use]
    pub const fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Whether this identity has the admin role.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_optional_fields_use_defaults() {
        let json = r#"{"id":2,"name":"Jane Smith","email":"jane@example.com"}"#;
        let identity: Identity = serde_json::from_str(json).unwrap();
        assert_eq!(identity.role, Role::User);
        assert_eq!(identity.headline, None);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let json = r#"{"id":1,"name":"John","email":"john@example.com","role":"admin","avatar":"x.png"}"#;
        let identity: Identity = serde_json::from_str(json).unwrap();
        assert!(identity.is_admin());
    }

    #[test]
    fn test_rejects_malformed_records() {
        for json in [
            r#"{"name":"No Id","email":"a@b.c"}"#,
            r#"{"id":1,"name":"Bad Email","email":"nope"}"#,
            r#"{"id":1,"name":"Bad Role","email":"a@b.c","role":"owner"}"#,
            r#""just a string""#,
        ] {
            assert!(serde_json::from_str::<Identity>(json).is_err(), "{json}");
        }
    }

    #[test]
    fn test_serialized_form_has_no_password() {
        let identity = Identity::new(
            UserId::new(1),
            "John Doe",
            Email::parse("user@example.com").unwrap(),
        );
        let value = serde_json::to_value(&identity).unwrap();
        assert!(value.get("password").is_none());
        assert_eq!(value["role"], "user");
        assert!(value.get("headline").is_none());
    }

    #[test]
    fn test_role_parse_and_display() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(Role::User.to_string(), "user");
        assert!("root".parse::<Role>().is_err());
    }
}
