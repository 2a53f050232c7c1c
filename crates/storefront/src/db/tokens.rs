//! Issued markers.
//!
//! A marker is an opaque `demo-token-<uuid>` string. The only thing the
//! storefront knows about it is which account it was issued to; there is
//! no expiry and no signature.
//!
//! Every login issues a new marker and only logout forgets one, so the map
//! grows for the life of the process. A restart drops every marker.

use std::collections::HashMap;
use std::sync::Arc;

use bookstore_core::UserId;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Prefix of every issued marker.
pub const TOKEN_PREFIX: &str = "demo-token-";

/// Repository of live markers.
#[derive(Clone, Default)]
pub struct TokenRepository {
    tokens: Arc<RwLock<HashMap<String, UserId>>>,
}

impl TokenRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh marker for an account.
    pub async fn issue(&self, user: UserId) -> String {
        let token = format!("{TOKEN_PREFIX}{}", Uuid::new_v4());
        let mut tokens = self.tokens.write().await;
        tokens.insert(token.clone(), user);
        tracing::debug!(user_id = %user, live = tokens.len(), "Marker issued");
        token
    }

    /// Number of markers currently held.
    pub async fn live_count(&self) -> usize {
        self.tokens.read().await.len()
    }

    /// The account a marker was issued to.
    pub async fn resolve(&self, token: &str) -> Option<UserId> {
        self.tokens.read().await.get(token).copied()
    }

    /// Forget a marker. Returns whether it was known.
    pub async fn revoke(&self, token: &str) -> bool {
        self.tokens.write().await.remove(token).is_some()
    }
}
