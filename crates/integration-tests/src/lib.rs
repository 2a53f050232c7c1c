//! Integration tests for the bookstore.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bookstore-integration-tests
//! ```
//!
//! Every test starts its own storefront on an ephemeral port, so tests run
//! in parallel and never see each other's writes.
//!
//! # Test Categories
//!
//! - `storefront_auth` - Login, register, logout and marker resolution
//! - `storefront_books` - Catalog reads, filters and bearer-gated writes
//! - `storefront_orders` - Order tracking and response plumbing
//! - `client_flows` - The client crate driving a live storefront

use std::net::SocketAddr;
use std::path::PathBuf;

use bookstore_storefront::config::StorefrontConfig;
use bookstore_storefront::state::AppState;
use serde_json::{Value, json};
use url::Url;

/// A storefront running on a background task.
pub struct TestServer {
    pub addr: SocketAddr,
    pub base: Url,
    pub http: reqwest::Client,
}

impl TestServer {
    /// Start a storefront over the bundled demo data.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn spawn() -> Self {
        Self::spawn_with(StorefrontConfig::default()).await
    }

    /// Start a storefront with the given configuration. Host and port are
    /// replaced with an ephemeral local address.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn spawn_with(config: StorefrontConfig) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");

        let app = bookstore_storefront::app(AppState::new(config));
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let base = Url::parse(&format!("http://{addr}/")).expect("Invalid base URL");
        Self {
            addr,
            base,
            http: reqwest::Client::new(),
        }
    }

    /// Absolute URL for `path` (leading slash optional).
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid relative URL.
    #[must_use]
    pub fn url(&self, path: &str) -> Url {
        self.base
            .join(path.trim_start_matches('/'))
            .expect("Invalid path")
    }

    /// Log in through the API and return the issued marker.
    ///
    /// # Panics
    ///
    /// Panics if the login is rejected.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let resp = self
            .http
            .post(self.url("/api/auth/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Login request failed");
        assert_eq!(resp.status(), reqwest::StatusCode::OK, "login rejected");

        let body: Value = resp.json().await.expect("Login body is not JSON");
        body["token"]
            .as_str()
            .expect("Login body has no token")
            .to_owned()
    }
}

/// A fresh, empty directory under the system temp dir.
#[must_use]
pub fn temp_profile() -> PathBuf {
    std::env::temp_dir().join(format!("bookstore-it-{}", uuid::Uuid::new_v4()))
}
