//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::db::{BookRepository, OrderRepository, TokenRepository, UserRepository, seed};
use crate::services::auth::AuthService;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like repositories and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    users: UserRepository,
    books: BookRepository,
    orders: OrderRepository,
    tokens: TokenRepository,
}

impl AppState {
    /// Create application state over the bundled demo data.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let orders = OrderRepository::new(seed::orders(config.shipping_fee));
        Self::with_repositories(
            config,
            UserRepository::new(seed::users()),
            BookRepository::new(seed::books()),
            orders,
        )
    }

    /// Create application state over caller-supplied repositories.
    #[must_use]
    pub fn with_repositories(
        config: StorefrontConfig,
        users: UserRepository,
        books: BookRepository,
        orders: OrderRepository,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                users,
                books,
                orders,
                tokens: TokenRepository::new(),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the user repository.
    #[must_use]
    pub fn users(&self) -> &UserRepository {
        &self.inner.users
    }

    /// Get a reference to the catalog repository.
    #[must_use]
    pub fn books(&self) -> &BookRepository {
        &self.inner.books
    }

    /// Get a reference to the order repository.
    #[must_use]
    pub fn orders(&self) -> &OrderRepository {
        &self.inner.orders
    }

    /// Authentication service over this state's users and markers.
    #[must_use]
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(&self.inner.users, &self.inner.tokens)
    }
}
