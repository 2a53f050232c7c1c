//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                 - Health check
//!
//! # Auth
//! POST   /api/auth/login         - Check credentials, issue a marker
//! POST   /api/auth/register      - Create an account (role `user`)
//! POST   /api/auth/logout        - Forget the presented marker
//! GET    /api/auth/user          - Account behind the marker (bearer)
//!
//! # Books
//! GET    /api/books              - Catalog listing (?q=&category=&sort=)
//! GET    /api/books/categories   - Category filter values
//! GET    /api/books/{id}         - Book detail
//! POST   /api/books              - Add a book (bearer)
//! PUT    /api/books/{id}         - Update a book (bearer)
//! DELETE /api/books/{id}         - Remove a book (bearer)
//!
//! # Orders
//! GET    /api/orders/{id}        - Order with tracking progress (bearer)
//! ```

pub mod auth;
pub mod books;
pub mod orders;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .route("/logout", post(auth::logout))
        .route("/user", get(auth::current_user))
}

/// Create the book routes router.
pub fn book_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(books::index).post(books::create))
        .route("/categories", get(books::categories))
        .route(
            "/{id}",
            get(books::show).put(books::update).delete(books::delete),
        )
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new().route("/{id}", get(orders::show))
}

/// Create all API routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/auth", auth_routes())
        .nest("/api/books", book_routes())
        .nest("/api/orders", order_routes())
}
