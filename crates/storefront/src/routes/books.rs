//! Catalog route handlers.
//!
//! Reads are public. Writes need a bearer marker but no particular role.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use bookstore_core::api::{BookMessage, BookResponse, BooksResponse, CategoriesResponse};
use bookstore_core::{BookId, CatalogQuery};

use crate::db::RepositoryError;
use crate::error::{AppError, Result};
use crate::middleware::RequireBearer;
use crate::models::{BookPatch, NewBook};
use crate::state::AppState;

const BOOK_NOT_FOUND: &str = "Book not found";

fn not_found() -> AppError {
    AppError::NotFound(BOOK_NOT_FOUND.to_string())
}

/// Non-numeric ids name no book.
fn parse_id(raw: &str) -> Result<BookId> {
    raw.parse().map_err(|_| not_found())
}

fn map_missing(err: RepositoryError) -> AppError {
    match err {
        RepositoryError::NotFound => not_found(),
        other => other.into(),
    }
}

/// List the catalog, filtered and sorted.
pub async fn index(
    State(state): State<AppState>,
    query: std::result::Result<Query<CatalogQuery>, QueryRejection>,
) -> Result<Json<BooksResponse>> {
    let Query(query) = query?;
    let books = state.books().list(&query).await;
    Ok(Json(BooksResponse { books }))
}

/// Category filter values, `All` first.
pub async fn categories(State(state): State<AppState>) -> Json<CategoriesResponse> {
    Json(CategoriesResponse {
        categories: state.books().categories().await,
    })
}

/// A single book.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BookResponse>> {
    let id = parse_id(&id)?;
    let book = state.books().get(id).await.ok_or_else(not_found)?;
    Ok(Json(BookResponse { book }))
}

/// Add a book with the next sequential id.
pub async fn create(
    State(state): State<AppState>,
    RequireBearer(_token): RequireBearer,
    payload: std::result::Result<Json<NewBook>, JsonRejection>,
) -> Result<(StatusCode, Json<BookMessage>)> {
    let Json(draft) = payload?;
    let book = state.books().create(draft).await?;
    tracing::info!(book_id = %book.id, "Book created");

    Ok((
        StatusCode::CREATED,
        Json(BookMessage {
            message: "Book created successfully".to_string(),
            book,
        }),
    ))
}

/// Merge the provided fields into a book.
pub async fn update(
    State(state): State<AppState>,
    RequireBearer(_token): RequireBearer,
    Path(id): Path<String>,
    payload: std::result::Result<Json<BookPatch>, JsonRejection>,
) -> Result<Json<BookMessage>> {
    let id = parse_id(&id)?;
    let Json(patch) = payload?;
    let book = state.books().update(id, patch).await.map_err(map_missing)?;
    tracing::info!(book_id = %book.id, "Book updated");

    Ok(Json(BookMessage {
        message: "Book updated successfully".to_string(),
        book,
    }))
}

/// Remove a book, returning it.
pub async fn delete(
    State(state): State<AppState>,
    RequireBearer(_token): RequireBearer,
    Path(id): Path<String>,
) -> Result<Json<BookMessage>> {
    let id = parse_id(&id)?;
    let book = state.books().delete(id).await.map_err(map_missing)?;
    tracing::info!(book_id = %book.id, "Book deleted");

    Ok(Json(BookMessage {
        message: "Book deleted successfully".to_string(),
        book,
    }))
}
