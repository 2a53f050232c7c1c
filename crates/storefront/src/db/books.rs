//! Catalog repository.

use std::sync::Arc;

use bookstore_core::{Book, BookId, CatalogQuery, categories};
use tokio::sync::RwLock;

use super::{RepositoryError, next_id};
use crate::models::{BookPatch, NewBook};

/// Repository for the book catalog.
#[derive(Clone, Default)]
pub struct BookRepository {
    books: Arc<RwLock<Vec<Book>>>,
}

impl BookRepository {
    /// Create a repository holding the given books, in catalog order.
    #[must_use]
    pub fn new(books: Vec<Book>) -> Self {
        Self {
            books: Arc::new(RwLock::new(books)),
        }
    }

    /// Books passing the query's filters, in the query's order.
    pub async fn list(&self, query: &CatalogQuery) -> Vec<Book> {
        query.apply(self.books.read().await.iter())
    }

    /// `All` followed by each distinct category in catalog order.
    pub async fn categories(&self) -> Vec<String> {
        categories(self.books.read().await.iter())
    }

    /// Get a book by id.
    pub async fn get(&self, id: BookId) -> Option<Book> {
        self.books.read().await.iter().find(|b| b.id == id).cloned()
    }

    /// Add a book with the next sequential id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Invalid` if title, author or price is
    /// missing.
    pub async fn create(&self, draft: NewBook) -> Result<Book, RepositoryError> {
        let mut books = self.books.write().await;
        let id = BookId::new(next_id(books.len())?);
        let book = draft.into_book(id).ok_or_else(|| {
            RepositoryError::Invalid("title, author and price are required".to_owned())
        })?;
        books.push(book.clone());
        Ok(book)
    }

    /// Merge a patch into an existing book.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no book has this id.
    pub async fn update(&self, id: BookId, patch: BookPatch) -> Result<Book, RepositoryError> {
        let mut books = self.books.write().await;
        let book = books
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(RepositoryError::NotFound)?;
        patch.apply(book);
        Ok(book.clone())
    }

    /// Remove a book, returning it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no book has this id.
    pub async fn delete(&self, id: BookId) -> Result<Book, RepositoryError> {
        let mut books = self.books.write().await;
        let index = books
            .iter()
            .position(|b| b.id == id)
            .ok_or(RepositoryError::NotFound)?;
        Ok(books.remove(index))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::seed;
    use bookstore_core::{Price, SortOrder};

    #[tokio::test]
    async fn test_list_applies_query() {
        let repo = BookRepository::new(seed::books());

        let all = repo.list(&CatalogQuery::default()).await;
        assert_eq!(all.len(), 5);

        let query = CatalogQuery {
            category: Some("Classic Fiction".to_owned()),
            sort: SortOrder::PriceDesc,
            ..CatalogQuery::default()
        };
        let titles: Vec<_> = repo
            .list(&query)
            .await
            .into_iter()
            .map(|b| b.title)
            .collect();
        assert_eq!(titles, ["To Kill a Mockingbird", "The Great Gatsby"]);
    }

    #[tokio::test]
    async fn test_categories_in_catalog_order() {
        let repo = BookRepository::new(seed::books());
        assert_eq!(
            repo.categories().await,
            ["All", "Classic Fiction", "Dystopian Fiction", "Romance", "Fantasy"]
        );
    }

    #[tokio::test]
    async fn test_create_update_delete() {
        let repo = BookRepository::new(seed::books());
        let draft = NewBook {
            title: Some("Dune".to_owned()),
            author: Some("Frank Herbert".to_owned()),
            price: Some(Price::from_cents(1850)),
            ..NewBook::default()
        };

        let created = repo.create(draft).await.unwrap();
        assert_eq!(created.id, BookId::new(6));

        let patch = BookPatch {
            stock: Some(3),
            ..BookPatch::default()
        };
        assert_eq!(repo.update(created.id, patch).await.unwrap().stock, 3);

        let deleted = repo.delete(created.id).await.unwrap();
        assert_eq!(deleted.title, "Dune");
        assert!(repo.get(created.id).await.is_none());
        assert!(matches!(
            repo.delete(created.id).await,
            Err(RepositoryError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_create_rejects_incomplete_book() {
        let repo = BookRepository::new(Vec::new());
        let err = repo.create(NewBook::default()).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Invalid(_)));
        assert!(repo.list(&CatalogQuery::default()).await.is_empty());
    }
}
