//! Book payloads accepted by the catalog endpoints.

use bookstore_core::{Book, BookId, Price};
use chrono::NaiveDate;
use serde::Deserialize;

/// Body of `POST /api/books`.
///
/// Title, author and a positive price are required; everything else
/// defaults to blank.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    pub title: Option<String>,
    pub author: Option<String>,
    pub price: Option<Price>,
    pub cover_image: Option<String>,
    pub description: Option<String>,
    pub isbn: Option<String>,
    pub publisher: Option<String>,
    pub publication_date: Option<NaiveDate>,
    pub pages: Option<u32>,
    pub category: Option<String>,
    pub stock: Option<u32>,
}

impl NewBook {
    /// Build the stored record, or `None` if a required field is missing.
    #[must_use]
    pub fn into_book(self, id: BookId) -> Option<Book> {
        let title = self.title.filter(|t| !t.trim().is_empty())?;
        let author = self.author.filter(|a| !a.trim().is_empty())?;
        let price = self.price.filter(Price::is_positive)?;

        Some(Book {
            id,
            title,
            author,
            price,
            cover_image: self.cover_image.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            isbn: self.isbn.unwrap_or_default(),
            publisher: self.publisher.unwrap_or_default(),
            publication_date: self.publication_date,
            pages: self.pages.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            stock: self.stock.unwrap_or_default(),
        })
    }
}

/// Body of `PUT /api/books/{id}`.
///
/// Provided fields replace the stored ones; absent fields are kept. The id
/// cannot be changed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub price: Option<Price>,
    pub cover_image: Option<String>,
    pub description: Option<String>,
    pub isbn: Option<String>,
    pub publisher: Option<String>,
    pub publication_date: Option<NaiveDate>,
    pub pages: Option<u32>,
    pub category: Option<String>,
    pub stock: Option<u32>,
}

impl BookPatch {
    /// Merge this patch into `book`.
    pub fn apply(self, book: &mut Book) {
        if let Some(value) = self.title {
            book.title = value;
        }
        if let Some(value) = self.author {
            book.author = value;
        }
        if let Some(value) = self.price {
            book.price = value;
        }
        if let Some(value) = self.cover_image {
            book.cover_image = value;
        }
        if let Some(value) = self.description {
            book.description = value;
        }
        if let Some(value) = self.isbn {
            book.isbn = value;
        }
        if let Some(value) = self.publisher {
            book.publisher = value;
        }
        if let Some(value) = self.pages {
            book.pages = value;
        }
        if let Some(value) = self.category {
            book.category = value;
        }
        if let Some(value) = self.stock {
            book.stock = value;
        }
        if self.publication_date.is_some() {
            book.publication_date = self.publication_date;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_book_requires_title_author_price() {
        let complete: NewBook =
            serde_json::from_str(r#"{"title":"Dune","author":"Frank Herbert","price":18.5}"#)
                .unwrap();
        let book = complete.into_book(BookId::new(6)).unwrap();
        assert_eq!(book.price, Price::from_cents(1850));
        assert_eq!(book.stock, 0);

        for json in [
            r#"{"author":"A","price":"1.00"}"#,
            r#"{"title":"","author":"A","price":"1.00"}"#,
            r#"{"title":"T","price":"1.00"}"#,
            r#"{"title":"T","author":"A"}"#,
            r#"{"title":"T","author":"A","price":0}"#,
        ] {
            let draft: NewBook = serde_json::from_str(json).unwrap();
            assert!(draft.into_book(BookId::new(1)).is_none(), "{json}");
        }
    }

    #[test]
    fn test_patch_merges_present_fields() {
        let mut book: NewBook =
            serde_json::from_str(r#"{"title":"Dune","author":"Frank Herbert","price":"18.50","stock":4}"#)
                .unwrap();
        book.category = Some("Science Fiction".to_owned());
        let mut book = book.into_book(BookId::new(6)).unwrap();

        let patch: BookPatch =
            serde_json::from_str(r#"{"price":"9.99","stock":12,"id":99}"#).unwrap();
        patch.apply(&mut book);

        assert_eq!(book.id, BookId::new(6));
        assert_eq!(book.title, "Dune");
        assert_eq!(book.price, Price::from_cents(999));
        assert_eq!(book.stock, 12);
        assert_eq!(book.category, "Science Fiction");
    }

    #[test]
    fn test_negative_price_never_reaches_a_book() {
        assert!(serde_json::from_str::<BookPatch>(r#"{"price":"-5.00"}"#).is_err());
        assert!(
            serde_json::from_str::<NewBook>(r#"{"title":"T","author":"A","price":-1}"#).is_err()
        );
    }
}
