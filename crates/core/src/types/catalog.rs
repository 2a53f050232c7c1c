//! Catalog search, category filtering and sorting.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::book::Book;

/// Category value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "All";

/// Sort order for catalog listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortOrder {
    /// Catalog order.
    #[default]
    Relevance,
    PriceAsc,
    PriceDesc,
    TitleAsc,
    TitleDesc,
}

impl SortOrder {
    /// Wire name, as accepted by the `sort` query parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::PriceAsc => "priceAsc",
            Self::PriceDesc => "priceDesc",
            Self::TitleAsc => "titleAsc",
            Self::TitleDesc => "titleDesc",
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "relevance" => Ok(Self::Relevance),
            "priceAsc" => Ok(Self::PriceAsc),
            "priceDesc" => Ok(Self::PriceDesc),
            "titleAsc" => Ok(Self::TitleAsc),
            "titleDesc" => Ok(Self::TitleDesc),
            _ => Err(format!("invalid sort order: {s}")),
        }
    }
}

/// A catalog listing request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    /// Case-insensitive substring matched against title and author.
    #[serde(default, rename = "q", skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Exact category name, or `All`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub sort: SortOrder,
}

impl CatalogQuery {
    /// Whether a book passes the search and category filters.
    #[must_use]
    pub fn matches(&self, book: &Book) -> bool {
        let search_ok = self
            .search
            .as_deref()
            .filter(|q| !q.is_empty())
            .is_none_or(|q| {
                let needle = q.to_lowercase();
                book.title.to_lowercase().contains(&needle)
                    || book.author.to_lowercase().contains(&needle)
            });

        let category_ok = self
            .category
            .as_deref()
            .filter(|c| *c != ALL_CATEGORIES)
            .is_none_or(|c| book.category == c);

        search_ok && category_ok
    }

    /// Filter and sort a catalog. Ties keep catalog order.
    #[must_use]
    pub fn apply<'a>(&self, books: impl IntoIterator<Item = &'a Book>) -> Vec<Book> {
        let mut selected: Vec<Book> = books
            .into_iter()
            .filter(|book| self.matches(book))
            .cloned()
            .collect();

        match self.sort {
            SortOrder::Relevance => {}
            SortOrder::PriceAsc => selected.sort_by(|a, b| a.price.cmp(&b.price)),
            SortOrder::PriceDesc => selected.sort_by(|a, b| b.price.cmp(&a.price)),
            SortOrder::TitleAsc => selected.sort_by(|a, b| compare_titles(&a.title, &b.title)),
            SortOrder::TitleDesc => selected.sort_by(|a, b| compare_titles(&b.title, &a.title)),
        }

        selected
    }
}

fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// `All` followed by each distinct category in first-seen order.
#[must_use]
pub fn categories<'a>(books: impl IntoIterator<Item = &'a Book>) -> Vec<String> {
    let mut out = vec![ALL_CATEGORIES.to_owned()];
    for book in books {
        if !book.category.is_empty() && !out.contains(&book.category) {
            out.push(book.category.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BookId, Price};

    fn book(id: u32, title: &str, author: &str, cents: i64, category: &str) -> Book {
        Book {
            id: BookId::new(id),
            title: title.to_owned(),
            author: author.to_owned(),
            price: Price::from_cents(cents),
            cover_image: String::new(),
            description: String::new(),
            isbn: String::new(),
            publisher: String::new(),
            publication_date: None,
            pages: 0,
            category: category.to_owned(),
            stock: 5,
        }
    }

    fn shelf() -> Vec<Book> {
        vec![
            book(1, "The Great Gatsby", "F. Scott Fitzgerald", 999, "Classic Fiction"),
            book(2, "To Kill a Mockingbird", "Harper Lee", 1299, "Classic Fiction"),
            book(3, "1984", "George Orwell", 1099, "Dystopian Fiction"),
            book(4, "Pride and Prejudice", "Jane Austen", 899, "Romance"),
            book(5, "the hobbit", "J.R.R. Tolkien", 1499, "Fantasy"),
        ]
    }

    fn ids(books: &[Book]) -> Vec<u32> {
        books.iter().map(|b| b.id.get()).collect()
    }

    #[test]
    fn test_default_query_keeps_catalog_order() {
        let books = shelf();
        assert_eq!(ids(&CatalogQuery::default().apply(&books)), [1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_search_matches_title_or_author_ignoring_case() {
        let books = shelf();
        let query = CatalogQuery {
            search: Some("ORWELL".to_owned()),
            ..CatalogQuery::default()
        };
        assert_eq!(ids(&query.apply(&books)), [3]);

        let query = CatalogQuery {
            search: Some("the".to_owned()),
            ..CatalogQuery::default()
        };
        assert_eq!(ids(&query.apply(&books)), [1, 5]);
    }

    #[test]
    fn test_category_filter() {
        let books = shelf();
        let query = CatalogQuery {
            category: Some("Classic Fiction".to_owned()),
            ..CatalogQuery::default()
        };
        assert_eq!(ids(&query.apply(&books)), [1, 2]);

        let all = CatalogQuery {
            category: Some(ALL_CATEGORIES.to_owned()),
            ..CatalogQuery::default()
        };
        assert_eq!(all.apply(&books).len(), 5);
    }

    #[test]
    fn test_sorting() {
        let books = shelf();
        let sorted = |sort| {
            ids(&CatalogQuery {
                sort,
                ..CatalogQuery::default()
            }
            .apply(&books))
        };
        assert_eq!(sorted(SortOrder::PriceAsc), [4, 1, 3, 2, 5]);
        assert_eq!(sorted(SortOrder::PriceDesc), [5, 2, 3, 1, 4]);
        assert_eq!(sorted(SortOrder::TitleAsc), [3, 4, 1, 5, 2]);
        assert_eq!(sorted(SortOrder::TitleDesc), [2, 5, 1, 4, 3]);
    }

    #[test]
    fn test_categories_in_first_seen_order() {
        assert_eq!(
            categories(&shelf()),
            [
                "All",
                "Classic Fiction",
                "Dystopian Fiction",
                "Romance",
                "Fantasy"
            ]
        );
    }

    #[test]
    fn test_sort_order_from_query_string() {
        assert_eq!("priceDesc".parse::<SortOrder>(), Ok(SortOrder::PriceDesc));
        assert!("cheapest".parse::<SortOrder>().is_err());
    }
}
