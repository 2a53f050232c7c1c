//! Catalog item.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::id::BookId;
use super::price::Price;

/// A book in the catalog.
///
/// Only `price` and `stock` matter to the cart; everything else is
/// presentation data and may be blank for books created through the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub price: Price,
    #[serde(default)]
    pub cover_image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub isbn: String,
    #[serde(default)]
    pub publisher: String,
    #[serde(default)]
    pub publication_date: Option<NaiveDate>,
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub category: String,
    /// Units available. Bounds the quantity a cart may hold.
    #[serde(default)]
    pub stock: u32,
}

impl Book {
    /// Whether at least one unit is available.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}
