//! Core types for the bookstore.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod api;
pub mod book;
pub mod catalog;
pub mod email;
pub mod id;
pub mod identity;
pub mod order;
pub mod price;

pub use book::Book;
pub use catalog::{CatalogQuery, SortOrder, categories};
pub use email::{Email, EmailError};
pub use id::*;
pub use identity::{Identity, Role};
pub use order::{Order, OrderLine, OrderProgress, OrderStage, ShippingAddress, StageStatus};
pub use price::{Price, PriceError};
