//! The cart ledger.
//!
//! One shopper's pending purchase, held in memory for the lifetime of the
//! view that owns it. There is no persistence and no cross-tab sharing.
//!
//! Every entry satisfies `1 <= quantity <= book.stock`, and there is at most
//! one entry per book.

use bookstore_core::{Book, BookId, Price};
use thiserror::Error;

/// Shipping fee the storefront charges on any non-empty cart.
pub const DEFAULT_SHIPPING_FEE_CENTS: i64 = 499;

/// Cart operations that cannot be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CartError {
    /// The book has no stock, so no valid quantity exists.
    #[error("book {0} is out of stock")]
    OutOfStock(BookId),

    /// The book is not in the cart.
    #[error("book {0} is not in the cart")]
    NotInCart(BookId),
}

/// One book and how many copies of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartEntry {
    pub book: Book,
    pub quantity: u32,
}

impl CartEntry {
    /// `price * quantity`, unrounded.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.book.price.times(self.quantity)
    }
}

/// Flat-rate shipping applied to non-empty carts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShippingPolicy {
    fee: Price,
}

impl ShippingPolicy {
    /// Charge `fee` whenever the subtotal is positive.
    #[must_use]
    pub const fn flat(fee: Price) -> Self {
        Self { fee }
    }

    /// Never charge shipping.
    #[must_use]
    pub const fn free() -> Self {
        Self { fee: Price::ZERO }
    }

    /// Fee owed for a given subtotal.
    #[must_use]
    pub fn fee_for(&self, subtotal: Price) -> Price {
        if subtotal.is_positive() {
            self.fee
        } else {
            Price::ZERO
        }
    }
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self::flat(Price::from_cents(DEFAULT_SHIPPING_FEE_CENTS))
    }
}

/// Order summary figures, exact until displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartSummary {
    pub subtotal: Price,
    pub shipping: Price,
    pub total: Price,
}

/// The shopper's cart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartLedger {
    entries: Vec<CartEntry>,
}

impl CartLedger {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add copies of a book.
    ///
    /// An existing entry grows by `quantity`, capped at stock. A new entry
    /// starts at `quantity` clamped into `[1, stock]`. The stored book is
    /// refreshed with the one passed in, so later clamps use current stock.
    ///
    /// Returns the entry's resulting quantity.
    ///
    /// # Errors
    ///
    /// Returns `CartError::OutOfStock` if the book has no stock. Any entry
    /// already held for it is dropped first.
    pub fn add(&mut self, book: &Book, quantity: u32) -> Result<u32, CartError> {
        if !book.in_stock() {
            self.entries.retain(|entry| entry.book.id != book.id);
            return Err(CartError::OutOfStock(book.id));
        }

        if let Some(entry) = self.entry_mut(book.id) {
            entry.book = book.clone();
            entry.quantity = entry.quantity.saturating_add(quantity).min(book.stock);
            return Ok(entry.quantity);
        }

        let quantity = quantity.clamp(1, book.stock);
        self.entries.push(CartEntry {
            book: book.clone(),
            quantity,
        });
        Ok(quantity)
    }

    /// Set a book's quantity.
    ///
    /// Zero removes the entry; anything above stock is clamped to stock.
    /// Returns the resulting quantity, or `None` if the entry was removed.
    ///
    /// # Errors
    ///
    /// Returns `CartError::NotInCart` for a positive quantity on a book that
    /// has no entry.
    pub fn set_quantity(&mut self, id: BookId, quantity: u32) -> Result<Option<u32>, CartError> {
        if quantity == 0 {
            self.remove(id);
            return Ok(None);
        }

        let entry = self.entry_mut(id).ok_or(CartError::NotInCart(id))?;
        entry.quantity = quantity.min(entry.book.stock);
        Ok(Some(entry.quantity))
    }

    /// One more copy, up to stock.
    ///
    /// # Errors
    ///
    /// Returns `CartError::NotInCart` if the book has no entry.
    pub fn increment(&mut self, id: BookId) -> Result<u32, CartError> {
        let entry = self.entry_mut(id).ok_or(CartError::NotInCart(id))?;
        if entry.quantity < entry.book.stock {
            entry.quantity += 1;
        }
        Ok(entry.quantity)
    }

    /// One fewer copy, never below one. Use [`CartLedger::remove`] to drop.
    ///
    /// # Errors
    ///
    /// Returns `CartError::NotInCart` if the book has no entry.
    pub fn decrement(&mut self, id: BookId) -> Result<u32, CartError> {
        let entry = self.entry_mut(id).ok_or(CartError::NotInCart(id))?;
        if entry.quantity > 1 {
            entry.quantity -= 1;
        }
        Ok(entry.quantity)
    }

    /// Drop a book from the cart. Absent books are ignored.
    ///
    /// Returns the removed entry, if there was one.
    pub fn remove(&mut self, id: BookId) -> Option<CartEntry> {
        let index = self.entries.iter().position(|e| e.book.id == id)?;
        Some(self.entries.remove(index))
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries in the order they were first added.
    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// The entry for a book, if present.
    #[must_use]
    pub fn get(&self, id: BookId) -> Option<&CartEntry> {
        self.entries.iter().find(|e| e.book.id == id)
    }

    /// Number of distinct books.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cart has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total copies across all entries (the navbar badge).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.entries.iter().map(|e| e.quantity).sum()
    }

    /// Exact sum of line totals.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.entries.iter().map(CartEntry::line_total).sum()
    }

    /// Subtotal plus shipping.
    #[must_use]
    pub fn total(&self, policy: &ShippingPolicy) -> Price {
        self.summary(policy).total
    }

    /// Subtotal, shipping and total together.
    #[must_use]
    pub fn summary(&self, policy: &ShippingPolicy) -> CartSummary {
        let subtotal = self.subtotal();
        let shipping = policy.fee_for(subtotal);
        CartSummary {
            subtotal,
            shipping,
            total: subtotal + shipping,
        }
    }

    fn entry_mut(&mut self, id: BookId) -> Option<&mut CartEntry> {
        self.entries.iter_mut().find(|e| e.book.id == id)
    }
}
