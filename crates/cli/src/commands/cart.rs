//! Cart pricing.
//!
//! Builds a cart ledger from catalog lookups and prints the summary a
//! checkout page would show. Nothing is stored: the cart lives only for
//! the duration of the command.

use std::fmt::Write as _;
use std::str::FromStr;

use bookstore_client::{CartLedger, ShippingPolicy};
use bookstore_core::BookId;

use super::{CommandError, Context, emit};

/// One requested cart line, written `<book-id>[:<quantity>]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLine {
    pub book: BookId,
    pub quantity: u32,
}

impl FromStr for CartLine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, quantity) = s.split_once(':').unwrap_or((s, "1"));
        let book = id
            .trim()
            .parse()
            .map_err(|_| format!("invalid book id '{id}'"))?;
        let quantity = quantity
            .trim()
            .parse()
            .ok()
            .filter(|&q| q > 0)
            .ok_or_else(|| format!("invalid quantity '{quantity}', expected at least 1"))?;
        Ok(Self { book, quantity })
    }
}

/// Price the given lines under a shipping policy.
///
/// Lines for the same book accumulate. Quantities above stock are capped.
///
/// # Errors
///
/// Returns `ClientError::NotFound` for an unknown book and
/// `CartError::OutOfStock` for a book with no stock.
pub async fn quote(
    ctx: &Context,
    lines: &[CartLine],
    policy: &ShippingPolicy,
) -> Result<(), CommandError> {
    let mut ledger = CartLedger::new();
    for line in lines {
        let book = ctx.client.book(line.book).await?;
        let held = ledger.add(&book, line.quantity)?;
        if held < line.quantity {
            tracing::warn!(book_id = %book.id, requested = line.quantity, held, "Quantity capped at stock");
        }
    }

    emit(&render_summary(&ledger, policy));
    Ok(())
}

fn render_summary(ledger: &CartLedger, policy: &ShippingPolicy) -> String {
    let mut out = String::new();
    for entry in ledger.entries() {
        let _ = writeln!(
            out,
            "{:>3} x {:<40} {:>9}",
            entry.quantity,
            entry.book.title,
            entry.line_total().display()
        );
    }

    let summary = ledger.summary(policy);
    let _ = writeln!(out, "{:<46} {:>9}", "Subtotal", summary.subtotal.display());
    let _ = writeln!(out, "{:<46} {:>9}", "Shipping", summary.shipping.display());
    let _ = write!(out, "{:<46} {:>9}", "Total", summary.total.display());
    out
}
