//! Catalog browsing.

use std::fmt::Write as _;

use bookstore_core::{Book, BookId, CatalogQuery};

use super::{CommandError, Context, emit};

/// List books matching `query`.
///
/// # Errors
///
/// Returns error if the storefront request fails.
pub async fn list(ctx: &Context, query: &CatalogQuery) -> Result<(), CommandError> {
    let books = ctx.client.books(query).await?;
    emit(&render_list(&books));
    Ok(())
}

/// Show one book in full.
///
/// # Errors
///
/// Returns `ClientError::NotFound` for an unknown id.
pub async fn show(ctx: &Context, id: BookId) -> Result<(), CommandError> {
    let book = ctx.client.book(id).await?;
    emit(&render_book(&book));
    Ok(())
}

/// List catalog categories.
///
/// # Errors
///
/// Returns error if the storefront request fails.
pub async fn categories(ctx: &Context) -> Result<(), CommandError> {
    let categories = ctx.client.categories().await?;
    emit(&categories.join("\n"));
    Ok(())
}

fn render_list(books: &[Book]) -> String {
    if books.is_empty() {
        return "No books found".to_owned();
    }

    let mut out = String::new();
    for book in books {
        let stock = if book.in_stock() {
            format!("{} in stock", book.stock)
        } else {
            "out of stock".to_owned()
        };
        let _ = writeln!(
            out,
            "{:>4}  {:<40} {:<24} {:>8}  {}",
            book.id.get(),
            book.title,
            book.author,
            book.price.display(),
            stock
        );
    }
    out.truncate(out.trim_end().len());
    out
}

fn render_book(book: &Book) -> String {
    let mut out = format!("{}\nby {}\n\n", book.title, book.author);

    let _ = writeln!(out, "Price:     {}", book.price.display());
    let _ = writeln!(out, "Stock:     {}", book.stock);
    if !book.category.is_empty() {
        let _ = writeln!(out, "Category:  {}", book.category);
    }
    if !book.isbn.is_empty() {
        let _ = writeln!(out, "ISBN:      {}", book.isbn);
    }
    if !book.publisher.is_empty() {
        let _ = writeln!(out, "Publisher: {}", book.publisher);
    }
    if let Some(date) = book.publication_date {
        let _ = writeln!(out, "Published: {}", date.format("%B %-d, %Y"));
    }
    if book.pages > 0 {
        let _ = writeln!(out, "Pages:     {}", book.pages);
    }
    if !book.description.is_empty() {
        let _ = write!(out, "\n{}", book.description);
    }

    out.truncate(out.trim_end().len());
    out
}
