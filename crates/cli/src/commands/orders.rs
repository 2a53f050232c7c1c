//! Order tracking.

use std::fmt::Write as _;

use bookstore_client::View;
use bookstore_core::OrderId;
use bookstore_core::api::OrderResponse;

use super::{CommandError, Context, emit};

/// Show an order with its delivery progress. Requires a session.
///
/// # Errors
///
/// Returns `CommandError::SignInRequired` without a session and
/// `ClientError::NotFound` for an unknown order.
pub async fn show(ctx: &Context, id: OrderId) -> Result<(), CommandError> {
    let session = ctx
        .enter(View::OrderDetails(id))?
        .ok_or(CommandError::SignInRequired)?;

    let response = ctx.client.order(id, &session.marker).await?;
    emit(&render_order(&response));
    Ok(())
}

fn render_order(response: &OrderResponse) -> String {
    let OrderResponse { order, progress } = response;
    let mut out = String::new();

    let _ = writeln!(out, "Order #{}", order.id);
    let _ = writeln!(out, "Placed:    {}", order.placed_on.format("%B %-d, %Y"));
    let _ = writeln!(
        out,
        "Arriving:  {}",
        order.estimated_delivery.format("%B %-d, %Y")
    );
    let _ = writeln!(out, "Progress:  {}%\n", progress.percent);

    for stage in &progress.stages {
        let mark = if stage.completed { "x" } else { " " };
        let _ = writeln!(out, "  [{mark}] {}", stage.label);
    }
    out.push('\n');

    for line in &order.lines {
        let _ = writeln!(
            out,
            "{:>3} x {:<40} {:>9}",
            line.quantity,
            line.title,
            line.line_total().display()
        );
    }
    let _ = writeln!(out, "{:<46} {:>9}", "Subtotal", order.subtotal().display());
    let _ = writeln!(out, "{:<46} {:>9}", "Shipping", order.shipping.display());
    let _ = writeln!(out, "{:<46} {:>9}\n", "Total", order.total().display());

    let address = &order.shipping_address;
    let _ = write!(
        out,
        "Ship to:\n  {}\n  {}\n  {}, {} {}\n  {}",
        address.name, address.street, address.city, address.state, address.zip_code, address.country
    );
    out
}
