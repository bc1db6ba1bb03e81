//! Answer templates for order-aware enrichment.
//!
//! Trained answers in order-tracking categories carry a sentinel placeholder
//! that is swapped for a rendered view of the matched order at query time.
//! Rendering is field-presence conditional: lines whose field does not apply
//! to the order's current status are omitted, never emitted empty.

use deskrelay_orders::Order;

/// Sentinel token inside trained answers that marks where order details go.
pub const DETAILS_PLACEHOLDER: &str = "[Detalles específicos serán insertados dinámicamente]";

/// Whether a case category opts into order-detail enrichment.
pub fn wants_order_details(category: &str) -> bool {
    category.contains("order_status") || category.contains("seguimiento")
}

/// Render the status-dependent details of an order as customer-facing lines.
pub fn render_order_details(order: &Order) -> String {
    let details = order.status_details();
    let mut lines = vec![
        format!("Estado: {}", order.status),
        format!("Fecha de orden: {}", details.order_date.format("%d/%m/%Y")),
        format!("Total: ${:.2}", details.total),
    ];

    if let Some(tracking) = &details.tracking_number {
        lines.push(format!("Número de seguimiento: {tracking}"));
    }
    if let Some(shipped) = details.shipping_date {
        lines.push(format!("Fecha de envío: {}", shipped.format("%d/%m/%Y")));
    }
    if let Some(delivered) = details.delivery_date {
        lines.push(format!("Fecha de entrega: {}", delivered.format("%d/%m/%Y")));
    }
    if let Some(reason) = &details.decline_reason {
        lines.push(format!("Motivo: {reason}"));
    }
    if let Some(refunded) = details.refund_date {
        lines.push(format!("Fecha de reembolso: {}", refunded.format("%d/%m/%Y")));
    }
    if let Some(amount) = details.refund_amount {
        lines.push(format!("Monto reembolsado: ${amount:.2}"));
    }

    lines.join("\n")
}

/// Replace the placeholder in `answer` with the rendered order details.
///
/// Answers without the placeholder pass through unchanged: conversational
/// answers in order-tracking categories should not get a status dump bolted
/// on.
pub fn fill_details(answer: &str, order: &Order) -> String {
    if answer.contains(DETAILS_PLACEHOLDER) {
        answer.replace(DETAILS_PLACEHOLDER, &render_order_details(order))
    } else {
        answer.to_string()
    }
}

/// Append a one-line-per-order summary of a customer's orders to an answer.
pub fn append_order_summary(answer: &str, orders: &[Order]) -> String {
    let mut enriched = answer.to_string();
    for order in orders {
        enriched.push_str(&format!("\n- Order {}: {}", order.order_id, order.status));
    }
    enriched
}
