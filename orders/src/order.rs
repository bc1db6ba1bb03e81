//! Order records and their status-dependent projections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of an order.
///
/// Customer-facing surfaces use the Spanish labels from [`OrderStatus::label`];
/// the wire form is the snake_case variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    Declined,
    Refunded,
}

impl OrderStatus {
    /// All statuses, in the order the simulation samples them.
    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
        OrderStatus::Declined,
        OrderStatus::Refunded,
    ];

    /// Customer-facing Spanish label.
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pendiente",
            OrderStatus::Processing => "Procesando",
            OrderStatus::Shipped => "Enviado",
            OrderStatus::Delivered => "Entregado",
            OrderStatus::Cancelled => "Cancelado",
            OrderStatus::Declined => "Declinado",
            OrderStatus::Refunded => "Reembolsado",
        }
    }

    /// Whether orders in this status carry tracking + shipping info.
    pub fn has_tracking(&self) -> bool {
        matches!(self, OrderStatus::Shipped | OrderStatus::Delivered)
    }

    /// Whether orders in this status carry a decline reason and date.
    pub fn is_declined(&self) -> bool {
        matches!(self, OrderStatus::Cancelled | OrderStatus::Declined)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A product line inside an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub price: f64,
}

/// A customer order.
///
/// Optional fields are status-dependent: shipped/delivered orders carry
/// tracking + shipping info (delivered additionally a delivery date),
/// cancelled/declined carry a decline reason and date, refunded carry the
/// refund date and amount. Fields that do not apply to the current status are
/// `None` and omitted from serialized output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub order_id: String,
    pub customer_email: String,
    pub status: OrderStatus,
    pub order_date: DateTime<Utc>,
    pub products: Vec<Product>,
    pub total: f64,
    pub payment_method: String,
    pub shipping_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decline_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decline_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_amount: Option<f64>,
}

impl Order {
    /// Project the status-dependent details of this order.
    pub fn status_details(&self) -> StatusDetails {
        let mut details = StatusDetails {
            order_date: self.order_date,
            total: self.total,
            tracking_number: None,
            shipping_date: None,
            delivery_date: None,
            decline_reason: None,
            decline_date: None,
            refund_date: None,
            refund_amount: None,
        };

        if self.status.has_tracking() {
            details.tracking_number = self.tracking_number.clone();
            details.shipping_date = self.shipping_date;
            if self.status == OrderStatus::Delivered {
                details.delivery_date = self.delivery_date;
            }
        }

        if self.status.is_declined() {
            details.decline_reason = self.decline_reason.clone();
            details.decline_date = self.decline_date;
        }

        if self.status == OrderStatus::Refunded {
            details.refund_date = self.refund_date;
            details.refund_amount = self.refund_amount;
        }

        details
    }

    /// Status label plus projected details, the shape the order-status
    /// endpoint returns.
    pub fn status_report(&self) -> StatusReport {
        StatusReport {
            status: self.status.label().to_string(),
            details: self.status_details(),
        }
    }
}

/// Status-dependent detail projection of an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusDetails {
    pub order_date: DateTime<Utc>,
    pub total: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decline_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decline_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_amount: Option<f64>,
}

/// Status + details bundle for a single order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusReport {
    pub status: String,
    pub details: StatusDetails,
}
