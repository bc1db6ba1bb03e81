//! Simulated order store.
//!
//! Generates a batch of random orders at construction and serves read-only
//! lookups. There is no mutation API: the store stands in for an external
//! order system the relay can only query.

use std::collections::HashMap;

use chrono::{Duration, Utc};
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::info;

use crate::order::{Order, OrderStatus, Product, StatusReport};

/// Keyed order lookup, the interface the retrieval engine consumes.
pub trait OrderLookup: Send + Sync {
    /// Look up a single order by id.
    fn order(&self, order_id: &str) -> Option<Order>;

    /// All orders registered under the given customer email.
    fn orders_for_email(&self, email: &str) -> Vec<Order>;
}

/// Reasons used for cancelled and declined orders.
const DECLINE_REASONS: [&str; 5] = [
    "Pago rechazado por el banco",
    "Fondos insuficientes",
    "Problemas con la tarjeta",
    "Dirección de facturación incorrecta",
    "Sospecha de fraude",
];

/// Product catalogue the simulation samples from.
const CATALOGUE: [(&str, f64); 5] = [
    ("Smartphone XYZ", 799.99),
    ("Laptop ABC", 1299.99),
    ("Auriculares Pro", 199.99),
    ("Tablet Ultra", 499.99),
    ("Smartwatch Plus", 299.99),
];

const PAYMENT_METHODS: [&str; 3] = ["Credit Card", "PayPal", "Bank Transfer"];

/// In-memory store of randomly generated orders.
pub struct SimulatedOrders {
    orders: HashMap<String, Order>,
}

impl SimulatedOrders {
    /// Generate a store with `count` random orders, ids `ORD000001..`.
    pub fn seeded(count: usize) -> Self {
        let mut rng = rand::rng();
        let now = Utc::now();
        let mut orders = HashMap::with_capacity(count);

        for i in 1..=count {
            let order_id = format!("ORD{i:06}");
            let status = *OrderStatus::ALL
                .choose(&mut rng)
                .unwrap_or(&OrderStatus::Pending);
            let order_date = now - Duration::days(rng.random_range(0..=30));

            let product_count = rng.random_range(1..=3);
            let picked = CATALOGUE
                .choose_multiple(&mut rng, product_count)
                .map(|(name, price)| Product {
                    name: (*name).to_string(),
                    price: *price,
                })
                .collect::<Vec<_>>();
            let total: f64 = picked.iter().map(|p| p.price).sum();

            let mut order = Order {
                order_id: order_id.clone(),
                customer_email: format!("usuario{i}@ejemplo.com"),
                status,
                order_date,
                products: picked,
                total,
                payment_method: PAYMENT_METHODS
                    .choose(&mut rng)
                    .unwrap_or(&"Credit Card")
                    .to_string(),
                shipping_address: format!("Calle {}, Ciudad", rng.random_range(1..=100)),
                tracking_number: None,
                shipping_date: None,
                delivery_date: None,
                decline_reason: None,
                decline_date: None,
                refund_date: None,
                refund_amount: None,
            };

            if status.has_tracking() {
                order.tracking_number = Some(format!("TRACK{i:08}"));
                let shipping_date = order_date + Duration::days(rng.random_range(1..=3));
                order.shipping_date = Some(shipping_date);
                if status == OrderStatus::Delivered {
                    order.delivery_date =
                        Some(shipping_date + Duration::days(rng.random_range(1..=5)));
                }
            }

            if status.is_declined() {
                order.decline_reason = DECLINE_REASONS
                    .choose(&mut rng)
                    .map(|r| (*r).to_string());
                order.decline_date = Some(order_date + Duration::hours(rng.random_range(1..=24)));
            }

            if status == OrderStatus::Refunded {
                order.refund_date = Some(order_date + Duration::days(rng.random_range(1..=5)));
                order.refund_amount = Some(total);
            }

            orders.insert(order_id, order);
        }

        info!("Generated {} simulated orders", orders.len());
        Self { orders }
    }

    /// Build a store from explicit orders. Used by tests and demos that need
    /// deterministic contents.
    pub fn from_orders(orders: impl IntoIterator<Item = Order>) -> Self {
        Self {
            orders: orders
                .into_iter()
                .map(|o| (o.order_id.clone(), o))
                .collect(),
        }
    }

    /// Look up a single order by id.
    pub fn get_order(&self, order_id: &str) -> Option<&Order> {
        self.orders.get(order_id)
    }

    /// All orders for a customer email.
    pub fn get_customer_orders(&self, email: &str) -> Vec<&Order> {
        let mut found: Vec<&Order> = self
            .orders
            .values()
            .filter(|o| o.customer_email == email)
            .collect();
        found.sort_by(|a, b| a.order_id.cmp(&b.order_id));
        found
    }

    /// All orders currently in the given status.
    pub fn get_orders_by_status(&self, status: OrderStatus) -> Vec<&Order> {
        self.orders.values().filter(|o| o.status == status).collect()
    }

    /// Status + details projection for a single order.
    pub fn get_order_status(&self, order_id: &str) -> Option<StatusReport> {
        self.get_order(order_id).map(Order::status_report)
    }

    /// Number of stored orders.
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

impl Default for SimulatedOrders {
    fn default() -> Self {
        Self::seeded(100)
    }
}

impl OrderLookup for SimulatedOrders {
    fn order(&self, order_id: &str) -> Option<Order> {
        self.get_order(order_id).cloned()
    }

    fn orders_for_email(&self, email: &str) -> Vec<Order> {
        self.get_customer_orders(email)
            .into_iter()
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn seeded_store_has_sequential_ids() {
        let store = SimulatedOrders::seeded(100);

        assert_eq!(store.len(), 100);
        assert!(store.get_order("ORD000001").is_some());
        assert!(store.get_order("ORD000100").is_some());
        assert!(store.get_order("ORD000101").is_none());
    }

    #[test]
    fn generated_orders_respect_status_fields() {
        let store = SimulatedOrders::seeded(200);

        for order in store.orders.values() {
            assert_eq!(order.status.has_tracking(), order.tracking_number.is_some());
            assert_eq!(order.status.has_tracking(), order.shipping_date.is_some());
            assert_eq!(
                order.status == OrderStatus::Delivered,
                order.delivery_date.is_some()
            );
            assert_eq!(order.status.is_declined(), order.decline_reason.is_some());
            assert_eq!(
                order.status == OrderStatus::Refunded,
                order.refund_amount.is_some()
            );
            assert!(!order.products.is_empty() && order.products.len() <= 3);
            let expected: f64 = order.products.iter().map(|p| p.price).sum();
            assert!((order.total - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn customer_lookup_matches_email() {
        let store = SimulatedOrders::seeded(10);

        let found = store.get_customer_orders("usuario3@ejemplo.com");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].order_id, "ORD000003");

        assert!(store.get_customer_orders("nadie@ejemplo.com").is_empty());
    }

    #[test]
    fn status_lookup_and_report_agree() {
        let store = SimulatedOrders::seeded(50);

        for status in OrderStatus::ALL {
            for order in store.get_orders_by_status(status) {
                let report = store.get_order_status(&order.order_id).unwrap();
                assert_eq!(report.status, status.label());
            }
        }
    }
}
