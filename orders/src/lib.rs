//! # Orders
//!
//! Simulated order database for the support relay. The store generates a
//! fixed-size batch of random orders at startup and serves keyed lookups by
//! order id and by customer email. Consumers that only need lookups depend on
//! the [`OrderLookup`] trait rather than the concrete store.

pub mod order;
pub mod store;

pub use order::{Order, OrderStatus, Product, StatusDetails, StatusReport};
pub use store::{OrderLookup, SimulatedOrders};
