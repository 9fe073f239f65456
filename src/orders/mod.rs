//! Order domain: the order record and the in-memory store.
//!
//! This module handles:
//! - Order types and id assignment strategies
//! - The process-lifetime order store

pub mod store;
pub mod types;

pub use store::OrderStore;
pub use types::{IdStrategy, Order, OrderListing, INITIAL_STATUS};
