//! KXN order service.
//!
//! A small HTTP service exposing CRUD operations over an in-memory collection
//! of orders. Each order carries a category, fixed at creation, and a status
//! that starts as `"Preparing"` and is replaced verbatim on update.
//!
//! ```text
//! POST   /order             {"category": "Pizza"}  -> 201 {"order_id": 1, "status": "Order received"}
//! GET    /order/1                                  -> 200 {"category": "Pizza", "status": "Preparing"}
//! PUT    /order/1           {"status": "Ready"}    -> 200 {"order_id": 1, "status": "Order updated"}
//! DELETE /order/1                                  -> 200 {"status": "Order deleted"}
//! GET    /orders                                   -> 200 {"<id>": {...}, ...}
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`orders`]: Order record and in-memory store
//! - [`api`]: HTTP routes, handlers and the request audit trail
//! - [`logging`]: File and stdout log output
//! - [`metrics`]: Prometheus counters and latency histograms
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod orders;
pub mod utils;

pub use config::Config;
pub use error::{ApiError, Result, ServiceError, StoreError};
