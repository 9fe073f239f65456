//! HTTP API module for the order endpoints.

pub mod audit;
pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
