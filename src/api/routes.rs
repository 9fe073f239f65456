//! HTTP API route definitions.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{
    create_order, delete_order, get_order, home, list_orders, metrics_text, not_found,
    update_order, AppState,
};

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        // Order endpoints
        .route("/orders", get(list_orders))
        .route("/order", post(create_order))
        .route(
            "/order/:order_id",
            get(get_order).put(update_order).delete(delete_order),
        )
        // Prometheus exposition; 404 when metrics are disabled
        .route("/metrics", get(metrics_text))
        .fallback(not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
