//! HTTP API handlers.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode, Uri};
use axum::Json;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::audit::{Operation, RequestAudit};
use crate::error::ApiError;
use crate::metrics;
use crate::orders::{IdStrategy, Order, OrderListing, OrderStore};

/// Body of `GET /`.
pub const WELCOME_MESSAGE: &str = "Welcome to KXN Technologies!";

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// The order store.
    pub store: Arc<OrderStore>,
    /// Reject undecodable payloads with 400 instead of 500.
    pub strict_payloads: bool,
    /// Prometheus handle, present when metrics are enabled.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create app state around an existing store.
    pub fn new(store: Arc<OrderStore>) -> Self {
        Self {
            store,
            strict_payloads: false,
            metrics: None,
        }
    }

    /// Set strict payload validation.
    pub fn with_strict_payloads(mut self, strict: bool) -> Self {
        self.strict_payloads = strict;
        self
    }

    /// Attach a Prometheus handle to serve `/metrics`.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Arc::new(OrderStore::new(IdStrategy::default())))
    }
}

/// Body of `POST /order`.
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    /// Category of the new order.
    pub category: String,
}

/// Body of `PUT /order/{order_id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateOrderRequest {
    /// Replacement status, stored verbatim.
    pub status: String,
}

/// Acknowledgement for create and update.
#[derive(Debug, Serialize)]
pub struct OrderReceipt {
    /// Id of the affected order.
    pub order_id: u64,
    /// "Order received" or "Order updated".
    pub status: &'static str,
}

/// Acknowledgement for delete.
#[derive(Debug, Serialize)]
pub struct DeleteReceipt {
    /// Always "Order deleted".
    pub status: &'static str,
}

/// Root handler - fixed greeting.
pub async fn home() -> &'static str {
    info!("Home endpoint accessed");
    WELCOME_MESSAGE
}

/// `GET /order/{order_id}` - single order.
pub async fn get_order(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    let order_id = parse_order_id(&raw_id)?;
    let audit = RequestAudit::begin(Operation::FetchOne, format!("order {}", order_id));

    let result = state.store.get(order_id).await.map_err(ApiError::from);
    if let Ok(order) = &result {
        info!("Order found: {}", order);
    }

    audit.finish(result).map(Json)
}

/// `GET /orders` - every order keyed by id.
pub async fn list_orders(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<u64, Order>>, ApiError> {
    let audit = RequestAudit::begin(Operation::FetchAll, "all orders");

    let orders = state.store.list().await;
    info!("Fetched {} orders", orders.len());

    audit.finish(Ok(orders)).map(Json)
}

/// `POST /order` - create an order from `{"category": ...}`.
pub async fn create_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<OrderReceipt>), ApiError> {
    let audit = RequestAudit::begin(Operation::Create, "order");

    let result = create_order_inner(&state, &headers, &body).await;
    audit.finish(result).map(|order_id| {
        (
            StatusCode::CREATED,
            Json(OrderReceipt {
                order_id,
                status: "Order received",
            }),
        )
    })
}

async fn create_order_inner(
    state: &AppState,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<u64, ApiError> {
    let request: CreateOrderRequest = decode_body(headers, body, state.strict_payloads)?;
    let (order_id, order) = state.store.create(request.category).await;

    info!("Order created: {}", order);
    metrics::inc_orders_created();
    Ok(order_id)
}

/// `PUT /order/{order_id}` - replace the status from `{"status": ...}`.
pub async fn update_order(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<OrderReceipt>, ApiError> {
    let order_id = parse_order_id(&raw_id)?;
    let audit = RequestAudit::begin(Operation::Update, format!("order {}", order_id));

    let result = update_order_inner(&state, order_id, &headers, &body).await;
    audit.finish(result).map(|()| {
        Json(OrderReceipt {
            order_id,
            status: "Order updated",
        })
    })
}

async fn update_order_inner(
    state: &AppState,
    order_id: u64,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<(), ApiError> {
    // Absent ids are reported as 404 even when the body is unusable.
    if !state.store.contains(order_id).await {
        return Err(ApiError::NotFound(order_id));
    }

    let request: UpdateOrderRequest = decode_body(headers, body, state.strict_payloads)?;
    let order = state.store.update_status(order_id, request.status).await?;

    info!("Order updated: {}", order);
    metrics::inc_orders_updated();
    Ok(())
}

/// `DELETE /order/{order_id}` - remove an order.
pub async fn delete_order(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<DeleteReceipt>, ApiError> {
    let order_id = parse_order_id(&raw_id)?;
    let audit = RequestAudit::begin(Operation::Delete, format!("order {}", order_id));

    let result = state.store.delete(order_id).await.map_err(ApiError::from);
    if let Ok(remaining) = &result {
        info!(
            "Order deleted: {} and remaining orders are {}",
            order_id,
            OrderListing(remaining)
        );
        metrics::inc_orders_deleted();
    }

    audit.finish(result).map(|_| Json(DeleteReceipt {
        status: "Order deleted",
    }))
}

/// `GET /metrics` - Prometheus exposition.
pub async fn metrics_text(State(state): State<AppState>, uri: Uri) -> Result<String, ApiError> {
    state
        .metrics
        .as_ref()
        .map(PrometheusHandle::render)
        .ok_or_else(|| ApiError::RouteNotFound(uri.path().to_string()))
}

/// Fallback for unmatched routes.
pub async fn not_found(uri: Uri) -> ApiError {
    debug!("No route for {}", uri.path());
    ApiError::RouteNotFound(uri.path().to_string())
}

/// Order ids are plain decimal digits; anything else does not match the route.
fn parse_order_id(raw: &str) -> Result<u64, ApiError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::RouteNotFound(format!("/order/{}", raw)));
    }
    raw.parse()
        .map_err(|_| ApiError::RouteNotFound(format!("/order/{}", raw)))
}

/// `application/json` or any `application/*+json` type, parameters ignored.
fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let mime = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

/// Decode a JSON body declared as JSON by its content type.
fn decode_body<T: DeserializeOwned>(
    headers: &HeaderMap,
    body: &[u8],
    strict: bool,
) -> Result<T, ApiError> {
    let reject = |detail: String| {
        if strict {
            ApiError::BadRequest(detail)
        } else {
            ApiError::Internal(detail)
        }
    };

    if !is_json_content_type(headers) {
        let declared = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("none");
        return Err(reject(format!("unsupported content type: {}", declared)));
    }

    serde_json::from_slice(body).map_err(|e| reject(e.to_string()))
}
