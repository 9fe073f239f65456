//! Unified error types for the order service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Process-level error type (startup, configuration, I/O).
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Log file could not be opened.
    #[error("logging error: {0}")]
    Logging(#[from] tracing_appender::rolling::InitError),

    /// Prometheus recorder could not be installed.
    #[error("metrics error: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),
}

/// Order store errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No order is stored under this id.
    #[error("order {0} not found")]
    NotFound(u64),
}

/// Errors surfaced by the HTTP handlers.
///
/// Every variant renders as `{"error": "<message>"}`. Detail carried by
/// [`ApiError::BadRequest`] and [`ApiError::Internal`] goes to the log only.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The referenced order id is absent from the store.
    #[error("order {0} not found")]
    NotFound(u64),

    /// No route matches the request path.
    #[error("no route for {0}")]
    RouteNotFound(String),

    /// Payload rejected by strict validation.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Any other failure while handling the request.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) | Self::RouteNotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "Order not found",
            Self::RouteNotFound(_) => "Not Found",
            Self::BadRequest(_) => "Bad Request",
            Self::Internal(_) => "Internal Server Error",
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => Self::NotFound(id),
        }
    }
}

/// JSON body for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.public_message(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ServiceError>;
