//! Per-request audit trail.
//!
//! Every order operation logs a start marker when it begins, a warning or
//! error line when it fails, and an end marker unconditionally. The end
//! marker is emitted from `Drop`, so it is written even if the handler
//! future is dropped mid-flight.

use std::time::Instant;

use strum::IntoStaticStr;
use tracing::{error, info, warn};

use crate::error::ApiError;
use crate::metrics;

/// Order operations that carry an audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Operation {
    FetchOne,
    FetchAll,
    Create,
    Update,
    Delete,
}

impl Operation {
    fn verb(self) -> &'static str {
        match self {
            Self::FetchOne | Self::FetchAll => "fetching",
            Self::Create => "creating",
            Self::Update => "updating",
            Self::Delete => "deleting",
        }
    }

    /// Metric label.
    pub fn label(self) -> &'static str {
        self.into()
    }
}

/// Guard that brackets one request with start/end log lines.
#[derive(Debug)]
pub struct RequestAudit {
    operation: Operation,
    /// e.g. "fetching order 5"
    action: String,
    start: Instant,
}

impl RequestAudit {
    /// Log the start marker.
    pub fn begin(operation: Operation, subject: impl AsRef<str>) -> Self {
        let action = format!("{} {}", operation.verb(), subject.as_ref());
        info!("{} started", capitalized(&action));

        Self {
            operation,
            action,
            start: Instant::now(),
        }
    }

    /// Log the failure outcome, if any, and hand the result back.
    pub fn finish<T>(self, result: Result<T, ApiError>) -> Result<T, ApiError> {
        if let Err(err) = &result {
            match err {
                ApiError::NotFound(id) => {
                    warn!("Order not found: {}", id);
                    metrics::inc_lookups_missed();
                }
                other => {
                    error!("Error {}: {}", self.action, other);
                    metrics::inc_requests_failed(self.operation.label());
                }
            }
        }
        result
    }
}

impl Drop for RequestAudit {
    fn drop(&mut self) {
        info!("{} ended", capitalized(&self.action));
        metrics::record_request_latency(self.start, self.operation.label());
    }
}

fn capitalized(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
