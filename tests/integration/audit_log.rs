//! Audit trail lines emitted around each order request.

use std::io;
use std::sync::{Arc, Mutex};

use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use tracing_subscriber::fmt::MakeWriter;

use super::{send, test_app};
use kxn_orders::orders::IdStrategy;

/// In-memory log sink shared between the subscriber and the test.
#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl CapturedLog {
    /// Drain the captured lines.
    fn take_lines(&self) -> Vec<String> {
        let mut bytes = self.0.lock().unwrap();
        let lines = String::from_utf8_lossy(&bytes)
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();
        bytes.clear();
        lines
    }
}

impl io::Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLog {
    type Writer = CapturedLog;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Subscriber printing bare messages from this crate only.
fn capture() -> (CapturedLog, tracing::subscriber::DefaultGuard) {
    let log = CapturedLog::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(log.clone())
        .with_env_filter("kxn_orders=info")
        .without_time()
        .with_level(false)
        .with_target(false)
        .with_ansi(false)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (log, guard)
}

#[tokio::test]
async fn every_request_is_bracketed_by_start_and_end_lines() {
    let (log, _guard) = capture();
    let (app, _) = test_app(IdStrategy::CountPlusOne);

    let (status, _) = send(&app, Method::POST, "/order", Some(r#"{"category":"Pizza"}"#)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        log.take_lines(),
        vec![
            "Creating order started",
            "Order created: {'category': 'Pizza', 'status': 'Preparing'}",
            "Creating order ended",
        ]
    );

    let (status, _) = send(&app, Method::POST, "/order", Some(r#"{"kind":"Pizza"}"#)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let lines = log.take_lines();
    assert_eq!(lines.len(), 3, "{:?}", lines);
    assert_eq!(lines[0], "Creating order started");
    assert!(
        lines[1].starts_with("Error creating order: missing field `category`"),
        "{}",
        lines[1]
    );
    assert_eq!(lines[2], "Creating order ended");

    let (status, _) = send(&app, Method::PUT, "/order/7", Some(r#"{"status":"Ready"}"#)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        log.take_lines(),
        vec![
            "Updating order 7 started",
            "Order not found: 7",
            "Updating order 7 ended",
        ]
    );

    let (status, _) = send(&app, Method::PUT, "/order/1", Some(r#"{"status":"Ready"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        log.take_lines(),
        vec![
            "Updating order 1 started",
            "Order updated: {'category': 'Pizza', 'status': 'Ready'}",
            "Updating order 1 ended",
        ]
    );

    let (status, _) = send(&app, Method::GET, "/order/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        log.take_lines(),
        vec![
            "Fetching order 1 started",
            "Order found: {'category': 'Pizza', 'status': 'Ready'}",
            "Fetching order 1 ended",
        ]
    );

    let (status, _) = send(&app, Method::DELETE, "/order/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        log.take_lines(),
        vec![
            "Deleting order 1 started",
            "Order deleted: 1 and remaining orders are {}",
            "Deleting order 1 ended",
        ]
    );

    let (status, _) = send(&app, Method::GET, "/orders", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        log.take_lines(),
        vec![
            "Fetching all orders started",
            "Fetched 0 orders",
            "Fetching all orders ended",
        ]
    );
}

#[tokio::test]
async fn root_and_unmatched_routes_skip_the_bracket() {
    let (log, _guard) = capture();
    let (app, _) = test_app(IdStrategy::CountPlusOne);

    send(&app, Method::GET, "/", None).await;
    assert_eq!(log.take_lines(), vec!["Home endpoint accessed"]);

    let (status, _) = send(&app, Method::GET, "/order/abc", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(log.take_lines().is_empty());
}
