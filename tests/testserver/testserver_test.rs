// =============================================================================
// INTEGRATION TESTS - TEST SERVER
// Synthetic readings endpoint and its graceful shutdown
// =============================================================================

use crate::common::client_for;
use axum::http::StatusCode;
use axum_test::TestServer;
use loralux::services::scrape::ScrapeResponse;
use loralux::services::testserver::{self, MAX_POINTS, MIN_POINTS};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::watch;

#[tokio::test]
async fn test_scrape_endpoint_serves_random_readings() {
    let server = TestServer::new(testserver::router()).expect("Failed to create test server");

    let response = server.get("/scrape").await;
    response.assert_status(StatusCode::OK);

    let body: ScrapeResponse = response.json();
    assert!((MIN_POINTS..=MAX_POINTS).contains(&body.data.len()));
    assert!(body.data.iter().all(|v| (0.0..1.0).contains(v)));
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let server = TestServer::new(testserver::router()).expect("Failed to create test server");

    let response = server.get("/metrics").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_serve_answers_scrapes_and_stops_on_shutdown() {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = watch::channel(false);

    let handle = tokio::spawn(testserver::serve(listener, rx, Duration::from_secs(1)));

    let client = client_for(addr, Duration::from_secs(2));
    let response = client.scrape().await.expect("scrape should succeed");
    assert!((MIN_POINTS..=MAX_POINTS).contains(&response.points()));

    tx.send(true).unwrap();

    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server did not stop")
        .expect("server task panicked");
    assert!(result.is_ok());
}
