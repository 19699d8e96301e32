//! Stand-in LoRaWAN server that serves random lumen readings on `/scrape`.

use axum::{routing::get, Json, Router};
use rand::Rng;
use std::time::Duration;
use tokio::net::TcpListener;

use crate::services::scrape::ScrapeResponse;
use crate::services::shutdown::{signalled, ShutdownReceiver};

pub const MIN_POINTS: usize = 10;
pub const MAX_POINTS: usize = 50;

/// How long in-flight requests get to finish once shutdown starts.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

pub fn router() -> Router {
    Router::new().route("/scrape", get(scrape))
}

async fn scrape() -> Json<ScrapeResponse> {
    let data = synthetic_readings();
    tracing::info!(points = data.len(), "/scrape invoked");
    Json(ScrapeResponse { data })
}

/// Between `MIN_POINTS` and `MAX_POINTS` readings, each in `[0, 1)`.
pub fn synthetic_readings() -> Vec<f64> {
    let mut rng = rand::rng();
    let points = rng.random_range(MIN_POINTS..=MAX_POINTS);
    (0..points).map(|_| rng.random::<f64>()).collect()
}

/// Serve the router until `shutdown` fires, then drain connections for at
/// most `grace` before giving up on them.
pub async fn serve(
    listener: TcpListener,
    shutdown: ShutdownReceiver,
    grace: Duration,
) -> std::io::Result<()> {
    let stop = shutdown.clone();
    let server = async move {
        axum::serve(listener, router())
            .with_graceful_shutdown(signalled(stop))
            .await
    };
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => result,
        _ = async {
            signalled(shutdown).await;
            tokio::time::sleep(grace).await;
        } => {
            tracing::warn!(grace = ?grace, "graceful shutdown timed out, closing remaining connections");
            Ok(())
        }
    }
}
