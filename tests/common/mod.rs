use axum::{http::StatusCode, routing::get, Router};
use loralux::services::scrape::{ScrapeClient, ScrapeTarget};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

// Spawn an axum app on an ephemeral local port
#[allow(dead_code)]
pub async fn spawn_server(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server failed");
    });

    addr
}

// Router that answers /scrape with a fixed status and body
#[allow(dead_code)]
pub fn static_body(status: StatusCode, body: &'static str) -> Router {
    Router::new().route("/scrape", get(move || async move { (status, body) }))
}

// An address nothing listens on
#[allow(dead_code)]
pub async fn refused_address() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local address");
    drop(listener);
    addr
}

#[allow(dead_code)]
pub fn client_for(addr: SocketAddr, timeout: Duration) -> ScrapeClient {
    let target = ScrapeTarget::new(&format!("http://{}", addr), "/scrape", timeout);
    ScrapeClient::new(target).expect("Failed to build scrape client")
}

// In-memory sink for formatted log lines
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[allow(dead_code)]
impl LogBuffer {
    pub fn lines(&self) -> Vec<String> {
        String::from_utf8(self.0.lock().unwrap().clone())
            .expect("Log output is not UTF-8")
            .lines()
            .map(str::to_string)
            .collect()
    }

    // Route INFO and above on the current thread into this buffer
    pub fn capture(&self) -> tracing::subscriber::DefaultGuard {
        let writer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .without_time()
            .finish();
        tracing::subscriber::set_default(subscriber)
    }
}
