use clap::Parser;
use loralux::config::logging;
use loralux::services::{shutdown, testserver};
use std::net::SocketAddr;
use std::process::ExitCode;
use tokio::net::TcpListener;
use tracing::Instrument;

/// Serve random lumen sensor readings on GET /scrape
#[derive(Debug, Parser)]
#[command(name = "testserverd", version)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0:8080")]
    addr: SocketAddr,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = logging::init_tracing(0) {
        eprintln!("build logger: {}", e);
        return ExitCode::FAILURE;
    }

    let span = tracing::info_span!("testserverd", service = "testserverd");
    async move {
        let listener = match TcpListener::bind(args.addr).await {
            Ok(listener) => listener,
            Err(e) => {
                tracing::error!(error = %e, address = %args.addr, "fatal server error");
                return ExitCode::FAILURE;
            }
        };
        tracing::info!(address = %args.addr, "server started");

        let shutdown = shutdown::relay(async {
            shutdown::wait_for_signal().await;
            tracing::info!("shutdown signal received, attempting to gracefully terminate server");
        });

        match testserver::serve(listener, shutdown, testserver::SHUTDOWN_GRACE).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                tracing::error!(error = %e, "fatal server error");
                ExitCode::FAILURE
            }
        }
    }
    .instrument(span)
    .await
}
