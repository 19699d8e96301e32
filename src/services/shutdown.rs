use std::future::Future;
use tokio::sync::watch;

pub type ShutdownReceiver = watch::Receiver<bool>;

/// Run `signal` on its own task and publish a single shutdown event once it
/// resolves. The task does nothing else.
pub fn relay<F>(signal: F) -> ShutdownReceiver
where
    F: Future<Output = ()> + Send + 'static,
{
    let (tx, rx) = watch::channel(false);

    tokio::spawn(async move {
        signal.await;
        let _ = tx.send(true);
    });

    rx
}

/// Relay SIGINT / SIGTERM into a shutdown channel.
pub fn spawn_signal_listener() -> ShutdownReceiver {
    relay(wait_for_signal())
}

/// Resolve on the first interrupt or termination signal.
pub async fn wait_for_signal() {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for interrupt signal");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for termination signal");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => {}
        _ = terminate => {}
    }
}

/// Resolve once shutdown has been published, or the sender is gone.
pub async fn signalled(mut shutdown: ShutdownReceiver) {
    let _ = shutdown.wait_for(|stop| *stop).await;
}
