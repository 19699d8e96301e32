use tracing::level_filters::LevelFilter;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Map a zap-style numeric level onto a tracing filter.
pub fn level_filter(log_level: i8) -> LevelFilter {
    match log_level {
        i8::MIN..=-1 => LevelFilter::DEBUG,
        0 => LevelFilter::INFO,
        1 => LevelFilter::WARN,
        _ => LevelFilter::ERROR,
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the configured level.
pub fn init_tracing(log_level: i8) -> Result<(), TryInitError> {
    let filter = EnvFilter::builder()
        .with_default_directive(level_filter(log_level).into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
}
