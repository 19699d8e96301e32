use clap::Parser;
use loralux::config::{logging, Config};
use loralux::services::scheduler::ScrapeScheduler;
use loralux::services::scrape::{ScrapeClient, ScrapeError};
use loralux::services::shutdown;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::Instrument;

/// Scrape a LoRaWAN server for lumen sensor readings on a fixed interval
#[derive(Debug, Parser)]
#[command(name = "loraluxd", version)]
struct Args {
    /// Path of a JSON or YAML file with configuration values. When omitted the
    /// configuration is read from LORALUX_* environment variables.
    #[arg(long = "env-file")]
    env_file: Option<PathBuf>,

    /// Display verbose information
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = match &args.env_file {
        Some(path) => Config::from_file(path),
        None => Config::from_env(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("collect config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logging::init_tracing(config.log_level) {
        eprintln!("build logger: {}", e);
        return ExitCode::FAILURE;
    }

    let span = tracing::info_span!("loraluxd", service = "loraluxd");
    match run(args, config).instrument(span).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "scraper failed to start");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args, config: Config) -> Result<(), ScrapeError> {
    if args.verbose {
        tracing::info!(
            env_file = ?args.env_file,
            verbose = args.verbose,
            "values of CLI flags"
        );
        tracing::info!(
            log_level = config.log_level,
            server_address = %config.server_address,
            scrape_endpoint = %config.scrape_endpoint,
            scrape_interval = ?config.scrape_interval,
            read_timeout = ?config.read_timeout,
            "values of configuration"
        );
    }

    let client = ScrapeClient::new(config.scrape_target())?;
    let shutdown = shutdown::spawn_signal_listener();

    let scheduler = ScrapeScheduler::new(Arc::new(client), config.scrape_interval);
    let stats = scheduler.run(shutdown).await;

    tracing::info!(
        scrapes = stats.scrapes,
        failures = stats.failures,
        "scraper stopped"
    );

    Ok(())
}
