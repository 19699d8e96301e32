use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::services::scrape::Scraper;
use crate::services::shutdown::ShutdownReceiver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Blocked on the next tick or the shutdown signal
    Waiting,
    /// Running one scrape to completion
    Scraping,
    /// Shutdown observed, loop is returning
    Draining,
}

impl SchedulerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Scraping => "scraping",
            Self::Draining => "draining",
        }
    }
}

impl fmt::Display for SchedulerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome counts for one scheduler run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrapeStats {
    pub scrapes: u64,
    pub successes: u64,
    pub failures: u64,
}

/// Scrapes on a fixed interval until shutdown.
///
/// Scrapes run inline in the loop, so two of them never overlap and a scrape
/// that has started always finishes before shutdown is looked at again.
pub struct ScrapeScheduler {
    scraper: Arc<dyn Scraper>,
    interval: Duration,
}

impl ScrapeScheduler {
    /// `interval` must be non-zero.
    pub fn new(scraper: Arc<dyn Scraper>, interval: Duration) -> Self {
        Self { scraper, interval }
    }

    /// Run the polling loop until `shutdown` publishes `true` or its sender
    /// is dropped. The first scrape happens one interval after start.
    ///
    /// When a tick and shutdown are ready at the same time, shutdown wins.
    pub async fn run(&self, mut shutdown: ShutdownReceiver) -> ScrapeStats {
        let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
        // A scrape that overruns the interval is followed by one tick, not a burst.
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut stats = ScrapeStats::default();

        tracing::info!(
            interval = ?self.interval,
            address = self.scraper.url(),
            "starting to scrape lorawan server"
        );

        loop {
            tokio::select! {
                biased;

                // The watch::Ref must not outlive this branch: it is !Send.
                _ = async { let _ = shutdown.wait_for(|stop| *stop).await; } => {
                    tracing::info!("shutdown signal received, attempting to shutdown gracefully");
                    break;
                }
                _ = ticker.tick() => {
                    tracing::trace!(state = %SchedulerState::Scraping);
                    self.scrape_once(&mut stats).await;
                }
            }
        }

        tracing::debug!(
            state = %SchedulerState::Draining,
            scrapes = stats.scrapes,
            successes = stats.successes,
            failures = stats.failures,
            "scrape loop stopped"
        );

        stats
    }

    async fn scrape_once(&self, stats: &mut ScrapeStats) {
        stats.scrapes += 1;

        match self.scraper.scrape().await {
            Ok(response) => {
                stats.successes += 1;
                tracing::info!(points = response.points(), "successfully scraped server");
            }
            Err(e) => {
                stats.failures += 1;
                tracing::warn!(error = %e, "error encountered while scraping server");
            }
        }
    }
}
