use async_trait::async_trait;
use reqwest::Client;

use crate::services::scrape::{ScrapeError, ScrapeResponse, ScrapeTarget};

/// Something the scheduler can scrape once per tick.
#[async_trait]
pub trait Scraper: Send + Sync {
    /// URL being scraped, for logging.
    fn url(&self) -> &str;

    async fn scrape(&self) -> Result<ScrapeResponse, ScrapeError>;
}

/// HTTP scraper for a single LoRaWAN server endpoint.
///
/// The underlying client is built once with the target timeout and never
/// reconfigured; the timeout covers connecting, sending and reading the body.
pub struct ScrapeClient {
    client: Client,
    target: ScrapeTarget,
}

impl ScrapeClient {
    pub fn new(target: ScrapeTarget) -> Result<Self, ScrapeError> {
        let client = Client::builder().timeout(target.timeout()).build()?;

        Ok(Self { client, target })
    }

    pub fn target(&self) -> &ScrapeTarget {
        &self.target
    }

    /// Issue one GET against the target and decode `{"data": [...]}`.
    ///
    /// The status code is not inspected: any response whose body decodes is
    /// a success. The body must hold exactly one JSON value, trailing bytes
    /// are a decode error. The body is always read to the end so the
    /// connection goes back to the pool.
    pub async fn scrape(&self) -> Result<ScrapeResponse, ScrapeError> {
        let response = self.client.get(self.target.url()).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        tracing::debug!(%status, bytes = body.len(), url = self.target.url(), "scrape response received");

        let parsed: ScrapeResponse = serde_json::from_slice(&body)?;
        Ok(parsed)
    }
}

#[async_trait]
impl Scraper for ScrapeClient {
    fn url(&self) -> &str {
        self.target.url()
    }

    async fn scrape(&self) -> Result<ScrapeResponse, ScrapeError> {
        ScrapeClient::scrape(self).await
    }
}
