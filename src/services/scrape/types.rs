use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where and how long to scrape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeTarget {
    url: String,
    timeout: Duration,
}

impl ScrapeTarget {
    /// `address` and `endpoint` are joined as-is, e.g. `http://host:8080` + `/scrape`.
    pub fn new(address: &str, endpoint: &str, timeout: Duration) -> Self {
        Self {
            url: format!("{}{}", address, endpoint),
            timeout,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Body served by a LoRaWAN server: lumen sensor readings, in order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrapeResponse {
    pub data: Vec<f64>,
}

impl ScrapeResponse {
    pub fn points(&self) -> usize {
        self.data.len()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("do scrape request: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ScrapeError {
    pub fn is_transport(&self) -> bool {
        matches!(self, ScrapeError::Transport(_))
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, ScrapeError::Decode(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ScrapeError::Transport(e) if e.is_timeout())
    }
}
