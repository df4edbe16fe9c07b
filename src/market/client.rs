//! PredictIt marketdata API client.

use tracing::{debug, instrument};

use crate::config::Config;
use crate::error::MarketError;

use super::types::MarketSnapshot;

/// Client for the PredictIt marketdata endpoint.
///
/// One pull per cycle: fetch the whole snapshot, or report a fetch failure
/// the caller does not attempt to interpret. Retries belong to the driver.
#[derive(Debug, Clone)]
pub struct PredictItClient {
    /// HTTP client for API requests.
    http: reqwest::Client,
    /// Marketdata endpoint URL.
    api_url: String,
}

impl PredictItClient {
    /// Create a new client from config with explicit HTTP timeouts.
    pub fn new(config: &Config) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(config.http_timeout_ms))
            .connect_timeout(std::time::Duration::from_millis(2_000))
            .tcp_keepalive(std::time::Duration::from_secs(30))
            .build()
            .expect("failed to create HTTP client");

        Self {
            http,
            api_url: config.predictit_api_url.clone(),
        }
    }

    /// Fetch the current snapshot of all markets.
    #[instrument(skip(self))]
    pub async fn fetch_snapshot(&self) -> Result<MarketSnapshot, MarketError> {
        let response = self.http.get(&self.api_url).send().await?;

        if !response.status().is_success() {
            return Err(MarketError::FetchFailed {
                status: response.status().as_u16(),
            });
        }

        let snapshot: MarketSnapshot = response
            .json()
            .await
            .map_err(|e| MarketError::ParseError(format!("failed to parse snapshot: {}", e)))?;

        debug!(markets = snapshot.markets.len(), "fetched snapshot");

        Ok(snapshot)
    }

    /// Get the marketdata endpoint URL.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}
