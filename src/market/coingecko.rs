//! CoinGecko market source.
//!
//! Issues a single `GET {base}/coins/markets?vs_currency=usd` per call and
//! maps `reqwest` failures onto [`FetchError`]:
//! - no response at all → `NetworkUnavailable`
//! - non-2xx, unreadable or undecodable body → `RequestFailed`
//! - a request that cannot even be built → `Unexpected`

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::market::{FetchError, MarketRecord, MarketSource};

pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";
pub const VS_CURRENCY: &str = "usd";

pub struct CoinGeckoSource {
    base_url: String,
    client: reqwest::Client,
}

impl CoinGeckoSource {
    pub fn new(base_url: Option<String>) -> Self {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn markets_url(&self) -> String {
        format!("{}/coins/markets", self.base_url)
    }
}

/// Classifies an error from `send()`. A builder error never reached the wire.
fn send_error(e: reqwest::Error) -> FetchError {
    if e.is_builder() {
        FetchError::Unexpected(e.to_string())
    } else {
        FetchError::NetworkUnavailable(e.to_string())
    }
}

#[async_trait]
impl MarketSource for CoinGeckoSource {
    fn name(&self) -> &str {
        "coingecko"
    }

    async fn fetch_markets(&self) -> Result<Vec<MarketRecord>, FetchError> {
        let url = self.markets_url();
        info!("Fetching market list: {} (vs_currency={})", url, VS_CURRENCY);

        let response = self
            .client
            .get(&url)
            .query(&[("vs_currency", VS_CURRENCY)])
            .send()
            .await
            .map_err(send_error)?;

        let status = response.status();
        debug!("Market list response status: {}", status);

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Market list request rejected: {} - {}", status, body);
            return Err(FetchError::RequestFailed {
                status: Some(status.as_u16()),
                message: body,
            });
        }

        let bytes = response.bytes().await.map_err(|e| FetchError::RequestFailed {
            status: None,
            message: e.to_string(),
        })?;

        let records: Vec<MarketRecord> =
            serde_json::from_slice(&bytes).map_err(|e| {
                warn!("Market list body did not decode: {}", e);
                FetchError::RequestFailed {
                    status: None,
                    message: e.to_string(),
                }
            })?;

        info!("Fetched {} market records", records.len());
        Ok(records)
    }
}
