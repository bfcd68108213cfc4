use std::fmt;

use async_trait::async_trait;

use super::types::MarketRecord;

/// Failures a market source can report.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// No response arrived at all (DNS, refused connection, dropped socket).
    NetworkUnavailable(String),
    /// A response arrived but the request was rejected or the body was unusable.
    /// `status` is `None` when the status was fine but the body failed to decode.
    RequestFailed { status: Option<u16>, message: String },
    /// Anything else, e.g. a request that could not be built.
    Unexpected(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::NetworkUnavailable(msg) => write!(f, "network unavailable: {msg}"),
            FetchError::RequestFailed {
                status: Some(status),
                message,
            } => write!(f, "request failed (HTTP {status}): {message}"),
            FetchError::RequestFailed {
                status: None,
                message,
            } => write!(f, "request failed: {message}"),
            FetchError::Unexpected(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for FetchError {}

#[async_trait]
pub trait MarketSource: Send + Sync {
    /// Returns the name of the source, used in logs.
    fn name(&self) -> &str;

    /// Fetches the market list once. No caching, no retry.
    async fn fetch_markets(&self) -> Result<Vec<MarketRecord>, FetchError>;
}
