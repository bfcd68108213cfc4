//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::core::store::RequestOrdering;
use crate::market::{FetchError, MarketRecord, MarketSource};

/// A source that replays scripted results, one per call.
/// Once the script runs out it reports an empty list.
pub struct StubSource {
    responses: Mutex<VecDeque<Result<Vec<MarketRecord>, FetchError>>>,
    calls: AtomicUsize,
}

impl StubSource {
    pub fn new(responses: Vec<Result<Vec<MarketRecord>, FetchError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarketSource for StubSource {
    fn name(&self) -> &str {
        "stub"
    }

    async fn fetch_markets(&self) -> Result<Vec<MarketRecord>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// A record named `name` with an id and symbol derived from it.
pub fn record(name: &str, current_price: Option<f64>, market_cap: Option<f64>) -> MarketRecord {
    let id = name.to_lowercase().replace(' ', "-");
    let symbol: String = name.chars().take(3).collect::<String>().to_lowercase();
    MarketRecord {
        current_price,
        market_cap,
        ..MarketRecord::new(id, symbol, name)
    }
}

/// Creates a test App backed by a StubSource with no scripted results.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(
        Arc::new(StubSource::new(Vec::new())),
        RequestOrdering::default(),
    )
}
