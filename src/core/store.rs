//! # List Store
//!
//! The authoritative market list plus its load lifecycle.
//!
//! ```text
//!            begin_load()              finish_load(Ok)
//!   Idle ───────────────▶ Loading ─────────────────────▶ Loaded
//!                           │  ▲                            │
//!                           │  └──────── begin_load() ──────┤
//!                           │  finish_load(Err)             │
//!                           └─────────────────────▶ Failed ─┘
//! ```
//!
//! `load()` / `refresh()` run both halves around a single fetch. The TUI uses
//! the halves directly: `begin_load` on the event loop, the fetch on a tokio
//! task, `finish_load` back on the event loop when the result arrives.
//!
//! Loads may overlap (a refresh fired while the first load is still out).
//! `loading` stays true until every outstanding request has completed. Which
//! completions get applied is decided by [`RequestOrdering`].

use clap::ValueEnum;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::market::{FetchError, MarketRecord, MarketSource};

pub const NO_CONNECTION_MESSAGE: &str = "No internet connection";
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch cryptocurrency data";
pub const FALLBACK_MESSAGE: &str = "Failed to load data";

/// Where the store is in its load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// How a load was requested. A refresh keeps the current list on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    Initial,
    Refresh,
}

/// Policy for completions of overlapping loads.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum RequestOrdering {
    /// Apply every completion as it arrives; the last one to complete wins.
    #[default]
    LastCompleted,
    /// Drop completions from requests issued before the newest one.
    LatestIssued,
}

/// Identifies one issued load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub id: u64,
    pub mode: LoadMode,
}

/// What `finish_load` did with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Superseded,
}

/// Converts a fetch failure into the message shown to the user.
pub fn error_message(err: &FetchError) -> String {
    match err {
        FetchError::NetworkUnavailable(_) => NO_CONNECTION_MESSAGE.to_string(),
        FetchError::RequestFailed { .. } => FETCH_FAILED_MESSAGE.to_string(),
        FetchError::Unexpected(msg) if msg.trim().is_empty() => FALLBACK_MESSAGE.to_string(),
        FetchError::Unexpected(msg) => msg.clone(),
    }
}

#[derive(Debug)]
pub struct ListState {
    /// Server order. Replaced wholesale on every applied success.
    pub records: Vec<MarketRecord>,
    pub loading: bool,
    pub error: Option<String>,
    /// True while at least one refresh is outstanding.
    pub refreshing: bool,
    ordering: RequestOrdering,
    outcome: LoadPhase,
    last_issued: u64,
    in_flight: usize,
    refreshes_in_flight: usize,
}

impl Default for ListState {
    fn default() -> Self {
        Self::new(RequestOrdering::default())
    }
}

impl ListState {
    pub fn new(ordering: RequestOrdering) -> Self {
        Self {
            records: Vec::new(),
            loading: false,
            error: None,
            refreshing: false,
            ordering,
            outcome: LoadPhase::Idle,
            last_issued: 0,
            in_flight: 0,
            refreshes_in_flight: 0,
        }
    }

    pub fn ordering(&self) -> RequestOrdering {
        self.ordering
    }

    pub fn phase(&self) -> LoadPhase {
        if self.loading {
            LoadPhase::Loading
        } else {
            self.outcome
        }
    }

    /// Enters `Loading`: sets `loading`, clears `error`, issues a ticket.
    pub fn begin_load(&mut self, mode: LoadMode) -> LoadTicket {
        self.last_issued += 1;
        self.in_flight += 1;
        if mode == LoadMode::Refresh {
            self.refreshes_in_flight += 1;
        }
        self.loading = true;
        self.refreshing = self.refreshes_in_flight > 0;
        self.error = None;

        let ticket = LoadTicket {
            id: self.last_issued,
            mode,
        };
        info!(
            "Load #{} started ({:?}, {} in flight)",
            ticket.id, mode, self.in_flight
        );
        ticket
    }

    /// Applies the result of the load identified by `ticket`.
    ///
    /// On success the list is replaced and `error` cleared. On failure the list
    /// is kept and `error` holds the display message. Either way `loading`
    /// drops to false once nothing else is outstanding.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<MarketRecord>, FetchError>,
    ) -> Completion {
        self.in_flight = self.in_flight.saturating_sub(1);
        if ticket.mode == LoadMode::Refresh {
            self.refreshes_in_flight = self.refreshes_in_flight.saturating_sub(1);
        }
        self.loading = self.in_flight > 0;
        self.refreshing = self.refreshes_in_flight > 0;

        if self.ordering == RequestOrdering::LatestIssued && ticket.id != self.last_issued {
            debug!(
                "Load #{} superseded by #{}, result dropped",
                ticket.id, self.last_issued
            );
            return Completion::Superseded;
        }

        match result {
            Ok(records) => {
                info!("Load #{} succeeded with {} records", ticket.id, records.len());
                self.records = records;
                self.error = None;
                self.outcome = LoadPhase::Loaded;
            }
            Err(e) => {
                warn!("Load #{} failed: {}", ticket.id, e);
                self.error = Some(error_message(&e));
                self.outcome = LoadPhase::Failed;
            }
        }
        Completion::Applied
    }

    /// Fetches from `source` and applies the result.
    pub async fn load(&mut self, source: &dyn MarketSource) -> Completion {
        let ticket = self.begin_load(LoadMode::Initial);
        let result = source.fetch_markets().await;
        self.finish_load(ticket, result)
    }

    /// Same transitions as [`load`](Self::load), flagged as a refresh so the
    /// view keeps the current list visible while it runs.
    pub async fn refresh(&mut self, source: &dyn MarketSource) -> Completion {
        let ticket = self.begin_load(LoadMode::Refresh);
        let result = source.fetch_markets().await;
        self.finish_load(ticket, result)
    }
}
