//! # Actions
//!
//! Everything that can happen in coinlist becomes an `Action`.
//! User types in the search box? That's `Action::SetSearchText(text)`.
//! A fetch comes back? That's `Action::FetchCompleted { ticket, result }`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns the `Effect` the adapter should carry out. No I/O
//! happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info, warn};

use crate::core::projector::SortKey;
use crate::core::state::App;
use crate::core::store::{LoadMode, LoadTicket};
use crate::market::{FetchError, MarketRecord};

#[derive(Debug)]
pub enum Action {
    /// Initial load, or retry after an error.
    Load,
    /// Pull-to-refresh: reload while the current list stays visible.
    Refresh,
    /// A spawned fetch finished.
    FetchCompleted {
        ticket: LoadTicket,
        result: Result<Vec<MarketRecord>, FetchError>,
    },
    SetSearchText(String),
    SetSortKey(SortKey),
    CycleSortKey,
    /// Open the detail view for the record with this id.
    Select(String),
    CloseDetail,
    Quit,
}

/// Side effects requested by `update()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Run the fetch for this ticket and report back with `FetchCompleted`.
    SpawnFetch(LoadTicket),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Load => {
            let ticket = app.list.begin_load(LoadMode::Initial);
            app.status_message = "Loading...".to_string();
            Effect::SpawnFetch(ticket)
        }
        Action::Refresh => {
            let ticket = app.list.begin_load(LoadMode::Refresh);
            app.status_message = "Refreshing...".to_string();
            Effect::SpawnFetch(ticket)
        }
        Action::FetchCompleted { ticket, result } => {
            app.list.finish_load(ticket, result);
            if !app.list.loading {
                app.status_message = match &app.list.error {
                    Some(_) => "Load failed".to_string(),
                    None => format!("{} coins", app.list.records.len()),
                };
            }
            Effect::None
        }
        Action::SetSearchText(text) => {
            debug!("Search text: {:?}", text);
            app.query.search_text = text;
            Effect::None
        }
        Action::SetSortKey(key) => {
            app.query.sort_key = key;
            app.status_message = format!("Sort: {}", key.label());
            Effect::None
        }
        Action::CycleSortKey => {
            let key = app.query.sort_key.next();
            update(app, Action::SetSortKey(key))
        }
        Action::Select(id) => {
            match app.list.records.iter().find(|r| r.id == id) {
                Some(record) => {
                    info!("Showing detail for {}", record.id);
                    app.detail = Some(record.clone());
                }
                None => {
                    warn!("Select for unknown id {}", id);
                    app.status_message = format!("{id} is no longer listed");
                }
            }
            Effect::None
        }
        Action::CloseDetail => {
            app.detail = None;
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}
