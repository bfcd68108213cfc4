//! # Application State
//!
//! Core business state for coinlist. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── source: Arc<dyn MarketSource>  // where market lists come from
//! ├── list: ListState                // records + loading/error lifecycle
//! ├── query: ViewQuery               // search text + sort key
//! ├── detail: Option<MarketRecord>   // record handed to the detail view
//! └── status_message: String         // title bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::core::config::ResolvedConfig;
use crate::core::projector::{self, ViewQuery};
use crate::core::store::{ListState, RequestOrdering};
use crate::market::{MarketRecord, MarketSource};

pub struct App {
    pub source: Arc<dyn MarketSource>,
    pub list: ListState,
    pub query: ViewQuery,
    /// Selected record, copied out of the list. No re-fetch for detail display.
    pub detail: Option<MarketRecord>,
    pub status_message: String,
}

/// Everything the view layer needs to draw the list screen.
#[derive(Debug)]
pub struct ViewModel<'a> {
    pub rows: Vec<&'a MarketRecord>,
    pub loading: bool,
    pub refreshing: bool,
    pub error: Option<&'a str>,
}

impl ViewModel<'_> {
    /// A full-screen spinner is only shown for a non-refresh load.
    pub fn show_spinner(&self) -> bool {
        self.loading && !self.refreshing
    }
}

impl App {
    pub fn new(source: Arc<dyn MarketSource>, ordering: RequestOrdering) -> Self {
        Self {
            source,
            list: ListState::new(ordering),
            query: ViewQuery::default(),
            detail: None,
            status_message: String::new(),
        }
    }

    pub fn from_config(source: Arc<dyn MarketSource>, config: &ResolvedConfig) -> Self {
        let mut app = Self::new(source, config.request_ordering);
        app.query.sort_key = config.default_sort;
        app
    }

    /// Recomputes the derived view from the current records and query.
    pub fn view(&self) -> ViewModel<'_> {
        ViewModel {
            rows: projector::project(&self.list.records, &self.query),
            loading: self.list.loading,
            refreshing: self.list.refreshing,
            error: self.list.error.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::projector::SortKey;
    use crate::core::store::LoadMode;
    use crate::test_support::{record, test_app};

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert!(app.list.records.is_empty());
        assert!(app.detail.is_none());
        assert_eq!(app.query.sort_key, SortKey::Name);
        assert!(app.query.search_text.is_empty());
    }

    #[test]
    fn test_view_follows_query() {
        let mut app = test_app();
        app.list.records = vec![
            record("Bitcoin", Some(60000.0), None),
            record("Ethereum", Some(3000.0), None),
            record("Tether", Some(1.0), None),
        ];
        app.query.search_text = "e".to_string();
        app.query.sort_key = SortKey::Price;
        let names: Vec<&str> = app.view().rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Ethereum", "Tether"]);
    }

    #[test]
    fn test_spinner_hidden_during_refresh() {
        let mut app = test_app();
        app.list.begin_load(LoadMode::Initial);
        assert!(app.view().show_spinner());

        let mut app = test_app();
        app.list.begin_load(LoadMode::Refresh);
        let view = app.view();
        assert!(view.loading);
        assert!(!view.show_spinner());
    }
}
