//! # Core Application Logic
//!
//! This module contains coinlist's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • ListState (store)    │
//!                    │  • projector (view)     │
//!                    │  • Action / update()    │
//!                    │                         │
//!                    │  No UI. Fetches are     │
//!                    │  requested, not run.    │
//!                    └───────────┬─────────────┘
//!                                │
//!                  ┌─────────────┴─────────────┐
//!                  ▼                           ▼
//!           ┌────────────┐              ┌────────────┐
//!           │    TUI     │              │   market   │
//!           │  Adapter   │              │  (reqwest) │
//!           │ (ratatui)  │              │            │
//!           └────────────┘              └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`store`]: `ListState`: records, loading flag, error, load lifecycle
//! - [`projector`]: pure search + sort over the records
//! - [`state`]: the `App` struct and the `ViewModel` handed to the view
//! - [`action`]: the `Action` enum and `update()` reducer
//! - [`config`]: layered configuration

pub mod action;
pub mod config;
pub mod projector;
pub mod state;
pub mod store;
