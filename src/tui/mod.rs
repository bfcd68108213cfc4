//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the view model,
//! and translates keyboard events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! - Key events are translated into actions and run through `update()`.
//! - `Effect::SpawnFetch` starts the fetch on a tokio task; its result comes
//!   back over a channel as `Action::FetchCompleted` and is applied on this
//!   thread, so the store is only ever mutated here.
//! - While a load is in flight the loop redraws every ~80ms for the spinner;
//!   otherwise it sleeps up to 500ms and only redraws on events.

mod component;
mod components;
mod event;
mod format;
mod ui;

use log::{debug, info, warn};
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use ratatui::DefaultTerminal;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::core::store::LoadTicket;
use crate::market::{CoinGeckoSource, MarketSource};
use crate::tui::component::EventHandler;
use crate::tui::components::{CoinListState, ListEvent, search_bar};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub list: CoinListState,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            list: CoinListState::new(),
        }
    }

    /// Translates a terminal event into a core action, handling purely
    /// presentational events (cursor movement) locally.
    fn translate(&mut self, app: &App, event: TuiEvent) -> Option<Action> {
        if matches!(event, TuiEvent::ForceQuit) {
            return Some(Action::Quit);
        }

        // Detail overlay swallows everything except "go back"
        if app.detail.is_some() {
            return match event {
                TuiEvent::Escape | TuiEvent::Submit | TuiEvent::Backspace => {
                    Some(Action::CloseDetail)
                }
                _ => None,
            };
        }

        // Error view: retry re-invokes the load
        if app.list.error.is_some() && matches!(event, TuiEvent::Submit | TuiEvent::Refresh) {
            return Some(Action::Load);
        }

        match event {
            TuiEvent::Refresh => Some(Action::Refresh),
            TuiEvent::CycleSort => Some(Action::CycleSortKey),
            TuiEvent::Escape if !app.query.search_text.is_empty() => {
                Some(Action::SetSearchText(String::new()))
            }
            TuiEvent::Escape => Some(Action::Quit),
            TuiEvent::InputChar(_) | TuiEvent::Backspace => {
                search_bar::edited_text(&app.query.search_text, &event).map(Action::SetSearchText)
            }
            _ => {
                // Several events can be drained between draws, so the rows
                // may have changed since the last render clamped the cursor.
                let view = app.view();
                self.list.clamp(view.rows.len());
                match self.list.handle_event(&event)? {
                    ListEvent::Open(index) => view
                        .rows
                        .get(index)
                        .map(|record| Action::Select(record.id.clone())),
                }
            }
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the market source from a resolved config.
pub fn build_source(config: &ResolvedConfig) -> Arc<dyn MarketSource> {
    Arc::new(CoinGeckoSource::new(Some(config.base_url.clone())))
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let source = build_source(&config);
    info!("Using market source '{}' at {}", source.name(), config.base_url);
    let mut app = App::from_config(source, &config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, &mut app, &mut tui);
    ratatui::restore();
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    app: &mut App,
    tui: &mut TuiState,
) -> std::io::Result<()> {
    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    // Screen mount triggers the first load
    dispatch(app, Action::Load, &tx);

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let animating = app.list.loading;
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, app, tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if let Some(action) = tui.translate(app, event)
                && dispatch(app, action, &tx) == Effect::Quit
            {
                should_quit = true;
            }
        }
        if should_quit {
            info!("Quit requested");
            return Ok(());
        }

        // Fetch completions from background tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            dispatch(app, action, &tx);
        }
    }
}

/// Runs `update()` and carries out the effect it asks for.
fn dispatch(app: &mut App, action: Action, tx: &mpsc::Sender<Action>) -> Effect {
    let effect = update(app, action);
    if let Effect::SpawnFetch(ticket) = effect {
        spawn_fetch(app.source.clone(), ticket, tx.clone());
    }
    effect
}

fn spawn_fetch(source: Arc<dyn MarketSource>, ticket: LoadTicket, tx: mpsc::Sender<Action>) {
    info!("Spawning fetch for load #{} ({:?})", ticket.id, ticket.mode);
    tokio::spawn(async move {
        let result = source.fetch_markets().await;
        if tx.send(Action::FetchCompleted { ticket, result }).is_err() {
            warn!("Failed to deliver load #{}: receiver dropped", ticket.id);
        }
    });
}
