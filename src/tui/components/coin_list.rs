//! # CoinList Component
//!
//! The main list screen body. Depending on the view model it shows:
//!
//! 1. **Error**: the stored message and a retry hint (replaces the list)
//! 2. **Loading**: a spinner, only for a non-refresh load
//! 3. **Empty**: a hint that nothing matches
//! 4. **Rows**: `Name (SYMBOL)` over price and market cap
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `CoinListState` lives in `TuiState` (selection, cached page size)
//! - `CoinList` is created each frame with borrowed state and props

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, List, ListItem, ListState, Paragraph, Wrap};

use crate::core::state::ViewModel;
use crate::market::MarketRecord;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::title_bar::spinner_glyph;
use crate::tui::event::TuiEvent;
use crate::tui::format;

/// Lines per row: name line + figures line.
const ROW_HEIGHT: u16 = 2;

/// Persistent list state.
#[derive(Default)]
pub struct CoinListState {
    pub list_state: ListState,
    /// Rows in the last rendered view. Updated during render.
    pub row_count: usize,
    /// Rows that fit on screen. Updated during render.
    pub page_rows: usize,
}

/// Events emitted by the list.
#[derive(Debug, PartialEq, Eq)]
pub enum ListEvent {
    /// Open the row at this index of the derived view.
    Open(usize),
}

impl CoinListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    fn move_by(&mut self, delta: isize) {
        if self.row_count == 0 {
            self.list_state.select(None);
            return;
        }
        let current = self.list_state.selected().unwrap_or(0) as isize;
        let last = self.row_count as isize - 1;
        let next = (current + delta).clamp(0, last);
        self.list_state.select(Some(next as usize));
    }

    /// Keeps the selection inside `0..row_count`.
    pub fn clamp(&mut self, row_count: usize) {
        self.row_count = row_count;
        match (row_count, self.list_state.selected()) {
            (0, _) => self.list_state.select(None),
            (_, None) => self.list_state.select(Some(0)),
            (n, Some(i)) if i >= n => self.list_state.select(Some(n - 1)),
            _ => {}
        }
    }
}

impl EventHandler for CoinListState {
    type Event = ListEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<ListEvent> {
        let page = self.page_rows.max(1) as isize;
        match event {
            TuiEvent::CursorUp => self.move_by(-1),
            TuiEvent::CursorDown => self.move_by(1),
            TuiEvent::PageUp => self.move_by(-page),
            TuiEvent::PageDown => self.move_by(page),
            TuiEvent::Submit => return self.selected().map(ListEvent::Open),
            _ => {}
        }
        None
    }
}

/// Transient render wrapper for the list body.
pub struct CoinList<'a> {
    pub state: &'a mut CoinListState,
    pub view: &'a ViewModel<'a>,
    pub spinner_frame: usize,
}

impl Component for CoinList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let view = self.view;
        if let Some(message) = view.error {
            draw_error(frame, area, message);
            return;
        }

        if view.show_spinner() {
            let text = format!("{} Loading...", spinner_glyph(self.spinner_frame));
            let loading = Paragraph::new(text)
                .style(Style::default().fg(Color::Cyan))
                .alignment(Alignment::Center)
                .block(Block::bordered().border_style(Style::default().fg(Color::DarkGray)));
            frame.render_widget(loading, area);
            return;
        }

        let rows = &view.rows;
        self.state.clamp(rows.len());
        self.state.page_rows = (area.height.saturating_sub(2) / ROW_HEIGHT) as usize;

        let mut block = Block::bordered()
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" Coins ({}) ", rows.len()));
        if view.refreshing {
            block = block.title(Line::from(" Refreshing... ").right_aligned());
        }

        if rows.is_empty() {
            let empty = Paragraph::new("No coins to show.\nCtrl+R to refresh")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let inner_width = area.width.saturating_sub(4) as usize;
        let items: Vec<ListItem> = rows
            .iter()
            .map(|record| ListItem::new(row_text(record, inner_width)))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol("▌ ");

        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

fn row_text(record: &MarketRecord, width: usize) -> Text<'static> {
    let title = format!("{} ({})", record.name, record.symbol.to_uppercase());
    Text::from(vec![
        Line::from(Span::styled(
            format::truncate_to_width(&title, width),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(
                "Current Price: {}   Market Cap: {}",
                format::price(record.current_price),
                format::money(record.market_cap)
            ),
            Style::default().fg(Color::Gray),
        )),
    ])
}

fn draw_error(frame: &mut Frame, area: Rect, message: &str) {
    let lines = vec![
        Line::from(Span::styled(
            format!("Error: {message}"),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to retry",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::bordered().border_style(Style::default().fg(Color::Red)));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::record;

    fn state_with_rows(n: usize) -> CoinListState {
        let mut state = CoinListState::new();
        state.page_rows = 3;
        state.clamp(n);
        state
    }

    #[test]
    fn test_clamp_selects_first_row() {
        let state = state_with_rows(5);
        assert_eq!(state.selected(), Some(0));
    }

    #[test]
    fn test_clamp_after_rows_shrink() {
        let mut state = state_with_rows(5);
        state.list_state.select(Some(4));
        state.clamp(2);
        assert_eq!(state.selected(), Some(1));
        state.clamp(0);
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn test_cursor_moves_within_bounds() {
        let mut state = state_with_rows(5);
        state.handle_event(&TuiEvent::CursorUp);
        assert_eq!(state.selected(), Some(0));
        state.handle_event(&TuiEvent::PageDown);
        assert_eq!(state.selected(), Some(3));
        state.handle_event(&TuiEvent::PageDown);
        assert_eq!(state.selected(), Some(4));
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(state.selected(), Some(4));
    }

    #[test]
    fn test_submit_opens_selected_row() {
        let mut state = state_with_rows(3);
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(state.handle_event(&TuiEvent::Submit), Some(ListEvent::Open(1)));
    }

    #[test]
    fn test_submit_on_empty_list() {
        let mut state = state_with_rows(0);
        assert_eq!(state.handle_event(&TuiEvent::Submit), None);
    }

    #[test]
    fn test_row_text() {
        let text = row_text(&record("Bitcoin", Some(67187.0), Some(1.3e12)), 60);
        let lines: Vec<String> = text
            .lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        assert_eq!(lines[0], "Bitcoin (BIT)");
        assert_eq!(
            lines[1],
            "Current Price: $67,187   Market Cap: $1,300,000,000,000"
        );
    }
}
