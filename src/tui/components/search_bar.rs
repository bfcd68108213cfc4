//! # SearchBar Component
//!
//! Bordered search input with the active sort key on the right edge.
//! The text itself lives in the core `ViewQuery`; this component only
//! renders it and computes the edited value for a key press.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::projector::SortKey;
use crate::tui::component::Component;
use crate::tui::event::TuiEvent;

const PLACEHOLDER: &str = "Search Cryptocurrency";

pub struct SearchBar<'a> {
    pub text: &'a str,
    pub sort_key: SortKey,
    /// Place the terminal cursor at the end of the text.
    pub focused: bool,
}

/// Returns the new search text if `event` edits it.
pub fn edited_text(current: &str, event: &TuiEvent) -> Option<String> {
    match event {
        TuiEvent::InputChar(c) => {
            let mut text = current.to_string();
            text.push(*c);
            Some(text)
        }
        TuiEvent::Backspace if !current.is_empty() => {
            let mut text = current.to_string();
            text.pop();
            Some(text)
        }
        _ => None,
    }
}

impl Component for SearchBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Search ")
            .title(
                Line::from(format!(" Sort by: {} (Tab) ", self.sort_key.label())).right_aligned(),
            );

        let paragraph = if self.text.is_empty() {
            Paragraph::new(PLACEHOLDER).style(Style::default().fg(Color::DarkGray))
        } else {
            Paragraph::new(self.text)
        };
        frame.render_widget(paragraph.block(block), area);

        if self.focused {
            let inner_width = area.width.saturating_sub(2);
            let offset = (self.text.width() as u16).min(inner_width.saturating_sub(1));
            frame.set_cursor_position(Position::new(area.x + 1 + offset, area.y + 1));
        }
    }
}
