//! # TitleBar Component
//!
//! Top status bar: app name, coin count, and the current status message.
//!
//! Stateless. All three props come from the core `App`; the title bar just
//! renders what it is given.
//!
//! ```text
//! coinlist | 100 coins | Sort: Market Cap
//! ```

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar<'a> {
    pub status_message: &'a str,
    pub loading: bool,
    pub spinner_frame: usize,
}

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn spinner_glyph(frame: usize) -> &'static str {
    SPINNER[frame % SPINNER.len()]
}

impl TitleBar<'_> {
    fn line(&self) -> Line<'static> {
        let mut spans = vec![Span::styled(
            "coinlist",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )];
        if self.loading {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                spinner_glyph(self.spinner_frame),
                Style::default().fg(Color::Cyan),
            ));
        }
        if !self.status_message.is_empty() {
            spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
            spans.push(Span::raw(self.status_message.to_string()));
        }
        Line::from(spans)
    }
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(self.line(), area);
    }
}
