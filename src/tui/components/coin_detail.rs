//! # CoinDetail Component
//!
//! Full-screen overlay for one record. Receives the record by reference from
//! `App::detail`, which already holds a copy taken at selection time, so
//! nothing is re-fetched here.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::market::MarketRecord;
use crate::tui::component::Component;
use crate::tui::format;

pub struct CoinDetail<'a> {
    pub record: &'a MarketRecord,
}

impl CoinDetail<'_> {
    fn rows(&self) -> Vec<(&'static str, String)> {
        let r = self.record;
        vec![
            ("Current Price", format::price(r.current_price)),
            ("Market Cap", format::money(r.market_cap)),
            ("24h Price Change", format::percent(r.price_change_percentage_24h)),
            ("All-Time High", format::price(r.ath)),
            ("ATH Date", format::date(r.ath_date.as_deref())),
            ("24h High", format::price(r.high_24h)),
            ("24h Low", format::price(r.low_24h)),
            ("Last Updated", format::date_time(r.last_updated.as_deref())),
            // The terminal can't draw the image, so show where it lives
            ("Logo", r.image.clone().unwrap_or_else(|| "-".to_string())),
        ]
    }

    fn title(&self) -> String {
        format!(
            " {} ({}) ",
            self.record.name,
            self.record.symbol.to_uppercase()
        )
    }
}

impl Component for CoinDetail<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(70, 60, area);

        // Clear underlying content
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(self.title())
            .title_alignment(Alignment::Center)
            .title_bottom(Line::from(" Esc Back ").centered())
            .padding(Padding::uniform(1));

        let label_width = self.rows().iter().map(|(l, _)| l.len()).max().unwrap_or(0);
        let lines: Vec<Line> = self
            .rows()
            .into_iter()
            .map(|(label, value)| {
                Line::from(vec![
                    Span::styled(
                        format!("{label:<label_width$}  "),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(value, Style::default().add_modifier(Modifier::BOLD)),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines).block(block), overlay);
    }
}

/// Compute a centered rect using percentage of the outer rect.
fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
