//! Display formatting for market values.
//!
//! Amounts use `en-US` grouping with at most three fraction digits. Prices
//! below one dollar keep eight decimals so sub-cent coins stay readable.
//! Absent values render as `-`.

use chrono::{DateTime, Utc};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const ABSENT: &str = "-";

/// `1234567.891` → `"1,234,567.891"`.
pub fn grouped(value: f64) -> String {
    let rounded = format!("{:.3}", value.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');
    let len = int_part.len();

    let mut out = String::with_capacity(len + len / 3 + frac.len() + 2);
    if value < 0.0 && rounded.chars().any(|c| c.is_ascii_digit() && c != '0') {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

pub fn price(value: Option<f64>) -> String {
    match value {
        Some(v) if v < 1.0 => format!("${v:.8}"),
        Some(v) => format!("${}", grouped(v)),
        None => ABSENT.to_string(),
    }
}

pub fn money(value: Option<f64>) -> String {
    value
        .map(|v| format!("${}", grouped(v)))
        .unwrap_or_else(|| ABSENT.to_string())
}

pub fn percent(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.2}%"))
        .unwrap_or_else(|| ABSENT.to_string())
}

fn parse_timestamp(ts: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(ts)
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

/// Date only. Unparsable timestamps are shown as received.
pub fn date(ts: Option<&str>) -> String {
    match ts {
        Some(raw) => parse_timestamp(raw)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| raw.to_string()),
        None => ABSENT.to_string(),
    }
}

pub fn date_time(ts: Option<&str>) -> String {
    match ts {
        Some(raw) => parse_timestamp(raw)
            .map(|d| d.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| raw.to_string()),
        None => ABSENT.to_string(),
    }
}

/// Truncate to `max_width` terminal columns, adding "..." if needed.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let budget = max_width - 3;
    let mut used = 0;
    let mut out = String::new();
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push_str("...");
    out
}
