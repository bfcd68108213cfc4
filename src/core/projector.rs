//! # Search/Sort Projector
//!
//! Derives the list the user sees from three inputs:
//!
//! ```text
//! records ──┐
//! search  ──┼──▶ sort(filter(records, search), sort_key) ──▶ derived view
//! sort_key ─┘
//! ```
//!
//! Pure functions only. Nothing is cached; callers recompute whenever any
//! input changes (the TUI simply recomputes on every draw).

use std::cmp::Ordering;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::market::MarketRecord;

/// Sort order for the derived view.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Ascending by name
    #[default]
    Name,
    /// Descending by current price
    Price,
    /// Descending by market cap
    MarketCap,
}

impl SortKey {
    /// Cycles to the next sort key (wraps around)
    pub fn next(self) -> SortKey {
        match self {
            SortKey::Name => SortKey::Price,
            SortKey::Price => SortKey::MarketCap,
            SortKey::MarketCap => SortKey::Name,
        }
    }

    /// Returns a human-readable label for display
    pub fn label(self) -> &'static str {
        match self {
            SortKey::Name => "Name",
            SortKey::Price => "Current Price",
            SortKey::MarketCap => "Market Cap",
        }
    }
}

/// User-controlled search and sort parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewQuery {
    pub search_text: String,
    pub sort_key: SortKey,
}

/// Keeps the records whose lower-cased name contains the lower-cased search
/// text. Order is preserved; an empty search keeps everything.
pub fn filter<'a>(records: &'a [MarketRecord], search_text: &str) -> Vec<&'a MarketRecord> {
    let needle = search_text.to_lowercase();
    records
        .iter()
        .filter(|record| needle.is_empty() || record.name.to_lowercase().contains(&needle))
        .collect()
}

/// Stable sort by `key`. Ties keep their incoming order.
pub fn sort(rows: &mut [&MarketRecord], key: SortKey) {
    match key {
        SortKey::Name => rows.sort_by(|a, b| compare_names(&a.name, &b.name)),
        SortKey::Price => {
            rows.sort_by(|a, b| compare_descending(a.current_price, b.current_price))
        }
        SortKey::MarketCap => rows.sort_by(|a, b| compare_descending(a.market_cap, b.market_cap)),
    }
}

/// The derived view: `sort(filter(records, search_text), sort_key)`.
pub fn project<'a>(records: &'a [MarketRecord], query: &ViewQuery) -> Vec<&'a MarketRecord> {
    let mut rows = filter(records, &query.search_text);
    sort(&mut rows, query.sort_key);
    rows
}

/// Base letters with accents stripped and case folded, so "Éther" files
/// next to "Ether" rather than after "Z".
fn collation_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Compares base letters first, then accents, then case (lower-case first).
fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

/// Absent and non-finite values rank as negative infinity.
fn numeric_key(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(f64::NEG_INFINITY)
}

fn compare_descending(a: Option<f64>, b: Option<f64>) -> Ordering {
    numeric_key(b)
        .partial_cmp(&numeric_key(a))
        .unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::record;

    fn names(rows: &[&MarketRecord]) -> Vec<String> {
        rows.iter().map(|r| r.name.clone()).collect()
    }

    fn btc_eth() -> Vec<MarketRecord> {
        vec![
            record("Bitcoin", Some(67000.0), Some(1.3e12)),
            record("Ethereum", Some(3400.0), Some(4.1e11)),
        ]
    }

    #[test]
    fn test_empty_search_sorted_by_name() {
        let records = btc_eth();
        let view = project(&records, &ViewQuery::default());
        assert_eq!(names(&view), vec!["Bitcoin", "Ethereum"]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let records = btc_eth();
        let query = ViewQuery {
            search_text: "eth".to_string(),
            ..Default::default()
        };
        assert_eq!(names(&project(&records, &query)), vec!["Ethereum"]);

        let query = ViewQuery {
            search_text: "COIN".to_string(),
            ..Default::default()
        };
        assert_eq!(names(&project(&records, &query)), vec!["Bitcoin"]);
    }

    #[test]
    fn test_search_matches_name_not_symbol() {
        let records = btc_eth();
        assert!(filter(&records, "btc").is_empty());
    }

    #[test]
    fn test_price_sort_descending() {
        let records = vec![record("A", Some(1.0), None), record("B", Some(100.0), None)];
        let query = ViewQuery {
            sort_key: SortKey::Price,
            ..Default::default()
        };
        assert_eq!(names(&project(&records, &query)), vec!["B", "A"]);
    }

    #[test]
    fn test_market_cap_sort_descending() {
        let records = vec![
            record("Small", None, Some(10.0)),
            record("Large", None, Some(1000.0)),
            record("Medium", None, Some(100.0)),
        ];
        let query = ViewQuery {
            sort_key: SortKey::MarketCap,
            ..Default::default()
        };
        assert_eq!(
            names(&project(&records, &query)),
            vec!["Large", "Medium", "Small"]
        );
    }

    #[test]
    fn test_absent_numbers_sort_last_and_keep_order() {
        let records = vec![
            record("NoPriceA", None, None),
            record("Cheap", Some(0.5), None),
            record("NoPriceB", None, None),
            record("Negative", Some(-3.0), None),
        ];
        let query = ViewQuery {
            sort_key: SortKey::Price,
            ..Default::default()
        };
        assert_eq!(
            names(&project(&records, &query)),
            vec!["Cheap", "Negative", "NoPriceA", "NoPriceB"]
        );
    }

    #[test]
    fn test_non_finite_numbers_rank_with_absent() {
        let records = vec![
            record("NotANumber", Some(f64::NAN), None),
            record("One", Some(1.0), None),
        ];
        let mut rows = filter(&records, "");
        sort(&mut rows, SortKey::Price);
        assert_eq!(names(&rows), vec!["One", "NotANumber"]);
    }

    #[test]
    fn test_ties_are_stable() {
        let records = vec![
            record("First", Some(5.0), None),
            record("Second", Some(5.0), None),
            record("Third", Some(5.0), None),
        ];
        let query = ViewQuery {
            sort_key: SortKey::Price,
            ..Default::default()
        };
        assert_eq!(
            names(&project(&records, &query)),
            vec!["First", "Second", "Third"]
        );
    }

    #[test]
    fn test_name_sort_ignores_case() {
        let records = vec![
            record("tether", None, None),
            record("Bitcoin", None, None),
            record("aave", None, None),
            record("Cardano", None, None),
        ];
        let view = project(&records, &ViewQuery::default());
        assert_eq!(names(&view), vec!["aave", "Bitcoin", "Cardano", "tether"]);
    }

    #[test]
    fn test_name_sort_lower_case_first_on_case_only_difference() {
        let records = vec![record("Wrapped", None, None), record("wrapped", None, None)];
        let view = project(&records, &ViewQuery::default());
        assert_eq!(names(&view), vec!["wrapped", "Wrapped"]);
    }

    #[test]
    fn test_name_sort_files_accented_names_by_base_letter() {
        let records = vec![
            record("Zcash", None, None),
            record("Éther Classic", None, None),
            record("Ethena", None, None),
        ];
        let view = project(&records, &ViewQuery::default());
        assert_eq!(names(&view), vec!["Ethena", "Éther Classic", "Zcash"]);
    }

    #[test]
    fn test_name_sort_unaccented_before_accented_on_tie() {
        let records = vec![record("Éra", None, None), record("Era", None, None)];
        let view = project(&records, &ViewQuery::default());
        assert_eq!(names(&view), vec!["Era", "Éra"]);
    }

    #[test]
    fn test_filter_is_subsequence_and_input_untouched() {
        let records = vec![
            record("Ethereum", Some(1.0), None),
            record("Bitcoin", Some(2.0), None),
            record("Ethereum Classic", Some(3.0), None),
        ];
        let before = records.clone();
        let rows = filter(&records, "ETHER");
        assert_eq!(names(&rows), vec!["Ethereum", "Ethereum Classic"]);
        assert_eq!(records, before);
    }

    #[test]
    fn test_projection_is_idempotent() {
        let records = vec![
            record("Solana", Some(150.0), Some(7e10)),
            record("Dogecoin", Some(0.15), Some(2e10)),
            record("Polkadot", Some(7.0), Some(1e10)),
        ];
        for sort_key in [SortKey::Name, SortKey::Price, SortKey::MarketCap] {
            let query = ViewQuery {
                search_text: "o".to_string(),
                sort_key,
            };
            let first: Vec<MarketRecord> =
                project(&records, &query).into_iter().cloned().collect();
            let second: Vec<MarketRecord> =
                project(&records, &query).into_iter().cloned().collect();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_sort_key_cycle() {
        assert_eq!(SortKey::Name.next(), SortKey::Price);
        assert_eq!(SortKey::Price.next(), SortKey::MarketCap);
        assert_eq!(SortKey::MarketCap.next(), SortKey::Name);
    }

    #[test]
    fn test_sort_key_toml_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            key: SortKey,
        }
        let parsed: Wrapper = toml::from_str("key = \"market_cap\"").unwrap();
        assert_eq!(parsed.key, SortKey::MarketCap);
    }
}
