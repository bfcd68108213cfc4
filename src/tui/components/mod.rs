//! # TUI Components
//!
//! Components follow the same two patterns throughout:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: app name, spinner, status message
//! - `SearchBar`: search text and active sort key
//! - `CoinDetail`: overlay for one selected record
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `CoinList`: selectable list with loading/error/empty states. Its
//!   persistent half, `CoinListState`, lives in `TuiState`.
//!
//! Components receive external data as props, never by reaching into the
//! global `App`. This keeps dependencies explicit and components testable.
//!
//! ```text
//! components/
//! ├── mod.rs          (this file)
//! ├── title_bar.rs    (top status line)
//! ├── search_bar.rs   (search input + sort indicator)
//! ├── coin_list.rs    (list body)
//! └── coin_detail.rs  (detail overlay)
//! ```

pub mod coin_detail;
pub mod coin_list;
pub mod search_bar;
pub mod title_bar;

pub use coin_detail::CoinDetail;
pub use coin_list::{CoinList, CoinListState, ListEvent};
pub use search_bar::SearchBar;
pub use title_bar::TitleBar;
