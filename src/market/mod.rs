pub mod coingecko;
pub mod source;
pub mod types;

pub use coingecko::CoinGeckoSource;
pub use source::{FetchError, MarketSource};
pub use types::{MarketRecord, Roi};
