use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Decodes a field leniently: `null`, a missing key, or a value of the wrong
/// shape all become `None` instead of failing the whole record.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Return-on-investment block attached to some coins.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Roi {
    pub times: f64,
    pub currency: String,
    pub percentage: f64,
}

/// One cryptocurrency's market snapshot, as returned by `/coins/markets`.
///
/// Only `id`, `symbol` and `name` are structurally required. Every other
/// field decodes as `None` when it is missing, `null`, or malformed, so a
/// decoded number is always finite or absent.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MarketRecord {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(default, deserialize_with = "lenient")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub current_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub market_cap: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub market_cap_rank: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub fully_diluted_valuation: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub total_volume: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub high_24h: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub low_24h: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub price_change_24h: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub price_change_percentage_24h: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub market_cap_change_24h: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub market_cap_change_percentage_24h: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub circulating_supply: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub total_supply: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub max_supply: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub ath: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub ath_change_percentage: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub ath_date: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub atl: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub atl_change_percentage: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub atl_date: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub roi: Option<Roi>,
    #[serde(default, deserialize_with = "lenient")]
    pub last_updated: Option<String>,
}

impl MarketRecord {
    /// A record with the three identity fields set and every market field absent.
    pub fn new(id: impl Into<String>, symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            symbol: symbol.into(),
            name: name.into(),
            image: None,
            current_price: None,
            market_cap: None,
            market_cap_rank: None,
            fully_diluted_valuation: None,
            total_volume: None,
            high_24h: None,
            low_24h: None,
            price_change_24h: None,
            price_change_percentage_24h: None,
            market_cap_change_24h: None,
            market_cap_change_percentage_24h: None,
            circulating_supply: None,
            total_supply: None,
            max_supply: None,
            ath: None,
            ath_change_percentage: None,
            ath_date: None,
            atl: None,
            atl_change_percentage: None,
            atl_date: None,
            roi: None,
            last_updated: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BITCOIN_JSON: &str = r#"{
        "id": "bitcoin",
        "symbol": "btc",
        "name": "Bitcoin",
        "image": "https://assets.coingecko.com/coins/images/1/large/bitcoin.png",
        "current_price": 67187.0,
        "market_cap": 1317802988326,
        "market_cap_rank": 1,
        "fully_diluted_valuation": 1412197365606,
        "total_volume": 31260929299,
        "high_24h": 68400,
        "low_24h": 66200.5,
        "price_change_24h": 812.4,
        "price_change_percentage_24h": 1.22,
        "market_cap_change_24h": 15923981250,
        "market_cap_change_percentage_24h": 1.22,
        "circulating_supply": 19675987,
        "total_supply": 21000000,
        "max_supply": 21000000,
        "ath": 73738,
        "ath_change_percentage": -8.87,
        "ath_date": "2024-03-14T07:10:36.635Z",
        "atl": 67.81,
        "atl_change_percentage": 98998.19,
        "atl_date": "2013-07-06T00:00:00.000Z",
        "roi": null,
        "last_updated": "2024-04-07T16:49:31.736Z"
    }"#;

    #[test]
    fn test_full_record_decodes() {
        let record: MarketRecord = serde_json::from_str(BITCOIN_JSON).unwrap();
        assert_eq!(record.id, "bitcoin");
        assert_eq!(record.symbol, "btc");
        assert_eq!(record.current_price, Some(67187.0));
        assert_eq!(record.market_cap_rank, Some(1));
        assert_eq!(record.max_supply, Some(21_000_000.0));
        assert_eq!(record.roi, None);
        assert_eq!(record.ath_date.as_deref(), Some("2024-03-14T07:10:36.635Z"));
    }

    #[test]
    fn test_missing_optional_fields_decode_as_none() {
        let record: MarketRecord =
            serde_json::from_str(r#"{"id":"x","symbol":"x","name":"X"}"#).unwrap();
        assert_eq!(record, MarketRecord::new("x", "x", "X"));
    }

    #[test]
    fn test_malformed_fields_pass_through_as_absent() {
        let json = r#"{
            "id": "odd",
            "symbol": "odd",
            "name": "Oddcoin",
            "current_price": "12.5",
            "market_cap": {"usd": 3},
            "market_cap_rank": -4,
            "roi": {"times": "lots"},
            "last_updated": 1712500000
        }"#;
        let record: MarketRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.current_price, None);
        assert_eq!(record.market_cap, None);
        assert_eq!(record.market_cap_rank, None);
        assert_eq!(record.roi, None);
        assert_eq!(record.last_updated, None);
    }

    #[test]
    fn test_roi_object_decodes() {
        let json = r#"{
            "id": "ethereum",
            "symbol": "eth",
            "name": "Ethereum",
            "roi": {"times": 64.2, "currency": "btc", "percentage": 6420.5}
        }"#;
        let record: MarketRecord = serde_json::from_str(json).unwrap();
        let roi = record.roi.unwrap();
        assert_eq!(roi.currency, "btc");
        assert_eq!(roi.times, 64.2);
    }

    #[test]
    fn test_missing_identity_field_is_an_error() {
        let result: Result<MarketRecord, _> = serde_json::from_str(r#"{"id":"x","symbol":"x"}"#);
        assert!(result.is_err());
    }
}
