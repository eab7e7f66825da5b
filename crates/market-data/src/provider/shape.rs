use serde_json::Value;

use crate::provider::alpha_vantage::GLOBAL_QUOTE_KEY;
use crate::series::{find_record_array, find_series_key};

/// Recognized upstream response shapes.
///
/// Shapes can overlap (a Finnhub candle body also contains arrays that the
/// generic record scan would pick up), so [`ResponseShape::detect`] checks
/// them in declaration order and the first match wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResponseShape<'a> {
    /// Finnhub `/stock/candle`: `t` and `c` are arrays.
    FinnhubCandles,
    /// Finnhub `/quote`: has `o`, `h`, `l` and `c` keys.
    FinnhubQuote,
    /// Alpha Vantage `GLOBAL_QUOTE`: a `Global Quote` object.
    AlphaVantageGlobalQuote,
    /// Alpha Vantage `TIME_SERIES_*`: first key containing "time series".
    AlphaVantageSeries { key: &'a str },
    /// Anything else holding a list of records.
    Records,
    Unknown,
}

impl<'a> ResponseShape<'a> {
    pub fn detect(data: &'a Value) -> Self {
        let Some(obj) = data.as_object() else {
            return if data.is_array() {
                Self::Records
            } else {
                Self::Unknown
            };
        };

        if obj.get("t").is_some_and(Value::is_array) && obj.get("c").is_some_and(Value::is_array) {
            return Self::FinnhubCandles;
        }
        if ["o", "h", "l", "c"].iter().all(|k| obj.contains_key(*k)) {
            return Self::FinnhubQuote;
        }
        if obj.get(GLOBAL_QUOTE_KEY).is_some_and(Value::is_object) {
            return Self::AlphaVantageGlobalQuote;
        }
        if let Some(key) = find_series_key(obj) {
            return Self::AlphaVantageSeries { key };
        }
        if find_record_array(obj).is_some() {
            return Self::Records;
        }
        Self::Unknown
    }
}
