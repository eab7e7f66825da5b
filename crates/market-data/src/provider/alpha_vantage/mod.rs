//! Alpha Vantage response adapters.
//!
//! This module normalizes payloads from the Alpha Vantage query API:
//! - `GLOBAL_QUOTE` snapshots (`{"Global Quote": {"02. open": ..}}`)
//! - `TIME_SERIES_*` containers keyed by date, daily/weekly/monthly/intraday
//!
//! Alpha Vantage sends every number as a string; rows whose values do not
//! parse are dropped.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Value};
use tracing::debug;

use crate::json::finite_number;
use crate::models::{Candle, OhlcvField};

/// Key of the snapshot object in a `GLOBAL_QUOTE` response.
pub const GLOBAL_QUOTE_KEY: &str = "Global Quote";

/// Time-series container keys, checked in this order.
pub const TIME_SERIES_KEYS: &[&str] = &[
    "Time Series (Daily)",
    "Time Series (Digital Currency Daily)",
    "Time Series (1min)",
    "Time Series (5min)",
    "Time Series (15min)",
    "Time Series (30min)",
    "Time Series (60min)",
    "Weekly Time Series",
    "Monthly Time Series",
    "Weekly Adjusted Time Series",
    "Monthly Adjusted Time Series",
];

/// Adapt a `GLOBAL_QUOTE` snapshot into a single candle.
///
/// The latest trading day becomes the candle time; when it is missing or not
/// a date, the current time is used instead.
pub fn adapt_global_quote(json: &Value) -> Vec<Candle> {
    let Some(quote) = json.get(GLOBAL_QUOTE_KEY).and_then(Value::as_object) else {
        return Vec::new();
    };

    let field = |key: &str| quote.get(key).and_then(finite_number);
    let (Some(open), Some(high), Some(low), Some(close)) = (
        field("02. open"),
        field("03. high"),
        field("04. low"),
        field("05. price"),
    ) else {
        return Vec::new();
    };

    let time = quote
        .get("07. latest trading day")
        .and_then(Value::as_str)
        .and_then(parse_series_time)
        .unwrap_or_else(|| Utc::now().timestamp());

    vec![Candle::new(time, open, high, low, close).with_volume(field("06. volume"))]
}

/// Adapt a `TIME_SERIES_*` container into ascending candles.
///
/// Rows may use numbered keys (`"1. open"`) or plain keys (`open`). Rows with
/// any non-finite OHLC value or an unparseable date are dropped.
pub fn adapt_daily(json: &Value) -> Vec<Candle> {
    let Some(series) = find_series(json) else {
        return Vec::new();
    };

    let mut candles: Vec<Candle> = series
        .iter()
        .filter_map(|(date, row)| {
            let time = parse_series_time(date)?;
            let open = ohlcv_value(row, OhlcvField::Open)?;
            let high = ohlcv_value(row, OhlcvField::High)?;
            let low = ohlcv_value(row, OhlcvField::Low)?;
            let close = ohlcv_value(row, OhlcvField::Close)?;
            let volume = ohlcv_value(row, OhlcvField::Volume);
            Some(Candle::new(time, open, high, low, close).with_volume(volume))
        })
        .collect();

    if candles.len() < series.len() {
        debug!(
            "Alpha Vantage series: dropped {} of {} rows",
            series.len() - candles.len(),
            series.len()
        );
    }

    candles.sort_by_key(|candle| candle.time);
    candles
}

/// First known time-series container present in the response.
fn find_series(json: &Value) -> Option<&Map<String, Value>> {
    TIME_SERIES_KEYS
        .iter()
        .find_map(|key| json.get(*key).and_then(Value::as_object))
}

/// Reads one OHLCV value from a series row, numbered key first.
fn ohlcv_value(row: &Value, field: OhlcvField) -> Option<f64> {
    let numbered = match field {
        OhlcvField::Open => "1. open",
        OhlcvField::High => "2. high",
        OhlcvField::Low => "3. low",
        OhlcvField::Close => "4. close",
        OhlcvField::Volume => "5. volume",
    };
    [numbered, field.as_str()]
        .iter()
        .find_map(|key| row.get(*key).filter(|v| !v.is_null()))
        .and_then(finite_number)
}

/// Parse a series date key into epoch seconds (UTC).
///
/// Accepts `2024-01-02`, intraday `2024-01-02 16:00:00` and RFC 3339.
pub fn parse_series_time(value: &str) -> Option<i64> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc().timestamp());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc().timestamp());
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.timestamp())
}
