//! Generic time-series and table extraction.
//!
//! Used when a widget's data is not (or not only) a recognized provider
//! shape: charts map arbitrary fields through [`FieldSelector`]s, tables pull
//! out the first list of records a response contains.

mod records;

pub use records::get_array_from_data;
pub(crate) use records::{find_record_array, find_series_key, normalize_ohlc};

use chrono::{DateTime, SecondsFormat, Timelike, Utc};
use serde_json::{Map, Value};

use crate::json::{finite_number, get_by_path, numeric_value};
use crate::models::{Candle, FieldSelector, OhlcvField, TimePoint};
use crate::provider::{alpha_vantage, ResponseShape};

/// Extract `{time, value}` points from a response for charting.
///
/// Branches follow [`ResponseShape::detect`]. Points whose value is not a
/// finite number or whose time is empty are dropped.
pub fn to_time_series(data: &Value, x: &FieldSelector, y: &FieldSelector) -> Vec<TimePoint> {
    let points = match ResponseShape::detect(data) {
        ResponseShape::FinnhubCandles => finnhub_candle_points(data, y),
        ResponseShape::FinnhubQuote => finnhub_quote_point(data, y),
        ResponseShape::AlphaVantageGlobalQuote => {
            candles_to_points(&alpha_vantage::adapt_global_quote(data), y)
        }
        ResponseShape::AlphaVantageSeries { key } => match data.get(key) {
            Some(Value::Object(series)) => series_points(series, y),
            _ => Vec::new(),
        },
        ResponseShape::Records => get_array_from_data(data)
            .unwrap_or_default()
            .iter()
            .filter_map(|row| {
                let time = get_by_path(row, x.path()).and_then(value_label)?;
                let value = numeric_value(get_by_path(row, y.path()))?;
                Some(TimePoint::new(time, value))
            })
            .collect(),
        ResponseShape::Unknown => Vec::new(),
    };

    points
        .into_iter()
        .filter(|p| !p.time.is_empty() && p.value.is_finite())
        .collect()
}

/// Project normalized candles through a selector (close when unrecognized).
pub fn candles_to_points(candles: &[Candle], y: &FieldSelector) -> Vec<TimePoint> {
    let field = y.ohlcv_or_close();
    candles
        .iter()
        .filter_map(|candle| Some(TimePoint::new(candle_label(candle.time), candle.field(field)?)))
        .collect()
}

/// Date label for daily buckets, date and minute for intraday ones.
pub fn candle_label(time: i64) -> String {
    match DateTime::<Utc>::from_timestamp(time, 0) {
        Some(dt) if dt.num_seconds_from_midnight() == 0 => dt.format("%Y-%m-%d").to_string(),
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => time.to_string(),
    }
}

fn finnhub_candle_points(data: &Value, y: &FieldSelector) -> Vec<TimePoint> {
    let column = |key: &str| data.get(key).and_then(Value::as_array);
    let Some(times) = column("t") else {
        return Vec::new();
    };
    let values = column(series_column(y.ohlcv_or_close()));

    times
        .iter()
        .enumerate()
        .filter_map(|(i, ts)| {
            let ts = finite_number(ts)?;
            let date = DateTime::<Utc>::from_timestamp(ts.floor() as i64, 0)?;
            let value = values.and_then(|v| v.get(i)).and_then(finite_number)?;
            Some(TimePoint::new(date.format("%Y-%m-%d").to_string(), value))
        })
        .collect()
}

fn finnhub_quote_point(data: &Value, y: &FieldSelector) -> Vec<TimePoint> {
    let time = data
        .get("t")
        .and_then(finite_number)
        .and_then(|t| DateTime::<Utc>::from_timestamp(t.floor() as i64, 0))
        .unwrap_or_else(Utc::now);
    let value = data
        .get(series_column(y.ohlcv_or_close()))
        .and_then(finite_number);

    value
        .map(|v| TimePoint::new(time.to_rfc3339_opts(SecondsFormat::Millis, true), v))
        .into_iter()
        .collect()
}

fn series_points(series: &Map<String, Value>, y: &FieldSelector) -> Vec<TimePoint> {
    series
        .iter()
        .filter_map(|(date, row)| {
            let normalized = y
                .ohlcv()
                .and_then(|field| normalize_ohlc(row).get(field.as_str()).and_then(finite_number));
            let value = normalized.or_else(|| numeric_value(get_by_path(row, y.path())))?;
            Some(TimePoint::new(date.clone(), value))
        })
        .collect()
}

/// Finnhub single-letter column for an OHLCV field.
fn series_column(field: OhlcvField) -> &'static str {
    match field {
        OhlcvField::Open => "o",
        OhlcvField::High => "h",
        OhlcvField::Low => "l",
        OhlcvField::Close => "c",
        OhlcvField::Volume => "v",
    }
}

/// Text label for an x value; null and structured values have none.
fn value_label(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
