//! Finnhub response adapters.
//!
//! - `/quote` returns `{ c, h, l, o, pc, t }`, one snapshot.
//! - `/stock/candle` returns parallel arrays `{ t, o, h, l, c, v, s }`.
//!
//! API documentation: https://finnhub.io/docs/api

use chrono::Utc;
use serde_json::Value;
use tracing::debug;

use crate::json::finite_number;
use crate::models::Candle;

/// Adapt a `/quote` snapshot into a single candle.
///
/// Requires finite `o`, `h`, `l`, `c`. The timestamp comes from `t`, or the
/// current time when `t` is absent or not a number.
pub fn adapt_quote(json: &Value) -> Vec<Candle> {
    let field = |key: &str| json.get(key).and_then(finite_number);
    let (Some(open), Some(high), Some(low), Some(close)) =
        (field("o"), field("h"), field("l"), field("c"))
    else {
        return Vec::new();
    };

    let time = field("t")
        .map(|t| t.floor() as i64)
        .unwrap_or_else(|| Utc::now().timestamp());

    vec![Candle::new(time, open, high, low, close)]
}

/// Adapt `/stock/candle` parallel arrays into ascending candles.
///
/// Any of `t`, `o`, `h`, `l`, `c` not being an array yields nothing. Rows whose
/// OHLC values are not all finite are dropped. Fractional timestamps are
/// floored to whole seconds. Volume is optional per row.
pub fn adapt_candle(json: &Value) -> Vec<Candle> {
    let array = |key: &str| json.get(key).and_then(Value::as_array);
    let (Some(t), Some(o), Some(h), Some(l), Some(c)) =
        (array("t"), array("o"), array("h"), array("l"), array("c"))
    else {
        return Vec::new();
    };
    let v = array("v");

    let at = |values: &[Value], i: usize| values.get(i).and_then(finite_number);

    let mut candles: Vec<Candle> = t
        .iter()
        .enumerate()
        .filter_map(|(i, ts)| {
            let time = finite_number(ts)?.floor() as i64;
            let candle = Candle::new(time, at(o, i)?, at(h, i)?, at(l, i)?, at(c, i)?);
            Some(candle.with_volume(v.and_then(|v| at(v, i))))
        })
        .collect();

    if candles.len() < t.len() {
        debug!(
            "Finnhub candles: dropped {} of {} rows with non-finite values",
            t.len() - candles.len(),
            t.len()
        );
    }

    // Input is normally ascending already
    candles.sort_by_key(|candle| candle.time);
    candles
}
