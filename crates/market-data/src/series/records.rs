use serde_json::{Map, Value};

use crate::json::finite_number;
use crate::models::OhlcvField;

/// Find the list of records a response contains, for table display.
///
/// Checked in order: the response itself is an array; an Alpha Vantage symbol
/// search (`bestMatches`); a time-series container (converted to records
/// with the date under `time`); a Finnhub search (`result`); otherwise the
/// first array-valued field.
pub fn get_array_from_data(data: &Value) -> Option<Vec<Value>> {
    let obj = match data {
        Value::Array(items) => return Some(items.clone()),
        Value::Object(obj) => obj,
        _ => return None,
    };

    if let Some(Value::Array(matches)) = obj.get("bestMatches") {
        return Some(matches.clone());
    }

    if let Some(key) = find_series_key(obj) {
        if let Some(Value::Object(series)) = obj.get(key) {
            let rows = series
                .iter()
                .map(|(time, ohlc)| {
                    let mut row = normalize_ohlc(ohlc);
                    row.insert("time".to_string(), Value::String(time.clone()));
                    Value::Object(row)
                })
                .collect();
            return Some(rows);
        }
    }

    find_record_array(obj).cloned()
}

/// First key naming a time-series container ("time series", any case).
pub(crate) fn find_series_key(obj: &Map<String, Value>) -> Option<&str> {
    obj.iter()
        .find(|(key, value)| key.to_lowercase().contains("time series") && value.is_object())
        .map(|(key, _)| key.as_str())
}

/// `bestMatches`, then `result`, then the first array-valued field.
pub(crate) fn find_record_array(obj: &Map<String, Value>) -> Option<&Vec<Value>> {
    ["bestMatches", "result"]
        .iter()
        .find_map(|key| obj.get(*key).and_then(Value::as_array))
        .or_else(|| obj.values().find_map(Value::as_array))
}

/// Map a series row onto plain `open`/`high`/`low`/`close`/`volume` keys.
///
/// Reads numbered (`"1. open"`), plain (`open`) or single-letter (`o`) keys.
/// Values that are not finite numbers become null.
pub(crate) fn normalize_ohlc(row: &Value) -> Map<String, Value> {
    OhlcvField::ALL
        .iter()
        .map(|field| {
            let keys = match field {
                OhlcvField::Open => ["1. open", "open", "o"],
                OhlcvField::High => ["2. high", "high", "h"],
                OhlcvField::Low => ["3. low", "low", "l"],
                OhlcvField::Close => ["4. close", "close", "c"],
                OhlcvField::Volume => ["5. volume", "volume", "v"],
            };
            let value = keys
                .iter()
                .find_map(|key| row.get(*key).filter(|v| !v.is_null()))
                .and_then(finite_number)
                .map(Value::from)
                .unwrap_or(Value::Null);
            (field.as_str().to_string(), value)
        })
        .collect()
}
