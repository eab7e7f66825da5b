use serde_json::Value;

/// Reads a finite number from a JSON number or numeric string.
///
/// Providers are inconsistent: Finnhub sends numbers, Alpha Vantage sends
/// strings such as `"150.0000"`. Anything else (null, booleans, text,
/// `"NaN"`, `"inf"`) yields `None`.
pub fn finite_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Like [`finite_number`], for an optional lookup result.
pub fn numeric_value(value: Option<&Value>) -> Option<f64> {
    value.and_then(finite_number)
}
