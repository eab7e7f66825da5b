//! Property-based tests for the provider adapters.
//!
//! These tests verify that the adapters stay total and filter rather than
//! substitute, using the `proptest` crate for random test case generation.

use finboard_market_data::provider::{alpha_vantage, finnhub};
use finboard_market_data::{adapt_alpha_vantage_global_quote, normalize_from, Candle};
use proptest::prelude::*;
use serde_json::{json, Value};

// =============================================================================
// Generators
// =============================================================================

/// A JSON value that is not a finite number (nor a numeric string).
fn arb_non_numeric() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        Just(json!("n/a")),
        Just(json!("")),
        Just(json!("NaN")),
        any::<bool>().prop_map(Value::Bool),
        Just(json!([1.0])),
        Just(json!({"v": 1.0})),
    ]
}

/// Either a finite number or something that is not one.
fn arb_maybe_number() -> impl Strategy<Value = Value> {
    prop_oneof![
        3 => (-1.0e6f64..1.0e6).prop_map(|n| json!(n)),
        1 => (-1.0e6f64..1.0e6).prop_map(|n| json!(n.to_string())),
        1 => arb_non_numeric(),
    ]
}

fn is_finite(value: &Value) -> bool {
    finboard_market_data::finite_number(value).is_some()
}

/// Epoch seconds, sometimes with a fractional part.
fn arb_timestamp() -> impl Strategy<Value = f64> {
    prop_oneof![
        (0i64..2_000_000_000).prop_map(|t| t as f64),
        (0.0f64..2.0e9),
    ]
}

/// Parallel candle arrays of the same length with random holes.
fn arb_candle_arrays() -> impl Strategy<Value = (Vec<f64>, [Vec<Value>; 4])> {
    (0usize..40).prop_flat_map(|len| {
        (
            proptest::collection::vec(arb_timestamp(), len),
            [
                proptest::collection::vec(arb_maybe_number(), len),
                proptest::collection::vec(arb_maybe_number(), len),
                proptest::collection::vec(arb_maybe_number(), len),
                proptest::collection::vec(arb_maybe_number(), len),
            ],
        )
    })
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// A quote with any of o/h/l/c missing or non-numeric yields nothing.
    #[test]
    fn prop_quote_rejects_bad_ohlc(
        bad_key in prop_oneof![Just("o"), Just("h"), Just("l"), Just("c")],
        bad_value in proptest::option::of(arb_non_numeric()),
        price in 0.01f64..10_000.0,
    ) {
        let mut quote = json!({"o": price, "h": price, "l": price, "c": price, "t": 1704067200});
        match bad_value {
            Some(value) => quote[bad_key] = value,
            None => {
                quote.as_object_mut().unwrap().remove(bad_key);
            }
        }
        prop_assert!(finnhub::adapt_quote(&quote).is_empty());
    }

    /// Output length equals the count of rows whose OHLC are all finite.
    #[test]
    fn prop_candle_count_matches_finite_rows((times, [o, h, l, c]) in arb_candle_arrays()) {
        let body = json!({"t": times, "o": o, "h": h, "l": l, "c": c});
        let expected = (0..times.len())
            .filter(|&i| is_finite(&o[i]) && is_finite(&h[i]) && is_finite(&l[i]) && is_finite(&c[i]))
            .count();

        let candles = finnhub::adapt_candle(&body);
        prop_assert_eq!(candles.len(), expected);
        prop_assert!(candles.windows(2).all(|w| w[0].time <= w[1].time));
        let all_finite = candles.iter().all(|candle| {
            candle.open.is_finite() && candle.high.is_finite()
                && candle.low.is_finite() && candle.close.is_finite()
        });
        prop_assert!(all_finite);
    }

    /// Finnhub candle routing does not depend on provider case.
    #[test]
    fn prop_candle_routing_case_insensitive(
        provider in "[fF][iI][nN][nN][hH][uU][bB]",
        (times, [o, h, l, c]) in arb_candle_arrays(),
    ) {
        let body = json!({"t": times, "o": o, "h": h, "l": l, "c": c});
        let routed: Vec<Candle> = normalize_from(&provider, "/stock/candle", &body);
        prop_assert_eq!(routed, finnhub::adapt_candle(&body));
    }

    /// Adapters never panic on arbitrary JSON objects.
    #[test]
    fn prop_adapters_are_total(
        keys in proptest::collection::vec("[a-zA-Z .()0-9]{1,12}", 0..6),
        values in proptest::collection::vec(arb_maybe_number(), 6),
    ) {
        let body: Value = Value::Object(
            keys.into_iter().zip(values).collect()
        );
        let _ = finnhub::adapt_quote(&body);
        let _ = finnhub::adapt_candle(&body);
        let _ = alpha_vantage::adapt_global_quote(&body);
        let _ = alpha_vantage::adapt_daily(&body);
    }
}

#[test]
fn global_quote_end_to_end() {
    let body = json!({
        "Global Quote": {
            "02. open": "150.00",
            "03. high": "155.00",
            "04. low": "149.00",
            "05. price": "152.00",
            "07. latest trading day": "2024-01-02"
        }
    });

    let candles = normalize_from("alphaVantage", "GLOBAL_QUOTE", &body);
    assert_eq!(candles, adapt_alpha_vantage_global_quote(&body));
    assert_eq!(
        candles,
        vec![Candle::new(1704153600, 150.0, 155.0, 149.0, 152.0)]
    );
}
