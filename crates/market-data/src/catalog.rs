//! Built-in endpoint presets offered by the add-widget flow.

use lazy_static::lazy_static;

use crate::models::{ParamValue, Params, ProviderId};

/// A ready-made provider endpoint with sensible default parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct AdapterPreset {
    pub id: &'static str,
    pub label: &'static str,
    pub provider: ProviderId,
    pub endpoint: &'static str,
    pub default_params: Params,
    pub description: &'static str,
}

fn params(pairs: &[(&str, &str)]) -> Params {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), ParamValue::from(*v)))
        .collect()
}

lazy_static! {
    static ref PRESETS: Vec<AdapterPreset> = vec![
        AdapterPreset {
            id: "finnhub-quote",
            label: "Finnhub • Quote",
            provider: ProviderId::Finnhub,
            endpoint: "/quote",
            default_params: params(&[("symbol", "AAPL")]),
            description: "Latest price/ohlc snapshot for a symbol",
        },
        AdapterPreset {
            id: "finnhub-candle",
            label: "Finnhub • Daily candles (90d)",
            provider: ProviderId::Finnhub,
            endpoint: "/stock/candle",
            default_params: params(&[("symbol", "AAPL"), ("resolution", "D")]),
            description: "Historical daily candles; provide from/to as epoch seconds",
        },
        AdapterPreset {
            id: "av-quote",
            label: "Alpha Vantage • Global Quote",
            provider: ProviderId::AlphaVantage,
            endpoint: "GLOBAL_QUOTE",
            default_params: params(&[("symbol", "AAPL")]),
            description: "Latest price/ohlc snapshot via Alpha Vantage",
        },
        AdapterPreset {
            id: "av-daily",
            label: "Alpha Vantage • Daily Time Series",
            provider: ProviderId::AlphaVantage,
            endpoint: "TIME_SERIES_DAILY",
            default_params: params(&[("symbol", "IBM")]),
            description: "Daily OHLC via Alpha Vantage",
        },
        AdapterPreset {
            id: "indian-quote",
            label: "Indian Market • Stock Quote",
            provider: ProviderId::Indian,
            endpoint: "/quote",
            default_params: params(&[("symbol", "RELIANCE.NSE")]),
            description: "Live quotes for Indian stocks (NSE/BSE)",
        },
    ];
}

/// All presets, in display order.
pub fn presets() -> &'static [AdapterPreset] {
    &PRESETS
}

/// Look up a preset by id.
pub fn preset(id: &str) -> Option<&'static AdapterPreset> {
    PRESETS.iter().find(|p| p.id == id)
}
