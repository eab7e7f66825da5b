//! Provider response adapters.
//!
//! Each adapter maps one upstream JSON shape into canonical [`Candle`]s.
//! Adapters are total: malformed input yields an empty list, never an error,
//! so rendering code can treat "no data" uniformly.
//!
//! # Dispatch
//!
//! [`normalize_from`] picks an adapter from the provider name
//! (case-insensitive) and the endpoint:
//!
//! | Provider | Condition | Adapter |
//! |----------|-----------|---------|
//! | finnhub | endpoint contains `stock/candle` | [`finnhub::adapt_candle`] |
//! | finnhub | endpoint contains `quote` | [`finnhub::adapt_quote`] |
//! | alphaVantage | body has `Global Quote` | [`alpha_vantage::adapt_global_quote`] |
//! | alphaVantage | otherwise | [`alpha_vantage::adapt_daily`] |
//! | anything else | - | [`alpha_vantage::adapt_daily`] |

pub mod alpha_vantage;
pub mod finnhub;
mod shape;

pub use alpha_vantage::{
    adapt_daily as adapt_alpha_vantage_daily, adapt_global_quote as adapt_alpha_vantage_global_quote,
};
pub use finnhub::{adapt_candle as adapt_finnhub_candle, adapt_quote as adapt_finnhub_quote};
pub use shape::ResponseShape;

use serde_json::Value;
use tracing::debug;

use crate::models::Candle;

/// Normalize a raw provider response into ascending candles.
pub fn normalize_from(provider: &str, endpoint: &str, json: &Value) -> Vec<Candle> {
    match provider.trim().to_ascii_lowercase().as_str() {
        "finnhub" if endpoint.contains("stock/candle") => return finnhub::adapt_candle(json),
        "finnhub" if endpoint.contains("quote") => return finnhub::adapt_quote(json),
        "alphavantage" => {
            return if has_global_quote(json) {
                alpha_vantage::adapt_global_quote(json)
            } else {
                alpha_vantage::adapt_daily(json)
            };
        }
        _ => {}
    }
    debug!(
        "No adapter for provider '{}' endpoint '{}', trying Alpha Vantage time series",
        provider, endpoint
    );
    alpha_vantage::adapt_daily(json)
}

fn has_global_quote(json: &Value) -> bool {
    json.get(alpha_vantage::GLOBAL_QUOTE_KEY)
        .is_some_and(|quote| !quote.is_null())
}
