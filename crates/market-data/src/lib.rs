//! Finboard Market Data Crate
//!
//! Provider-response normalization for the Finboard dashboard.
//!
//! # Overview
//!
//! Upstream providers answer in very different JSON shapes: Finnhub sends
//! parallel arrays or a flat quote object, Alpha Vantage sends string-valued
//! records keyed by date. This crate maps all of them onto a single
//! [`Candle`] representation and offers the generic path/array helpers that
//! widgets use to bind arbitrary fields.
//!
//! # Architecture
//!
//! ```text
//!   raw provider JSON
//!          |
//!          v
//! +------------------+      +------------------+
//! |  ResponseShape   | ---> |    Adapters      |  (finnhub, alpha_vantage)
//! +------------------+      +------------------+
//!          |                         |
//!          v                         v
//! +------------------+      +------------------+
//! | to_time_series / |      |   Vec<Candle>    |  (ascending, finite)
//! | get_array_...    |      +------------------+
//! +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`Candle`] - Canonical OHLCV data point
//! - [`ProviderId`] - Upstream provider identifier
//! - [`ProxyRequest`] - Wire request sent to the proxy
//! - [`FieldSelector`] - Typed field binding (path plus optional OHLCV role)
//! - [`TimePoint`] - Generic chart point

pub mod catalog;
pub mod errors;
pub mod json;
pub mod models;
pub mod provider;
pub mod series;

pub use catalog::{preset, presets, AdapterPreset};
pub use errors::MarketDataError;
pub use json::{finite_number, format_field, get_by_path, pickable_paths};
pub use models::{
    Candle, FieldFormat, FieldSelector, Intent, OhlcvField, ParamValue, Params, ProviderId,
    ProxyRequest, TimePoint,
};
pub use provider::{
    adapt_alpha_vantage_daily, adapt_alpha_vantage_global_quote, adapt_finnhub_candle,
    adapt_finnhub_quote, normalize_from, ResponseShape,
};
pub use series::{candle_label, candles_to_points, get_array_from_data, to_time_series};
