//! Market data models
//!
//! This module contains the core data types shared by the adapters, the
//! dashboard and the proxy:
//! - `candle` - Canonical OHLCV candle
//! - `provider` - Provider identifiers (`ProviderId`)
//! - `request` - Proxy wire request (`ProxyRequest`, `Params`, `Intent`)
//! - `field` - Field formats and typed field selectors
//! - `series` - Generic chart points (`TimePoint`)

mod candle;
mod field;
mod provider;
mod request;
mod series;

pub use candle::Candle;
pub use field::{FieldFormat, FieldSelector, OhlcvField};
pub use provider::ProviderId;
pub use request::{Intent, ParamValue, Params, ProxyRequest};
pub use series::TimePoint;
