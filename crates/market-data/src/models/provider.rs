use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::MarketDataError;

/// Upstream market-data provider a widget is bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderId {
    #[serde(rename = "finnhub")]
    Finnhub,
    #[serde(rename = "alphaVantage")]
    AlphaVantage,
    /// Indian exchanges (NSE/BSE). Widgets can be configured for it, but the
    /// proxy has no upstream for it yet.
    #[serde(rename = "indian")]
    Indian,
}

impl ProviderId {
    /// Wire name, as used in widget documents and proxy requests.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Finnhub => "finnhub",
            Self::AlphaVantage => "alphaVantage",
            Self::Indian => "indian",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = MarketDataError;

    /// Case-insensitive: `"FinnHub"` and `"alphavantage"` are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "finnhub" => Ok(Self::Finnhub),
            "alphavantage" => Ok(Self::AlphaVantage),
            "indian" => Ok(Self::Indian),
            _ => Err(MarketDataError::UnknownProvider(s.to_string())),
        }
    }
}
