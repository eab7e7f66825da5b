use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Primitive request parameter value (`symbol=AAPL`, `from=1704067200`, ...).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for ParamValue {
    /// Renders the value the way it appears in a query string: integral
    /// floats lose their fractional part (`5.0` -> `5`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => match n.as_f64() {
                Some(v) if n.is_f64() && v.fract() == 0.0 && v.abs() < 1e15 => {
                    write!(f, "{}", v as i64)
                }
                _ => write!(f, "{}", n),
            },
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Request parameters, kept in key order so that logically identical
/// requests serialize identically.
pub type Params = BTreeMap<String, ParamValue>;

/// Why a proxy request is being made. Controls the cache TTL.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    /// Field-mapping exploration; short-lived cache entries.
    Preview,
    /// Regular widget polling.
    #[default]
    Data,
}

/// Body of a proxy request, shared by the proxy server and widget runtime.
///
/// `provider` stays free text so the server can answer unsupported
/// providers with a 400 instead of a deserialization failure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProxyRequest {
    pub provider: String,
    pub endpoint: String,
    #[serde(default)]
    pub params: Params,
    #[serde(default)]
    pub intent: Intent,
}

impl ProxyRequest {
    pub fn new(provider: impl Into<String>, endpoint: impl Into<String>, params: Params) -> Self {
        Self {
            provider: provider.into(),
            endpoint: endpoint.into(),
            params,
            intent: Intent::Data,
        }
    }

    pub fn with_intent(mut self, intent: Intent) -> Self {
        self.intent = intent;
        self
    }

    /// Parameters rendered as `(key, value)` string pairs in key order.
    pub fn string_params(&self) -> Vec<(String, String)> {
        self.params
            .iter()
            .map(|(k, v)| (k.clone(), v.to_string()))
            .collect()
    }
}
