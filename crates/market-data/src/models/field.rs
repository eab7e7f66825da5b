use std::fmt;

use serde::{Deserialize, Serialize};

/// Display format for a mapped card field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldFormat {
    #[default]
    Number,
    Currency,
    Percent,
}

/// One component of an OHLCV record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OhlcvField {
    Open,
    High,
    Low,
    Close,
    Volume,
}

impl OhlcvField {
    pub const ALL: [OhlcvField; 5] = [
        OhlcvField::Open,
        OhlcvField::High,
        OhlcvField::Low,
        OhlcvField::Close,
        OhlcvField::Volume,
    ];

    /// Plain key used in normalized records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::High => "high",
            Self::Low => "low",
            Self::Close => "close",
            Self::Volume => "volume",
        }
    }

    /// Every key spelling that names this field in a provider payload:
    /// Finnhub single letters, plain names, Alpha Vantage time-series
    /// numbering and Alpha Vantage global-quote numbering.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Open => &["o", "open", "1. open", "02. open"],
            Self::High => &["h", "high", "2. high", "03. high"],
            Self::Low => &["l", "low", "3. low", "04. low"],
            Self::Close => &["c", "close", "4. close", "05. price", "price"],
            Self::Volume => &["v", "volume", "5. volume", "06. volume"],
        }
    }

    /// Resolve a single key (case-insensitive, exact) to a field.
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|field| field.aliases().iter().any(|alias| *alias == key))
    }
}

impl fmt::Display for OhlcvField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user-chosen field to plot or display.
///
/// Keeps the literal dotted path for generic lookups and, when the last
/// segment names an OHLCV component, the resolved role. Role resolution is an
/// exact alias match so that keys which merely contain a word like `open`
/// never bind to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSelector {
    path: String,
    role: Option<OhlcvField>,
}

impl FieldSelector {
    pub fn parse(path: &str) -> Self {
        let role = path.rsplit('.').next().and_then(OhlcvField::from_key);
        // "1. open" contains a dot; give the whole path a chance too.
        let role = role.or_else(|| OhlcvField::from_key(path));
        Self {
            path: path.to_string(),
            role,
        }
    }

    pub fn role(field: OhlcvField) -> Self {
        Self {
            path: field.as_str().to_string(),
            role: Some(field),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn ohlcv(&self) -> Option<OhlcvField> {
        self.role
    }

    /// Role used for candle-shaped data, where an unrecognized selector
    /// reads the close.
    pub fn ohlcv_or_close(&self) -> OhlcvField {
        self.role.unwrap_or(OhlcvField::Close)
    }
}

impl From<&str> for FieldSelector {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}
