//! Market-data proxy: holds the provider keys, caches responses for a short
//! TTL and backs off globally once a provider starts throttling.

mod cache;
mod service;
mod upstream;

pub use cache::{CacheEntry, ProxyCache, DEFAULT_TTL, PREVIEW_TTL, RATE_LIMIT_COOLDOWN};
pub use service::{CacheStatus, Clock, ProxyOutcome, ProxyService, SystemClock};
pub use upstream::{HttpUpstream, UpstreamClient, UpstreamResponse};

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

pub const ACCESS_DENIED_MESSAGE: &str = "Access denied. Your API key doesn't have permission for this endpoint. Try upgrading your Finnhub plan or use the Quote card widget instead of Chart.";
pub const PLAN_REQUIRED_MESSAGE: &str = "API Access Denied: Your Finnhub API key doesn't support historical candle data. This feature requires a paid Finnhub plan. Try using Quote card widgets instead, which show current price only.";

/// Everything a proxy request can fail with.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Still inside the cooldown opened by an earlier 429.
    #[error("Temporarily paused due to rate limiting")]
    CoolingDown { retry_after: Duration },

    /// The upstream answered 429 just now.
    #[error("Rate limit exceeded")]
    RateLimited { retry_after: Duration },

    #[error("{message}")]
    AccessDenied {
        message: String,
        /// Upstream 403 status, when that is how access was refused.
        status: Option<u16>,
        /// Provider's own error text, when it was reported in the body.
        provider_error: Option<String>,
    },

    #[error("Missing {0}")]
    MissingApiKey(&'static str),

    #[error("Unsupported provider")]
    UnsupportedProvider(String),

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Non-success upstream status, relayed as is.
    #[error("Upstream returned status {status}")]
    Upstream { status: u16, body: Value },

    #[error("{0}")]
    Transport(String),
}

impl ProxyError {
    /// Seconds a client should wait before retrying, for rate-limit errors.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            ProxyError::CoolingDown { retry_after } | ProxyError::RateLimited { retry_after } => {
                Some(*retry_after)
            }
            _ => None,
        }
    }
}
