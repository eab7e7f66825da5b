use std::{net::SocketAddr, time::Duration};

use anyhow::Context;

pub const DEFAULT_ALPHA_VANTAGE_URL: &str = "https://www.alphavantage.co/query";
pub const DEFAULT_FINNHUB_URL: &str = "https://finnhub.io/api/v1";

/// Upstream endpoints and credentials. Keys never leave the server.
#[derive(Clone, Default)]
pub struct ProviderKeys {
    pub alpha_vantage_key: Option<String>,
    pub finnhub_key: Option<String>,
    pub gemini_key: Option<String>,
}

impl std::fmt::Debug for ProviderKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let set = |k: &Option<String>| if k.is_some() { "set" } else { "unset" };
        f.debug_struct("ProviderKeys")
            .field("alpha_vantage_key", &set(&self.alpha_vantage_key))
            .field("finnhub_key", &set(&self.finnhub_key))
            .field("gemini_key", &set(&self.gemini_key))
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub upstream_timeout: Duration,
    pub static_dir: String,
    pub alpha_vantage_url: String,
    pub finnhub_url: String,
    pub gemini_url: String,
    pub keys: ProviderKeys,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            cors_allow: vec!["*".to_string()],
            request_timeout: Duration::from_millis(30_000),
            upstream_timeout: Duration::from_millis(30_000),
            static_dir: "dist".to_string(),
            alpha_vantage_url: DEFAULT_ALPHA_VANTAGE_URL.to_string(),
            finnhub_url: DEFAULT_FINNHUB_URL.to_string(),
            gemini_url: finboard_ai::gemini::DEFAULT_GEMINI_URL.to_string(),
            keys: ProviderKeys::default(),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_key(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_millis(key: &str, default: u64) -> Duration {
    let ms = std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default);
    Duration::from_millis(ms)
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let listen_addr: SocketAddr = env_or("FINBOARD_LISTEN_ADDR", "0.0.0.0:8080")
            .parse()
            .context("Invalid FINBOARD_LISTEN_ADDR")?;
        let cors_allow = env_or("FINBOARD_CORS_ALLOW_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            listen_addr,
            cors_allow,
            request_timeout: env_millis("FINBOARD_REQUEST_TIMEOUT_MS", 30_000),
            upstream_timeout: env_millis("FINBOARD_UPSTREAM_TIMEOUT_MS", 30_000),
            static_dir: env_or("FINBOARD_STATIC_DIR", &defaults.static_dir),
            alpha_vantage_url: env_or("FINBOARD_ALPHA_VANTAGE_URL", &defaults.alpha_vantage_url),
            finnhub_url: env_or("FINBOARD_FINNHUB_URL", &defaults.finnhub_url),
            gemini_url: env_or("FINBOARD_GEMINI_URL", &defaults.gemini_url),
            keys: ProviderKeys {
                alpha_vantage_key: env_key("ALPHA_VANTAGE_API_KEY"),
                finnhub_key: env_key("FINNHUB_API_KEY"),
                gemini_key: env_key("GEMINI_API_KEY"),
            },
        })
    }
}
