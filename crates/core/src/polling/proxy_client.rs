//! Client side of the proxy endpoint.

use async_trait::async_trait;
use finboard_market_data::ProxyRequest;
use log::debug;
use serde_json::Value;
use thiserror::Error;

/// Why a widget fetch failed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The proxy or the upstream provider is throttling.
    #[error("{message}")]
    RateLimited { message: String },

    /// Non-success status with the envelope's message.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The proxy could not be reached or answered garbage.
    #[error("Request failed: {0}")]
    Transport(String),
}

/// Fetches provider data through the proxy.
#[async_trait]
pub trait ProxyClient: Send + Sync {
    async fn fetch(&self, request: &ProxyRequest) -> Result<Value, FetchError>;
}

/// Message of an error envelope (`message`, else `error`).
fn envelope_message(body: &Value) -> Option<String> {
    ["message", "error"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

fn envelope_code(body: &Value) -> Option<u64> {
    ["status", "code"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_u64))
}

/// Classify a proxy response. A 429 status, or a 429 `status`/`code` in the
/// body, is a rate limit whatever the HTTP status says.
pub fn classify_response(status: u16, body: Value) -> Result<Value, FetchError> {
    if status == 429 || envelope_code(&body) == Some(429) {
        return Err(FetchError::RateLimited {
            message: envelope_message(&body).unwrap_or_else(|| "Rate limited".to_string()),
        });
    }
    if !(200..300).contains(&status) {
        return Err(FetchError::Status {
            status,
            message: envelope_message(&body)
                .unwrap_or_else(|| format!("Request failed with status {}", status)),
        });
    }
    Ok(body)
}

/// [`ProxyClient`] posting to `{base_url}/api/proxy`.
#[derive(Clone)]
pub struct HttpProxyClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpProxyClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            endpoint: format!("{}/api/proxy", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl ProxyClient for HttpProxyClient {
    async fn fetch(&self, request: &ProxyRequest) -> Result<Value, FetchError> {
        debug!(
            "Fetching {} {} through {}",
            request.provider, request.endpoint, self.endpoint
        );
        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        let body = match serde_json::from_str::<Value>(&text) {
            Ok(body) => body,
            Err(_) if (200..300).contains(&status) => {
                return Err(FetchError::Transport(format!(
                    "Proxy returned non-JSON body: {}",
                    text.chars().take(120).collect::<String>()
                )))
            }
            Err(_) => Value::Null,
        };
        classify_response(status, body)
    }
}
