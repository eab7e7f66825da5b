use std::time::Duration;

use async_trait::async_trait;

use super::ProxyError;

/// Raw upstream answer.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: String,
}

/// Performs the provider GET. A trait so tests can count calls.
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    async fn get(&self, url: &reqwest::Url) -> Result<UpstreamResponse, ProxyError>;
}

/// [`UpstreamClient`] over reqwest with a per-request timeout.
pub struct HttpUpstream {
    http: reqwest::Client,
}

impl HttpUpstream {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }
}

/// Provider URLs carry the API key, so errors are reported without them.
fn transport_error(err: reqwest::Error) -> ProxyError {
    if err.is_timeout() {
        ProxyError::Transport("Upstream request timed out".to_string())
    } else {
        ProxyError::Transport(err.without_url().to_string())
    }
}

#[async_trait]
impl UpstreamClient for HttpUpstream {
    async fn get(&self, url: &reqwest::Url) -> Result<UpstreamResponse, ProxyError> {
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(transport_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_error)?;
        Ok(UpstreamResponse { status, body })
    }
}
