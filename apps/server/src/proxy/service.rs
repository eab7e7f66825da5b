use std::str::FromStr;
use std::sync::Arc;

use chrono::Utc;
use finboard_market_data::{ProviderId, ProxyRequest};
use reqwest::Url;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use super::{
    ProxyCache, ProxyError, UpstreamClient, ACCESS_DENIED_MESSAGE, PLAN_REQUIRED_MESSAGE,
};
use crate::config::{Config, ProviderKeys};

/// Source of the current time in epoch milliseconds.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> i64;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Whether a response came from the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheStatus::Hit => "hit",
            CacheStatus::Miss => "miss",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProxyOutcome {
    pub data: Value,
    pub cache: CacheStatus,
}

/// Marker a provider puts in a 200 body when the plan lacks the endpoint.
const NO_ACCESS_MARKER: &str = "don't have access";

pub struct ProxyService {
    cache: Arc<ProxyCache>,
    upstream: Arc<dyn UpstreamClient>,
    clock: Arc<dyn Clock>,
    keys: ProviderKeys,
    alpha_vantage_url: String,
    finnhub_url: String,
}

impl ProxyService {
    pub fn new(
        config: &Config,
        cache: Arc<ProxyCache>,
        upstream: Arc<dyn UpstreamClient>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            cache,
            upstream,
            clock,
            keys: config.keys.clone(),
            alpha_vantage_url: config.alpha_vantage_url.clone(),
            finnhub_url: config.finnhub_url.clone(),
        }
    }

    pub fn cache(&self) -> &ProxyCache {
        &self.cache
    }

    /// Serve one proxy request: cooldown check, cache lookup, upstream call.
    pub async fn handle(&self, request: &ProxyRequest) -> Result<ProxyOutcome, ProxyError> {
        let now = self.clock.now_ms();
        if let Some(retry_after) = self.cache.cooldown_remaining(now) {
            debug!(
                "Rejecting {} {} during rate-limit cooldown",
                request.provider, request.endpoint
            );
            return Err(ProxyError::CoolingDown { retry_after });
        }

        let provider = ProviderId::from_str(&request.provider)
            .map_err(|_| ProxyError::UnsupportedProvider(request.provider.clone()))?;
        let key = ProxyCache::cache_key(provider, request);
        if let Some(data) = self.cache.get(&key, now) {
            debug!("Cache hit for {}", key);
            return Ok(ProxyOutcome {
                data,
                cache: CacheStatus::Hit,
            });
        }

        let url = self.upstream_url(provider, request)?;
        info!("Fetching {} {}", request.provider, request.endpoint);
        let response = self.upstream.get(&url).await?;
        let now = self.clock.now_ms();

        match response.status {
            429 => {
                let retry_after = self.cache.trip_rate_limit(now);
                warn!(
                    "{} rate limited the proxy, pausing all requests for {}s",
                    request.provider,
                    retry_after.as_secs()
                );
                return Err(ProxyError::RateLimited { retry_after });
            }
            403 => {
                return Err(ProxyError::AccessDenied {
                    message: ACCESS_DENIED_MESSAGE.to_string(),
                    status: Some(403),
                    provider_error: None,
                })
            }
            _ => {}
        }

        let data: Value = serde_json::from_str(&response.body)
            .unwrap_or_else(|_| json!({ "raw": response.body }));

        if let Some(provider_error) = data
            .get("error")
            .and_then(Value::as_str)
            .filter(|e| e.contains(NO_ACCESS_MARKER))
        {
            return Err(ProxyError::AccessDenied {
                message: PLAN_REQUIRED_MESSAGE.to_string(),
                status: None,
                provider_error: Some(provider_error.to_string()),
            });
        }

        if !(200..300).contains(&response.status) {
            warn!(
                "{} {} returned status {}",
                request.provider, request.endpoint, response.status
            );
            return Err(ProxyError::Upstream {
                status: response.status,
                body: data,
            });
        }

        self.cache
            .put(key, data.clone(), now, ProxyCache::ttl_for(request.intent));
        Ok(ProxyOutcome {
            data,
            cache: CacheStatus::Miss,
        })
    }

    /// Provider URL for a request, with the key attached.
    fn upstream_url(&self, provider: ProviderId, request: &ProxyRequest) -> Result<Url, ProxyError> {
        let params = request.string_params();

        let (base, auth) = match provider {
            ProviderId::AlphaVantage => {
                let key = self
                    .keys
                    .alpha_vantage_key
                    .as_deref()
                    .ok_or(ProxyError::MissingApiKey("ALPHA_VANTAGE_API_KEY"))?;
                (
                    self.alpha_vantage_url.clone(),
                    vec![("function", request.endpoint.as_str()), ("apikey", key)],
                )
            }
            ProviderId::Finnhub => {
                let key = self
                    .keys
                    .finnhub_key
                    .as_deref()
                    .ok_or(ProxyError::MissingApiKey("FINNHUB_API_KEY"))?;
                let path = if request.endpoint.starts_with('/') {
                    request.endpoint.clone()
                } else {
                    format!("/{}", request.endpoint)
                };
                (
                    format!("{}{}", self.finnhub_url.trim_end_matches('/'), path),
                    vec![("token", key)],
                )
            }
            ProviderId::Indian => {
                return Err(ProxyError::UnsupportedProvider(request.provider.clone()))
            }
        };

        let query = auth
            .into_iter()
            .chain(params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        Url::parse_with_params(&base, query).map_err(|e| ProxyError::InvalidEndpoint(e.to_string()))
    }
}
