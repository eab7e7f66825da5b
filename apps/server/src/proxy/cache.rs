use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use finboard_market_data::{Intent, ProviderId, ProxyRequest};
use serde_json::Value;
use tracing::warn;

/// TTL of regular widget data.
pub const DEFAULT_TTL: Duration = Duration::from_secs(30);
/// TTL of field-mapping previews.
pub const PREVIEW_TTL: Duration = Duration::from_secs(8);
/// Pause applied to every request after an upstream 429.
pub const RATE_LIMIT_COOLDOWN: Duration = Duration::from_secs(60);

/// A cached upstream body and its expiry in epoch milliseconds.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub expires_at: i64,
    pub data: Value,
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<String, CacheEntry>,
    rate_limit_until: i64,
}

/// Response cache plus the global rate-limit cooldown.
///
/// One instance lives for the whole server process. Times are epoch
/// milliseconds supplied by the caller.
#[derive(Default)]
pub struct ProxyCache {
    state: Mutex<CacheState>,
}

fn millis(duration: Duration) -> i64 {
    i64::try_from(duration.as_millis()).unwrap_or(i64::MAX)
}

impl ProxyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the cache, recovering from poison if necessary.
    fn lock_state(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(|poisoned| {
            warn!("Proxy cache mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// `provider|endpoint|query`, with the canonical provider name and the
    /// query being the form-encoded params in key order.
    pub fn cache_key(provider: ProviderId, request: &ProxyRequest) -> String {
        let query = serde_urlencoded::to_string(request.string_params()).unwrap_or_default();
        format!("{}|{}|{}", provider.as_str(), request.endpoint, query)
    }

    pub fn ttl_for(intent: Intent) -> Duration {
        match intent {
            Intent::Preview => PREVIEW_TTL,
            Intent::Data => DEFAULT_TTL,
        }
    }

    /// Fresh cached body for `key`. Expired entries are dropped on the way.
    pub fn get(&self, key: &str, now: i64) -> Option<Value> {
        let mut state = self.lock_state();
        match state.entries.get(key) {
            Some(entry) if entry.expires_at > now => Some(entry.data.clone()),
            Some(_) => {
                state.entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn put(&self, key: String, data: Value, now: i64, ttl: Duration) {
        let entry = CacheEntry {
            expires_at: now.saturating_add(millis(ttl)),
            data,
        };
        self.lock_state().entries.insert(key, entry);
    }

    /// Time left in the cooldown, if one is active.
    pub fn cooldown_remaining(&self, now: i64) -> Option<Duration> {
        let until = self.lock_state().rate_limit_until;
        (now < until).then(|| Duration::from_millis((until - now) as u64))
    }

    /// Start the cooldown after an upstream 429.
    pub fn trip_rate_limit(&self, now: i64) -> Duration {
        self.lock_state().rate_limit_until = now.saturating_add(millis(RATE_LIMIT_COOLDOWN));
        RATE_LIMIT_COOLDOWN
    }

    pub fn len(&self) -> usize {
        self.lock_state().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finboard_market_data::{ParamValue, Params};
    use serde_json::json;

    fn request(pairs: &[(&str, &str)]) -> ProxyRequest {
        let params: Params = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), ParamValue::from(*v)))
            .collect();
        ProxyRequest::new("finnhub", "/stock/candle", params)
    }

    #[test]
    fn test_cache_key_is_key_sorted_and_encoded() {
        let a = request(&[("symbol", "BRK B"), ("resolution", "D")]);
        let b = request(&[("resolution", "D"), ("symbol", "BRK B")]);
        assert_eq!(
            ProxyCache::cache_key(ProviderId::Finnhub, &a),
            ProxyCache::cache_key(ProviderId::Finnhub, &b)
        );
        assert_eq!(
            ProxyCache::cache_key(ProviderId::Finnhub, &a),
            "finnhub|/stock/candle|resolution=D&symbol=BRK+B"
        );
    }

    #[test]
    fn test_cache_key_uses_canonical_provider_name() {
        let mut a = request(&[("symbol", "AAPL")]);
        a.provider = "FinnHub".to_string();
        assert!(ProxyCache::cache_key(ProviderId::Finnhub, &a).starts_with("finnhub|"));
    }

    #[test]
    fn test_ttl_by_intent() {
        assert_eq!(ProxyCache::ttl_for(Intent::Preview), Duration::from_secs(8));
        assert_eq!(ProxyCache::ttl_for(Intent::Data), Duration::from_secs(30));
    }

    #[test]
    fn test_entries_expire() {
        let cache = ProxyCache::new();
        cache.put("k".to_string(), json!({"c": 1}), 1_000, PREVIEW_TTL);
        assert_eq!(cache.get("k", 8_999), Some(json!({"c": 1})));
        assert_eq!(cache.get("k", 9_000), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cooldown_window() {
        let cache = ProxyCache::new();
        assert_eq!(cache.cooldown_remaining(0), None);
        cache.trip_rate_limit(10_000);
        assert_eq!(
            cache.cooldown_remaining(40_000),
            Some(Duration::from_secs(30))
        );
        assert_eq!(cache.cooldown_remaining(70_000), None);
    }
}
