//! Short-lived in-process response cache.
//!
//! Two independent moka caches, one for price histories keyed by
//! `(symbol, request)` and one for fund details keyed by symbol. Both expire
//! entries after a fixed time-to-live; a zero TTL disables that cache.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;

use crate::config::Config;
use crate::history::HistoryRequest;
use crate::types::etf::EtfDetails;
use crate::types::history::PricePoint;

type HistoryKey = (String, HistoryRequest);

/// Process-wide cache shared by the route handlers.
#[derive(Clone)]
pub struct ResponseCache {
    history: Option<Cache<HistoryKey, Arc<Vec<PricePoint>>>>,
    details: Option<Cache<String, Arc<EtfDetails>>>,
}

impl std::fmt::Debug for ResponseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseCache")
            .field("history", &self.history.as_ref().map(Cache::entry_count))
            .field("details", &self.details.as_ref().map(Cache::entry_count))
            .finish()
    }
}

impl ResponseCache {
    /// Build both caches with explicit TTLs and a per-cache capacity.
    pub fn new(history_ttl: Duration, details_ttl: Duration, capacity: u64) -> Self {
        Self {
            history: build(history_ttl, capacity),
            details: build(details_ttl, capacity),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.history_cache_ttl, config.cache_ttl, config.cache_capacity)
    }

    /// A cache that never stores anything.
    pub fn disabled() -> Self {
        Self {
            history: None,
            details: None,
        }
    }

    pub async fn history(&self, symbol: &str, request: &HistoryRequest) -> Option<Arc<Vec<PricePoint>>> {
        let cache = self.history.as_ref()?;
        cache.get(&(symbol.to_owned(), *request)).await
    }

    pub async fn put_history(&self, symbol: &str, request: &HistoryRequest, prices: Arc<Vec<PricePoint>>) {
        if let Some(cache) = &self.history {
            cache.insert((symbol.to_owned(), *request), prices).await;
        }
    }

    pub async fn details(&self, symbol: &str) -> Option<Arc<EtfDetails>> {
        let cache = self.details.as_ref()?;
        cache.get(symbol).await
    }

    pub async fn put_details(&self, symbol: &str, details: Arc<EtfDetails>) {
        if let Some(cache) = &self.details {
            cache.insert(symbol.to_owned(), details).await;
        }
    }
}

fn build<K, V>(ttl: Duration, capacity: u64) -> Option<Cache<K, V>>
where
    K: std::hash::Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    if ttl.is_zero() {
        return None;
    }
    Some(
        Cache::builder()
            .max_capacity(capacity.max(1))
            .time_to_live(ttl)
            .build(),
    )
}
