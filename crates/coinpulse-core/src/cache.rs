//! In-memory caching for market responses.
//!
//! Entries carry their own TTL. Freshness is evaluated on read and stale
//! entries are dropped at that moment; there is no background sweep.

use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use crate::{Asset, AssetDetail, AssetId};

/// Defines how a fetch interacts with the cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CacheMode {
    /// Serve a fresh cached entry when present; otherwise fetch and store. (Default)
    #[default]
    Use,
    /// Skip the cache read, always fetch, and store the new value.
    Refresh,
}

/// Logical resource a cache slot belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    List,
    Detail(AssetId),
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::List => f.write_str("list"),
            Self::Detail(id) => write!(f, "detail-{id}"),
        }
    }
}

/// Cached payload, tagged by shape.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedValue {
    AssetList(Arc<Vec<Asset>>),
    AssetDetail(Arc<AssetDetail>),
}

impl CachedValue {
    pub fn as_asset_list(&self) -> Option<Arc<Vec<Asset>>> {
        match self {
            Self::AssetList(list) => Some(Arc::clone(list)),
            Self::AssetDetail(_) => None,
        }
    }

    pub fn as_asset_detail(&self) -> Option<Arc<AssetDetail>> {
        match self {
            Self::AssetDetail(detail) => Some(Arc::clone(detail)),
            Self::AssetList(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: CachedValue,
    stored_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn is_fresh(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.stored_at) < self.ttl
    }
}

/// Thread-safe in-memory cache keyed by logical resource.
#[derive(Debug, Default)]
pub struct CacheStore {
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
}

impl CacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value stored under `key` if it is still fresh.
    ///
    /// A stale entry is removed before `None` is returned.
    pub fn get(&self, key: &CacheKey) -> Option<CachedValue> {
        let now = Instant::now();
        let mut entries = self.lock();

        let fresh = entries.get(key).map(|entry| entry.is_fresh(now))?;
        if fresh {
            debug!(key = %key, "cache hit");
            return entries.get(key).map(|entry| entry.value.clone());
        }

        entries.remove(key);
        debug!(key = %key, "cache entry expired; evicted");
        None
    }

    /// Store `value` under `key`, replacing any previous entry.
    pub fn set(&self, key: CacheKey, value: CachedValue, ttl: Duration) {
        let entry = CacheEntry {
            value,
            stored_at: Instant::now(),
            ttl,
        };
        debug!(key = %key, ttl_secs = ttl.as_secs(), "cache write");
        self.lock().insert(key, entry);
    }

    pub fn get_list(&self) -> Option<Arc<Vec<Asset>>> {
        self.get(&CacheKey::List)?.as_asset_list()
    }

    pub fn get_detail(&self, id: &AssetId) -> Option<Arc<AssetDetail>> {
        self.get(&CacheKey::Detail(id.clone()))?.as_asset_detail()
    }

    /// Fresh-entry check without evicting or cloning.
    pub fn contains_fresh(&self, key: &CacheKey) -> bool {
        let now = Instant::now();
        self.lock()
            .get(key)
            .is_some_and(|entry| entry.is_fresh(now))
    }

    /// Number of resident entries, including stale ones not yet read.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<CacheKey, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(names: &[&str]) -> CachedValue {
        let assets = names
            .iter()
            .map(|name| Asset::new(AssetId::parse(name).expect("valid id"), *name, *name))
            .collect();
        CachedValue::AssetList(Arc::new(assets))
    }

    #[tokio::test(start_paused = true)]
    async fn entry_is_served_until_ttl_then_evicted() {
        let cache = CacheStore::new();
        cache.set(CacheKey::List, list_of(&["bitcoin"]), Duration::from_secs(600));

        tokio::time::advance(Duration::from_secs(600) - Duration::from_millis(1)).await;
        assert!(cache.get(&CacheKey::List).is_some());

        tokio::time::advance(Duration::from_millis(2)).await;
        assert!(cache.get(&CacheKey::List).is_none());
        assert_eq!(cache.len(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn entry_at_exact_ttl_is_stale() {
        let cache = CacheStore::new();
        cache.set(CacheKey::List, list_of(&["bitcoin"]), Duration::from_secs(5));

        tokio::time::advance(Duration::from_secs(5)).await;
        assert!(cache.get(&CacheKey::List).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn overwrite_refreshes_timestamp() {
        let cache = CacheStore::new();
        cache.set(CacheKey::List, list_of(&["bitcoin"]), Duration::from_secs(10));
        tokio::time::advance(Duration::from_secs(8)).await;

        cache.set(CacheKey::List, list_of(&["ethereum"]), Duration::from_secs(10));
        tokio::time::advance(Duration::from_secs(8)).await;

        let list = cache.get_list().expect("overwritten entry is fresh");
        assert_eq!(list[0].id.as_str(), "ethereum");
    }

    #[test]
    fn detail_keys_are_independent_of_list() {
        let cache = CacheStore::new();
        let bitcoin = AssetId::parse("bitcoin").expect("valid id");
        cache.set(CacheKey::List, list_of(&["bitcoin"]), Duration::from_secs(60));

        assert!(cache.get_detail(&bitcoin).is_none());
        assert!(cache.contains_fresh(&CacheKey::List));
        assert!(!cache.contains_fresh(&CacheKey::Detail(bitcoin)));
    }

    #[test]
    fn typed_accessor_rejects_wrong_shape() {
        let value = list_of(&["bitcoin"]);
        assert!(value.as_asset_detail().is_none());
        assert!(value.as_asset_list().is_some());
    }

    #[test]
    fn keys_render_as_resource_names() {
        let id = AssetId::parse("ethereum").expect("valid id");
        assert_eq!(CacheKey::List.to_string(), "list");
        assert_eq!(CacheKey::Detail(id).to_string(), "detail-ethereum");
    }

    #[test]
    fn clear_drops_everything() {
        let cache = CacheStore::new();
        cache.set(CacheKey::List, list_of(&["bitcoin"]), Duration::from_secs(60));
        assert!(!cache.is_empty());

        cache.clear();
        assert!(cache.is_empty());
    }
}
