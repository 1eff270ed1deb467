use std::collections::HashMap;
use std::fmt::Debug;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct StoredEntry<T> {
    value: T,
    stored_at: Instant,
    expires_at: Instant,
}

/// Cached value together with its freshness
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Fresh(T),
    /// Expired but still held, for reuse when the source is failing
    Stale(T),
    Missing,
}

impl<T> Lookup<T> {
    pub fn fresh(self) -> Option<T> {
        match self {
            Lookup::Fresh(value) => Some(value),
            _ => None,
        }
    }

    pub fn any(self) -> Option<T> {
        match self {
            Lookup::Fresh(value) | Lookup::Stale(value) => Some(value),
            Lookup::Missing => None,
        }
    }
}

/// In-memory, time-bounded cache keyed by string
///
/// Expired entries are kept until overwritten so callers can fall back to
/// stale data when a refresh fails.
pub struct TtlCache<T> {
    ttl: Duration,
    store: RwLock<HashMap<String, StoredEntry<T>>>,
}

impl<T: Clone + Debug> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            store: RwLock::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Stores a value with the cache's default time-to-live.
    pub async fn put(&self, key: &str, value: T) {
        self.put_with_ttl(key, value, self.ttl).await;
    }

    /// Stores a value with an explicit time-to-live.
    #[tracing::instrument(name = "put_cache", level = "debug", skip(self, value))]
    pub async fn put_with_ttl(&self, key: &str, value: T, ttl: Duration) {
        let now = Instant::now();
        let entry = StoredEntry {
            value,
            stored_at: now,
            expires_at: now + ttl,
        };
        self.store.write().await.insert(key.to_string(), entry);
    }

    /// Looks a key up and reports whether the entry is still fresh.
    #[tracing::instrument(name = "query_cache", level = "debug", skip(self))]
    pub async fn lookup(&self, key: &str) -> Lookup<T> {
        let store = self.store.read().await;
        match store.get(key) {
            Some(entry) if Instant::now() < entry.expires_at => {
                tracing::debug!(age_ms = entry.stored_at.elapsed().as_millis() as u64, "Key found and still fresh");
                Lookup::Fresh(entry.value.clone())
            }
            Some(entry) => {
                tracing::debug!("Key found but expired");
                Lookup::Stale(entry.value.clone())
            }
            None => {
                tracing::debug!("Key not found");
                Lookup::Missing
            }
        }
    }

    /// Retrieves a value if it exists and has not expired.
    pub async fn get(&self, key: &str) -> Option<T> {
        self.lookup(key).await.fresh()
    }

    /// Manually removes a key from the cache.
    pub async fn remove(&self, key: &str) {
        self.store.write().await.remove(key);
    }

    pub async fn clear(&self) {
        self.store.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}
