//! Memoized query results.
//!
//! Entries are keyed by a list of strings such as `["posts", "design"]` and
//! are dropped by key prefix after a mutation, so the next read refetches.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use tracing::trace;

pub type QueryKey = Vec<String>;

/// Build a query key from string parts.
pub fn key<S: AsRef<str>>(parts: &[S]) -> QueryKey {
    parts.iter().map(|p| p.as_ref().to_string()).collect()
}

pub struct QueryCache<V> {
    entries: DashMap<QueryKey, V>,
    /// Bumped by every `invalidate`; a fetch that overlaps one is not kept.
    generation: AtomicU64,
}

impl<V> Default for QueryCache<V> {
    fn default() -> Self {
        Self {
            entries: DashMap::new(),
            generation: AtomicU64::new(0),
        }
    }
}

impl<V: Clone> QueryCache<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &QueryKey) -> Option<V> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    pub fn insert(&self, key: QueryKey, value: V) {
        self.entries.insert(key, value);
    }

    /// Return the cached value for `key`, or run `fetch` and cache its
    /// result. Errors are returned as-is and never cached.
    ///
    /// A result whose fetch overlapped an `invalidate` is returned to the
    /// caller but not cached, since it may predate the mutation.
    pub async fn get_or_fetch<E, F, Fut>(&self, key: QueryKey, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(hit) = self.get(&key) {
            trace!(?key, "query cache hit");
            return Ok(hit);
        }

        let started = self.generation.load(Ordering::SeqCst);
        let value = fetch().await?;
        self.insert(key.clone(), value.clone());

        // An invalidate that bumped the generation before this check may have
        // run its retain before the insert above.
        if self.generation.load(Ordering::SeqCst) != started {
            trace!(?key, "query cache result discarded after invalidation");
            self.entries.remove(&key);
        }
        Ok(value)
    }

    /// Drop every entry whose key starts with `prefix`.
    pub fn invalidate<S: AsRef<str>>(&self, prefix: &[S]) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.entries.retain(|k, _| {
            k.len() < prefix.len()
                || !k.iter().zip(prefix).all(|(a, b)| a.as_str() == b.as_ref())
        });
        trace!(
            prefix = ?prefix.iter().map(|p| p.as_ref()).collect::<Vec<_>>(),
            "query cache invalidated"
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
