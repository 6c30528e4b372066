//! Fixed-capacity LRU map.
//!
//! Lookups promote the entry to most-recently-used; inserting past capacity
//! evicts the least-recently-used entry.

use std::borrow::Borrow;
use std::hash::Hash;
use std::num::NonZeroUsize;

use lru::LruCache;
use rustc_hash::FxBuildHasher;

/// Access-ordered map bounded to a fixed number of entries.
pub struct BoundedCache<K: Hash + Eq, V> {
    inner: LruCache<K, V, FxBuildHasher>,
}

impl<K: Hash + Eq, V> BoundedCache<K, V> {
    /// Create a cache holding at most `capacity` entries (at least one).
    pub fn new(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: LruCache::with_hasher(cap, FxBuildHasher),
        }
    }

    /// Get an entry, promoting it to most-recently-used.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.get(key)
    }

    /// Whether `key` is present, without touching the access order.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.contains(key)
    }

    /// Insert or replace an entry, returning the evicted or replaced pair if any.
    pub fn insert(&mut self, key: K, value: V) -> Option<(K, V)> {
        self.inner.push(key, value)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.cap().get()
    }
}

impl<K: Hash + Eq, V> std::fmt::Debug for BoundedCache<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundedCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}
