//! Cache Store Module
//!
//! Main cache engine combining a HashMap index with the recency list.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use tracing::{debug, trace, warn};

use crate::cache::{Cache, Handle, Iter, RecencyList};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};

/// Upper bound on slots reserved up front; larger caches grow on demand.
const MAX_PREALLOCATED: usize = 4096;

// == LRU Cache ==
/// Bounded key-value cache with least-recently-used eviction.
///
/// The index maps each key to a [`Handle`] into the recency list, which is
/// the sole owner of entries. Both structures always describe the same set
/// of keys.
///
/// Not synchronized: wrap the whole cache in a single lock for shared use.
#[derive(Debug)]
pub struct LruCache<K, V> {
    /// Key to list position
    index: HashMap<K, Handle>,
    /// Entries ordered from most to least recently used
    order: RecencyList<K, V>,
    /// Maximum number of entries, fixed at construction
    capacity: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// # Errors
    /// Returns [`CacheError::InvalidCapacity`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            warn!("Rejected cache capacity of {}", capacity);
            return Err(CacheError::InvalidCapacity(capacity));
        }

        debug!("Created LRU cache with capacity {}", capacity);
        let reserved = capacity.min(MAX_PREALLOCATED);
        Ok(Self {
            index: HashMap::with_capacity(reserved),
            order: RecencyList::with_capacity(reserved),
            capacity,
        })
    }

    /// Creates a cache from a validated configuration.
    pub fn with_config(config: &CacheConfig) -> Result<Self> {
        config.validate()?;
        Self::new(config.capacity)
    }

    // == Insert ==
    /// Stores a key-value pair and marks it most recently used.
    ///
    /// An existing entry is updated in place and moved to the front. When a
    /// new key pushes the cache over capacity, the least recently used entry
    /// is evicted.
    ///
    /// Returns true if the key was already present.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        if let Some(&handle) = self.index.get(&key) {
            if let Some(entry) = self.order.get_mut(handle) {
                entry.value = value;
            }
            self.order.move_to_front(handle);
            trace!("Overwrote existing entry");
            return true;
        }

        let handle = self.order.push_front(key.clone(), value);
        self.index.insert(key, handle);
        trace!("Inserted new entry, len={}", self.index.len());

        // At most one entry was added, so at most one eviction is needed
        if self.index.len() > self.capacity {
            self.pop_lru();
        }
        false
    }

    // == Get ==
    /// Retrieves a value by key and marks it most recently used.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = *self.index.get(key)?;
        self.order.move_to_front(handle);
        self.order.get(handle).map(|entry| &entry.value)
    }

    // == Peek ==
    /// Retrieves a value by key without touching its recency.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = *self.index.get(key)?;
        self.order.get(handle).map(|entry| &entry.value)
    }

    /// Checks whether a key is present without touching its recency.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    // == Delete ==
    /// Removes an entry by key and returns its value.
    pub fn delete<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        // The index record goes by the caller's key, never by handle
        let handle = self.index.remove(key)?;
        self.order.remove(handle).map(|entry| entry.value)
    }

    // == Evict ==
    /// Removes the least recently used entry and returns its value.
    pub fn evict(&mut self) -> Option<V> {
        self.pop_lru().map(|(_, value)| value)
    }

    /// Removes the least recently used entry and returns its key and value.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let entry = self.order.pop_back()?;
        self.index.remove(&entry.key);
        debug!(
            "Evicted least recently used entry, len={}, capacity={}",
            self.index.len(),
            self.capacity
        );
        Some(entry.into_parts())
    }

    /// Returns the next eviction candidate without removing it.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.order.back().map(|entry| (&entry.key, &entry.value))
    }

    // == Clear ==
    /// Removes every entry. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.index.clear();
        self.order.clear();
        debug!("Cleared LRU cache");
    }
}

impl<K, V> LruCache<K, V> {
    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    // == Size ==
    /// Returns the configured capacity.
    pub fn size(&self) -> usize {
        self.capacity
    }

    /// Iterates over entries from most to least recently used.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.order.iter()
    }
}

#[cfg(test)]
impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone + std::fmt::Debug,
{
    /// Checks that the index and the recency list describe the same keys.
    pub(crate) fn assert_consistent(&self) {
        self.order.assert_links();
        assert_eq!(self.index.len(), self.order.len(), "index/list size mismatch");
        assert!(self.len() <= self.capacity, "over capacity");

        for (key, &handle) in &self.index {
            let entry = self.order.get(handle).expect("index points at free slot");
            assert!(&entry.key == key, "index handle for {:?} points elsewhere", key);
        }
        for (key, _) in self.order.iter() {
            assert!(self.index.contains_key(key), "{:?} missing from index", key);
        }
    }
}

impl<K, V> Cache<K, V> for LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    fn insert(&mut self, key: K, value: V) -> bool {
        LruCache::insert(self, key, value)
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        LruCache::get(self, key)
    }

    fn delete(&mut self, key: &K) -> Option<V> {
        LruCache::delete(self, key)
    }

    fn evict(&mut self) -> Option<V> {
        LruCache::evict(self)
    }

    fn len(&self) -> usize {
        LruCache::len(self)
    }

    fn size(&self) -> usize {
        LruCache::size(self)
    }
}

impl<'a, K, V> IntoIterator for &'a LruCache<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
