//! Cache Module
//!
//! Provides a bounded in-memory key-value cache with LRU eviction.

mod entry;
mod lru;
mod store;


// Re-export public types
pub use entry::Entry;
pub use lru::{Handle, Iter, RecencyList};
pub use store::LruCache;

// == Public Constants ==
/// Capacity used when none is configured
pub const DEFAULT_CAPACITY: usize = 1000;

// == Cache Trait ==
/// Common interface of a fixed-capacity cache.
///
/// Absent keys and an empty cache are reported as `None`; no operation
/// fails otherwise.
pub trait Cache<K, V> {
    /// Inserts or overwrites `key`, returning whether it was already present.
    fn insert(&mut self, key: K, value: V) -> bool;

    /// Looks up `key` and marks it most recently used.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Removes `key` and returns its value.
    fn delete(&mut self, key: &K) -> Option<V>;

    /// Removes the least recently used entry and returns its value.
    fn evict(&mut self) -> Option<V>;

    /// Returns the current number of entries.
    fn len(&self) -> usize;

    /// Returns the maximum number of entries.
    fn size(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
