//! Cache Entry Module
//!
//! Defines the node stored in the recency list.

// == Cache Entry ==
/// A single key-value pair plus its links in the recency list.
///
/// Links are slot indices into the owning list's arena; `None` marks the
/// front (for `prev`) or the back (for `next`).
#[derive(Debug, Clone)]
pub struct Entry<K, V> {
    /// The key, kept so eviction can clear the index
    pub key: K,
    /// The stored value
    pub value: V,
    pub(crate) prev: Option<usize>,
    pub(crate) next: Option<usize>,
}

impl<K, V> Entry<K, V> {
    // == Constructor ==
    /// Creates a detached entry.
    pub fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            prev: None,
            next: None,
        }
    }

    // == Into Parts ==
    /// Consumes the entry, returning its key and value.
    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}
