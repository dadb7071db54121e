//! Mini LRU - A bounded in-memory key-value cache
//!
//! Keeps at most `capacity` entries and evicts the least recently used one
//! when a new key would exceed that bound.
//!
//! ```
//! use mini_lru::LruCache;
//!
//! let mut cache = LruCache::new(2).unwrap();
//! cache.insert("a", 1);
//! cache.insert("b", 2);
//! cache.get(&"a");
//! cache.insert("c", 3);
//!
//! assert!(cache.contains(&"a"));
//! assert!(!cache.contains(&"b"));
//! ```
//!
//! The cache is not synchronized. Callers sharing it across threads must put
//! the whole value behind one lock, since every operation updates the index
//! and the recency list together.

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{Cache, LruCache};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
