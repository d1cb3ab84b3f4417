//! Bounded recency cache
//!
//! A fixed-capacity least-recently-used cache that keeps its entries in a
//! contiguous slot array ordered from most to least recently used. Values
//! are created lazily through a function supplied at construction.
//!
//! # Recency Model
//!
//! | Operation | Found | Not found |
//! |-----------|-------|-----------|
//! | `retrieve` | move to slot 0 | create, evict LRU if full, insert at slot 0 |
//! | `refresh` | recreate in place | no-op |
//!
//! Capacities are bounded to `[MINIMUM_CAPACITY, MAXIMUM_CAPACITY]`, which
//! keeps the linear shift cheap.

pub mod lru;

pub use lru::{CacheName, Creator, LruCache, MAXIMUM_CAPACITY, MINIMUM_CAPACITY};
