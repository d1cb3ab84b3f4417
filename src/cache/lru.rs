//! Fixed-capacity LRU cache over a contiguous slot array
//!
//! Slot 0 always holds the most recently used entry. Promotion and
//! insertion shift the more recent slots right by one, so every operation
//! costs O(capacity).

use crate::error::CacheError;
use std::fmt;

/// Smallest capacity accepted by [`LruCache::new`]
pub const MINIMUM_CAPACITY: usize = 4;

/// Largest capacity accepted by [`LruCache::new`]
pub const MAXIMUM_CAPACITY: usize = 128;

/// Boxed creation function, for caches stored in structs
pub type Creator<N, V, E> = Box<dyn FnMut(&N) -> Result<V, E> + Send>;

/// A type usable as a cache lookup name
///
/// Names are compared with `PartialEq`. A name that fails
/// [`is_valid_name`](CacheName::is_valid_name) is rejected with
/// [`CacheError::NullName`] before the cache is searched.
pub trait CacheName: Clone + PartialEq {
    /// Whether this name may be used as a lookup key
    fn is_valid_name(&self) -> bool {
        true
    }
}

impl CacheName for String {
    fn is_valid_name(&self) -> bool {
        !self.is_empty()
    }
}

impl CacheName for &str {
    fn is_valid_name(&self) -> bool {
        !self.is_empty()
    }
}

macro_rules! always_valid_name {
    ($($ty:ty),* $(,)?) => {
        $(impl CacheName for $ty {})*
    };
}

always_valid_name!(char, u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

/// Bounded least-recently-used cache with lazy value creation
///
/// Values are produced by the creation function `F` the first time a name
/// is retrieved. Errors returned by `F` are passed through to the caller
/// unchanged, and a failed creation leaves the cache untouched.
///
/// The cache is not synchronized. Callers that share it between threads
/// must wrap it themselves.
pub struct LruCache<N, V, F> {
    /// Entries ordered from most (index 0) to least recently used
    slots: Box<[Option<(N, V)>]>,

    /// Number of populated slots; grows to capacity and never shrinks
    len: usize,

    create: F,
}

impl<N, V, F> LruCache<N, V, F>
where
    N: CacheName,
{
    /// Create an empty cache holding at most `capacity` entries
    pub fn new<E>(capacity: usize, create: F) -> Result<Self, CacheError>
    where
        F: FnMut(&N) -> Result<V, E>,
    {
        if !(MINIMUM_CAPACITY..=MAXIMUM_CAPACITY).contains(&capacity) {
            return Err(CacheError::InvalidCapacity(capacity));
        }

        Ok(Self {
            slots: (0..capacity).map(|_| None).collect(),
            len: 0,
            create,
        })
    }

    /// Return the value for `name`, creating it on a miss
    ///
    /// A hit moves the entry to the front. A miss calls the creation
    /// function, evicts the least recently used entry when the cache is
    /// full and installs the new entry at the front.
    pub fn retrieve<E>(&mut self, name: &N) -> Result<V, E>
    where
        F: FnMut(&N) -> Result<V, E>,
        E: From<CacheError>,
        V: Clone,
    {
        if !name.is_valid_name() {
            return Err(CacheError::NullName.into());
        }

        let hit = self.find(name).map(|(index, value)| (index, value.clone()));
        if let Some((index, value)) = hit {
            // Shifts [0, index) right by one and lands the hit at slot 0
            self.slots[..=index].rotate_right(1);
            return Ok(value);
        }

        let value = (self.create)(name)?;

        // Fill cursor, clamped to the last slot once the cache is full
        let slot = self.len.min(self.capacity() - 1);
        self.slots[slot] = Some((name.clone(), value.clone()));
        self.slots[..=slot].rotate_right(1);
        self.len = (self.len + 1).min(self.capacity());

        Ok(value)
    }

    /// Recreate the value for `name` in place
    ///
    /// Recency order is not affected. Names that are not cached are
    /// ignored.
    pub fn refresh<E>(&mut self, name: &N) -> Result<(), E>
    where
        F: FnMut(&N) -> Result<V, E>,
        E: From<CacheError>,
    {
        if !name.is_valid_name() {
            return Err(CacheError::NullName.into());
        }

        if let Some(index) = self.position(name) {
            let fresh = (self.create)(name)?;
            if let Some((_, value)) = &mut self.slots[index] {
                *value = fresh;
            }
        }

        Ok(())
    }

    /// Whether `name` is cached, without touching recency
    pub fn contains(&self, name: &N) -> bool {
        self.position(name).is_some()
    }

    /// Look at the cached value for `name` without promoting it
    pub fn peek(&self, name: &N) -> Option<&V> {
        self.find(name).map(|(_, value)| value)
    }

    fn position(&self, name: &N) -> Option<usize> {
        self.find(name).map(|(index, _)| index)
    }

    /// Slot index and value of `name`
    fn find(&self, name: &N) -> Option<(usize, &V)> {
        self.slots[..self.len]
            .iter()
            .enumerate()
            .find_map(|(index, slot)| match slot {
                Some((cached, value)) if cached == name => Some((index, value)),
                _ => None,
            })
    }
}

impl<N, V, F> LruCache<N, V, F> {
    /// Maximum number of entries
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the next miss will evict an entry
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Entries from most to least recently used
    pub fn iter(&self) -> impl Iterator<Item = (&N, &V)> {
        self.slots[..self.len]
            .iter()
            .filter_map(|slot| slot.as_ref().map(|(name, value)| (name, value)))
    }
}

impl<N, V, F> LruCache<N, V, F>
where
    V: PartialEq,
{
    /// Whether any cached entry holds `value`
    pub fn has(&self, value: &V) -> bool {
        self.iter().any(|(_, cached)| cached == value)
    }
}

impl<N, V, F> fmt::Debug for LruCache<N, V, F>
where
    N: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.capacity())
            .field("len", &self.len)
            .field("entries", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}
