//! A [`SkipMap`] which can be shared between threads.
//!
//! Writers hold an exclusive lock for the duration of an upsert or removal, lookups share a
//! reader lock and keep it until the returned guard is dropped.

use parking_lot::{
  MappedRwLockReadGuard, MappedRwLockWriteGuard, RwLock, RwLockReadGuard, RwLockWriteGuard,
};

use super::{map::SkipMap as UnsyncSkipMap, Entry, Height, Options};

/// A lock-guarded skipmap, usually shared through an [`Arc`](std::sync::Arc).
///
/// ## Example
///
/// ```rust
/// use skipmap::sync::SkipMap;
/// use std::{sync::Arc, thread};
///
/// let map = Arc::new(SkipMap::new());
/// let handles: Vec<_> = (0..4u64)
///   .map(|i| {
///     let map = map.clone();
///     thread::spawn(move || {
///       map.insert(i, i * 10);
///     })
///   })
///   .collect();
///
/// for h in handles {
///   h.join().unwrap();
/// }
///
/// assert_eq!(map.len(), 4);
/// assert_eq!(*map.get(2).unwrap(), 20);
/// ```
pub struct SkipMap<V> {
  inner: RwLock<UnsyncSkipMap<V>>,
}

impl<V> Default for SkipMap<V> {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl<V> core::fmt::Debug for SkipMap<V> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    match self.inner.try_read() {
      Some(map) => f.debug_tuple("SkipMap").field(&*map).finish(),
      None => f.debug_tuple("SkipMap").field(&"<locked>").finish(),
    }
  }
}

impl<V> From<UnsyncSkipMap<V>> for SkipMap<V> {
  #[inline]
  fn from(map: UnsyncSkipMap<V>) -> Self {
    Self {
      inner: RwLock::new(map),
    }
  }
}

impl<V> SkipMap<V> {
  /// Creates an empty skipmap with the default [`Options`].
  #[inline]
  pub fn new() -> Self {
    Self::with_options(Options::new())
  }

  /// Creates an empty skipmap with the given [`Options`].
  #[inline]
  pub fn with_options(opts: Options) -> Self {
    Self::from(UnsyncSkipMap::with_options(opts))
  }

  /// Consumes the wrapper and returns the inner skipmap.
  #[inline]
  pub fn into_inner(self) -> UnsyncSkipMap<V> {
    self.inner.into_inner()
  }

  /// Returns the number of entries in the skipmap.
  #[inline]
  pub fn len(&self) -> usize {
    self.inner.read().len()
  }

  /// Returns `true` if the skipmap contains no entries.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.inner.read().is_empty()
  }

  /// Returns the maximum height of the towers in the skipmap.
  #[inline]
  pub fn max_height(&self) -> Height {
    self.inner.read().max_height()
  }

  /// Returns `true` if the skipmap contains the key.
  #[inline]
  pub fn contains_key(&self, key: u64) -> bool {
    self.inner.read().contains_key(key)
  }

  /// Returns a guard of the value corresponding to the key.
  ///
  /// Writers are blocked until the guard is dropped.
  pub fn get(&self, key: u64) -> Option<MappedRwLockReadGuard<'_, V>> {
    RwLockReadGuard::try_map(self.inner.read(), |map| {
      map.get(key).map(|ent| ent.value())
    })
    .ok()
  }

  /// Inserts the key-value pair, or replaces the value if the key already exists,
  /// and returns an exclusive guard of the live value.
  pub fn set(&self, key: u64, value: V) -> MappedRwLockWriteGuard<'_, V> {
    RwLockWriteGuard::map(self.inner.write(), |map| {
      let ptr = map.set_in_place(key, value);
      map.value_mut(ptr)
    })
  }

  /// Inserts the key-value pair, returning the old value if the key already existed.
  #[inline]
  pub fn insert(&self, key: u64, value: V) -> Option<V> {
    self.inner.write().insert(key, value)
  }

  /// Removes the entry of the key and returns it, or `None` if the key is not present.
  #[inline]
  pub fn remove(&self, key: u64) -> Option<Entry<V>> {
    self.inner.write().remove(key)
  }

  /// Removes all entries.
  #[inline]
  pub fn clear(&self) {
    self.inner.write().clear()
  }

  /// Calls the closure with a shared reference to the inner skipmap while holding the reader lock.
  #[inline]
  pub fn read<R>(&self, f: impl FnOnce(&UnsyncSkipMap<V>) -> R) -> R {
    f(&self.inner.read())
  }

  /// Calls the closure with an exclusive reference to the inner skipmap while holding the writer lock.
  #[inline]
  pub fn write<R>(&self, f: impl FnOnce(&mut UnsyncSkipMap<V>) -> R) -> R {
    f(&mut self.inner.write())
  }
}
