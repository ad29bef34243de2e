use core::{fmt, mem};

use rand::{rngs::SmallRng, Rng, SeedableRng};

use super::{
  arena::Arena,
  node::{Node, NodePtr},
  types::MAX_HEIGHT,
  Height, Options,
};

mod entry;
pub use entry::*;

#[cfg(test)]
mod tests;

/// The search path of a key: for every level, the last node whose key is less than the key.
///
/// Levels at and above the map's maximum height are never read.
type Path = [NodePtr; MAX_HEIGHT];

/// An ordered map from `u64` keys to values of type `V`, based on a skiplist.
///
/// Every entry is linked into level `0` and, with a configurable probability, into each
/// further level up to a randomly drawn height, so lookups, upserts and removals all run
/// in expected logarithmic time without any rebalancing.
///
/// The map does not cache any per-call state, lookups only need `&self` and
/// allocate nothing. For sharing a map between threads see [`sync::SkipMap`](crate::sync::SkipMap).
///
/// ## Example
///
/// ```rust
/// use skipmap::SkipMap;
///
/// let mut map = SkipMap::new();
/// map.set(10, "a");
/// map.set(30, "c");
/// map.set(20, "b");
///
/// assert_eq!(map.len(), 3);
/// assert_eq!(map.get(20).unwrap().value(), &"b");
///
/// let removed = map.remove(10).unwrap();
/// assert_eq!(removed.into_value(), "a");
/// assert!(map.get(10).is_none());
/// ```
pub struct SkipMap<V> {
  arena: Arena<V>,
  len: usize,
  opts: Options,
  rng: SmallRng,
}

impl<V> Default for SkipMap<V> {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl<V> fmt::Debug for SkipMap<V> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SkipMap")
      .field("len", &self.len)
      .field("max_height", &self.opts.max_height())
      .field("probability", &self.opts.probability())
      .finish()
  }
}

impl<V> SkipMap<V> {
  /// Creates an empty skipmap with the default [`Options`]: a maximum height of `21` and
  /// a promotion probability of `0x3FFF / 0xFFFF`.
  #[inline]
  pub fn new() -> Self {
    Self::with_options(Options::new())
  }

  /// Creates an empty skipmap with the given [`Options`].
  ///
  /// ## Example
  ///
  /// ```rust
  /// use skipmap::{SkipMap, Options, Height};
  ///
  /// let map = SkipMap::<u64>::with_options(
  ///   Options::new().with_max_height(Height::from_u8(8)).with_seed(7),
  /// );
  /// assert_eq!(map.max_height(), 8u8);
  /// ```
  pub fn with_options(opts: Options) -> Self {
    let rng = match opts.seed() {
      Some(seed) => SmallRng::seed_from_u64(seed),
      None => SmallRng::from_os_rng(),
    };

    Self {
      arena: Arena::new(opts.max_height().to_usize()),
      len: 0,
      opts,
      rng,
    }
  }

  /// Returns the number of entries in the skipmap.
  #[inline]
  pub const fn len(&self) -> usize {
    self.len
  }

  /// Returns `true` if the skipmap contains no entries.
  #[inline]
  pub const fn is_empty(&self) -> bool {
    self.len == 0
  }

  /// Returns the maximum height of the towers in the skipmap.
  #[inline]
  pub const fn max_height(&self) -> Height {
    self.opts.max_height()
  }

  /// Returns the probability numerator of promoting an entry to the next level.
  #[inline]
  pub const fn probability(&self) -> u16 {
    self.opts.probability()
  }

  /// Returns the options the skipmap was created with.
  #[inline]
  pub const fn options(&self) -> &Options {
    &self.opts
  }

  /// Returns a random height in `[1, max_height]` for a new entry.
  ///
  /// Starting from `1`, the height grows by one for every drawn 16-bit value below the
  /// probability numerator, until a draw fails or the maximum height is reached.
  pub fn random_height(&mut self) -> Height {
    let max = self.opts.max_height().to_u8();
    let probability = self.opts.probability();

    let mut height = 1;
    while height < max && self.rng.random::<u16>() < probability {
      height += 1;
    }

    #[cfg(feature = "tracing")]
    if height == max {
      tracing::debug!(height, "random height reached the maximum height");
    }

    Height::from_u8(height)
  }

  /// Returns the entry corresponding to the key.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use skipmap::SkipMap;
  ///
  /// let mut map = SkipMap::new();
  /// map.set(1, "one");
  ///
  /// let ent = map.get(1).unwrap();
  /// assert_eq!(ent.key(), 1);
  /// assert_eq!(ent.value(), &"one");
  /// assert!(map.get(2).is_none());
  /// ```
  pub fn get(&self, key: u64) -> Option<EntryRef<'_, V>> {
    self.find(key).map(|ptr| self.entry_ref(ptr))
  }

  /// Returns a mutable reference to the value corresponding to the key.
  pub fn get_mut(&mut self, key: u64) -> Option<&mut V> {
    let ptr = self.find(key)?;
    Some(&mut self.arena.node_mut(ptr).value)
  }

  /// Returns `true` if the skipmap contains the key.
  #[inline]
  pub fn contains_key(&self, key: u64) -> bool {
    self.find(key).is_some()
  }

  /// Inserts the key-value pair, or replaces the value in place if the key already exists.
  ///
  /// Replacing a value never changes the structure of the skipmap. Returns the live entry.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use skipmap::SkipMap;
  ///
  /// let mut map = SkipMap::new();
  /// assert_eq!(map.set(30, 3).value(), &3);
  /// assert_eq!(map.set(30, 9).value(), &9);
  /// assert_eq!(map.len(), 1);
  /// ```
  pub fn set(&mut self, key: u64, value: V) -> EntryRef<'_, V> {
    let (ptr, _) = self.upsert(key, value);
    self.entry_ref(ptr)
  }

  /// Inserts the key-value pair, returning the old value if the key already existed.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use skipmap::SkipMap;
  ///
  /// let mut map = SkipMap::new();
  /// assert_eq!(map.insert(7, "a"), None);
  /// assert_eq!(map.insert(7, "b"), Some("a"));
  /// ```
  pub fn insert(&mut self, key: u64, value: V) -> Option<V> {
    self.upsert(key, value).1
  }

  /// Removes the entry of the key and returns it detached from the skipmap,
  /// or `None` if the key is not present.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use skipmap::SkipMap;
  ///
  /// let mut map = SkipMap::new();
  /// map.set(20, 4);
  ///
  /// let ent = map.remove(20).unwrap();
  /// assert_eq!(ent.key(), 20);
  /// assert_eq!(ent.value(), &4);
  /// assert!(map.remove(20).is_none());
  /// assert!(map.is_empty());
  /// ```
  pub fn remove(&mut self, key: u64) -> Option<Entry<V>> {
    let path = self.find_path(key);
    let candidate = self.arena.next(path[0], 0);
    if candidate.is_null() || self.arena.node(candidate).key != key {
      return None;
    }

    let node = self.arena.dealloc(candidate);
    for (level, (&prev, &next)) in path.iter().zip(node.tower.iter()).enumerate() {
      self.arena.set_next(prev, level, next);
    }
    self.len -= 1;

    #[cfg(feature = "tracing")]
    tracing::trace!(key, height = node.height(), "removed entry");

    Some(Entry::from_node(node))
  }

  /// Removes all entries, the options of the skipmap are kept.
  pub fn clear(&mut self) {
    self.arena.clear();
    self.len = 0;
  }
}

impl<V> SkipMap<V> {
  /// Descends from the top level without recording the path, returns the node holding the key.
  fn find(&self, key: u64) -> Option<NodePtr> {
    let mut prev = NodePtr::HEAD;
    for level in (0..self.arena.height()).rev() {
      prev = self.arena.find_prev(prev, level, key);
    }

    let next = self.arena.next(prev, 0);
    (!next.is_null() && self.arena.node(next).key == key).then_some(next)
  }

  /// Computes the search path of the key.
  ///
  /// The search at each level continues from where the level above stopped, a node
  /// reached at some level is present at every level below it.
  fn find_path(&self, key: u64) -> Path {
    let mut path = [NodePtr::HEAD; MAX_HEIGHT];
    let mut prev = NodePtr::HEAD;
    for level in (0..self.arena.height()).rev() {
      prev = self.arena.find_prev(prev, level, key);
      path[level] = prev;
    }
    path
  }

  fn upsert(&mut self, key: u64, value: V) -> (NodePtr, Option<V>) {
    let path = self.find_path(key);
    let candidate = self.arena.next(path[0], 0);
    if !candidate.is_null() && self.arena.node(candidate).key == key {
      let old = mem::replace(&mut self.arena.node_mut(candidate).value, value);
      return (candidate, Some(old));
    }

    (self.link(&path, key, value), None)
  }

  /// Allocates a new entry and splices it into every level of its tower.
  fn link(&mut self, path: &Path, key: u64, value: V) -> NodePtr {
    let height = self.random_height().to_usize();
    let ptr = self.arena.alloc(Node::new(key, value, height));

    for (level, &prev) in path.iter().enumerate().take(height) {
      let next = self.arena.next(prev, level);
      self.arena.set_next(ptr, level, next);
      self.arena.set_next(prev, level, ptr);
    }
    self.len += 1;

    #[cfg(feature = "tracing")]
    tracing::trace!(key, height, "inserted entry");

    ptr
  }

  #[inline]
  fn entry_ref(&self, ptr: NodePtr) -> EntryRef<'_, V> {
    EntryRef::new(self.arena.node(ptr))
  }

  /// Returns a mutable reference to the value of a live node.
  #[cfg(feature = "std")]
  #[inline]
  pub(crate) fn value_mut(&mut self, ptr: NodePtr) -> &mut V {
    &mut self.arena.node_mut(ptr).value
  }

  /// Upserts the key-value pair and returns the node it lives in.
  #[cfg(feature = "std")]
  #[inline]
  pub(crate) fn set_in_place(&mut self, key: u64, value: V) -> NodePtr {
    self.upsert(key, value).0
  }
}

impl<V> Extend<(u64, V)> for SkipMap<V> {
  fn extend<I: IntoIterator<Item = (u64, V)>>(&mut self, iter: I) {
    for (key, value) in iter {
      self.upsert(key, value);
    }
  }
}

impl<V> FromIterator<(u64, V)> for SkipMap<V> {
  fn from_iter<I: IntoIterator<Item = (u64, V)>>(iter: I) -> Self {
    let mut map = Self::new();
    map.extend(iter);
    map
  }
}
