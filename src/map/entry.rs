use crate::{node::Node, Height};

/// A reference to a live entry in the [`SkipMap`](super::SkipMap).
#[derive(Debug)]
pub struct EntryRef<'a, V> {
  key: u64,
  value: &'a V,
  height: Height,
}

impl<V> Clone for EntryRef<'_, V> {
  #[inline]
  fn clone(&self) -> Self {
    *self
  }
}

impl<V> Copy for EntryRef<'_, V> {}

impl<'a, V> EntryRef<'a, V> {
  #[inline]
  pub(crate) fn new(node: &'a Node<V>) -> Self {
    Self {
      key: node.key,
      value: &node.value,
      height: height_of(node),
    }
  }

  /// Returns the key of the entry.
  #[inline]
  pub const fn key(&self) -> u64 {
    self.key
  }

  /// Returns the value of the entry.
  #[inline]
  pub const fn value(&self) -> &'a V {
    self.value
  }

  /// Returns the number of levels the entry is linked into.
  #[inline]
  pub const fn height(&self) -> Height {
    self.height
  }
}

/// An entry removed from the [`SkipMap`](super::SkipMap), the caller owns its key and value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<V> {
  key: u64,
  value: V,
  height: Height,
}

impl<V> Entry<V> {
  #[inline]
  pub(crate) fn from_node(node: Node<V>) -> Self {
    let height = height_of(&node);
    Self {
      key: node.key,
      value: node.value,
      height,
    }
  }

  /// Returns the key of the entry.
  #[inline]
  pub const fn key(&self) -> u64 {
    self.key
  }

  /// Returns the value of the entry.
  #[inline]
  pub const fn value(&self) -> &V {
    &self.value
  }

  /// Returns the number of levels the entry was linked into.
  #[inline]
  pub const fn height(&self) -> Height {
    self.height
  }

  /// Consumes the entry and returns its value.
  #[inline]
  pub fn into_value(self) -> V {
    self.value
  }

  /// Consumes the entry and returns its key and value.
  #[inline]
  pub fn into_parts(self) -> (u64, V) {
    (self.key, self.value)
  }
}

#[inline]
fn height_of<V>(node: &Node<V>) -> Height {
  // towers are never taller than the head, which is at most `Height::MAX`
  Height::from_u8(node.height() as u8)
}
