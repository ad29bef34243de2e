use std::{boxed::Box, vec};

/// A link to a node in the [`Arena`](crate::arena::Arena), either the index of
/// an entry slot or one of the `NULL`/`HEAD` sentinels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodePtr(u32);

impl NodePtr {
  pub(crate) const NULL: Self = Self(u32::MAX);
  pub(crate) const HEAD: Self = Self(u32::MAX - 1);

  /// The largest slot index a node can be allocated at.
  pub(crate) const MAX_INDEX: u32 = u32::MAX - 2;

  #[inline]
  pub(crate) const fn new(index: u32) -> Self {
    debug_assert!(index <= Self::MAX_INDEX);
    Self(index)
  }

  #[inline]
  pub(crate) const fn is_null(&self) -> bool {
    self.0 == Self::NULL.0
  }

  #[inline]
  pub(crate) const fn is_head(&self) -> bool {
    self.0 == Self::HEAD.0
  }

  #[inline]
  pub(crate) const fn index(&self) -> usize {
    self.0 as usize
  }
}

/// An entry of the skiplist, its tower holds one forward link per level it occupies.
#[derive(Debug)]
pub(crate) struct Node<V> {
  pub(crate) key: u64,
  pub(crate) value: V,
  pub(crate) tower: Box<[NodePtr]>,
}

impl<V> Node<V> {
  #[inline]
  pub(crate) fn new(key: u64, value: V, height: usize) -> Self {
    debug_assert!(height >= 1);
    Self {
      key,
      value,
      tower: vec![NodePtr::NULL; height].into_boxed_slice(),
    }
  }

  #[inline]
  pub(crate) fn height(&self) -> usize {
    self.tower.len()
  }
}
