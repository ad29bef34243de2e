use std::{boxed::Box, vec, vec::Vec};

use super::node::{Node, NodePtr};

/// Owns the head tower and every node of a skiplist.
///
/// Nodes are addressed by slot index, slots released by [`Arena::dealloc`] are
/// handed out again by the next [`Arena::alloc`].
#[derive(Debug)]
pub(crate) struct Arena<V> {
  head: Box<[NodePtr]>,
  nodes: Vec<Option<Node<V>>>,
  free: Vec<u32>,
}

impl<V> Arena<V> {
  pub(crate) fn new(height: usize) -> Self {
    Self {
      head: vec![NodePtr::NULL; height].into_boxed_slice(),
      nodes: Vec::new(),
      free: Vec::new(),
    }
  }

  /// Returns the forward link of `ptr` at `level`.
  ///
  /// `ptr` must be the head or a live node whose tower is taller than `level`.
  #[inline]
  pub(crate) fn next(&self, ptr: NodePtr, level: usize) -> NodePtr {
    if ptr.is_head() {
      self.head[level]
    } else {
      self.node(ptr).tower[level]
    }
  }

  #[inline]
  pub(crate) fn set_next(&mut self, ptr: NodePtr, level: usize, next: NodePtr) {
    if ptr.is_head() {
      self.head[level] = next;
    } else {
      self.node_mut(ptr).tower[level] = next;
    }
  }

  #[inline]
  pub(crate) fn node(&self, ptr: NodePtr) -> &Node<V> {
    match self.nodes.get(ptr.index()) {
      Some(Some(node)) => node,
      _ => unreachable!("dangling node pointer {ptr:?}"),
    }
  }

  #[inline]
  pub(crate) fn node_mut(&mut self, ptr: NodePtr) -> &mut Node<V> {
    match self.nodes.get_mut(ptr.index()) {
      Some(Some(node)) => node,
      _ => unreachable!("dangling node pointer {ptr:?}"),
    }
  }

  /// Walks `level` rightwards from `start` and returns the last node whose key is less than `key`.
  #[inline]
  pub(crate) fn find_prev(&self, start: NodePtr, level: usize, key: u64) -> NodePtr {
    let mut prev = start;
    loop {
      let next = self.next(prev, level);
      if next.is_null() || self.node(next).key >= key {
        return prev;
      }
      prev = next;
    }
  }

  /// Stores the node in a free slot, the node is not linked into any level yet.
  pub(crate) fn alloc(&mut self, node: Node<V>) -> NodePtr {
    if let Some(index) = self.free.pop() {
      self.nodes[index as usize] = Some(node);
      return NodePtr::new(index);
    }

    let index = match u32::try_from(self.nodes.len()) {
      Ok(index) if index <= NodePtr::MAX_INDEX => index,
      _ => panic!("skiplist capacity overflow"),
    };
    self.nodes.push(Some(node));
    NodePtr::new(index)
  }

  /// Takes the node out of its slot, the caller must have unlinked it from every level.
  pub(crate) fn dealloc(&mut self, ptr: NodePtr) -> Node<V> {
    match self.nodes.get_mut(ptr.index()).and_then(Option::take) {
      Some(node) => {
        self.free.push(ptr.index() as u32);
        node
      }
      None => unreachable!("dangling node pointer {ptr:?}"),
    }
  }

  pub(crate) fn clear(&mut self) {
    self.head.iter_mut().for_each(|link| *link = NodePtr::NULL);
    self.nodes.clear();
    self.free.clear();
  }

  /// Returns the tower height of the head.
  #[inline]
  pub(crate) fn height(&self) -> usize {
    self.head.len()
  }
}
