use std::iter::FusedIterator;

use crate::slab::{Ptr, Slab};

use super::InnerNode;

/// An in-order iterator over the entries of an `RBTreeMap`, yielding keys in ascending order
pub struct IterInorder<'a, K, V> {
    nodes: &'a Slab<InnerNode<K, V>>,
    stack: Vec<usize>,
    /// Number of entries not yet yielded
    remaining: usize,
}

impl<'a, K, V> Clone for IterInorder<'a, K, V> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

// See: https://www.geeksforgeeks.org/inorder-tree-traversal-without-recursion/
impl<'a, K, V> IterInorder<'a, K, V> {
    pub(super) fn new(nodes: &'a Slab<InnerNode<K, V>>, root: Ptr) -> Self {
        // A red-black tree of n nodes is at most 2*log2(n + 1) deep
        let depth_bound = 2 * (usize::BITS - nodes.len().leading_zeros()) as usize;
        let mut iter = Self {
            nodes,
            stack: Vec::with_capacity(depth_bound),
            remaining: nodes.len(),
        };
        iter.push_left_spine(root);

        iter
    }

    fn push_left_spine(&mut self, mut current: Ptr) {
        while let Some(index) = current.into_index() {
            self.stack.push(index);
            current = self.nodes[index].left;
        }
    }
}

impl<'a, K, V> Iterator for IterInorder<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let top = self.stack.pop()?;
        let node = &self.nodes[top];
        self.push_left_spine(node.right);
        self.remaining -= 1;

        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> ExactSizeIterator for IterInorder<'a, K, V> {}

impl<'a, K, V> FusedIterator for IterInorder<'a, K, V> {}

/// An iterator over the keys of an `RBTreeMap`, in ascending order
pub struct Keys<'a, K, V> {
    pub(super) inner: IterInorder<'a, K, V>,
}

impl<'a, K, V> Clone for Keys<'a, K, V> {
    fn clone(&self) -> Self {
        Self {inner: self.inner.clone()}
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> ExactSizeIterator for Keys<'a, K, V> {}

impl<'a, K, V> FusedIterator for Keys<'a, K, V> {}

/// An iterator over the values of an `RBTreeMap`, in ascending order of their keys
pub struct Values<'a, K, V> {
    pub(super) inner: IterInorder<'a, K, V>,
}

impl<'a, K, V> Clone for Values<'a, K, V> {
    fn clone(&self) -> Self {
        Self {inner: self.inner.clone()}
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> ExactSizeIterator for Values<'a, K, V> {}

impl<'a, K, V> FusedIterator for Values<'a, K, V> {}
