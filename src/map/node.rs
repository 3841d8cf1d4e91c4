use std::ptr;
use std::fmt;

use crate::slab::{Ptr, Slab};

/// The color of a node in a red-black tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

/// Storage for a single node of the tree, addressed by its index in the slab
#[derive(Debug, Clone)]
pub(crate) struct InnerNode<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) color: Color,
    pub(crate) parent: Ptr,
    pub(crate) left: Ptr,
    pub(crate) right: Ptr,
}

impl<K, V> InnerNode<K, V> {
    /// Creates a detached node
    pub(crate) fn new(key: K, value: V, color: Color, parent: Ptr) -> Self {
        Self {
            key,
            value,
            color,
            parent,
            left: Ptr::null(),
            right: Ptr::null(),
        }
    }
}

/// A single node of the red-black tree
pub struct Node<'a, K, V> {
    nodes: &'a Slab<InnerNode<K, V>>,
    index: usize,
    node: &'a InnerNode<K, V>,
}

impl<'a, K, V> fmt::Debug for Node<'a, K, V>
    where K: fmt::Debug,
          V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", self.key())
            .field("value", self.value())
            .field("color", &self.color())
            .field("left", &self.left())
            .field("right", &self.right())
            .finish()
    }
}

impl<'a, K, V> Clone for Node<'a, K, V> {
    fn clone(&self) -> Self {
        Self {..*self}
    }
}

impl<'a, K: PartialEq, V: PartialEq> PartialEq for Node<'a, K, V> {
    fn eq(&self, other: &Self) -> bool {
        // If the pointers are the same, the values are guaranteed to be equal (similar to `Arc`
        // using `ptr_eq` to optimize its `PartialEq` impl)
        let ptr_eq = ptr::eq(self.nodes, other.nodes) && self.index == other.index;
        ptr_eq || (self.key().eq(other.key()) && self.value().eq(other.value()))
    }
}

impl<'a, K: Eq, V: Eq> Eq for Node<'a, K, V> {}

impl<'a, K, V> Node<'a, K, V> {
    /// Returns a view of the node at `ptr`, or `None` for the null pointer
    pub(crate) fn new(nodes: &'a Slab<InnerNode<K, V>>, ptr: Ptr) -> Option<Self> {
        let index = ptr.into_index()?;
        Some(Self {nodes, index, node: &nodes[index]})
    }

    /// Returns the key of this node
    pub fn key(&self) -> &'a K {
        &self.node.key
    }

    /// Returns the value of this node
    pub fn value(&self) -> &'a V {
        &self.node.value
    }

    /// Returns the color of this node
    pub fn color(&self) -> Color {
        self.node.color
    }

    pub fn is_red(&self) -> bool {
        self.node.color == Color::Red
    }

    pub fn is_black(&self) -> bool {
        self.node.color == Color::Black
    }

    /// Returns true if this node has a left subtree
    pub fn has_left(&self) -> bool {
        !self.node.left.is_null()
    }

    /// Returns true if this node has a right subtree
    pub fn has_right(&self) -> bool {
        !self.node.right.is_null()
    }

    /// Returns the left child node (subtree) of this node, if any
    pub fn left(&self) -> Option<Self> {
        Self::new(self.nodes, self.node.left)
    }

    /// Returns the right child node (subtree) of this node, if any
    pub fn right(&self) -> Option<Self> {
        Self::new(self.nodes, self.node.right)
    }

    /// Returns the parent of this node, or `None` for the root
    pub fn parent(&self) -> Option<Self> {
        Self::new(self.nodes, self.node.parent)
    }
}
