use std::fmt;

use crate::map::{self, Color};

/// A single node of the red-black tree behind a set
#[derive(PartialEq, Eq)]
pub struct Node<'a, T> {
    inner: map::Node<'a, T, ()>,
}

impl<'a, T> Clone for Node<'a, T> {
    fn clone(&self) -> Self {
        Self {inner: self.inner.clone()}
    }
}

impl<'a, T> fmt::Debug for Node<'a, T>
    where T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("value", self.value())
            .field("color", &self.color())
            .field("left", &self.left())
            .field("right", &self.right())
            .finish()
    }
}

impl<'a, T> Node<'a, T> {
    pub(super) fn new(inner: map::Node<'a, T, ()>) -> Self {
        Self {inner}
    }

    /// Returns the value of this node
    pub fn value(&self) -> &'a T {
        self.inner.key()
    }

    /// Returns the color of this node
    pub fn color(&self) -> Color {
        self.inner.color()
    }

    pub fn is_red(&self) -> bool {
        self.inner.is_red()
    }

    pub fn is_black(&self) -> bool {
        self.inner.is_black()
    }

    /// Returns true if this node has a left subtree
    pub fn has_left(&self) -> bool {
        self.inner.has_left()
    }

    /// Returns true if this node has a right subtree
    pub fn has_right(&self) -> bool {
        self.inner.has_right()
    }

    /// Returns the left child node (subtree) of this node, if any
    pub fn left(&self) -> Option<Self> {
        self.inner.left().map(Self::new)
    }

    /// Returns the right child node (subtree) of this node, if any
    pub fn right(&self) -> Option<Self> {
        self.inner.right().map(Self::new)
    }

    /// Returns the parent of this node, or `None` for the root
    pub fn parent(&self) -> Option<Self> {
        self.inner.parent().map(Self::new)
    }
}
