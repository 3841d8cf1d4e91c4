use std::iter::FusedIterator;

use crate::map;

/// Values of a set in ascending order
pub struct IterInorder<'a, T> {
    inner: map::Keys<'a, T, ()>,
}

impl<'a, T> Clone for IterInorder<'a, T> {
    fn clone(&self) -> Self {
        Self {inner: self.inner.clone()}
    }
}

impl<'a, T> IterInorder<'a, T> {
    pub(super) fn new(inner: map::Keys<'a, T, ()>) -> Self {
        Self {inner}
    }
}

impl<'a, T> Iterator for IterInorder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T> ExactSizeIterator for IterInorder<'a, T> {}

impl<'a, T> FusedIterator for IterInorder<'a, T> {}
