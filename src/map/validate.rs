use std::cmp::Ordering;

use thiserror::Error;

use crate::compare::Comparator;
use crate::slab::Ptr;

use super::{Color, RBTreeMap};

/// The first red-black tree invariant found broken by `RBTreeMap::check_invariants`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("root node is red")]
    RedRoot,
    #[error("root node has a parent link")]
    RootHasParent,
    #[error("child of slot {parent} does not link back to it")]
    BrokenParentLink { parent: usize },
    #[error("red node in slot {node} has a red child")]
    RedChildOfRed { node: usize },
    #[error("subtrees of slot {node} have different black heights (left {left}, right {right})")]
    UnequalBlackHeight { node: usize, left: usize, right: usize },
    #[error("keys are not strictly increasing in-order (at slot {node})")]
    OutOfOrder { node: usize },
    #[error("{reachable} nodes are reachable from the root but the map holds {len}")]
    LengthMismatch { reachable: usize, len: usize },
}

impl<K, V, C: Comparator<K>> RBTreeMap<K, V, C> {
    /// Checks every red-black tree invariant and returns the first one that does not hold
    ///
    /// Walks the entire tree, so this is `O(n)`. Intended for tests and debugging, the tree
    /// maintains these invariants on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbmap::RBTreeMap;
    ///
    /// let map: RBTreeMap<_, _> = (0..100).map(|i| (i, i * i)).collect();
    /// assert_eq!(map.check_invariants(), Ok(()));
    /// ```
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let root = match self.root.into_index() {
            Some(root) => root,
            None if self.len() == 0 => return Ok(()),
            None => return Err(InvariantViolation::LengthMismatch {reachable: 0, len: self.len()}),
        };

        if self.color(root) == Color::Red {
            return Err(InvariantViolation::RedRoot);
        }
        if !self.nodes[root].parent.is_null() {
            return Err(InvariantViolation::RootHasParent);
        }

        let mut checker = Checker {map: self, reachable: 0, previous: None};
        checker.black_height(root)?;

        if checker.reachable != self.len() {
            return Err(InvariantViolation::LengthMismatch {
                reachable: checker.reachable,
                len: self.len(),
            });
        }

        Ok(())
    }
}

struct Checker<'a, K, V, C> {
    map: &'a RBTreeMap<K, V, C>,
    reachable: usize,
    /// The slot visited just before the current one, in-order
    previous: Option<usize>,
}

impl<'a, K, V, C: Comparator<K>> Checker<'a, K, V, C> {
    /// Visits the subtree rooted at `node` in-order and returns its black-height
    fn black_height(&mut self, node: usize) -> Result<usize, InvariantViolation> {
        let map = self.map;
        let inner = &map.nodes[node];

        let left = self.subtree(node, inner.left)?;

        if let Some(previous) = self.previous {
            if map.comparator.compare(&map.nodes[previous].key, &inner.key) != Ordering::Less {
                return Err(InvariantViolation::OutOfOrder {node});
            }
        }
        self.previous = Some(node);
        self.reachable += 1;

        let right = self.subtree(node, inner.right)?;

        if left != right {
            return Err(InvariantViolation::UnequalBlackHeight {node, left, right});
        }

        Ok(left + match inner.color {
            Color::Black => 1,
            Color::Red => 0,
        })
    }

    fn subtree(&mut self, parent: usize, child: Ptr) -> Result<usize, InvariantViolation> {
        let child = match child.into_index() {
            Some(child) => child,
            None => return Ok(0),
        };

        let map = self.map;
        if map.nodes[child].parent != Ptr::to(parent) {
            return Err(InvariantViolation::BrokenParentLink {parent});
        }
        if map.color(parent) == Color::Red && map.color(child) == Color::Red {
            return Err(InvariantViolation::RedChildOfRed {node: parent});
        }

        self.black_height(child)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::map::rotate::Side;

    fn sample() -> RBTreeMap<i32, i32> {
        (1..=12).map(|i| (i, i)).collect()
    }

    #[test]
    fn valid_trees() {
        assert_eq!(RBTreeMap::<i32, i32>::new().check_invariants(), Ok(()));
        assert_eq!(sample().check_invariants(), Ok(()));
    }

    #[test]
    fn detects_red_root() {
        let mut map = sample();
        let root = map.root.into_index().unwrap();
        map.set_color(root, Color::Red);
        assert_eq!(map.check_invariants(), Err(InvariantViolation::RedRoot));
    }

    #[test]
    fn detects_unequal_black_height() {
        let mut map = sample();
        // Black leaves 1 and 3 hang from node 2
        let one = map.find(&1).unwrap();
        map.set_color(one, Color::Red);
        assert!(matches!(
            map.check_invariants(),
            Err(InvariantViolation::UnequalBlackHeight {..})
        ));
    }

    #[test]
    fn detects_red_red() {
        let mut map = sample();
        // 5 is a black leaf below red 6
        let five = map.find(&5).unwrap();
        map.set_color(five, Color::Red);
        let six = map.find(&6).unwrap();
        assert_eq!(map.check_invariants(), Err(InvariantViolation::RedChildOfRed {node: six}));
    }

    #[test]
    fn detects_out_of_order_keys() {
        let mut map = sample();
        let one = map.find(&1).unwrap();
        map.nodes[one].key = 100;
        assert_eq!(map.check_invariants(), Err(InvariantViolation::OutOfOrder {node: map.find(&2).unwrap()}));
    }

    #[test]
    fn detects_broken_parent_link() {
        let mut map = sample();
        let two = map.find(&2).unwrap();
        let one = map.child(two, Side::Left).unwrap();
        map.nodes[one].parent = Ptr::null();
        assert_eq!(map.check_invariants(), Err(InvariantViolation::BrokenParentLink {parent: two}));
    }

    #[test]
    fn error_messages() {
        assert_eq!(InvariantViolation::RedRoot.to_string(), "root node is red");
        assert_eq!(
            InvariantViolation::LengthMismatch {reachable: 2, len: 3}.to_string(),
            "2 nodes are reachable from the root but the map holds 3",
        );
    }
}
