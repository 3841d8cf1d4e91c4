//! Link helpers and the rotation primitives shared by both fix-up paths
//!
//! Rotations only restructure links. They never change colors; every recoloring is done
//! explicitly by the caller.

use crate::slab::Ptr;

use super::{Color, RBTreeMap};

/// Which child of its parent a node is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub(super) fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl<K, V, C> RBTreeMap<K, V, C> {
    #[inline]
    pub(super) fn parent_of(&self, node: usize) -> Option<usize> {
        self.nodes[node].parent.into_index()
    }

    #[inline]
    pub(super) fn child(&self, node: usize, side: Side) -> Option<usize> {
        let node = &self.nodes[node];
        let ptr = match side {
            Side::Left => node.left,
            Side::Right => node.right,
        };
        ptr.into_index()
    }

    #[inline]
    fn set_child(&mut self, node: usize, side: Side, child: Option<usize>) {
        let node = &mut self.nodes[node];
        let slot = match side {
            Side::Left => &mut node.left,
            Side::Right => &mut node.right,
        };
        *slot = Ptr::from(child);
    }

    #[inline]
    fn set_parent(&mut self, node: usize, parent: Option<usize>) {
        self.nodes[node].parent = Ptr::from(parent);
    }

    /// Returns which side of `parent` the node `node` hangs from
    pub(super) fn side_of(&self, node: usize, parent: usize) -> Side {
        if self.nodes[parent].left == Ptr::to(node) {
            Side::Left
        } else {
            debug_assert_eq!(self.nodes[parent].right, Ptr::to(node), "node is not a child of its parent");
            Side::Right
        }
    }

    #[inline]
    pub(super) fn color(&self, node: usize) -> Color {
        self.nodes[node].color
    }

    #[inline]
    pub(super) fn set_color(&mut self, node: usize, color: Color) {
        self.nodes[node].color = color;
    }

    pub(super) fn swap_colors(&mut self, a: usize, b: usize) {
        let color_a = self.color(a);
        let color_b = self.color(b);
        self.set_color(a, color_b);
        self.set_color(b, color_a);
    }

    /// Points whatever referenced `old` (its parent's child slot, or the root) at `new`
    ///
    /// Only the downward link is updated. The caller is responsible for `new`'s parent link.
    pub(super) fn replace_child(&mut self, parent: Option<usize>, old: usize, new: Option<usize>) {
        match parent {
            None => self.root = Ptr::from(new),
            Some(parent) => {
                let side = self.side_of(old, parent);
                self.set_child(parent, side, new);
            },
        }
    }

    /// Moves `node` down towards `dir`, promoting its child on the opposite side into its place
    ///
    /// `rotate(x, Side::Left)` is the classic left rotation and `rotate(x, Side::Right)` the right
    /// one. The tree root is updated when `node` was the root.
    ///
    /// ```text
    ///   rotate(x, Left)            rotate(y, Right)
    ///
    ///     x                y               y                x
    ///    / \              / \             / \              / \
    ///   a   y     =>     x   c           x   c     =>     a   y
    ///      / \          / \             / \                  / \
    ///     b   c        a   b           a   b                b   c
    /// ```
    pub(super) fn rotate(&mut self, node: usize, dir: Side) {
        let up = dir.opposite();
        let pivot = self.child(node, up)
            .expect("bug: rotation requires a child to promote");
        let inner = self.child(pivot, dir);
        let parent = self.parent_of(node);

        // The pivot's inner subtree moves across to `node`
        self.set_child(node, up, inner);
        if let Some(inner) = inner {
            self.set_parent(inner, Some(node));
        }

        // The pivot takes `node`'s place under its old parent (or as the root)
        self.replace_child(parent, node, Some(pivot));
        self.set_parent(pivot, parent);

        // `node` hangs below the pivot
        self.set_child(pivot, dir, Some(node));
        self.set_parent(node, Some(pivot));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::map::Color::{Black, Red};

    /// Keys of the tree in pre-order, tagged with whether their parent link points back correctly
    fn shape(map: &RBTreeMap<i32, ()>) -> Vec<(i32, bool)> {
        fn walk(map: &RBTreeMap<i32, ()>, node: Option<usize>, parent: Option<usize>, out: &mut Vec<(i32, bool)>) {
            if let Some(node) = node {
                out.push((map.nodes[node].key, map.parent_of(node) == parent));
                walk(map, map.child(node, Side::Left), Some(node), out);
                walk(map, map.child(node, Side::Right), Some(node), out);
            }
        }

        let mut out = Vec::new();
        walk(map, map.root.into_index(), None, &mut out);
        out
    }

    fn index_of(map: &RBTreeMap<i32, ()>, key: i32) -> usize {
        map.find(&key).unwrap()
    }

    #[test]
    fn rotate_roundtrip() {
        //      4
        //   2     6
        // 1   3 5   7
        let map: RBTreeMap<_, _> = vec![4, 2, 6, 1, 3, 5, 7].into_iter().map(|k| (k, ())).collect();
        let colors: Vec<_> = map.iter().map(|(&k, _)| map.color(index_of(&map, k))).collect();
        let before = shape(&map);
        assert_eq!(before, &[(4, true), (2, true), (1, true), (3, true), (6, true), (5, true), (7, true)]);

        let mut map = map;
        let root = index_of(&map, 4);
        map.rotate(root, Side::Left);
        //        6
        //     4     7
        //   2   5
        // 1   3
        assert_eq!(shape(&map), &[(6, true), (4, true), (2, true), (1, true), (3, true), (5, true), (7, true)]);
        assert_eq!(map.root, Ptr::to(index_of(&map, 6)));

        let new_root = index_of(&map, 6);
        map.rotate(new_root, Side::Right);
        assert_eq!(shape(&map), before);
        assert_eq!(map.root, Ptr::to(root));

        // Rotations never touch colors
        let colors_after: Vec<_> = map.iter().map(|(&k, _)| map.color(index_of(&map, k))).collect();
        assert_eq!(colors, colors_after);
    }

    #[test]
    fn rotate_below_root() {
        let mut map: RBTreeMap<_, _> = vec![4, 2, 6, 1, 3, 5, 7].into_iter().map(|k| (k, ())).collect();
        let two = index_of(&map, 2);
        map.rotate(two, Side::Right);
        //      4
        //   1     6
        //    2   5 7
        //     3
        assert_eq!(shape(&map), &[(4, true), (1, true), (2, true), (3, true), (6, true), (5, true), (7, true)]);
        assert_eq!(map.side_of(index_of(&map, 1), index_of(&map, 4)), Side::Left);
        assert_eq!(map.side_of(index_of(&map, 2), index_of(&map, 1)), Side::Right);
    }

    #[test]
    fn swap_colors_and_leaf_children() {
        let mut map: RBTreeMap<_, _> = vec![2, 1, 3].into_iter().map(|k| (k, ())).collect();
        let one = index_of(&map, 1);
        let two = index_of(&map, 2);
        assert_eq!(map.color(two), Black);
        assert_eq!(map.color(one), Red);

        map.swap_colors(one, two);
        assert_eq!(map.color(two), Red);
        assert_eq!(map.color(one), Black);

        // Leaves have no children on either side
        assert_eq!(map.child(one, Side::Left), None);
        assert_eq!(map.child(one, Side::Right), None);
    }
}
