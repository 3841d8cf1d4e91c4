//! Rebalancing after structural insertion and removal
//!
//! Both fix-ups walk upward through parent links in a loop and return as soon as the red-black
//! invariants are restored.

use log::trace;

use super::rotate::Side;
use super::{Color, RBTreeMap};

impl<K, V, C> RBTreeMap<K, V, C> {
    /// Restores the invariants after `node` was attached as a new red leaf
    ///
    /// The only possible violation is `node` and its parent both being red (or `node` being a red
    /// root). Each iteration either resolves it or moves it two levels up.
    pub(super) fn insert_fixup(&mut self, mut node: usize) {
        loop {
            let parent = match self.parent_of(node) {
                Some(parent) => parent,
                None => {
                    self.set_color(node, Color::Black);
                    return;
                },
            };

            if self.color(parent) == Color::Black {
                return;
            }

            // A red node is never the root, so the grandparent exists
            let grandparent = self.parent_of(parent)
                .expect("bug: red node has no parent");
            let parent_side = self.side_of(parent, grandparent);
            let uncle = self.child(grandparent, parent_side.opposite());

            if let Some(uncle) = uncle.filter(|&uncle| self.color(uncle) == Color::Red) {
                trace!("insert fixup: splitting 4-node at slot {}", grandparent);
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grandparent, Color::Red);
                node = grandparent;
                continue;
            }

            if self.side_of(node, parent) == parent_side {
                trace!("insert fixup: single rotation at slot {}", grandparent);
                self.rotate(grandparent, parent_side.opposite());
                self.swap_colors(grandparent, parent);
            } else {
                trace!("insert fixup: double rotation at slot {}", grandparent);
                self.rotate(parent, parent_side);
                self.rotate(grandparent, parent_side.opposite());
                self.set_color(node, Color::Black);
                self.set_color(grandparent, Color::Red);
            }

            return;
        }
    }

    /// Restores the black-height after a black leaf was detached from `parent`'s `side`
    ///
    /// The subtree at `parent.side` (possibly empty) has one black node fewer than its sibling
    /// subtree. Each iteration either absorbs the deficit or moves it one level up.
    pub(super) fn delete_fixup(&mut self, mut parent: usize, mut side: Side) {
        loop {
            let other = side.opposite();
            // The sibling subtree has a black-height of at least one, so it cannot be empty
            let mut sibling = self.child(parent, other)
                .expect("bug: black-height deficit without a sibling");

            if self.color(sibling) == Color::Red {
                trace!("delete fixup: red sibling at slot {}", sibling);
                debug_assert_eq!(self.color(parent), Color::Black);
                self.rotate(parent, side);
                self.set_color(sibling, Color::Black);
                self.set_color(parent, Color::Red);
                // The red sibling's children were black and non-empty, one of them is the new sibling
                sibling = self.child(parent, other)
                    .expect("bug: red sibling without black children");
            }

            let far = self.child(sibling, other);
            let near = self.child(sibling, side);

            if let Some(far) = far.filter(|&far| self.color(far) == Color::Red) {
                trace!("delete fixup: single rotation at slot {}", parent);
                self.rotate(parent, side);
                self.set_color(sibling, self.color(parent));
                self.set_color(parent, Color::Black);
                self.set_color(far, Color::Black);
                return;
            }

            if let Some(near) = near.filter(|&near| self.color(near) == Color::Red) {
                trace!("delete fixup: double rotation at slot {}", parent);
                self.rotate(sibling, other);
                self.rotate(parent, side);
                self.set_color(near, self.color(parent));
                self.set_color(parent, Color::Black);
                return;
            }

            // Sibling and both of its children are black
            self.set_color(sibling, Color::Red);
            if self.color(parent) == Color::Red {
                trace!("delete fixup: deficit absorbed by red parent at slot {}", parent);
                self.set_color(parent, Color::Black);
                return;
            }

            match self.parent_of(parent) {
                Some(grandparent) => {
                    trace!("delete fixup: deficit moves up to slot {}", parent);
                    side = self.side_of(parent, grandparent);
                    parent = grandparent;
                },
                // Every path lost one black node, which leaves the root balanced
                None => return,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::map::node::InnerNode;
    use crate::slab::Ptr;

    use crate::map::Color::{Black, Red};

    /// Adds a detached node to the slab and hangs `left` and `right` below it
    fn node(
        map: &mut RBTreeMap<i32, ()>,
        key: i32,
        color: Color,
        left: Option<usize>,
        right: Option<usize>,
    ) -> usize {
        let index = map.nodes.push(InnerNode::new(key, (), color, Ptr::null()));
        map.nodes[index].left = Ptr::from(left);
        map.nodes[index].right = Ptr::from(right);
        for child in left.into_iter().chain(right) {
            map.nodes[child].parent = Ptr::to(index);
        }
        index
    }

    fn leaf(map: &mut RBTreeMap<i32, ()>, key: i32, color: Color) -> usize {
        node(map, key, color, None, None)
    }

    fn with_root(mut map: RBTreeMap<i32, ()>, root: usize) -> RBTreeMap<i32, ()> {
        map.root = Ptr::to(root);
        assert_eq!(map.check_invariants(), Ok(()));
        map
    }

    /// Keys and colors in pre-order
    fn shape(map: &RBTreeMap<i32, ()>) -> Vec<(i32, Color)> {
        fn walk(map: &RBTreeMap<i32, ()>, node: Option<usize>, out: &mut Vec<(i32, Color)>) {
            if let Some(node) = node {
                out.push((map.nodes[node].key, map.color(node)));
                walk(map, map.child(node, Side::Left), out);
                walk(map, map.child(node, Side::Right), out);
            }
        }

        let mut out = Vec::new();
        walk(map, map.root.into_index(), &mut out);
        out
    }

    fn remove_and_check(map: &mut RBTreeMap<i32, ()>, key: i32) {
        assert_eq!(map.remove(&key), Some(()));
        assert_eq!(map.check_invariants(), Ok(()));
    }

    #[test]
    fn insert_splits_four_node() {
        let mut map = RBTreeMap::new();
        for &key in &[20, 10, 30] {
            map.insert(key, ());
        }
        assert_eq!(shape(&map), &[(20, Black), (10, Red), (30, Red)]);

        // Red uncle 30: recolor and the root turns back to black
        map.insert(5, ());
        assert_eq!(shape(&map), &[(20, Black), (10, Black), (5, Red), (30, Black)]);
    }

    #[test]
    fn insert_straight_line_rotates_once() {
        let mut map = RBTreeMap::new();
        for &key in &[10, 20, 30] {
            map.insert(key, ());
        }
        assert_eq!(shape(&map), &[(20, Black), (10, Red), (30, Red)]);
    }

    #[test]
    fn insert_zig_zag_rotates_twice() {
        let mut map = RBTreeMap::new();
        for &key in &[10, 30, 20] {
            map.insert(key, ());
        }
        assert_eq!(shape(&map), &[(20, Black), (10, Red), (30, Red)]);
    }

    #[test]
    fn delete_red_sibling() {
        //   20B              40B
        //  10B 40R    =>   20B  50B
        //     30B 50B        30R
        let mut map = RBTreeMap::new();
        let ten = leaf(&mut map, 10, Black);
        let thirty = leaf(&mut map, 30, Black);
        let fifty = leaf(&mut map, 50, Black);
        let forty = node(&mut map, 40, Red, Some(thirty), Some(fifty));
        let root = node(&mut map, 20, Black, Some(ten), Some(forty));
        let mut map = with_root(map, root);

        remove_and_check(&mut map, 10);
        assert_eq!(shape(&map), &[(40, Black), (20, Black), (30, Red), (50, Black)]);
    }

    #[test]
    fn delete_red_far_nephew() {
        //   20B              30B
        //  10B 30B    =>   20B 40B
        //        40R
        let mut map = RBTreeMap::new();
        let ten = leaf(&mut map, 10, Black);
        let forty = leaf(&mut map, 40, Red);
        let thirty = node(&mut map, 30, Black, None, Some(forty));
        let root = node(&mut map, 20, Black, Some(ten), Some(thirty));
        let mut map = with_root(map, root);

        remove_and_check(&mut map, 10);
        assert_eq!(shape(&map), &[(30, Black), (20, Black), (40, Black)]);
    }

    #[test]
    fn delete_red_far_nephew_mirrored() {
        //     20B            10B
        //   10B 30B   =>   5B  20B
        //  5R
        let mut map = RBTreeMap::new();
        let five = leaf(&mut map, 5, Red);
        let ten = node(&mut map, 10, Black, Some(five), None);
        let thirty = leaf(&mut map, 30, Black);
        let root = node(&mut map, 20, Black, Some(ten), Some(thirty));
        let mut map = with_root(map, root);

        remove_and_check(&mut map, 30);
        assert_eq!(shape(&map), &[(10, Black), (5, Black), (20, Black)]);
    }

    #[test]
    fn delete_red_near_nephew() {
        //   20B              25B
        //  10B 30B    =>   20B 30B
        //     25R
        let mut map = RBTreeMap::new();
        let ten = leaf(&mut map, 10, Black);
        let twenty_five = leaf(&mut map, 25, Red);
        let thirty = node(&mut map, 30, Black, Some(twenty_five), None);
        let root = node(&mut map, 20, Black, Some(ten), Some(thirty));
        let mut map = with_root(map, root);

        remove_and_check(&mut map, 10);
        assert_eq!(shape(&map), &[(25, Black), (20, Black), (30, Black)]);
    }

    #[test]
    fn delete_red_parent_absorbs_deficit() {
        //      20B                20B
        //    10R  30B    =>     10B  30B
        //   5B 15B                15R
        let mut map = RBTreeMap::new();
        let five = leaf(&mut map, 5, Black);
        let fifteen = leaf(&mut map, 15, Black);
        let ten = node(&mut map, 10, Red, Some(five), Some(fifteen));
        let thirty = leaf(&mut map, 30, Black);
        let root = node(&mut map, 20, Black, Some(ten), Some(thirty));
        let mut map = with_root(map, root);

        remove_and_check(&mut map, 5);
        assert_eq!(shape(&map), &[(20, Black), (10, Black), (15, Red), (30, Black)]);
    }

    #[test]
    fn delete_deficit_moves_up_to_root() {
        //        40B                     40B
        //    20B      60B    =>      20B      60R
        //  10B 30B  50B 70B            30R  50B 70B
        let mut map = RBTreeMap::new();
        let ten = leaf(&mut map, 10, Black);
        let thirty = leaf(&mut map, 30, Black);
        let twenty = node(&mut map, 20, Black, Some(ten), Some(thirty));
        let fifty = leaf(&mut map, 50, Black);
        let seventy = leaf(&mut map, 70, Black);
        let sixty = node(&mut map, 60, Black, Some(fifty), Some(seventy));
        let root = node(&mut map, 40, Black, Some(twenty), Some(sixty));
        let mut map = with_root(map, root);

        remove_and_check(&mut map, 10);
        assert_eq!(shape(&map), &[
            (40, Black),
            (20, Black),
            (30, Red),
            (60, Red),
            (50, Black),
            (70, Black),
        ]);
    }

    #[test]
    fn delete_black_leaf_below_root() {
        let mut map = RBTreeMap::new();
        let ten = leaf(&mut map, 10, Black);
        let thirty = leaf(&mut map, 30, Black);
        let root = node(&mut map, 20, Black, Some(ten), Some(thirty));
        let mut map = with_root(map, root);

        remove_and_check(&mut map, 10);
        assert_eq!(shape(&map), &[(20, Black), (30, Red)]);
    }
}
