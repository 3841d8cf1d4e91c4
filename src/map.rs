mod node;
mod inorder;
mod rotate;
mod fixup;
mod validate;

pub use node::{Color, Node};
pub use inorder::{IterInorder, Keys, Values};
pub use validate::InvariantViolation;

use std::fmt;
use std::mem;
use std::cmp::Ordering;
use std::borrow::Borrow;
use std::iter::FromIterator;

use crate::compare::{Comparator, NaturalOrder};
use crate::slab::{Ptr, Slab};

use node::InnerNode;
use rotate::Side;

/// An ordered map backed by a red-black tree
///
/// Red-black properties, maintained after every operation:
/// - For each node, keys in its left subtree are less than its key and keys in its right subtree
///   are greater
/// - The root is black
/// - No red node has a red child
/// - Every path from a node down to an absent child passes through the same number of black nodes
///
/// Together these keep the height below `2 * log2(n + 1)`, so lookups, insertions and removals
/// are all `O(log n)`.
///
/// Nodes live in a slab and refer to each other (including upwards, to their parent) by index.
/// Keys are ordered by the comparator `C`, which defaults to the key type's `Ord` implementation.
#[derive(Clone)]
pub struct RBTreeMap<K, V, C = NaturalOrder> {
    nodes: Slab<InnerNode<K, V>>,
    root: Ptr,
    comparator: C,
}

impl<K, V, C: Default> Default for RBTreeMap<K, V, C> {
    fn default() -> Self {
        Self {
            nodes: Slab::new(),
            root: Ptr::null(),
            comparator: Default::default(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for RBTreeMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter_inorder()).finish()
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for RBTreeMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        // Two trees holding the same entries may still be shaped differently (e.g. if insertion
        // order is different), so compare the sorted sequences instead of the structure
        self.len() == other.len() && self.iter_inorder().eq(other.iter_inorder())
    }
}

impl<K: Eq, V: Eq, C> Eq for RBTreeMap<K, V, C> {}

impl<K: Ord, V> RBTreeMap<K, V> {
    /// Creates an empty `RBTreeMap` ordered by `K`'s `Ord` implementation
    ///
    /// The map is initially created with a capacity of 0, so it will not allocate until it is
    /// first inserted into.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbmap::RBTreeMap;
    /// let mut map: RBTreeMap<&str, i32> = RBTreeMap::new();
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty map with the specified capacity.
    ///
    /// The map will be able to hold at least `capacity` elements without reallocating. If
    /// `capacity` is 0, the map will not allocate.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbmap::RBTreeMap;
    /// let mut map: RBTreeMap<&str, i32> = RBTreeMap::with_capacity(10);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, NaturalOrder)
    }
}

impl<K, V, C> RBTreeMap<K, V, C> {
    /// Creates an empty map that orders its keys with `comparator`
    ///
    /// # Examples
    ///
    /// ```
    /// use rbmap::RBTreeMap;
    ///
    /// // Case-insensitive keys
    /// let mut map = RBTreeMap::with_comparator(|a: &String, b: &String| {
    ///     a.to_lowercase().cmp(&b.to_lowercase())
    /// });
    /// map.insert("Apple".to_string(), 1);
    /// assert_eq!(map.insert("APPLE".to_string(), 2), Some(1));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn with_comparator(comparator: C) -> Self {
        Self::with_capacity_and_comparator(0, comparator)
    }

    /// Creates an empty map with the specified capacity that orders its keys with `comparator`
    pub fn with_capacity_and_comparator(capacity: usize, comparator: C) -> Self {
        Self {
            nodes: Slab::with_capacity(capacity),
            root: Ptr::null(),
            comparator,
        }
    }

    /// Returns the comparator used to order the keys of this map
    ///
    /// # Examples
    ///
    /// ```
    /// use rbmap::{NaturalOrder, RBTreeMap};
    /// let map: RBTreeMap<i32, ()> = RBTreeMap::new();
    /// assert_eq!(*map.comparator(), NaturalOrder);
    /// ```
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Returns the number of entries in the map (i.e. the number of nodes in the tree)
    ///
    /// Time complexity: `O(1)`
    ///
    /// # Examples
    ///
    /// ```
    /// use rbmap::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// assert_eq!(map.len(), 0);
    /// map.insert(1, "a");
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the map is empty
    ///
    /// Time complexity: `O(1)`
    pub fn is_empty(&self) -> bool {
        debug_assert!(self.nodes.is_empty() == self.root.is_null());
        self.nodes.is_empty()
    }

    /// Returns the number of elements the map can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Reserves capacity for at least `additional` more elements to be inserted in the map.
    ///
    /// # Panics
    ///
    /// Panics if the new allocation size overflows `usize`.
    pub fn reserve(&mut self, additional: usize) {
        self.nodes.reserve(additional)
    }

    /// Shrinks the capacity of the map as much as possible.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbmap::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::with_capacity(100);
    /// map.insert(1, "a");
    /// assert!(map.capacity() >= 100);
    /// map.shrink_to_fit();
    /// assert!(map.capacity() >= 1);
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// ```
    pub fn shrink_to_fit(&mut self) {
        self.nodes.shrink_to_fit()
    }

    /// Clears the map, removing all elements
    ///
    /// Note that this method has no effect on the allocated capacity of the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbmap::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.insert(1, "a");
    /// # let capacity = map.capacity();
    /// map.clear();
    /// assert!(map.is_empty());
    /// # assert_eq!(map.capacity(), capacity);
    /// ```
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = Ptr::null();
    }

    /// Returns the entry with the smallest key, if any
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        let node = &self.nodes[self.extreme(self.root.into_index()?, Side::Left)];
        Some((&node.key, &node.value))
    }

    /// Returns the entry with the largest key, if any
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        let node = &self.nodes[self.extreme(self.root.into_index()?, Side::Right)];
        Some((&node.key, &node.value))
    }

    /// Performs an in-order traversal of the tree, yielding entries sorted by key
    pub fn iter_inorder(&self) -> IterInorder<K, V> {
        IterInorder::new(&self.nodes, self.root)
    }

    /// Alias of `iter_inorder`
    pub fn iter(&self) -> IterInorder<K, V> {
        self.iter_inorder()
    }

    /// Returns the keys of the map in ascending order
    pub fn keys(&self) -> Keys<K, V> {
        Keys {inner: self.iter_inorder()}
    }

    /// Returns the values of the map in ascending order of their keys
    pub fn values(&self) -> Values<K, V> {
        Values {inner: self.iter_inorder()}
    }

    /// Returns the root node of the tree, or `None` if the tree is empty
    ///
    /// Note that the root can be **any** node inserted into the tree and changes as the tree
    /// rebalances itself. For a guaranteed ordering, use the iteration methods.
    ///
    /// This is a low-level API meant to be used for implementing custom traversals.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbmap::{RBTreeMap, map::Node};
    ///
    /// fn height<K, V>(node: Option<Node<K, V>>) -> usize {
    ///     match node {
    ///         Some(node) => 1 + height(node.left()).max(height(node.right())),
    ///         None => 0,
    ///     }
    /// }
    ///
    /// let map: RBTreeMap<_, _> = (0..1000).map(|i| (i, ())).collect();
    /// assert!(height(map.root()) <= 20);
    /// assert!(map.root().unwrap().is_black());
    /// ```
    pub fn root(&self) -> Option<Node<K, V>> {
        Node::new(&self.nodes, self.root)
    }

    /// Returns the slot of the leftmost or rightmost node of the subtree rooted at `node`
    fn extreme(&self, mut node: usize, side: Side) -> usize {
        while let Some(next) = self.child(node, side) {
            node = next;
        }
        node
    }
}

impl<K, V, C: Comparator<K>> RBTreeMap<K, V, C> {
    /// Returns the slot of the node whose key equals `key`
    fn find<Q>(&self, key: &Q) -> Option<usize>
        where K: Borrow<Q>,
              C: Comparator<Q>,
              Q: ?Sized,
    {
        let mut current = self.root;
        while let Some(index) = current.into_index() {
            let node = &self.nodes[index];
            match self.comparator.compare(key, node.key.borrow()) {
                Ordering::Less => current = node.left,
                Ordering::Greater => current = node.right,
                Ordering::Equal => return Some(index),
            }
        }

        None
    }

    /// Returns `true` if the map contains a value for the specified key.
    ///
    /// The key may be any borrowed form of the map's key type, but the ordering on the borrowed
    /// form must match the ordering on the key type.
    ///
    /// Time complexity: `O(log n)`
    ///
    /// # Examples
    ///
    /// ```
    /// use rbmap::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.insert(1, "a");
    /// assert!(map.contains_key(&1));
    /// assert!(!map.contains_key(&2));
    /// ```
    pub fn contains_key<Q>(&self, key: &Q) -> bool
        where K: Borrow<Q>,
              C: Comparator<Q>,
              Q: ?Sized,
    {
        self.find(key).is_some()
    }

    /// Returns a reference to the value corresponding to the given key, or `None` if no such key
    /// exists in the map
    ///
    /// Time complexity: `O(log n)`
    ///
    /// # Examples
    ///
    /// ```
    /// use rbmap::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
        where K: Borrow<Q>,
              C: Comparator<Q>,
              Q: ?Sized,
    {
        self.find(key).map(|index| &self.nodes[index].value)
    }

    /// Returns a mutable reference to the value corresponding to the given key, or `None` if no
    /// such key exists in the map
    ///
    /// Time complexity: `O(log n)`
    ///
    /// # Examples
    ///
    /// ```
    /// use rbmap::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.insert(1, "a");
    /// if let Some(x) = map.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(map.get(&1), Some(&"b"));
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
        where K: Borrow<Q>,
              C: Comparator<Q>,
              Q: ?Sized,
    {
        let index = self.find(key)?;
        Some(&mut self.nodes[index].value)
    }

    /// Returns the stored key-value pair corresponding to the given key, or `None` if no such key
    /// exists in the map
    ///
    /// # Examples
    ///
    /// ```
    /// use rbmap::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get_key_value(&1), Some((&1, &"a")));
    /// assert_eq!(map.get_key_value(&2), None);
    /// ```
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
        where K: Borrow<Q>,
              C: Comparator<Q>,
              Q: ?Sized,
    {
        let node = &self.nodes[self.find(key)?];
        Some((&node.key, &node.value))
    }

    /// Inserts a key-value pair into the map
    ///
    /// Returns `None` if the key was not present and a new node was added. If the key was already
    /// present, both the stored key and value are overwritten in place and the previous value is
    /// returned. The tree is not restructured in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbmap::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert!(!map.is_empty());
    ///
    /// map.insert(37, "b");
    /// assert_eq!(map.insert(37, "c"), Some("b"));
    /// assert_eq!(map.get(&37), Some(&"c"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let mut current = match self.root.into_index() {
            Some(root) => root,
            None => {
                let root = self.nodes.push(InnerNode::new(key, value, Color::Black, Ptr::null()));
                self.root = Ptr::to(root);
                return None;
            },
        };

        loop {
            let node = &mut self.nodes[current];
            let side = match self.comparator.compare(&key, &node.key) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => {
                    node.key = key;
                    return Some(mem::replace(&mut node.value, value));
                },
            };

            match self.child(current, side) {
                Some(next) => current = next,
                None => {
                    self.attach(current, side, key, value);
                    return None;
                },
            }
        }
    }

    /// Hangs a new red leaf from the empty `side` of `parent` and rebalances
    fn attach(&mut self, parent: usize, side: Side, key: K, value: V) {
        let index = self.nodes.push(InnerNode::new(key, value, Color::Red, Ptr::to(parent)));

        let parent = &mut self.nodes[parent];
        let slot = match side {
            Side::Left => &mut parent.left,
            Side::Right => &mut parent.right,
        };
        debug_assert!(slot.is_null());
        *slot = Ptr::to(index);

        self.insert_fixup(index);
    }

    /// Removes a key from the map, returning the value at the key if the key was previously in the
    /// map
    ///
    /// Removing a key that is not present leaves the map untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbmap::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
        where K: Borrow<Q>,
              C: Comparator<Q>,
              Q: ?Sized,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes a key from the map, returning the stored key and value if the key was previously in
    /// the map
    ///
    /// # Examples
    ///
    /// ```
    /// use rbmap::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove_entry(&1), Some((1, "a")));
    /// assert_eq!(map.remove_entry(&1), None);
    /// ```
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
        where K: Borrow<Q>,
              C: Comparator<Q>,
              Q: ?Sized,
    {
        let target = self.find(key)?;

        let doomed = match (self.child(target, Side::Left), self.child(target, Side::Right)) {
            (Some(_), Some(right)) => {
                // The successor has no left child. Moving its entry into `target` leaves a node
                // with at most one child to unlink.
                let successor = self.extreme(right, Side::Left);
                let (target_node, successor_node) = self.nodes.pair_mut(target, successor);
                mem::swap(&mut target_node.key, &mut successor_node.key);
                mem::swap(&mut target_node.value, &mut successor_node.value);
                successor
            },
            _ => target,
        };

        self.unlink(doomed);

        let InnerNode {key, value, ..} = self.nodes.remove(doomed)
            .expect("bug: unlinked node missing from slab");
        Some((key, value))
    }

    /// Detaches a node with at most one child from the tree and rebalances
    fn unlink(&mut self, node: usize) {
        let parent = self.parent_of(node);
        let child = self.child(node, Side::Left).or_else(|| self.child(node, Side::Right));

        match child {
            Some(child) => {
                // A lone child must be red below a black node, otherwise the black-heights of the
                // two sides would differ
                debug_assert_eq!(self.color(node), Color::Black);
                debug_assert_eq!(self.color(child), Color::Red);
                self.replace_child(parent, node, Some(child));
                self.nodes[child].parent = Ptr::from(parent);
                self.set_color(child, Color::Black);
            },

            None => match parent {
                None => self.root = Ptr::null(),
                Some(parent) => {
                    let side = self.side_of(node, parent);
                    self.replace_child(Some(parent), node, None);
                    if self.color(node) == Color::Black {
                        self.delete_fixup(parent, side);
                    }
                },
            },
        }

        let node = &mut self.nodes[node];
        node.parent = Ptr::null();
        node.left = Ptr::null();
        node.right = Ptr::null();
    }
}

impl<'a, K, V, C> IntoIterator for &'a RBTreeMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = IterInorder<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_inorder()
    }
}

impl<K, V, C: Comparator<K>> Extend<(K, V)> for RBTreeMap<K, V, C> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for RBTreeMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}
