mod node;
mod inorder;

pub use node::*;
pub use inorder::*;

use std::fmt;
use std::borrow::Borrow;
use std::iter::FromIterator;

use crate::compare::{Comparator, NaturalOrder};
use crate::map::{InvariantViolation, RBTreeMap};

/// An ordered set backed by a red-black tree
///
/// A thin wrapper over `RBTreeMap<T, (), C>`, so it has the same balancing guarantees: lookups,
/// insertions and removals are all `O(log n)`.
///
/// Values are ordered by the comparator `C`, which defaults to the value type's `Ord`
/// implementation.
#[derive(Clone)]
pub struct RBTreeSet<T, C = NaturalOrder> {
    items: RBTreeMap<T, (), C>,
}

impl<T, C: Default> Default for RBTreeSet<T, C> {
    fn default() -> Self {
        Self {
            items: Default::default(),
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for RBTreeSet<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter_inorder()).finish()
    }
}

impl<T: PartialEq, C> PartialEq for RBTreeSet<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.items.eq(&other.items)
    }
}

impl<T: Eq, C> Eq for RBTreeSet<T, C> {}

impl<T: Ord> RBTreeSet<T> {
    /// Creates an empty `RBTreeSet` ordered by `T`'s `Ord` implementation
    ///
    /// The set is initially created with a capacity of 0, so it will not allocate until it is first
    /// inserted into.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbmap::RBTreeSet;
    /// let mut set: RBTreeSet<&str> = RBTreeSet::new();
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty set with the specified capacity.
    ///
    /// The set will be able to hold at least `capacity` elements without reallocating. If
    /// `capacity` is 0, the set will not allocate.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbmap::RBTreeSet;
    /// let mut set: RBTreeSet<&str> = RBTreeSet::with_capacity(10);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: RBTreeMap::with_capacity(capacity),
        }
    }
}

impl<T, C> RBTreeSet<T, C> {
    /// Creates an empty set that orders its values with `comparator`
    ///
    /// # Examples
    ///
    /// ```
    /// use rbmap::RBTreeSet;
    ///
    /// let mut set = RBTreeSet::with_comparator(|a: &&str, b: &&str| a.len().cmp(&b.len()));
    /// set.insert("ccc");
    /// set.insert("a");
    /// assert!(!set.insert("bbb"));
    ///
    /// let items: Vec<_> = set.iter().copied().collect();
    /// assert_eq!(items, &["a", "bbb"]);
    /// ```
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            items: RBTreeMap::with_comparator(comparator),
        }
    }

    /// Returns the comparator used to order the values of this set
    ///
    /// # Examples
    ///
    /// ```
    /// use rbmap::{NaturalOrder, RBTreeSet};
    /// let set: RBTreeSet<i32> = RBTreeSet::new();
    /// assert_eq!(*set.comparator(), NaturalOrder);
    /// ```
    pub fn comparator(&self) -> &C {
        self.items.comparator()
    }

    /// Returns the number of items in the set (i.e. the number of nodes in the tree)
    ///
    /// Time complexity: `O(1)`
    ///
    /// # Examples
    ///
    /// ```
    /// use rbmap::RBTreeSet;
    ///
    /// let mut set = RBTreeSet::new();
    /// assert_eq!(set.len(), 0);
    /// set.insert(1);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns the number of elements the set can hold without reallocating.
    ///
    /// This number is a lower bound; the set might be able to hold more, but is guaranteed to be
    /// able to hold at least this many.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbmap::RBTreeSet;
    /// let mut set: RBTreeSet<&str> = RBTreeSet::with_capacity(100);
    /// assert!(set.capacity() >= 100);
    /// ```
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Returns true if the set is empty
    ///
    /// Time complexity: `O(1)`
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Clears the set, removing all elements
    ///
    /// Note that this method has no effect on the allocated capacity of the set.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns the smallest value in the set, if any
    pub fn first(&self) -> Option<&T> {
        self.items.first_key_value().map(|(value, ())| value)
    }

    /// Returns the largest value in the set, if any
    pub fn last(&self) -> Option<&T> {
        self.items.last_key_value().map(|(value, ())| value)
    }

    /// Performs an in-order traversal of the tree, yielding values in ascending order
    pub fn iter_inorder(&self) -> IterInorder<T> {
        IterInorder::new(self.items.keys())
    }

    /// Alias of `iter_inorder`
    pub fn iter(&self) -> IterInorder<T> {
        self.iter_inorder()
    }

    /// Returns the root node of the tree, or `None` if the tree is empty
    ///
    /// Note that the root can be **any** value inserted into the set and changes as the tree
    /// rebalances itself. For a guaranteed ordering, use the iteration methods.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbmap::{RBTreeSet, set::Node};
    ///
    /// #[derive(Debug, PartialOrd, Ord, PartialEq, Eq)]
    /// struct Person {
    ///     pub name: String,
    ///     // ...other fields...
    /// }
    ///
    /// // Custom traversal through the values in the set
    /// fn find_name<'a>(node: Option<Node<'a, Person>>, target_name: &str) -> Option<Node<'a, Person>> {
    ///     let node = node?;
    ///     if node.value().name == target_name {
    ///         Some(node)
    ///     } else {
    ///         find_name(node.left(), target_name)
    ///             .or_else(|| find_name(node.right(), target_name))
    ///     }
    /// }
    ///
    /// let mut set = RBTreeSet::new();
    /// set.insert(Person {name: String::from("Manish")});
    /// set.insert(Person {name: String::from("Jane")});
    ///
    /// assert!(find_name(set.root(), "Jane").is_some());
    /// assert!(find_name(set.root(), "Bob").is_none());
    /// ```
    pub fn root(&self) -> Option<Node<T>> {
        self.items.root().map(Node::new)
    }

    /// Reserves capacity for at least `additional` more elements to be inserted in the set.
    ///
    /// # Panics
    ///
    /// Panics if the new allocation size overflows `usize`.
    pub fn reserve(&mut self, additional: usize) {
        self.items.reserve(additional)
    }

    /// Shrinks the capacity of the set as much as possible.
    pub fn shrink_to_fit(&mut self) {
        self.items.shrink_to_fit()
    }
}

impl<T, C: Comparator<T>> RBTreeSet<T, C> {
    /// Returns `true` if the set contains the specified value.
    ///
    /// The value may be any borrowed form of the set's value type, but the ordering on the borrowed
    /// form must match the ordering on the value type.
    ///
    /// Time complexity: `O(log n)`
    ///
    /// # Examples
    ///
    /// ```
    /// use rbmap::RBTreeSet;
    ///
    /// let mut set = RBTreeSet::new();
    /// # assert!(!set.contains(&1));
    /// set.insert(1);
    /// assert!(set.contains(&1));
    /// assert!(!set.contains(&2));
    /// ```
    pub fn contains<Q>(&self, value: &Q) -> bool
        where T: Borrow<Q>,
              C: Comparator<Q>,
              Q: ?Sized,
    {
        self.items.contains_key(value)
    }

    /// Returns a reference to the value in the set equal to the given one, if any
    ///
    /// # Examples
    ///
    /// ```
    /// use rbmap::RBTreeSet;
    ///
    /// let mut set = RBTreeSet::new();
    /// set.insert(String::from("abc"));
    /// assert_eq!(set.get("abc"), Some(&String::from("abc")));
    /// assert_eq!(set.get("def"), None);
    /// ```
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
        where T: Borrow<Q>,
              C: Comparator<Q>,
              Q: ?Sized,
    {
        self.items.get_key_value(value).map(|(value, ())| value)
    }

    /// Inserts a new value into the set
    ///
    /// If the set did not have this value present, `true` is returned.
    ///
    /// If the set did have an equal value present, `false` is returned and the stored value is
    /// replaced by `value`. The tree is not restructured in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbmap::RBTreeSet;
    ///
    /// let mut set = RBTreeSet::new();
    /// # assert!(set.is_empty());
    /// assert!(set.insert(37));
    /// assert!(!set.is_empty());
    ///
    /// assert!(!set.insert(37));
    /// assert!(set.contains(&37));
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        self.items.insert(value, ()).is_none()
    }

    /// Removes a value from the set. Returns whether the value was present in the set.
    ///
    /// Removing a value that is not present leaves the set untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbmap::RBTreeSet;
    ///
    /// let mut set = RBTreeSet::new();
    /// set.insert(String::from("abc"));
    /// assert!(set.remove("abc"));
    /// assert!(!set.remove("abc"));
    /// ```
    pub fn remove<Q>(&mut self, value: &Q) -> bool
        where T: Borrow<Q>,
              C: Comparator<Q>,
              Q: ?Sized,
    {
        self.take(value).is_some()
    }

    /// Removes and returns the value in the set, if any, that is equal to the given one.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbmap::RBTreeSet;
    ///
    /// let mut set = RBTreeSet::new();
    /// set.insert(String::from("abc"));
    /// assert_eq!(set.take("abc"), Some(String::from("abc")));
    /// assert_eq!(set.take("def"), None);
    /// ```
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
        where T: Borrow<Q>,
              C: Comparator<Q>,
              Q: ?Sized,
    {
        self.items.remove_entry(value).map(|(value, ())| value)
    }

    /// Checks every red-black tree invariant and returns the first one that does not hold
    ///
    /// See `RBTreeMap::check_invariants`.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        self.items.check_invariants()
    }
}

impl<'a, T, C> IntoIterator for &'a RBTreeSet<T, C> {
    type Item = &'a T;
    type IntoIter = IterInorder<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_inorder()
    }
}

impl<T, C: Comparator<T>> Extend<T> for RBTreeSet<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter.into_iter().map(|value| (value, ())))
    }
}

impl<T: Ord> FromIterator<T> for RBTreeSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(|value| (value, ())).collect(),
        }
    }
}
