//! Ordered maps and sets backed by a red-black tree whose nodes live in a slab
//!
//! ```
//! use rbmap::{rbmap, RBTreeMap};
//!
//! let mut map: RBTreeMap<_, _> = rbmap! {
//!     "b" => 2,
//!     "a" => 1,
//! };
//! map.insert("c", 3);
//! assert_eq!(map.remove(&"a"), Some(1));
//!
//! let keys: Vec<_> = map.keys().copied().collect();
//! assert_eq!(keys, &["b", "c"]);
//! assert_eq!(map.check_invariants(), Ok(()));
//! ```

pub mod map;
pub mod set;
pub mod compare;

mod slab;

pub use map::RBTreeMap;
pub use set::RBTreeSet;
pub use compare::{Comparator, NaturalOrder};

#[macro_export(local_inner_macros)]
macro_rules! rbmap {
    (@single $($x:tt)*) => (());
    (@count $($rest:expr),*) => (<[()]>::len(&[$(rbmap!(@single $rest)),*]));

    // trailing comma case
    ($($key:expr => $value:expr,)+) => (rbmap!($($key => $value),+));

    ( $($key:expr => $value:expr),* ) => {
        {
            let _cap = rbmap!(@count $($key),*);
            let mut _map = $crate::RBTreeMap::with_capacity(_cap);
            $(
                let _ = _map.insert($key, $value);
            )*
            _map
        }
    };
}

#[macro_export(local_inner_macros)]
macro_rules! rbset {
    (@single $($x:tt)*) => (());
    (@count $($rest:expr),*) => (<[()]>::len(&[$(rbset!(@single $rest)),*]));

    ($($key:expr,)+) => { rbset!($($key),+) };
    ($($key:expr),*) => {
        {
            let _cap = rbset!(@count $($key),*);
            let mut _set = $crate::RBTreeSet::with_capacity(_cap);
            $(
                let _ = _set.insert($key);
            )*
            _set
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rbmap_macro() {
        let map = rbmap! {
            1 => 2,
            3 => 4,
            2 => 3, // trailing comma
        };

        let pairs: Vec<(_, _)> = map.iter_inorder()
            .map(|(&key, &value)| (key, value))
            .collect();
        assert_eq!(&pairs, &[(1, 2), (2, 3), (3, 4)]);
        assert!(map.capacity() >= 3);

        // No trailing comma
        let map = rbmap![3 => 4];

        let pairs: Vec<(_, _)> = map.iter_inorder()
            .map(|(&key, &value)| (key, value))
            .collect();
        assert_eq!(&pairs, &[(3, 4)]);

        // Zero items
        let map = rbmap!();

        let pairs: Vec<(i32, i32)> = map.iter_inorder()
            .map(|(&key, &value)| (key, value))
            .collect();
        assert_eq!(&pairs, &[]);

        // Later duplicates win
        let map = rbmap! {1 => "a", 1 => "b"};
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&1), Some(&"b"));
    }

    #[test]
    fn rbset_macro() {
        let set = rbset! {
            1,
            3,
            2, // trailing comma
        };

        let items: Vec<_> = set.iter_inorder().copied().collect();
        assert_eq!(&items, &[1, 2, 3]);

        // No trailing comma
        let set = rbset![99];

        let items: Vec<_> = set.iter_inorder().copied().collect();
        assert_eq!(&items, &[99]);

        // Zero items
        let set = rbset!();

        let items: Vec<i32> = set.iter_inorder().copied().collect();
        assert_eq!(&items, &[]);
    }
}
