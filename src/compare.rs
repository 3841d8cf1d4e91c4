use std::cmp::Ordering;

/// A total order over values of type `T`
///
/// The tree only ever asks a comparator which of two keys is smaller, so any consistent total
/// order works. Inconsistent comparators (e.g. ones that are not transitive) will not cause memory
/// unsafety, but lookups may then fail to find keys that were inserted.
///
/// Any `Fn(&T, &T) -> Ordering` is a comparator:
///
/// ```
/// use rbmap::RBTreeMap;
///
/// let mut map = RBTreeMap::with_comparator(|a: &i32, b: &i32| b.cmp(a));
/// map.insert(1, "a");
/// map.insert(2, "b");
/// let keys: Vec<_> = map.keys().copied().collect();
/// assert_eq!(keys, &[2, 1]);
/// ```
pub trait Comparator<T: ?Sized> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// Orders values by their `Ord` implementation
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Comparator<T> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

impl<T: ?Sized, F> Comparator<T> for F
    where F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_order_borrowed() {
        assert_eq!(NaturalOrder.compare("abc", "abd"), Ordering::Less);
        assert_eq!(NaturalOrder.compare(&3, &3), Ordering::Equal);
        assert_eq!(NaturalOrder.compare(&String::from("b"), &String::from("a")), Ordering::Greater);
    }

    #[test]
    fn closure_comparator() {
        let by_len = |a: &&str, b: &&str| a.len().cmp(&b.len());
        assert_eq!(by_len.compare(&"aaa", &"b"), Ordering::Greater);
        assert_eq!(by_len.compare(&"aa", &"bb"), Ordering::Equal);

        fn reverse(a: &i32, b: &i32) -> Ordering {
            b.cmp(a)
        }
        assert_eq!(reverse.compare(&1, &2), Ordering::Greater);
    }
}
