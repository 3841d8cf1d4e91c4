use std::mem;
use std::ops::{Index, IndexMut};

#[cfg(test)]
use static_assertions::const_assert_eq;

/// An index into a slab, or "null"
///
/// This type is essentially `Option<usize>`. The value usize::MAX is
/// reserved to represent `None` or "null".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Ptr(usize);

// Every node stores three of these, so keep them as small as a plain index
#[cfg(test)]
const_assert_eq!(mem::size_of::<Ptr>(), mem::size_of::<usize>());
#[cfg(test)]
const_assert_eq!(mem::size_of::<Option<usize>>(), 2 * mem::size_of::<usize>());

impl Default for Ptr {
    #[inline(always)]
    fn default() -> Self {
        Self::null()
    }
}

impl From<Option<usize>> for Ptr {
    #[inline(always)]
    fn from(index: Option<usize>) -> Self {
        match index {
            Some(index) => Self::to(index),
            None => Self::null(),
        }
    }
}

impl Ptr {
    /// Returns a pointer to `index`, which must be an index handed out by a slab
    #[inline(always)]
    pub fn to(index: usize) -> Self {
        debug_assert_ne!(index, usize::MAX, "usize::MAX is reserved for the null pointer");
        Ptr(index)
    }

    #[inline(always)]
    pub fn null() -> Self {
        Ptr(usize::MAX)
    }

    // Methods on this type must be `#[inline]` to help the compiler see that the `Option` values
    // are only intermediate values used to make writing code easier. Instead of checking for `None`
    // and then `usize::MAX`, we want the compiler to just check the latter.
    #[inline(always)]
    pub fn into_index(self) -> Option<usize> {
        let Ptr(index) = self;
        if index == usize::MAX {
            None
        } else {
            Some(index)
        }
    }

    #[inline(always)]
    pub fn is_null(self) -> bool {
        self.0 == usize::MAX
    }
}

#[derive(Debug, Clone)]
enum Entry<T> {
    Occupied(T),
    /// A slot on the free list. `next` is the next free slot or `Ptr::null()` at the end of the
    /// list.
    Vacant { next: Ptr },
}

/// An allocation primitive similar to `Vec`, but implemented to reuse space from removed entries.
///
/// Items are kept contiguously in memory, but indexes are not shifted when an individual item is
/// removed. Instead of always pushing items after the previously pushed item, this data structure
/// will reuse space from previously removed entries when possible. An index stays valid until the
/// entry it refers to is removed.
#[derive(Debug, Clone)]
pub struct Slab<T> {
    entries: Vec<Entry<T>>,
    /// The index of the first entry in the free list or Ptr::null() if the free list is empty
    ///
    /// The free list is a linked list threaded through `entries` and used as a stack of slots that
    /// `push` can reuse.
    free_list_head: Ptr,
    /// The length of the free list
    free_len: usize,
}

impl<T> Default for Slab<T> {
    fn default() -> Self {
        Self {
            entries: Vec::default(),
            free_list_head: Ptr::null(),
            free_len: 0,
        }
    }
}

impl<T> Slab<T> {
    /// Creates an empty slab
    ///
    /// The slab is initially created with a capacity of 0, so it will not allocate until it is
    /// first inserted into.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty slab with the specified capacity.
    ///
    /// The slab will be able to hold at least `capacity` elements without reallocating. If
    /// `capacity` is 0, the slab will not allocate.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Returns the number of entries in the slab that contain values
    ///
    /// This is the number of items pushed minus the number of items removed
    pub fn len(&self) -> usize {
        self.entries.len() - self.free_len
    }

    /// Returns true if the slab is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of elements the slab can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Returns a reference to the value at `index`, or `None` if that slot is out of bounds or
    /// has been removed
    pub fn get(&self, index: usize) -> Option<&T> {
        match self.entries.get(index)? {
            Entry::Occupied(value) => Some(value),
            Entry::Vacant {..} => None,
        }
    }

    /// Returns a mutable reference to the value at `index`, or `None` if that slot is out of
    /// bounds or has been removed
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        match self.entries.get_mut(index)? {
            Entry::Occupied(value) => Some(value),
            Entry::Vacant {..} => None,
        }
    }

    /// Returns mutable references to two distinct occupied slots at once
    ///
    /// # Panics
    ///
    /// Panics if `a == b` or if either slot is not occupied.
    pub fn pair_mut(&mut self, a: usize, b: usize) -> (&mut T, &mut T) {
        assert_ne!(a, b, "cannot borrow the same slab entry twice");

        let (low, high) = if a < b { (a, b) } else { (b, a) };
        let (head, tail) = self.entries.split_at_mut(high);
        let (low_value, high_value) = match (&mut head[low], &mut tail[0]) {
            (Entry::Occupied(low_value), Entry::Occupied(high_value)) => (low_value, high_value),
            _ => panic!("invalid slab index"),
        };

        if a < b {
            (low_value, high_value)
        } else {
            (high_value, low_value)
        }
    }

    /// Pushes a value into the slab and returns the index at which it was inserted.
    ///
    /// The item may be inserted at the end of the list, or in the space from an item was previously
    /// removed.
    pub fn push(&mut self, value: T) -> usize {
        // Check if we can reuse some space from the free list
        if let Some(free_list_head) = self.free_list_head.into_index() {
            let entry = &mut self.entries[free_list_head];
            let next_free = match *entry {
                Entry::Vacant {next} => next,
                Entry::Occupied(_) => unreachable!("free list points at an occupied slab entry"),
            };
            *entry = Entry::Occupied(value);

            self.free_list_head = next_free;
            self.free_len -= 1;

            return free_list_head;
        }

        let index = self.entries.len();
        // Since we store `Ptr` internally, we can't have usize::MAX as a valid index into the slab
        if index >= usize::MAX {
            panic!("cannot have more than usize::MAX - 1 entries in slab");
        }

        self.entries.push(Entry::Occupied(value));

        index
    }

    /// Removes an item from the slab, returning its value, or `None` if the slot was not occupied.
    ///
    /// Note that this method has no effect on the allocated capacity of the slab.
    ///
    /// The space for the item will be reused in future calls to `push`. This does not move or
    /// modify any other entries in the slab. Their indexes remain the same and can still be used.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        let entry = self.entries.get_mut(index)?;
        if let Entry::Vacant {..} = entry {
            return None;
        }

        let prev = mem::replace(entry, Entry::Vacant {next: self.free_list_head});
        self.free_list_head = Ptr::to(index);
        self.free_len += 1;

        match prev {
            Entry::Occupied(value) => Some(value),
            Entry::Vacant {..} => unreachable!(),
        }
    }

    /// Clears the slab, removing all values.
    ///
    /// Note that this method has no effect on the allocated capacity of the slab.
    ///
    /// This invalidates all previous indexes returned from `push`.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.free_list_head = Ptr::null();
        self.free_len = 0;
    }

    /// Reserves capacity for at least `additional` more elements to be inserted in the slab.
    pub fn reserve(&mut self, additional: usize) {
        self.entries.reserve(additional)
    }

    /// Shrinks the capacity of the slab as much as possible.
    ///
    /// Vacant slots still occupy space, so this can only release the unused tail of the allocation.
    pub fn shrink_to_fit(&mut self) {
        self.entries.shrink_to_fit()
    }
}

impl<T> Index<usize> for Slab<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Some(value) => value,
            None => panic!("invalid slab index: {}", index),
        }
    }
}

impl<T> IndexMut<usize> for Slab<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.get_mut(index) {
            Some(value) => value,
            None => panic!("invalid slab index: {}", index),
        }
    }
}
