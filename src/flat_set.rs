//! A set backed by a sorted `Vec`.
//!
//! [`FlatSet`] keeps its elements strictly increasing in one contiguous
//! allocation. Lookups are a binary search. Insertion shifts the tail of the
//! vector, which is `O(n)`, but traversal is a linear scan over contiguous
//! memory. That trade-off is what the benchmark measures against `BTreeSet`
//! and `HashSet`.

use std::borrow::Borrow;
use std::fmt::{self, Debug};
use std::slice;
use std::vec;

use crate::debug_check_invariants;
use crate::telemetry::{InvariantChecker, InvariantViolation};

/// A set stored as a strictly increasing `Vec<T>`.
///
/// The API mirrors `BTreeSet` where it makes sense, plus the `Vec` capacity
/// controls (`with_capacity`, `reserve`, `capacity`).
///
/// ```
/// use setbench::FlatSet;
///
/// let mut set = FlatSet::with_capacity(4);
/// assert!(set.insert(3));
/// assert!(set.insert(1));
/// assert!(!set.insert(3));
/// assert_eq!(set.as_slice(), &[1, 3]);
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct FlatSet<T> {
    vec: Vec<T>,
}

impl<T: Debug> Debug for FlatSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.vec.iter()).finish()
    }
}

impl<T: Ord> Default for FlatSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FlatSet<T> {
    /// Creates an empty set without allocating.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { vec: Vec::new() }
    }

    /// Creates an empty set with room for `capacity` elements.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vec: Vec::with_capacity(capacity),
        }
    }

    /// Builds a set from arbitrary values: sorts, then drops duplicates.
    #[must_use]
    pub fn from_vec(mut vec: Vec<T>) -> Self {
        vec.sort_unstable();
        vec.dedup();

        let set = Self { vec };
        debug_check_invariants!(set, "FlatSet::from_vec");
        set
    }

    /// Number of elements the set can hold without reallocating.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.vec.capacity()
    }

    /// Reserves room for at least `additional` more elements.
    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        self.vec.reserve(additional);
    }

    /// Number of elements in the set.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.vec.len()
    }

    /// Returns `true` if the set holds no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }

    /// Removes every element, keeping the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.vec.clear();
    }

    /// Inserts `value`, keeping the order. Returns `false` if an equal value
    /// was already present, in which case the set is unchanged.
    #[inline]
    pub fn insert(&mut self, value: T) -> bool {
        match self.vec.binary_search(&value) {
            Ok(_) => false,
            Err(idx) => {
                self.vec.insert(idx, value);
                true
            },
        }
    }

    /// Returns `true` if an element equal to `value` is present.
    #[inline]
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        Q: Ord + ?Sized,
        T: Borrow<Q>,
    {
        self.vec
            .binary_search_by(|item| item.borrow().cmp(value))
            .is_ok()
    }

    /// Removes `value` if present, returning whether it was.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        Q: Ord + ?Sized,
        T: Borrow<Q>,
    {
        match self.vec.binary_search_by(|item| item.borrow().cmp(value)) {
            Ok(idx) => {
                self.vec.remove(idx);
                true
            },
            Err(_) => false,
        }
    }

    /// The smallest element.
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.vec.first()
    }

    /// The largest element.
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.vec.last()
    }

    /// Iterates in ascending order.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.vec.iter()
    }

    /// The elements as a sorted slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        self.vec.as_slice()
    }

    /// Consumes the set, returning its sorted, duplicate-free vector.
    #[inline]
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.vec
    }
}

impl<T: Ord> InvariantChecker for FlatSet<T> {
    fn check_invariants(&self) -> Result<(), InvariantViolation> {
        match self.vec.windows(2).position(|pair| pair[0] >= pair[1]) {
            None => Ok(()),
            Some(idx) => Err(InvariantViolation::new(
                "FlatSet",
                "elements are not strictly increasing",
            )
            .with_details(format!("at index {} of {}", idx, self.vec.len()))),
        }
    }
}

impl<T: Ord> FromIterator<T> for FlatSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T: Ord> Extend<T> for FlatSet<T> {
    /// Appends everything, then restores order with one sort instead of
    /// shifting the tail per element.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let before = self.vec.len();
        self.vec.extend(iter);
        if self.vec.len() != before {
            self.vec.sort();
            self.vec.dedup();
        }
        debug_check_invariants!(self, "FlatSet::extend");
    }
}

impl<T> IntoIterator for FlatSet<T> {
    type Item = T;
    type IntoIter = vec::IntoIter<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.vec.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a FlatSet<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.vec.iter()
    }
}
