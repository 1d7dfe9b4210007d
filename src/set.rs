//! The operation set shared by both set variants.
//!
//! [`Set`] lets callers write code once and pick the locking discipline at
//! the use site:
//!
//! ```rust
//! use sharedset::{Set, ThreadSafeSet, ThreadUnsafeSet};
//!
//! fn enroll<S: Set<&'static str>>(classes: &mut S) -> usize {
//!     classes.append(["Cooking", "English", "Math", "Biology"])
//! }
//!
//! let mut local = ThreadUnsafeSet::new();
//! let mut shared = ThreadSafeSet::new();
//! assert_eq!(enroll(&mut local), 4);
//! assert_eq!(enroll(&mut shared), 4);
//! assert!(local.to_vec().iter().all(|class| shared.contains_one(class)));
//! ```

use std::hash::Hash;

use crate::SetIterator;

/// A deduplicated, unordered collection of `T`.
///
/// Implemented by [`ThreadUnsafeSet`](crate::ThreadUnsafeSet) (no internal
/// locking) and [`ThreadSafeSet`](crate::ThreadSafeSet) (reader/writer lock).
/// Both variants behave identically from a single thread.
///
/// Cross-instance operations take `other: &Self`: both operands are always
/// the same variant.
///
/// Set-producing operations never touch their operands and return a new set
/// of the receiver's variant. Only `add`, `append`, `remove`, `remove_all`,
/// `clear`, `pop` and `pop_n` change the receiver.
pub trait Set<T>: Clone + Default + FromIterator<T> + Extend<T>
where
    T: Hash + Eq + Clone,
{
    /// Lazy, restartable sequence returned by [`Set::iter`].
    type Iter<'a>: Iterator<Item = T>
    where
        Self: 'a;

    /// Inserts `element`, returning `true` if it was not already present.
    fn add(&mut self, element: T) -> bool;

    /// Inserts every element, returning how many were newly inserted.
    fn append<I: IntoIterator<Item = T>>(&mut self, elements: I) -> usize;

    /// Removes `element` if present. Absent elements are ignored.
    fn remove(&mut self, element: &T);

    /// Removes every listed element that is present.
    fn remove_all(&mut self, elements: &[T]);

    /// Removes every element.
    fn clear(&mut self);

    /// Removes and returns an arbitrary element, or `None` when empty.
    fn pop(&mut self) -> Option<T>;

    /// Removes and returns up to `count` arbitrary elements.
    ///
    /// `count == 0` returns an empty vector without touching the set; a
    /// `count` above the cardinality empties the set.
    fn pop_n(&mut self, count: usize) -> Vec<T>;

    /// Returns `true` if every listed element is present.
    ///
    /// An empty list is vacuously contained.
    fn contains(&self, elements: &[T]) -> bool;

    /// Returns `true` if `element` is present.
    fn contains_one(&self, element: &T) -> bool;

    /// Returns `true` if at least one listed element is present.
    fn contains_any(&self, elements: &[T]) -> bool;

    /// Returns `true` if the two sets share at least one element.
    fn contains_any_element(&self, other: &Self) -> bool;

    /// Number of distinct elements.
    fn cardinality(&self) -> usize;

    /// Returns `true` if the set has no elements.
    fn is_empty(&self) -> bool {
        self.cardinality() == 0
    }

    /// Returns `true` if both sets hold exactly the same elements.
    fn equal(&self, other: &Self) -> bool;

    /// Returns `true` if every element of `self` is in `other`.
    fn is_subset(&self, other: &Self) -> bool;

    /// Subset with differing cardinalities.
    fn is_proper_subset(&self, other: &Self) -> bool;

    /// Returns `true` if every element of `other` is in `self`.
    fn is_superset(&self, other: &Self) -> bool;

    /// Superset with differing cardinalities.
    fn is_proper_superset(&self, other: &Self) -> bool;

    /// Elements in either set.
    #[must_use]
    fn union(&self, other: &Self) -> Self;

    /// Elements in both sets.
    #[must_use]
    fn intersect(&self, other: &Self) -> Self;

    /// Elements of `self` that are not in `other`.
    #[must_use]
    fn difference(&self, other: &Self) -> Self;

    /// Elements in exactly one of the two sets.
    #[must_use]
    fn symmetric_difference(&self, other: &Self) -> Self;

    /// Calls `visit` for every element until it returns `true`.
    fn each<F>(&self, visit: F)
    where
        F: FnMut(&T) -> bool;

    /// Lazily yields every element once. Each call starts a fresh pass.
    fn iter(&self) -> Self::Iter<'_>;

    /// Starts a cancellable [`SetIterator`] fed by a background thread.
    fn iterator(&self) -> SetIterator<T>
    where
        T: Send + Sync + 'static;

    /// Copies every element into a vector, in no particular order.
    fn to_vec(&self) -> Vec<T>;

    /// Copies every element into a vector sorted ascending.
    fn to_sorted_vec(&self) -> Vec<T>
    where
        T: Ord,
    {
        let mut elements = self.to_vec();
        elements.sort_unstable();
        elements
    }
}
