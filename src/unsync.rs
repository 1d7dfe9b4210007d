//! Unsynchronized hash set.
//!
//! [`ThreadUnsafeSet`] is a thin wrapper around the backing store with no
//! internal locking. Mutation needs `&mut self`, so the borrow checker is the
//! only serialization it relies on: share it across threads behind your own
//! lock, or use [`ThreadSafeSet`](crate::ThreadSafeSet) instead.
//!
//! # Examples
//!
//! ```rust
//! use sharedset::{Set, ThreadUnsafeSet};
//!
//! let mut required = ThreadUnsafeSet::from_slice(&["Cooking", "English", "Math", "Biology"]);
//! let science = ThreadUnsafeSet::from_slice(&["Biology", "Chemistry"]);
//!
//! assert!(!science.contains_one(&"Cooking"));
//! assert_eq!(science.intersect(&required).to_vec(), vec!["Biology"]);
//!
//! required.remove(&"Cooking");
//! assert_eq!(required.cardinality(), 3);
//! ```

use std::collections::hash_map;
use std::fmt;
use std::hash::Hash;

use crate::algebra::{self, SetView};
use crate::store::{self, Store};
use crate::{Set, SetIterator};

/// A hash set without internal synchronization.
///
/// # Time Complexity
///
/// | Operation              | Complexity        |
/// |------------------------|-------------------|
/// | `add` / `remove`       | O(1) expected     |
/// | `contains_one`         | O(1) expected     |
/// | `cardinality`          | O(1)              |
/// | `union`                | O(n + m)          |
/// | `intersect`            | O(min(n, m))      |
/// | `difference`           | O(n)              |
/// | `symmetric_difference` | O(n + m)          |
/// | `pop_n(k)`             | O(capacity + k)   |
pub struct ThreadUnsafeSet<T> {
    store: Store<T>,
}

impl<T> ThreadUnsafeSet<T> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty set with room for at least `capacity` elements.
    ///
    /// ```rust
    /// use sharedset::{Set, ThreadUnsafeSet};
    ///
    /// let set: ThreadUnsafeSet<u64> = ThreadUnsafeSet::with_capacity(128);
    /// assert!(set.is_empty());
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            store: store::with_capacity(capacity),
        }
    }
}

impl<T: Hash + Eq + Clone> ThreadUnsafeSet<T> {
    /// Creates a set holding the distinct values of `elements`.
    #[must_use]
    pub fn from_slice(elements: &[T]) -> Self {
        let mut set = Self::with_capacity(elements.len());
        set.extend(elements.iter().cloned());
        set
    }

    /// Creates a set from the key space of a map, ignoring its values.
    ///
    /// Accepts anything that iterates borrowed key/value pairs, such as
    /// `&HashMap` or `&BTreeMap`.
    ///
    /// ```rust
    /// use sharedset::{Set, ThreadUnsafeSet};
    /// use std::collections::HashMap;
    ///
    /// let ages = HashMap::from([("ada", 36), ("alan", 41)]);
    /// let names = ThreadUnsafeSet::from_map_keys(&ages);
    /// assert!(names.contains(&["ada", "alan"]));
    /// ```
    #[must_use]
    pub fn from_map_keys<'a, V, I>(entries: I) -> Self
    where
        T: 'a,
        V: 'a,
        I: IntoIterator<Item = (&'a T, &'a V)>,
    {
        entries.into_iter().map(|(key, _)| key.clone()).collect()
    }
}

impl<T: Hash + Eq + Clone> Set<T> for ThreadUnsafeSet<T> {
    type Iter<'a>
        = std::iter::Cloned<hash_map::Keys<'a, T, ()>>
    where
        Self: 'a;

    fn add(&mut self, element: T) -> bool {
        self.store.insert(element, ()).is_none()
    }

    fn append<I: IntoIterator<Item = T>>(&mut self, elements: I) -> usize {
        let mut inserted = 0;
        for element in elements {
            if self.add(element) {
                inserted += 1;
            }
        }
        inserted
    }

    fn remove(&mut self, element: &T) {
        self.store.remove(element);
    }

    fn remove_all(&mut self, elements: &[T]) {
        for element in elements {
            self.store.remove(element);
        }
    }

    fn clear(&mut self) {
        self.store.clear();
    }

    fn pop(&mut self) -> Option<T> {
        store::take(&mut self.store, 1).pop()
    }

    fn pop_n(&mut self, count: usize) -> Vec<T> {
        store::take(&mut self.store, count)
    }

    fn contains(&self, elements: &[T]) -> bool {
        elements
            .iter()
            .all(|element| self.store.contains_key(element))
    }

    fn contains_one(&self, element: &T) -> bool {
        self.store.contains_key(element)
    }

    fn contains_any(&self, elements: &[T]) -> bool {
        elements
            .iter()
            .any(|element| self.store.contains_key(element))
    }

    fn contains_any_element(&self, other: &Self) -> bool {
        algebra::shares_any(self, other)
    }

    fn cardinality(&self) -> usize {
        self.store.len()
    }

    fn equal(&self, other: &Self) -> bool {
        algebra::equal(self, other)
    }

    fn is_subset(&self, other: &Self) -> bool {
        algebra::is_subset(self, other)
    }

    fn is_proper_subset(&self, other: &Self) -> bool {
        self.cardinality() < other.cardinality() && self.is_subset(other)
    }

    fn is_superset(&self, other: &Self) -> bool {
        algebra::is_superset(self, other)
    }

    fn is_proper_superset(&self, other: &Self) -> bool {
        self.cardinality() > other.cardinality() && self.is_superset(other)
    }

    fn union(&self, other: &Self) -> Self {
        algebra::union(self, other)
    }

    fn intersect(&self, other: &Self) -> Self {
        algebra::intersect(self, other)
    }

    fn difference(&self, other: &Self) -> Self {
        algebra::difference(self, other)
    }

    fn symmetric_difference(&self, other: &Self) -> Self {
        algebra::symmetric_difference(self, other)
    }

    fn each<F>(&self, mut visit: F)
    where
        F: FnMut(&T) -> bool,
    {
        for element in self.store.keys() {
            if visit(element) {
                break;
            }
        }
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.store.keys().cloned()
    }

    /// Streams a snapshot taken now; later mutations are not observed.
    fn iterator(&self) -> SetIterator<T>
    where
        T: Send + Sync + 'static,
    {
        let snapshot = self.to_vec();
        SetIterator::spawn(move |feed| feed.deliver(snapshot))
    }

    fn to_vec(&self) -> Vec<T> {
        self.store.keys().cloned().collect()
    }
}

impl<T: Hash + Eq> SetView<T> for ThreadUnsafeSet<T> {
    fn size(&self) -> usize {
        self.store.len()
    }

    fn holds(&self, element: &T) -> bool {
        self.store.contains_key(element)
    }

    fn elements<'a>(&'a self) -> impl Iterator<Item = &'a T>
    where
        T: 'a,
    {
        self.store.keys()
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T: Clone> Clone for ThreadUnsafeSet<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<T> Default for ThreadUnsafeSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Hash + Eq> FromIterator<T> for ThreadUnsafeSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T: Hash + Eq> Extend<T> for ThreadUnsafeSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.store.extend(iter.into_iter().map(|element| (element, ())));
    }
}

impl<T: Hash + Eq, const N: usize> From<[T; N]> for ThreadUnsafeSet<T> {
    fn from(elements: [T; N]) -> Self {
        let mut set = Self::with_capacity(N);
        set.extend(elements);
        set
    }
}

impl<T> IntoIterator for ThreadUnsafeSet<T> {
    type Item = T;
    type IntoIter = hash_map::IntoKeys<T, ()>;

    fn into_iter(self) -> Self::IntoIter {
        self.store.into_keys()
    }
}

impl<'a, T> IntoIterator for &'a ThreadUnsafeSet<T> {
    type Item = &'a T;
    type IntoIter = hash_map::Keys<'a, T, ()>;

    fn into_iter(self) -> Self::IntoIter {
        self.store.keys()
    }
}

impl<T: Hash + Eq> PartialEq for ThreadUnsafeSet<T> {
    fn eq(&self, other: &Self) -> bool {
        algebra::equal(self, other)
    }
}

impl<T: Hash + Eq> Eq for ThreadUnsafeSet<T> {}

impl<T: fmt::Debug> fmt::Debug for ThreadUnsafeSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.store.keys()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for ThreadUnsafeSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_listing(formatter, self.store.keys())
    }
}

/// Writes `Set{a, b, c}`.
pub(crate) fn write_listing<'a, T, I>(
    formatter: &mut fmt::Formatter<'_>,
    elements: I,
) -> fmt::Result
where
    T: fmt::Display + 'a,
    I: IntoIterator<Item = &'a T>,
{
    write!(formatter, "Set{{")?;
    let mut first = true;
    for element in elements {
        if first {
            first = false;
        } else {
            write!(formatter, ", ")?;
        }
        write!(formatter, "{element}")?;
    }
    write!(formatter, "}}")
}

static_assertions::assert_impl_all!(ThreadUnsafeSet<i32>: Send, Sync);
