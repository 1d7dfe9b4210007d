//! Concurrency-safe hash set.
//!
//! [`ThreadSafeSet`] wraps a [`ThreadUnsafeSet`] in a reader/writer lock.
//! Queries take the read lock, mutators take the write lock, and each public
//! call holds its lock only around the underlying operation. Mutators take
//! `&self`, so one set can be shared as `Arc<ThreadSafeSet<T>>`.
//!
//! # Lock discipline
//!
//! - Every call is atomic on its own. A sequence of calls is not: a
//!   `contains_one` followed by `remove` can interleave with other threads.
//! - Operations combining two sets never hold both locks at once. The
//!   smaller set is snapshotted under its read lock, that lock is released,
//!   and only then is the larger set's read lock taken. Two threads running
//!   `a.union(&b)` and `b.union(&a)` therefore cannot deadlock.
//! - `append` and `extend` drain their input before taking the write lock,
//!   so the input may be another set's [`SetIterator`] or may read this set.
//! - [`Set::each`] holds the read lock for the whole traversal, and a
//!   [`SetIterator`] worker holds it until it is drained or stopped. The
//!   callback (or the consumer thread) must not write to the same set, and
//!   should not read from it either: the lock is writer-fair, so a nested
//!   read queued behind a waiting writer deadlocks.
//!
//! # Examples
//!
//! ```rust
//! use sharedset::{Set, ThreadSafeSet};
//! use std::sync::Arc;
//! use std::thread;
//!
//! let set = Arc::new(ThreadSafeSet::new());
//! let workers: Vec<_> = (0..4)
//!     .map(|worker| {
//!         let set = Arc::clone(&set);
//!         thread::spawn(move || {
//!             for element in 0..100 {
//!                 set.add(worker * 50 + element);
//!             }
//!         })
//!     })
//!     .collect();
//! for worker in workers {
//!     worker.join().unwrap();
//! }
//!
//! assert_eq!(set.cardinality(), 250);
//! ```

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::unsync::write_listing;
use crate::{Set, SetIterator, ThreadUnsafeSet};

/// A hash set guarded by a reader/writer lock.
///
/// [`Clone`] makes an independent copy of the elements. To share one set
/// between owners, wrap it in an [`Arc`].
pub struct ThreadSafeSet<T> {
    inner: Arc<RwLock<ThreadUnsafeSet<T>>>,
}

impl<T> ThreadSafeSet<T> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty set with room for at least `capacity` elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from(ThreadUnsafeSet::with_capacity(capacity))
    }
}

impl<T: Hash + Eq + Clone> ThreadSafeSet<T> {
    /// Creates a set holding the distinct values of `elements`.
    #[must_use]
    pub fn from_slice(elements: &[T]) -> Self {
        Self::from(ThreadUnsafeSet::from_slice(elements))
    }

    /// Creates a set from the key space of a map, ignoring its values.
    ///
    /// ```rust
    /// use sharedset::{Set, ThreadSafeSet};
    /// use std::collections::HashMap;
    ///
    /// let stock = HashMap::from([(5, "bolts"), (2, "nuts")]);
    /// let ids = ThreadSafeSet::from_map_keys(&stock);
    /// assert_eq!(ids.to_sorted_vec(), vec![2, 5]);
    /// ```
    #[must_use]
    pub fn from_map_keys<'a, V, I>(entries: I) -> Self
    where
        T: 'a,
        V: 'a,
        I: IntoIterator<Item = (&'a T, &'a V)>,
    {
        Self::from(ThreadUnsafeSet::from_map_keys(entries))
    }

    /// Inserts `element` under the write lock, returning `true` if it was
    /// not already present.
    pub fn add(&self, element: T) -> bool {
        self.inner.write().add(element)
    }

    /// Inserts every element under a single write lock, returning how many
    /// were newly inserted.
    ///
    /// `elements` is drained before the lock is taken, so it may read from
    /// this set or stream from another one.
    pub fn append<I: IntoIterator<Item = T>>(&self, elements: I) -> usize {
        let elements: Vec<T> = elements.into_iter().collect();
        self.inner.write().append(elements)
    }

    /// Removes `element` if present.
    pub fn remove(&self, element: &T) {
        self.inner.write().remove(element);
    }

    /// Removes every listed element that is present.
    pub fn remove_all(&self, elements: &[T]) {
        self.inner.write().remove_all(elements);
    }

    /// Removes every element.
    pub fn clear(&self) {
        self.inner.write().clear();
    }

    /// Removes and returns an arbitrary element, or `None` when empty.
    pub fn pop(&self) -> Option<T> {
        self.inner.write().pop()
    }

    /// Removes and returns up to `count` arbitrary elements atomically.
    pub fn pop_n(&self, count: usize) -> Vec<T> {
        self.inner.write().pop_n(count)
    }

    /// Copies the elements out under the read lock.
    #[must_use]
    pub fn snapshot(&self) -> ThreadUnsafeSet<T> {
        self.inner.read().clone()
    }

    /// Converts into the unsynchronized variant.
    ///
    /// Copies the elements only if a running [`SetIterator`] still shares
    /// the store.
    #[must_use]
    pub fn into_unsync(self) -> ThreadUnsafeSet<T> {
        match Arc::try_unwrap(self.inner) {
            Ok(lock) => lock.into_inner(),
            Err(shared) => shared.read().clone(),
        }
    }

    /// Runs `combine` on this set and `other` with at most one lock held.
    ///
    /// The smaller of the two is copied under its own read lock; the larger
    /// one's read lock is taken only after that lock has been released.
    /// Combining a set with itself takes a single read lock and no copy.
    fn with_other<R>(
        &self,
        other: &Self,
        combine: impl FnOnce(&ThreadUnsafeSet<T>, &ThreadUnsafeSet<T>) -> R,
    ) -> R {
        if Arc::ptr_eq(&self.inner, &other.inner) {
            let ours = self.inner.read();
            return combine(&*ours, &*ours);
        }
        if self.cardinality() < other.cardinality() {
            let ours = self.snapshot();
            let theirs = other.inner.read();
            return combine(&ours, &*theirs);
        }
        let theirs = other.snapshot();
        let ours = self.inner.read();
        combine(&*ours, &theirs)
    }
}

impl<T: Hash + Eq + Clone> Set<T> for ThreadSafeSet<T> {
    type Iter<'a>
        = std::vec::IntoIter<T>
    where
        Self: 'a;

    fn add(&mut self, element: T) -> bool {
        Self::add(self, element)
    }

    fn append<I: IntoIterator<Item = T>>(&mut self, elements: I) -> usize {
        Self::append(self, elements)
    }

    fn remove(&mut self, element: &T) {
        Self::remove(self, element);
    }

    fn remove_all(&mut self, elements: &[T]) {
        Self::remove_all(self, elements);
    }

    fn clear(&mut self) {
        Self::clear(self);
    }

    fn pop(&mut self) -> Option<T> {
        Self::pop(self)
    }

    fn pop_n(&mut self, count: usize) -> Vec<T> {
        Self::pop_n(self, count)
    }

    fn contains(&self, elements: &[T]) -> bool {
        self.inner.read().contains(elements)
    }

    fn contains_one(&self, element: &T) -> bool {
        self.inner.read().contains_one(element)
    }

    fn contains_any(&self, elements: &[T]) -> bool {
        self.inner.read().contains_any(elements)
    }

    fn contains_any_element(&self, other: &Self) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.with_other(other, |ours, theirs| ours.contains_any_element(theirs))
    }

    fn cardinality(&self) -> usize {
        self.inner.read().cardinality()
    }

    fn equal(&self, other: &Self) -> bool {
        if self.cardinality() != other.cardinality() {
            return false;
        }
        self.with_other(other, |ours, theirs| ours.equal(theirs))
    }

    fn is_subset(&self, other: &Self) -> bool {
        if self.cardinality() > other.cardinality() {
            return false;
        }
        self.with_other(other, |ours, theirs| ours.is_subset(theirs))
    }

    fn is_proper_subset(&self, other: &Self) -> bool {
        if self.cardinality() >= other.cardinality() {
            return false;
        }
        self.with_other(other, |ours, theirs| ours.is_proper_subset(theirs))
    }

    fn is_superset(&self, other: &Self) -> bool {
        if self.cardinality() < other.cardinality() {
            return false;
        }
        self.with_other(other, |ours, theirs| ours.is_superset(theirs))
    }

    fn is_proper_superset(&self, other: &Self) -> bool {
        if self.cardinality() <= other.cardinality() {
            return false;
        }
        self.with_other(other, |ours, theirs| ours.is_proper_superset(theirs))
    }

    fn union(&self, other: &Self) -> Self {
        Self::from(self.with_other(other, |ours, theirs| ours.union(theirs)))
    }

    fn intersect(&self, other: &Self) -> Self {
        Self::from(self.with_other(other, |ours, theirs| ours.intersect(theirs)))
    }

    fn difference(&self, other: &Self) -> Self {
        Self::from(self.with_other(other, |ours, theirs| ours.difference(theirs)))
    }

    fn symmetric_difference(&self, other: &Self) -> Self {
        Self::from(self.with_other(other, |ours, theirs| {
            ours.symmetric_difference(theirs)
        }))
    }

    /// Holds the read lock for the whole traversal. `visit` must not touch
    /// this set.
    fn each<F>(&self, visit: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.inner.read().each(visit);
    }

    /// Iterates a copy taken under the read lock; the lock is not held while
    /// the caller consumes it.
    fn iter(&self) -> Self::Iter<'_> {
        self.to_vec().into_iter()
    }

    /// The worker holds the read lock from its start until the stream is
    /// exhausted, stopped, or dropped.
    fn iterator(&self) -> SetIterator<T>
    where
        T: Send + Sync + 'static,
    {
        let store = Arc::clone(&self.inner);
        SetIterator::spawn(move |feed| {
            let guard = store.read();
            feed.deliver(guard.iter())
        })
    }

    fn to_vec(&self) -> Vec<T> {
        self.inner.read().to_vec()
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T: Clone> Clone for ThreadSafeSet<T> {
    fn clone(&self) -> Self {
        Self::from(self.inner.read().clone())
    }
}

impl<T> Default for ThreadSafeSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<ThreadUnsafeSet<T>> for ThreadSafeSet<T> {
    fn from(set: ThreadUnsafeSet<T>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(set)),
        }
    }
}

impl<T: Hash + Eq, const N: usize> From<[T; N]> for ThreadSafeSet<T> {
    fn from(elements: [T; N]) -> Self {
        Self::from(ThreadUnsafeSet::from(elements))
    }
}

impl<T: Hash + Eq> FromIterator<T> for ThreadSafeSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<ThreadUnsafeSet<T>>())
    }
}

impl<T: Hash + Eq> Extend<T> for ThreadSafeSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let elements: Vec<T> = iter.into_iter().collect();
        self.inner.write().extend(elements);
    }
}

impl<T: Hash + Eq + Clone> PartialEq for ThreadSafeSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl<T: Hash + Eq + Clone> Eq for ThreadSafeSet<T> {}

impl<T: fmt::Debug> fmt::Debug for ThreadSafeSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.inner.read(), formatter)
    }
}

impl<T: fmt::Display> fmt::Display for ThreadSafeSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_listing(formatter, &*self.inner.read())
    }
}

static_assertions::assert_impl_all!(ThreadSafeSet<i32>: Send, Sync);
static_assertions::assert_impl_all!(ThreadSafeSet<String>: Send, Sync);
