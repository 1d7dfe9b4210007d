//! Set algebra written once against a minimal read-only view.
//!
//! Every function here needs only three capabilities from its operands:
//! the number of elements, a membership probe, and a borrowed enumeration.
//! Those are captured by [`SetView`]. Both [`ThreadUnsafeSet`] and the
//! standard library's [`HashSet`] implement it, so the functions also work
//! across the two.
//!
//! [`ThreadSafeSet`](crate::ThreadSafeSet) does not implement [`SetView`]:
//! it cannot lend out a borrowed enumeration without holding its lock. It
//! calls into this module with its lock guard and a snapshot instead.
//!
//! Operands are never mutated. Set-producing functions return a freshly
//! allocated [`ThreadUnsafeSet`].
//!
//! # Examples
//!
//! ```rust
//! use sharedset::algebra;
//! use sharedset::{Set, ThreadUnsafeSet};
//! use std::collections::HashSet;
//!
//! let ours = ThreadUnsafeSet::from_slice(&[1, 2, 3]);
//! let theirs: HashSet<i32> = [2, 3, 4].into_iter().collect();
//!
//! assert_eq!(algebra::intersect(&ours, &theirs).to_sorted_vec(), vec![2, 3]);
//! assert!(!algebra::is_subset(&ours, &theirs));
//! ```

use std::collections::HashSet;
use std::hash::{BuildHasher, Hash};

use crate::ThreadUnsafeSet;

/// Read-only capabilities the algebra engine needs from an operand.
pub trait SetView<T> {
    /// Number of distinct elements.
    fn size(&self) -> usize;

    /// Whether `element` is present.
    fn holds(&self, element: &T) -> bool;

    /// Borrowed enumeration of every element, in no particular order.
    fn elements<'a>(&'a self) -> impl Iterator<Item = &'a T>
    where
        T: 'a;
}

impl<T: Hash + Eq, S: BuildHasher> SetView<T> for HashSet<T, S> {
    fn size(&self) -> usize {
        self.len()
    }

    fn holds(&self, element: &T) -> bool {
        self.contains(element)
    }

    fn elements<'a>(&'a self) -> impl Iterator<Item = &'a T>
    where
        T: 'a,
    {
        self.iter()
    }
}

/// Returns `true` if every element of `candidate` is in `container`.
///
/// The empty set is a subset of everything, itself included.
pub fn is_subset<T, A, B>(candidate: &A, container: &B) -> bool
where
    A: SetView<T> + ?Sized,
    B: SetView<T> + ?Sized,
{
    candidate.size() <= container.size()
        && candidate.elements().all(|element| container.holds(element))
}

/// Returns `true` if every element of `contained` is in `container`.
pub fn is_superset<T, A, B>(container: &A, contained: &B) -> bool
where
    A: SetView<T> + ?Sized,
    B: SetView<T> + ?Sized,
{
    is_subset(contained, container)
}

/// Returns `true` if both operands hold exactly the same elements.
pub fn equal<T, A, B>(left: &A, right: &B) -> bool
where
    A: SetView<T> + ?Sized,
    B: SetView<T> + ?Sized,
{
    left.size() == right.size() && left.elements().all(|element| right.holds(element))
}

/// Returns `true` if the operands have at least one element in common.
pub fn shares_any<T, A, B>(left: &A, right: &B) -> bool
where
    A: SetView<T> + ?Sized,
    B: SetView<T> + ?Sized,
{
    if left.size() <= right.size() {
        left.elements().any(|element| right.holds(element))
    } else {
        right.elements().any(|element| left.holds(element))
    }
}

/// Elements in either operand.
///
/// # Complexity
///
/// O(n + m)
pub fn union<T, A, B>(left: &A, right: &B) -> ThreadUnsafeSet<T>
where
    T: Hash + Eq + Clone,
    A: SetView<T> + ?Sized,
    B: SetView<T> + ?Sized,
{
    let mut result = ThreadUnsafeSet::with_capacity(left.size().max(right.size()));
    result.extend(left.elements().cloned());
    result.extend(right.elements().cloned());
    result
}

/// Elements in both operands.
///
/// # Complexity
///
/// O(min(n, m)): the smaller operand is enumerated and probed against the
/// larger one.
pub fn intersect<T, A, B>(left: &A, right: &B) -> ThreadUnsafeSet<T>
where
    T: Hash + Eq + Clone,
    A: SetView<T> + ?Sized,
    B: SetView<T> + ?Sized,
{
    if left.size() <= right.size() {
        left.elements()
            .filter(|element| right.holds(element))
            .cloned()
            .collect()
    } else {
        right
            .elements()
            .filter(|element| left.holds(element))
            .cloned()
            .collect()
    }
}

/// Elements of `left` that are not in `right`.
pub fn difference<T, A, B>(left: &A, right: &B) -> ThreadUnsafeSet<T>
where
    T: Hash + Eq + Clone,
    A: SetView<T> + ?Sized,
    B: SetView<T> + ?Sized,
{
    left.elements()
        .filter(|element| !right.holds(element))
        .cloned()
        .collect()
}

/// Elements in exactly one of the operands.
pub fn symmetric_difference<T, A, B>(left: &A, right: &B) -> ThreadUnsafeSet<T>
where
    T: Hash + Eq + Clone,
    A: SetView<T> + ?Sized,
    B: SetView<T> + ?Sized,
{
    let mut result = difference(left, right);
    result.extend(
        right
            .elements()
            .filter(|element| !left.holds(element))
            .cloned(),
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Set;
    use rstest::rstest;

    fn unsync(elements: &[i32]) -> ThreadUnsafeSet<i32> {
        ThreadUnsafeSet::from_slice(elements)
    }

    fn std_set(elements: &[i32]) -> HashSet<i32> {
        elements.iter().copied().collect()
    }

    #[rstest]
    #[case(&[], &[], true)]
    #[case(&[], &[1, 2], true)]
    #[case(&[1, 2], &[1, 2, 3], true)]
    #[case(&[1, 2, 3], &[1, 2, 3], true)]
    #[case(&[1, 4], &[1, 2, 3], false)]
    #[case(&[1, 2, 3, 4], &[1, 2, 3], false)]
    fn test_is_subset(#[case] candidate: &[i32], #[case] container: &[i32], #[case] expected: bool) {
        assert_eq!(is_subset(&unsync(candidate), &unsync(container)), expected);
        assert_eq!(is_superset(&unsync(container), &unsync(candidate)), expected);
    }

    #[rstest]
    fn test_equal_requires_same_cardinality() {
        assert!(equal(&unsync(&[1, 2]), &unsync(&[2, 1])));
        assert!(!equal(&unsync(&[1, 2]), &unsync(&[1, 2, 3])));
        assert!(!equal(&unsync(&[1, 2, 3]), &unsync(&[1, 2])));
        assert!(equal(&unsync(&[]), &unsync(&[])));
    }

    #[rstest]
    fn test_shares_any() {
        assert!(!shares_any(&unsync(&[1, 3, 5]), &unsync(&[2, 4, 6])));
        assert!(shares_any(&unsync(&[1, 3, 5, 10]), &unsync(&[10])));
        assert!(!shares_any(&unsync(&[]), &unsync(&[1])));
    }

    #[rstest]
    fn test_union_and_intersect() {
        let left = unsync(&[1, 2, 3]);
        let right = unsync(&[2, 3, 4, 5]);

        assert_eq!(union(&left, &right).to_sorted_vec(), vec![1, 2, 3, 4, 5]);
        assert_eq!(intersect(&left, &right).to_sorted_vec(), vec![2, 3]);
        assert_eq!(intersect(&right, &left).to_sorted_vec(), vec![2, 3]);
    }

    #[rstest]
    fn test_difference_and_symmetric_difference() {
        let left = unsync(&[1, 2, 3]);
        let right = unsync(&[2, 3, 4]);

        assert_eq!(difference(&left, &right).to_sorted_vec(), vec![1]);
        assert_eq!(difference(&right, &left).to_sorted_vec(), vec![4]);
        assert_eq!(symmetric_difference(&left, &right).to_sorted_vec(), vec![1, 4]);
    }

    #[rstest]
    fn test_mixed_operands() {
        let ours = unsync(&[1, 2, 3]);
        let theirs = std_set(&[3, 4]);

        assert!(shares_any(&ours, &theirs));
        assert_eq!(union(&ours, &theirs).to_sorted_vec(), vec![1, 2, 3, 4]);
        assert_eq!(difference(&theirs, &ours).to_sorted_vec(), vec![4]);
    }

    #[rstest]
    fn test_operands_untouched() {
        let left = unsync(&[1, 2]);
        let right = unsync(&[2, 3]);
        let _ = symmetric_difference(&left, &right);

        assert_eq!(left.to_sorted_vec(), vec![1, 2]);
        assert_eq!(right.to_sorted_vec(), vec![2, 3]);
    }
}
