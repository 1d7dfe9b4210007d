//! # sharedset
//!
//! Deduplicated, unordered hash sets in two flavours sharing one API:
//!
//! - [`ThreadSafeSet`]: guarded by a reader/writer lock, mutable through
//!   `&self`, shareable across threads behind an `Arc`.
//! - [`ThreadUnsafeSet`]: no internal locking; mutation needs `&mut self`.
//!
//! Both implement [`Set`], which carries the full operation set: membership,
//! mutation, `pop`/`pop_n`, subset and superset relations, union,
//! intersection, difference and symmetric difference, callback iteration,
//! lazy iteration and cancellable streaming iteration ([`SetIterator`]).
//! The set algebra itself lives in [`algebra`], written once against the
//! [`algebra::SetView`] capability trait.
//!
//! ## Feature Flags
//!
//! - `fxhash`: hash elements with `rustc-hash`'s `FxBuildHasher`
//! - `ahash`: hash elements with `ahash`'s `RandomState`
//!
//! Without either, the standard library's `RandomState` is used.
//!
//! ## Logging
//!
//! Streaming iterator workers emit [`tracing`] events (start, exhaustion,
//! stop, consumer disconnect, spawn failure). Install a subscriber to see
//! them; the crate never installs one itself.
//!
//! ## Example
//!
//! ```rust
//! use sharedset::prelude::*;
//!
//! let required = sync_set!["Cooking", "English", "Math", "Biology"];
//! let science = sync_set!["Biology", "Chemistry"];
//! let electives = sync_set!["Welding", "Music", "Automotive"];
//!
//! let all = required.union(&science).union(&electives);
//! assert_eq!(all.cardinality(), 8);
//! assert!(!science.contains_one(&"Cooking"));
//! assert_eq!(science.intersect(&required).to_vec(), vec!["Biology"]);
//! assert!(all.contains(&["Welding", "Automotive", "English"]));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// ```rust
/// use sharedset::prelude::*;
///
/// let set: ThreadUnsafeSet<i32> = unsync_set![1, 2, 3];
/// assert_eq!(set.cardinality(), 3);
/// ```
pub mod prelude {
    pub use crate::{Set, SetIterator, StopHandle, ThreadSafeSet, ThreadUnsafeSet};
    pub use crate::{sync_set, unsync_set};
}

pub mod algebra;
mod iterator;
mod set;
mod store;
mod sync;
mod unsync;

pub use iterator::{SetIterator, StopHandle, TryNextError};
pub use set::Set;
pub use store::StoreHasher;
pub use sync::ThreadSafeSet;
pub use unsync::ThreadUnsafeSet;

/// Creates a [`ThreadSafeSet`] from a list of elements.
///
/// ```rust
/// use sharedset::{Set, ThreadSafeSet, sync_set};
///
/// let empty: ThreadSafeSet<u8> = sync_set![];
/// let digits = sync_set![1, 2, 2, 3];
/// assert!(empty.is_empty());
/// assert_eq!(digits.cardinality(), 3);
/// ```
#[macro_export]
macro_rules! sync_set {
    () => {
        $crate::ThreadSafeSet::new()
    };
    ($($element:expr),+ $(,)?) => {
        $crate::ThreadSafeSet::from([$($element),+])
    };
}

/// Creates a [`ThreadUnsafeSet`] from a list of elements.
///
/// ```rust
/// use sharedset::{Set, unsync_set};
///
/// let letters = unsync_set!['a', 'b', 'a'];
/// assert_eq!(letters.cardinality(), 2);
/// ```
#[macro_export]
macro_rules! unsync_set {
    () => {
        $crate::ThreadUnsafeSet::new()
    };
    ($($element:expr),+ $(,)?) => {
        $crate::ThreadUnsafeSet::from([$($element),+])
    };
}
