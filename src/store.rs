//! Backing store shared by both set variants.
//!
//! A set is a hash map from element to the zero-size marker `()`. The hasher
//! is picked at compile time:
//!
//! - `fxhash` feature: `rustc_hash::FxBuildHasher`
//! - `ahash` feature (without `fxhash`): `ahash::RandomState`
//! - neither: `std::collections::hash_map::RandomState`

use std::collections::HashMap;
use std::hash::Hash;

/// Hasher builder used by every set's backing store.
#[cfg(feature = "fxhash")]
pub type StoreHasher = rustc_hash::FxBuildHasher;

/// Hasher builder used by every set's backing store.
#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
pub type StoreHasher = ahash::RandomState;

/// Hasher builder used by every set's backing store.
#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
pub type StoreHasher = std::collections::hash_map::RandomState;

/// Element to presence mapping backing a set.
pub(crate) type Store<T> = HashMap<T, (), StoreHasher>;

/// Creates an empty store with room for at least `capacity` elements.
pub(crate) fn with_capacity<T>(capacity: usize) -> Store<T> {
    HashMap::with_capacity_and_hasher(capacity, StoreHasher::default())
}

/// Removes and returns up to `count` elements in map iteration order.
///
/// Draining the whole map avoids cloning keys; a partial pop has to clone the
/// chosen keys out before removing them.
pub(crate) fn take<T: Hash + Eq + Clone>(store: &mut Store<T>, count: usize) -> Vec<T> {
    if count == 0 || store.is_empty() {
        return Vec::new();
    }
    if count >= store.len() {
        return store.drain().map(|(element, ())| element).collect();
    }

    let chosen: Vec<T> = store.keys().take(count).cloned().collect();
    chosen
        .into_iter()
        .filter_map(|element| store.remove_entry(&element).map(|(owned, ())| owned))
        .collect()
}
