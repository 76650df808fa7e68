#[cfg(not(feature = "std"))]
use alloc::collections::{BTreeMap, BTreeSet};
#[cfg(feature = "std")]
use std::collections::{HashMap, HashSet};

#[cfg(feature = "std")]
pub(crate) type KeyMap<K, V> = HashMap<K, V>;
#[cfg(not(feature = "std"))]
pub(crate) type KeyMap<K, V> = BTreeMap<K, V>;

#[cfg(feature = "std")]
pub(crate) type KeySet<K> = HashSet<K>;
#[cfg(not(feature = "std"))]
pub(crate) type KeySet<K> = BTreeSet<K>;

/// Item identity used as the join key between data source, position index and UI.
///
/// With `std` this is any `Clone + Hash + Eq` type; without it, any `Clone + Ord` type.
#[cfg(feature = "std")]
pub trait ItemKey: Clone + core::hash::Hash + Eq {}
#[cfg(feature = "std")]
impl<K: Clone + core::hash::Hash + Eq> ItemKey for K {}

#[cfg(not(feature = "std"))]
pub trait ItemKey: Clone + Ord {}
#[cfg(not(feature = "std"))]
impl<K: Clone + Ord> ItemKey for K {}
