//! A hash-map with a fixed hasher state, so that iteration order only depends on the
//! insertion history and fracture runs stay reproducible from a seed.

pub use hashbrown::hash_map::Entry;

/// Hashmap using [`hashbrown::HashMap`] with a fixed [`foldhash`] state.
pub type HashMap<K, V> = hashbrown::hash_map::HashMap<K, V, foldhash::fast::FixedState>;
