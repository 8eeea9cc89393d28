//! A hash-set with a fixed hasher state. See [`super::hashmap`].

/// Hashset using [`hashbrown::HashSet`] with a fixed [`foldhash`] state.
pub type HashSet<K> = hashbrown::hash_set::HashSet<K, foldhash::fast::FixedState>;
