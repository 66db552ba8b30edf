//! Aliases for the hash containers used across this crate.

pub use hashbrown::hash_map::Entry;

/// Hashmap using [`hashbrown::HashMap`].
pub type HashMap<K, V> = hashbrown::HashMap<K, V>;

/// Hashset using [`hashbrown::HashSet`].
pub type HashSet<K> = hashbrown::HashSet<K>;
