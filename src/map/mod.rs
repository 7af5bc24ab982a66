//! Keyed containers: hash tables with pluggable hash functions and collision strategies.
//!
//! [`ChainedMap`] resolves collisions with a singly linked chain per bucket;
//! [`TreeMap`] keeps a binary search tree per bucket. Both store their nodes in a
//! per-table arena addressed by index, and both implement [`KeyedMap`].

pub mod backing;
pub mod chained;
pub mod config;
pub mod tree;

use std::hash::Hash;

use serde::Serialize;

use crate::types::{VanetError, VanetResult};

pub use backing::BackingMap;
pub use chained::ChainedMap;
pub use config::MapConfig;
pub use tree::TreeMap;

/// Collision strategy of a hash table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum MapKind {
    /// Separate chaining with a linked list per bucket.
    #[default]
    Chained,
    /// A binary search tree per bucket, ordered by the key.
    TreeBucketed,
}

impl MapKind {
    /// Every available strategy.
    pub const ALL: [MapKind; 2] = [Self::Chained, Self::TreeBucketed];

    /// Return a human-readable name for this map kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Chained => "chained",
            Self::TreeBucketed => "tree",
        }
    }

    /// Parse a map kind from its name.
    pub fn from_name(name: &str) -> VanetResult<Self> {
        match name.to_lowercase().as_str() {
            "chained" | "linked_list" | "linkedlist" | "list_bucket" => Ok(Self::Chained),
            "tree" | "tree_bucketed" | "treebucketed" | "bst" => Ok(Self::TreeBucketed),
            _ => Err(VanetError::UnsupportedMapType(name.to_string())),
        }
    }

    /// Build an empty table of this kind.
    pub fn build<K: Hash + Ord, V>(&self, config: MapConfig) -> VanetResult<BackingMap<K, V>> {
        BackingMap::with_config(config.with_kind(*self))
    }
}

impl std::fmt::Display for MapKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An immutable `(key, value)` pair produced by iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry<'a, K, V> {
    key: &'a K,
    value: &'a V,
}

impl<'a, K, V> Entry<'a, K, V> {
    /// Create a new entry.
    pub fn new(key: &'a K, value: &'a V) -> Self {
        Self { key, value }
    }

    /// The entry's key.
    pub fn key(&self) -> &'a K {
        self.key
    }

    /// The entry's value.
    pub fn value(&self) -> &'a V {
        self.value
    }
}

/// Occupancy figures for a table's buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BucketStats {
    /// Number of buckets.
    pub capacity: usize,
    /// Buckets holding at least one entry.
    pub occupied: usize,
    /// Entries in the fullest bucket.
    pub longest: usize,
    /// Entries sharing a bucket with an earlier entry (`len - occupied`).
    pub collisions: usize,
}

impl BucketStats {
    /// Build stats from the entry count of every bucket.
    pub fn from_bucket_sizes(sizes: impl IntoIterator<Item = usize>) -> Self {
        let mut stats = Self::default();
        let mut total = 0;
        for size in sizes {
            stats.capacity += 1;
            total += size;
            if size > 0 {
                stats.occupied += 1;
            }
            stats.longest = stats.longest.max(size);
        }
        stats.collisions = total - stats.occupied;
        stats
    }
}

/// The keyed-container contract shared by every table implementation.
///
/// Iteration order is bucket-index order (and, within a bucket, chain order or in-order
/// tree order). It is not insertion order and changes when the table resizes.
pub trait KeyedMap<K, V> {
    /// Collision strategy of this table.
    fn kind(&self) -> MapKind;

    /// Number of stored entries.
    fn len(&self) -> usize;

    /// Whether the table holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current number of buckets.
    fn capacity(&self) -> usize;

    /// Current `len / capacity` ratio.
    fn load(&self) -> f32 {
        self.len() as f32 / self.capacity() as f32
    }

    /// Insert or update. Returns the previous value when the key was already bound.
    fn put(&mut self, key: K, value: V) -> Option<V>;

    /// Value bound to `key`, or `None` when the key is unbound.
    fn get(&self, key: &K) -> Option<&V>;

    /// Mutable value bound to `key`.
    fn get_mut(&mut self, key: &K) -> Option<&mut V>;

    /// Whether `key` is bound.
    fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Unbind `key`, returning its value. No-op for an unbound key.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Drop every entry, keeping the current capacity.
    fn clear(&mut self);

    /// Walk every entry in bucket order.
    fn iter<'a>(&'a self) -> Box<dyn Iterator<Item = (&'a K, &'a V)> + 'a>
    where
        K: 'a,
        V: 'a;

    /// Entry count of every bucket, in bucket order.
    fn bucket_sizes(&self) -> Vec<usize>;

    /// All keys in iteration order.
    fn keys<'a>(&'a self) -> Vec<&'a K>
    where
        K: 'a,
        V: 'a,
    {
        self.iter().map(|(k, _)| k).collect()
    }

    /// All values in iteration order.
    fn values<'a>(&'a self) -> Vec<&'a V>
    where
        K: 'a,
        V: 'a,
    {
        self.iter().map(|(_, v)| v).collect()
    }

    /// All entries in iteration order.
    fn entries<'a>(&'a self) -> Vec<Entry<'a, K, V>>
    where
        K: 'a,
        V: 'a,
    {
        self.iter().map(|(k, v)| Entry::new(k, v)).collect()
    }

    /// Bucket occupancy summary.
    fn bucket_stats(&self) -> BucketStats {
        BucketStats::from_bucket_sizes(self.bucket_sizes())
    }
}
