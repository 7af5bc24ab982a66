//! Runtime-selected table: one of the keyed-map implementations chosen by [`MapKind`].

use std::hash::Hash;

use crate::types::VanetResult;

use super::{ChainedMap, KeyedMap, MapConfig, MapKind, TreeMap};

/// A keyed map whose collision strategy is picked from a [`MapConfig`] at runtime.
#[derive(Debug, Clone)]
pub enum BackingMap<K, V> {
    /// Separate chaining.
    Chained(ChainedMap<K, V>),
    /// Binary search tree per bucket.
    TreeBucketed(TreeMap<K, V>),
}

impl<K: Hash + Ord, V> BackingMap<K, V> {
    /// Build an empty table of `config.kind`, validating the configuration first.
    pub fn with_config(config: MapConfig) -> VanetResult<Self> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    pub(crate) fn from_valid(config: MapConfig) -> Self {
        match config.kind {
            MapKind::Chained => Self::Chained(ChainedMap::from_valid(config)),
            MapKind::TreeBucketed => Self::TreeBucketed(TreeMap::from_valid(config)),
        }
    }
}

impl<K: Hash + Ord, V> KeyedMap<K, V> for BackingMap<K, V> {
    fn kind(&self) -> MapKind {
        match self {
            Self::Chained(_) => MapKind::Chained,
            Self::TreeBucketed(_) => MapKind::TreeBucketed,
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::Chained(m) => m.len(),
            Self::TreeBucketed(m) => m.len(),
        }
    }

    fn capacity(&self) -> usize {
        match self {
            Self::Chained(m) => m.capacity(),
            Self::TreeBucketed(m) => m.capacity(),
        }
    }

    fn put(&mut self, key: K, value: V) -> Option<V> {
        match self {
            Self::Chained(m) => m.put(key, value),
            Self::TreeBucketed(m) => m.put(key, value),
        }
    }

    fn get(&self, key: &K) -> Option<&V> {
        match self {
            Self::Chained(m) => m.get(key),
            Self::TreeBucketed(m) => m.get(key),
        }
    }

    fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        match self {
            Self::Chained(m) => m.get_mut(key),
            Self::TreeBucketed(m) => m.get_mut(key),
        }
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        match self {
            Self::Chained(m) => m.remove(key),
            Self::TreeBucketed(m) => m.remove(key),
        }
    }

    fn clear(&mut self) {
        match self {
            Self::Chained(m) => m.clear(),
            Self::TreeBucketed(m) => m.clear(),
        }
    }

    fn iter<'a>(&'a self) -> Box<dyn Iterator<Item = (&'a K, &'a V)> + 'a>
    where
        K: 'a,
        V: 'a,
    {
        match self {
            Self::Chained(m) => m.iter(),
            Self::TreeBucketed(m) => m.iter(),
        }
    }

    fn bucket_sizes(&self) -> Vec<usize> {
        match self {
            Self::Chained(m) => m.bucket_sizes(),
            Self::TreeBucketed(m) => m.bucket_sizes(),
        }
    }
}
