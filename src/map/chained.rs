//! Separate-chaining hash table.

use std::hash::Hash;

use crate::types::VanetResult;

use super::{KeyedMap, MapConfig, MapKind};

/// One chain link. `next` indexes into the owning table's arena.
#[derive(Debug, Clone)]
struct ChainNode<K, V> {
    key: K,
    value: V,
    next: Option<usize>,
}

/// Where a chain pointer lives: a bucket head or a node's `next` field.
#[derive(Debug, Clone, Copy)]
enum Link {
    Head(usize),
    Next(usize),
}

/// Hash table resolving collisions with a singly linked chain per bucket.
///
/// New keys are appended at the tail of their bucket's chain; an existing key has its
/// value replaced in place. Chains are stored as indices into a dense node arena.
#[derive(Debug, Clone)]
pub struct ChainedMap<K, V> {
    /// Head node of each bucket's chain.
    heads: Vec<Option<usize>>,
    /// All live nodes.
    nodes: Vec<ChainNode<K, V>>,
    config: MapConfig,
}

impl<K: Hash + Eq, V> ChainedMap<K, V> {
    /// Create a table with the default configuration.
    pub fn new() -> Self {
        Self::from_valid(MapConfig::new(MapKind::Chained))
    }

    /// Create a resizable table with `capacity` initial buckets.
    pub fn with_capacity(capacity: usize) -> VanetResult<Self> {
        Self::with_config(MapConfig::new(MapKind::Chained).with_capacity(capacity))
    }

    /// Create a table from a configuration, validating it first.
    pub fn with_config(config: MapConfig) -> VanetResult<Self> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    pub(crate) fn from_valid(config: MapConfig) -> Self {
        Self {
            heads: vec![None; config.capacity],
            nodes: Vec::new(),
            config: config.with_kind(MapKind::Chained),
        }
    }

    /// The configuration this table was built with (capacity is the initial one).
    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    fn bucket_of(&self, key: &K) -> usize {
        self.config.hash_function.index(key, self.heads.len())
    }

    fn find(&self, key: &K) -> Option<usize> {
        let mut cursor = self.heads[self.bucket_of(key)];
        while let Some(id) = cursor {
            if self.nodes[id].key == *key {
                return Some(id);
            }
            cursor = self.nodes[id].next;
        }
        None
    }

    fn set_link(&mut self, link: Link, target: Option<usize>) {
        match link {
            Link::Head(bucket) => self.heads[bucket] = target,
            Link::Next(id) => self.nodes[id].next = target,
        }
    }

    /// The link currently pointing at node `id`.
    fn link_to(&self, id: usize) -> Link {
        let bucket = self.bucket_of(&self.nodes[id].key);
        let mut link = Link::Head(bucket);
        let mut cursor = self.heads[bucket];
        while let Some(current) = cursor {
            if current == id {
                break;
            }
            link = Link::Next(current);
            cursor = self.nodes[current].next;
        }
        link
    }

    /// Remove an already unlinked node from the arena, repointing whichever link
    /// referenced the node that `swap_remove` moves into its slot.
    fn release(&mut self, id: usize) -> ChainNode<K, V> {
        let last = self.nodes.len() - 1;
        let moved_link = (id != last).then(|| self.link_to(last));
        let node = self.nodes.swap_remove(id);
        if let Some(link) = moved_link {
            self.set_link(link, Some(id));
        }
        node
    }

    /// Node ids in iteration order.
    fn ordered_ids(&self) -> Vec<usize> {
        let mut ids = Vec::with_capacity(self.nodes.len());
        for &head in &self.heads {
            let mut cursor = head;
            while let Some(id) = cursor {
                ids.push(id);
                cursor = self.nodes[id].next;
            }
        }
        ids
    }

    /// Double the bucket count and rehash every node under the new capacity.
    ///
    /// Nodes keep their relative order: they are replayed in the old iteration order
    /// and appended at the tail of their new chain.
    pub fn resize(&mut self) {
        let new_capacity = self.heads.len() * 2;
        let order = self.ordered_ids();

        let mut heads = vec![None; new_capacity];
        let mut tails: Vec<Option<usize>> = vec![None; new_capacity];
        for id in order {
            self.nodes[id].next = None;
            let bucket = self.config.hash_function.index(&self.nodes[id].key, new_capacity);
            match tails[bucket] {
                Some(tail) => self.nodes[tail].next = Some(id),
                None => heads[bucket] = Some(id),
            }
            tails[bucket] = Some(id);
        }

        log::debug!(
            "chained map resized {} -> {} buckets ({} entries)",
            self.heads.len(),
            new_capacity,
            self.nodes.len()
        );
        self.heads = heads;
    }

    fn after_insert(&mut self) {
        let (size, capacity) = (self.nodes.len(), self.heads.len());
        if !self.config.over_threshold(size, capacity) {
            return;
        }
        if self.config.resizable {
            self.resize();
        } else if !self.config.over_threshold(size - 1, capacity) {
            log::warn!(
                "non-resizable chained map reached load factor {} ({} entries in {} buckets)",
                self.config.load_factor,
                size,
                capacity
            );
        }
    }
}

impl<K: Hash + Eq, V> Default for ChainedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq, V> KeyedMap<K, V> for ChainedMap<K, V> {
    fn kind(&self) -> MapKind {
        MapKind::Chained
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn capacity(&self) -> usize {
        self.heads.len()
    }

    fn put(&mut self, key: K, value: V) -> Option<V> {
        let bucket = self.bucket_of(&key);
        let mut link = Link::Head(bucket);
        let mut cursor = self.heads[bucket];
        while let Some(id) = cursor {
            if self.nodes[id].key == key {
                return Some(std::mem::replace(&mut self.nodes[id].value, value));
            }
            link = Link::Next(id);
            cursor = self.nodes[id].next;
        }

        let id = self.nodes.len();
        self.nodes.push(ChainNode {
            key,
            value,
            next: None,
        });
        self.set_link(link, Some(id));
        self.after_insert();
        None
    }

    fn get(&self, key: &K) -> Option<&V> {
        self.find(key).map(|id| &self.nodes[id].value)
    }

    fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.find(key).map(move |id| &mut self.nodes[id].value)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        let bucket = self.bucket_of(key);
        let mut link = Link::Head(bucket);
        let mut cursor = self.heads[bucket];
        while let Some(id) = cursor {
            if self.nodes[id].key == *key {
                let next = self.nodes[id].next;
                self.set_link(link, next);
                return Some(self.release(id).value);
            }
            link = Link::Next(id);
            cursor = self.nodes[id].next;
        }
        None
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.heads.iter_mut().for_each(|head| *head = None);
    }

    fn iter<'a>(&'a self) -> Box<dyn Iterator<Item = (&'a K, &'a V)> + 'a>
    where
        K: 'a,
        V: 'a,
    {
        Box::new(Iter {
            map: self,
            bucket: 0,
            cursor: None,
        })
    }

    fn bucket_sizes(&self) -> Vec<usize> {
        self.heads
            .iter()
            .map(|&head| {
                let mut count = 0;
                let mut cursor = head;
                while let Some(id) = cursor {
                    count += 1;
                    cursor = self.nodes[id].next;
                }
                count
            })
            .collect()
    }
}

/// Bucket-by-bucket, head-to-tail iterator over a [`ChainedMap`].
pub struct Iter<'a, K, V> {
    map: &'a ChainedMap<K, V>,
    bucket: usize,
    cursor: Option<usize>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(id) = self.cursor {
                let node = &self.map.nodes[id];
                self.cursor = node.next;
                return Some((&node.key, &node.value));
            }
            if self.bucket >= self.map.heads.len() {
                return None;
            }
            self.cursor = self.map.heads[self.bucket];
            self.bucket += 1;
        }
    }
}
