//! Tree-bucketed hash table: every bucket is an unbalanced binary search tree.

use std::cmp::Ordering;
use std::hash::Hash;

use crate::types::VanetResult;

use super::{KeyedMap, MapConfig, MapKind};

#[derive(Debug, Clone)]
struct TreeNode<K, V> {
    key: K,
    value: V,
    left: Option<usize>,
    right: Option<usize>,
}

impl<K, V> TreeNode<K, V> {
    fn leaf(key: K, value: V) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
        }
    }
}

/// Where a tree pointer lives: a bucket root or a node's child slot.
#[derive(Debug, Clone, Copy)]
enum Link {
    Root(usize),
    Left(usize),
    Right(usize),
}

/// Hash table whose buckets are binary search trees ordered by `K: Ord`.
///
/// Trees are not rebalanced: keys arriving in sorted order degrade a bucket into a
/// linked list with O(n) lookups.
#[derive(Debug, Clone)]
pub struct TreeMap<K, V> {
    /// Root node of each bucket's tree.
    roots: Vec<Option<usize>>,
    /// All live nodes.
    nodes: Vec<TreeNode<K, V>>,
    config: MapConfig,
}

impl<K: Hash + Ord, V> TreeMap<K, V> {
    /// Create a table with the default configuration.
    pub fn new() -> Self {
        Self::from_valid(MapConfig::new(MapKind::TreeBucketed))
    }

    /// Create a resizable table with `capacity` initial buckets.
    pub fn with_capacity(capacity: usize) -> VanetResult<Self> {
        Self::with_config(MapConfig::new(MapKind::TreeBucketed).with_capacity(capacity))
    }

    /// Create a table from a configuration, validating it first.
    pub fn with_config(config: MapConfig) -> VanetResult<Self> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    pub(crate) fn from_valid(config: MapConfig) -> Self {
        Self {
            roots: vec![None; config.capacity],
            nodes: Vec::new(),
            config: config.with_kind(MapKind::TreeBucketed),
        }
    }

    /// The configuration this table was built with (capacity is the initial one).
    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Depth of the deepest bucket tree (0 for an empty table).
    pub fn max_depth(&self) -> usize {
        self.roots
            .iter()
            .map(|&root| self.depth(root))
            .max()
            .unwrap_or(0)
    }

    fn depth(&self, root: Option<usize>) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(usize, usize)> = root.map(|id| (id, 1)).into_iter().collect();
        while let Some((id, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            let node = &self.nodes[id];
            stack.extend(node.left.map(|l| (l, depth + 1)));
            stack.extend(node.right.map(|r| (r, depth + 1)));
        }
        deepest
    }

    fn bucket_of(&self, key: &K) -> usize {
        self.config.hash_function.index(key, self.roots.len())
    }

    fn target(&self, link: Link) -> Option<usize> {
        match link {
            Link::Root(bucket) => self.roots[bucket],
            Link::Left(id) => self.nodes[id].left,
            Link::Right(id) => self.nodes[id].right,
        }
    }

    fn set_link(&mut self, link: Link, target: Option<usize>) {
        match link {
            Link::Root(bucket) => self.roots[bucket] = target,
            Link::Left(id) => self.nodes[id].left = target,
            Link::Right(id) => self.nodes[id].right = target,
        }
    }

    /// Descend towards `key` in `bucket`. Returns the link where the key is (or would
    /// be) attached.
    fn locate(&self, bucket: usize, key: &K) -> Link {
        let mut link = Link::Root(bucket);
        while let Some(id) = self.target(link) {
            link = match key.cmp(&self.nodes[id].key) {
                Ordering::Less => Link::Left(id),
                Ordering::Greater => Link::Right(id),
                Ordering::Equal => return link,
            };
        }
        link
    }

    fn find(&self, key: &K) -> Option<usize> {
        self.target(self.locate(self.bucket_of(key), key))
    }

    /// Remove an already detached node from the arena, repointing the link that
    /// referenced the node `swap_remove` moves into its slot.
    fn release(&mut self, id: usize) -> TreeNode<K, V> {
        let last = self.nodes.len() - 1;
        let moved_link = (id != last).then(|| {
            let key = &self.nodes[last].key;
            self.locate(self.bucket_of(key), key)
        });
        let node = self.nodes.swap_remove(id);
        if let Some(link) = moved_link {
            self.set_link(link, Some(id));
        }
        node
    }

    /// Swap key and value between two distinct nodes, leaving their links untouched.
    fn swap_payload(&mut self, a: usize, b: usize) {
        let (low, high) = if a < b { (a, b) } else { (b, a) };
        let (head, tail) = self.nodes.split_at_mut(high);
        let (x, y) = (&mut head[low], &mut tail[0]);
        std::mem::swap(&mut x.key, &mut y.key);
        std::mem::swap(&mut x.value, &mut y.value);
    }

    /// Pre-order node ids of one bucket's tree.
    fn preorder(&self, root: Option<usize>, out: &mut Vec<usize>) {
        let mut stack: Vec<usize> = root.into_iter().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            let node = &self.nodes[id];
            stack.extend(node.right);
            stack.extend(node.left);
        }
    }

    /// Double the bucket count and re-insert every node under the new capacity.
    ///
    /// Each old bucket is replayed in pre-order, so a subtree's root is re-inserted
    /// before its children.
    pub fn resize(&mut self) {
        let new_capacity = self.roots.len() * 2;
        let mut order = Vec::with_capacity(self.nodes.len());
        for &root in &self.roots {
            self.preorder(root, &mut order);
        }

        self.roots = vec![None; new_capacity];
        for node in &mut self.nodes {
            node.left = None;
            node.right = None;
        }
        for id in order {
            let bucket = self.bucket_of(&self.nodes[id].key);
            let link = self.locate(bucket, &self.nodes[id].key);
            self.set_link(link, Some(id));
        }

        log::debug!(
            "tree map resized {} -> {} buckets ({} entries)",
            new_capacity / 2,
            new_capacity,
            self.nodes.len()
        );
    }

    fn after_insert(&mut self) {
        let (size, capacity) = (self.nodes.len(), self.roots.len());
        if !self.config.over_threshold(size, capacity) {
            return;
        }
        if self.config.resizable {
            self.resize();
        } else if !self.config.over_threshold(size - 1, capacity) {
            log::warn!(
                "non-resizable tree map reached load factor {} ({} entries in {} buckets)",
                self.config.load_factor,
                size,
                capacity
            );
        }
    }
}

impl<K: Hash + Ord, V> Default for TreeMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Ord, V> KeyedMap<K, V> for TreeMap<K, V> {
    fn kind(&self) -> MapKind {
        MapKind::TreeBucketed
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn capacity(&self) -> usize {
        self.roots.len()
    }

    fn put(&mut self, key: K, value: V) -> Option<V> {
        let link = self.locate(self.bucket_of(&key), &key);
        if let Some(id) = self.target(link) {
            return Some(std::mem::replace(&mut self.nodes[id].value, value));
        }

        let id = self.nodes.len();
        self.nodes.push(TreeNode::leaf(key, value));
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
        let link = self.locate(self.bucket_of(key), key);
        let id = self.target(link)?;

        let detached = match (self.nodes[id].left, self.nodes[id].right) {
            (None, child) | (child, None) => {
                self.set_link(link, child);
                id
            }
            (Some(_), Some(right)) => {
                // In-order successor: leftmost node of the right subtree.
                let mut successor_link = Link::Right(id);
                let mut successor = right;
                while let Some(left) = self.nodes[successor].left {
                    successor_link = Link::Left(successor);
                    successor = left;
                }
                let successor_right = self.nodes[successor].right;
                self.set_link(successor_link, successor_right);
                self.swap_payload(id, successor);
                successor
            }
        };

        Some(self.release(detached).value)
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.roots.iter_mut().for_each(|root| *root = None);
    }

    fn iter<'a>(&'a self) -> Box<dyn Iterator<Item = (&'a K, &'a V)> + 'a>
    where
        K: 'a,
        V: 'a,
    {
        Box::new(Iter {
            map: self,
            bucket: 0,
            stack: Vec::new(),
        })
    }

    fn bucket_sizes(&self) -> Vec<usize> {
        let mut scratch = Vec::new();
        self.roots
            .iter()
            .map(|&root| {
                scratch.clear();
                self.preorder(root, &mut scratch);
                scratch.len()
            })
            .collect()
    }
}

/// Bucket-by-bucket, in-order iterator over a [`TreeMap`].
pub struct Iter<'a, K, V> {
    map: &'a TreeMap<K, V>,
    bucket: usize,
    stack: Vec<usize>,
}

impl<K, V> Iter<'_, K, V> {
    fn push_left_spine(&mut self, mut cursor: Option<usize>) {
        while let Some(id) = cursor {
            self.stack.push(id);
            cursor = self.map.nodes[id].left;
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(id) = self.stack.pop() {
                let node = &self.map.nodes[id];
                self.push_left_spine(node.right);
                return Some((&node.key, &node.value));
            }
            if self.bucket >= self.map.roots.len() {
                return None;
            }
            let root = self.map.roots[self.bucket];
            self.bucket += 1;
            self.push_left_spine(root);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Five buckets, modulus hashing, never resized: multiples of 5 share bucket 0.
    fn single_bucket_map() -> TreeMap<i32, &'static str> {
        TreeMap::with_config(
            MapConfig::new(MapKind::TreeBucketed)
                .with_capacity(5)
                .resizable(false),
        )
        .unwrap()
    }

    fn root_key(map: &TreeMap<i32, &'static str>, bucket: usize) -> Option<i32> {
        map.roots[bucket].map(|id| map.nodes[id].key)
    }

    fn child_key(map: &TreeMap<i32, &'static str>, bucket: usize, left: bool) -> Option<i32> {
        let root = map.roots[bucket]?;
        let child = if left {
            map.nodes[root].left
        } else {
            map.nodes[root].right
        };
        child.map(|id| map.nodes[id].key)
    }

    #[test]
    fn test_two_child_deletion_uses_successor() {
        let mut map = single_bucket_map();
        map.put(10, "ten");
        map.put(5, "five");
        map.put(15, "fifteen");

        assert_eq!(map.remove(&10), Some("ten"));
        assert_eq!(root_key(&map, 0), Some(15));
        assert_eq!(child_key(&map, 0, true), Some(5));
        assert_eq!(child_key(&map, 0, false), None);
        assert_eq!(map.get(&15), Some(&"fifteen"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_deep_successor_deletion() {
        let mut map = single_bucket_map();
        for k in [50, 25, 75, 60, 90, 55, 65] {
            map.put(k, "v");
        }
        map.remove(&50);
        assert_eq!(root_key(&map, 0), Some(55));
        assert_eq!(map.keys(), vec![&25, &55, &60, &65, &75, &90]);
    }

    #[test]
    fn test_leaf_and_single_child_deletion() {
        let mut map = single_bucket_map();
        for k in [10, 5, 15, 20] {
            map.put(k, "v");
        }
        assert_eq!(map.remove(&5), Some("v"));
        assert_eq!(child_key(&map, 0, true), None);
        assert_eq!(map.remove(&15), Some("v"));
        assert_eq!(child_key(&map, 0, false), Some(20));
        assert_eq!(map.remove(&15), None);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_in_order_within_bucket_not_global() {
        let mut map = single_bucket_map();
        for k in [21, 10, 1, 5, 16] {
            map.put(k, "v");
        }
        // Bucket 0: 5, 10; bucket 1: 1, 16, 21.
        assert_eq!(map.keys(), vec![&5, &10, &1, &16, &21]);
    }

    #[test]
    fn test_sorted_inserts_degrade_to_list() {
        let mut map = single_bucket_map();
        for k in (0..10).map(|i| i * 5) {
            map.put(k, "v");
        }
        assert_eq!(map.max_depth(), 10);
    }

    #[test]
    fn test_resize_preserves_entries() {
        let mut map: TreeMap<u32, u32> = TreeMap::with_capacity(2).unwrap();
        for k in 0..100 {
            map.put(k, k * 3);
        }
        assert!(map.capacity() >= 128);
        for k in 0..100 {
            assert_eq!(map.get(&k), Some(&(k * 3)));
        }
    }

    #[test]
    fn test_removal_after_arena_moves() {
        let mut map = single_bucket_map();
        let keys = [40, 20, 60, 10, 30, 50, 70, 35, 45];
        for k in keys {
            map.put(k, "v");
        }
        for k in [40, 20, 70] {
            assert_eq!(map.remove(&k), Some("v"));
        }
        for k in [60, 10, 30, 50, 35, 45] {
            assert!(map.contains_key(&k), "lost key {}", k);
        }
        assert_eq!(map.keys(), vec![&10, &30, &35, &45, &50, &60]);
    }
}
