//! Undirected weighted graph stored as nested keyed maps: vertex -> (neighbor -> weight).

use std::fmt::Debug;
use std::hash::Hash;

use crate::map::{BackingMap, KeyedMap, MapConfig, MapKind};
use crate::types::{VanetResult, Weight};

use super::traversal::{weighted_bfs, RouteTable};
use super::Graph;

/// Adjacency map of a [`MapGraph`].
pub type AdjacencyMap<K> = BackingMap<K, BackingMap<K, Weight>>;

/// Undirected weighted graph backed by a [`BackingMap`] of [`BackingMap`]s.
///
/// The outer (vertex) map and every inner (neighbor) map share one collision strategy.
/// Mutations keep the adjacency symmetric: `u -> v` is stored iff `v -> u` is stored,
/// with the same weight. Missing vertices are created by `add_edge`, and removing an
/// absent vertex or edge is a silent no-op.
#[derive(Debug, Clone)]
pub struct MapGraph<K> {
    adjacency: AdjacencyMap<K>,
    /// Configuration used for every newly created inner map.
    inner_config: MapConfig,
}

impl<K: Hash + Ord + Clone + Debug> MapGraph<K> {
    /// Create an empty graph with default table settings for the given strategy.
    pub fn new(kind: MapKind) -> Self {
        let config = MapConfig::new(kind);
        Self {
            adjacency: BackingMap::from_valid(config),
            inner_config: config,
        }
    }

    /// Create an empty graph whose vertex map uses `config`.
    ///
    /// Inner maps use the same strategy and hash function with default capacity and
    /// growth settings.
    pub fn with_config(config: MapConfig) -> VanetResult<Self> {
        let inner = MapConfig::new(config.kind).with_hash_function(config.hash_function);
        Self::with_configs(config, inner)
    }

    /// Create an empty graph with explicit vertex-map and neighbor-map configurations.
    /// The neighbor maps always take the vertex map's strategy.
    pub fn with_configs(outer: MapConfig, inner: MapConfig) -> VanetResult<Self> {
        let inner = inner.with_kind(outer.kind);
        inner.validate()?;
        Ok(Self {
            adjacency: BackingMap::with_config(outer)?,
            inner_config: inner,
        })
    }

    /// Collision strategy of the vertex map and every neighbor map.
    pub fn kind(&self) -> MapKind {
        self.adjacency.kind()
    }

    /// The adjacency map, for read-only inspection.
    pub fn adjacency(&self) -> &AdjacencyMap<K> {
        &self.adjacency
    }

    fn empty_neighbors(&self) -> BackingMap<K, Weight> {
        BackingMap::from_valid(self.inner_config)
    }

    fn ensure_vertex(&mut self, vertex: &K) {
        if !self.adjacency.contains_key(vertex) {
            let neighbors = self.empty_neighbors();
            self.adjacency.put(vertex.clone(), neighbors);
        }
    }
}

impl<K: Hash + Ord + Clone + Debug> Graph<K> for MapGraph<K> {
    fn add_vertex(&mut self, vertex: K) -> VanetResult<()> {
        self.ensure_vertex(&vertex);
        Ok(())
    }

    fn add_edge(&mut self, source: K, destination: K, weight: Weight) -> VanetResult<()> {
        self.ensure_vertex(&source);
        self.ensure_vertex(&destination);
        if let Some(neighbors) = self.adjacency.get_mut(&source) {
            neighbors.put(destination.clone(), weight);
        }
        if let Some(neighbors) = self.adjacency.get_mut(&destination) {
            neighbors.put(source, weight);
        }
        Ok(())
    }

    fn remove_vertex(&mut self, vertex: &K) -> VanetResult<()> {
        let Some(neighbors) = self.adjacency.remove(vertex) else {
            return Ok(());
        };
        for neighbor in neighbors.keys() {
            if let Some(back) = self.adjacency.get_mut(neighbor) {
                back.remove(vertex);
            }
        }
        log::trace!(
            "removed vertex {:?} and {} incident edges",
            vertex,
            neighbors.len()
        );
        Ok(())
    }

    fn remove_edge(&mut self, source: &K, destination: &K) -> VanetResult<()> {
        let present = self
            .adjacency
            .get(source)
            .is_some_and(|neighbors| neighbors.contains_key(destination));
        if present {
            if let Some(neighbors) = self.adjacency.get_mut(source) {
                neighbors.remove(destination);
            }
            if let Some(neighbors) = self.adjacency.get_mut(destination) {
                neighbors.remove(source);
            }
        }
        Ok(())
    }

    fn routes_from(&self, source: &K) -> VanetResult<RouteTable<K>> {
        if !self.adjacency.contains_key(source) {
            return Ok(RouteTable::new());
        }
        Ok(weighted_bfs(source.clone(), |current| self.neighbors(current)))
    }

    fn vertices(&self) -> Vec<K> {
        self.adjacency.keys().into_iter().cloned().collect()
    }

    fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    fn edge_count(&self) -> usize {
        let mut endpoints = 0;
        let mut loops = 0;
        for (vertex, neighbors) in self.adjacency.iter() {
            endpoints += neighbors.len();
            if neighbors.contains_key(vertex) {
                loops += 1;
            }
        }
        (endpoints + loops) / 2
    }

    fn contains_vertex(&self, vertex: &K) -> bool {
        self.adjacency.contains_key(vertex)
    }

    fn weight(&self, source: &K, destination: &K) -> Option<Weight> {
        self.adjacency
            .get(source)
            .and_then(|neighbors| neighbors.get(destination))
            .copied()
    }

    fn neighbors(&self, vertex: &K) -> Vec<(K, Weight)> {
        self.adjacency
            .get(vertex)
            .map(|neighbors| neighbors.iter().map(|(k, w)| (k.clone(), *w)).collect())
            .unwrap_or_default()
    }
}
