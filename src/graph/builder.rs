//! Fluent API for building graphs of any backing.

use std::fmt::Debug;
use std::hash::Hash;

use crate::hash::HashFunction;
use crate::map::MapConfig;
use crate::types::{VanetResult, Weight};

use super::{AnyGraph, Graph, GraphBackend};

/// Fluent builder for constructing an [`AnyGraph`].
///
/// Vertices are inserted before edges, so edges between declared vertices also work on
/// the adjacency-list backing.
pub struct GraphBuilder<K> {
    backend: GraphBackend,
    config: MapConfig,
    vertices: Vec<K>,
    edges: Vec<(K, K, Weight)>,
}

impl<K: Hash + Ord + Clone + Debug> GraphBuilder<K> {
    /// Create a new builder for a chained-map graph with default table settings.
    pub fn new() -> Self {
        Self::with_backend(GraphBackend::Chained)
    }

    /// Create a new builder for a specific backing.
    pub fn with_backend(backend: GraphBackend) -> Self {
        Self {
            backend,
            config: MapConfig::default(),
            vertices: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Set the backing.
    pub fn backend(mut self, backend: GraphBackend) -> Self {
        self.backend = backend;
        self
    }

    /// Set the initial capacity of the vertex map.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.config = self.config.with_capacity(capacity);
        self
    }

    /// Set the load factor of the vertex map.
    pub fn load_factor(mut self, load_factor: f32) -> Self {
        self.config = self.config.with_load_factor(load_factor);
        self
    }

    /// Enable or disable automatic resizing of the vertex map.
    pub fn resizable(mut self, resizable: bool) -> Self {
        self.config = self.config.resizable(resizable);
        self
    }

    /// Set the bucket hash function for every map in the graph.
    pub fn hash_function(mut self, hash_function: HashFunction) -> Self {
        self.config = self.config.with_hash_function(hash_function);
        self
    }

    /// Add a vertex.
    pub fn vertex(mut self, vertex: K) -> Self {
        self.vertices.push(vertex);
        self
    }

    /// Add an undirected edge. Its endpoints are declared as vertices too.
    pub fn edge(mut self, source: K, destination: K, weight: Weight) -> Self {
        self.vertices.push(source.clone());
        self.vertices.push(destination.clone());
        self.edges.push((source, destination, weight));
        self
    }

    /// Build the final graph.
    pub fn build(self) -> VanetResult<AnyGraph<K>> {
        let mut graph = self.backend.build(self.config)?;
        for vertex in self.vertices {
            graph.add_vertex(vertex)?;
        }
        for (source, destination, weight) in self.edges {
            graph.add_edge(source, destination, weight)?;
        }
        Ok(graph)
    }
}

impl<K: Hash + Ord + Clone + Debug> Default for GraphBuilder<K> {
    fn default() -> Self {
        Self::new()
    }
}
