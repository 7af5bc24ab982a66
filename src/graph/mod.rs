//! Undirected weighted graphs and BFS routing over them.

pub mod backend;
pub mod builder;
pub mod list_graph;
pub mod map_graph;
pub mod traversal;

use std::fmt::Debug;
use std::hash::Hash;

use crate::map::KeyedMap;
use crate::types::{Route, VanetResult, Weight};

pub use backend::{AnyGraph, GraphBackend};
pub use builder::GraphBuilder;
pub use list_graph::{ListEdge, ListGraph};
pub use map_graph::{AdjacencyMap, MapGraph};
pub use traversal::{weighted_bfs, RouteTable};

/// The graph contract shared by every backing store.
///
/// Edges are undirected: after `add_edge(u, v, w)` both `weight(u, v)` and
/// `weight(v, u)` are `Some(w)`, and `remove_edge` drops both directions.
pub trait Graph<K: Hash + Ord + Clone + Debug> {
    /// Insert a vertex with no edges. No-op if it is already present.
    fn add_vertex(&mut self, vertex: K) -> VanetResult<()>;

    /// Connect two vertices, replacing the weight of an existing edge.
    fn add_edge(&mut self, source: K, destination: K, weight: Weight) -> VanetResult<()>;

    /// Remove a vertex together with every edge touching it.
    fn remove_vertex(&mut self, vertex: &K) -> VanetResult<()>;

    /// Remove the edge between two vertices in both directions.
    fn remove_edge(&mut self, source: &K, destination: &K) -> VanetResult<()>;

    /// Run the weighted BFS from `source` and return the route to every reached vertex.
    fn routes_from(&self, source: &K) -> VanetResult<RouteTable<K>>;

    /// Route from `source` to `destination`, or `None` when it is unreachable.
    fn shortest_path(&self, source: &K, destination: &K) -> VanetResult<Option<Route<K>>> {
        Ok(self.routes_from(source)?.remove(destination))
    }

    /// All vertices, in the backing store's iteration order.
    fn vertices(&self) -> Vec<K>;

    /// Number of vertices.
    fn vertex_count(&self) -> usize;

    /// Number of undirected edges.
    fn edge_count(&self) -> usize;

    /// Whether `vertex` is present.
    fn contains_vertex(&self, vertex: &K) -> bool;

    /// Weight of the edge between two vertices.
    fn weight(&self, source: &K, destination: &K) -> Option<Weight>;

    /// Weighted neighbors of `vertex` (empty for an unknown vertex).
    fn neighbors(&self, vertex: &K) -> Vec<(K, Weight)>;
}
