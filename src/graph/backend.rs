//! Runtime selection between the graph backing stores.

use std::fmt::Debug;
use std::hash::Hash;

use serde::Serialize;

use crate::map::{MapConfig, MapKind};
use crate::types::{Route, VanetError, VanetResult, Weight};

use super::{Graph, ListGraph, MapGraph, RouteTable};

/// Which storage a graph is built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GraphBackend {
    /// Nested chained hash maps.
    Chained,
    /// Nested tree-bucketed hash maps.
    TreeBucketed,
    /// Vertex list with per-vertex edge lists.
    AdjacencyList,
}

impl GraphBackend {
    /// Every available backing.
    pub const ALL: [GraphBackend; 3] = [Self::Chained, Self::TreeBucketed, Self::AdjacencyList];

    /// Map strategy for the map-backed variants.
    pub fn map_kind(&self) -> Option<MapKind> {
        match self {
            Self::Chained => Some(MapKind::Chained),
            Self::TreeBucketed => Some(MapKind::TreeBucketed),
            Self::AdjacencyList => None,
        }
    }

    /// Return a human-readable name for this backing.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Chained => "chained",
            Self::TreeBucketed => "tree",
            Self::AdjacencyList => "list",
        }
    }

    /// Parse a backing from its name. Map strategy names are accepted too.
    pub fn from_name(name: &str) -> VanetResult<Self> {
        match name.to_lowercase().as_str() {
            "list" | "adjacency_list" | "adjacencylist" => Ok(Self::AdjacencyList),
            other => match MapKind::from_name(other) {
                Ok(MapKind::Chained) => Ok(Self::Chained),
                Ok(MapKind::TreeBucketed) => Ok(Self::TreeBucketed),
                Err(_) => Err(VanetError::UnsupportedMapType(name.to_string())),
            },
        }
    }

    /// Build an empty graph. `config` sizes the vertex map of map-backed variants
    /// (its `kind` is overridden) and is ignored by the adjacency list.
    pub fn build<K: Hash + Ord + Clone + Debug>(&self, config: MapConfig) -> VanetResult<AnyGraph<K>> {
        match self.map_kind() {
            Some(kind) => Ok(AnyGraph::Map(MapGraph::with_config(config.with_kind(kind))?)),
            None => Ok(AnyGraph::List(ListGraph::new())),
        }
    }
}

impl std::fmt::Display for GraphBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A graph of any backing, usable wherever a concrete `Graph` is.
#[derive(Debug, Clone)]
pub enum AnyGraph<K> {
    /// Map-backed graph (chained or tree-bucketed).
    Map(MapGraph<K>),
    /// Adjacency-list graph.
    List(ListGraph<K>),
}

impl<K: Hash + Ord + Clone + Debug> AnyGraph<K> {
    /// The backing this graph was built on.
    pub fn backend(&self) -> GraphBackend {
        match self {
            Self::Map(g) => match g.kind() {
                MapKind::Chained => GraphBackend::Chained,
                MapKind::TreeBucketed => GraphBackend::TreeBucketed,
            },
            Self::List(_) => GraphBackend::AdjacencyList,
        }
    }
}

impl<K: Hash + Ord + Clone + Debug> Graph<K> for AnyGraph<K> {
    fn add_vertex(&mut self, vertex: K) -> VanetResult<()> {
        match self {
            Self::Map(g) => g.add_vertex(vertex),
            Self::List(g) => g.add_vertex(vertex),
        }
    }

    fn add_edge(&mut self, source: K, destination: K, weight: Weight) -> VanetResult<()> {
        match self {
            Self::Map(g) => g.add_edge(source, destination, weight),
            Self::List(g) => g.add_edge(source, destination, weight),
        }
    }

    fn remove_vertex(&mut self, vertex: &K) -> VanetResult<()> {
        match self {
            Self::Map(g) => g.remove_vertex(vertex),
            Self::List(g) => g.remove_vertex(vertex),
        }
    }

    fn remove_edge(&mut self, source: &K, destination: &K) -> VanetResult<()> {
        match self {
            Self::Map(g) => g.remove_edge(source, destination),
            Self::List(g) => g.remove_edge(source, destination),
        }
    }

    fn routes_from(&self, source: &K) -> VanetResult<RouteTable<K>> {
        match self {
            Self::Map(g) => g.routes_from(source),
            Self::List(g) => g.routes_from(source),
        }
    }

    fn shortest_path(&self, source: &K, destination: &K) -> VanetResult<Option<Route<K>>> {
        match self {
            Self::Map(g) => g.shortest_path(source, destination),
            Self::List(g) => g.shortest_path(source, destination),
        }
    }

    fn vertices(&self) -> Vec<K> {
        match self {
            Self::Map(g) => g.vertices(),
            Self::List(g) => g.vertices(),
        }
    }

    fn vertex_count(&self) -> usize {
        match self {
            Self::Map(g) => g.vertex_count(),
            Self::List(g) => g.vertex_count(),
        }
    }

    fn edge_count(&self) -> usize {
        match self {
            Self::Map(g) => g.edge_count(),
            Self::List(g) => g.edge_count(),
        }
    }

    fn contains_vertex(&self, vertex: &K) -> bool {
        match self {
            Self::Map(g) => g.contains_vertex(vertex),
            Self::List(g) => g.contains_vertex(vertex),
        }
    }

    fn weight(&self, source: &K, destination: &K) -> Option<Weight> {
        match self {
            Self::Map(g) => g.weight(source, destination),
            Self::List(g) => g.weight(source, destination),
        }
    }

    fn neighbors(&self, vertex: &K) -> Vec<(K, Weight)> {
        match self {
            Self::Map(g) => g.neighbors(vertex),
            Self::List(g) => g.neighbors(vertex),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_names() {
        for backend in GraphBackend::ALL {
            assert_eq!(GraphBackend::from_name(backend.name()).unwrap(), backend);
        }
        assert_eq!(
            GraphBackend::from_name("linked_list").unwrap(),
            GraphBackend::Chained
        );
        assert!(matches!(
            GraphBackend::from_name("btree"),
            Err(VanetError::UnsupportedMapType(_))
        ));
    }

    #[test]
    fn test_build_reports_backend() {
        for backend in GraphBackend::ALL {
            let graph: AnyGraph<u32> = backend.build(MapConfig::default()).unwrap();
            assert_eq!(graph.backend(), backend);
        }
    }
}
