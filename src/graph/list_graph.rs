//! Undirected weighted graph stored as an indexed vertex list plus per-vertex edge lists.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use serde::Serialize;

use crate::map::KeyedMap;
use crate::types::{Route, VanetError, VanetResult, Weight};

use super::traversal::{weighted_bfs, RouteTable};
use super::Graph;

/// One side of an undirected edge, owned by the edge list of the other endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListEdge<K> {
    /// The vertex at the far end.
    pub neighbor: K,
    /// Edge weight.
    pub weight: Weight,
}

impl<K> ListEdge<K> {
    /// Create a new edge record.
    pub fn new(neighbor: K, weight: Weight) -> Self {
        Self { neighbor, weight }
    }
}

/// Adjacency-list graph: `vertices[i]` owns the edge list `adjacency[i]`.
///
/// Vertex lookups scan the vertex list. Edge operations on an unknown vertex fail with
/// [`VertexNotFound`](VanetError::VertexNotFound) instead of creating it.
#[derive(Debug, Clone)]
pub struct ListGraph<K> {
    vertices: Vec<K>,
    adjacency: Vec<Vec<ListEdge<K>>>,
}

impl<K: Hash + Ord + Clone + Debug> ListGraph<K> {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            adjacency: Vec::new(),
        }
    }

    /// Position of `vertex` in the vertex list.
    pub fn index_of(&self, vertex: &K) -> Option<usize> {
        self.vertices.iter().position(|v| v == vertex)
    }

    /// Edge list of `vertex`.
    pub fn edges(&self, vertex: &K) -> VanetResult<&[ListEdge<K>]> {
        let index = self.require(vertex)?;
        Ok(&self.adjacency[index])
    }

    fn require(&self, vertex: &K) -> VanetResult<usize> {
        self.index_of(vertex)
            .ok_or_else(|| VanetError::vertex_not_found(vertex))
    }

    /// Set the weight of `neighbor` in the edge list at `index`, appending if absent.
    fn upsert(&mut self, index: usize, neighbor: &K, weight: Weight) {
        let list = &mut self.adjacency[index];
        match list.iter_mut().find(|edge| edge.neighbor == *neighbor) {
            Some(edge) => edge.weight = weight,
            None => list.push(ListEdge::new(neighbor.clone(), weight)),
        }
    }
}

impl<K: Hash + Ord + Clone + Debug> Default for ListGraph<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Ord + Clone + Debug> Graph<K> for ListGraph<K> {
    fn add_vertex(&mut self, vertex: K) -> VanetResult<()> {
        if self.index_of(&vertex).is_none() {
            self.vertices.push(vertex);
            self.adjacency.push(Vec::new());
        }
        Ok(())
    }

    fn add_edge(&mut self, source: K, destination: K, weight: Weight) -> VanetResult<()> {
        let source_index = self.require(&source)?;
        let destination_index = self.require(&destination)?;
        self.upsert(source_index, &destination, weight);
        if source_index != destination_index {
            self.upsert(destination_index, &source, weight);
        }
        Ok(())
    }

    fn remove_vertex(&mut self, vertex: &K) -> VanetResult<()> {
        let index = self.require(vertex)?;
        for list in &mut self.adjacency {
            list.retain(|edge| edge.neighbor != *vertex);
        }
        self.vertices.remove(index);
        self.adjacency.remove(index);
        Ok(())
    }

    fn remove_edge(&mut self, source: &K, destination: &K) -> VanetResult<()> {
        let source_index = self.require(source)?;
        let destination_index = self.require(destination)?;
        self.adjacency[source_index].retain(|edge| edge.neighbor != *destination);
        self.adjacency[destination_index].retain(|edge| edge.neighbor != *source);
        Ok(())
    }

    fn routes_from(&self, source: &K) -> VanetResult<RouteTable<K>> {
        let start = self.require(source)?;
        let lookup: HashMap<&K, usize> = self
            .vertices
            .iter()
            .enumerate()
            .map(|(i, v)| (v, i))
            .collect();

        let by_index = weighted_bfs(start, |&current| {
            self.adjacency[current]
                .iter()
                .filter_map(|edge| lookup.get(&edge.neighbor).map(|&j| (j, edge.weight)))
                .collect()
        });

        let mut routes = RouteTable::new();
        for (&index, route) in by_index.iter() {
            let path = route.path.iter().map(|&i| self.vertices[i].clone()).collect();
            routes.put(
                self.vertices[index].clone(),
                Route::new(route.distance, path),
            );
        }
        Ok(routes)
    }

    fn vertices(&self) -> Vec<K> {
        self.vertices.clone()
    }

    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn edge_count(&self) -> usize {
        let mut endpoints = 0;
        let mut loops = 0;
        for (vertex, list) in self.vertices.iter().zip(&self.adjacency) {
            endpoints += list.len();
            loops += list.iter().filter(|edge| edge.neighbor == *vertex).count();
        }
        (endpoints + loops) / 2
    }

    fn contains_vertex(&self, vertex: &K) -> bool {
        self.index_of(vertex).is_some()
    }

    fn weight(&self, source: &K, destination: &K) -> Option<Weight> {
        let index = self.index_of(source)?;
        self.adjacency[index]
            .iter()
            .find(|edge| edge.neighbor == *destination)
            .map(|edge| edge.weight)
    }

    fn neighbors(&self, vertex: &K) -> Vec<(K, Weight)> {
        self.index_of(vertex)
            .map(|index| {
                self.adjacency[index]
                    .iter()
                    .map(|edge| (edge.neighbor.clone(), edge.weight))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_edge_requires_vertices() {
        let mut graph = ListGraph::new();
        graph.add_vertex("A").unwrap();
        assert!(matches!(
            graph.add_edge("A", "B", 1),
            Err(VanetError::VertexNotFound(_))
        ));
        assert!(graph.edges(&"A").unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_vertex_ignored() {
        let mut graph = ListGraph::new();
        graph.add_vertex(7u32).unwrap();
        graph.add_vertex(7).unwrap();
        assert_eq!(graph.vertex_count(), 1);
    }

    #[test]
    fn test_repeated_edge_updates_weight() {
        let mut graph = ListGraph::new();
        graph.add_vertex("A").unwrap();
        graph.add_vertex("B").unwrap();
        graph.add_edge("A", "B", 4).unwrap();
        graph.add_edge("B", "A", 9).unwrap();
        assert_eq!(graph.edges(&"A").unwrap(), &[ListEdge::new("B", 9)]);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_remove_vertex_reindexes() {
        let mut graph = ListGraph::new();
        for v in ["A", "B", "C"] {
            graph.add_vertex(v).unwrap();
        }
        graph.add_edge("A", "C", 2).unwrap();
        graph.add_edge("B", "C", 1).unwrap();
        graph.remove_vertex(&"A").unwrap();

        assert_eq!(graph.vertices(), vec!["B", "C"]);
        assert_eq!(graph.index_of(&"C"), Some(1));
        assert_eq!(graph.edges(&"C").unwrap(), &[ListEdge::new("B", 1)]);
        assert!(matches!(
            graph.remove_vertex(&"A"),
            Err(VanetError::VertexNotFound(_))
        ));
    }

    #[test]
    fn test_routes_translate_indices() {
        let mut graph = ListGraph::new();
        for v in ["X", "Y", "Z"] {
            graph.add_vertex(v).unwrap();
        }
        graph.add_edge("X", "Y", 2).unwrap();
        graph.add_edge("Y", "Z", 3).unwrap();
        let route = graph.shortest_path(&"X", &"Z").unwrap();
        assert_eq!(route, Some(Route::new(5, vec!["X", "Y", "Z"])));
    }
}
