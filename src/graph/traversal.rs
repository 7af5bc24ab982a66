//! Weighted breadth-first search producing a route per reachable vertex.
//!
//! Each vertex is dequeued exactly once. A vertex's distance is set when it is first
//! discovered and is lowered later only if a cheaper edge from another dequeued vertex
//! reaches it. The lowered distance is not propagated to vertices already discovered
//! through it, so on non-uniform weights the result is not a general shortest-path tree.

use std::collections::{HashSet, VecDeque};
use std::hash::Hash;

use crate::map::{ChainedMap, KeyedMap};
use crate::types::{Distance, Route, Weight};

/// Per-destination routes from one BFS source.
pub type RouteTable<K> = ChainedMap<K, Route<K>>;

/// Run the weighted BFS from `source`, asking `neighbors` for the weighted edges of
/// each dequeued vertex.
///
/// Every reached vertex gets a route whose path starts at `source` and ends at the
/// vertex itself. Unreached vertices have no entry.
pub fn weighted_bfs<N, F>(source: N, mut neighbors: F) -> RouteTable<N>
where
    N: Hash + Eq + Clone,
    F: FnMut(&N) -> Vec<(N, Weight)>,
{
    let mut routes: RouteTable<N> = ChainedMap::new();
    let mut visited: HashSet<N> = HashSet::new();
    let mut queue: VecDeque<N> = VecDeque::new();

    visited.insert(source.clone());
    queue.push_back(source.clone());
    routes.put(source, Route::new(0, Vec::new()));

    while let Some(current) = queue.pop_front() {
        let (base_distance, mut via) = match routes.get(&current) {
            Some(route) => (route.distance, route.path.clone()),
            None => continue,
        };
        via.push(current.clone());

        for (neighbor, weight) in neighbors(&current) {
            let candidate = base_distance + Distance::from(weight);
            if visited.insert(neighbor.clone()) {
                queue.push_back(neighbor.clone());
                routes.put(neighbor, Route::new(candidate, via.clone()));
            } else if let Some(route) = routes.get_mut(&neighbor) {
                if route.distance > candidate {
                    route.distance = candidate;
                    route.path = via.clone();
                }
            }
        }
    }

    // Close every path with its own destination.
    let reached: Vec<N> = routes.keys().into_iter().cloned().collect();
    for vertex in reached {
        if let Some(route) = routes.get_mut(&vertex) {
            route.path.push(vertex);
        }
    }

    log::debug!("weighted bfs reached {} vertices", routes.len());
    routes
}
