//! The result of a shortest-path query for a single destination.

use serde::Serialize;

use super::Distance;

/// Cumulative distance and the vertex sequence realizing it.
///
/// The path starts at the BFS source and ends at the destination itself, so the
/// route from a vertex to itself is `[source]` with distance 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route<K> {
    /// Sum of edge weights along `path`.
    pub distance: Distance,
    /// Vertices from source to destination, both inclusive.
    pub path: Vec<K>,
}

impl<K> Route<K> {
    /// Create a new route.
    pub fn new(distance: Distance, path: Vec<K>) -> Self {
        Self { distance, path }
    }

    /// Number of edges traversed.
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// First vertex of the path.
    pub fn source(&self) -> Option<&K> {
        self.path.first()
    }

    /// Last vertex of the path.
    pub fn destination(&self) -> Option<&K> {
        self.path.last()
    }
}

impl<K: std::fmt::Display> std::fmt::Display for Route<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, vertex) in self.path.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{}", vertex)?;
        }
        write!(f, " ({})", self.distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hops_and_endpoints() {
        let route = Route::new(12, vec!["A", "C", "D"]);
        assert_eq!(route.hops(), 2);
        assert_eq!(route.source(), Some(&"A"));
        assert_eq!(route.destination(), Some(&"D"));
        assert_eq!(route.to_string(), "A -> C -> D (12)");
    }

    #[test]
    fn test_trivial_route() {
        let route = Route::new(0, vec!["A"]);
        assert_eq!(route.hops(), 0);
        assert_eq!(route.source(), route.destination());
    }
}
