//! vanet-graph: keyed hash maps and weighted graphs for VANET simulation.
//!
//! Two separately chained hash maps (bucket chains as linked lists or as binary search
//! trees) with pluggable hash functions back an undirected weighted graph whose vertices
//! are vehicles. An adjacency-list graph offers the same contract for comparison. Routes
//! are found with a weighted breadth-first search.

pub mod cli;
pub mod gen;
pub mod graph;
pub mod hash;
pub mod map;
pub mod types;

// Re-export commonly used types at the crate root
pub use graph::{
    weighted_bfs, AnyGraph, Graph, GraphBackend, GraphBuilder, ListGraph, MapGraph, RouteTable,
};
pub use hash::{collision_rate, collision_report, key_hash, CollisionReport, HashFunction};
pub use map::{BackingMap, BucketStats, ChainedMap, KeyedMap, MapConfig, MapKind, TreeMap};
pub use types::{
    Distance, Link, Route, VanetError, VanetResult, Vehicle, Weight, DEFAULT_CAPACITY,
    DEFAULT_LOAD_FACTOR, DEFAULT_RESIZABLE,
};
