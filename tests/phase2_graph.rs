//! Phase 2 tests: Graph backings + weighted BFS routing.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use vanet_graph::graph::{AnyGraph, Graph, GraphBackend, GraphBuilder, ListGraph, MapGraph};
use vanet_graph::map::{KeyedMap, MapConfig, MapKind};
use vanet_graph::types::{Route, VanetError};

fn empty(backend: GraphBackend) -> AnyGraph<&'static str> {
    backend.build(MapConfig::default()).unwrap()
}

/// The five-vertex scenario graph: A-B(7), A-C(5), A-D(6), A-E(6), B-D(1).
fn scenario(backend: GraphBackend) -> AnyGraph<&'static str> {
    let mut graph = empty(backend);
    for v in ["A", "B", "C", "D", "E"] {
        graph.add_vertex(v).unwrap();
    }
    graph.add_edge("A", "B", 7).unwrap();
    graph.add_edge("A", "C", 5).unwrap();
    graph.add_edge("A", "D", 6).unwrap();
    graph.add_edge("A", "E", 6).unwrap();
    graph.add_edge("B", "D", 1).unwrap();
    graph
}

// ==================== Mutation Tests ====================

#[test]
fn test_add_edge_symmetric() {
    for backend in GraphBackend::ALL {
        let graph = scenario(backend);
        assert_eq!(graph.weight(&"A", &"B"), Some(7));
        assert_eq!(graph.weight(&"B", &"A"), Some(7));
        assert_eq!(graph.weight(&"D", &"B"), Some(1));
        assert_eq!(graph.weight(&"C", &"E"), None);
        assert_eq!(graph.edge_count(), 5);
        assert_eq!(graph.vertex_count(), 5);
    }
}

#[test]
fn test_remove_edge_both_directions() {
    for backend in GraphBackend::ALL {
        let mut graph = scenario(backend);
        graph.remove_edge(&"B", &"A").unwrap();
        assert_eq!(graph.weight(&"A", &"B"), None);
        assert_eq!(graph.weight(&"B", &"A"), None);
        assert_eq!(graph.edge_count(), 4);
        assert!(graph.contains_vertex(&"A"));
        assert!(graph.contains_vertex(&"B"));
    }
}

#[test]
fn test_remove_vertex_cascades() {
    for backend in GraphBackend::ALL {
        let mut graph = scenario(backend);
        graph.remove_vertex(&"A").unwrap();
        assert!(!graph.contains_vertex(&"A"));
        assert_eq!(graph.vertex_count(), 4);
        assert_eq!(graph.edge_count(), 1);
        for v in graph.vertices() {
            assert!(graph.neighbors(&v).iter().all(|(n, _)| *n != "A"));
        }
    }
}

#[test]
fn test_map_graph_idempotent_removal() {
    for kind in MapKind::ALL {
        let mut graph = MapGraph::new(kind);
        graph.add_edge("A", "B", 3).unwrap();
        graph.remove_vertex(&"Z").unwrap();
        graph.remove_edge(&"A", &"Z").unwrap();
        graph.remove_edge(&"Y", &"Z").unwrap();
        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.edge_count(), 1);

        graph.remove_edge(&"A", &"B").unwrap();
        graph.remove_edge(&"A", &"B").unwrap();
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.vertex_count(), 2);
    }
}

#[test]
fn test_map_graph_auto_creates_vertices() {
    let mut graph = MapGraph::new(MapKind::Chained);
    graph.add_edge(1u32, 2, 10).unwrap();
    assert!(graph.contains_vertex(&1));
    assert!(graph.contains_vertex(&2));
    graph.add_vertex(1).unwrap();
    assert_eq!(graph.weight(&1, &2), Some(10));
}

#[test]
fn test_list_graph_vertex_not_found() {
    let mut graph: ListGraph<u32> = ListGraph::new();
    graph.add_vertex(1).unwrap();
    assert!(matches!(graph.add_edge(1, 2, 5), Err(VanetError::VertexNotFound(_))));
    assert!(matches!(graph.remove_edge(&1, &2), Err(VanetError::VertexNotFound(_))));
    assert!(matches!(graph.remove_vertex(&2), Err(VanetError::VertexNotFound(_))));
    assert!(matches!(graph.routes_from(&2), Err(VanetError::VertexNotFound(_))));
    assert_eq!(graph.vertex_count(), 1);
}

#[test]
fn test_inner_maps_follow_graph_kind() {
    for kind in MapKind::ALL {
        let mut graph = MapGraph::with_config(MapConfig::new(kind).with_capacity(2)).unwrap();
        for i in 0..20u32 {
            graph.add_edge(i, i + 1, 1).unwrap();
        }
        assert_eq!(graph.adjacency().kind(), kind);
        for neighbors in graph.adjacency().values() {
            assert_eq!(neighbors.kind(), kind);
        }
    }
}

// ==================== BFS Tests ====================

#[test]
fn test_scenario_shortest_path() {
    for backend in GraphBackend::ALL {
        let graph = scenario(backend);
        let route = graph.shortest_path(&"A", &"C").unwrap().unwrap();
        assert_eq!(route.distance, 5);
        assert_eq!(route.destination(), Some(&"C"));
        assert_eq!(route.path, vec!["A", "C"]);

        let route = graph.shortest_path(&"A", &"D").unwrap().unwrap();
        assert_eq!(route, Route::new(6, vec!["A", "D"]));
    }
}

#[test]
fn test_source_to_itself() {
    for backend in GraphBackend::ALL {
        let graph = scenario(backend);
        let route = graph.shortest_path(&"B", &"B").unwrap().unwrap();
        assert_eq!(route.distance, 0);
        assert_eq!(route.path, vec!["B"]);
    }
}

#[test]
fn test_unreachable_is_none() {
    for backend in GraphBackend::ALL {
        let mut graph = scenario(backend);
        graph.add_vertex("F").unwrap();
        assert_eq!(graph.shortest_path(&"A", &"F").unwrap(), None);
        let routes = graph.routes_from(&"A").unwrap();
        assert_eq!(routes.len(), 5);
        assert!(!routes.contains_key(&"F"));
    }
}

#[test]
fn test_map_graph_unknown_source_has_no_routes() {
    let graph: MapGraph<u32> = MapGraph::new(MapKind::TreeBucketed);
    assert!(graph.routes_from(&9).unwrap().is_empty());
    assert_eq!(graph.shortest_path(&9, &9).unwrap(), None);
}

#[test]
fn test_distance_monotone_along_paths() {
    let mut rng = StdRng::seed_from_u64(99);
    for backend in GraphBackend::ALL {
        let mut graph: AnyGraph<u32> = backend.build(MapConfig::default()).unwrap();
        for v in 0..40u32 {
            graph.add_vertex(v).unwrap();
        }
        for _ in 0..120 {
            let u = rng.gen_range(0..40u32);
            let v = rng.gen_range(0..40u32);
            graph.add_edge(u, v, rng.gen_range(1..=50)).unwrap();
        }

        let routes = graph.routes_from(&0).unwrap();
        for (vertex, route) in routes.iter() {
            assert_eq!(route.source(), Some(&0));
            assert_eq!(route.destination(), Some(vertex));
            // Every hop is a real edge.
            for hop in route.path.windows(2) {
                assert!(graph.weight(&hop[0], &hop[1]).is_some());
            }
            // The parent on the path is never farther than the vertex itself.
            if route.path.len() >= 2 {
                let parent = &route.path[route.path.len() - 2];
                let parent_route = routes.get(parent).unwrap();
                assert!(parent_route.distance <= route.distance);
            }
        }
    }
}

#[test]
fn test_backings_agree() {
    let mut rng = StdRng::seed_from_u64(5);
    let edges: Vec<(u32, u32, u32)> = (0..80)
        .map(|_| (rng.gen_range(0..25), rng.gen_range(0..25), rng.gen_range(1..=20)))
        .collect();

    let mut graphs: Vec<AnyGraph<u32>> = GraphBackend::ALL
        .iter()
        .map(|b| b.build(MapConfig::default()).unwrap())
        .collect();
    for graph in &mut graphs {
        for v in 0..25u32 {
            graph.add_vertex(v).unwrap();
        }
        for &(u, v, w) in &edges {
            graph.add_edge(u, v, w).unwrap();
        }
    }

    let reference = &graphs[0];
    for graph in &graphs[1..] {
        assert_eq!(graph.edge_count(), reference.edge_count());
        for u in 0..25u32 {
            for v in 0..25u32 {
                assert_eq!(graph.weight(&u, &v), reference.weight(&u, &v));
            }
            let mut ours: Vec<u32> = graph.routes_from(&u).unwrap().keys().into_iter().copied().collect();
            let mut theirs: Vec<u32> =
                reference.routes_from(&u).unwrap().keys().into_iter().copied().collect();
            ours.sort();
            theirs.sort();
            assert_eq!(ours, theirs);
        }
    }
}

// ==================== Builder Tests ====================

#[test]
fn test_builder_with_settings() {
    let graph = GraphBuilder::with_backend(GraphBackend::TreeBucketed)
        .capacity(2)
        .load_factor(0.5)
        .hash_function(vanet_graph::hash::HashFunction::XorFold)
        .edge("A", "B", 4)
        .edge("B", "C", 4)
        .build()
        .unwrap();
    let route = graph.shortest_path(&"A", &"C").unwrap().unwrap();
    assert_eq!(route.distance, 8);
    assert_eq!(route.hops(), 2);
}

#[test]
fn test_backend_from_name_rejects_unknown() {
    assert!(matches!(
        GraphBackend::from_name("matrix"),
        Err(VanetError::UnsupportedMapType(_))
    ));
    assert_eq!(
        GraphBackend::from_name("list").unwrap(),
        GraphBackend::AdjacencyList
    );
}
