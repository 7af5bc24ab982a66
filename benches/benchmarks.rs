//! Criterion benchmarks for vanet-graph.

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use vanet_graph::gen::{generate_links, generate_vehicles, populate};
use vanet_graph::graph::{AnyGraph, Graph, GraphBackend};
use vanet_graph::hash::HashFunction;
use vanet_graph::map::{BackingMap, KeyedMap, MapConfig, MapKind};
use vanet_graph::types::{Link, Vehicle};

/// Populate a fresh graph of the given backing.
fn make_graph(backend: GraphBackend, vehicles: &[Vehicle], links: &[Link]) -> AnyGraph<Vehicle> {
    let mut graph = backend.build(MapConfig::default()).unwrap();
    populate(&mut graph, vehicles, links).unwrap();
    graph
}

fn make_fleet(count: usize) -> (Vec<Vehicle>, Vec<Link>) {
    let mut rng = StdRng::seed_from_u64(0xBEEF);
    let vehicles = generate_vehicles(count, &mut rng);
    let links = generate_links(&vehicles, &mut rng);
    (vehicles, links)
}

fn bench_map_put(c: &mut Criterion) {
    for kind in MapKind::ALL {
        for hf in HashFunction::ALL {
            let config = MapConfig::new(kind).with_hash_function(hf);
            c.bench_function(&format!("put_10k_{}_{}", kind, hf), |b| {
                b.iter(|| {
                    let mut map: BackingMap<u64, u64> = BackingMap::with_config(config).unwrap();
                    for i in 0..10_000u64 {
                        map.put(i, i);
                    }
                    map
                })
            });
        }
    }
}

fn bench_map_get(c: &mut Criterion) {
    for kind in MapKind::ALL {
        for hf in HashFunction::ALL {
            let config = MapConfig::new(kind).with_hash_function(hf);
            let mut map: BackingMap<u64, u64> = BackingMap::with_config(config).unwrap();
            for i in 0..10_000u64 {
                map.put(i, i);
            }
            c.bench_function(&format!("get_from_10k_{}_{}", kind, hf), |b| {
                let mut rng = StdRng::seed_from_u64(1);
                b.iter(|| {
                    let key = rng.gen_range(0..10_000u64);
                    map.get(&key).copied()
                })
            });
        }
    }
}

fn bench_add_edge(c: &mut Criterion) {
    let (vehicles, links) = make_fleet(200);
    for backend in GraphBackend::ALL {
        let mut graph = make_graph(backend, &vehicles, &links);
        c.bench_function(&format!("add_edge_200_{}", backend), |b| {
            let mut rng = StdRng::seed_from_u64(2);
            b.iter(|| {
                let u = &vehicles[rng.gen_range(0..vehicles.len())];
                let v = &vehicles[rng.gen_range(0..vehicles.len())];
                graph.add_edge(u.clone(), v.clone(), 42).unwrap();
            })
        });
    }
}

fn bench_remove_vertex(c: &mut Criterion) {
    let (vehicles, links) = make_fleet(200);
    for backend in GraphBackend::ALL {
        let graph = make_graph(backend, &vehicles, &links);
        c.bench_function(&format!("remove_vertex_200_{}", backend), |b| {
            let mut rng = StdRng::seed_from_u64(3);
            b.iter_batched(
                || {
                    let victim = vehicles[rng.gen_range(0..vehicles.len())].clone();
                    (graph.clone(), victim)
                },
                |(mut g, victim)| {
                    g.remove_vertex(&victim).unwrap();
                    g
                },
                BatchSize::SmallInput,
            )
        });
    }
}

fn bench_shortest_path(c: &mut Criterion) {
    for count in [100usize, 500] {
        let (vehicles, links) = make_fleet(count);
        for backend in GraphBackend::ALL {
            let graph = make_graph(backend, &vehicles, &links);
            c.bench_function(&format!("shortest_path_{}_{}", count, backend), |b| {
                let mut rng = StdRng::seed_from_u64(4);
                b.iter(|| {
                    let u = &vehicles[rng.gen_range(0..vehicles.len())];
                    let v = &vehicles[rng.gen_range(0..vehicles.len())];
                    graph.shortest_path(u, v).unwrap()
                })
            });
        }
    }
}

criterion_group!(
    benches,
    bench_map_put,
    bench_map_get,
    bench_add_edge,
    bench_remove_vertex,
    bench_shortest_path,
);
criterion_main!(benches);
