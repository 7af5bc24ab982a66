//! CLI command implementations.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::gen::{
    generate_links, generate_topology, generate_vehicles, pick_random_vertex, populate,
    remove_random_vehicles,
};
use crate::graph::{Graph, GraphBackend};
use crate::hash::{collision_report, CollisionReport, HashFunction};
use crate::map::MapConfig;
use crate::types::{Distance, Route, VanetResult, Vehicle};

/// One shortest-path query and its outcome.
#[derive(Debug, Serialize)]
pub struct QueryReport {
    pub source: String,
    pub destination: String,
    /// `None` when the destination is unreachable.
    pub distance: Option<Distance>,
    pub path: Vec<String>,
}

impl QueryReport {
    fn new(source: &Vehicle, destination: &Vehicle, route: Option<Route<Vehicle>>) -> Self {
        let (distance, path) = match route {
            Some(route) => (
                Some(route.distance),
                route.path.into_iter().map(|v| v.id).collect(),
            ),
            None => (None, Vec::new()),
        };
        Self {
            source: source.id.clone(),
            destination: destination.id.clone(),
            distance,
            path,
        }
    }
}

/// Result of `vanet simulate`.
#[derive(Debug, Serialize)]
pub struct SimulationReport {
    pub backend: GraphBackend,
    pub vehicles: usize,
    pub edges: usize,
    pub removed: Vec<String>,
    pub queries: Vec<QueryReport>,
}

/// Timing of one backing in `vanet compare`.
#[derive(Debug, Serialize)]
pub struct BackendTiming {
    pub backend: GraphBackend,
    pub build_micros: u128,
    pub query_micros: u128,
    /// Queries whose destination was reachable.
    pub reached: usize,
}

/// One fleet size in `vanet compare`.
#[derive(Debug, Serialize)]
pub struct ComparisonReport {
    pub vehicles: usize,
    pub links: usize,
    pub queries: usize,
    pub timings: Vec<BackendTiming>,
}

/// Collision reports for one fleet size in `vanet hashing`.
#[derive(Debug, Serialize)]
pub struct HashingReport {
    pub vehicles: usize,
    pub reports: Vec<CollisionReport>,
}

/// Seeded generator when a seed is given, entropy-seeded otherwise.
fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn print_json<T: Serialize>(value: &T) -> VanetResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Pick `count` random (source, destination) pairs from `vehicles`.
fn random_pairs<R: Rng>(vehicles: &[Vehicle], count: usize, rng: &mut R) -> Vec<(Vehicle, Vehicle)> {
    if vehicles.is_empty() {
        return Vec::new();
    }
    (0..count)
        .map(|_| {
            let source = &vehicles[rng.gen_range(0..vehicles.len())];
            let destination = &vehicles[rng.gen_range(0..vehicles.len())];
            (source.clone(), destination.clone())
        })
        .collect()
}

/// Build a random VANET, let some vehicles leave, then answer random route queries.
pub fn cmd_simulate(
    backend: GraphBackend,
    config: MapConfig,
    vehicles: usize,
    leaving: usize,
    queries: usize,
    seed: Option<u64>,
    json: bool,
) -> VanetResult<()> {
    let mut rng = make_rng(seed);
    let mut graph = backend.build(config)?;
    generate_topology(&mut graph, vehicles, &mut rng)?;
    let removed: Vec<Vehicle> = remove_random_vehicles(&mut graph, leaving, &mut rng)?;

    let mut results = Vec::with_capacity(queries);
    for _ in 0..queries {
        let (Some(source), Some(destination)): (Option<Vehicle>, Option<Vehicle>) = (
            pick_random_vertex(&graph, &mut rng),
            pick_random_vertex(&graph, &mut rng),
        ) else {
            break;
        };
        let route = graph.shortest_path(&source, &destination)?;
        results.push(QueryReport::new(&source, &destination, route));
    }

    let report = SimulationReport {
        backend,
        vehicles: graph.vertex_count(),
        edges: graph.edge_count(),
        removed: removed.into_iter().map(|v| v.id).collect(),
        queries: results,
    };

    if json {
        return print_json(&report);
    }

    println!("Backend: {}", report.backend);
    println!("Vehicles: {}", report.vehicles);
    println!("Edges: {}", report.edges);
    if !report.removed.is_empty() {
        println!("Left range: {}", report.removed.join(", "));
    }
    if report.queries.is_empty() {
        println!("No vehicles to route between.");
    }
    for query in &report.queries {
        match query.distance {
            Some(distance) => println!(
                "  {} -> {}: {} ({})",
                query.source,
                query.destination,
                query.path.join(" -> "),
                distance
            ),
            None => println!("  {} -> {}: unreachable", query.source, query.destination),
        }
    }
    Ok(())
}

/// Collision rate of every hash function on fleets of each size.
///
/// Keys are reduced into `capacity` buckets, or into as many buckets as there are
/// vehicles when no capacity is given.
pub fn cmd_hashing(
    counts: &[usize],
    capacity: Option<usize>,
    seed: Option<u64>,
    json: bool,
) -> VanetResult<()> {
    let mut rng = make_rng(seed);
    let mut reports = Vec::with_capacity(counts.len());
    for &count in counts {
        let vehicles = generate_vehicles(count, &mut rng);
        let buckets = capacity.unwrap_or(count.max(1));
        let per_function = HashFunction::ALL
            .iter()
            .map(|&hf| collision_report(hf, &vehicles, buckets))
            .collect::<VanetResult<Vec<_>>>()?;
        reports.push(HashingReport {
            vehicles: count,
            reports: per_function,
        });
    }

    if json {
        return print_json(&reports);
    }

    for report in &reports {
        println!("{} vehicles:", report.vehicles);
        for r in &report.reports {
            println!(
                "  {:<15} {:>6} collisions in {:>6} buckets, rate {:.4}",
                r.hash_function, r.collisions, r.capacity, r.rate
            );
        }
    }
    Ok(())
}

/// Time graph construction and the same random queries on every backing.
pub fn cmd_compare(
    counts: &[usize],
    queries: usize,
    config: MapConfig,
    seed: Option<u64>,
    json: bool,
) -> VanetResult<()> {
    let mut rng = make_rng(seed);
    let mut reports = Vec::with_capacity(counts.len());

    for &count in counts {
        let vehicles = generate_vehicles(count, &mut rng);
        let links = generate_links(&vehicles, &mut rng);
        let pairs = random_pairs(&vehicles, queries, &mut rng);

        let mut timings = Vec::with_capacity(GraphBackend::ALL.len());
        for backend in GraphBackend::ALL {
            let start = Instant::now();
            let mut graph = backend.build(config)?;
            populate(&mut graph, &vehicles, &links)?;
            let build_micros = start.elapsed().as_micros();

            let start = Instant::now();
            let mut reached = 0;
            for (source, destination) in &pairs {
                if graph.shortest_path(source, destination)?.is_some() {
                    reached += 1;
                }
            }
            let query_micros = start.elapsed().as_micros();
            log::info!(
                "{} vehicles on {}: build {}us, {} queries {}us",
                count,
                backend,
                build_micros,
                pairs.len(),
                query_micros
            );

            timings.push(BackendTiming {
                backend,
                build_micros,
                query_micros,
                reached,
            });
        }

        reports.push(ComparisonReport {
            vehicles: count,
            links: links.len(),
            queries: pairs.len(),
            timings,
        });
    }

    if json {
        return print_json(&reports);
    }

    for report in &reports {
        println!(
            "{} vehicles, {} links, {} queries:",
            report.vehicles, report.links, report.queries
        );
        for t in &report.timings {
            println!(
                "  {:<8} build {:>10}us  queries {:>10}us  reached {}",
                t.backend.name(),
                t.build_micros,
                t.query_micros,
                t.reached
            );
        }
    }
    Ok(())
}
