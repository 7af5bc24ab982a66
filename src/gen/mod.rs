//! Random VANET topology generation.
//!
//! Randomness always comes from the caller's [`Rng`], so a seeded generator gives a
//! reproducible topology.

use std::fmt::Debug;
use std::hash::Hash;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::graph::Graph;
use crate::types::{Link, VanetResult, Vehicle, Weight};

/// Upper bound (exclusive) of a generated vehicle speed, in km/h.
pub const MAX_SPEED: u32 = 140;

/// Smallest generated link weight.
pub const MIN_WEIGHT: Weight = 10;

/// Largest generated link weight.
pub const MAX_WEIGHT: Weight = 100;

/// Divisor applied to the fleet size to get the number of links per vehicle.
pub const LINK_DENSITY: f64 = 1.3;

/// Generate vehicles `V1..=Vn` with random speeds in `0..MAX_SPEED`.
pub fn generate_vehicles<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Vehicle> {
    (1..=count)
        .map(|i| Vehicle::new(format!("V{}", i), rng.gen_range(0..MAX_SPEED)))
        .collect()
}

/// Number of links generated per vehicle for a fleet of `count`.
pub fn links_per_vehicle(count: usize) -> usize {
    (count as f64 / LINK_DENSITY) as usize
}

/// Generate `links_per_vehicle(n)` random links from every vehicle to other vehicles.
///
/// A vehicle never links to itself. The same pair may be drawn more than once; feeding
/// the links into a graph keeps the last weight drawn.
pub fn generate_links<R: Rng + ?Sized>(vehicles: &[Vehicle], rng: &mut R) -> Vec<Link> {
    let n = vehicles.len();
    let per_vehicle = links_per_vehicle(n);
    let mut links = Vec::with_capacity(n * per_vehicle);
    if n < 2 {
        return links;
    }

    for (j, source) in vehicles.iter().enumerate() {
        for _ in 0..per_vehicle {
            // Draw from the n - 1 other vehicles, skipping over `j`.
            let mut index = rng.gen_range(0..n - 1);
            if index >= j {
                index += 1;
            }
            let weight = rng.gen_range(MIN_WEIGHT..=MAX_WEIGHT);
            links.push(Link::new(source.clone(), vehicles[index].clone(), weight));
        }
    }
    links
}

/// Add every vehicle and link to `graph`.
pub fn populate<G: Graph<Vehicle> + ?Sized>(
    graph: &mut G,
    vehicles: &[Vehicle],
    links: &[Link],
) -> VanetResult<()> {
    for vehicle in vehicles {
        graph.add_vertex(vehicle.clone())?;
    }
    for link in links {
        graph.add_edge(link.source.clone(), link.destination.clone(), link.weight)?;
    }
    log::info!(
        "populated graph with {} vehicles and {} links ({} distinct edges)",
        graph.vertex_count(),
        links.len(),
        graph.edge_count()
    );
    Ok(())
}

/// Generate a random VANET of `count` vehicles into `graph` and return the vehicles.
pub fn generate_topology<G, R>(graph: &mut G, count: usize, rng: &mut R) -> VanetResult<Vec<Vehicle>>
where
    G: Graph<Vehicle> + ?Sized,
    R: Rng + ?Sized,
{
    let vehicles = generate_vehicles(count, rng);
    let links = generate_links(&vehicles, rng);
    populate(graph, &vehicles, &links)?;
    Ok(vehicles)
}

/// Pick a uniformly random vertex of `graph`, or `None` if it is empty.
pub fn pick_random_vertex<K, G, R>(graph: &G, rng: &mut R) -> Option<K>
where
    K: Hash + Ord + Clone + Debug,
    G: Graph<K> + ?Sized,
    R: Rng + ?Sized,
{
    graph.vertices().choose(rng).cloned()
}

/// Remove up to `count` distinct random vertices, simulating vehicles leaving range.
/// Returns the removed vertices.
pub fn remove_random_vehicles<K, G, R>(graph: &mut G, count: usize, rng: &mut R) -> VanetResult<Vec<K>>
where
    K: Hash + Ord + Clone + Debug,
    G: Graph<K> + ?Sized,
    R: Rng + ?Sized,
{
    let removed: Vec<K> = graph
        .vertices()
        .choose_multiple(rng, count)
        .cloned()
        .collect();
    for vertex in &removed {
        graph.remove_vertex(vertex)?;
    }
    log::info!("removed {} vehicles, {} remain", removed.len(), graph.vertex_count());
    Ok(removed)
}
