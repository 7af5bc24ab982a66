//! Vehicles and the links between them.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use serde::Serialize;

use super::Weight;

/// A vehicle in the network. Identity is the vehicle ID alone; speed is payload.
#[derive(Debug, Clone, Serialize)]
pub struct Vehicle {
    /// Unique identifier, e.g. `V17`.
    pub id: String,
    /// Current speed in km/h.
    pub speed: u32,
}

impl Vehicle {
    /// Create a new vehicle.
    pub fn new(id: impl Into<String>, speed: u32) -> Self {
        Self {
            id: id.into(),
            speed,
        }
    }
}

impl PartialEq for Vehicle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Vehicle {}

impl Hash for Vehicle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for Vehicle {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Vehicle {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl std::fmt::Display for Vehicle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// An undirected communication link between two vehicles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    /// One endpoint.
    pub source: Vehicle,
    /// The other endpoint.
    pub destination: Vehicle,
    /// Link cost.
    pub weight: Weight,
}

impl Link {
    /// Create a new link.
    pub fn new(source: Vehicle, destination: Vehicle, weight: Weight) -> Self {
        Self {
            source,
            destination,
            weight,
        }
    }
}
