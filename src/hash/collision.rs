//! Collision measurement for comparing hash functions on a key set.

use std::collections::HashSet;
use std::hash::Hash;

use serde::Serialize;

use crate::types::{VanetError, VanetResult};

use super::HashFunction;

/// Collision figures for one hash function over one key set.
#[derive(Debug, Clone, Serialize)]
pub struct CollisionReport {
    /// Strategy under test.
    pub hash_function: HashFunction,
    /// Number of keys hashed.
    pub keys: usize,
    /// Bucket count used for the reduction.
    pub capacity: usize,
    /// Keys whose bucket index was already taken by an earlier key.
    pub collisions: usize,
    /// `collisions / keys`.
    pub rate: f64,
}

/// Hash every key into `capacity` buckets and count repeated indices.
pub fn collision_report<K: Hash>(
    hash_function: HashFunction,
    keys: &[K],
    capacity: usize,
) -> VanetResult<CollisionReport> {
    if capacity == 0 {
        return Err(VanetError::InvalidConfiguration(
            "collision capacity must be positive".to_string(),
        ));
    }

    let mut used: HashSet<usize> = HashSet::with_capacity(keys.len());
    let mut collisions = 0;
    for key in keys {
        if !used.insert(hash_function.index(key, capacity)) {
            collisions += 1;
        }
    }

    let rate = if keys.is_empty() {
        0.0
    } else {
        collisions as f64 / keys.len() as f64
    };

    Ok(CollisionReport {
        hash_function,
        keys: keys.len(),
        capacity,
        collisions,
        rate,
    })
}

/// Collision rate of `hash_function` on `keys` reduced into `capacity` buckets.
pub fn collision_rate<K: Hash>(
    hash_function: HashFunction,
    keys: &[K],
    capacity: usize,
) -> VanetResult<f64> {
    Ok(collision_report(hash_function, keys, capacity)?.rate)
}
