//! Bucket-index strategies: `(key, capacity) -> index` with `index < capacity`.

use std::hash::Hash;

use serde::Serialize;

use crate::types::{VanetError, VanetResult};

use super::key_hasher::key_hash;

/// Reciprocal of the golden ratio.
const GOLDEN_RATIO_CONJUGATE: f64 = 0.618_033_988_749_895;

/// Seed added to the key hash before multiplicative scaling.
const MULTIPLICATIVE_SEED: u64 = 31;

/// How a key hash is reduced to a bucket index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum HashFunction {
    /// `hash mod capacity`. Clusters when the hash shares factors with the capacity.
    #[default]
    Modulus,
    /// Fractional part of `hash * 0.618...` scaled by the capacity.
    Multiplicative,
    /// High bits folded into low bits by shift-XOR cascades, then `mod capacity`.
    XorFold,
}

impl HashFunction {
    /// Every available strategy.
    pub const ALL: [HashFunction; 3] = [Self::Modulus, Self::Multiplicative, Self::XorFold];

    /// Bucket index for `key` in a table of `capacity` buckets.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. Table constructors reject that configuration.
    pub fn index<K: Hash + ?Sized>(&self, key: &K, capacity: usize) -> usize {
        self.index_of_hash(key_hash(key), capacity)
    }

    /// Bucket index for a precomputed key hash.
    pub fn index_of_hash(&self, hash: u64, capacity: usize) -> usize {
        match self {
            Self::Modulus => (hash % capacity as u64) as usize,
            Self::Multiplicative => {
                let seeded = fold32(hash) as u64 + MULTIPLICATIVE_SEED;
                let fraction = (seeded as f64 * GOLDEN_RATIO_CONJUGATE).fract();
                // Rounding can land exactly on `capacity`.
                ((capacity as f64 * fraction) as usize).min(capacity - 1)
            }
            Self::XorFold => {
                let mut h = fold32(hash);
                h ^= (h >> 20) ^ (h >> 12);
                h ^= (h >> 7) ^ (h >> 4);
                h as usize % capacity
            }
        }
    }

    /// Return a human-readable name for this hash function.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Modulus => "modulus",
            Self::Multiplicative => "multiplicative",
            Self::XorFold => "xor",
        }
    }

    /// Parse a hash function from its name.
    pub fn from_name(name: &str) -> VanetResult<Self> {
        match name.to_lowercase().as_str() {
            "modulus" | "mod" => Ok(Self::Modulus),
            "multiplicative" | "golden" => Ok(Self::Multiplicative),
            "xor" | "xor_fold" | "xorfold" => Ok(Self::XorFold),
            _ => Err(VanetError::UnsupportedHashFunction(name.to_string())),
        }
    }
}

impl std::fmt::Display for HashFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Fold a 64-bit hash into 32 bits; identity for hashes below 2^32.
fn fold32(hash: u64) -> u32 {
    (hash ^ (hash >> 32)) as u32
}
