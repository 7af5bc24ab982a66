//! Table configuration shared by every keyed-map implementation.

use serde::Serialize;

use crate::hash::HashFunction;
use crate::types::{
    VanetError, VanetResult, DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR, DEFAULT_RESIZABLE,
};

use super::MapKind;

/// Capacity, growth policy, hash function and collision strategy of a table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapConfig {
    /// Initial number of buckets. Must be positive.
    pub capacity: usize,
    /// `size / capacity` ratio at which a resizable table doubles. Must be positive.
    pub load_factor: f32,
    /// Whether the table doubles once the load factor is reached.
    pub resizable: bool,
    /// Key-to-bucket reduction.
    pub hash_function: HashFunction,
    /// Collision strategy used when this config is handed to a factory.
    pub kind: MapKind,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            load_factor: DEFAULT_LOAD_FACTOR,
            resizable: DEFAULT_RESIZABLE,
            hash_function: HashFunction::default(),
            kind: MapKind::default(),
        }
    }
}

impl MapConfig {
    /// Default configuration for the given collision strategy.
    pub fn new(kind: MapKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Set the initial capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the load factor.
    pub fn with_load_factor(mut self, load_factor: f32) -> Self {
        self.load_factor = load_factor;
        self
    }

    /// Enable or disable automatic doubling.
    pub fn resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    /// Set the hash function.
    pub fn with_hash_function(mut self, hash_function: HashFunction) -> Self {
        self.hash_function = hash_function;
        self
    }

    /// Set the collision strategy.
    pub fn with_kind(mut self, kind: MapKind) -> Self {
        self.kind = kind;
        self
    }

    /// Reject zero capacity and non-positive or NaN load factors.
    pub fn validate(&self) -> VanetResult<()> {
        if self.capacity == 0 {
            return Err(VanetError::InvalidConfiguration(format!(
                "Illegal initial capacity: {}",
                self.capacity
            )));
        }
        if self.load_factor.is_nan() || self.load_factor <= 0.0 {
            return Err(VanetError::InvalidConfiguration(format!(
                "Illegal load factor: {}",
                self.load_factor
            )));
        }
        Ok(())
    }

    /// Whether a table of `size` entries over `capacity` buckets has reached the threshold.
    pub(crate) fn over_threshold(&self, size: usize, capacity: usize) -> bool {
        size as f32 / capacity as f32 >= self.load_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = MapConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.capacity, 16);
        assert!((config.load_factor - 0.75).abs() < f32::EPSILON);
        assert!(config.resizable);
    }

    #[test]
    fn test_rejects_bad_values() {
        for config in [
            MapConfig::default().with_capacity(0),
            MapConfig::default().with_load_factor(0.0),
            MapConfig::default().with_load_factor(-1.0),
            MapConfig::default().with_load_factor(f32::NAN),
        ] {
            assert!(matches!(
                config.validate(),
                Err(VanetError::InvalidConfiguration(_))
            ));
        }
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let config = MapConfig::default().with_capacity(4);
        assert!(!config.over_threshold(2, 4));
        assert!(config.over_threshold(3, 4));
    }
}
