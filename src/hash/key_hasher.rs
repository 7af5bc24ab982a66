//! Deterministic polynomial hasher that turns any `Hash` key into a 64-bit key hash.
//!
//! Integer keys hash to their own magnitude (a single `write_i32(-7)` yields 7), so bucket
//! placement for integer keys is predictable and independent of process-level seeds.

use std::hash::{Hash, Hasher};

const MULTIPLIER: u64 = 31;

/// Polynomial (`h = h * 31 + word`) hasher over every word the key writes.
#[derive(Debug, Default, Clone)]
pub struct KeyHasher {
    state: u64,
}

impl KeyHasher {
    /// Create a hasher with zero state.
    pub fn new() -> Self {
        Self::default()
    }

    fn mix(&mut self, word: u64) {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(word);
    }
}

impl Hasher for KeyHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.mix(b as u64);
        }
    }

    fn write_u8(&mut self, i: u8) {
        self.mix(i as u64);
    }

    fn write_u16(&mut self, i: u16) {
        self.mix(i as u64);
    }

    fn write_u32(&mut self, i: u32) {
        self.mix(i as u64);
    }

    fn write_u64(&mut self, i: u64) {
        self.mix(i);
    }

    fn write_u128(&mut self, i: u128) {
        self.mix((i ^ (i >> 64)) as u64);
    }

    fn write_usize(&mut self, i: usize) {
        self.mix(i as u64);
    }

    fn write_i8(&mut self, i: i8) {
        self.mix(i.unsigned_abs() as u64);
    }

    fn write_i16(&mut self, i: i16) {
        self.mix(i.unsigned_abs() as u64);
    }

    fn write_i32(&mut self, i: i32) {
        self.mix(i.unsigned_abs() as u64);
    }

    fn write_i64(&mut self, i: i64) {
        self.mix(i.unsigned_abs());
    }

    fn write_i128(&mut self, i: i128) {
        self.write_u128(i.unsigned_abs());
    }

    fn write_isize(&mut self, i: isize) {
        self.mix(i.unsigned_abs() as u64);
    }
}

/// Compute the key hash fed into a [`HashFunction`](super::HashFunction).
pub fn key_hash<K: Hash + ?Sized>(key: &K) -> u64 {
    let mut hasher = KeyHasher::new();
    key.hash(&mut hasher);
    hasher.finish()
}
