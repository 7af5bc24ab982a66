//! Hash functions that map keys to bucket indices.

pub mod collision;
pub mod function;
pub mod key_hasher;

pub use collision::{collision_rate, collision_report, CollisionReport};
pub use function::HashFunction;
pub use key_hasher::{key_hash, KeyHasher};
