//! Shared data types for the vanet-graph library.

pub mod error;
pub mod route;
pub mod vehicle;

pub use error::{VanetError, VanetResult};
pub use route::Route;
pub use vehicle::{Link, Vehicle};

/// Default number of buckets in a freshly built table.
pub const DEFAULT_CAPACITY: usize = 16;

/// Default `size / capacity` ratio that triggers a resize.
pub const DEFAULT_LOAD_FACTOR: f32 = 0.75;

/// Tables grow by default.
pub const DEFAULT_RESIZABLE: bool = true;

/// Edge weight between two vertices.
pub type Weight = u32;

/// Accumulated weight along a route.
pub type Distance = u64;
