//! Error types for the vanet-graph library.

use thiserror::Error;

/// All errors that can occur in the vanet-graph library.
#[derive(Error, Debug)]
pub enum VanetError {
    /// Table configuration rejected before any bucket was allocated.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Vertex lookup failed on an index-addressed backing.
    #[error("Vertex {0} not found")]
    VertexNotFound(String),

    /// No keyed-map implementation is registered under this name.
    #[error("Unsupported map type: {0}")]
    UnsupportedMapType(String),

    /// No hash function is registered under this name.
    #[error("Unsupported hash function: {0}")]
    UnsupportedHashFunction(String),

    /// JSON rendering error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VanetError {
    /// Build a `VertexNotFound` from any debuggable vertex.
    pub fn vertex_not_found<K: std::fmt::Debug>(vertex: &K) -> Self {
        Self::VertexNotFound(format!("{:?}", vertex))
    }
}

/// Convenience result type for vanet-graph operations.
pub type VanetResult<T> = Result<T, VanetError>;
