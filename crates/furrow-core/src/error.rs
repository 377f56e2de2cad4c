//! Error types for furrow

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FurrowError {
    // Boundary capture errors
    #[error("Boundary has {points} point(s); at least 3 non-crossing points are required")]
    IncompleteBoundary { points: usize },

    #[error("Boundary is self-intersecting: edge {first_edge} crosses edge {second_edge}")]
    SelfIntersectingBoundary {
        first_edge: usize,
        second_edge: usize,
    },

    // GPS errors
    #[error("GPS fix unreliable: accuracy {accuracy_m:.1} m exceeds the {limit_m:.1} m limit")]
    GpsUnreliable { accuracy_m: f64, limit_m: f64 },

    // Sync errors
    #[error("Session sync failed: {reason}")]
    SyncFailure { reason: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, FurrowError>;
