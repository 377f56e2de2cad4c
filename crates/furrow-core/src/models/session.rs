use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a coverage grid cell.
///
/// Assigned 0-based in tessellation order when the grid is built; constant
/// for the lifetime of the grid.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct CellId(pub u32);

/// Persisted snapshot of a live coverage session.
///
/// Written on every first-visit event; adopted verbatim on restore. The
/// visit pairs are ordered by cell id and must round-trip exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageSnapshot {
    /// (cell id, visit count) pairs in ascending id order
    pub visits: Vec<(CellId, u32)>,

    /// Covered area in square meters
    pub covered_sq_m: f64,

    /// Covered fraction of the field, clamped to 0..=1
    pub progress: f64,

    /// Seconds elapsed since the session started
    pub elapsed_secs: u64,
}

/// Who worked which plot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotIdentity {
    /// Operator (farmer) display name
    pub farmer_name: String,

    /// Plot display name or survey label
    pub plot_name: String,
}

/// Final record of a finished coverage session, returned by stopping the
/// tracker and handed to the sync collaborator for submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageSessionSummary {
    /// Unique id of this tracking session
    pub session_id: Uuid,

    /// Farmer and plot identity
    pub identity: PlotIdentity,

    /// Area actually covered, in acres
    pub covered_acres: f64,

    /// Total field area, in acres
    pub field_acres: f64,

    /// Covered fraction, clamped to 0..=1
    pub progress: f64,

    /// Session duration in seconds
    pub elapsed_secs: u64,

    /// When the session was stopped
    pub finished_at: DateTime<Utc>,
}
