use serde::{Deserialize, Serialize};

use crate::models::point::GeoPoint;
use crate::models::ring::Ring;
use crate::models::units::square_meters_to_acres;

/// Persisted snapshot of an unfinished boundary capture.
///
/// Written on every capture mutation so an interrupted session can resume.
/// Point order must round-trip exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryDraft {
    /// Ring points in insertion order (stored open)
    pub points: Vec<GeoPoint>,

    /// Geodesic area of the draft ring in square meters (0 while incomplete)
    pub area_sq_m: f64,
}

/// An immutable, committed plot boundary.
///
/// Produced by finalizing a complete capture; shared read-only by the
/// coverage grid and by registration payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalizedBoundary {
    ring: Ring,
    area_sq_m: f64,
}

impl FinalizedBoundary {
    /// Snapshot a ring and its computed area
    pub fn new(ring: Ring, area_sq_m: f64) -> Self {
        Self { ring, area_sq_m }
    }

    pub fn ring(&self) -> &Ring {
        &self.ring
    }

    /// Geodesic area in square meters
    pub fn area_sq_m(&self) -> f64 {
        self.area_sq_m
    }

    /// Geodesic area in acres
    pub fn area_acres(&self) -> f64 {
        square_meters_to_acres(self.area_sq_m)
    }
}
