use serde::{Deserialize, Serialize};

/// A WGS84 position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees, positive north
    pub latitude: f64,

    /// Longitude in degrees, positive east
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a new point from degrees
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}
