use serde::{Deserialize, Serialize};

use crate::models::point::GeoPoint;

/// One GPS sample from the platform location source
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpsFix {
    /// Latitude in degrees
    pub latitude: f64,

    /// Longitude in degrees
    pub longitude: f64,

    /// Reported horizontal accuracy radius in meters
    pub accuracy_m: f64,

    /// Travel heading in degrees clockwise from north, when the receiver
    /// reports one
    pub heading_deg: Option<f64>,

    /// Sample time as Unix milliseconds
    pub timestamp_ms: i64,
}

impl GpsFix {
    /// The fix position as a bare point
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}
