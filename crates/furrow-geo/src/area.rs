use crate::convert::to_polygon;
use furrow_core::models::Ring;
use geo::ChamberlainDuquetteArea;

/// Spherical surface area of a ring in square meters.
///
/// Uses the Chamberlain-Duquette algorithm on a spherical earth model,
/// which stays accurate at field scale without picking a projection.
/// Winding order does not matter; rings with fewer than 3 points enclose
/// nothing.
pub fn ring_area_sq_m(ring: &Ring) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }

    to_polygon(ring).chamberlain_duquette_unsigned_area()
}
