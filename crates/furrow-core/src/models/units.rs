/// Square meters in one acre; the engine's only unit-conversion constant.
pub const SQUARE_METERS_PER_ACRE: f64 = 4046.8564224;

/// Convert square meters to acres
pub fn square_meters_to_acres(sq_m: f64) -> f64 {
    sq_m / SQUARE_METERS_PER_ACRE
}
