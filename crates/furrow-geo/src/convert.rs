use furrow_core::models::{GeoPoint, Ring};
use geo::{Coord, LineString, Point, Polygon};

/// Convert a domain point to a geo point (x = longitude, y = latitude)
pub fn to_point(p: GeoPoint) -> Point {
    Point::new(p.longitude, p.latitude)
}

/// Convert a domain point to a geo coordinate
pub fn to_coord(p: GeoPoint) -> Coord {
    Coord { x: p.longitude, y: p.latitude }
}

/// Convert a geo point back to a domain point
pub fn from_point(p: Point) -> GeoPoint {
    GeoPoint::new(p.y(), p.x())
}

/// Build a geo polygon from a ring.
///
/// Rings are stored open; the closing coordinate is appended here when the
/// last point does not already repeat the first.
pub fn to_polygon(ring: &Ring) -> Polygon {
    let points = ring.points();
    let mut coords: Vec<Coord> = points.iter().copied().map(to_coord).collect();

    if let (Some(first), Some(last)) = (coords.first(), coords.last()) {
        if first != last {
            coords.push(*first);
        }
    }

    Polygon::new(LineString::from(coords), vec![])
}
