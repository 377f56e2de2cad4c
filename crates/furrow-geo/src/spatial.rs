use crate::convert::{to_point, to_polygon};
use furrow_core::models::{GeoPoint, Ring};
use geo::algorithm::bounding_rect::BoundingRect;
use geo::algorithm::intersects::Intersects;
use geo::{Distance, Haversine};

/// Great-circle distance between two points in meters
pub fn haversine_m(a: GeoPoint, b: GeoPoint) -> f64 {
    Haversine.distance(to_point(a), to_point(b))
}

/// Geographic extent of a ring in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

/// Compute the bounding box of a ring.
/// Returns None for an empty ring.
pub fn bounding_box(ring: &Ring) -> Option<BoundingBox> {
    let rect = to_polygon(ring).bounding_rect()?;

    Some(BoundingBox {
        min_lat: rect.min().y,
        min_lon: rect.min().x,
        max_lat: rect.max().y,
        max_lon: rect.max().x,
    })
}

/// Even-odd containment test for a point against a ring treated as closed.
///
/// Walks each edge and counts crossings of the eastward ray from the point.
/// Points exactly on an edge land on either side depending on rounding; GPS
/// fixes carry enough noise that the distinction never matters in practice.
pub fn point_in_ring(point: GeoPoint, ring: &Ring) -> bool {
    let points = ring.points();
    if points.len() < 3 {
        return false;
    }

    let px = point.longitude;
    let py = point.latitude;

    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (xi, yi) = (points[i].longitude, points[i].latitude);
        let (xj, yj) = (points[j].longitude, points[j].latitude);

        let crosses = (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi) + xi;
        if crosses {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// True when two rings share any area or touch
pub fn rings_intersect(a: &Ring, b: &Ring) -> bool {
    to_polygon(a).intersects(&to_polygon(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(lat: f64, lon: f64, span: f64) -> Ring {
        Ring::from_points(vec![
            GeoPoint::new(lat, lon),
            GeoPoint::new(lat, lon + span),
            GeoPoint::new(lat + span, lon + span),
            GeoPoint::new(lat + span, lon),
        ])
    }

    #[test]
    fn test_haversine_known_distance() {
        // One thousandth of a degree along the equator is ~111.2m
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 0.001);

        let distance = haversine_m(a, b);
        assert!(
            (distance - 111.2).abs() < 0.5,
            "0.001 degree at the equator should be ~111.2m, got {}",
            distance
        );
    }

    #[test]
    fn test_haversine_same_point() {
        let p = GeoPoint::new(20.011, 73.790);
        assert!(haversine_m(p, p) < 0.001);
    }

    #[test]
    fn test_bounding_box_of_square() {
        let ring = square(20.011, 73.790, 0.001);
        let bbox = bounding_box(&ring).unwrap();

        assert_eq!(bbox.min_lat, 20.011);
        assert_eq!(bbox.min_lon, 73.790);
        assert_eq!(bbox.max_lat, 20.012);
        assert_eq!(bbox.max_lon, 73.791);
    }

    #[test]
    fn test_bounding_box_empty_ring() {
        assert!(bounding_box(&Ring::new()).is_none());
    }

    #[test]
    fn test_point_in_ring() {
        let ring = square(0.0, 0.0, 0.001);

        assert!(point_in_ring(GeoPoint::new(0.0005, 0.0005), &ring));
        assert!(!point_in_ring(GeoPoint::new(0.0015, 0.0005), &ring));
        assert!(!point_in_ring(GeoPoint::new(-0.0005, 0.0005), &ring));
    }

    #[test]
    fn test_point_in_concave_ring() {
        // An L-shaped plot: the notch is outside even though the bounding
        // box contains it
        let ring = Ring::from_points(vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 0.002),
            GeoPoint::new(0.001, 0.002),
            GeoPoint::new(0.001, 0.001),
            GeoPoint::new(0.002, 0.001),
            GeoPoint::new(0.002, 0.0),
        ]);

        assert!(point_in_ring(GeoPoint::new(0.0005, 0.0015), &ring));
        assert!(point_in_ring(GeoPoint::new(0.0015, 0.0005), &ring));
        // Inside the bounding box, outside the L
        assert!(!point_in_ring(GeoPoint::new(0.0015, 0.0015), &ring));
    }

    #[test]
    fn test_point_in_ring_too_few_points() {
        let ring = Ring::from_points(vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.001)]);
        assert!(!point_in_ring(GeoPoint::new(0.0, 0.0005), &ring));
    }

    #[test]
    fn test_rings_intersect() {
        let a = square(0.0, 0.0, 0.001);
        let overlapping = square(0.0005, 0.0005, 0.001);
        let disjoint = square(0.005, 0.005, 0.001);

        assert!(rings_intersect(&a, &overlapping));
        assert!(!rings_intersect(&a, &disjoint));
    }

    #[test]
    fn test_rings_touching_edge_intersect() {
        let a = square(0.0, 0.0, 0.001);
        let adjacent = square(0.0, 0.001, 0.001);

        assert!(rings_intersect(&a, &adjacent));
    }
}
