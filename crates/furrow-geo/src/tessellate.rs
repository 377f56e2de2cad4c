use crate::spatial::BoundingBox;
use furrow_core::models::{GeoPoint, Ring};
use geo::{Destination, Haversine, Point};

/// Tile a bounding box with square cells of the given side length.
///
/// Degree steps are measured geodesically from the south-west corner, so a
/// cell spans the same ground distance regardless of latitude. Cells are
/// emitted row-major, south to north then west to east within each row, as
/// open 4-corner rings. The last row and column overhang the box rather
/// than leave a sliver uncovered. A degenerate box still yields one cell.
pub fn square_grid(bbox: &BoundingBox, side_m: f64) -> Vec<Ring> {
    let origin = Point::new(bbox.min_lon, bbox.min_lat);
    let one_north = Haversine.destination(origin, 0.0, side_m);
    let one_east = Haversine.destination(origin, 90.0, side_m);

    let lat_step = one_north.y() - origin.y();
    let lon_step = one_east.x() - origin.x();

    let rows = ((bbox.max_lat - bbox.min_lat) / lat_step).ceil().max(1.0) as usize;
    let cols = ((bbox.max_lon - bbox.min_lon) / lon_step).ceil().max(1.0) as usize;

    let mut cells = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        let south = bbox.min_lat + row as f64 * lat_step;
        let north = south + lat_step;

        for col in 0..cols {
            let west = bbox.min_lon + col as f64 * lon_step;
            let east = west + lon_step;

            cells.push(Ring::from_points(vec![
                GeoPoint::new(south, west),
                GeoPoint::new(south, east),
                GeoPoint::new(north, east),
                GeoPoint::new(north, west),
            ]));
        }
    }

    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::haversine_m;

    /// Box spanning the given ground distances north and east of a corner
    fn box_of(min_lat: f64, min_lon: f64, north_m: f64, east_m: f64) -> BoundingBox {
        let origin = Point::new(min_lon, min_lat);
        let north = Haversine.destination(origin, 0.0, north_m);
        let east = Haversine.destination(origin, 90.0, east_m);

        BoundingBox { min_lat, min_lon, max_lat: north.y(), max_lon: east.x() }
    }

    #[test]
    fn test_grid_covers_box_with_overhang() {
        // 95m x 45m box with 10m cells: 10 rows of 5
        let bbox = box_of(20.011, 73.790, 95.0, 45.0);
        let cells = square_grid(&bbox, 10.0);

        assert_eq!(cells.len(), 50);

        // Northern edge of the last cell reaches past the box
        let top = cells.last().unwrap().points()[2].latitude;
        assert!(top >= bbox.max_lat);
    }

    #[test]
    fn test_grid_row_major_order() {
        let bbox = box_of(0.0, 0.0, 95.0, 45.0);
        let cells = square_grid(&bbox, 10.0);

        let first = &cells[0];
        assert_eq!(first.points()[0].latitude, 0.0);
        assert_eq!(first.points()[0].longitude, 0.0);

        // Next cell in the row sits east at the same latitude
        let second = &cells[1];
        assert_eq!(second.points()[0].latitude, first.points()[0].latitude);
        assert!(second.points()[0].longitude > first.points()[0].longitude);

        // First cell of the next row sits north at the same longitude
        let next_row = &cells[5];
        assert!(next_row.points()[0].latitude > first.points()[0].latitude);
        assert_eq!(next_row.points()[0].longitude, first.points()[0].longitude);
    }

    #[test]
    fn test_cell_side_is_geodesically_true() {
        let bbox = box_of(20.011, 73.790, 95.0, 45.0);
        let cells = square_grid(&bbox, 10.0);

        let corners = cells[0].points();
        let south_side = haversine_m(corners[0], corners[1]);
        let west_side = haversine_m(corners[0], corners[3]);

        assert!((south_side - 10.0).abs() < 0.1, "south side was {}", south_side);
        assert!((west_side - 10.0).abs() < 0.1, "west side was {}", west_side);
    }

    #[test]
    fn test_degenerate_box_yields_single_cell() {
        let bbox =
            BoundingBox { min_lat: 20.011, min_lon: 73.790, max_lat: 20.011, max_lon: 73.790 };

        let cells = square_grid(&bbox, 10.0);
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].len(), 4);
    }
}
