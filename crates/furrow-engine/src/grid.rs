use furrow_core::models::{CellId, FinalizedBoundary, GeoPoint, Ring};
use furrow_geo::index::RingIndex;
use furrow_geo::spatial::{bounding_box, rings_intersect};
use furrow_geo::tessellate::square_grid;

/// One grid cell with its tessellation-order id
#[derive(Debug, Clone)]
pub struct GridCell {
    pub id: CellId,
    pub ring: Ring,
}

impl GridCell {
    /// Mean of the cell's corner coordinates
    pub fn center(&self) -> GeoPoint {
        let points = self.ring.points();
        let n = points.len() as f64;
        let lat = points.iter().map(|p| p.latitude).sum::<f64>() / n;
        let lon = points.iter().map(|p| p.longitude).sum::<f64>() / n;
        GeoPoint::new(lat, lon)
    }
}

/// Immutable tessellation of a finalized boundary into square cells.
///
/// Built once per session; re-finalizing a boundary always builds a fresh
/// grid.
pub struct CoverageGrid {
    cells: Vec<GridCell>,
    index: RingIndex,
    cell_area_sq_m: f64,
    field_area_sq_m: f64,
}

impl CoverageGrid {
    /// Tile the boundary's bounding box and keep the cells touching the
    /// ring.
    ///
    /// The cell side is half the implement width, so a single pass through
    /// a cell marks it covered even with sideways GPS error. Retained cells
    /// get consecutive 0-based ids in tessellation order, south to north
    /// and west to east.
    pub fn build(boundary: &FinalizedBoundary, implement_width_m: f64) -> Self {
        let side_m = implement_width_m / 2.0;
        let cell_area_sq_m = side_m * side_m;
        let field_area_sq_m = boundary.area_sq_m();

        let Some(bbox) = bounding_box(boundary.ring()) else {
            return Self { cells: Vec::new(), index: RingIndex::new(), cell_area_sq_m, field_area_sq_m };
        };

        let mut cells = Vec::new();
        for candidate in square_grid(&bbox, side_m) {
            if rings_intersect(&candidate, boundary.ring()) {
                let id = CellId(cells.len() as u32);
                cells.push(GridCell { id, ring: candidate });
            }
        }

        let index =
            RingIndex::bulk(cells.iter().map(|cell| (cell.id.0, cell.ring.clone())).collect());

        tracing::debug!(cells = cells.len(), cell_side_m = side_m, "Coverage grid built");

        Self { cells, index, cell_area_sq_m, field_area_sq_m }
    }

    /// First cell in id order whose interior contains the point; None when
    /// the point misses every cell
    pub fn locate(&self, point: GeoPoint) -> Option<CellId> {
        self.index.first_containing(point).map(CellId)
    }

    /// Cell stored under an id
    pub fn cell(&self, id: CellId) -> Option<&GridCell> {
        self.cells.get(id.0 as usize)
    }

    /// Number of cells in the grid
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate cells in id order
    pub fn iter(&self) -> impl Iterator<Item = &GridCell> {
        self.cells.iter()
    }

    /// Ground area of one cell
    pub fn cell_area_sq_m(&self) -> f64 {
        self.cell_area_sq_m
    }

    /// Geodesic area of the boundary the grid was built from
    pub fn field_area_sq_m(&self) -> f64 {
        self.field_area_sq_m
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use furrow_geo::area::ring_area_sq_m;

    fn boundary_from(points: Vec<GeoPoint>) -> FinalizedBoundary {
        let ring = Ring::from_points(points);
        let area = ring_area_sq_m(&ring);
        FinalizedBoundary::new(ring, area)
    }

    fn square_boundary() -> FinalizedBoundary {
        boundary_from(vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 0.001),
            GeoPoint::new(0.001, 0.001),
            GeoPoint::new(0.001, 0.0),
        ])
    }

    #[test]
    fn test_square_boundary_grid() {
        // ~111.2m square with 2m cells: 56 rows of 56, all touching the ring
        let boundary = square_boundary();
        let grid = CoverageGrid::build(&boundary, 4.0);

        assert_eq!(grid.len(), 56 * 56);
        assert_eq!(grid.cell_area_sq_m(), 4.0);
        assert_eq!(grid.field_area_sq_m(), boundary.area_sq_m());
        assert!(!grid.is_empty());
    }

    #[test]
    fn test_ids_are_consecutive_in_order() {
        let grid = CoverageGrid::build(&square_boundary(), 4.0);

        for (position, cell) in grid.iter().enumerate() {
            assert_eq!(cell.id, CellId(position as u32));
        }
    }

    #[test]
    fn test_every_cell_touches_the_boundary() {
        let boundary = boundary_from(vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 0.001),
            GeoPoint::new(0.001, 0.0),
        ]);
        let grid = CoverageGrid::build(&boundary, 4.0);

        // The triangle fills half its bounding box, so far fewer cells than
        // the full tessellation survive
        assert!(grid.len() < 56 * 56);
        assert!(grid.len() > 1_400);

        for cell in grid.iter() {
            assert!(rings_intersect(&cell.ring, boundary.ring()));
        }
    }

    #[test]
    fn test_locate_inside_and_outside() {
        let boundary = boundary_from(vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 0.001),
            GeoPoint::new(0.001, 0.0),
        ]);
        let grid = CoverageGrid::build(&boundary, 4.0);

        // Well inside the triangle
        assert!(grid.locate(GeoPoint::new(0.0002, 0.0002)).is_some());
        // Inside the bounding box but beyond the hypotenuse and every
        // retained cell
        assert_eq!(grid.locate(GeoPoint::new(0.0009, 0.0009)), None);
        // Far outside
        assert_eq!(grid.locate(GeoPoint::new(0.01, 0.01)), None);
    }

    #[test]
    fn test_locate_matches_cell_accessor() {
        let grid = CoverageGrid::build(&square_boundary(), 4.0);

        let probe = GeoPoint::new(0.0005, 0.0005);
        let id = grid.locate(probe).unwrap();
        let cell = grid.cell(id).unwrap();

        assert_eq!(cell.id, id);
        assert!(furrow_geo::spatial::point_in_ring(probe, &cell.ring));
    }

    #[test]
    fn test_cell_center() {
        let grid = CoverageGrid::build(&square_boundary(), 4.0);
        let cell = grid.cell(CellId(0)).unwrap();
        let center = cell.center();

        // Centre of the south-west cell sits just inside its corners
        let corners = cell.ring.points();
        assert!(center.latitude > corners[0].latitude);
        assert!(center.latitude < corners[2].latitude);
        assert!(center.longitude > corners[0].longitude);
        assert!(center.longitude < corners[2].longitude);

        // And locating the centre lands back in the same cell
        assert_eq!(grid.locate(center), Some(cell.id));
    }
}
