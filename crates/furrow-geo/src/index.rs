use crate::spatial::{bounding_box, point_in_ring};
use furrow_core::models::{GeoPoint, Ring};
use rstar::{RTree, RTreeObject, AABB};

/// A ring stored in the spatial index, tagged with its cell id
#[derive(Debug, Clone)]
pub struct IndexedRing {
    /// Identifier carried back out of lookups
    pub id: u32,

    /// The ring itself
    pub ring: Ring,

    /// Bounding box for spatial indexing
    envelope: AABB<[f64; 2]>,
}

impl IndexedRing {
    /// Create a new indexed ring
    pub fn new(id: u32, ring: Ring) -> Self {
        let envelope = Self::compute_envelope(&ring);
        Self { id, ring, envelope }
    }

    /// Compute the bounding box (envelope) for a ring
    fn compute_envelope(ring: &Ring) -> AABB<[f64; 2]> {
        match bounding_box(ring) {
            Some(bbox) => {
                AABB::from_corners([bbox.min_lon, bbox.min_lat], [bbox.max_lon, bbox.max_lat])
            }
            // Empty rings get a degenerate envelope at the origin; they can
            // never pass the exact containment test anyway
            None => AABB::from_point([0.0, 0.0]),
        }
    }
}

impl RTreeObject for IndexedRing {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// R-tree over rings for point-to-ring lookup
pub struct RingIndex {
    tree: RTree<IndexedRing>,
}

impl RingIndex {
    /// Create a new empty index
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Bulk-load an index from id-tagged rings
    pub fn bulk(rings: Vec<(u32, Ring)>) -> Self {
        let indexed: Vec<IndexedRing> =
            rings.into_iter().map(|(id, ring)| IndexedRing::new(id, ring)).collect();

        Self { tree: RTree::bulk_load(indexed) }
    }

    /// Find the lowest-id ring whose interior contains the point.
    ///
    /// Envelope candidates are narrowed with the exact containment test. A
    /// point on a shared cell edge can sit in more than one ring; taking
    /// the lowest id keeps lookups deterministic.
    pub fn first_containing(&self, point: GeoPoint) -> Option<u32> {
        let probe = AABB::from_point([point.longitude, point.latitude]);

        self.tree
            .locate_in_envelope_intersecting(&probe)
            .filter(|indexed| point_in_ring(point, &indexed.ring))
            .map(|indexed| indexed.id)
            .min()
    }

    /// Get the ring stored under an id
    pub fn ring(&self, id: u32) -> Option<&Ring> {
        self.tree.iter().find(|indexed| indexed.id == id).map(|indexed| &indexed.ring)
    }

    /// Get the total number of rings in the index
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl Default for RingIndex {
    fn default() -> Self {
        Self::new()
    }
}
