use serde::{Deserialize, Serialize};

use crate::models::point::GeoPoint;

/// An ordered, implicitly closed polygon boundary.
///
/// Points are stored open (the last point is not a repeat of the first);
/// the closing edge from the last point back to the first is implied.
/// Insertion order is significant: it defines the edges and the winding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    points: Vec<GeoPoint>,
}

impl Ring {
    /// Create an empty ring
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ring from an ordered point sequence (stored open)
    pub fn from_points(points: Vec<GeoPoint>) -> Self {
        Self { points }
    }

    /// The points in insertion order
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    /// Append a point after the current last point
    pub fn push(&mut self, point: GeoPoint) {
        self.points.push(point);
    }

    /// Remove and return the last point
    pub fn pop(&mut self) -> Option<GeoPoint> {
        self.points.pop()
    }

    /// Remove every point
    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Edges of the closed ring, including the implied closing edge.
    pub fn closed_edges(&self) -> impl Iterator<Item = (GeoPoint, GeoPoint)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }
}
