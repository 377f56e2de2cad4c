use furrow_core::models::{GeoPoint, Ring};

/// Sign of the cross product (b - a) x (c - a).
///
/// Positive when c lies left of the directed line a -> b, negative when
/// right, zero when collinear. Degree-space planar math is accurate at
/// field scale.
fn orientation(a: GeoPoint, b: GeoPoint, c: GeoPoint) -> f64 {
    (b.longitude - a.longitude) * (c.latitude - a.latitude)
        - (b.latitude - a.latitude) * (c.longitude - a.longitude)
}

/// Whether p, already known collinear with segment ab, lies within its extent
fn on_segment(a: GeoPoint, b: GeoPoint, p: GeoPoint) -> bool {
    p.longitude >= a.longitude.min(b.longitude)
        && p.longitude <= a.longitude.max(b.longitude)
        && p.latitude >= a.latitude.min(b.latitude)
        && p.latitude <= a.latitude.max(b.latitude)
}

/// Segment intersection test, counting touching and collinear overlap
pub fn segments_intersect(a1: GeoPoint, a2: GeoPoint, b1: GeoPoint, b2: GeoPoint) -> bool {
    let d1 = orientation(b1, b2, a1);
    let d2 = orientation(b1, b2, a2);
    let d3 = orientation(a1, a2, b1);
    let d4 = orientation(a1, a2, b2);

    // Proper crossing: each segment straddles the other's line
    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    // Collinear endpoints resting on the other segment
    if d1 == 0.0 && on_segment(b1, b2, a1) {
        return true;
    }
    if d2 == 0.0 && on_segment(b1, b2, a2) {
        return true;
    }
    if d3 == 0.0 && on_segment(a1, a2, b1) {
        return true;
    }
    if d4 == 0.0 && on_segment(a1, a2, b2) {
        return true;
    }

    false
}

/// Find the first pair of non-adjacent ring edges that cross.
///
/// Edges are indexed in ring order including the closing edge, so a ring of
/// n points has n edges. Edges that share a vertex always touch and are
/// skipped. Rings with fewer than 4 points cannot self-intersect and return
/// None.
pub fn find_kink(ring: &Ring) -> Option<(usize, usize)> {
    let n = ring.len();
    if n < 4 {
        return None;
    }

    let edges: Vec<(GeoPoint, GeoPoint)> = ring.closed_edges().collect();

    for i in 0..n {
        for j in (i + 1)..n {
            // Consecutive edges share a vertex, as do the first and closing edge
            if j == i + 1 || (i == 0 && j == n - 1) {
                continue;
            }

            let (a1, a2) = edges[i];
            let (b1, b2) = edges[j];
            if segments_intersect(a1, a2, b1, b2) {
                return Some((i, j));
            }
        }
    }

    None
}

/// True when no two non-adjacent edges of the ring cross
pub fn is_simple(ring: &Ring) -> bool {
    find_kink(ring).is_none()
}
