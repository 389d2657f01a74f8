use super::{Point2, Vector2};

/// Convex-polygon overlap via the separating-axis test.
///
/// Checks every edge normal of both polygons; the polygons overlap iff no
/// axis separates their projections. Assumes convex, simple polygons with
/// vertices in a consistent winding. Symmetric in its arguments.
#[must_use]
pub fn polygons_overlap(a: &[Point2], b: &[Point2]) -> bool {
    if a.len() < 3 || b.len() < 3 {
        return false;
    }
    for polygon in [a, b] {
        for i in 0..polygon.len() {
            let p1 = polygon[i];
            let p2 = polygon[(i + 1) % polygon.len()];
            // Edge normal; its length cancels out of the comparison.
            let axis = Vector2::new(p2.y - p1.y, p1.x - p2.x);

            let (min_a, max_a) = projected_extent(a, &axis);
            let (min_b, max_b) = projected_extent(b, &axis);
            if max_a < min_b || max_b < min_a {
                return false;
            }
        }
    }
    true
}

/// Projects every vertex onto `axis` and returns the (min, max) extent.
fn projected_extent(points: &[Point2], axis: &Vector2) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for p in points {
        let projected = p.coords.dot(axis);
        min = min.min(projected);
        max = max.max(projected);
    }
    (min, max)
}
