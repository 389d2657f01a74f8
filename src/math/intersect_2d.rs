use super::{Point2, PARALLEL_EPS};

/// Intersection of the infinite lines through `p1→p2` and `p3→p4`.
///
/// Uses the standard `a·x + b·y = c` two-line determinant form. Returns
/// `None` when the lines are parallel (determinant magnitude below
/// [`PARALLEL_EPS`]).
#[must_use]
pub fn line_line_intersection(
    p1: &Point2,
    p2: &Point2,
    p3: &Point2,
    p4: &Point2,
) -> Option<Point2> {
    let a1 = p2.y - p1.y;
    let b1 = p1.x - p2.x;
    let c1 = a1 * p1.x + b1 * p1.y;

    let a2 = p4.y - p3.y;
    let b2 = p3.x - p4.x;
    let c2 = a2 * p3.x + b2 * p3.y;

    let det = a1 * b2 - a2 * b1;
    if det.abs() < PARALLEL_EPS {
        return None;
    }
    Some(Point2::new(
        (b2 * c1 - b1 * c2) / det,
        (a1 * c2 - a2 * c1) / det,
    ))
}
