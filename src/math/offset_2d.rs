use crate::error::{GeometryError, Result};

use super::{Point2, TOLERANCE};

/// Translates the segment `a→b` perpendicular to its direction by `distance`.
///
/// A positive distance offsets to the left of the direction of travel, a
/// negative distance to the right.
///
/// # Errors
///
/// Returns `GeometryError::ZeroVector` if `a` and `b` coincide; callers must
/// guard against zero-length segments.
pub fn offset_segment(a: &Point2, b: &Point2, distance: f64) -> Result<(Point2, Point2)> {
    let d = b - a;
    let len = d.norm();
    if len < TOLERANCE {
        return Err(GeometryError::ZeroVector.into());
    }
    let ox = -d.y / len * distance;
    let oy = d.x / len * distance;
    Ok((
        Point2::new(a.x + ox, a.y + oy),
        Point2::new(b.x + ox, b.y + oy),
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    #[test]
    fn horizontal_segment_offsets_left() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(4.0, 0.0);
        let (p1, p2) = offset_segment(&a, &b, 2.0).unwrap();
        assert!((p1.x).abs() < TOL && (p1.y - 2.0).abs() < TOL, "p1={p1}");
        assert!((p2.x - 4.0).abs() < TOL && (p2.y - 2.0).abs() < TOL, "p2={p2}");
    }

    #[test]
    fn negative_distance_offsets_right() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(4.0, 0.0);
        let (p1, p2) = offset_segment(&a, &b, -2.0).unwrap();
        assert!((p1.y + 2.0).abs() < TOL, "p1={p1}");
        assert!((p2.y + 2.0).abs() < TOL, "p2={p2}");
    }

    #[test]
    fn offset_preserves_length() {
        let a = Point2::new(1.0, 2.0);
        let b = Point2::new(4.0, 6.0);
        let (p1, p2) = offset_segment(&a, &b, 3.0).unwrap();
        let original = (b - a).norm();
        let offset = (p2 - p1).norm();
        assert!((original - offset).abs() < TOL, "offset={offset}");
    }

    #[test]
    fn zero_length_segment_is_rejected() {
        let a = Point2::new(1.0, 1.0);
        assert!(offset_segment(&a, &a, 2.0).is_err());
    }
}
