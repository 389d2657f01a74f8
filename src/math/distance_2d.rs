use super::{Point2, TOLERANCE};

/// Projects `p` onto the segment `a→b` with the parameter clamped to `[0, 1]`.
///
/// Returns `(t, foot, dist)`: the clamped parameter, the closest point on the
/// segment, and the distance from `p` to that point. A degenerate segment
/// projects to `t = 0` with `foot = a`.
#[must_use]
pub fn project_onto_segment(p: &Point2, a: &Point2, b: &Point2) -> (f64, Point2, f64) {
    let d = b - a;
    let len_sq = d.norm_squared();
    if len_sq < TOLERANCE * TOLERANCE {
        return (0.0, *a, (p - a).norm());
    }
    let t = ((p - a).dot(&d) / len_sq).clamp(0.0, 1.0);
    let foot = a + d * t;
    (t, foot, (p - foot).norm())
}

/// Unclamped scalar projection of `p` onto the line through `a` and `b`,
/// expressed as a signed distance from `a` along the `a→b` direction.
///
/// Returns `0.0` for a degenerate segment.
#[must_use]
pub fn scalar_projection(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let d = b - a;
    let len = d.norm();
    if len < TOLERANCE {
        return 0.0;
    }
    (p - a).dot(&d) / len
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    #[test]
    fn interior_projection() {
        let (t, foot, dist) = project_onto_segment(
            &Point2::new(1.0, 1.0),
            &Point2::new(0.0, 0.0),
            &Point2::new(2.0, 0.0),
        );
        assert!((t - 0.5).abs() < TOL, "t={t}");
        assert!((foot.x - 1.0).abs() < TOL && foot.y.abs() < TOL, "foot={foot}");
        assert!((dist - 1.0).abs() < TOL, "dist={dist}");
    }

    #[test]
    fn projection_clamps_to_endpoints() {
        let (t, foot, dist) = project_onto_segment(
            &Point2::new(-3.0, 0.0),
            &Point2::new(0.0, 0.0),
            &Point2::new(2.0, 0.0),
        );
        assert!(t.abs() < TOL, "t={t}");
        assert!(foot.x.abs() < TOL, "foot={foot}");
        assert!((dist - 3.0).abs() < TOL, "dist={dist}");
    }

    #[test]
    fn degenerate_segment_projects_to_start() {
        let a = Point2::new(1.0, 1.0);
        let (t, foot, dist) = project_onto_segment(&Point2::new(4.0, 5.0), &a, &a);
        assert!(t.abs() < TOL);
        assert!((foot - a).norm() < TOL);
        assert!((dist - 5.0).abs() < TOL, "dist={dist}");
    }

    #[test]
    fn scalar_projection_is_unclamped() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(10.0, 0.0);
        let before = scalar_projection(&Point2::new(-4.0, 3.0), &a, &b);
        let beyond = scalar_projection(&Point2::new(14.0, -2.0), &a, &b);
        assert!((before + 4.0).abs() < TOL, "before={before}");
        assert!((beyond - 14.0).abs() < TOL, "beyond={beyond}");
    }

    #[test]
    fn scalar_projection_ignores_perpendicular_component() {
        let d = scalar_projection(
            &Point2::new(3.0, 7.0),
            &Point2::new(0.0, 0.0),
            &Point2::new(10.0, 0.0),
        );
        assert!((d - 3.0).abs() < TOL, "d={d}");
    }
}
