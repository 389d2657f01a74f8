use crate::error::{PlanError, Result};
use crate::math::intersect_2d::line_line_intersection;
use crate::math::offset_2d::offset_segment;
use crate::math::{Point2, TOLERANCE};
use crate::plan::{PlanStore, VertexId, VertexOverlay, WallId};

/// The mitered quadrilateral rendered for a wall.
///
/// Winding order: `[inner_start, inner_end, outer_end, outer_start]`
/// (closed). The inner edge is the offset at `+thickness/2`, the outer at
/// `-thickness/2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallPolygon {
    pub points: [Point2; 4],
}

/// Builds the mitered render polygon for a wall.
///
/// Both offset lines are intersected with the best-matching neighbor at
/// each shared vertex (see [`junction_point`]); endpoints with no neighbor,
/// or whose every candidate pairing is numerically parallel, keep the
/// unadjusted offset-line endpoint. Pure function of the current graph (and
/// overlay), so repeated calls on unchanged state are identical.
///
/// # Errors
///
/// Returns `PlanError::WallNotFound` if the wall is missing,
/// `PlanError::VertexNotFound` if an endpoint is dangling, and
/// `GeometryError::ZeroVector` for a zero-length wall; callers skip
/// rendering such walls.
pub fn wall_polygon(
    store: &PlanStore,
    overlay: &VertexOverlay,
    wall_id: WallId,
) -> Result<WallPolygon> {
    let wall = store.wall(wall_id)?;
    let v1 = overlay
        .resolve(store, wall.start)
        .ok_or(PlanError::VertexNotFound)?;
    let v2 = overlay
        .resolve(store, wall.end)
        .ok_or(PlanError::VertexNotFound)?;
    let half = wall.thickness / 2.0;

    let inner = offset_segment(&v1, &v2, half)?;
    let outer = offset_segment(&v1, &v2, -half)?;

    let inner_start =
        junction_point(store, overlay, wall_id, wall.start, half, &inner).unwrap_or(inner.0);
    let inner_end =
        junction_point(store, overlay, wall_id, wall.end, half, &inner).unwrap_or(inner.1);
    let outer_end =
        junction_point(store, overlay, wall_id, wall.end, -half, &outer).unwrap_or(outer.1);
    let outer_start =
        junction_point(store, overlay, wall_id, wall.start, -half, &outer).unwrap_or(outer.0);

    Ok(WallPolygon {
        points: [inner_start, inner_end, outer_end, outer_start],
    })
}

/// Resolves the mitered corner where `wall_id`'s offset line meets `vertex`.
///
/// Scans the other walls incident on the vertex, offsets each on the same
/// signed side, and measures the angle between the two offset-line
/// directions (dot product / arccos, clamped to `[-1, 1]` against
/// floating-point drift). The neighbor closest to a straight continuation
/// (smallest angle) whose offset line actually intersects the base line
/// becomes the miter partner. Returns `None` when the vertex has no other
/// walls or no candidate pairing intersects.
fn junction_point(
    store: &PlanStore,
    overlay: &VertexOverlay,
    wall_id: WallId,
    vertex: VertexId,
    signed_half: f64,
    base: &(Point2, Point2),
) -> Option<Point2> {
    let base_dir = base.1 - base.0;

    let mut best_angle = f64::INFINITY;
    let mut best: Option<Point2> = None;

    for (other_id, other) in store.walls_at(vertex) {
        if other_id == wall_id {
            continue;
        }
        let (Some(a), Some(b)) = (
            overlay.resolve(store, other.start),
            overlay.resolve(store, other.end),
        ) else {
            continue;
        };
        let Ok(other_line) = offset_segment(&a, &b, signed_half) else {
            continue;
        };
        let dir = other_line.1 - other_line.0;

        let denom = base_dir.norm() * dir.norm();
        if denom < TOLERANCE {
            continue;
        }
        let angle = (base_dir.dot(&dir) / denom).clamp(-1.0, 1.0).acos();

        if angle < best_angle {
            if let Some(corner) =
                line_line_intersection(&base.0, &base.1, &other_line.0, &other_line.1)
            {
                best_angle = angle;
                best = Some(corner);
            }
        }
    }
    best
}
