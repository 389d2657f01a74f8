use crate::math::distance_2d::project_onto_segment;
use crate::math::Point2;
use crate::plan::{PlanStore, VertexId, WallId};

/// Interaction mode driving snap priorities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Drawing wall segments.
    Wall,
    /// Placing doors on walls.
    Door,
}

/// The vertex or wall-segment point a pointer interaction locks onto.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SnapTarget {
    /// Snapped onto an existing vertex.
    Vertex { id: VertexId, point: Point2 },
    /// Snapped onto a point on a wall's centerline.
    Wall { id: WallId, point: Point2, t: f64 },
}

/// Maps a cursor point to the best snap target within `tolerance`.
///
/// In wall-drawing mode the vertex pass runs first and returns the FIRST
/// vertex within range in store order (an early exit, not a nearest
/// search); vertex snap takes unconditional priority over wall snap. The
/// wall pass projects onto each centerline, accepts candidates within half
/// the wall's thickness plus `tolerance`, and returns the one with globally
/// minimum perpendicular distance.
#[must_use]
pub fn find_snap_target(
    store: &PlanStore,
    point: &Point2,
    mode: Option<Mode>,
    tolerance: f64,
) -> Option<SnapTarget> {
    if mode == Some(Mode::Wall) {
        for (id, v) in store.vertices() {
            if (v.point - point).norm() <= tolerance {
                return Some(SnapTarget::Vertex { id, point: v.point });
            }
        }
    }

    let mut best: Option<SnapTarget> = None;
    let mut best_dist = f64::INFINITY;
    for (id, wall) in store.walls() {
        let (Ok(v1), Ok(v2)) = (store.vertex(wall.start), store.vertex(wall.end)) else {
            continue;
        };
        let (t, foot, dist) = project_onto_segment(point, &v1.point, &v2.point);
        let range = wall.thickness / 2.0 + tolerance;
        if dist <= range && dist < best_dist {
            best_dist = dist;
            best = Some(SnapTarget::Wall { id, point: foot, t });
        }
    }
    best
}

/// Locks an in-progress wall endpoint onto the gesture anchor's axes.
///
/// When the segment from `anchor` to `target` is nearly axis-parallel, the
/// smaller coordinate delta collapses onto the anchor's axis; otherwise the
/// target passes through unchanged.
#[must_use]
pub fn axis_align(target: &Point2, anchor: &Point2, tolerance: f64) -> Point2 {
    let dx = (target.x - anchor.x).abs();
    let dy = (target.y - anchor.y).abs();
    if dx < tolerance && dx < dy {
        Point2::new(anchor.x, target.y)
    } else if dy < tolerance && dy < dx {
        Point2::new(target.x, anchor.y)
    } else {
        *target
    }
}
