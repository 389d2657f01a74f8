use slotmap::{SecondaryMap, SlotMap};

use crate::config::EditorConfig;
use crate::error::{GeometryError, PlacementError, Result};
use crate::math::distance_2d::scalar_projection;
use crate::math::polygon_2d::polygons_overlap;
use crate::math::{Point2, Vector2, TOLERANCE};
use crate::plan::{PlanStore, WallId};

slotmap::new_key_type! {
    /// Unique identifier for a door.
    pub struct DoorId;
}

/// A door anchored to a wall by an absolute centerline offset.
///
/// `offset` is the distance of the door's center from the wall's start
/// vertex, fixed at commit time. It survives endpoint nudges unchanged; the
/// derived geometry is what moves.
#[derive(Debug, Clone)]
pub struct Door {
    /// Back-reference to the owning wall, re-resolved on every pass.
    pub wall: WallId,
    /// Distance of the door center from the wall's start vertex.
    pub offset: f64,
    /// Opening width along the wall.
    pub width: f64,
    /// Leaf thickness, clamped to the wall's thickness on derivation.
    pub height: f64,
}

/// Geometry derived from a door's current wall.
///
/// Never source of truth; recomputed from the live wall and door fields
/// whenever wall geometry changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoorGeometry {
    /// Door center on the wall centerline.
    pub center: Point2,
    /// Direction of the wall, in degrees.
    pub angle_deg: f64,
    /// Wall-thickness-sized rectangle cut out of the wall.
    pub outer: [Point2; 4],
    /// The door-leaf rectangle.
    pub inner: [Point2; 4],
}

/// The accepted result of a placement validation.
#[derive(Debug, Clone, Copy)]
pub struct DoorFit {
    pub center: Point2,
    pub angle_deg: f64,
    pub offset: f64,
    pub door_length: f64,
    pub door_height: f64,
}

/// Owns all doors and their derived geometry.
///
/// Holds only `WallId` back-references into the plan store, never owning
/// wall data; a door whose wall disappears is dropped on the next
/// re-derivation, not reported as an error.
#[derive(Debug, Default)]
pub struct DoorRegistry {
    doors: SlotMap<DoorId, Door>,
    derived: SecondaryMap<DoorId, DoorGeometry>,
}

impl DoorRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates a door placement on `wall_id` at the world point `point`.
    ///
    /// The door is centered on the centerline foot of `point`'s projection.
    /// The overlap check expands the candidate's wall-cut rectangle by the
    /// configured clearance margin on every side and tests it against the
    /// stored outer polygon of every other door on the same wall; a door
    /// re-evaluated at its own unchanged center is not its own obstacle.
    ///
    /// # Errors
    ///
    /// Returns `PlacementError::WallMissing` if the wall or an endpoint
    /// cannot be resolved, `GeometryError::Degenerate` for a zero-length
    /// wall, `PlacementError::OverhangsWallEnd` if the door would extend
    /// past either end, and `PlacementError::OverlapsExistingDoor` on
    /// overlap.
    pub fn validate_placement(
        &self,
        store: &PlanStore,
        config: &EditorConfig,
        wall_id: WallId,
        point: Point2,
    ) -> Result<DoorFit> {
        let Ok(wall) = store.wall(wall_id) else {
            return Err(PlacementError::WallMissing.into());
        };
        let (Ok(v1), Ok(v2)) = (store.vertex(wall.start), store.vertex(wall.end)) else {
            return Err(PlacementError::WallMissing.into());
        };
        let d = v2.point - v1.point;
        let len = d.norm();
        if len < TOLERANCE {
            return Err(GeometryError::Degenerate("zero-length wall".to_owned()).into());
        }
        let dir = d / len;

        let door_length = config.door_width;
        let door_height = config.door_height.min(wall.thickness);
        let offset = scalar_projection(&point, &v1.point, &v2.point);

        if offset < door_length / 2.0 || offset > len - door_length / 2.0 {
            return Err(PlacementError::OverhangsWallEnd.into());
        }

        let center = v1.point + dir * offset;
        let perp = Vector2::new(-dir.y, dir.x);
        let margin = config.door_clearance_margin;
        let candidate = rect_corners(
            center,
            dir,
            perp,
            door_length / 2.0 + margin,
            wall.thickness / 2.0 + margin,
        );

        for (id, door) in &self.doors {
            if door.wall != wall_id {
                continue;
            }
            let Some(existing) = self.derived.get(id) else {
                continue;
            };
            if (existing.center - center).norm() < TOLERANCE {
                continue;
            }
            if polygons_overlap(&candidate, &existing.outer) {
                return Err(PlacementError::OverlapsExistingDoor.into());
            }
        }

        Ok(DoorFit {
            center,
            angle_deg: dir.y.atan2(dir.x).to_degrees(),
            offset,
            door_length,
            door_height,
        })
    }

    /// Validates and commits a door placement.
    ///
    /// # Errors
    ///
    /// Propagates every rejection from [`Self::validate_placement`].
    pub fn place(
        &mut self,
        store: &PlanStore,
        config: &EditorConfig,
        wall_id: WallId,
        point: Point2,
    ) -> Result<DoorId> {
        let fit = self.validate_placement(store, config, wall_id, point)?;
        let door = Door {
            wall: wall_id,
            offset: fit.offset,
            width: fit.door_length,
            height: fit.door_height,
        };
        let geometry = derive_geometry(store, &door);
        let id = self.doors.insert(door);
        if let Some(geometry) = geometry {
            self.derived.insert(id, geometry);
        }
        Ok(id)
    }

    /// Recomputes every door's derived geometry from the current graph.
    ///
    /// Doors whose wall no longer resolves, or whose wall has collapsed to
    /// zero length, are dropped. Pure function of current state: running
    /// this twice on an unchanged graph yields identical output.
    pub fn rederive(&mut self, store: &PlanStore) {
        let ids: Vec<DoorId> = self.doors.keys().collect();
        for id in ids {
            let Some(door) = self.doors.get(id) else {
                continue;
            };
            match derive_geometry(store, door) {
                Some(geometry) => {
                    self.derived.insert(id, geometry);
                }
                None => {
                    tracing::debug!("dropping door whose wall is gone");
                    self.doors.remove(id);
                    self.derived.remove(id);
                }
            }
        }
    }

    /// Returns a door's stored fields.
    #[must_use]
    pub fn door(&self, id: DoorId) -> Option<&Door> {
        self.doors.get(id)
    }

    /// Returns a door's derived geometry.
    #[must_use]
    pub fn geometry(&self, id: DoorId) -> Option<&DoorGeometry> {
        self.derived.get(id)
    }

    /// Iterates over all doors with their derived geometry.
    pub fn doors(&self) -> impl Iterator<Item = (DoorId, &Door, Option<&DoorGeometry>)> + '_ {
        self.doors
            .iter()
            .map(|(id, door)| (id, door, self.derived.get(id)))
    }

    /// Removes a door directly (owning-wall deletion is handled by
    /// [`Self::rederive`]).
    pub fn remove(&mut self, id: DoorId) {
        self.doors.remove(id);
        self.derived.remove(id);
    }

    /// Number of live doors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.doors.len()
    }

    /// True when no doors exist.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.doors.is_empty()
    }
}

/// Derives a door's geometry from its current wall, or `None` when the wall
/// is missing or degenerate.
fn derive_geometry(store: &PlanStore, door: &Door) -> Option<DoorGeometry> {
    let wall = store.wall(door.wall).ok()?;
    let v1 = store.vertex(wall.start).ok()?.point;
    let v2 = store.vertex(wall.end).ok()?.point;
    let d = v2 - v1;
    let len = d.norm();
    if len < TOLERANCE {
        return None;
    }
    let dir = d / len;
    let perp = Vector2::new(-dir.y, dir.x);
    let center = v1 + dir * door.offset;
    let half_len = door.width / 2.0;
    Some(DoorGeometry {
        center,
        angle_deg: dir.y.atan2(dir.x).to_degrees(),
        outer: rect_corners(center, dir, perp, half_len, wall.thickness / 2.0),
        inner: rect_corners(center, dir, perp, half_len, door.height.min(wall.thickness) / 2.0),
    })
}

/// The four corners of a rectangle centered on `center`, spanning
/// `±half_len` along `dir` and `±half_thick` along `perp`.
fn rect_corners(
    center: Point2,
    dir: Vector2,
    perp: Vector2,
    half_len: f64,
    half_thick: f64,
) -> [Point2; 4] {
    [
        center - dir * half_len - perp * half_thick,
        center + dir * half_len - perp * half_thick,
        center + dir * half_len + perp * half_thick,
        center - dir * half_len + perp * half_thick,
    ]
}
