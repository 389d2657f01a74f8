use crate::config::EditorConfig;
use crate::door::{DoorGeometry, DoorId, DoorRegistry};
use crate::error::{PlanError, Result};
use crate::math::Point2;
use crate::outline::{wall_polygon, WallPolygon};
use crate::plan::{PlanStore, VertexId, VertexOverlay, WallId};
use crate::snap::{axis_align, find_snap_target, Mode, SnapTarget};

/// In-progress wall-drawing gesture.
#[derive(Debug, Clone, Copy)]
struct WallGesture {
    /// The vertex the next committed segment starts from.
    anchor: VertexId,
    /// A vertex created speculatively for this gesture, removable on cancel
    /// while no committed wall references it.
    speculative: Option<VertexId>,
}

/// Snapshot of a wall with its derived render polygon.
#[derive(Debug, Clone)]
pub struct WallView {
    pub id: WallId,
    pub start: VertexId,
    pub end: VertexId,
    pub thickness: f64,
    pub height: f64,
    pub name: String,
    pub polygon: WallPolygon,
}

/// Snapshot of a vertex.
#[derive(Debug, Clone, Copy)]
pub struct VertexView {
    pub id: VertexId,
    pub point: Point2,
}

/// Snapshot of a door with its derived geometry.
#[derive(Debug, Clone)]
pub struct DoorView {
    pub id: DoorId,
    pub wall: WallId,
    pub offset: f64,
    pub width: f64,
    pub height: f64,
    pub geometry: DoorGeometry,
}

/// Optional updates for a wall's editable attributes.
#[derive(Debug, Clone, Default)]
pub struct WallAttrPatch {
    pub name: Option<String>,
    pub thickness: Option<f64>,
    pub height: Option<f64>,
}

/// Synchronous command facade over the floor-plan geometry core.
///
/// Owns the plan store, the door registry, and the interaction state
/// (mode, selection, wall gesture, drag preview). Every command completes
/// its mutation and leaves the graph invariant-consistent before dependent
/// geometry is re-derived; callers only ever see settled state.
///
/// The editor consumes world-space points; coordinate transforms belong to
/// the input layer.
#[derive(Debug, Default)]
pub struct Editor {
    store: PlanStore,
    doors: DoorRegistry,
    config: EditorConfig,
    mode: Option<Mode>,
    selected_wall: Option<WallId>,
    gesture: Option<WallGesture>,
    drag: VertexOverlay,
}

impl Editor {
    /// Creates an editor with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an editor with the given configuration.
    #[must_use]
    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    // --- State accessors ---

    /// Read-only access to the plan store.
    #[must_use]
    pub fn plan(&self) -> &PlanStore {
        &self.store
    }

    /// The active interaction mode.
    #[must_use]
    pub fn mode(&self) -> Option<Mode> {
        self.mode
    }

    /// The currently selected wall, if any.
    #[must_use]
    pub fn selected_wall(&self) -> Option<WallId> {
        self.selected_wall
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Switches the interaction mode.
    ///
    /// Entering any tool mode clears the selection; leaving wall mode
    /// abandons an in-progress gesture, rolling back its speculative
    /// vertex.
    pub fn set_mode(&mut self, mode: Option<Mode>) {
        if mode.is_some() {
            self.selected_wall = None;
        }
        if mode != Some(Mode::Wall) {
            self.cancel_wall_gesture();
        }
        self.mode = mode;
    }

    // --- Queries for the renderer ---

    /// Current walls with their mitered polygons, drag preview applied.
    ///
    /// Walls whose geometry is degenerate (zero length after an edit) are
    /// skipped rather than rendered.
    #[must_use]
    pub fn walls(&self) -> Vec<WallView> {
        self.store
            .walls()
            .filter_map(|(id, wall)| {
                let polygon = wall_polygon(&self.store, &self.drag, id).ok()?;
                Some(WallView {
                    id,
                    start: wall.start,
                    end: wall.end,
                    thickness: wall.thickness,
                    height: wall.height,
                    name: wall.name.clone(),
                    polygon,
                })
            })
            .collect()
    }

    /// Current vertices at their committed positions.
    #[must_use]
    pub fn vertices(&self) -> Vec<VertexView> {
        self.store
            .vertices()
            .map(|(id, v)| VertexView { id, point: v.point })
            .collect()
    }

    /// Current doors with their derived geometry.
    #[must_use]
    pub fn doors(&self) -> Vec<DoorView> {
        self.doors
            .doors()
            .filter_map(|(id, door, geometry)| {
                Some(DoorView {
                    id,
                    wall: door.wall,
                    offset: door.offset,
                    width: door.width,
                    height: door.height,
                    geometry: *geometry?,
                })
            })
            .collect()
    }

    /// Centerline length of a wall, for the settings panel.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::WallNotFound` or `PlanError::VertexNotFound` if
    /// the wall or either endpoint is missing.
    pub fn wall_length(&self, id: WallId) -> Result<f64> {
        Ok(self.store.wall_length(id)?)
    }

    /// Snap lookup at the current mode's tolerance, for hover feedback.
    #[must_use]
    pub fn snap_at(&self, point: Point2) -> Option<SnapTarget> {
        find_snap_target(&self.store, &point, self.mode, self.snap_tolerance())
    }

    /// Where an in-progress wall segment would end for the given cursor:
    /// snapped, then axis-locked onto the gesture anchor.
    #[must_use]
    pub fn gesture_target(&self, cursor: Point2) -> Point2 {
        let candidate = match find_snap_target(
            &self.store,
            &cursor,
            Some(Mode::Wall),
            self.config.snap_distance,
        ) {
            Some(SnapTarget::Vertex { point, .. } | SnapTarget::Wall { point, .. }) => point,
            None => cursor,
        };
        match self.gesture_anchor_point() {
            Some(anchor) => axis_align(&candidate, &anchor, self.config.snap_distance),
            None => candidate,
        }
    }

    // --- Wall drawing ---

    /// Starts a wall-drawing gesture at `point`.
    ///
    /// The start vertex is resolved through snap: an existing vertex is
    /// reused, a wall hit is split at the snap point, and empty space gets
    /// a fresh vertex that stays speculative until a segment commits.
    pub fn begin_wall_gesture(&mut self, point: Point2) -> VertexId {
        let anchor = self.resolve_endpoint(point);
        self.doors.rederive(&self.store);
        self.gesture = Some(WallGesture {
            anchor,
            speculative: Some(anchor),
        });
        anchor
    }

    /// Commits one wall segment from the gesture anchor to `point` and
    /// chains the gesture onto the new endpoint.
    ///
    /// The pen moves to the resolved endpoint even when the segment itself
    /// is declined (duplicate or zero-length), so drawing can continue.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::NoActiveGesture` without a preceding
    /// [`Self::begin_wall_gesture`], `PlanError::DuplicateWall` when the
    /// segment already exists, and `PlanError::SelfLoopWall` when both ends
    /// resolve to the same vertex.
    pub fn commit_wall_segment(&mut self, point: Point2) -> Result<WallId> {
        let gesture = self.gesture.ok_or(PlanError::NoActiveGesture)?;
        let end = self.resolve_endpoint(point);
        let added = self
            .store
            .add_wall(gesture.anchor, end, self.config.wall_attrs());
        self.gesture = Some(WallGesture {
            anchor: end,
            speculative: None,
        });
        self.doors.rederive(&self.store);
        Ok(added?)
    }

    /// Abandons the wall-drawing gesture.
    ///
    /// Rolls back a speculatively created start vertex that no committed
    /// wall uses; committed graph state is untouched.
    pub fn cancel_wall_gesture(&mut self) {
        if let Some(WallGesture {
            speculative: Some(vertex),
            ..
        }) = self.gesture.take()
        {
            self.store.prune_vertex_if_orphan(vertex);
        }
    }

    // --- Vertex dragging ---

    /// Previews a vertex at `point` without touching the store.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::VertexNotFound` if the vertex is not live.
    pub fn drag_vertex(&mut self, id: VertexId, point: Point2) -> Result<()> {
        self.store.vertex(id)?;
        self.drag = VertexOverlay::new(id, point);
        Ok(())
    }

    /// Commits a vertex drag at `point`.
    ///
    /// Snap decides the outcome: another vertex within range merges the
    /// dragged vertex into it; a wall hit splits that wall with the dragged
    /// vertex at the snap point; empty space is a plain move. Doors are
    /// re-derived afterwards.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::VertexNotFound` if the vertex is not live.
    pub fn release_vertex(&mut self, id: VertexId, point: Point2) -> Result<()> {
        self.drag = VertexOverlay::default();
        self.store.vertex(id)?;

        match find_snap_target(&self.store, &point, self.mode, self.config.snap_distance) {
            Some(SnapTarget::Vertex { id: target, .. }) if target != id => {
                self.store.merge_vertices(target, id)?;
            }
            Some(SnapTarget::Wall {
                id: wall,
                point: foot,
                ..
            }) => {
                self.store.split_wall(wall, foot, Some(id))?;
            }
            _ => {
                self.store.move_vertex(id, point)?;
            }
        }
        self.doors.rederive(&self.store);
        Ok(())
    }

    // --- Selection and wall edits ---

    /// Hit-tests `point` against the wall bands and updates the selection.
    pub fn select_wall_at(&mut self, point: Point2) -> Option<WallId> {
        let hit = match find_snap_target(&self.store, &point, None, self.config.snap_distance) {
            Some(SnapTarget::Wall { id, .. }) => Some(id),
            _ => None,
        };
        self.selected_wall = hit;
        hit
    }

    /// Deletes a wall, pruning orphaned endpoints and dropping its doors.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::WallNotFound` if the wall is not live.
    pub fn delete_wall(&mut self, id: WallId) -> Result<()> {
        self.store.delete_wall(id)?;
        if self.selected_wall == Some(id) {
            self.selected_wall = None;
        }
        self.doors.rederive(&self.store);
        Ok(())
    }

    /// Applies a partial attribute update to a wall.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::WallNotFound` if the wall is not live, and
    /// `PlanError::NonPositiveAttribute` when thickness or height is not
    /// strictly positive (the wall keeps its previous values).
    pub fn set_wall_attributes(&mut self, id: WallId, patch: WallAttrPatch) -> Result<()> {
        if matches!(patch.thickness, Some(t) if t <= 0.0) {
            return Err(PlanError::NonPositiveAttribute("thickness").into());
        }
        if matches!(patch.height, Some(h) if h <= 0.0) {
            return Err(PlanError::NonPositiveAttribute("height").into());
        }
        let wall = self.store.wall_mut(id)?;
        if let Some(name) = patch.name {
            wall.name = name;
        }
        if let Some(thickness) = patch.thickness {
            wall.thickness = thickness;
        }
        if let Some(height) = patch.height {
            wall.height = height;
        }
        self.doors.rederive(&self.store);
        Ok(())
    }

    // --- Doors ---

    /// Validates and places a door on `wall` at the world point `point`.
    ///
    /// # Errors
    ///
    /// Propagates placement rejections: `PlacementError::WallMissing`,
    /// `PlacementError::OverhangsWallEnd`, and
    /// `PlacementError::OverlapsExistingDoor`.
    pub fn place_door_at(&mut self, wall: WallId, point: Point2) -> Result<DoorId> {
        self.doors.place(&self.store, &self.config, wall, point)
    }

    // --- Internals ---

    fn snap_tolerance(&self) -> f64 {
        match self.mode {
            Some(Mode::Door) => self.config.door_snap_distance,
            _ => self.config.snap_distance,
        }
    }

    fn gesture_anchor_point(&self) -> Option<Point2> {
        let gesture = self.gesture?;
        self.store.vertex(gesture.anchor).ok().map(|v| v.point)
    }

    /// Resolves a gesture endpoint: reuse a snapped vertex, split a snapped
    /// wall, or create a fresh vertex in empty space.
    fn resolve_endpoint(&mut self, point: Point2) -> VertexId {
        match find_snap_target(
            &self.store,
            &point,
            Some(Mode::Wall),
            self.config.snap_distance,
        ) {
            Some(SnapTarget::Vertex { id, .. }) => id,
            Some(SnapTarget::Wall {
                id,
                point: foot, ..
            }) => self
                .store
                .split_wall(id, foot, None)
                .unwrap_or_else(|_| self.store.add_vertex(point)),
            None => self.store.add_vertex(point),
        }
    }
}
