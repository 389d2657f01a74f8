pub mod vertex;
pub mod wall;

pub use vertex::{Vertex, VertexId};
pub use wall::{Wall, WallAttrs, WallId};

use std::collections::HashSet;

use slotmap::SlotMap;

use crate::error::PlanError;
use crate::math::Point2;

/// Central arena that owns the floor plan's vertices and walls.
///
/// All structural mutation goes through the typed operations below, never
/// through direct collection edits, so the graph invariants stay in one
/// place: no wall connects a vertex to itself, no two walls share an
/// unordered endpoint pair, and every wall endpoint resolves to a live
/// vertex.
#[derive(Debug, Default)]
pub struct PlanStore {
    vertices: SlotMap<VertexId, Vertex>,
    walls: SlotMap<WallId, Wall>,
}

impl PlanStore {
    /// Creates a new, empty plan store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Vertex operations ---

    /// Appends a new vertex and returns its ID. Never fails.
    pub fn add_vertex(&mut self, point: Point2) -> VertexId {
        self.vertices.insert(Vertex::new(point))
    }

    /// Returns a reference to the vertex, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::VertexNotFound` if the vertex is not in the store.
    pub fn vertex(&self, id: VertexId) -> Result<&Vertex, PlanError> {
        self.vertices.get(id).ok_or(PlanError::VertexNotFound)
    }

    /// Updates a vertex's coordinates in place.
    ///
    /// The store performs no cascading side effects; dependent geometry
    /// (wall polygons, doors) re-pulls on demand.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::VertexNotFound` if the vertex is not in the store.
    pub fn move_vertex(&mut self, id: VertexId, point: Point2) -> Result<(), PlanError> {
        let vertex = self.vertices.get_mut(id).ok_or(PlanError::VertexNotFound)?;
        vertex.point = point;
        Ok(())
    }

    /// Re-points every wall endpoint at `remove` to `keep`, drops any wall
    /// collapsed into a self-loop, de-duplicates walls sharing an unordered
    /// endpoint pair (first occurrence in store order wins), and removes the
    /// merged vertex. No-op when `keep == remove`.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::VertexNotFound` if either vertex is not in the
    /// store.
    pub fn merge_vertices(&mut self, keep: VertexId, remove: VertexId) -> Result<(), PlanError> {
        if keep == remove {
            return Ok(());
        }
        if !self.vertices.contains_key(keep) || !self.vertices.contains_key(remove) {
            return Err(PlanError::VertexNotFound);
        }

        for wall in self.walls.values_mut() {
            if wall.start == remove {
                wall.start = keep;
            }
            if wall.end == remove {
                wall.end = keep;
            }
        }

        let mut seen: HashSet<(VertexId, VertexId)> = HashSet::new();
        let mut dropped: Vec<WallId> = Vec::new();
        for (id, wall) in &self.walls {
            if wall.start == wall.end {
                dropped.push(id);
                continue;
            }
            if !seen.insert(unordered_pair(wall.start, wall.end)) {
                dropped.push(id);
            }
        }
        if !dropped.is_empty() {
            tracing::debug!(count = dropped.len(), "merge collapsed walls");
        }
        for id in dropped {
            self.walls.remove(id);
        }

        self.vertices.remove(remove);
        Ok(())
    }

    /// Removes the vertex if no wall references it.
    pub fn prune_vertex_if_orphan(&mut self, id: VertexId) {
        if self.vertices.contains_key(id) && !self.walls.values().any(|w| w.touches(id)) {
            self.vertices.remove(id);
        }
    }

    /// Iterates over all live vertices in store order.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &Vertex)> + '_ {
        self.vertices.iter()
    }

    /// Number of live vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    // --- Wall operations ---

    /// Inserts a wall between two existing vertices.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::SelfLoopWall` if `start == end`,
    /// `PlanError::VertexNotFound` if either endpoint is dangling, and
    /// `PlanError::DuplicateWall` if a wall already connects the same
    /// unordered pair.
    pub fn add_wall(
        &mut self,
        start: VertexId,
        end: VertexId,
        attrs: WallAttrs,
    ) -> Result<WallId, PlanError> {
        if start == end {
            return Err(PlanError::SelfLoopWall);
        }
        if !self.vertices.contains_key(start) || !self.vertices.contains_key(end) {
            return Err(PlanError::VertexNotFound);
        }
        if self.wall_between(start, end).is_some() {
            return Err(PlanError::DuplicateWall);
        }
        Ok(self.walls.insert(Wall {
            start,
            end,
            thickness: attrs.thickness,
            height: attrs.height,
            name: attrs.name,
        }))
    }

    /// Returns a reference to the wall, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::WallNotFound` if the wall is not in the store.
    pub fn wall(&self, id: WallId) -> Result<&Wall, PlanError> {
        self.walls.get(id).ok_or(PlanError::WallNotFound)
    }

    /// Returns a mutable reference to the wall, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::WallNotFound` if the wall is not in the store.
    pub fn wall_mut(&mut self, id: WallId) -> Result<&mut Wall, PlanError> {
        self.walls.get_mut(id).ok_or(PlanError::WallNotFound)
    }

    /// Splits a wall at `point`, replacing it with two walls that copy its
    /// thickness, height, and name.
    ///
    /// With `existing` set, that vertex is repositioned to `point` and used
    /// as the split vertex instead of a fresh one (the drag-a-vertex-onto-a-
    /// wall merge). A half collapsed into a self-loop or duplicate by that
    /// repositioning is dropped rather than stored.
    ///
    /// At the moment of the split the two halves' centerline lengths sum to
    /// the original wall's length.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::WallNotFound` if the wall is not in the store, or
    /// `PlanError::VertexNotFound` if `existing` is dangling.
    pub fn split_wall(
        &mut self,
        wall_id: WallId,
        point: Point2,
        existing: Option<VertexId>,
    ) -> Result<VertexId, PlanError> {
        let wall = self.walls.get(wall_id).ok_or(PlanError::WallNotFound)?.clone();
        let mid = match existing {
            Some(id) => {
                self.move_vertex(id, point)?;
                id
            }
            None => self.add_vertex(point),
        };

        self.walls.remove(wall_id);
        let attrs = wall.attrs();
        if let Err(err) = self.add_wall(wall.start, mid, attrs.clone()) {
            tracing::debug!(%err, "dropping collapsed first half of split");
        }
        if let Err(err) = self.add_wall(mid, wall.end, attrs) {
            tracing::debug!(%err, "dropping collapsed second half of split");
        }
        Ok(mid)
    }

    /// Removes a wall, then prunes each endpoint vertex no longer referenced
    /// by any remaining wall.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::WallNotFound` if the wall is not in the store.
    pub fn delete_wall(&mut self, id: WallId) -> Result<(), PlanError> {
        let wall = self.walls.remove(id).ok_or(PlanError::WallNotFound)?;
        self.prune_vertex_if_orphan(wall.start);
        self.prune_vertex_if_orphan(wall.end);
        Ok(())
    }

    /// Iterates over all live walls in store order.
    pub fn walls(&self) -> impl Iterator<Item = (WallId, &Wall)> + '_ {
        self.walls.iter()
    }

    /// Iterates over the walls incident on a vertex.
    pub fn walls_at(&self, vertex: VertexId) -> impl Iterator<Item = (WallId, &Wall)> + '_ {
        self.walls.iter().filter(move |(_, w)| w.touches(vertex))
    }

    /// Finds the wall connecting an unordered vertex pair, if any.
    #[must_use]
    pub fn wall_between(&self, a: VertexId, b: VertexId) -> Option<WallId> {
        self.walls
            .iter()
            .find(|(_, w)| w.connects(a, b))
            .map(|(id, _)| id)
    }

    /// Centerline length of a wall.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::WallNotFound` or `PlanError::VertexNotFound` if
    /// the wall or either endpoint is missing.
    pub fn wall_length(&self, id: WallId) -> Result<f64, PlanError> {
        let wall = self.wall(id)?;
        let v1 = self.vertex(wall.start)?;
        let v2 = self.vertex(wall.end)?;
        Ok((v2.point - v1.point).norm())
    }

    /// Number of live walls.
    #[must_use]
    pub fn wall_count(&self) -> usize {
        self.walls.len()
    }
}

/// Orders a vertex pair canonically for unordered comparison.
fn unordered_pair(a: VertexId, b: VertexId) -> (VertexId, VertexId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Shadows one vertex's position with an in-progress drag preview.
///
/// Computations that must see the preview (the polygon builder, the editor's
/// render views) resolve vertex positions through the overlay; the store is
/// never mutated until the drag commits.
#[derive(Debug, Clone, Copy, Default)]
pub struct VertexOverlay {
    preview: Option<(VertexId, Point2)>,
}

impl VertexOverlay {
    /// An overlay that previews `id` at `point`.
    #[must_use]
    pub fn new(id: VertexId, point: Point2) -> Self {
        Self {
            preview: Some((id, point)),
        }
    }

    /// The vertex currently shadowed, if any.
    #[must_use]
    pub fn shadowed(&self) -> Option<VertexId> {
        self.preview.map(|(id, _)| id)
    }

    /// Resolves a vertex position, preferring the preview over the store.
    #[must_use]
    pub fn resolve(&self, store: &PlanStore, id: VertexId) -> Option<Point2> {
        if let Some((preview_id, point)) = self.preview {
            if preview_id == id {
                return Some(point);
            }
        }
        store.vertex(id).ok().map(|v| v.point)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn attrs() -> WallAttrs {
        WallAttrs {
            thickness: 10.0,
            height: 300.0,
            name: "Wall".to_owned(),
        }
    }

    fn square_store() -> (PlanStore, [VertexId; 4], [WallId; 4]) {
        let mut store = PlanStore::new();
        let a = store.add_vertex(Point2::new(0.0, 0.0));
        let b = store.add_vertex(Point2::new(100.0, 0.0));
        let c = store.add_vertex(Point2::new(100.0, 100.0));
        let d = store.add_vertex(Point2::new(0.0, 100.0));
        let w1 = store.add_wall(a, b, attrs()).unwrap();
        let w2 = store.add_wall(b, c, attrs()).unwrap();
        let w3 = store.add_wall(c, d, attrs()).unwrap();
        let w4 = store.add_wall(d, a, attrs()).unwrap();
        (store, [a, b, c, d], [w1, w2, w3, w4])
    }

    #[test]
    fn add_wall_rejects_self_loop() {
        let mut store = PlanStore::new();
        let a = store.add_vertex(Point2::new(0.0, 0.0));
        assert!(matches!(
            store.add_wall(a, a, attrs()),
            Err(PlanError::SelfLoopWall)
        ));
        assert_eq!(store.wall_count(), 0);
    }

    #[test]
    fn add_wall_rejects_duplicate_in_either_direction() {
        let mut store = PlanStore::new();
        let a = store.add_vertex(Point2::new(0.0, 0.0));
        let b = store.add_vertex(Point2::new(100.0, 0.0));
        store.add_wall(a, b, attrs()).unwrap();
        assert!(matches!(
            store.add_wall(a, b, attrs()),
            Err(PlanError::DuplicateWall)
        ));
        assert!(matches!(
            store.add_wall(b, a, attrs()),
            Err(PlanError::DuplicateWall)
        ));
        assert_eq!(store.wall_count(), 1);
    }

    #[test]
    fn add_wall_rejects_stale_vertex() {
        let mut store = PlanStore::new();
        let a = store.add_vertex(Point2::new(0.0, 0.0));
        let b = store.add_vertex(Point2::new(100.0, 0.0));
        let wall = store.add_wall(a, b, attrs()).unwrap();
        store.delete_wall(wall).unwrap();

        let c = store.add_vertex(Point2::new(50.0, 50.0));
        assert!(matches!(
            store.add_wall(c, a, attrs()),
            Err(PlanError::VertexNotFound)
        ));
    }

    #[test]
    fn merge_removes_self_loop_wall() {
        // Merging B into A where a wall A–B exists must remove that wall and
        // must not leave a wall A–A.
        let mut store = PlanStore::new();
        let a = store.add_vertex(Point2::new(0.0, 0.0));
        let b = store.add_vertex(Point2::new(100.0, 0.0));
        store.add_wall(a, b, attrs()).unwrap();

        store.merge_vertices(a, b).unwrap();

        assert_eq!(store.wall_count(), 0);
        assert_eq!(store.vertex_count(), 1);
        assert!(store.walls().all(|(_, w)| w.start != w.end));
    }

    #[test]
    fn merge_deduplicates_walls_keeping_first() {
        // A–C and B–C become duplicates once B merges into A.
        let mut store = PlanStore::new();
        let a = store.add_vertex(Point2::new(0.0, 0.0));
        let b = store.add_vertex(Point2::new(0.0, 10.0));
        let c = store.add_vertex(Point2::new(100.0, 0.0));
        let first = store.add_wall(a, c, attrs()).unwrap();
        let mut thick = attrs();
        thick.thickness = 30.0;
        store.add_wall(b, c, thick).unwrap();

        store.merge_vertices(a, b).unwrap();

        assert_eq!(store.wall_count(), 1);
        let (id, wall) = store.walls().next().unwrap();
        assert_eq!(id, first);
        assert!((wall.thickness - 10.0).abs() < 1e-12);
        assert!(store.vertex(b).is_err());
    }

    #[test]
    fn merge_same_vertex_is_noop() {
        let (mut store, [a, ..], _) = square_store();
        store.merge_vertices(a, a).unwrap();
        assert_eq!(store.vertex_count(), 4);
        assert_eq!(store.wall_count(), 4);
    }

    #[test]
    fn merge_repoints_surviving_walls() {
        let (mut store, [a, b, ..], _) = square_store();
        store.merge_vertices(a, b).unwrap();
        // A–B collapsed; B–C now runs A–C.
        assert_eq!(store.wall_count(), 3);
        assert!(store.walls().all(|(_, w)| !w.touches(b)));
    }

    #[test]
    fn split_conserves_centerline_length() {
        let mut store = PlanStore::new();
        let a = store.add_vertex(Point2::new(0.0, 0.0));
        let b = store.add_vertex(Point2::new(80.0, 60.0));
        let wall = store.add_wall(a, b, attrs()).unwrap();
        let original = store.wall_length(wall).unwrap();

        store
            .split_wall(wall, Point2::new(24.0, 18.0), None)
            .unwrap();

        assert_eq!(store.wall_count(), 2);
        let total: f64 = store
            .walls()
            .map(|(id, _)| store.wall_length(id).unwrap())
            .sum();
        assert!((total - original).abs() < 1e-9, "total={total}");
    }

    #[test]
    fn split_copies_attributes_to_both_halves() {
        let mut store = PlanStore::new();
        let a = store.add_vertex(Point2::new(0.0, 0.0));
        let b = store.add_vertex(Point2::new(100.0, 0.0));
        let mut custom = attrs();
        custom.thickness = 24.0;
        custom.name = "Load-bearing".to_owned();
        let wall = store.add_wall(a, b, custom).unwrap();

        let mid = store.split_wall(wall, Point2::new(40.0, 0.0), None).unwrap();

        for (_, w) in store.walls() {
            assert!((w.thickness - 24.0).abs() < 1e-12);
            assert_eq!(w.name, "Load-bearing");
            assert!(w.touches(mid));
        }
    }

    #[test]
    fn split_with_existing_vertex_repositions_it() {
        let mut store = PlanStore::new();
        let a = store.add_vertex(Point2::new(0.0, 0.0));
        let b = store.add_vertex(Point2::new(100.0, 0.0));
        let dragged = store.add_vertex(Point2::new(50.0, 40.0));
        let wall = store.add_wall(a, b, attrs()).unwrap();

        let mid = store
            .split_wall(wall, Point2::new(50.0, 0.0), Some(dragged))
            .unwrap();

        assert_eq!(mid, dragged);
        let moved = store.vertex(dragged).unwrap().point;
        assert!((moved - Point2::new(50.0, 0.0)).norm() < 1e-12);
        assert_eq!(store.wall_count(), 2);
    }

    #[test]
    fn split_at_own_endpoint_degrades_to_slide() {
        // Dragging a wall's own endpoint onto its centerline: the self-loop
        // half is dropped and the surviving half reconnects the pair.
        let mut store = PlanStore::new();
        let a = store.add_vertex(Point2::new(0.0, 0.0));
        let b = store.add_vertex(Point2::new(100.0, 0.0));
        let wall = store.add_wall(a, b, attrs()).unwrap();

        store
            .split_wall(wall, Point2::new(20.0, 0.0), Some(a))
            .unwrap();

        assert_eq!(store.wall_count(), 1);
        let (_, surviving) = store.walls().next().unwrap();
        assert!(surviving.connects(a, b));
        let moved = store.vertex(a).unwrap().point;
        assert!((moved - Point2::new(20.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn delete_wall_prunes_orphan_vertices() {
        let mut store = PlanStore::new();
        let a = store.add_vertex(Point2::new(0.0, 0.0));
        let b = store.add_vertex(Point2::new(100.0, 0.0));
        let wall = store.add_wall(a, b, attrs()).unwrap();

        store.delete_wall(wall).unwrap();

        assert_eq!(store.wall_count(), 0);
        assert_eq!(store.vertex_count(), 0);
    }

    #[test]
    fn delete_wall_keeps_shared_vertices() {
        let (mut store, [a, b, ..], [w1, ..]) = square_store();
        store.delete_wall(w1).unwrap();
        // A and B each still anchor another square side.
        assert!(store.vertex(a).is_ok());
        assert!(store.vertex(b).is_ok());
        assert_eq!(store.vertex_count(), 4);
        assert_eq!(store.wall_count(), 3);
    }

    #[test]
    fn walls_at_lists_incident_walls_only() {
        let (store, [a, ..], [w1, _, _, w4]) = square_store();
        let incident: Vec<WallId> = store.walls_at(a).map(|(id, _)| id).collect();
        assert_eq!(incident.len(), 2);
        assert!(incident.contains(&w1));
        assert!(incident.contains(&w4));
    }

    #[test]
    fn overlay_shadows_only_its_vertex() {
        let (store, [a, b, ..], _) = square_store();
        let overlay = VertexOverlay::new(a, Point2::new(5.0, 5.0));
        let shadowed = overlay.resolve(&store, a).unwrap();
        let live = overlay.resolve(&store, b).unwrap();
        assert!((shadowed - Point2::new(5.0, 5.0)).norm() < 1e-12);
        assert!((live - Point2::new(100.0, 0.0)).norm() < 1e-12);
        assert_eq!(overlay.shadowed(), Some(a));
    }
}
