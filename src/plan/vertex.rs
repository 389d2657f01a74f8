use crate::math::Point2;

slotmap::new_key_type! {
    /// Unique identifier for a vertex in the plan store.
    pub struct VertexId;
}

/// A corner point of the floor-plan skeleton.
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    /// World-space position.
    pub point: Point2,
}

impl Vertex {
    /// Creates a new vertex at the given point.
    #[must_use]
    pub fn new(point: Point2) -> Self {
        Self { point }
    }
}
