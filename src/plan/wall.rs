use super::vertex::VertexId;

slotmap::new_key_type! {
    /// Unique identifier for a wall in the plan store.
    pub struct WallId;
}

/// A straight wall segment between two vertices.
///
/// The start→end direction matters only for de-duplication; geometry treats
/// the endpoint pair as unordered.
#[derive(Debug, Clone)]
pub struct Wall {
    /// Start vertex of the centerline.
    pub start: VertexId,
    /// End vertex of the centerline.
    pub end: VertexId,
    /// Wall thickness, always positive.
    pub thickness: f64,
    /// Wall height, always positive.
    pub height: f64,
    /// Display name.
    pub name: String,
}

/// Attributes copied onto a wall at creation or split.
#[derive(Debug, Clone)]
pub struct WallAttrs {
    pub thickness: f64,
    pub height: f64,
    pub name: String,
}

impl Wall {
    /// Returns true if this wall connects the same unordered vertex pair.
    #[must_use]
    pub fn connects(&self, a: VertexId, b: VertexId) -> bool {
        (self.start == a && self.end == b) || (self.start == b && self.end == a)
    }

    /// Returns true if either endpoint is the given vertex.
    #[must_use]
    pub fn touches(&self, vertex: VertexId) -> bool {
        self.start == vertex || self.end == vertex
    }

    /// The attributes a split copies onto both halves.
    #[must_use]
    pub fn attrs(&self) -> WallAttrs {
        WallAttrs {
            thickness: self.thickness,
            height: self.height,
            name: self.name.clone(),
        }
    }
}
