use thiserror::Error;

/// Top-level error type for the planum geometry core.
#[derive(Debug, Error)]
pub enum PlanumError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error(transparent)]
    Placement(#[from] PlacementError),
}

/// Errors related to pure geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("zero-length vector")]
    ZeroVector,

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Structural rejections from the planar graph store.
///
/// The requested mutation is declined and the graph is left exactly as it
/// was.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("wall would connect a vertex to itself")]
    SelfLoopWall,

    #[error("duplicate wall between the same pair of vertices")]
    DuplicateWall,

    #[error("vertex not found")]
    VertexNotFound,

    #[error("wall not found")]
    WallNotFound,

    #[error("no wall gesture in progress")]
    NoActiveGesture,

    #[error("wall {0} must be positive")]
    NonPositiveAttribute(&'static str),
}

/// Structural rejections from door placement.
#[derive(Debug, Error)]
pub enum PlacementError {
    #[error("would overhang wall end")]
    OverhangsWallEnd,

    #[error("overlapping existing door")]
    OverlapsExistingDoor,

    #[error("wall no longer exists")]
    WallMissing,
}

/// Convenience type alias for results using [`PlanumError`].
pub type Result<T> = std::result::Result<T, PlanumError>;
