use thiserror::Error;

/// Top-level error type for the wire overlay and annotation tools.
#[derive(Debug, Error)]
pub enum ConfirmWireError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error(transparent)]
    Spatial(#[from] SpatialError),

    #[error(transparent)]
    Annotation(#[from] AnnotationError),

    #[error(transparent)]
    Overlay(#[from] OverlayError),

    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Errors related to the per-scene configuration.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("malformed settings: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Errors related to mesh construction and selection.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("vertex index {index} is out of range (vertex count {count})")]
    VertexIndexOutOfRange { index: u32, count: usize },

    #[error("edge index {index} is out of range (edge count {count})")]
    EdgeIndexOutOfRange { index: usize, count: usize },

    #[error("edge connects vertex {0} to itself")]
    DegenerateEdge(u32),

    #[error("face needs at least 3 vertices, got {0}")]
    DegenerateFace(usize),

    #[error("mesh has more than u32::MAX vertices")]
    TooManyVertices,
}

/// Errors related to the nearest-point index.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("spatial index must be balanced before querying")]
    NotBalanced,
}

/// Errors related to annotation layers and slots.
#[derive(Debug, Error)]
pub enum AnnotationError {
    #[error("annotation slot {index} is out of range [0, {max})")]
    SlotOutOfRange { index: usize, max: usize },

    #[error("annotation opacity {0} is out of range [0, 1]")]
    OpacityOutOfRange(f32),
}

/// Errors related to the live edge overlay.
#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("vertex count {count} exceeds the overlay limit of {limit}")]
    VertexLimitExceeded { count: usize, limit: usize },
}

/// Errors related to the scene's target object and view context.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("no target object is assigned")]
    NoTarget,

    #[error("target object {0:?} is not in edit mode")]
    NotInEditMode(String),

    #[error("action requires an active 3D view")]
    NoView3d,
}

/// Convenience type alias for results using [`ConfirmWireError`].
pub type Result<T> = std::result::Result<T, ConfirmWireError>;
