use crate::math::{Point3, Vector3};

/// A mesh vertex as seen through the edit-mode representation.
#[derive(Debug, Clone)]
pub struct VertexData {
    /// Stable index of the vertex within its mesh.
    pub index: u32,
    /// Object-space position.
    pub point: Point3,
    /// Vertex normal. Not necessarily unit length.
    pub normal: Vector3,
    /// Edit-mode selection flag.
    pub select: bool,
}

impl VertexData {
    /// Creates an unselected vertex.
    #[must_use]
    pub fn new(index: u32, point: Point3, normal: Vector3) -> Self {
        Self {
            index,
            point,
            normal,
            select: false,
        }
    }
}
