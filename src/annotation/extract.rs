use crate::math::{transform_point, Matrix4, Point3, Vector3};
use crate::mesh::EditMesh;

/// One endpoint of a captured edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeEnd {
    /// World-space position.
    pub position: Point3,
    /// Object-space vertex normal.
    pub normal: Vector3,
    /// Index of the source vertex.
    pub index: u32,
}

/// World-space endpoints of a selected edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeCoords {
    pub ends: [EdgeEnd; 2],
}

impl EdgeCoords {
    /// Builds a pair from bare positions, without normals or indices.
    #[must_use]
    pub fn from_points(a: Point3, b: Point3) -> Self {
        let end = |position| EdgeEnd {
            position,
            normal: Vector3::zeros(),
            index: 0,
        };
        Self {
            ends: [end(a), end(b)],
        }
    }

    /// Returns the two world-space positions in edge order.
    #[must_use]
    pub fn positions(&self) -> [Point3; 2] {
        [self.ends[0].position, self.ends[1].position]
    }
}

/// Captures every selected edge of `mesh` in world space.
///
/// Only the edge's own selection flag counts. Output follows the mesh's
/// edge order, which callers should not rely on.
#[must_use]
pub fn selected_edge_coords(mesh: &EditMesh, matrix_world: &Matrix4) -> Vec<EdgeCoords> {
    mesh.edges()
        .iter()
        .filter(|edge| edge.select)
        .filter_map(|edge| {
            let [a, b] = edge.verts;
            let (va, vb) = (mesh.vertex(a).ok()?, mesh.vertex(b).ok()?);
            let end = |v: &crate::mesh::VertexData| EdgeEnd {
                position: transform_point(matrix_world, &v.point),
                normal: v.normal,
                index: v.index,
            };
            Some(EdgeCoords {
                ends: [end(va), end(vb)],
            })
        })
        .collect()
}
