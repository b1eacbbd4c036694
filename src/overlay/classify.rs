use crate::math::{view_forward_axis, Rotation3, Vector3};
use crate::mesh::EditMesh;

/// Edge index pairs split by orientation relative to the view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeClassification {
    /// Edges facing the camera, drawn at full line alpha.
    pub front: Vec<[u32; 2]>,
    /// Back-facing edges kept for the x-ray pass. Empty unless x-ray is on.
    pub xray: Vec<[u32; 2]>,
}

/// Classifies each mesh edge as facing toward or away from the camera.
///
/// An edge's orientation is the unnormalized sum of its two vertex normals.
/// Only the sign of its dot product with the view's forward axis matters.
pub struct ClassifyEdges {
    view_rotation: Rotation3,
    flip_horizontal: bool,
    xray: bool,
}

impl ClassifyEdges {
    /// Creates a new `ClassifyEdges` query.
    #[must_use]
    pub fn new(view_rotation: Rotation3, flip_horizontal: bool, xray: bool) -> Self {
        Self {
            view_rotation,
            flip_horizontal,
            xray,
        }
    }

    /// Executes the classification against `mesh`.
    ///
    /// With `flip_horizontal`, each summed normal has its X component negated
    /// to match the mirrored display. Back-facing edges go to
    /// [`EdgeClassification::xray`] when x-ray is on and are dropped
    /// otherwise. Edges referencing missing vertices are skipped.
    #[must_use]
    pub fn execute(&self, mesh: &EditMesh) -> EdgeClassification {
        let forward = view_forward_axis(&self.view_rotation);
        let mut result = EdgeClassification::default();

        for edge in mesh.edges() {
            let [a, b] = edge.verts;
            let (Ok(va), Ok(vb)) = (mesh.vertex(a), mesh.vertex(b)) else {
                continue;
            };

            let mut normal = va.normal + vb.normal;
            if self.flip_horizontal {
                normal.x = -normal.x;
            }

            if is_back_facing(&normal, &forward) {
                if self.xray {
                    result.xray.push([va.index, vb.index]);
                }
                continue;
            }
            result.front.push([va.index, vb.index]);
        }

        tracing::debug!(
            front = result.front.len(),
            xray = result.xray.len(),
            "classified edges"
        );
        result
    }
}

/// Returns `true` when `normal` points away from the camera.
///
/// The comparison is strict: a normal exactly perpendicular to the view
/// axis counts as front-facing.
#[must_use]
pub fn is_back_facing(normal: &Vector3, forward: &Vector3) -> bool {
    normal.dot(forward) < 0.0
}
