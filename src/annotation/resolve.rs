use crate::error::Result;
use crate::math::{transform_point, Matrix4, Point3};
use crate::mesh::EditMesh;
use crate::spatial::KdTree;

use super::annotate::Slot;
use super::store::AnnotationStore;

/// Selects the mesh vertices that an annotation layer's points land on.
///
/// Vertices are compared in world space through `matrix_world`, the same
/// transform the annotation was written with. Every stroke point is matched
/// to its nearest vertex, and the vertex is selected only when the two
/// positions coincide exactly.
pub struct SelectFromAnnotation {
    slot: Slot,
    matrix_world: Matrix4,
}

impl SelectFromAnnotation {
    /// Creates a new `SelectFromAnnotation` operation for an object placed
    /// by `matrix_world`.
    #[must_use]
    pub fn new(slot: Slot, matrix_world: Matrix4) -> Self {
        Self { slot, matrix_world }
    }

    /// Executes the selection and returns how many points matched a vertex.
    ///
    /// A missing layer or a layer without points leaves the mesh untouched.
    /// Otherwise matching vertices are selected and the selection is flushed
    /// to edges and faces.
    ///
    /// # Errors
    ///
    /// Returns an error if the spatial index or the mesh rejects a query.
    pub fn execute(&self, store: &AnnotationStore, mesh: &mut EditMesh) -> Result<usize> {
        let Some(layer) = store.slot_layer(self.slot) else {
            return Ok(0);
        };
        let points: Vec<Point3> = layer.strokes().flat_map(|s| s.positions()).collect();
        if points.is_empty() {
            return Ok(0);
        }

        let mut tree = KdTree::with_capacity(mesh.vertex_count());
        for vertex in mesh.vertices() {
            tree.insert(transform_point(&self.matrix_world, &vertex.point), vertex.index);
        }
        tree.balance();

        let mut matched = 0;
        for point in &points {
            let Some(nearest) = tree.find(point)? else {
                continue;
            };
            if is_exact_match(nearest.distance) {
                mesh.select_vertex(nearest.index, true)?;
                matched += 1;
            }
        }
        mesh.select_flush(true);

        tracing::info!(
            slot = %self.slot,
            points = points.len(),
            matched,
            "selected vertices from annotation"
        );
        Ok(matched)
    }
}

/// Near misses are never snapped.
#[allow(clippy::float_cmp)]
fn is_exact_match(distance: f64) -> bool {
    distance == 0.0
}
