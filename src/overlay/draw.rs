use crate::error::OverlayError;
use crate::math::{transform_point, Matrix4, Point3};
use crate::mesh::EditMesh;
use crate::scene::Scene;
use crate::settings::WireSettings;
use crate::viewport::{LineBatch, ViewContext, ViewportHost};

use super::classify::{ClassifyEdges, EdgeClassification};
use super::state::Overlay;

/// Alpha multiplier applied to the x-ray pass.
pub const XRAY_ALPHA_FACTOR: f32 = 0.5;

/// What a single overlay redraw did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOutcome {
    /// Lines were submitted.
    Drawn { front: usize, xray: usize },
    /// No target is assigned; the overlay was switched off.
    NoTarget,
    /// The mesh was too large; the overlay was switched off and the user
    /// was told why.
    LimitExceeded,
}

/// Rejects meshes with more than `limit` vertices.
///
/// # Errors
///
/// Returns [`OverlayError::VertexLimitExceeded`] if `count > limit`.
pub fn check_vertex_limit(count: usize, limit: usize) -> Result<(), OverlayError> {
    if count > limit {
        return Err(OverlayError::VertexLimitExceeded { count, limit });
    }
    Ok(())
}

/// World-space positions for every vertex, mirrored in X when flipped.
#[must_use]
pub fn overlay_positions(mesh: &EditMesh, matrix_world: &Matrix4, flip_horizontal: bool) -> Vec<Point3> {
    mesh.vertices()
        .iter()
        .map(|v| {
            let mut p = transform_point(matrix_world, &v.point);
            if flip_horizontal {
                p.x = -p.x;
            }
            p
        })
        .collect()
}

/// Builds the front batch and, with x-ray on, the dimmed back batch.
#[must_use]
pub fn build_batches(
    positions: Vec<Point3>,
    classification: EdgeClassification,
    settings: &WireSettings,
) -> (LineBatch, Option<LineBatch>) {
    let color = settings.line_color();
    let alpha = settings.line_alpha();
    let width = settings.line_width();

    let xray = settings.xray.then(|| LineBatch {
        positions: positions.clone(),
        indices: classification.xray,
        color: color.with_alpha(alpha * XRAY_ALPHA_FACTOR),
        width,
    });
    let front = LineBatch {
        positions,
        indices: classification.front,
        color: color.with_alpha(alpha),
        width,
    };
    (front, xray)
}

impl Overlay {
    /// Per-frame draw callback.
    ///
    /// Classifies the target's edges against the current view and submits
    /// up to two line batches. A missing target or a mesh over the vertex
    /// ceiling switches the overlay off instead; only the latter shows an
    /// error. The mesh is read in place and never copied.
    pub fn draw(&mut self, scene: &Scene, view: &ViewContext, host: &mut impl ViewportHost) -> DrawOutcome {
        let settings = &scene.settings;
        let Some(target) = &scene.target else {
            self.force_disable(host);
            return DrawOutcome::NoTarget;
        };

        let mesh = target.overlay_mesh(settings.use_modifiers);

        if let Err(err) = check_vertex_limit(mesh.vertex_count(), settings.max_vertices()) {
            tracing::warn!(object = %target.name, "{err}");
            self.force_disable(host);
            host.show_error(&err.to_string());
            return DrawOutcome::LimitExceeded;
        }

        let classification =
            ClassifyEdges::new(view.view_rotation, settings.flip_horizontal, settings.xray).execute(mesh);
        let (front_count, xray_count) = (classification.front.len(), classification.xray.len());
        let positions = overlay_positions(mesh, &target.matrix_world, settings.flip_horizontal);

        let (front, xray) = build_batches(positions, classification, settings);
        host.draw_lines(&front);
        if let Some(xray) = xray {
            host.draw_lines(&xray);
        }

        DrawOutcome::Drawn {
            front: front_count,
            xray: xray_count,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{Rotation3, Vector3};
    use crate::mesh::tests::unit_cube;
    use crate::scene::{ObjectMode, TargetObject};
    use crate::test_support::RecordingHost;

    fn enabled(host: &mut RecordingHost, view: &ViewContext) -> Overlay {
        let mut overlay = Overlay::new();
        overlay.toggle(view, host).unwrap();
        overlay
    }

    /// A mesh of `n` vertices joined in a chain along X.
    fn chain(n: u32) -> EditMesh {
        let mut mesh = EditMesh::new();
        for i in 0..n {
            mesh.add_vertex(Point3::new(f64::from(i), 0.0, 0.0), Vector3::z())
                .unwrap();
        }
        for i in 1..n {
            mesh.add_edge(i - 1, i).unwrap();
        }
        mesh
    }

    fn scene_with(mesh: EditMesh) -> Scene {
        let mut scene = Scene::default();
        scene.target = Some(TargetObject::new("Target", mesh));
        scene
    }

    #[test]
    fn limit_is_inclusive() {
        assert!(check_vertex_limit(100_000, 100_000).is_ok());
        assert!(matches!(
            check_vertex_limit(100_001, 100_000),
            Err(OverlayError::VertexLimitExceeded {
                count: 100_001,
                limit: 100_000
            })
        ));
    }

    #[test]
    fn mesh_over_ceiling_disables_and_reports() {
        let view = ViewContext::view_3d(Rotation3::identity());
        let mut host = RecordingHost::default();
        let mut overlay = enabled(&mut host, &view);
        let mut scene = scene_with(chain(10_001));
        scene.settings.set_max_vertices(10_000).unwrap();

        let outcome = overlay.draw(&scene, &view, &mut host);
        assert_eq!(outcome, DrawOutcome::LimitExceeded);
        assert!(!overlay.is_enabled());
        assert_eq!(host.errors.len(), 1);
        assert!(host.batches.is_empty());
    }

    #[test]
    fn mesh_at_ceiling_draws() {
        let view = ViewContext::view_3d(Rotation3::identity());
        let mut host = RecordingHost::default();
        let mut overlay = enabled(&mut host, &view);
        let mut scene = scene_with(chain(10_000));
        scene.settings.set_max_vertices(10_000).unwrap();

        let outcome = overlay.draw(&scene, &view, &mut host);
        assert_eq!(
            outcome,
            DrawOutcome::Drawn {
                front: 9_999,
                xray: 0
            }
        );
        assert!(overlay.is_enabled());
        assert!(host.errors.is_empty());
    }

    #[test]
    fn no_target_disables_silently() {
        let view = ViewContext::view_3d(Rotation3::identity());
        let mut host = RecordingHost::default();
        let mut overlay = enabled(&mut host, &view);

        let outcome = overlay.draw(&Scene::default(), &view, &mut host);
        assert_eq!(outcome, DrawOutcome::NoTarget);
        assert!(!overlay.is_enabled());
        assert!(host.errors.is_empty());
    }

    #[test]
    fn xray_pass_uses_half_alpha() {
        let view = ViewContext::view_3d(Rotation3::identity());
        let mut host = RecordingHost::default();
        let mut overlay = enabled(&mut host, &view);
        let mut scene = scene_with(unit_cube());
        scene.settings.xray = true;
        scene.settings.set_line_alpha(0.8).unwrap();
        scene.settings.set_line_width(3).unwrap();

        overlay.draw(&scene, &view, &mut host);
        assert_eq!(host.batches.len(), 2);
        let (front, xray) = (&host.batches[0], &host.batches[1]);
        assert!((front.color[3] - 0.8).abs() < f32::EPSILON);
        assert!((xray.color[3] - 0.4).abs() < f32::EPSILON);
        assert_eq!(front.width, 3);
        assert_eq!(front.indices.len() + xray.indices.len(), 12);
    }

    #[test]
    fn without_xray_only_front_batch_is_drawn() {
        let view = ViewContext::view_3d(Rotation3::identity());
        let mut host = RecordingHost::default();
        let mut overlay = enabled(&mut host, &view);
        let scene = scene_with(unit_cube());

        overlay.draw(&scene, &view, &mut host);
        assert_eq!(host.batches.len(), 1);
        assert!(host.batches[0].indices.len() < 12);
    }

    #[test]
    fn positions_follow_world_matrix_and_flip() {
        let mut mesh = EditMesh::new();
        mesh.add_vertex(Point3::new(1.0, 2.0, 3.0), Vector3::z()).unwrap();
        let world = Matrix4::new_translation(&Vector3::new(1.0, 0.0, 0.0));

        let plain = overlay_positions(&mesh, &world, false);
        let flipped = overlay_positions(&mesh, &world, true);
        assert_eq!(plain, vec![Point3::new(2.0, 2.0, 3.0)]);
        assert_eq!(flipped, vec![Point3::new(-2.0, 2.0, 3.0)]);
    }

    #[test]
    fn edit_mode_ignores_evaluated_mesh() {
        let view = ViewContext::view_3d(Rotation3::identity());
        let mut host = RecordingHost::default();
        let mut overlay = enabled(&mut host, &view);
        let mut scene = scene_with(unit_cube());
        scene.settings.use_modifiers = true;
        let target = scene.target.as_mut().unwrap();
        target.evaluated = Some(chain(3));
        target.mode = ObjectMode::Edit;

        overlay.draw(&scene, &view, &mut host);
        assert_eq!(host.batches[0].positions.len(), 8);
    }
}
