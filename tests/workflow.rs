//! End-to-end: overlay a mesh, annotate a selection, lose it, and get it back.

#![allow(clippy::unwrap_used)]

use confirm_wire::annotation::Slot;
use confirm_wire::math::{Point3, Rotation3, Vector3};
use confirm_wire::mesh::EditMesh;
use confirm_wire::ops::{self, OperatorResult};
use confirm_wire::overlay::{DrawOutcome, Overlay};
use confirm_wire::scene::{ObjectMode, Scene, TargetObject};
use confirm_wire::settings::WireSettings;
use confirm_wire::viewport::{DrawHandlerId, LineBatch, ViewContext, ViewportHost};

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("confirm_wire=debug".parse().unwrap_or_default());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_test_writer()
        .try_init();
}

#[derive(Default)]
struct Viewport {
    next_id: u64,
    live: Option<DrawHandlerId>,
    frames: Vec<LineBatch>,
    popups: Vec<String>,
}

impl ViewportHost for Viewport {
    fn add_draw_handler(&mut self) -> DrawHandlerId {
        self.next_id += 1;
        let id = DrawHandlerId(self.next_id);
        self.live = Some(id);
        id
    }

    fn remove_draw_handler(&mut self, id: DrawHandlerId) {
        assert_eq!(self.live, Some(id));
        self.live = None;
    }

    fn tag_redraw_all(&mut self) {}

    fn draw_lines(&mut self, batch: &LineBatch) {
        self.frames.push(batch.clone());
    }

    fn show_error(&mut self, message: &str) {
        self.popups.push(message.to_owned());
    }
}

/// A 4x4 vertex grid in the XY plane facing +Z.
fn grid() -> EditMesh {
    let mut points = Vec::new();
    for y in 0..4 {
        for x in 0..4 {
            points.push(Point3::new(f64::from(x), f64::from(y), 0.0));
        }
    }
    let mut faces = Vec::new();
    for y in 0..3u32 {
        for x in 0..3u32 {
            let i = y * 4 + x;
            faces.push(vec![i, i + 1, i + 5, i + 4]);
        }
    }
    EditMesh::from_faces(&points, &faces).unwrap()
}

#[test]
fn annotate_and_recover_selection() {
    init_tracing();
    let settings = WireSettings::from_json(r#"{ "max_slots": 12, "xray": true }"#).unwrap();
    let mut scene = Scene::new(settings);
    let mut target = TargetObject::new("Grid", grid());
    target.mode = ObjectMode::Edit;
    scene.target = Some(target);
    assert_eq!(scene.slots.len(), 12);

    let picked: Vec<usize> = {
        let mesh = &mut scene.target.as_mut().unwrap().mesh;
        let picked = vec![
            mesh.find_edge(0, 1).unwrap(),
            mesh.find_edge(5, 6).unwrap(),
        ];
        for &edge in &picked {
            mesh.select_edge(edge, true).unwrap();
        }
        picked
    };

    assert_eq!(ops::annotate_selection(&mut scene, 11), OperatorResult::Finished);
    let layer = scene.annotations.slot_layer(Slot::Indexed(11)).unwrap();
    assert_eq!(layer.strokes().count(), 2);
    assert!(layer.strokes().all(|s| s.points.len() == 2));

    {
        let mesh = &mut scene.target.as_mut().unwrap().mesh;
        for &edge in &picked {
            mesh.select_edge(edge, false).unwrap();
        }
    }
    assert_eq!(
        ops::select_from_annotation(&mut scene, 11),
        OperatorResult::Finished
    );
    let mesh = &scene.target.as_ref().unwrap().mesh;
    for &edge in &picked {
        assert!(mesh.edges()[edge].select);
    }
    let selected: Vec<u32> = mesh
        .vertices()
        .iter()
        .filter(|v| v.select)
        .map(|v| v.index)
        .collect();
    assert_eq!(selected, vec![0, 1, 5, 6]);
    // Both ends of 1-5 are selected, so the flush picks it up too.
    assert!(mesh.edges()[mesh.find_edge(1, 5).unwrap()].select);

    // Slot 11 was the only one written.
    assert!(scene.slots.iter().filter(|r| r.has_layer).map(|r| r.index).eq([11]));
}

#[test]
fn overlay_follows_view_and_target() {
    init_tracing();
    let mut scene = Scene::default();
    scene.target = Some(TargetObject::new("Grid", grid()));
    scene.settings.xray = true;

    let mut host = Viewport::default();
    let mut overlay = Overlay::new();
    let looking_down = ViewContext::view_3d(Rotation3::identity());
    assert_eq!(
        ops::toggle_overlay(&mut overlay, &looking_down, &mut host),
        OperatorResult::Finished
    );

    // Normals face +Z and so does the view axis: every edge is on the front.
    let outcome = overlay.draw(&scene, &looking_down, &mut host);
    assert_eq!(outcome, DrawOutcome::Drawn { front: 24, xray: 0 });
    assert_eq!(host.frames.len(), 2);
    assert_eq!(host.frames[0].positions.len(), 16);

    let from_below = ViewContext::view_3d(Rotation3::from_axis_angle(
        &Vector3::x_axis(),
        std::f64::consts::PI,
    ));
    let outcome = overlay.draw(&scene, &from_below, &mut host);
    assert_eq!(outcome, DrawOutcome::Drawn { front: 0, xray: 24 });

    scene.target = None;
    let outcome = overlay.draw(&scene, &looking_down, &mut host);
    assert_eq!(outcome, DrawOutcome::NoTarget);
    assert!(!overlay.is_enabled());
    assert!(host.popups.is_empty());
    assert!(host.live.is_none());
}
