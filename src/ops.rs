//! UI actions. Each one reports `Finished` or `Cancelled`; failures are
//! logged and never leave partial state behind.

use crate::annotation::{selected_edge_coords, SelectFromAnnotation, Slot};
use crate::color::Color;
use crate::error::{AnnotationError, Result, SceneError};
use crate::overlay::Overlay;
use crate::scene::Scene;
use crate::viewport::{EdgeDisplay, ViewContext, ViewportHost};

/// Outcome of a UI action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorResult {
    Finished,
    Cancelled,
}

fn finish<T>(operator: &'static str, result: Result<T>) -> OperatorResult {
    match result {
        Ok(_) => OperatorResult::Finished,
        Err(err) => {
            tracing::warn!(operator, "{err}");
            OperatorResult::Cancelled
        }
    }
}

/// Slots beyond the cache are rejected until the cache is reloaded, even if
/// the settings already allow them.
fn check_slot(scene: &Scene, index: usize) -> std::result::Result<Slot, AnnotationError> {
    let max = scene.settings.max_slots().min(scene.slots.len());
    if index < max {
        Ok(Slot::Indexed(index))
    } else {
        Err(AnnotationError::SlotOutOfRange { index, max })
    }
}

/// Shows or hides the edge overlay.
pub fn toggle_overlay(overlay: &mut Overlay, view: &ViewContext, host: &mut impl ViewportHost) -> OperatorResult {
    finish("toggle_overlay", overlay.toggle(view, host).map_err(Into::into))
}

/// Stores the selected edges of the target's edit mesh in slot `index`,
/// replacing whatever the slot held.
pub fn annotate_selection(scene: &mut Scene, index: usize) -> OperatorResult {
    finish("annotate_selection", try_annotate_selection(scene, index))
}

fn try_annotate_selection(scene: &mut Scene, index: usize) -> Result<usize> {
    let slot = check_slot(scene, index)?;
    let target = scene.edit_target()?;
    let edges = selected_edge_coords(&target.mesh, &target.matrix_world);
    let style = scene.slots.get(index)?.style();

    scene.annotations.write_selection(slot, &edges, style)?;
    scene.slots.refresh(&scene.annotations, index)?;
    tracing::info!(%slot, edges = edges.len(), "annotated selection");
    Ok(edges.len())
}

/// Deletes the layer in slot `index`.
pub fn remove_annotation(scene: &mut Scene, index: usize) -> OperatorResult {
    finish("remove_annotation", try_remove_annotation(scene, index))
}

fn try_remove_annotation(scene: &mut Scene, index: usize) -> Result<bool> {
    let slot = check_slot(scene, index)?;
    let removed = scene.annotations.remove_layer(slot);
    scene.slots.refresh(&scene.annotations, index)?;
    Ok(removed)
}

/// Selects the target's vertices that coincide with slot `index`'s points.
pub fn select_from_annotation(scene: &mut Scene, index: usize) -> OperatorResult {
    finish("select_from_annotation", try_select_from_annotation(scene, index))
}

fn try_select_from_annotation(scene: &mut Scene, index: usize) -> Result<usize> {
    let slot = check_slot(scene, index)?;
    let Scene {
        target, annotations, ..
    } = scene;
    let target = target.as_mut().ok_or(SceneError::NoTarget)?;
    let matrix_world = target.matrix_world;
    let mesh = target.edit_mesh_mut()?;
    SelectFromAnnotation::new(slot, matrix_world).execute(annotations, mesh)
}

/// Rebuilds the slot cache from the layers that exist.
pub fn reload_slots(scene: &mut Scene) -> OperatorResult {
    scene.slots.reload(&scene.annotations, scene.settings.max_slots());
    OperatorResult::Finished
}

/// Flips one of the viewport's edge-display overlays.
pub fn toggle_edge_display(view: &mut ViewContext, kind: EdgeDisplay) -> OperatorResult {
    if !view.is_view_3d() {
        return finish::<()>("toggle_edge_display", Err(SceneError::NoView3d.into()));
    }
    let shown = view.overlays.toggle(kind);
    tracing::debug!(?kind, shown, "toggled edge display");
    OperatorResult::Finished
}

/// Sets slot `index`'s color.
pub fn update_slot_color(scene: &mut Scene, index: usize, color: Color) -> OperatorResult {
    finish("update_slot_color", try_update_slot_color(scene, index, color))
}

fn try_update_slot_color(scene: &mut Scene, index: usize, color: Color) -> Result<()> {
    check_slot(scene, index)?;
    color.validate()?;
    scene.slots.set_color(&mut scene.annotations, index, color)?;
    Ok(())
}

/// Sets slot `index`'s hide flag.
pub fn update_slot_hide(scene: &mut Scene, index: usize, hide: bool) -> OperatorResult {
    finish("update_slot_hide", try_update_slot_hide(scene, index, hide))
}

fn try_update_slot_hide(scene: &mut Scene, index: usize, hide: bool) -> Result<()> {
    check_slot(scene, index)?;
    scene.slots.set_hide(&mut scene.annotations, index, hide)?;
    Ok(())
}

/// Switches slot `index` between the opaque and x-ray opacity presets.
pub fn update_slot_xray(scene: &mut Scene, index: usize, xray: bool) -> OperatorResult {
    finish("update_slot_xray", try_update_slot_xray(scene, index, xray))
}

fn try_update_slot_xray(scene: &mut Scene, index: usize, xray: bool) -> Result<()> {
    check_slot(scene, index)?;
    scene.slots.set_xray_opacity(&mut scene.annotations, index, xray)?;
    Ok(())
}
