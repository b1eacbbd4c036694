//! Scene-level state the add-on reads and writes: the target object, the
//! per-scene settings, the annotation layers and the slot-record cache.

use crate::annotation::{AnnotationStore, SlotRecords};
use crate::error::SceneError;
use crate::math::Matrix4;
use crate::mesh::EditMesh;
use crate::settings::WireSettings;

/// Interaction mode of an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObjectMode {
    #[default]
    Object,
    Edit,
}

/// A mesh object the overlay and annotations operate on.
#[derive(Debug, Clone)]
pub struct TargetObject {
    pub name: String,
    pub mode: ObjectMode,
    pub matrix_world: Matrix4,
    /// Base mesh data. While in edit mode this is the live edit mesh.
    pub mesh: EditMesh,
    /// Mesh with modifiers applied, when the host has evaluated one.
    pub evaluated: Option<EditMesh>,
}

impl TargetObject {
    /// Creates an object in object mode at the world origin.
    #[must_use]
    pub fn new(name: impl Into<String>, mesh: EditMesh) -> Self {
        Self {
            name: name.into(),
            mode: ObjectMode::Object,
            matrix_world: Matrix4::identity(),
            mesh,
            evaluated: None,
        }
    }

    /// Returns `true` while the object's mesh is being edited.
    #[must_use]
    pub fn is_mesh_edit(&self) -> bool {
        self.mode == ObjectMode::Edit
    }

    /// Returns the mesh the overlay should draw.
    ///
    /// In edit mode this is the live edit mesh. Otherwise it is the
    /// evaluated mesh when `use_modifiers` is set and one is available, and
    /// the base mesh if not. The overlay only reads it, so nothing is copied.
    #[must_use]
    pub fn overlay_mesh(&self, use_modifiers: bool) -> &EditMesh {
        if self.is_mesh_edit() {
            return &self.mesh;
        }
        match (&self.evaluated, use_modifiers) {
            (Some(evaluated), true) => evaluated,
            _ => &self.mesh,
        }
    }

    /// Returns the live edit mesh.
    ///
    /// # Errors
    ///
    /// Returns an error if the object is not in edit mode.
    pub fn edit_mesh_mut(&mut self) -> Result<&mut EditMesh, SceneError> {
        if self.is_mesh_edit() {
            Ok(&mut self.mesh)
        } else {
            Err(SceneError::NotInEditMode(self.name.clone()))
        }
    }
}

/// Per-scene add-on state.
#[derive(Debug)]
pub struct Scene {
    pub settings: WireSettings,
    pub target: Option<TargetObject>,
    pub annotations: AnnotationStore,
    pub slots: SlotRecords,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(WireSettings::default())
    }
}

impl Scene {
    /// Creates a scene with no target and a slot cache sized to the
    /// configured slot count.
    #[must_use]
    pub fn new(settings: WireSettings) -> Self {
        let annotations = AnnotationStore::new();
        let slots = SlotRecords::load(&annotations, settings.max_slots());
        Self {
            settings,
            target: None,
            annotations,
            slots,
        }
    }

    /// Returns the target object if it is in edit mode.
    ///
    /// # Errors
    ///
    /// Returns an error if no target is set or it is not being edited.
    pub fn edit_target(&mut self) -> Result<&mut TargetObject, SceneError> {
        let target = self.target.as_mut().ok_or(SceneError::NoTarget)?;
        if target.is_mesh_edit() {
            Ok(target)
        } else {
            Err(SceneError::NotInEditMode(target.name.clone()))
        }
    }
}
