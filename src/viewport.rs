//! The 3D view as seen from the add-on: camera orientation, viewport edge
//! overlays, and the host services used to draw and report.

use crate::math::{Point3, Rotation3};

/// Kind of editor area an action was invoked from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaKind {
    View3d,
    Other,
}

/// Viewport edge-display flags owned by the host's 3D view overlay settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeDisplayOverlays {
    pub crease: bool,
    pub sharp: bool,
    pub bevel_weight: bool,
    pub seam: bool,
}

/// One of the toggleable edge-display flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeDisplay {
    Crease,
    Sharp,
    BevelWeight,
    Seam,
}

impl EdgeDisplayOverlays {
    /// Flips one flag and returns its new value.
    pub fn toggle(&mut self, kind: EdgeDisplay) -> bool {
        let flag = match kind {
            EdgeDisplay::Crease => &mut self.crease,
            EdgeDisplay::Sharp => &mut self.sharp,
            EdgeDisplay::BevelWeight => &mut self.bevel_weight,
            EdgeDisplay::Seam => &mut self.seam,
        };
        *flag = !*flag;
        *flag
    }
}

/// Context of the view an action or redraw runs in.
#[derive(Debug, Clone)]
pub struct ViewContext {
    pub area: AreaKind,
    pub view_rotation: Rotation3,
    pub overlays: EdgeDisplayOverlays,
}

impl ViewContext {
    /// Creates a 3D view context with the given camera orientation.
    #[must_use]
    pub fn view_3d(view_rotation: Rotation3) -> Self {
        Self {
            area: AreaKind::View3d,
            view_rotation,
            overlays: EdgeDisplayOverlays::default(),
        }
    }

    /// Returns `true` if this context belongs to a 3D view.
    #[must_use]
    pub fn is_view_3d(&self) -> bool {
        self.area == AreaKind::View3d
    }
}

/// Handle of a registered per-frame draw callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawHandlerId(pub u64);

/// An alpha-blended batch of line segments.
#[derive(Debug, Clone, PartialEq)]
pub struct LineBatch {
    /// Vertex positions shared by all segments.
    pub positions: Vec<Point3>,
    /// Index pairs into `positions`, one per segment.
    pub indices: Vec<[u32; 2]>,
    /// RGBA color.
    pub color: [f32; 4],
    /// Line width in pixels.
    pub width: u32,
}

/// Services the host provides to the overlay.
pub trait ViewportHost {
    /// Registers the overlay's post-view draw callback.
    fn add_draw_handler(&mut self) -> DrawHandlerId;

    /// Unregisters a previously added draw callback.
    fn remove_draw_handler(&mut self, id: DrawHandlerId);

    /// Requests a redraw of every 3D view.
    fn tag_redraw_all(&mut self);

    /// Draws one line batch in the current frame.
    fn draw_lines(&mut self, batch: &LineBatch);

    /// Shows a modal error popup.
    fn show_error(&mut self, message: &str);
}
