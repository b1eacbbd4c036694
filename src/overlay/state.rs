use crate::error::SceneError;
use crate::scene::Scene;
use crate::viewport::{DrawHandlerId, ViewContext, ViewportHost};

/// Whether the overlay's panel controls can be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    /// A target is assigned; all controls are live.
    Available,
    /// No target is assigned; controls are greyed out.
    Unavailable,
}

/// The live edge overlay.
///
/// Holds the single draw-callback registration. It starts out disabled,
/// becomes enabled when [`toggle`](Self::toggle) registers a callback, and
/// returns to disabled on the next toggle or on
/// [`force_disable`](Self::force_disable). At most one callback is
/// registered at any time.
#[derive(Debug, Default)]
pub struct Overlay {
    handler: Option<DrawHandlerId>,
}

impl Overlay {
    /// Creates a disabled overlay.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` while a draw callback is registered.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.handler.is_some()
    }

    /// Enables the overlay if disabled, disables it if enabled, then asks
    /// every 3D view to redraw. Returns the new state.
    ///
    /// # Errors
    ///
    /// Returns an error, without changing state, if `view` is not a 3D view.
    pub fn toggle(
        &mut self,
        view: &ViewContext,
        host: &mut impl ViewportHost,
    ) -> Result<bool, SceneError> {
        if !view.is_view_3d() {
            return Err(SceneError::NoView3d);
        }
        match self.handler.take() {
            Some(id) => host.remove_draw_handler(id),
            None => self.handler = Some(host.add_draw_handler()),
        }
        host.tag_redraw_all();
        tracing::info!(enabled = self.is_enabled(), "toggled edge overlay");
        Ok(self.is_enabled())
    }

    /// Unregisters the draw callback, if any, and clears stale lines from
    /// every 3D view.
    pub fn force_disable(&mut self, host: &mut impl ViewportHost) {
        if let Some(id) = self.handler.take() {
            host.remove_draw_handler(id);
            host.tag_redraw_all();
            tracing::debug!("edge overlay force-disabled");
        }
    }

    /// Panel-side check run whenever the panel is drawn. A scene without a
    /// target force-disables the overlay; that is an idle state, not an error.
    pub fn sync_target(&mut self, scene: &Scene, host: &mut impl ViewportHost) -> PanelState {
        if scene.target.is_some() {
            PanelState::Available
        } else {
            self.force_disable(host);
            PanelState::Unavailable
        }
    }
}
