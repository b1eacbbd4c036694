use std::fmt;

use crate::color::Color;
use crate::error::AnnotationError;

use super::extract::EdgeCoords;
use super::layer::{LayerData, LayerId};
use super::store::AnnotationStore;

/// Prefix shared by every annotation layer name.
pub const LAYER_PREFIX: &str = "__Annotate__";

/// Thickness written to layers created for annotation.
pub const LAYER_THICKNESS: u32 = 10;

/// Addresses one annotation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The single unindexed layer named by the bare prefix.
    Legacy,
    /// A numbered slot.
    Indexed(usize),
}

impl Slot {
    /// Maps a raw host index to a slot; `-1` is the legacy layer.
    #[must_use]
    pub fn from_raw(index: i64) -> Option<Self> {
        match index {
            -1 => Some(Self::Legacy),
            i => usize::try_from(i).ok().map(Self::Indexed),
        }
    }

    /// Returns the layer name for this slot.
    #[must_use]
    pub fn layer_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Legacy => f.write_str(LAYER_PREFIX),
            Self::Indexed(i) => write!(f, "{LAYER_PREFIX}{i}"),
        }
    }
}

/// Display attributes applied when a layer is (re)initialized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerStyle {
    pub color: Color,
    pub hide: bool,
    pub opacity: f32,
}

impl Default for LayerStyle {
    fn default() -> Self {
        Self {
            color: Color::CYAN,
            hide: false,
            opacity: 1.0,
        }
    }
}

fn check_opacity(opacity: f32) -> Result<(), AnnotationError> {
    if (0.0..=1.0).contains(&opacity) {
        Ok(())
    } else {
        Err(AnnotationError::OpacityOutOfRange(opacity))
    }
}

/// Slot-addressed annotation operations.
///
/// Every accessor treats a missing layer as a silent no-op: slots may be
/// empty at any time.
impl AnnotationStore {
    /// Looks up the layer for `slot` without creating it.
    #[must_use]
    pub fn get_layer(&self, slot: Slot) -> Option<LayerId> {
        self.layer_by_name(&slot.layer_name())
    }

    /// Replaces the layer for `slot` with a fresh, empty one.
    pub fn create_layer(&mut self, slot: Slot) -> LayerId {
        self.remove_layer(slot);
        let id = self.new_layer(slot.layer_name());
        tracing::debug!(%slot, "created annotation layer");
        id
    }

    /// Recreates the layer for `slot` and applies `style` to it.
    ///
    /// # Errors
    ///
    /// Returns an error if the opacity is outside `[0, 1]`. The existing
    /// layer is left untouched in that case.
    pub fn init_layer(&mut self, slot: Slot, style: LayerStyle) -> Result<LayerId, AnnotationError> {
        check_opacity(style.opacity)?;
        let id = self.create_layer(slot);
        if let Some(layer) = self.get_mut(id) {
            layer.color = style.color;
            layer.hide = style.hide;
            layer.opacity = style.opacity;
            layer.thickness = LAYER_THICKNESS;
        }
        Ok(id)
    }

    /// Hides and deletes every layer named for `slot`. Returns `true` if a
    /// layer was removed.
    pub fn remove_layer(&mut self, slot: Slot) -> bool {
        let mut removed = false;
        while let Some(id) = self.get_layer(slot) {
            // Hide before removal so the layer never flashes in a frame.
            if let Some(layer) = self.get_mut(id) {
                layer.hide = true;
            }
            self.remove(id);
            removed = true;
        }
        if removed {
            tracing::debug!(%slot, "removed annotation layer");
        }
        removed
    }

    /// Sets the color of the layer for `slot`, if it exists.
    pub fn set_color(&mut self, slot: Slot, color: Color) {
        if let Some(layer) = self.slot_layer_mut(slot) {
            layer.color = color;
        }
    }

    /// Sets the hide flag of the layer for `slot`, if it exists.
    pub fn set_hide(&mut self, slot: Slot, hide: bool) {
        if let Some(layer) = self.slot_layer_mut(slot) {
            layer.hide = hide;
        }
    }

    /// Sets the opacity of the layer for `slot`, if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if `opacity` is outside `[0, 1]`.
    pub fn set_opacity(&mut self, slot: Slot, opacity: f32) -> Result<(), AnnotationError> {
        check_opacity(opacity)?;
        if let Some(layer) = self.slot_layer_mut(slot) {
            layer.opacity = opacity;
        }
        Ok(())
    }

    /// Overwrites the layer for `slot` with one two-point stroke per edge.
    ///
    /// Any previous content of the slot is discarded. Points are appended
    /// one at a time, first endpoint first.
    ///
    /// # Errors
    ///
    /// Returns an error if the opacity is outside `[0, 1]`.
    pub fn write_selection(
        &mut self,
        slot: Slot,
        edges: &[EdgeCoords],
        style: LayerStyle,
    ) -> Result<LayerId, AnnotationError> {
        let id = self.init_layer(slot, style)?;
        let Some(layer) = self.get_mut(id) else {
            return Ok(id);
        };

        let frame = layer.frame_mut();
        for edge in edges {
            let stroke = frame.new_stroke();
            for position in edge.positions() {
                stroke.add_points(1);
                if let Some(point) = stroke.points.last_mut() {
                    point.position = position;
                }
            }
        }
        tracing::debug!(%slot, strokes = edges.len(), "wrote annotation strokes");
        Ok(id)
    }

    /// Returns the layer data for `slot`, if present.
    #[must_use]
    pub fn slot_layer(&self, slot: Slot) -> Option<&LayerData> {
        self.get_layer(slot).and_then(|id| self.get(id))
    }

    fn slot_layer_mut(&mut self, slot: Slot) -> Option<&mut LayerData> {
        let id = self.get_layer(slot)?;
        self.get_mut(id)
    }
}
