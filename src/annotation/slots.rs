use crate::color::Color;
use crate::error::AnnotationError;

use super::annotate::{LayerStyle, Slot};
use super::store::AnnotationStore;

/// Opacity of a layer shown normally.
pub const OPAQUE: f32 = 1.0;

/// Opacity of a layer shown with the x-ray preset.
pub const XRAY_OPACITY: f32 = 0.2;

/// UI-side mirror of one numbered annotation layer.
///
/// The real layer in the [`AnnotationStore`] is authoritative; a record is
/// refreshed from it on reload.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotRecord {
    pub index: usize,
    /// Whether a layer currently exists for this slot.
    pub has_layer: bool,
    pub hide: bool,
    pub color: Color,
    /// Opacity preset: `true` for x-ray, `false` for opaque.
    pub xray_opacity: bool,
}

impl SlotRecord {
    /// Creates the record shown for a slot with no layer.
    #[must_use]
    pub fn empty(index: usize) -> Self {
        Self {
            index,
            has_layer: false,
            hide: false,
            color: Color::CYAN,
            xray_opacity: false,
        }
    }

    /// Returns the layer opacity implied by the preset flag.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        if self.xray_opacity {
            XRAY_OPACITY
        } else {
            OPAQUE
        }
    }

    /// Returns the style to write a new layer with.
    #[must_use]
    pub fn style(&self) -> LayerStyle {
        LayerStyle {
            color: self.color,
            hide: self.hide,
            opacity: self.opacity(),
        }
    }

    fn refresh(&mut self, store: &AnnotationStore) {
        match store.slot_layer(Slot::Indexed(self.index)) {
            Some(layer) => {
                self.has_layer = true;
                self.hide = layer.hide;
                self.color = layer.color;
                self.xray_opacity = layer.opacity < OPAQUE;
            }
            None => self.has_layer = false,
        }
    }
}

/// Cache of [`SlotRecord`]s, one per slot index `0..max_slots`.
#[derive(Debug, Clone, Default)]
pub struct SlotRecords {
    records: Vec<SlotRecord>,
}

impl SlotRecords {
    /// Builds the cache by scanning every slot against `store`.
    #[must_use]
    pub fn load(store: &AnnotationStore, max_slots: usize) -> Self {
        let mut records = Self::default();
        records.reload(store, max_slots);
        records
    }

    /// Rebuilds every record from the layers that actually exist.
    pub fn reload(&mut self, store: &AnnotationStore, max_slots: usize) {
        self.records = (0..max_slots)
            .map(|index| {
                let mut record = SlotRecord::empty(index);
                record.refresh(store);
                record
            })
            .collect();
        tracing::info!(slots = max_slots, "reloaded annotation slots");
    }

    /// Returns the number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no slots are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates all records in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &SlotRecord> {
        self.records.iter()
    }

    /// Returns the record for `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is not below the slot count.
    pub fn get(&self, index: usize) -> Result<&SlotRecord, AnnotationError> {
        self.records.get(index).ok_or(AnnotationError::SlotOutOfRange {
            index,
            max: self.records.len(),
        })
    }

    fn get_mut(&mut self, index: usize) -> Result<&mut SlotRecord, AnnotationError> {
        let max = self.records.len();
        self.records
            .get_mut(index)
            .ok_or(AnnotationError::SlotOutOfRange { index, max })
    }

    /// Re-reads one record from the store after its layer changed.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range.
    pub fn refresh(&mut self, store: &AnnotationStore, index: usize) -> Result<(), AnnotationError> {
        self.get_mut(index)?.refresh(store);
        Ok(())
    }

    /// Sets a slot's color and pushes it to the live layer.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range.
    pub fn set_color(
        &mut self,
        store: &mut AnnotationStore,
        index: usize,
        color: Color,
    ) -> Result<(), AnnotationError> {
        self.get_mut(index)?.color = color;
        store.set_color(Slot::Indexed(index), color);
        Ok(())
    }

    /// Sets a slot's hide flag and pushes it to the live layer.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range.
    pub fn set_hide(
        &mut self,
        store: &mut AnnotationStore,
        index: usize,
        hide: bool,
    ) -> Result<(), AnnotationError> {
        self.get_mut(index)?.hide = hide;
        store.set_hide(Slot::Indexed(index), hide);
        Ok(())
    }

    /// Sets a slot's opacity preset and pushes the derived opacity to the
    /// live layer.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range.
    pub fn set_xray_opacity(
        &mut self,
        store: &mut AnnotationStore,
        index: usize,
        xray: bool,
    ) -> Result<(), AnnotationError> {
        let record = self.get_mut(index)?;
        record.xray_opacity = xray;
        let opacity = record.opacity();
        store.set_opacity(Slot::Indexed(index), opacity)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn opacity_derives_from_preset() {
        let mut record = SlotRecord::empty(0);
        assert!((record.opacity() - OPAQUE).abs() < f32::EPSILON);
        record.xray_opacity = true;
        assert!((record.opacity() - XRAY_OPACITY).abs() < f32::EPSILON);
    }

    #[test]
    fn reload_scans_every_slot() {
        let mut store = AnnotationStore::new();
        let red = Color::new(1.0, 0.0, 0.0).unwrap();
        store
            .init_layer(
                Slot::Indexed(3),
                LayerStyle {
                    color: red,
                    hide: true,
                    opacity: XRAY_OPACITY,
                },
            )
            .unwrap();
        // Out of range and legacy layers are not part of the cache.
        store.create_layer(Slot::Indexed(12));
        store.create_layer(Slot::Legacy);

        let records = SlotRecords::load(&store, 10);
        assert_eq!(records.len(), 10);
        assert_eq!(records.iter().filter(|r| r.has_layer).count(), 1);
        let three = records.get(3).unwrap();
        assert_eq!(three.color, red);
        assert!(three.hide);
        assert!(three.xray_opacity);
    }

    #[test]
    fn reload_drops_stale_records() {
        let mut store = AnnotationStore::new();
        store.create_layer(Slot::Indexed(1));
        let mut records = SlotRecords::load(&store, 10);
        assert!(records.get(1).unwrap().has_layer);

        store.remove_layer(Slot::Indexed(1));
        records.reload(&store, 20);
        assert_eq!(records.len(), 20);
        assert!(!records.get(1).unwrap().has_layer);
    }

    #[test]
    fn out_of_range_slot_is_rejected() {
        let mut store = AnnotationStore::new();
        let mut records = SlotRecords::load(&store, 10);
        assert!(matches!(
            records.set_hide(&mut store, 10, true),
            Err(AnnotationError::SlotOutOfRange { index: 10, max: 10 })
        ));
    }

    #[test]
    fn edits_push_to_live_layer() {
        let mut store = AnnotationStore::new();
        store.create_layer(Slot::Indexed(2));
        let mut records = SlotRecords::load(&store, 10);

        records.set_color(&mut store, 2, Color::GREEN).unwrap();
        records.set_hide(&mut store, 2, true).unwrap();
        records.set_xray_opacity(&mut store, 2, true).unwrap();

        let layer = store.slot_layer(Slot::Indexed(2)).unwrap();
        assert_eq!(layer.color, Color::GREEN);
        assert!(layer.hide);
        assert!((layer.opacity - XRAY_OPACITY).abs() < f32::EPSILON);
    }

    #[test]
    fn edits_without_layer_only_touch_record() {
        let mut store = AnnotationStore::new();
        let mut records = SlotRecords::load(&store, 10);
        records.set_xray_opacity(&mut store, 5, true).unwrap();
        assert!(records.get(5).unwrap().xray_opacity);
        assert!(store.is_empty());
        assert!((records.get(5).unwrap().style().opacity - XRAY_OPACITY).abs() < f32::EPSILON);
    }
}
