use slotmap::SlotMap;

use super::layer::{LayerData, LayerId};

/// Scene-level collection that owns every annotation layer.
///
/// Layers are addressed by generational [`LayerId`]s and kept in creation
/// order. Names are not forced to be unique here; callers that need one
/// layer per name remove the old one first.
#[derive(Debug, Default)]
pub struct AnnotationStore {
    layers: SlotMap<LayerId, LayerData>,
    order: Vec<LayerId>,
}

impl AnnotationStore {
    /// Creates a new, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a layer with default attributes and returns its ID.
    pub fn new_layer(&mut self, name: impl Into<String>) -> LayerId {
        let id = self.layers.insert(LayerData::new(name));
        self.order.push(id);
        id
    }

    /// Removes a layer. Returns the removed data, or `None` if it was
    /// already gone.
    pub fn remove(&mut self, id: LayerId) -> Option<LayerData> {
        let data = self.layers.remove(id)?;
        self.order.retain(|&other| other != id);
        Some(data)
    }

    /// Returns a reference to the layer data, if present.
    #[must_use]
    pub fn get(&self, id: LayerId) -> Option<&LayerData> {
        self.layers.get(id)
    }

    /// Returns a mutable reference to the layer data, if present.
    pub fn get_mut(&mut self, id: LayerId) -> Option<&mut LayerData> {
        self.layers.get_mut(id)
    }

    /// Finds the first layer with exactly this name.
    #[must_use]
    pub fn layer_by_name(&self, name: &str) -> Option<LayerId> {
        self.order
            .iter()
            .copied()
            .find(|&id| self.layers.get(id).is_some_and(|layer| layer.name == name))
    }

    /// Iterates layers in creation order.
    pub fn layers(&self) -> impl Iterator<Item = (LayerId, &LayerData)> {
        self.order
            .iter()
            .filter_map(|&id| self.layers.get(id).map(|layer| (id, layer)))
    }

    /// Returns the number of layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Returns `true` if the store holds no layers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn layers_keep_creation_order() {
        let mut store = AnnotationStore::new();
        let a = store.new_layer("a");
        let b = store.new_layer("b");
        let c = store.new_layer("c");
        store.remove(b);
        let ids: Vec<_> = store.layers().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![a, c]);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut store = AnnotationStore::new();
        let id = store.new_layer("a");
        assert!(store.remove(id).is_some());
        assert!(store.remove(id).is_none());
        assert!(store.get(id).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn lookup_by_exact_name() {
        let mut store = AnnotationStore::new();
        store.new_layer("__Annotate__10");
        let one = store.new_layer("__Annotate__1");
        assert_eq!(store.layer_by_name("__Annotate__1"), Some(one));
        assert_eq!(store.layer_by_name("__Annotate__"), None);
    }

    #[test]
    fn stale_id_does_not_alias_new_layer() {
        let mut store = AnnotationStore::new();
        let old = store.new_layer("a");
        store.remove(old);
        let new = store.new_layer("a");
        assert_ne!(old, new);
        assert!(store.get(old).is_none());
        assert_eq!(store.get(new).unwrap().name, "a");
    }
}
