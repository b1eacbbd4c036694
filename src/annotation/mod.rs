//! Annotation layers: capturing selected edges as strokes, managing the
//! numbered layer slots, and selecting vertices back from stroke points.

mod annotate;
mod extract;
mod layer;
mod resolve;
mod slots;
mod store;

pub use annotate::{LayerStyle, Slot, LAYER_PREFIX, LAYER_THICKNESS};
pub use extract::{selected_edge_coords, EdgeCoords, EdgeEnd};
pub use layer::{Frame, LayerData, LayerId, Stroke, StrokePoint, DEFAULT_FRAME};
pub use resolve::SelectFromAnnotation;
pub use slots::{SlotRecord, SlotRecords, OPAQUE, XRAY_OPACITY};
pub use store::AnnotationStore;
