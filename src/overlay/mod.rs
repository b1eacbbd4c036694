//! Live overlay that draws a mesh's edges split by whether they face the
//! camera.

mod classify;
mod draw;
mod state;

pub use classify::{is_back_facing, ClassifyEdges, EdgeClassification};
pub use draw::{build_batches, check_vertex_limit, overlay_positions, DrawOutcome, XRAY_ALPHA_FACTOR};
pub use state::{Overlay, PanelState};
