pub mod annotation;
pub mod color;
pub mod error;
pub mod math;
pub mod mesh;
pub mod ops;
pub mod overlay;
pub mod scene;
pub mod settings;
pub mod spatial;
pub mod viewport;

#[cfg(test)]
mod test_support;

pub use error::{ConfirmWireError, Result};
