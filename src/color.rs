use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Linear RGB color with each channel in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const GREEN: Self = Self::rgb_unchecked(0.0, 1.0, 0.0);
    pub const CYAN: Self = Self::rgb_unchecked(0.0, 1.0, 1.0);

    const fn rgb_unchecked(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Creates a color, rejecting channels outside `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first channel out of range.
    pub fn new(r: f32, g: f32, b: f32) -> Result<Self, SettingsError> {
        let color = Self { r, g, b };
        color.validate()?;
        Ok(color)
    }

    /// Checks that every channel lies in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first channel out of range.
    pub fn validate(&self) -> Result<(), SettingsError> {
        for (parameter, value) in [("r", self.r), ("g", self.g), ("b", self.b)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SettingsError::ParameterOutOfRange {
                    parameter,
                    value: f64::from(value),
                    min: 0.0,
                    max: 1.0,
                });
            }
        }
        Ok(())
    }

    /// Returns the color with an alpha channel appended.
    #[must_use]
    pub fn with_alpha(&self, alpha: f32) -> [f32; 4] {
        [self.r, self.g, self.b, alpha]
    }
}
