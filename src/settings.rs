//! Per-scene configuration for the edge overlay and annotation slots.
//!
//! The host persists these values inside its scene data. They round-trip
//! through JSON so that any host able to store a string can keep them.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::SettingsError;

/// Accepted range for [`WireSettings::line_width`].
pub const LINE_WIDTH_RANGE: (u32, u32) = (1, 10);
/// Accepted range for [`WireSettings::max_vertices`].
pub const MAX_VERTICES_RANGE: (usize, usize) = (10_000, 200_000);
/// Accepted range for [`WireSettings::max_slots`].
pub const MAX_SLOTS_RANGE: (usize, usize) = (10, 40);

/// Overlay and annotation configuration stored per scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WireSettings {
    line_width: u32,
    line_alpha: f32,
    line_color: Color,
    /// Mirror the overlay horizontally.
    pub flip_horizontal: bool,
    /// Draw the modifier-evaluated mesh instead of the base mesh.
    pub use_modifiers: bool,
    /// Draw back-facing edges at reduced alpha instead of hiding them.
    pub xray: bool,
    max_vertices: usize,
    max_slots: usize,
}

impl Default for WireSettings {
    fn default() -> Self {
        Self {
            line_width: 1,
            line_alpha: 0.5,
            line_color: Color::GREEN,
            flip_horizontal: false,
            use_modifiers: false,
            xray: false,
            max_vertices: 100_000,
            max_slots: 10,
        }
    }
}

impl WireSettings {
    /// Creates settings with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses settings from JSON, filling missing fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a value is out of range.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serializes the settings to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Checks every ranged field.
    ///
    /// # Errors
    ///
    /// Returns an error for the first field out of range.
    pub fn validate(&self) -> Result<(), SettingsError> {
        check_range(
            "line_width",
            f64::from(self.line_width),
            f64::from(LINE_WIDTH_RANGE.0),
            f64::from(LINE_WIDTH_RANGE.1),
        )?;
        check_range("line_alpha", f64::from(self.line_alpha), 0.0, 1.0)?;
        self.line_color.validate()?;
        check_count("max_vertices", self.max_vertices, MAX_VERTICES_RANGE)?;
        check_count("max_slots", self.max_slots, MAX_SLOTS_RANGE)?;
        Ok(())
    }

    /// Returns the overlay line width in pixels.
    #[must_use]
    pub fn line_width(&self) -> u32 {
        self.line_width
    }

    /// Sets the overlay line width.
    ///
    /// # Errors
    ///
    /// Returns an error if `width` is outside `1..=10`.
    pub fn set_line_width(&mut self, width: u32) -> Result<(), SettingsError> {
        check_range(
            "line_width",
            f64::from(width),
            f64::from(LINE_WIDTH_RANGE.0),
            f64::from(LINE_WIDTH_RANGE.1),
        )?;
        self.line_width = width;
        Ok(())
    }

    /// Returns the overlay line alpha.
    #[must_use]
    pub fn line_alpha(&self) -> f32 {
        self.line_alpha
    }

    /// Sets the overlay line alpha.
    ///
    /// # Errors
    ///
    /// Returns an error if `alpha` is outside `[0, 1]`.
    pub fn set_line_alpha(&mut self, alpha: f32) -> Result<(), SettingsError> {
        check_range("line_alpha", f64::from(alpha), 0.0, 1.0)?;
        self.line_alpha = alpha;
        Ok(())
    }

    /// Returns the overlay line color.
    #[must_use]
    pub fn line_color(&self) -> Color {
        self.line_color
    }

    /// Sets the overlay line color.
    ///
    /// # Errors
    ///
    /// Returns an error if a channel is outside `[0, 1]`.
    pub fn set_line_color(&mut self, color: Color) -> Result<(), SettingsError> {
        color.validate()?;
        self.line_color = color;
        Ok(())
    }

    /// Returns the vertex count above which the overlay refuses to draw.
    #[must_use]
    pub fn max_vertices(&self) -> usize {
        self.max_vertices
    }

    /// Sets the overlay vertex ceiling.
    ///
    /// # Errors
    ///
    /// Returns an error if `limit` is outside `10_000..=200_000`.
    pub fn set_max_vertices(&mut self, limit: usize) -> Result<(), SettingsError> {
        check_count("max_vertices", limit, MAX_VERTICES_RANGE)?;
        self.max_vertices = limit;
        Ok(())
    }

    /// Returns the number of addressable annotation slots.
    #[must_use]
    pub fn max_slots(&self) -> usize {
        self.max_slots
    }

    /// Sets the number of addressable annotation slots.
    ///
    /// # Errors
    ///
    /// Returns an error if `count` is outside `10..=40`.
    pub fn set_max_slots(&mut self, count: usize) -> Result<(), SettingsError> {
        check_count("max_slots", count, MAX_SLOTS_RANGE)?;
        self.max_slots = count;
        Ok(())
    }
}

fn check_range(parameter: &'static str, value: f64, min: f64, max: f64) -> Result<(), SettingsError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(SettingsError::ParameterOutOfRange {
            parameter,
            value,
            min,
            max,
        })
    }
}

#[allow(clippy::cast_precision_loss)]
fn check_count(
    parameter: &'static str,
    value: usize,
    (min, max): (usize, usize),
) -> Result<(), SettingsError> {
    check_range(parameter, value as f64, min as f64, max as f64)
}
