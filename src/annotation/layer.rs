use crate::color::Color;
use crate::math::Point3;

slotmap::new_key_type! {
    /// Unique identifier for a layer in the annotation store.
    pub struct LayerId;
}

/// Frame number given to the single frame created for a layer.
pub const DEFAULT_FRAME: i32 = 1;

/// A single point of a stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokePoint {
    /// World-space position.
    pub position: Point3,
}

impl Default for StrokePoint {
    fn default() -> Self {
        Self {
            position: Point3::origin(),
        }
    }
}

/// An ordered polyline of points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stroke {
    /// Points in drawing order.
    pub points: Vec<StrokePoint>,
}

impl Stroke {
    /// Grows the point buffer by `count` points at the origin.
    pub fn add_points(&mut self, count: usize) {
        self.points
            .resize(self.points.len() + count, StrokePoint::default());
    }

    /// Returns the positions of all points in order.
    pub fn positions(&self) -> impl Iterator<Item = Point3> + '_ {
        self.points.iter().map(|p| p.position)
    }
}

/// Strokes drawn at one frame number.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Frame number the strokes are shown at.
    pub number: i32,
    /// Strokes in creation order.
    pub strokes: Vec<Stroke>,
}

impl Frame {
    /// Creates an empty frame.
    #[must_use]
    pub fn new(number: i32) -> Self {
        Self {
            number,
            strokes: Vec::new(),
        }
    }

    /// Appends an empty stroke and returns it for filling.
    pub fn new_stroke(&mut self) -> &mut Stroke {
        self.strokes.push(Stroke::default());
        let last = self.strokes.len() - 1;
        &mut self.strokes[last]
    }
}

/// A named annotation layer with its display attributes and strokes.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerData {
    /// Unique name within the store.
    pub name: String,
    /// Stroke color.
    pub color: Color,
    /// Hidden layers are kept but not drawn.
    pub hide: bool,
    /// Display opacity in `[0, 1]`.
    pub opacity: f32,
    /// Stroke thickness in pixels.
    pub thickness: u32,
    /// Frames in creation order. Written layers hold exactly one.
    pub frames: Vec<Frame>,
}

impl LayerData {
    /// Creates a visible, empty layer.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: Color::CYAN,
            hide: false,
            opacity: 1.0,
            thickness: 3,
            frames: Vec::new(),
        }
    }

    /// Returns the layer's first frame, creating it if the layer has none.
    pub fn frame_mut(&mut self) -> &mut Frame {
        if self.frames.is_empty() {
            self.frames.push(Frame::new(DEFAULT_FRAME));
        }
        &mut self.frames[0]
    }

    /// Iterates every stroke across all frames.
    pub fn strokes(&self) -> impl Iterator<Item = &Stroke> {
        self.frames.iter().flat_map(|f| f.strokes.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_is_created_once() {
        let mut layer = LayerData::new("a");
        layer.frame_mut().new_stroke();
        layer.frame_mut().new_stroke();
        assert_eq!(layer.frames.len(), 1);
        assert_eq!(layer.frames[0].number, DEFAULT_FRAME);
        assert_eq!(layer.strokes().count(), 2);
    }

    #[test]
    fn points_grow_one_at_a_time() {
        let mut stroke = Stroke::default();
        stroke.add_points(1);
        stroke.add_points(1);
        assert_eq!(stroke.points.len(), 2);
        assert!(stroke.positions().all(|p| p == Point3::origin()));
    }
}
