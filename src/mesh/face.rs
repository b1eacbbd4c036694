/// A polygon face given by its ordered vertex loop.
#[derive(Debug, Clone)]
pub struct FaceData {
    /// Vertex indices, counter-clockwise when seen from the front.
    pub verts: Vec<u32>,
    /// Edit-mode selection flag.
    pub select: bool,
}

impl FaceData {
    /// Creates an unselected face.
    #[must_use]
    pub fn new(verts: Vec<u32>) -> Self {
        Self {
            verts,
            select: false,
        }
    }

    /// Iterates the boundary edges of the loop as vertex pairs.
    pub fn loop_edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let n = self.verts.len();
        (0..n).map(move |i| (self.verts[i], self.verts[(i + 1) % n]))
    }
}
