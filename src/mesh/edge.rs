/// A mesh edge connecting exactly two vertices.
///
/// Selection is a first-class flag on the edge; it is only derived from
/// vertex selection when [`EditMesh::select_flush`](super::EditMesh::select_flush)
/// runs.
#[derive(Debug, Clone)]
pub struct EdgeData {
    /// Indices of the two endpoint vertices.
    pub verts: [u32; 2],
    /// Edit-mode selection flag.
    pub select: bool,
}

impl EdgeData {
    /// Creates an unselected edge.
    #[must_use]
    pub fn new(a: u32, b: u32) -> Self {
        Self {
            verts: [a, b],
            select: false,
        }
    }

    /// Returns the edge key with the smaller index first.
    #[must_use]
    pub fn key(&self) -> (u32, u32) {
        let [a, b] = self.verts;
        (a.min(b), a.max(b))
    }
}
