pub mod edge;
pub mod face;
pub mod vertex;

pub use edge::EdgeData;
pub use face::FaceData;
pub use vertex::VertexData;

use std::collections::HashMap;

use crate::error::MeshError;
use crate::math::{Point3, Vector3};

/// In-memory edit-mode mesh.
///
/// Mirrors the host's editable mesh: vertices carry a stable `u32` index,
/// a position, a normal and a selection flag; edges and faces reference
/// vertices by index. Topology is fixed once built. Only selection flags
/// and normals change afterwards.
#[derive(Debug, Clone, Default)]
pub struct EditMesh {
    vertices: Vec<VertexData>,
    edges: Vec<EdgeData>,
    faces: Vec<FaceData>,
    edge_lookup: HashMap<(u32, u32), usize>,
}

impl EditMesh {
    /// Creates a new, empty mesh.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a mesh from positions and face loops, adding each face's
    /// boundary edges and deriving vertex normals from the faces.
    ///
    /// # Errors
    ///
    /// Returns an error if a face references a missing vertex or has fewer
    /// than three corners.
    pub fn from_faces(points: &[Point3], faces: &[Vec<u32>]) -> Result<Self, MeshError> {
        let mut mesh = Self::new();
        for &point in points {
            mesh.add_vertex(point, Vector3::zeros())?;
        }
        for face in faces {
            mesh.add_face(face.clone())?;
        }
        mesh.recalculate_normals();
        Ok(mesh)
    }

    // --- Vertex operations ---

    /// Appends a vertex and returns its index.
    ///
    /// # Errors
    ///
    /// Returns an error if the mesh already holds `u32::MAX` vertices.
    pub fn add_vertex(&mut self, point: Point3, normal: Vector3) -> Result<u32, MeshError> {
        let index = u32::try_from(self.vertices.len()).map_err(|_| MeshError::TooManyVertices)?;
        self.vertices.push(VertexData::new(index, point, normal));
        Ok(index)
    }

    /// Returns the number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns all vertices in index order.
    #[must_use]
    pub fn vertices(&self) -> &[VertexData] {
        &self.vertices
    }

    /// Returns a reference to a vertex, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range.
    pub fn vertex(&self, index: u32) -> Result<&VertexData, MeshError> {
        self.vertices
            .get(index as usize)
            .ok_or(MeshError::VertexIndexOutOfRange {
                index,
                count: self.vertices.len(),
            })
    }

    /// Sets the selection flag of a single vertex.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range.
    pub fn select_vertex(&mut self, index: u32, select: bool) -> Result<(), MeshError> {
        let count = self.vertices.len();
        let vertex = self
            .vertices
            .get_mut(index as usize)
            .ok_or(MeshError::VertexIndexOutOfRange { index, count })?;
        vertex.select = select;
        Ok(())
    }

    // --- Edge operations ---

    /// Adds an edge between two vertices and returns its index.
    ///
    /// An edge that already exists between the pair is returned as is.
    ///
    /// # Errors
    ///
    /// Returns an error if either vertex is missing or both ends coincide.
    pub fn add_edge(&mut self, a: u32, b: u32) -> Result<usize, MeshError> {
        self.vertex(a)?;
        self.vertex(b)?;
        if a == b {
            return Err(MeshError::DegenerateEdge(a));
        }
        let edge = EdgeData::new(a, b);
        if let Some(&existing) = self.edge_lookup.get(&edge.key()) {
            return Ok(existing);
        }
        let index = self.edges.len();
        self.edge_lookup.insert(edge.key(), index);
        self.edges.push(edge);
        Ok(index)
    }

    /// Returns all edges in host iteration order.
    #[must_use]
    pub fn edges(&self) -> &[EdgeData] {
        &self.edges
    }

    /// Returns the index of the edge joining `a` and `b`, if any.
    #[must_use]
    pub fn find_edge(&self, a: u32, b: u32) -> Option<usize> {
        self.edge_lookup.get(&(a.min(b), a.max(b))).copied()
    }

    /// Sets the selection flag of a single edge.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range.
    pub fn select_edge(&mut self, index: usize, select: bool) -> Result<(), MeshError> {
        let count = self.edges.len();
        let edge = self
            .edges
            .get_mut(index)
            .ok_or(MeshError::EdgeIndexOutOfRange { index, count })?;
        edge.select = select;
        Ok(())
    }

    // --- Face operations ---

    /// Adds a face and any of its boundary edges that do not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the loop has fewer than three corners or
    /// references a missing vertex.
    pub fn add_face(&mut self, verts: Vec<u32>) -> Result<usize, MeshError> {
        if verts.len() < 3 {
            return Err(MeshError::DegenerateFace(verts.len()));
        }
        let face = FaceData::new(verts);
        for (a, b) in face.loop_edges() {
            self.add_edge(a, b)?;
        }
        self.faces.push(face);
        Ok(self.faces.len() - 1)
    }

    /// Returns all faces.
    #[must_use]
    pub fn faces(&self) -> &[FaceData] {
        &self.faces
    }

    // --- Derived state ---

    /// Propagates vertex selection to edges and faces.
    ///
    /// With `select = true`, edges whose two vertices are selected and faces
    /// whose corners are all selected become selected. With `select = false`,
    /// edges and faces touching any unselected vertex are deselected.
    pub fn select_flush(&mut self, select: bool) {
        let vertices = &self.vertices;
        let is_selected = |i: u32| vertices.get(i as usize).is_some_and(|v| v.select);

        for edge in &mut self.edges {
            let both = edge.verts.iter().all(|&v| is_selected(v));
            if select && both {
                edge.select = true;
            } else if !select && !both {
                edge.select = false;
            }
        }
        for face in &mut self.faces {
            let all = face.verts.iter().all(|&v| is_selected(v));
            if select && all {
                face.select = true;
            } else if !select && !all {
                face.select = false;
            }
        }
    }

    /// Recomputes vertex normals as the normalized sum of area-weighted
    /// face normals. Vertices without faces, or whose face normals cancel
    /// out, get a zero normal.
    pub fn recalculate_normals(&mut self) {
        let mut sums = vec![Vector3::zeros(); self.vertices.len()];
        for face in &self.faces {
            let normal = newell_normal(&self.vertices, &face.verts);
            for &v in &face.verts {
                if let Some(sum) = sums.get_mut(v as usize) {
                    *sum += normal;
                }
            }
        }
        for (vertex, sum) in self.vertices.iter_mut().zip(sums) {
            vertex.normal = sum.try_normalize(f64::EPSILON).unwrap_or_else(Vector3::zeros);
        }
    }
}

/// Newell's method: a polygon normal whose length is twice its area.
fn newell_normal(vertices: &[VertexData], loop_verts: &[u32]) -> Vector3 {
    let n = loop_verts.len();
    let mut normal = Vector3::zeros();
    for i in 0..n {
        let (Some(cur), Some(next)) = (
            vertices.get(loop_verts[i] as usize),
            vertices.get(loop_verts[(i + 1) % n] as usize),
        ) else {
            continue;
        };
        let (c, nx) = (cur.point, next.point);
        normal.x += (c.y - nx.y) * (c.z + nx.z);
        normal.y += (c.z - nx.z) * (c.x + nx.x);
        normal.z += (c.x - nx.x) * (c.y + nx.y);
    }
    normal
}
