//! # Mesh Data Structure
//!
//! Triangle mesh exchanged with the surrounding application: the kernel reads
//! source meshes from it and writes renderable pieces, hulls and debug
//! geometry back into it.

use config::constants::{DEGENERATE_EPSILON, VERTEX_MERGE_EPSILON};
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// A triangle mesh with vertices and indices.
///
/// # Example
///
/// ```rust
/// use fracture_kernel::Mesh;
/// use glam::DVec3;
///
/// let mut mesh = Mesh::new();
/// mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(1.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(0.0, 1.0, 0.0));
/// mesh.add_triangle(0, 1, 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    /// Vertex positions (f64 for precision)
    vertices: Vec<DVec3>,
    /// Triangle indices, counter-clockwise seen from outside
    triangles: Vec<[u32; 3]>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
        }
    }

    /// Creates a mesh from raw buffers.
    pub fn from_buffers(vertices: Vec<DVec3>, triangles: Vec<[u32; 3]>) -> Self {
        Self {
            vertices,
            triangles,
        }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns true if the mesh is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, position: DVec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        index
    }

    /// Adds a triangle by vertex indices.
    pub fn add_triangle(&mut self, v0: u32, v1: u32, v2: u32) {
        self.triangles.push([v0, v1, v2]);
    }

    /// Returns a reference to the vertices.
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Returns a reference to the triangles.
    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Returns the vertex at the given index.
    #[inline]
    pub fn vertex(&self, index: u32) -> DVec3 {
        self.vertices[index as usize]
    }

    /// Returns the triangle at the given index.
    #[inline]
    pub fn triangle(&self, index: usize) -> [u32; 3] {
        self.triangles[index]
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        bounding_box(&self.vertices)
    }

    /// Translates the mesh by a vector.
    pub fn translate(&mut self, offset: DVec3) {
        for v in &mut self.vertices {
            *v += offset;
        }
    }

    /// Returns a copy with coincident vertices welded together.
    ///
    /// Vertices closer than `VERTEX_MERGE_EPSILON` collapse onto the first
    /// occurrence; triangles that become degenerate or reference a missing
    /// vertex are dropped. Check [`first_invalid_triangle`](Self::first_invalid_triangle)
    /// first when dropping is not acceptable.
    pub fn welded(&self) -> Mesh {
        let mut vertices: Vec<DVec3> = Vec::with_capacity(self.vertices.len());
        let mut remap = Vec::with_capacity(self.vertices.len());

        for v in &self.vertices {
            let existing = vertices
                .iter()
                .position(|u| u.distance(*v) < VERTEX_MERGE_EPSILON);
            match existing {
                Some(index) => remap.push(index as u32),
                None => {
                    remap.push(vertices.len() as u32);
                    vertices.push(*v);
                }
            }
        }

        let triangles = self
            .triangles
            .iter()
            .filter_map(|&[a, b, c]| {
                Some([
                    *remap.get(a as usize)?,
                    *remap.get(b as usize)?,
                    *remap.get(c as usize)?,
                ])
            })
            .filter(|tri| tri[0] != tri[1] && tri[1] != tri[2] && tri[0] != tri[2])
            .collect();

        Mesh {
            vertices,
            triangles,
        }
    }

    /// Index of the first triangle referencing a vertex that does not exist.
    pub fn first_invalid_triangle(&self) -> Option<usize> {
        let vertex_count = self.vertices.len();
        self.triangles
            .iter()
            .position(|tri| tri.iter().any(|&i| i as usize >= vertex_count))
    }

    /// Signed enclosed volume (positive for outward-wound closed meshes).
    pub fn volume(&self) -> f64 {
        self.triangles
            .iter()
            .map(|tri| {
                let [a, b, c] = tri.map(|i| self.vertices[i as usize]);
                a.dot(b.cross(c)) / 6.0
            })
            .sum()
    }

    /// Validates the mesh for correctness.
    ///
    /// Checks:
    /// - All triangle indices are valid
    /// - No degenerate triangles (zero area)
    ///
    /// Returns true if valid.
    pub fn validate(&self) -> bool {
        let vertex_count = self.vertices.len() as u32;

        for tri in &self.triangles {
            if tri.iter().any(|&i| i >= vertex_count) {
                return false;
            }

            if tri[0] == tri[1] || tri[1] == tri[2] || tri[0] == tri[2] {
                return false;
            }

            let v0 = self.vertices[tri[0] as usize];
            let v1 = self.vertices[tri[1] as usize];
            let v2 = self.vertices[tri[2] as usize];
            let area = (v1 - v0).cross(v2 - v0).length();
            if area < DEGENERATE_EPSILON {
                return false;
            }
        }

        true
    }
}

/// Axis-aligned bounds of a point set; `(ZERO, ZERO)` when empty.
pub fn bounding_box(points: &[DVec3]) -> (DVec3, DVec3) {
    let Some(first) = points.first() else {
        return (DVec3::ZERO, DVec3::ZERO);
    };

    points[1..]
        .iter()
        .fold((*first, *first), |(min, max), p| (min.min(*p), max.max(*p)))
}
