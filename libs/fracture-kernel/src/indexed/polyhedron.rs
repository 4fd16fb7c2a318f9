//! # Indexed Polyhedron
//!
//! Convex polyhedron stored as vertices with ordered neighbor rings. Faces
//! are never stored; they are derived by walking the rings.

use super::neighbors::extract_neighbors_from_mesh;
use crate::error::{KernelError, KernelResult};
use crate::mesh::{self, Mesh};
use glam::DVec3;

// =============================================================================
// VERTEX
// =============================================================================

/// Transient classification set while clipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VertexClass {
    /// Strictly below the plane; kept.
    #[default]
    Inside,
    /// Strictly above the plane; removed.
    Outside,
    /// Within tolerance of the plane; kept.
    OnPlane,
    /// Created on a crossing edge by the last clip.
    New,
}

/// A polyhedron vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub position: DVec3,
    /// Adjacent vertices, counter-clockwise seen from outside.
    pub neighbors: Vec<usize>,
    pub class: VertexClass,
    /// Sequential id assigned during compaction.
    pub id: usize,
}

// =============================================================================
// POLYHEDRON
// =============================================================================

/// Convex polyhedron in vertex-adjacency form.
///
/// # Example
///
/// ```rust
/// use fracture_kernel::indexed::IndexedPolyhedron;
/// use fracture_kernel::primitives::create_box;
/// use glam::DVec3;
///
/// let mesh = create_box(DVec3::ZERO, DVec3::ONE);
/// let poly = IndexedPolyhedron::from_mesh(&mesh).unwrap();
/// assert_eq!(poly.vertex_count(), 8);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexedPolyhedron {
    pub(crate) vertices: Vec<Vertex>,
}

impl IndexedPolyhedron {
    /// Builds a polyhedron from positions and per-vertex neighbor rings.
    ///
    /// Rings must be counter-clockwise seen from outside. Fails with
    /// `InvalidTopology` on out-of-range indices, self loops, repeated
    /// neighbors, asymmetric adjacency or vertices with fewer than 3
    /// neighbors.
    pub fn new(positions: Vec<DVec3>, neighbors: Vec<Vec<usize>>) -> KernelResult<Self> {
        if positions.len() != neighbors.len() {
            return Err(KernelError::invalid_input(format!(
                "{} positions but {} neighbor rings",
                positions.len(),
                neighbors.len()
            )));
        }

        let vertices = positions
            .into_iter()
            .zip(neighbors)
            .enumerate()
            .map(|(id, (position, neighbors))| Vertex {
                position,
                neighbors,
                class: VertexClass::Inside,
                id,
            })
            .collect();

        let poly = Self { vertices };
        poly.validate_topology()?;
        Ok(poly)
    }

    /// Builds a polyhedron from a closed, outward-wound triangle mesh.
    pub fn from_mesh(mesh: &Mesh) -> KernelResult<Self> {
        let (positions, neighbors) = extract_neighbors_from_mesh(mesh)?;
        Self::new(positions, neighbors)
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Removes every vertex.
    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    pub fn positions(&self) -> Vec<DVec3> {
        self.vertices.iter().map(|v| v.position).collect()
    }

    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        mesh::bounding_box(&self.positions())
    }

    pub fn translate(&mut self, offset: DVec3) {
        for v in &mut self.vertices {
            v.position += offset;
        }
    }

    /// Checks index range, self loops, repeats, symmetry and ring size.
    pub fn validate_topology(&self) -> KernelResult<()> {
        let n = self.vertices.len();
        for (i, v) in self.vertices.iter().enumerate() {
            if v.neighbors.len() < 3 {
                return Err(KernelError::invalid_topology(format!(
                    "vertex {i} has {} neighbors",
                    v.neighbors.len()
                )));
            }
            for (k, &j) in v.neighbors.iter().enumerate() {
                if j >= n {
                    return Err(KernelError::invalid_topology(format!(
                        "vertex {i} references missing vertex {j}"
                    )));
                }
                if j == i {
                    return Err(KernelError::invalid_topology(format!(
                        "vertex {i} lists itself as a neighbor"
                    )));
                }
                if v.neighbors[..k].contains(&j) {
                    return Err(KernelError::invalid_topology(format!(
                        "vertex {i} lists neighbor {j} twice"
                    )));
                }
                if !self.vertices[j].neighbors.contains(&i) {
                    return Err(KernelError::invalid_topology(format!(
                        "edge {i}-{j} is not symmetric"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Triangle mesh over the polyhedron's vertices, faces ear-clipped.
    pub fn to_mesh(&self) -> KernelResult<Mesh> {
        let positions = self.positions();
        let mut mesh = Mesh::with_capacity(positions.len(), 2 * positions.len());
        for p in &positions {
            mesh.add_vertex(*p);
        }
        for face in self.extract_faces()? {
            let normal = super::faces::newell_normal(&positions, &face);
            for [a, b, c] in super::ear_clip(&positions, &face, normal) {
                mesh.add_triangle(a as u32, b as u32, c as u32);
            }
        }
        Ok(mesh)
    }
}

/// Next vertex of the face loop containing the directed edge `from -> at`:
/// the neighbor immediately before `from` in `at`'s ring.
pub(crate) fn face_successor(rings: &[Vec<usize>], from: usize, at: usize) -> KernelResult<usize> {
    let ring = rings
        .get(at)
        .ok_or_else(|| KernelError::invalid_topology(format!("missing vertex {at}")))?;
    let k = ring.iter().position(|&n| n == from).ok_or_else(|| {
        KernelError::invalid_topology(format!("vertex {from} is not a neighbor of {at}"))
    })?;
    Ok(ring[(k + ring.len() - 1) % ring.len()])
}
