//! # Approximate Convex Hull
//!
//! Incremental hull over a point cloud that incorporates the most
//! volumetrically significant points first.
//!
//! ## Algorithm Overview
//!
//! 1. Bootstrap a tetrahedron from extreme points
//! 2. Score each remaining point by the volume above every face it sees
//! 3. Incorporate the best point: fan its horizon, retire what it sees
//! 4. Update scores incrementally; stop at the vertex limit
//!
//! A limit of 0 builds the exact hull. Ties and near-planar bootstraps may
//! pick a degenerate point; the result is an approximation either way.

mod arena;
mod builder;

#[cfg(test)]
mod tests;

pub use arena::{Arena, Handle};

use crate::config::KernelConfig;
use crate::convex::{Face, FacePolyhedron};
use crate::mesh::Mesh;
use crate::plane::Plane;
use builder::HullBuilder;
use config::constants::HULL_CONTAINS_EPSILON;
use glam::DVec3;
use std::collections::HashMap;

/// A finished convex hull with compact vertex indexing.
///
/// # Example
///
/// ```rust
/// use fracture_kernel::hull::ConvexHull;
/// use glam::DVec3;
///
/// let points = vec![
///     DVec3::new(0.0, 0.0, 0.0),
///     DVec3::new(1.0, 0.0, 0.0),
///     DVec3::new(0.0, 1.0, 0.0),
///     DVec3::new(0.0, 0.0, 1.0),
///     DVec3::new(0.1, 0.1, 0.1),
/// ];
/// let hull = ConvexHull::exact(&points).unwrap();
/// assert_eq!(hull.faces().len(), 4);
/// assert!(hull.contains(DVec3::new(0.2, 0.2, 0.2)));
/// ```
#[derive(Debug, Clone)]
pub struct ConvexHull {
    vertices: Vec<DVec3>,
    source_indices: Vec<usize>,
    faces: Vec<[usize; 3]>,
    edges: Vec<[usize; 2]>,
    planes: Vec<Plane>,
    tolerance: f64,
}

impl ConvexHull {
    /// Builds a hull incorporating at most `vertex_limit` points
    /// (0 = exact hull).
    ///
    /// Returns `None` for fewer than 4 points or degenerate extremes.
    pub fn approximate(points: &[DVec3], vertex_limit: usize) -> Option<Self> {
        let mut builder = HullBuilder::bootstrap(points)?;
        builder.run(vertex_limit);
        tracing::debug!(
            points = points.len(),
            vertices = builder.incorporated(),
            tolerance = builder.tolerance(),
            "built convex hull"
        );
        Some(Self::extract(points, &builder))
    }

    /// Builds the exact hull of `points`.
    pub fn exact(points: &[DVec3]) -> Option<Self> {
        Self::approximate(points, 0)
    }

    /// Builds a hull with the configured vertex limit.
    pub fn from_config(points: &[DVec3], config: &KernelConfig) -> Option<Self> {
        Self::approximate(points, config.hull_vertex_limit)
    }

    /// Rebuilds the surviving faces and edges over deduplicated corners.
    fn extract(points: &[DVec3], builder: &HullBuilder<'_>) -> Self {
        let mut remap: HashMap<usize, usize> = HashMap::new();
        let mut source_indices = Vec::new();
        let mut faces = Vec::with_capacity(builder.faces.len());

        for (_, face) in builder.faces.iter() {
            let compact = face.vertices.map(|i| {
                *remap.entry(i).or_insert_with(|| {
                    source_indices.push(i);
                    source_indices.len() - 1
                })
            });
            faces.push(compact);
        }

        let vertices: Vec<DVec3> = source_indices.iter().map(|&i| points[i]).collect();

        let mut edges: Vec<[usize; 2]> = builder
            .edges
            .iter()
            .filter_map(|(_, e)| {
                let a = *remap.get(&e.endpoints[0])?;
                let b = *remap.get(&e.endpoints[1])?;
                Some(if a < b { [a, b] } else { [b, a] })
            })
            .collect();
        edges.sort_unstable();

        let planes = faces
            .iter()
            .map(|f| {
                let [a, b, c] = f.map(|i| vertices[i]);
                Plane::from_points(a, b, c)
                    .unwrap_or_else(|| Plane::from_point_normal(a, (b - a).cross(c - a)))
            })
            .collect();

        Self {
            vertices,
            source_indices,
            faces,
            edges,
            planes,
            tolerance: HULL_CONTAINS_EPSILON.max(builder.tolerance()),
        }
    }

    /// Triangles over [`exterior_vertices`](Self::exterior_vertices),
    /// counter-clockwise seen from outside.
    pub fn faces(&self) -> &[[usize; 3]] {
        &self.faces
    }

    /// Unique undirected edges as `[min, max]`.
    pub fn edges(&self) -> &[[usize; 2]] {
        &self.edges
    }

    /// Deduplicated corner points referenced by the faces.
    pub fn exterior_vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Index into the input point cloud of every exterior vertex.
    pub fn source_indices(&self) -> &[usize] {
        &self.source_indices
    }

    /// Outward face planes.
    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    /// True if `point` is inside or within tolerance of every face.
    ///
    /// The tolerance is `HULL_CONTAINS_EPSILON`, widened to the visibility
    /// tolerance for clouds large enough that points closer than it to a
    /// face were left out of the hull.
    pub fn contains(&self, point: DVec3) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.signed_distance(point) <= self.tolerance)
    }

    /// Enclosed volume.
    pub fn volume(&self) -> f64 {
        self.faces
            .iter()
            .map(|f| {
                let [a, b, c] = f.map(|i| self.vertices[i]);
                a.dot(b.cross(c)) / 6.0
            })
            .sum()
    }

    /// Triangle mesh of the hull.
    pub fn to_mesh(&self) -> Mesh {
        let triangles = self
            .faces
            .iter()
            .map(|f| f.map(|i| i as u32))
            .collect();
        Mesh::from_buffers(self.vertices.clone(), triangles)
    }

    /// Face-list polyhedron with one triangle per hull face.
    pub fn to_face_polyhedron(&self) -> FacePolyhedron {
        FacePolyhedron::from_faces(
            self.faces
                .iter()
                .map(|f| Face::new(f.iter().map(|&i| self.vertices[i]).collect()))
                .collect(),
        )
    }
}
