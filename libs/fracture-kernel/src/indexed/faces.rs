//! # Face Extraction and Moments
//!
//! Faces of an [`IndexedPolyhedron`] are derived on demand by walking the
//! neighbor rings; volume and centroid integrate over those faces.

use super::polyhedron::{face_successor, IndexedPolyhedron};
use crate::error::{KernelError, KernelResult};
use crate::plane::Plane;
use config::constants::DEGENERATE_EPSILON;
use glam::DVec3;

/// Zeroth and first moments of a closed polyhedron.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moments {
    /// Enclosed volume.
    pub volume: f64,
    /// Volume centroid.
    pub centroid: DVec3,
}

impl IndexedPolyhedron {
    /// Face loops as vertex-index lists, counter-clockwise seen from
    /// outside.
    ///
    /// Every unvisited directed edge starts a walk that repeatedly takes the
    /// neighbor just before the one it arrived from, until the start vertex
    /// is reached again.
    pub fn extract_faces(&self) -> KernelResult<Vec<Vec<usize>>> {
        let rings: Vec<Vec<usize>> = self.vertices.iter().map(|v| v.neighbors.clone()).collect();
        let total_edges: usize = rings.iter().map(Vec::len).sum();
        let mut visited: Vec<Vec<bool>> = rings.iter().map(|r| vec![false; r.len()]).collect();
        let mut faces = Vec::new();

        for start in 0..rings.len() {
            for k in 0..rings[start].len() {
                if visited[start][k] {
                    continue;
                }

                let mut face = vec![start];
                visited[start][k] = true;
                let (mut prev, mut current) = (start, rings[start][k]);
                let mut steps = 0;
                while current != start {
                    steps += 1;
                    if steps > total_edges {
                        return Err(KernelError::invalid_topology(format!(
                            "face loop from vertex {start} does not close"
                        )));
                    }
                    face.push(current);
                    let next = face_successor(&rings, prev, current)?;
                    if let Some(slot) = rings[current].iter().position(|&n| n == next) {
                        visited[current][slot] = true;
                    }
                    prev = current;
                    current = next;
                }
                faces.push(face);
            }
        }

        Ok(faces)
    }

    /// Outward plane of every face with a non-degenerate area.
    pub fn face_planes(&self) -> KernelResult<Vec<Plane>> {
        let positions = self.positions();
        Ok(self
            .extract_faces()?
            .iter()
            .filter_map(|face| {
                let normal = newell_normal(&positions, face);
                (normal.length_squared() > DEGENERATE_EPSILON)
                    .then(|| Plane::from_point_normal(positions[face[0]], normal))
            })
            .collect())
    }

    /// Volume and centroid from a tetrahedron fan over every face.
    ///
    /// The centroid falls back to the vertex average when the volume is
    /// near zero.
    pub fn moments(&self) -> KernelResult<Moments> {
        let Some(origin) = self.vertices.first().map(|v| v.position) else {
            return Ok(Moments {
                volume: 0.0,
                centroid: DVec3::ZERO,
            });
        };

        let mut volume = 0.0;
        let mut first = DVec3::ZERO;
        for face in self.extract_faces()? {
            let apex = self.vertices[face[0]].position;
            for pair in face[1..].windows(2) {
                let b = self.vertices[pair[0]].position;
                let c = self.vertices[pair[1]].position;
                let v = (apex - origin).dot((b - origin).cross(c - origin)) / 6.0;
                volume += v;
                first += (origin + apex + b + c) * 0.25 * v;
            }
        }

        let centroid = if volume.abs() > DEGENERATE_EPSILON {
            first / volume
        } else {
            self.positions().iter().copied().sum::<DVec3>() / self.vertices.len() as f64
        };

        Ok(Moments { volume, centroid })
    }
}

/// Area-weighted normal of a face given as indices into `positions`.
pub(crate) fn newell_normal(positions: &[DVec3], face: &[usize]) -> DVec3 {
    let n = face.len();
    let mut normal = DVec3::ZERO;
    for i in 0..n {
        let a = positions[face[i]];
        let b = positions[face[(i + 1) % n]];
        normal += a.cross(b);
    }
    normal
}
