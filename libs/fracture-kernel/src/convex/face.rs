//! # Face
//!
//! Independent convex polygon of a face-list polyhedron. Faces share corner
//! coordinates with their neighbors but no indices.

use crate::plane::Plane;
use config::constants::{DEGENERATE_EPSILON, VERTEX_MERGE_EPSILON};
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// A convex polygon, counter-clockwise seen from outside.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Face {
    vertices: Vec<DVec3>,
}

impl Face {
    /// Creates a face from vertices in counter-clockwise order.
    pub fn new(vertices: Vec<DVec3>) -> Self {
        Self { vertices }
    }

    /// Get face vertices.
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Number of corners.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Area-weighted normal (Newell's method); length is twice the area.
    pub fn area_normal(&self) -> DVec3 {
        let n = self.vertices.len();
        let mut normal = DVec3::ZERO;
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            normal += a.cross(b);
        }
        normal
    }

    /// Unit outward normal, or zero for a degenerate face.
    pub fn normal(&self) -> DVec3 {
        self.area_normal().normalize_or_zero()
    }

    /// Polygon area.
    pub fn area(&self) -> f64 {
        self.area_normal().length() * 0.5
    }

    /// Average of the corners.
    pub fn centroid(&self) -> DVec3 {
        if self.vertices.is_empty() {
            return DVec3::ZERO;
        }
        self.vertices.iter().copied().sum::<DVec3>() / self.vertices.len() as f64
    }

    /// Supporting plane with the outward normal. `None` if degenerate.
    pub fn plane(&self) -> Option<Plane> {
        let normal = self.area_normal();
        if self.vertices.len() < 3 || normal.length() < DEGENERATE_EPSILON {
            return None;
        }
        Some(Plane::from_point_normal(self.centroid(), normal))
    }

    /// Flip the face (reverse winding order).
    pub fn flip(&self) -> Face {
        let mut vertices = self.vertices.clone();
        vertices.reverse();
        Face { vertices }
    }

    /// Keeps the part of the face with signed distance `<= epsilon`.
    ///
    /// Walks every edge with Sutherland–Hodgman rules: in/in emits the end
    /// vertex, in/out the crossing, out/in the crossing and the end vertex.
    /// Returns `None` when fewer than 3 distinct corners remain.
    pub fn clip(&self, plane: &Plane, epsilon: f64) -> Option<Face> {
        let n = self.vertices.len();
        if n < 3 {
            return None;
        }

        let distances: Vec<f64> = self
            .vertices
            .iter()
            .map(|v| plane.signed_distance(*v))
            .collect();
        if distances.iter().all(|&d| d <= epsilon) {
            return Some(self.clone());
        }

        let mut out = Vec::with_capacity(n + 1);
        for i in 0..n {
            let prev = (i + n - 1) % n;
            let (a, b) = (self.vertices[prev], self.vertices[i]);
            let a_in = distances[prev] <= epsilon;
            let b_in = distances[i] <= epsilon;

            match (a_in, b_in) {
                (true, true) => out.push(b),
                (true, false) => out.push(plane.intersect_segment(a, b)),
                (false, true) => {
                    out.push(plane.intersect_segment(a, b));
                    out.push(b);
                }
                (false, false) => {}
            }
        }

        let face = Face::new(dedup_ring(out));
        (face.len() >= 3).then_some(face)
    }
}

/// Merges consecutive (and wrap-around) coordinates closer than
/// `VERTEX_MERGE_EPSILON`.
fn dedup_ring(mut ring: Vec<DVec3>) -> Vec<DVec3> {
    ring.dedup_by(|b, a| a.distance(*b) < VERTEX_MERGE_EPSILON);
    while ring.len() > 1 {
        let (first, last) = (ring[0], ring[ring.len() - 1]);
        if first.distance(last) < VERTEX_MERGE_EPSILON {
            ring.pop();
        } else {
            break;
        }
    }
    ring
}
