//! # Face-List Polyhedron
//!
//! Convex polyhedron stored as independent outward faces. Connectivity is
//! implicit: faces touching the same corner just repeat its coordinates.

use super::face::Face;
use crate::indexed::ear_clip;
use crate::mesh::{self, Mesh};
use crate::plane::Plane;
use config::constants::{DEGENERATE_EPSILON, VERTEX_MERGE_EPSILON};
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Convex polyhedron as a list of counter-clockwise faces.
///
/// # Example
///
/// ```rust
/// use fracture_kernel::convex::FacePolyhedron;
/// use glam::DVec3;
///
/// let cube = FacePolyhedron::cuboid(DVec3::ZERO, DVec3::splat(2.0));
/// assert_eq!(cube.faces().len(), 6);
/// assert!((cube.volume() - 8.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FacePolyhedron {
    faces: Vec<Face>,
}

impl FacePolyhedron {
    /// Creates an empty polyhedron.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a polyhedron from explicit faces. Faces with fewer than 3
    /// corners are dropped.
    pub fn from_faces(faces: Vec<Face>) -> Self {
        Self {
            faces: faces.into_iter().filter(|f| f.len() >= 3).collect(),
        }
    }

    /// Axis-aligned box spanning `min..max`.
    pub fn cuboid(min: DVec3, max: DVec3) -> Self {
        let corner = |x: bool, y: bool, z: bool| {
            DVec3::new(
                if x { max.x } else { min.x },
                if y { max.y } else { min.y },
                if z { max.z } else { min.z },
            )
        };
        let quad = |a, b, c, d| Face::new(vec![a, b, c, d]);

        Self::from_faces(vec![
            // -x, +x
            quad(
                corner(false, false, false),
                corner(false, false, true),
                corner(false, true, true),
                corner(false, true, false),
            ),
            quad(
                corner(true, false, false),
                corner(true, true, false),
                corner(true, true, true),
                corner(true, false, true),
            ),
            // -y, +y
            quad(
                corner(false, false, false),
                corner(true, false, false),
                corner(true, false, true),
                corner(false, false, true),
            ),
            quad(
                corner(false, true, false),
                corner(false, true, true),
                corner(true, true, true),
                corner(true, true, false),
            ),
            // -z, +z
            quad(
                corner(false, false, false),
                corner(false, true, false),
                corner(true, true, false),
                corner(true, false, false),
            ),
            quad(
                corner(false, false, true),
                corner(true, false, true),
                corner(true, true, true),
                corner(false, true, true),
            ),
        ])
    }

    /// One triangular face per mesh triangle.
    pub fn from_mesh(mesh: &Mesh) -> Self {
        Self::from_faces(
            mesh.triangles()
                .iter()
                .map(|t| Face::new(t.iter().map(|&i| mesh.vertex(i)).collect()))
                .collect(),
        )
    }

    /// Get the faces.
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Outward planes of the non-degenerate faces.
    pub fn planes(&self) -> Vec<Plane> {
        self.faces.iter().filter_map(Face::plane).collect()
    }

    /// Distinct corner coordinates.
    pub fn vertices(&self) -> Vec<DVec3> {
        let mut unique: Vec<DVec3> = Vec::new();
        for v in self.faces.iter().flat_map(|f| f.vertices()) {
            if !unique.iter().any(|u| u.distance(*v) < VERTEX_MERGE_EPSILON) {
                unique.push(*v);
            }
        }
        unique
    }

    /// Axis-aligned bounds of all corners.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        let corners: Vec<DVec3> = self
            .faces
            .iter()
            .flat_map(|f| f.vertices().iter().copied())
            .collect();
        mesh::bounding_box(&corners)
    }

    /// Enclosed volume (divergence theorem over face fans).
    pub fn volume(&self) -> f64 {
        self.fan_tetrahedra().map(|(volume, _)| volume).sum()
    }

    /// Volume centroid; falls back to the corner average when the volume
    /// vanishes.
    pub fn centroid(&self) -> DVec3 {
        let (volume, weighted) = self
            .fan_tetrahedra()
            .fold((0.0, DVec3::ZERO), |(v, c), (dv, dc)| (v + dv, c + dc * dv));
        if volume.abs() < DEGENERATE_EPSILON {
            let corners = self.vertices();
            if corners.is_empty() {
                return DVec3::ZERO;
            }
            return corners.iter().copied().sum::<DVec3>() / corners.len() as f64;
        }
        weighted / volume
    }

    /// Signed volume and centroid of every origin-apex fan tetrahedron.
    fn fan_tetrahedra(&self) -> impl Iterator<Item = (f64, DVec3)> + '_ {
        self.faces.iter().flat_map(|face| {
            let v = face.vertices();
            (1..v.len().saturating_sub(1)).map(move |i| {
                let (a, b, c) = (v[0], v[i], v[i + 1]);
                (a.dot(b.cross(c)) / 6.0, (a + b + c) * 0.25)
            })
        })
    }

    /// True if `point` is inside or within tolerance of every face plane.
    pub fn contains(&self, point: DVec3) -> bool {
        !self.faces.is_empty()
            && self
                .planes()
                .iter()
                .all(|p| p.signed_distance(point) <= VERTEX_MERGE_EPSILON)
    }

    /// Translates every face.
    pub fn translate(&mut self, offset: DVec3) {
        self.faces = self
            .faces
            .iter()
            .map(|f| Face::new(f.vertices().iter().map(|v| *v + offset).collect()))
            .collect();
    }

    /// Ear-clipped triangle mesh; each face keeps its own corners so the
    /// mesh renders flat.
    pub fn to_mesh(&self) -> Mesh {
        let mut mesh = Mesh::new();
        for face in &self.faces {
            let base = mesh.vertex_count() as u32;
            for v in face.vertices() {
                mesh.add_vertex(*v);
            }
            let ring: Vec<usize> = (0..face.len()).collect();
            for [a, b, c] in ear_clip(face.vertices(), &ring, face.normal()) {
                mesh.add_triangle(base + a as u32, base + b as u32, base + c as u32);
            }
        }
        mesh
    }
}
