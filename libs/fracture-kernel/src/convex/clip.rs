//! # Face-List Clipping
//!
//! Sutherland–Hodgman generalized to convex polyhedra. Every clipping face
//! trims each existing face against its plane, then contributes a cap: the
//! clipping face itself trimmed by every existing face.

use super::face::Face;
use super::polyhedron::FacePolyhedron;
use crate::plane::Plane;
use config::constants::{DEGENERATE_EPSILON, ON_PLANE_EPSILON};

impl FacePolyhedron {
    /// Intersection with the half-spaces below each clipping face.
    ///
    /// Clipping faces are counter-clockwise seen from the removed side. The
    /// receiver is not modified.
    pub fn clip_with_faces(&self, clip_faces: &[Face]) -> FacePolyhedron {
        let mut faces = self.faces().to_vec();
        for clip_face in clip_faces {
            if faces.is_empty() {
                break;
            }
            let Some(plane) = clip_face.plane() else {
                continue;
            };
            faces = clip_step(&faces, clip_face, &plane);
        }
        FacePolyhedron::from_faces(faces)
    }

    /// Intersection of two convex polyhedra.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fracture_kernel::convex::FacePolyhedron;
    /// use glam::DVec3;
    ///
    /// let a = FacePolyhedron::cuboid(DVec3::ZERO, DVec3::splat(2.0));
    /// let b = FacePolyhedron::cuboid(DVec3::ONE, DVec3::splat(3.0));
    /// let both = a.clip_with_polyhedron(&b);
    /// assert!((both.volume() - 1.0).abs() < 1e-9);
    /// ```
    pub fn clip_with_polyhedron(&self, other: &FacePolyhedron) -> FacePolyhedron {
        self.clip_with_faces(other.faces())
    }

    /// Intersection with the negative side of every plane.
    pub fn clip_with_planes(&self, planes: &[Plane]) -> FacePolyhedron {
        if self.is_empty() || planes.is_empty() {
            return self.clone();
        }
        let (min, max) = self.bounding_box();
        let extent = (max - min).length() * 2.0 + 1.0;
        let center = (min + max) * 0.5;

        let quads: Vec<Face> = planes
            .iter()
            .map(|p| Face::new(p.quad(center, extent).to_vec()))
            .collect();
        self.clip_with_faces(&quads)
    }

    /// Intersection with the negative side of `plane`.
    pub fn clip_with_plane(&self, plane: &Plane) -> FacePolyhedron {
        self.clip_with_planes(std::slice::from_ref(plane))
    }
}

/// One clipping pass against a single face.
fn clip_step(faces: &[Face], clip_face: &Face, plane: &Plane) -> Vec<Face> {
    let mut any_outside = false;
    let mut any_inside = false;
    for v in faces.iter().flat_map(|f| f.vertices()) {
        let d = plane.signed_distance(*v);
        any_outside |= d > ON_PLANE_EPSILON;
        any_inside |= d < -ON_PLANE_EPSILON;
    }
    if !any_outside {
        return faces.to_vec();
    }
    if !any_inside {
        tracing::trace!("clipping face removes the whole polyhedron");
        return Vec::new();
    }

    let mut clipped: Vec<Face> = faces
        .iter()
        .filter_map(|f| f.clip(plane, ON_PLANE_EPSILON))
        .collect();

    let existing: Vec<Plane> = faces.iter().filter_map(Face::plane).collect();
    if existing.iter().any(|p| p.coincides(plane)) {
        return clipped;
    }

    let cap = existing
        .iter()
        .try_fold(clip_face.clone(), |cap, p| cap.clip(p, ON_PLANE_EPSILON));
    if let Some(cap) = cap {
        if cap.area() > DEGENERATE_EPSILON {
            clipped.push(cap);
        }
    }
    clipped
}

