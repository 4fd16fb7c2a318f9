//! # Face-List Convex Clipper
//!
//! Convex polyhedra stored as independent faces, clipped against planes,
//! faces or other convex polyhedra. Used to carve Voronoi cells out of a
//! bounding box and to apply K-DOP half-spaces to polygon soups.
//!
//! Clipping never mutates its inputs; every operation returns a new
//! [`FacePolyhedron`].

mod clip;
mod face;
mod polyhedron;

#[cfg(test)]
mod tests;

pub use face::Face;
pub use polyhedron::FacePolyhedron;
