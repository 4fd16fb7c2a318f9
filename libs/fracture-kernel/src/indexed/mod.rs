//! # Indexed Polyhedron Clipper
//!
//! Vertex-adjacency polyhedra used for fracturing real meshes. Each vertex
//! keeps its neighbors in counter-clockwise order seen from outside; faces
//! exist only implicitly as cycles of that order.
//!
//! ## Face Loops
//!
//! Arriving at vertex `v` from `u`, the face continues to the neighbor that
//! precedes `u` in `v`'s ring. [`IndexedPolyhedron::extract_faces`] walks
//! these loops, and clipping keeps them valid by rewiring rings instead of
//! maintaining a face list.

mod clip;
mod ear_clip;
mod faces;
mod neighbors;
mod polyhedron;


pub use ear_clip::ear_clip;
pub use faces::Moments;
pub use neighbors::extract_neighbors_from_mesh;
pub use polyhedron::{IndexedPolyhedron, Vertex, VertexClass};
