//! # Primitives
//!
//! Source meshes for fracturing: boxes and lat/long spheres, all wound
//! counter-clockwise seen from outside.

pub mod cube;
pub mod sphere;

pub use cube::{create_box, create_cube};
pub use sphere::create_sphere;
