//! # Fracture Kernel
//!
//! Computational-geometry kernel for mesh fracturing: seed patterns,
//! bounding volumes and exact half-space clipping of convex polyhedra.
//!
//! ## Architecture
//!
//! ```text
//! seeds ─→ delaunay ─→ neighbor lists ─┐
//!                                      ├─→ fracture (bisector clipping) ─→ pieces
//! Mesh ─→ indexed / convex polyhedron ─┘
//!            │
//!            ├─→ hull  (approximate convex hull)
//!            └─→ kdop  (k-slab container, culling)
//! ```
//!
//! ## Algorithms
//!
//! - **Triangulation**: Bowyer–Watson in 2D and 3D
//! - **Hull**: incremental, most-significant-point-first, vertex limited
//! - **Face-list clipping**: Sutherland–Hodgman per face plus cap synthesis
//! - **Indexed clipping**: neighbor-ring rewiring, faces derived on demand
//! - **Triangulation of faces**: ear clipping over an index arena
//!
//! ## Conventions
//!
//! Planes keep the half-space `dot(normal, p) + offset <= 0`. Faces and
//! neighbor rings are counter-clockwise seen from outside.
//!
//! ## Usage
//!
//! ```rust
//! use fracture_kernel::{fracture, IndexedPolyhedron, KernelConfig};
//! use fracture_kernel::primitives::create_box;
//! use glam::DVec3;
//!
//! let block = IndexedPolyhedron::from_mesh(&create_box(DVec3::ZERO, DVec3::ONE)).unwrap();
//! let seeds = [DVec3::new(0.25, 0.5, 0.5), DVec3::new(0.75, 0.5, 0.5)];
//! let pieces = fracture::fracture(&block, &seeds, &KernelConfig::default()).unwrap();
//! assert_eq!(pieces.len(), 2);
//! ```

pub mod config;
pub mod convex;
pub mod delaunay;
pub mod error;
pub mod fracture;
pub mod hull;
pub mod indexed;
pub mod kdop;
pub mod mesh;
pub mod plane;
pub mod primitives;

pub use crate::config::KernelConfig;
pub use convex::{Face, FacePolyhedron};
pub use delaunay::{triangulate_2d, triangulate_3d, Triangulation2, Triangulation3};
pub use error::{KernelError, KernelResult};
pub use hull::ConvexHull;
pub use indexed::{IndexedPolyhedron, Moments};
pub use kdop::{KDop, SupportPoints};
pub use mesh::Mesh;
pub use plane::{Plane, Side};
