//! # Config Crate
//!
//! Centralized tolerances and defaults for the fracture geometry kernel.
//! Every epsilon used by a geometric predicate is defined here so tests can
//! probe boundary behavior against the same values the algorithms use.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{ON_PLANE_EPSILON, DELAUNAY_EPSILON};
//!
//! // A signed distance this small counts as "on the plane".
//! let distance: f64 = 1e-12;
//! assert!(distance.abs() <= ON_PLANE_EPSILON);
//!
//! // Circumsphere containment is looser than plane classification.
//! assert!(DELAUNAY_EPSILON > ON_PLANE_EPSILON);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Fixed Epsilons**: Predicates use fixed thresholds, not exact arithmetic
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
