//! # Plane / Half-Space
//!
//! Oriented plane shared by every clipper in the kernel. A point with
//! `signed_distance >= 0` lies outside (above) the half-space; clipping keeps
//! the side with negative signed distance.

use config::constants::{DEGENERATE_EPSILON, PLANE_COINCIDENCE_EPSILON};
use glam::DVec3;
use serde::{Deserialize, Serialize};

// =============================================================================
// CLASSIFICATION
// =============================================================================

/// Classification of a point relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Negative signed distance: kept by clipping.
    Below,
    /// Positive signed distance: removed by clipping.
    Above,
    /// Within tolerance of the plane.
    On,
}

// =============================================================================
// PLANE
// =============================================================================

/// A plane `dot(normal, p) + offset = 0` with an optional caller tag.
///
/// # Example
///
/// ```rust
/// use fracture_kernel::{Plane, Side};
/// use glam::DVec3;
///
/// // Keeps x <= 0
/// let plane = Plane::new(DVec3::X, 0.0);
/// assert_eq!(plane.classify(DVec3::new(-1.0, 0.0, 0.0), 1e-10), Side::Below);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    /// Unit normal pointing to the removed side.
    pub normal: DVec3,
    /// Signed offset so that `dot(normal, p) + offset` is the distance.
    pub offset: f64,
    /// Caller-defined label (K-DOP axis index, seed index, ...).
    pub tag: Option<u32>,
}

impl Plane {
    /// Creates a plane from a normal and offset. The normal is normalized.
    pub fn new(normal: DVec3, offset: f64) -> Self {
        let length = normal.length();
        if length > DEGENERATE_EPSILON {
            Self {
                normal: normal / length,
                offset: offset / length,
                tag: None,
            }
        } else {
            Self {
                normal,
                offset,
                tag: None,
            }
        }
    }

    /// Creates the plane through `point` with the given outward normal.
    pub fn from_point_normal(point: DVec3, normal: DVec3) -> Self {
        let normal = normal.normalize_or_zero();
        Self {
            normal,
            offset: -normal.dot(point),
            tag: None,
        }
    }

    /// Creates a plane from three points.
    ///
    /// Points should be in counter-clockwise order when viewed from outside.
    /// Returns `None` for colinear points.
    pub fn from_points(a: DVec3, b: DVec3, c: DVec3) -> Option<Self> {
        let normal = (b - a).cross(c - a);
        if normal.length_squared() < DEGENERATE_EPSILON {
            return None;
        }
        Some(Self::from_point_normal(a, normal))
    }

    /// Returns the same plane carrying `tag`.
    pub fn with_tag(mut self, tag: u32) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Flip the plane (reverse normal), keeping the tag.
    pub fn flip(&self) -> Plane {
        Plane {
            normal: -self.normal,
            offset: -self.offset,
            tag: self.tag,
        }
    }

    /// Signed distance from point to plane.
    ///
    /// Positive = above (removed), negative = below (kept).
    #[inline]
    pub fn signed_distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) + self.offset
    }

    /// Classify a point relative to this plane.
    pub fn classify(&self, point: DVec3, epsilon: f64) -> Side {
        let dist = self.signed_distance(point);
        if dist > epsilon {
            Side::Above
        } else if dist < -epsilon {
            Side::Below
        } else {
            Side::On
        }
    }

    /// True when both planes describe the same oriented half-space.
    pub fn coincides(&self, other: &Plane) -> bool {
        self.normal.distance(other.normal) < PLANE_COINCIDENCE_EPSILON
            && (self.offset - other.offset).abs() < PLANE_COINCIDENCE_EPSILON
    }

    /// Point where segment `a..b` crosses the plane.
    ///
    /// Interpolates by the endpoints' signed distances and falls back to the
    /// midpoint when they are numerically equal.
    pub fn intersect_segment(&self, a: DVec3, b: DVec3) -> DVec3 {
        let da = self.signed_distance(a);
        let db = self.signed_distance(b);
        let denom = da - db;
        if denom.abs() < DEGENERATE_EPSILON {
            return (a + b) * 0.5;
        }
        let t = (da / denom).clamp(0.0, 1.0);
        a + (b - a) * t
    }

    /// Returns an orthonormal pair spanning the plane.
    pub fn basis(&self) -> (DVec3, DVec3) {
        let u = self.normal.any_orthonormal_vector();
        let v = self.normal.cross(u);
        (u, v)
    }

    /// Point on the plane closest to the origin.
    pub fn origin(&self) -> DVec3 {
        -self.normal * self.offset
    }

    /// Square of side `2 * half_size` on the plane, centered on the
    /// projection of `center`, counter-clockwise around the normal.
    pub fn quad(&self, center: DVec3, half_size: f64) -> [DVec3; 4] {
        let (u, v) = self.basis();
        let origin = center - self.normal * self.signed_distance(center);
        [
            origin + (-u - v) * half_size,
            origin + (u - v) * half_size,
            origin + (u + v) * half_size,
            origin + (-u + v) * half_size,
        ]
    }
}

// =============================================================================
// TESTS
// =============================================================================
