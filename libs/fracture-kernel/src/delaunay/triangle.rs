//! 2D Delaunay simplex with cached circumcircle.

use config::constants::DEGENERATE_EPSILON;
use glam::DVec2;

/// Counter-clockwise triangle over point indices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// Corner indices into the triangulated point set, CCW.
    pub indices: [usize; 3],
    /// Circumcircle center.
    pub center: DVec2,
    /// Squared circumradius; infinite for colinear corners.
    pub radius_squared: f64,
}

impl Triangle {
    /// Builds the triangle, reordering the corners counter-clockwise and
    /// caching the circumcircle.
    pub fn new(indices: [usize; 3], points: &[DVec2]) -> Self {
        let [i0, i1, i2] = indices;
        let a = points[i0];
        let b = points[i1] - a;
        let c = points[i2] - a;

        let d = 2.0 * b.perp_dot(c);
        let indices = if d < 0.0 { [i0, i2, i1] } else { indices };

        if d.abs() < DEGENERATE_EPSILON {
            return Self {
                indices,
                center: (points[i0] + points[i1] + points[i2]) / 3.0,
                radius_squared: f64::INFINITY,
            };
        }

        let b_sq = b.length_squared();
        let c_sq = c.length_squared();
        let offset = DVec2::new(c.y * b_sq - b.y * c_sq, b.x * c_sq - c.x * b_sq) / d;

        Self {
            indices,
            center: a + offset,
            radius_squared: offset.length_squared(),
        }
    }

    /// The three directed edges, following the winding.
    pub fn edges(&self) -> [[usize; 2]; 3] {
        let [a, b, c] = self.indices;
        [[a, b], [b, c], [c, a]]
    }

    /// True when `point` lies inside the circumcircle within `epsilon`.
    ///
    /// Degenerate triangles contain everything so they are always replaced.
    #[inline]
    pub fn circumcircle_contains(&self, point: DVec2, epsilon: f64) -> bool {
        if !self.radius_squared.is_finite() {
            return true;
        }
        point.distance_squared(self.center) - self.radius_squared <= epsilon
    }

    /// True if any corner index is at least `limit`.
    pub fn touches_from(&self, limit: usize) -> bool {
        self.indices.iter().any(|&i| i >= limit)
    }

    /// Unsigned area.
    pub fn area(&self, points: &[DVec2]) -> f64 {
        let [a, b, c] = self.indices.map(|i| points[i]);
        (b - a).perp_dot(c - a).abs() * 0.5
    }
}
