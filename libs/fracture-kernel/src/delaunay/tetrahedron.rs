//! 3D Delaunay simplex with cached circumsphere.

use config::constants::DEGENERATE_EPSILON;
use glam::DVec3;

/// Positively oriented tetrahedron over point indices.
///
/// Positive orientation means the fourth corner lies on the side the
/// counter-clockwise normal of the first three points toward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tetrahedron {
    /// Corner indices into the triangulated point set.
    pub indices: [usize; 4],
    /// Circumsphere center.
    pub center: DVec3,
    /// Circumradius; infinite for flat corners.
    pub radius: f64,
}

impl Tetrahedron {
    /// Builds the tetrahedron, swapping two corners when needed so the
    /// orientation is positive, and caches the circumsphere.
    pub fn new(indices: [usize; 4], points: &[DVec3]) -> Self {
        let [i0, i1, i2, i3] = indices;
        let a = points[i0];
        let u = points[i1] - a;
        let v = points[i2] - a;
        let w = points[i3] - a;

        let det = u.dot(v.cross(w));
        let indices = if det < 0.0 { [i0, i2, i1, i3] } else { indices };

        if det.abs() < DEGENERATE_EPSILON {
            return Self {
                indices,
                center: (a + points[i1] + points[i2] + points[i3]) * 0.25,
                radius: f64::INFINITY,
            };
        }

        let offset = (v.cross(w) * u.length_squared()
            + w.cross(u) * v.length_squared()
            + u.cross(v) * w.length_squared())
            / (2.0 * det);

        Self {
            indices,
            center: a + offset,
            radius: offset.length(),
        }
    }

    /// The four faces, each counter-clockwise seen from outside.
    pub fn faces(&self) -> [[usize; 3]; 4] {
        let [a, b, c, d] = self.indices;
        [[a, c, b], [a, b, d], [a, d, c], [b, c, d]]
    }

    /// The six undirected edges.
    pub fn edges(&self) -> [[usize; 2]; 6] {
        let [a, b, c, d] = self.indices;
        [[a, b], [a, c], [a, d], [b, c], [b, d], [c, d]]
    }

    /// True when `point` lies inside the circumsphere within `epsilon`.
    #[inline]
    pub fn circumsphere_contains(&self, point: DVec3, epsilon: f64) -> bool {
        if !self.radius.is_finite() {
            return true;
        }
        point.distance_squared(self.center) - self.radius * self.radius <= epsilon
    }

    /// True if any corner index is at least `limit`.
    pub fn touches_from(&self, limit: usize) -> bool {
        self.indices.iter().any(|&i| i >= limit)
    }

    /// Unsigned volume.
    pub fn volume(&self, points: &[DVec3]) -> f64 {
        let [a, b, c, d] = self.indices.map(|i| points[i]);
        (b - a).dot((c - a).cross(d - a)).abs() / 6.0
    }
}
