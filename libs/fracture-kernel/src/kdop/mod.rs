//! # K-DOP Container
//!
//! Discrete oriented polytope bounding a point source with pairs of parallel
//! slabs along a fixed axis set. Each slab is pushed outward by a gap so the
//! container strictly encloses its source.
//!
//! ## Axis Sets
//!
//! | Half-spaces | Axes                                     |
//! |-------------|------------------------------------------|
//! | 6           | coordinate axes                          |
//! | 14          | coordinate axes + 4 corner diagonals     |
//! | 18          | coordinate axes + 6 edge diagonals       |
//! | 26          | all of the above                         |

#[cfg(test)]
mod tests;

use crate::config::KernelConfig;
use crate::convex::FacePolyhedron;
use crate::error::KernelResult;
use crate::hull::ConvexHull;
use crate::indexed::IndexedPolyhedron;
use crate::mesh::{self, Mesh};
use crate::plane::Plane;
use config::constants::{validate_kdop, HULL_CONTAINS_EPSILON};
use glam::DVec3;

/// Debug quads stay visible for single-point sources.
const DEBUG_QUAD_MIN_HALF_SIZE: f64 = 0.5;

// =============================================================================
// SOURCES
// =============================================================================

/// Anything a K-DOP can be fitted around.
pub trait SupportPoints {
    /// Points whose projections bound the container.
    fn support_points(&self) -> Vec<DVec3>;
}

impl SupportPoints for [DVec3] {
    fn support_points(&self) -> Vec<DVec3> {
        self.to_vec()
    }
}

impl SupportPoints for Vec<DVec3> {
    fn support_points(&self) -> Vec<DVec3> {
        self.clone()
    }
}

impl SupportPoints for Mesh {
    fn support_points(&self) -> Vec<DVec3> {
        self.vertices().to_vec()
    }
}

impl SupportPoints for IndexedPolyhedron {
    fn support_points(&self) -> Vec<DVec3> {
        self.positions()
    }
}

impl SupportPoints for FacePolyhedron {
    fn support_points(&self) -> Vec<DVec3> {
        self.vertices()
    }
}

impl SupportPoints for ConvexHull {
    fn support_points(&self) -> Vec<DVec3> {
        self.exterior_vertices().to_vec()
    }
}

// =============================================================================
// ELEMENT
// =============================================================================

/// One axis of the container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KDopElement {
    /// Unit axis direction.
    pub normal: DVec3,
    /// Smallest projection onto `normal`.
    pub min: f64,
    /// Largest projection onto `normal`.
    pub max: f64,
    /// Source point attaining `min`.
    pub min_vertex: DVec3,
    /// Source point attaining `max`.
    pub max_vertex: DVec3,
    /// Half-space `dot(normal, p) >= min - gap`, facing `-normal`.
    pub min_plane: Plane,
    /// Half-space `dot(normal, p) <= max + gap`, facing `normal`.
    pub max_plane: Plane,
}

impl KDopElement {
    fn empty(normal: DVec3) -> Self {
        Self {
            normal,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            min_vertex: DVec3::ZERO,
            max_vertex: DVec3::ZERO,
            min_plane: Plane::new(-normal, 0.0),
            max_plane: Plane::new(normal, 0.0),
        }
    }

    fn include(&mut self, point: DVec3) {
        let d = self.normal.dot(point);
        if d < self.min {
            self.min = d;
            self.min_vertex = point;
        }
        if d > self.max {
            self.max = d;
            self.max_vertex = point;
        }
    }

    fn finish(&mut self, gap: f64, axis: u32) {
        self.max_plane = Plane::new(self.normal, -(self.max + gap)).with_tag(axis);
        self.min_plane = Plane::new(-self.normal, self.min - gap).with_tag(axis);
    }
}

// =============================================================================
// CONTAINER
// =============================================================================

/// K-DOP fitted with [`KDop::calc`].
///
/// # Example
///
/// ```rust
/// use fracture_kernel::kdop::KDop;
/// use glam::DVec3;
///
/// let points = vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z];
/// let mut kdop = KDop::new(14, 0.01).unwrap();
/// kdop.calc(&points);
/// assert_eq!(kdop.planes().len(), 14);
/// assert!(points.iter().all(|&p| kdop.contains(p)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct KDop {
    gap_fraction: f64,
    elements: Vec<KDopElement>,
    bounded: bool,
}

impl KDop {
    /// Creates an unfitted container with `axis_count` half-spaces.
    pub fn new(axis_count: usize, gap_fraction: f64) -> KernelResult<Self> {
        validate_kdop(axis_count, gap_fraction)?;
        Ok(Self {
            gap_fraction,
            elements: axes(axis_count)
                .into_iter()
                .map(|axis| KDopElement::empty(axis.normalize()))
                .collect(),
            bounded: false,
        })
    }

    pub fn from_config(config: &KernelConfig) -> KernelResult<Self> {
        Self::new(config.kdop_axis_count, config.kdop_gap_fraction)
    }

    /// Fits the container around `source`, replacing any previous fit.
    ///
    /// The gap is the configured fraction of the source's bounding-box
    /// diagonal. An empty source leaves the container unbounded: no planes,
    /// nothing contained.
    pub fn calc<S: SupportPoints + ?Sized>(&mut self, source: &S) {
        let points = source.support_points();
        for element in &mut self.elements {
            *element = KDopElement::empty(element.normal);
        }
        self.bounded = !points.is_empty();
        if !self.bounded {
            tracing::debug!("k-dop source has no points");
            return;
        }

        let (min, max) = mesh::bounding_box(&points);
        let gap = self.gap_fraction * (max - min).length();
        for (axis, element) in self.elements.iter_mut().enumerate() {
            for &p in &points {
                element.include(p);
            }
            element.finish(gap, axis as u32);
        }

        tracing::debug!(
            axes = self.elements.len(),
            points = points.len(),
            gap,
            "fitted k-dop"
        );
    }

    pub fn elements(&self) -> &[KDopElement] {
        &self.elements
    }

    pub fn is_bounded(&self) -> bool {
        self.bounded
    }

    /// Two planes per axis, max plane first. Empty before a successful fit.
    pub fn planes(&self) -> Vec<Plane> {
        if !self.bounded {
            return Vec::new();
        }
        self.elements
            .iter()
            .flat_map(|e| [e.max_plane, e.min_plane])
            .collect()
    }

    pub fn contains(&self, point: DVec3) -> bool {
        self.bounded
            && self
                .planes()
                .iter()
                .all(|p| p.signed_distance(point) <= HULL_CONTAINS_EPSILON)
    }

    /// Clips a face-list polyhedron by the container. Planes lying on one of
    /// its faces are skipped.
    pub fn clip_with_polygon(&self, polyhedron: &FacePolyhedron) -> FacePolyhedron {
        let planes = skip_coincident(self.planes(), &polyhedron.planes());
        polyhedron.clip_with_planes(&planes)
    }

    /// Clipped copy of an indexed polyhedron.
    pub fn clip_with_polyhedron(
        &self,
        polyhedron: &IndexedPolyhedron,
    ) -> KernelResult<IndexedPolyhedron> {
        let planes = skip_coincident(self.planes(), &polyhedron.face_planes()?);
        let mut clipped = polyhedron.clone();
        clipped.clip(&planes)?;
        Ok(clipped)
    }

    /// Clips a convex hull by the container.
    pub fn clip_hull(&self, hull: &ConvexHull) -> FacePolyhedron {
        self.clip_with_polygon(&hull.to_face_polyhedron())
    }

    /// One quad per plane, sized to the fitted extent.
    pub fn to_debug_mesh(&self) -> Mesh {
        let planes = self.planes();
        let mut debug = Mesh::with_capacity(4 * planes.len(), 2 * planes.len());
        if planes.is_empty() {
            return debug;
        }

        let support: Vec<DVec3> = self
            .elements
            .iter()
            .flat_map(|e| [e.min_vertex, e.max_vertex])
            .collect();
        let (min, max) = mesh::bounding_box(&support);
        let center = (min + max) * 0.5;
        let half_size = ((max - min).length() * 0.5).max(DEBUG_QUAD_MIN_HALF_SIZE);

        for plane in &planes {
            let [a, b, c, d] = plane.quad(center, half_size).map(|p| debug.add_vertex(p));
            debug.add_triangle(a, b, c);
            debug.add_triangle(a, c, d);
        }
        debug
    }
}

fn skip_coincident(planes: Vec<Plane>, faces: &[Plane]) -> Vec<Plane> {
    planes
        .into_iter()
        .filter(|p| !faces.iter().any(|f| f.coincides(p)))
        .collect()
}

/// Unnormalized axis directions for a half-space count.
fn axes(axis_count: usize) -> Vec<DVec3> {
    let faces = [DVec3::X, DVec3::Y, DVec3::Z];
    let corners = [
        DVec3::new(1.0, 1.0, 1.0),
        DVec3::new(1.0, 1.0, -1.0),
        DVec3::new(1.0, -1.0, 1.0),
        DVec3::new(-1.0, 1.0, 1.0),
    ];
    let edges = [
        DVec3::new(1.0, 1.0, 0.0),
        DVec3::new(1.0, -1.0, 0.0),
        DVec3::new(1.0, 0.0, 1.0),
        DVec3::new(1.0, 0.0, -1.0),
        DVec3::new(0.0, 1.0, 1.0),
        DVec3::new(0.0, 1.0, -1.0),
    ];

    let mut axes = faces.to_vec();
    if axis_count == 14 || axis_count == 26 {
        axes.extend(corners);
    }
    if axis_count == 18 || axis_count == 26 {
        axes.extend(edges);
    }
    axes
}
