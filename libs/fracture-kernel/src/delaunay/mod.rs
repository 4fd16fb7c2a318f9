//! # Delaunay Triangulation
//!
//! Incremental Bowyer–Watson triangulation in 2D and 3D, used to build seed
//! patterns and Voronoi neighborhoods for fracturing.
//!
//! ## Algorithm
//!
//! 1. Enclose the points in a super triangle/tetrahedron
//!    `SUPER_SIMPLEX_SCALE` times larger than their bounding box
//! 2. For each point, collect the simplices whose circumcircle/circumsphere
//!    contains it (`distance² − radius² <= epsilon`)
//! 3. Keep only cavity edges/faces used by exactly one bad simplex
//! 4. Connect every cavity edge/face to the new point
//! 5. Drop every simplex that touches a super vertex
//!
//! Near-cocircular inputs may be split either way; ties are not resolved
//! with exact arithmetic.
//!
//! ## Example
//!
//! ```rust
//! use fracture_kernel::delaunay::triangulate_2d;
//! use glam::DVec2;
//!
//! let points = [
//!     DVec2::new(0.0, 0.0),
//!     DVec2::new(1.0, 0.0),
//!     DVec2::new(0.0, 1.0),
//!     DVec2::new(1.0, 1.0),
//! ];
//! let triangulation = triangulate_2d(&points);
//! assert_eq!(triangulation.triangles().len(), 2);
//! ```

mod tetrahedron;
mod triangle;

pub use tetrahedron::Tetrahedron;
pub use triangle::Triangle;

use config::constants::{DELAUNAY_EPSILON, SUPER_SIMPLEX_SCALE};
use glam::{DVec2, DVec3};
use std::collections::{BTreeSet, HashMap};

// =============================================================================
// 2D
// =============================================================================

/// Result of a 2D triangulation.
#[derive(Debug, Clone, Default)]
pub struct Triangulation2 {
    points: Vec<DVec2>,
    triangles: Vec<Triangle>,
    boundary: Vec<[usize; 2]>,
}

impl Triangulation2 {
    /// The triangulated input points.
    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    /// Counter-clockwise triangles with cached circumcircles.
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Edges used by exactly one triangle, oriented as in that triangle.
    pub fn boundary_edges(&self) -> &[[usize; 2]] {
        &self.boundary
    }

    /// Returns true when no triangle was produced.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Unique undirected edges, each as `[min, max]`.
    pub fn edges(&self) -> Vec<[usize; 2]> {
        unique_edges(self.triangles.iter().flat_map(|t| t.edges()))
    }

    /// Delaunay neighbors of every input point, sorted.
    pub fn neighbors(&self) -> Vec<Vec<usize>> {
        neighbor_lists(self.points.len(), &self.edges())
    }
}

/// Triangulates 2D points with the default tolerance.
///
/// Fewer than 3 points give an empty triangulation.
pub fn triangulate_2d(points: &[DVec2]) -> Triangulation2 {
    triangulate_2d_with(points, DELAUNAY_EPSILON)
}

/// Triangulates 2D points with an explicit circumcircle tolerance.
pub fn triangulate_2d_with(points: &[DVec2], epsilon: f64) -> Triangulation2 {
    let n = points.len();
    if n < 3 {
        return Triangulation2 {
            points: points.to_vec(),
            ..Default::default()
        };
    }

    let (min, max) = points[1..]
        .iter()
        .fold((points[0], points[0]), |(lo, hi), p| (lo.min(*p), hi.max(*p)));
    let center = (min + max) * 0.5;
    let size = (max - min).max_element().max(1.0) * SUPER_SIMPLEX_SCALE;

    let sqrt3 = 3.0_f64.sqrt();
    let mut all = points.to_vec();
    all.push(center + DVec2::new(-sqrt3, -1.0) * size);
    all.push(center + DVec2::new(sqrt3, -1.0) * size);
    all.push(center + DVec2::new(0.0, 2.0) * size);

    let mut triangles = vec![Triangle::new([n, n + 1, n + 2], &all)];

    for (i, &p) in points.iter().enumerate() {
        let mut cavity: Vec<[usize; 2]> = Vec::new();
        let mut counts: HashMap<[usize; 2], usize> = HashMap::new();

        triangles.retain(|tri| {
            if !tri.circumcircle_contains(p, epsilon) {
                return true;
            }
            for edge in tri.edges() {
                *counts.entry(sorted2(edge)).or_insert(0) += 1;
                cavity.push(edge);
            }
            false
        });

        for edge in cavity {
            if counts.get(&sorted2(edge)) == Some(&1) {
                triangles.push(Triangle::new([edge[0], edge[1], i], &all));
            }
        }
    }

    triangles.retain(|tri| !tri.touches_from(n));
    let boundary = boundary_items(triangles.iter().flat_map(|t| t.edges()), sorted2);

    tracing::debug!(
        points = n,
        triangles = triangles.len(),
        boundary = boundary.len(),
        "2D triangulation complete"
    );

    Triangulation2 {
        points: points.to_vec(),
        triangles,
        boundary,
    }
}

// =============================================================================
// 3D
// =============================================================================

/// Result of a 3D triangulation.
#[derive(Debug, Clone, Default)]
pub struct Triangulation3 {
    points: Vec<DVec3>,
    tetrahedra: Vec<Tetrahedron>,
    boundary: Vec<[usize; 3]>,
}

impl Triangulation3 {
    /// The triangulated input points.
    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    /// Positively oriented tetrahedra with cached circumspheres.
    pub fn tetrahedra(&self) -> &[Tetrahedron] {
        &self.tetrahedra
    }

    /// Faces used by exactly one tetrahedron, counter-clockwise from outside.
    pub fn boundary_faces(&self) -> &[[usize; 3]] {
        &self.boundary
    }

    /// Returns true when no tetrahedron was produced.
    pub fn is_empty(&self) -> bool {
        self.tetrahedra.is_empty()
    }

    /// Unique undirected edges, each as `[min, max]`.
    pub fn edges(&self) -> Vec<[usize; 2]> {
        unique_edges(self.tetrahedra.iter().flat_map(|t| t.edges()))
    }

    /// Delaunay neighbors of every input point, sorted.
    pub fn neighbors(&self) -> Vec<Vec<usize>> {
        neighbor_lists(self.points.len(), &self.edges())
    }

    /// Total volume of the tetrahedra.
    pub fn volume(&self) -> f64 {
        self.tetrahedra.iter().map(|t| t.volume(&self.points)).sum()
    }
}

/// Triangulates 3D points with the default tolerance.
///
/// Fewer than 4 points give an empty triangulation.
pub fn triangulate_3d(points: &[DVec3]) -> Triangulation3 {
    triangulate_3d_with(points, DELAUNAY_EPSILON)
}

/// Triangulates 3D points with an explicit circumsphere tolerance.
pub fn triangulate_3d_with(points: &[DVec3], epsilon: f64) -> Triangulation3 {
    let n = points.len();
    if n < 4 {
        return Triangulation3 {
            points: points.to_vec(),
            ..Default::default()
        };
    }

    let (min, max) = crate::mesh::bounding_box(points);
    let center = (min + max) * 0.5;
    let size = (max - min).max_element().max(1.0) * SUPER_SIMPLEX_SCALE * 3.0;

    let mut all = points.to_vec();
    all.push(center + DVec3::new(1.0, 1.0, 1.0) * size);
    all.push(center + DVec3::new(1.0, -1.0, -1.0) * size);
    all.push(center + DVec3::new(-1.0, 1.0, -1.0) * size);
    all.push(center + DVec3::new(-1.0, -1.0, 1.0) * size);

    let mut tetrahedra = vec![Tetrahedron::new([n, n + 1, n + 2, n + 3], &all)];

    for (i, &p) in points.iter().enumerate() {
        let mut cavity: Vec<[usize; 3]> = Vec::new();
        let mut counts: HashMap<[usize; 3], usize> = HashMap::new();

        tetrahedra.retain(|tet| {
            if !tet.circumsphere_contains(p, epsilon) {
                return true;
            }
            for face in tet.faces() {
                *counts.entry(sorted3(face)).or_insert(0) += 1;
                cavity.push(face);
            }
            false
        });

        for [a, b, c] in cavity {
            if counts.get(&sorted3([a, b, c])) == Some(&1) {
                // Outward face seen from the cavity: the new point lies behind it
                tetrahedra.push(Tetrahedron::new([a, c, b, i], &all));
            }
        }

        tracing::trace!(point = i, live = tetrahedra.len(), "inserted point");
    }

    tetrahedra.retain(|tet| !tet.touches_from(n));
    let boundary = boundary_items(tetrahedra.iter().flat_map(|t| t.faces()), sorted3);

    tracing::debug!(
        points = n,
        tetrahedra = tetrahedra.len(),
        boundary = boundary.len(),
        "3D triangulation complete"
    );

    Triangulation3 {
        points: points.to_vec(),
        tetrahedra,
        boundary,
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn sorted2([a, b]: [usize; 2]) -> [usize; 2] {
    if a < b {
        [a, b]
    } else {
        [b, a]
    }
}

fn sorted3(mut face: [usize; 3]) -> [usize; 3] {
    face.sort_unstable();
    face
}

/// Items appearing exactly once (by `key`), in first-seen order.
fn boundary_items<T, I>(items: I, key: fn(T) -> T) -> Vec<T>
where
    T: Copy + Eq + std::hash::Hash,
    I: Iterator<Item = T>,
{
    let items: Vec<T> = items.collect();
    let mut counts: HashMap<T, usize> = HashMap::with_capacity(items.len());
    for item in &items {
        *counts.entry(key(*item)).or_insert(0) += 1;
    }
    items
        .into_iter()
        .filter(|item| counts.get(&key(*item)) == Some(&1))
        .collect()
}

fn unique_edges(edges: impl Iterator<Item = [usize; 2]>) -> Vec<[usize; 2]> {
    edges.map(sorted2).collect::<BTreeSet<_>>().into_iter().collect()
}

fn neighbor_lists(count: usize, edges: &[[usize; 2]]) -> Vec<Vec<usize>> {
    let mut neighbors = vec![Vec::new(); count];
    for &[a, b] in edges {
        neighbors[a].push(b);
        neighbors[b].push(a);
    }
    for list in &mut neighbors {
        list.sort_unstable();
    }
    neighbors
}

#[cfg(test)]
mod tests;
