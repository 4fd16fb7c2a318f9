//! # Fracture
//!
//! Voronoi partitioning by repeated half-space clipping. Each seed's cell is
//! the intersection of the bisector half-spaces towards every other seed.
//! Delaunay neighbors are applied first since they bound the cell; the rest
//! usually leave it untouched and fall through the clippers' trivial reject.
//!
//! Cells are independent, so both entry points run one rayon task per seed.

use crate::config::KernelConfig;
use crate::convex::FacePolyhedron;
use crate::delaunay::triangulate_3d_with;
use crate::error::KernelResult;
use crate::indexed::IndexedPolyhedron;
use crate::plane::Plane;
use config::constants::{DELAUNAY_EPSILON, VERTEX_MERGE_EPSILON};
use glam::DVec3;
use rayon::prelude::*;

/// Half-space of points closer to `seed` than to `other`, tagged with the
/// other seed's index.
pub fn bisector(seed: DVec3, other: DVec3, other_index: usize) -> Plane {
    Plane::from_point_normal((seed + other) * 0.5, other - seed).with_tag(other_index as u32)
}

/// Voronoi cells of `seeds` inside the box `[min, max]`, one per seed.
///
/// A seed repeating an earlier seed's position gets an empty cell, as does
/// a seed whose cell misses the box.
///
/// # Example
///
/// ```rust
/// use fracture_kernel::fracture::voronoi_cells;
/// use glam::DVec3;
///
/// let seeds = [DVec3::new(0.25, 0.5, 0.5), DVec3::new(0.75, 0.5, 0.5)];
/// let cells = voronoi_cells(&seeds, DVec3::ZERO, DVec3::ONE);
/// assert!((cells[0].volume() - 0.5).abs() < 1e-9);
/// ```
pub fn voronoi_cells(seeds: &[DVec3], min: DVec3, max: DVec3) -> Vec<FacePolyhedron> {
    let order = clip_orders(seeds, DELAUNAY_EPSILON);
    let bounds = FacePolyhedron::cuboid(min, max);

    let cells: Vec<FacePolyhedron> = seeds
        .par_iter()
        .enumerate()
        .map(|(i, _)| match &order[i] {
            Some(others) => bounds.clip_with_planes(&cell_planes(seeds, i, others)),
            None => FacePolyhedron::new(),
        })
        .collect();

    tracing::debug!(
        seeds = seeds.len(),
        cells = cells.iter().filter(|c| !c.is_empty()).count(),
        "computed voronoi cells"
    );
    cells
}

/// Splits a convex polyhedron into the Voronoi pieces of `seeds`.
///
/// Pieces keep seed order; seeds whose cell misses the polyhedron produce
/// no piece.
pub fn fracture(
    polyhedron: &IndexedPolyhedron,
    seeds: &[DVec3],
    config: &KernelConfig,
) -> KernelResult<Vec<IndexedPolyhedron>> {
    if polyhedron.is_empty() {
        return Ok(Vec::new());
    }
    let order = clip_orders(seeds, config.delaunay_epsilon);

    let pieces = seeds
        .par_iter()
        .enumerate()
        .filter_map(|(i, _)| order[i].as_ref().map(|others| (i, others)))
        .map(|(i, others)| {
            let mut piece = polyhedron.clone();
            piece.clip_with_tolerance(&cell_planes(seeds, i, others), config.on_plane_epsilon)?;
            Ok(piece)
        })
        .collect::<KernelResult<Vec<_>>>()?;

    let pieces: Vec<IndexedPolyhedron> = pieces.into_iter().filter(|p| !p.is_empty()).collect();
    tracing::debug!(
        seeds = seeds.len(),
        pieces = pieces.len(),
        "fractured polyhedron"
    );
    Ok(pieces)
}

/// Per seed, the other seeds to clip against: Delaunay neighbors first.
/// `None` marks a seed that duplicates an earlier one.
fn clip_orders(seeds: &[DVec3], epsilon: f64) -> Vec<Option<Vec<usize>>> {
    let neighbors = triangulate_3d_with(seeds, epsilon).neighbors();

    (0..seeds.len())
        .map(|i| {
            let duplicate = seeds[..i]
                .iter()
                .any(|s| s.distance(seeds[i]) < VERTEX_MERGE_EPSILON);
            if duplicate {
                return None;
            }

            let mut order: Vec<usize> = neighbors.get(i).cloned().unwrap_or_default();
            let mut seen = vec![false; seeds.len()];
            for &j in &order {
                seen[j] = true;
            }
            order.extend((0..seeds.len()).filter(|&j| j != i && !seen[j]));
            Some(order)
        })
        .collect()
}

fn cell_planes(seeds: &[DVec3], i: usize, others: &[usize]) -> Vec<Plane> {
    others
        .iter()
        .filter(|&&j| seeds[j].distance(seeds[i]) >= VERTEX_MERGE_EPSILON)
        .map(|&j| bisector(seeds[i], seeds[j], j))
        .collect()
}
