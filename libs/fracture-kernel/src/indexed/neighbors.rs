//! Neighbor-ring extraction from triangle meshes.

use crate::error::{KernelError, KernelResult};
use crate::mesh::Mesh;
use glam::DVec3;
use std::collections::HashMap;

/// Derives positions and counter-clockwise neighbor rings from a closed,
/// outward-wound triangle mesh.
///
/// Coincident coordinates are welded first. Each triangle `(v, x, y)`
/// contributes the step `x -> y` to `v`'s ring; the steps must chain into a
/// single closed cycle per vertex.
///
/// # Errors
///
/// `InvalidInput` when a triangle references a vertex past the end of the
/// vertex buffer.
///
/// `InvalidTopology` when a ring is open (boundary), branches (non-manifold
/// vertex or inconsistent winding) or the resulting adjacency is asymmetric.
pub fn extract_neighbors_from_mesh(mesh: &Mesh) -> KernelResult<(Vec<DVec3>, Vec<Vec<usize>>)> {
    if let Some(index) = mesh.first_invalid_triangle() {
        return Err(KernelError::invalid_input(format!(
            "triangle {index} references a vertex outside the {} vertices",
            mesh.vertex_count()
        )));
    }

    let welded = mesh.welded();
    let n = welded.vertex_count();

    let mut steps: Vec<HashMap<usize, usize>> = vec![HashMap::new(); n];
    for tri in welded.triangles() {
        let [a, b, c] = tri.map(|i| i as usize);
        for (v, x, y) in [(a, b, c), (b, c, a), (c, a, b)] {
            if steps[v].insert(x, y).is_some() {
                return Err(KernelError::invalid_topology(format!(
                    "edge {v}-{x} is used twice with the same winding"
                )));
            }
        }
    }

    let mut rings = Vec::with_capacity(n);
    for (v, step) in steps.iter().enumerate() {
        let Some(&start) = step.keys().min() else {
            // Unreferenced vertex left behind by welding
            return Err(KernelError::invalid_topology(format!(
                "vertex {v} is not used by any triangle"
            )));
        };

        let mut ring = vec![start];
        let mut current = start;
        loop {
            let next = *step.get(&current).ok_or_else(|| {
                KernelError::invalid_topology(format!("ring of vertex {v} is open at {current}"))
            })?;
            if next == start {
                break;
            }
            if ring.len() >= step.len() {
                return Err(KernelError::invalid_topology(format!(
                    "ring of vertex {v} does not close"
                )));
            }
            ring.push(next);
            current = next;
        }

        if ring.len() != step.len() {
            return Err(KernelError::invalid_topology(format!(
                "vertex {v} has more than one triangle fan"
            )));
        }
        rings.push(ring);
    }

    for (v, ring) in rings.iter().enumerate() {
        if let Some(&u) = ring.iter().find(|&&u| !rings[u].contains(&v)) {
            return Err(KernelError::invalid_topology(format!(
                "edge {v}-{u} is not symmetric"
            )));
        }
    }

    tracing::debug!(vertices = n, "extracted neighbor rings from mesh");
    Ok((welded.vertices().to_vec(), rings))
}
