//! # Ear Clipping
//!
//! Polygon triangulation over an index arena: each node stores the indices
//! of its ring neighbors, so unlinking an ear is an O(1) splice.

use config::constants::DEGENERATE_EPSILON;
use glam::DVec3;

#[derive(Debug, Clone, Copy)]
struct Node {
    /// Index into the position buffer
    vertex: usize,
    prev: usize,
    next: usize,
    reflex: bool,
}

/// Triangulates a simple polygon lying in the plane with `normal`.
///
/// `polygon` lists indices into `positions`, counter-clockwise around
/// `normal`. Triangles reuse those indices and keep the winding.
///
/// Returns an empty list when no ear is found during a full traversal of
/// the remaining ring (self-intersecting or degenerate polygon).
///
/// # Example
///
/// ```rust
/// use fracture_kernel::indexed::ear_clip;
/// use glam::DVec3;
///
/// let square = [DVec3::ZERO, DVec3::X, DVec3::new(1.0, 1.0, 0.0), DVec3::Y];
/// let triangles = ear_clip(&square, &[0, 1, 2, 3], DVec3::Z);
/// assert_eq!(triangles.len(), 2);
/// ```
pub fn ear_clip(positions: &[DVec3], polygon: &[usize], normal: DVec3) -> Vec<[usize; 3]> {
    let n = polygon.len();
    if n < 3 {
        return Vec::new();
    }
    if n == 3 {
        return vec![[polygon[0], polygon[1], polygon[2]]];
    }

    let mut nodes: Vec<Node> = (0..n)
        .map(|i| Node {
            vertex: polygon[i],
            prev: (i + n - 1) % n,
            next: (i + 1) % n,
            reflex: false,
        })
        .collect();
    for i in 0..n {
        nodes[i].reflex = !is_convex(&nodes, i, positions, normal);
    }
    let mut reflex: Vec<usize> = (0..n).filter(|&i| nodes[i].reflex).collect();

    let mut triangles = Vec::with_capacity(n - 2);
    let mut remaining = n;
    let mut current = 0;
    let mut misses = 0;

    while remaining > 3 {
        if is_ear(&nodes, current, &reflex, positions, normal) {
            let Node { prev, next, vertex, .. } = nodes[current];
            triangles.push([nodes[prev].vertex, vertex, nodes[next].vertex]);

            nodes[prev].next = next;
            nodes[next].prev = prev;
            remaining -= 1;

            for neighbor in [prev, next] {
                if nodes[neighbor].reflex && is_convex(&nodes, neighbor, positions, normal) {
                    nodes[neighbor].reflex = false;
                    reflex.retain(|&r| r != neighbor);
                }
            }

            current = next;
            misses = 0;
        } else {
            current = nodes[current].next;
            misses += 1;
            if misses > remaining {
                tracing::warn!(
                    vertices = n,
                    remaining,
                    "ear clipping found no ear, polygon is degenerate"
                );
                return Vec::new();
            }
        }
    }

    let Node { prev, next, vertex, .. } = nodes[current];
    triangles.push([nodes[prev].vertex, vertex, nodes[next].vertex]);
    triangles
}

fn is_convex(nodes: &[Node], i: usize, positions: &[DVec3], normal: DVec3) -> bool {
    let a = positions[nodes[nodes[i].prev].vertex];
    let b = positions[nodes[i].vertex];
    let c = positions[nodes[nodes[i].next].vertex];
    (b - a).cross(c - b).dot(normal) > DEGENERATE_EPSILON
}

fn is_ear(nodes: &[Node], i: usize, reflex: &[usize], positions: &[DVec3], normal: DVec3) -> bool {
    if nodes[i].reflex {
        return false;
    }
    let (prev, next) = (nodes[i].prev, nodes[i].next);
    let a = positions[nodes[prev].vertex];
    let b = positions[nodes[i].vertex];
    let c = positions[nodes[next].vertex];

    !reflex
        .iter()
        .filter(|&&r| r != prev && r != next && r != i)
        .any(|&r| inside_or_on(positions[nodes[r].vertex], a, b, c, normal))
}

/// Reflex vertices touching an ear's edge block it too.
fn inside_or_on(p: DVec3, a: DVec3, b: DVec3, c: DVec3, normal: DVec3) -> bool {
    (b - a).cross(p - a).dot(normal) >= -DEGENERATE_EPSILON
        && (c - b).cross(p - b).dot(normal) >= -DEGENERATE_EPSILON
        && (a - c).cross(p - c).dot(normal) >= -DEGENERATE_EPSILON
}
