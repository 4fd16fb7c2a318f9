//! # Indexed Half-Space Clipping
//!
//! In-place clipping of an [`IndexedPolyhedron`] that keeps the neighbor
//! rings consistent. Per plane:
//!
//! 1. Bounding-box trivial reject, then classify every vertex
//! 2. Insert a `New` vertex on every edge from a kept to a clipped vertex
//! 3. Walk each face loop that enters the clipped region to find where it
//!    leaves again, and wire the cap edge between entry and exit cuts
//! 4. Collapse vertices left with two neighbors
//! 5. Compact surviving vertices and remap their rings
//!
//! All face walks read a snapshot of the rings taken before the plane is
//! applied.

use super::polyhedron::{face_successor, IndexedPolyhedron, Vertex, VertexClass};
use crate::error::{KernelError, KernelResult};
use crate::plane::Plane;
use config::constants::ON_PLANE_EPSILON;
use std::collections::HashMap;

/// Vertex side: below (kept), on the plane (kept), above (clipped).
const KEPT: i8 = -1;
const ON: i8 = 0;
const CLIPPED: i8 = 1;

/// Entry and exit cut of one face crossing the plane.
#[derive(Debug, Clone, Copy)]
struct Cut {
    entry: usize,
    exit: usize,
}

impl IndexedPolyhedron {
    /// Clips against every plane in order, keeping the negative sides.
    ///
    /// The polyhedron is emptied when fewer than 4 vertices survive.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fracture_kernel::indexed::IndexedPolyhedron;
    /// use fracture_kernel::primitives::create_box;
    /// use fracture_kernel::Plane;
    /// use glam::DVec3;
    ///
    /// let mesh = create_box(DVec3::splat(-1.0), DVec3::splat(1.0));
    /// let mut poly = IndexedPolyhedron::from_mesh(&mesh).unwrap();
    /// poly.clip(&[Plane::new(DVec3::X, 0.0)]).unwrap();
    /// assert!((poly.moments().unwrap().volume - 4.0).abs() < 1e-9);
    /// ```
    pub fn clip(&mut self, planes: &[Plane]) -> KernelResult<()> {
        self.clip_with_tolerance(planes, ON_PLANE_EPSILON)
    }

    /// Clips with an explicit on-plane tolerance.
    pub fn clip_with_tolerance(&mut self, planes: &[Plane], epsilon: f64) -> KernelResult<()> {
        for plane in planes {
            if self.is_empty() {
                break;
            }
            self.clip_plane(plane, epsilon)?;
        }
        Ok(())
    }

    /// Splits into the parts below and above `plane`.
    pub fn split(&self, plane: &Plane) -> KernelResult<(IndexedPolyhedron, IndexedPolyhedron)> {
        let mut below = self.clone();
        below.clip(std::slice::from_ref(plane))?;
        let mut above = self.clone();
        above.clip(&[plane.flip()])?;
        Ok((below, above))
    }

    fn clip_plane(&mut self, plane: &Plane, epsilon: f64) -> KernelResult<()> {
        // Trivial reject on the bounding box
        let (min, max) = self.bounding_box();
        let center = (min + max) * 0.5;
        let reach = plane.normal.abs().dot((max - min) * 0.5);
        let d_center = plane.signed_distance(center);
        if d_center + reach <= epsilon {
            return Ok(());
        }
        if d_center - reach >= -epsilon {
            tracing::trace!("plane removes the whole bounding box");
            self.clear();
            return Ok(());
        }

        let side: Vec<i8> = self
            .vertices
            .iter()
            .map(|v| {
                let d = plane.signed_distance(v.position);
                if d > epsilon {
                    CLIPPED
                } else if d < -epsilon {
                    KEPT
                } else {
                    ON
                }
            })
            .collect();
        if !side.contains(&CLIPPED) {
            return Ok(());
        }
        if !side.contains(&KEPT) {
            self.clear();
            return Ok(());
        }

        for (v, &s) in self.vertices.iter_mut().zip(&side) {
            v.class = match s {
                KEPT => VertexClass::Inside,
                ON => VertexClass::OnPlane,
                _ => VertexClass::Outside,
            };
        }

        let rings: Vec<Vec<usize>> = self.vertices.iter().map(|v| v.neighbors.clone()).collect();
        let original = self.vertices.len();

        // New vertices on crossing edges, keyed by (kept, clipped)
        let mut crossing: HashMap<(usize, usize), usize> = HashMap::new();
        for a in 0..original {
            if side[a] != KEPT {
                continue;
            }
            for &b in &rings[a] {
                if side[b] == CLIPPED {
                    let position = plane
                        .intersect_segment(self.vertices[a].position, self.vertices[b].position);
                    let id = self.vertices.len();
                    self.vertices.push(Vertex {
                        position,
                        neighbors: Vec::new(),
                        class: VertexClass::New,
                        id,
                    });
                    crossing.insert((a, b), id);
                }
            }
        }

        // Face loops entering the clipped region
        let mut entries: HashMap<(usize, usize), Cut> = HashMap::new();
        let mut exits: HashMap<(usize, usize), Cut> = HashMap::new();
        for a in 0..original {
            if side[a] == CLIPPED {
                continue;
            }
            for &b in &rings[a] {
                if side[b] != CLIPPED {
                    continue;
                }
                let (x, y) = walk_clipped_run(&rings, &side, a, b)?;
                let entry = if side[a] == KEPT { crossing_vertex(&crossing, a, b)? } else { a };
                let exit = if side[y] == KEPT { crossing_vertex(&crossing, y, x)? } else { y };
                if entry == exit {
                    continue;
                }
                let cut = Cut { entry, exit };
                entries.insert((a, b), cut);
                exits.insert((x, y), cut);
            }
        }

        // Rewire rings
        for (&(a, b), &w) in &crossing {
            let mut ring = vec![a];
            if let Some(cut) = exits.get(&(b, a)) {
                push_unique(&mut ring, w, cut.entry);
            }
            if let Some(cut) = entries.get(&(a, b)) {
                push_unique(&mut ring, w, cut.exit);
            }
            self.vertices[w].neighbors = ring;
        }

        for v in 0..original {
            match side[v] {
                KEPT => {
                    let ring = rings[v]
                        .iter()
                        .map(|&b| {
                            if side[b] == CLIPPED {
                                crossing_vertex(&crossing, v, b)
                            } else {
                                Ok(b)
                            }
                        })
                        .collect::<KernelResult<Vec<usize>>>()?;
                    self.vertices[v].neighbors = ring;
                }
                ON => {
                    self.vertices[v].neighbors =
                        patch_on_plane_ring(v, &rings[v], &side, &entries, &exits);
                }
                _ => self.vertices[v].neighbors.clear(),
            }
        }

        let mut removed: Vec<bool> = side.iter().map(|&s| s == CLIPPED).collect();
        removed.resize(self.vertices.len(), false);

        let collapsed = self.collapse_degenerate(&mut removed);
        self.compact(&removed);

        tracing::trace!(
            new = crossing.len(),
            collapsed,
            remaining = self.vertices.len(),
            "clipped polyhedron"
        );

        if self.vertices.len() < 4 {
            self.clear();
        }
        Ok(())
    }

    /// Splices out vertices with two neighbors and drops vertices with
    /// fewer, until none remain. Returns the number of vertices removed.
    fn collapse_degenerate(&mut self, removed: &mut [bool]) -> usize {
        let mut count = 0;
        loop {
            let Some(v) = (0..self.vertices.len())
                .find(|&v| !removed[v] && self.vertices[v].neighbors.len() < 3)
            else {
                return count;
            };

            let ring = std::mem::take(&mut self.vertices[v].neighbors);
            removed[v] = true;
            count += 1;

            if let [a, b] = ring.as_slice() {
                let (a, b) = (*a, *b);
                self.splice(a, v, b);
                self.splice(b, v, a);
            } else {
                for &u in &ring {
                    self.vertices[u].neighbors.retain(|&n| n != v);
                }
            }
        }
    }

    /// In `at`'s ring, replaces `old` with `new`, or drops `old` when `new`
    /// is already a neighbor.
    fn splice(&mut self, at: usize, old: usize, new: usize) {
        let ring = &mut self.vertices[at].neighbors;
        if ring.contains(&new) {
            ring.retain(|&n| n != old);
        } else if let Some(slot) = ring.iter_mut().find(|n| **n == old) {
            *slot = new;
        }
    }

    /// Drops removed vertices and renumbers the survivors sequentially.
    fn compact(&mut self, removed: &[bool]) {
        let mut next_id = 0;
        for (v, vertex) in self.vertices.iter_mut().enumerate() {
            if !removed[v] {
                vertex.id = next_id;
                next_id += 1;
            }
        }

        let ids: Vec<Option<usize>> = self
            .vertices
            .iter()
            .zip(removed)
            .map(|(v, &gone)| (!gone).then_some(v.id))
            .collect();
        let mut index = 0;
        self.vertices.retain(|_| {
            let keep = !removed[index];
            index += 1;
            keep
        });
        for vertex in &mut self.vertices {
            vertex.neighbors = vertex.neighbors.iter().filter_map(|&n| ids[n]).collect();
        }
    }
}

/// Follows the face loop through `a -> b` while it stays clipped. Returns
/// the last clipped vertex and the first vertex after it.
fn walk_clipped_run(
    rings: &[Vec<usize>],
    side: &[i8],
    a: usize,
    b: usize,
) -> KernelResult<(usize, usize)> {
    let (mut prev, mut current) = (a, b);
    for _ in 0..=rings.len() {
        let next = face_successor(rings, prev, current)?;
        if side[next] != CLIPPED {
            return Ok((current, next));
        }
        prev = current;
        current = next;
    }
    Err(KernelError::invalid_topology(format!(
        "face loop through {a}-{b} does not return"
    )))
}

/// New ring of an on-plane vertex: every run of clipped neighbors becomes
/// the exit cut of the face before the run and the entry cut of the face
/// after it.
fn patch_on_plane_ring(
    v: usize,
    ring: &[usize],
    side: &[i8],
    entries: &HashMap<(usize, usize), Cut>,
    exits: &HashMap<(usize, usize), Cut>,
) -> Vec<usize> {
    let n = ring.len();
    let Some(start) = (0..n).find(|&k| side[ring[k]] != CLIPPED) else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(n + 2);
    let mut k = 0;
    while k < n {
        let u = ring[(start + k) % n];
        if side[u] != CLIPPED {
            push_unique(&mut out, v, u);
            k += 1;
            continue;
        }

        let first = u;
        let mut last = u;
        while k + 1 < n && side[ring[(start + k + 1) % n]] == CLIPPED {
            k += 1;
            last = ring[(start + k) % n];
        }
        k += 1;

        if let Some(cut) = exits.get(&(first, v)) {
            push_unique(&mut out, v, cut.entry);
        }
        if let Some(cut) = entries.get(&(v, last)) {
            push_unique(&mut out, v, cut.exit);
        }
    }
    out
}

fn crossing_vertex(
    crossing: &HashMap<(usize, usize), usize>,
    kept: usize,
    clipped: usize,
) -> KernelResult<usize> {
    crossing.get(&(kept, clipped)).copied().ok_or_else(|| {
        KernelError::invalid_topology(format!("edge {kept}-{clipped} is not symmetric"))
    })
}

fn push_unique(ring: &mut Vec<usize>, owner: usize, n: usize) {
    if n != owner && !ring.contains(&n) {
        ring.push(n);
    }
}
