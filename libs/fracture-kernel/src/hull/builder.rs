//! # Incremental Hull Builder
//!
//! Intermediate state of the approximate hull: per-point contribution
//! volumes plus arenas of faces and edges that are retired and replaced at
//! every step.
//!
//! ## Algorithm Steps
//!
//! 1. Bootstrap a tetrahedron from extreme points
//! 2. Score every other point by the volume it would add
//! 3. Take the best unprocessed point, flood-fill the faces it sees
//! 4. Fan the horizon to the point, retire the visible faces
//! 5. Update scores incrementally and repeat until the limit is reached
//!
//! A point sees a face when it lies more than a tolerance above the face
//! plane. The tolerance is `HULL_VISIBILITY_EPSILON` times the diagonal of
//! the cloud's bounding box, so the same cloud at any scale makes the same
//! decisions. Scoring and incorporation share that one test.

use super::arena::{Arena, Handle};
use crate::mesh::bounding_box;
use config::constants::HULL_VISIBILITY_EPSILON;
use glam::DVec3;
use std::collections::HashMap;

/// A face of the hull under construction, counter-clockwise from outside.
#[derive(Debug, Clone)]
pub(crate) struct HullFace {
    pub vertices: [usize; 3],
    /// Set while the face is seen by the point being incorporated
    pub visible: bool,
}

impl HullFace {
    /// Volume of the tetrahedron `point` forms above this face.
    pub fn volume_above(&self, point: DVec3, points: &[DVec3]) -> f64 {
        let [a, b, c] = self.vertices.map(|i| points[i]);
        (b - a).cross(c - a).dot(point - a) / 6.0
    }

    /// Signed distance of `point` above the face plane; 0 for a face with
    /// no area.
    pub fn distance_above(&self, point: DVec3, points: &[DVec3]) -> f64 {
        let [a, b, c] = self.vertices.map(|i| points[i]);
        let normal = (b - a).cross(c - a);
        let length = normal.length();
        if length <= 0.0 {
            return 0.0;
        }
        normal.dot(point - a) / length
    }

    /// True if `point` is more than `tolerance` above the face.
    pub fn is_seen_from(&self, point: DVec3, points: &[DVec3], tolerance: f64) -> bool {
        self.distance_above(point, points) > tolerance
    }
}

/// An undirected hull edge and the one or two faces sharing it.
#[derive(Debug, Clone)]
pub(crate) struct HullEdge {
    pub endpoints: [usize; 2],
    pub faces: [Option<Handle>; 2],
}

impl HullEdge {
    fn other(&self, face: Handle) -> Option<Handle> {
        match self.faces {
            [Some(f), other] if f == face => other,
            [other, Some(f)] if f == face => other,
            _ => None,
        }
    }

    fn attach(&mut self, face: Handle) {
        if self.faces[0].is_none() {
            self.faces[0] = Some(face);
        } else {
            self.faces[1] = Some(face);
        }
    }

    fn detach(&mut self, face: Handle) {
        for slot in &mut self.faces {
            if *slot == Some(face) {
                *slot = None;
            }
        }
    }
}

/// Working state for one hull construction.
pub(crate) struct HullBuilder<'a> {
    points: &'a [DVec3],
    processed: Vec<bool>,
    contribution: Vec<f64>,
    pub faces: Arena<HullFace>,
    pub edges: Arena<HullEdge>,
    edge_lookup: HashMap<[usize; 2], Handle>,
    incorporated: usize,
    /// Visibility distance, relative to the cloud extent
    tolerance: f64,
}

impl<'a> HullBuilder<'a> {
    /// Builds the bootstrap tetrahedron. Returns `None` when fewer than 4
    /// points are given or the extremes are degenerate.
    pub fn bootstrap(points: &'a [DVec3]) -> Option<Self> {
        let (min, max) = bounding_box(points);
        let tolerance = HULL_VISIBILITY_EPSILON * (max - min).length();
        let [i0, i1, i2, i3] = initial_tetrahedron(points, tolerance)?;

        let mut builder = Self {
            points,
            processed: vec![false; points.len()],
            contribution: vec![0.0; points.len()],
            faces: Arena::new(),
            edges: Arena::new(),
            edge_lookup: HashMap::new(),
            incorporated: 4,
            tolerance,
        };

        for face in [[i0, i2, i1], [i0, i1, i3], [i0, i3, i2], [i1, i2, i3]] {
            builder.add_face(face);
        }
        for i in [i0, i1, i2, i3] {
            builder.processed[i] = true;
        }

        let handles: Vec<Handle> = builder.faces.iter().map(|(h, _)| h).collect();
        for handle in handles {
            builder.score_face(handle, 1.0);
        }

        Some(builder)
    }

    /// Number of points that grew the hull, bootstrap included.
    pub fn incorporated(&self) -> usize {
        self.incorporated
    }

    /// Distance a point must lie above a face to see it.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Incorporates points until `limit` points are on the hull (0 = all).
    pub fn run(&mut self, limit: usize) {
        while limit == 0 || self.incorporated < limit {
            let Some(point) = self.best_candidate() else {
                break;
            };
            self.processed[point] = true;
            if self.incorporate(point) {
                self.incorporated += 1;
            }
        }

        tracing::debug!(
            faces = self.faces.len(),
            edges = self.edges.len(),
            limit,
            "hull construction finished"
        );
    }

    /// Unprocessed point with the largest positive contribution.
    fn best_candidate(&self) -> Option<usize> {
        let mut best = None;
        let mut best_volume = 0.0;
        for (i, &volume) in self.contribution.iter().enumerate() {
            if !self.processed[i] && volume > best_volume {
                best_volume = volume;
                best = Some(i);
            }
        }
        best
    }

    /// Adds `point` to the hull. Returns false if it sees no face.
    fn incorporate(&mut self, point: usize) -> bool {
        let p = self.points[point];

        let seed = self
            .faces
            .iter()
            .map(|(h, f)| (h, f.distance_above(p, self.points)))
            .filter(|&(_, distance)| distance > self.tolerance)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(h, _)| h);
        let Some(seed) = seed else {
            return false;
        };
        let visible = self.visible_region(seed, p);

        // Horizon edges keep the winding of the visible face they bound
        let mut horizon: Vec<[usize; 2]> = Vec::new();
        for &handle in &visible {
            let Some(face) = self.faces.get(handle) else {
                continue;
            };
            let [a, b, c] = face.vertices;
            for [u, v] in [[a, b], [b, c], [c, a]] {
                let Some(&edge_handle) = self.edge_lookup.get(&sorted(u, v)) else {
                    continue;
                };
                let other = self
                    .edges
                    .get(edge_handle)
                    .and_then(|e| e.other(handle))
                    .and_then(|h| self.faces.get(h));
                match other {
                    Some(f) if !f.visible => horizon.push([u, v]),
                    _ => {}
                }
            }
        }

        for &handle in &visible {
            self.retire_face(handle);
        }
        for [u, v] in horizon {
            let handle = self.add_face([u, v, point]);
            self.score_face(handle, 1.0);
        }

        tracing::trace!(point, retired = visible.len(), "incorporated hull point");
        true
    }

    /// Marks and returns the connected faces seen from `point`, growing
    /// across shared edges from `seed`. The region's boundary is a single
    /// horizon even when rounding hides a face that is not adjacent to it.
    fn visible_region(&mut self, seed: Handle, point: DVec3) -> Vec<Handle> {
        let mut region = Vec::new();
        let mut stack = vec![seed];
        if let Some(face) = self.faces.get_mut(seed) {
            face.visible = true;
        }

        while let Some(handle) = stack.pop() {
            let Some(face) = self.faces.get(handle) else {
                continue;
            };
            let [a, b, c] = face.vertices;
            region.push(handle);

            for [u, v] in [[a, b], [b, c], [c, a]] {
                let neighbor = self
                    .edge_lookup
                    .get(&sorted(u, v))
                    .and_then(|&e| self.edges.get(e))
                    .and_then(|e| e.other(handle));
                let Some(neighbor) = neighbor else {
                    continue;
                };
                let (points, tolerance) = (self.points, self.tolerance);
                if let Some(face) = self.faces.get_mut(neighbor) {
                    if !face.visible && face.is_seen_from(point, points, tolerance) {
                        face.visible = true;
                        stack.push(neighbor);
                    }
                }
            }
        }
        region
    }

    fn add_face(&mut self, vertices: [usize; 3]) -> Handle {
        let handle = self.faces.insert(HullFace {
            vertices,
            visible: false,
        });
        let [a, b, c] = vertices;
        for [u, v] in [[a, b], [b, c], [c, a]] {
            let key = sorted(u, v);
            let edge = match self.edge_lookup.get(&key) {
                Some(&edge) => edge,
                None => {
                    let edge = self.edges.insert(HullEdge {
                        endpoints: key,
                        faces: [None, None],
                    });
                    self.edge_lookup.insert(key, edge);
                    edge
                }
            };
            if let Some(edge) = self.edges.get_mut(edge) {
                edge.attach(handle);
            }
        }
        handle
    }

    /// Removes a face, detaching it from its edges and retiring edges left
    /// without faces.
    fn retire_face(&mut self, handle: Handle) {
        self.score_face(handle, -1.0);
        let Some(face) = self.faces.remove(handle) else {
            return;
        };
        let [a, b, c] = face.vertices;
        for [u, v] in [[a, b], [b, c], [c, a]] {
            let key = sorted(u, v);
            let Some(&edge_handle) = self.edge_lookup.get(&key) else {
                continue;
            };
            let orphaned = match self.edges.get_mut(edge_handle) {
                Some(edge) => {
                    edge.detach(handle);
                    edge.faces == [None, None]
                }
                None => true,
            };
            if orphaned {
                self.edges.remove(edge_handle);
                self.edge_lookup.remove(&key);
            }
        }
    }

    /// Adds (`sign = 1`) or removes (`sign = -1`) a face's share of every
    /// unprocessed point's contribution. Only points that see the face
    /// contribute.
    fn score_face(&mut self, handle: Handle, sign: f64) {
        let Some(face) = self.faces.get(handle) else {
            return;
        };
        for (i, &p) in self.points.iter().enumerate() {
            if self.processed[i] || !face.is_seen_from(p, self.points, self.tolerance) {
                continue;
            }
            let volume = face.volume_above(p, self.points);
            self.contribution[i] = (self.contribution[i] + sign * volume).max(0.0);
        }
    }
}

fn sorted(a: usize, b: usize) -> [usize; 2] {
    if a < b {
        [a, b]
    } else {
        [b, a]
    }
}

/// Picks four extreme points spanning a positively oriented tetrahedron.
/// Each new point must lie more than `tolerance` off the span of the
/// previous ones.
fn initial_tetrahedron(points: &[DVec3], tolerance: f64) -> Option<[usize; 4]> {
    if points.len() < 4 {
        return None;
    }

    // Extreme point on x
    let mut i0 = 0;
    for (i, p) in points.iter().enumerate() {
        if p.x < points[i0].x {
            i0 = i;
        }
    }
    let p0 = points[i0];

    let i1 = argmax(points, |p| p.distance_squared(p0))?;
    let p1 = points[i1];
    let span = p1.distance(p0);
    if span <= tolerance {
        return None;
    }

    let i2 = argmax(points, |p| (p1 - p0).cross(p - p0).length_squared())?;
    let p2 = points[i2];
    let normal = (p1 - p0).cross(p2 - p0);
    // |normal| is the span times p2's distance from the p0-p1 line
    if normal.length() <= tolerance * span {
        return None;
    }

    let i3 = argmax(points, |p| normal.dot(p - p0).abs())?;
    let signed = normal.dot(points[i3] - p0);
    if signed.abs() <= tolerance * normal.length() {
        return None;
    }

    Some(if signed > 0.0 {
        [i0, i1, i2, i3]
    } else {
        [i0, i2, i1, i3]
    })
}

fn argmax(points: &[DVec3], score: impl Fn(DVec3) -> f64) -> Option<usize> {
    let mut best = None;
    let mut best_score = f64::NEG_INFINITY;
    for (i, &p) in points.iter().enumerate() {
        let s = score(p);
        if s > best_score {
            best_score = s;
            best = Some(i);
        }
    }
    best
}
