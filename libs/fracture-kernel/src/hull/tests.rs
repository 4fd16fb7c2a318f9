//! # Hull Tests
//!
//! Tests for exact and approximate hull construction.

use super::*;
use crate::primitives::{create_cube, create_sphere};
use approx::assert_relative_eq;

fn unit_tetrahedron() -> Vec<DVec3> {
    vec![
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(1.0, 0.0, 0.0),
        DVec3::new(0.0, 1.0, 0.0),
        DVec3::new(0.0, 0.0, 1.0),
    ]
}

/// `n` points spread evenly over a sphere of `radius` along a golden-angle
/// spiral.
fn spiral_sphere(n: usize, radius: f64) -> Vec<DVec3> {
    let golden = std::f64::consts::PI * (3.0 - 5.0_f64.sqrt());
    (0..n)
        .map(|i| {
            let y = 1.0 - 2.0 * (i as f64 + 0.5) / n as f64;
            let r = (1.0 - y * y).sqrt();
            let theta = golden * i as f64;
            DVec3::new(r * theta.cos(), y, r * theta.sin()) * radius
        })
        .collect()
}

#[test]
fn test_hull_tetrahedron() {
    let hull = ConvexHull::exact(&unit_tetrahedron()).unwrap();
    assert_eq!(hull.faces().len(), 4);
    assert_eq!(hull.edges().len(), 6);
    assert_eq!(hull.exterior_vertices().len(), 4);
    assert_relative_eq!(hull.volume(), 1.0 / 6.0, epsilon = 1e-12);
}

#[test]
fn test_hull_too_few_points() {
    assert!(ConvexHull::exact(&unit_tetrahedron()[..3]).is_none());
    assert!(ConvexHull::exact(&[]).is_none());
}

#[test]
fn test_hull_coplanar_points() {
    let points: Vec<DVec3> = (0..9)
        .map(|i| DVec3::new((i % 3) as f64, (i / 3) as f64, 0.0))
        .collect();
    assert!(ConvexHull::exact(&points).is_none());
}

#[test]
fn test_hull_single_cube() {
    let cube = create_cube(DVec3::splat(10.0), true).unwrap();
    let hull = ConvexHull::exact(cube.vertices()).unwrap();

    // Hull of a cube is the cube itself
    assert_eq!(hull.exterior_vertices().len(), 8);
    assert_eq!(hull.faces().len(), 12);
    assert_eq!(hull.edges().len(), 18);
    assert_relative_eq!(hull.volume(), 1000.0, epsilon = 1e-9);
}

#[test]
fn test_hull_with_interior_points() {
    let mut points = create_cube(DVec3::splat(2.0), true).unwrap().vertices().to_vec();
    points.push(DVec3::ZERO);
    points.push(DVec3::new(0.5, -0.25, 0.75));

    let hull = ConvexHull::exact(&points).unwrap();
    assert_eq!(hull.exterior_vertices().len(), 8);
    assert!(!hull.source_indices().contains(&8));
    assert!(!hull.source_indices().contains(&9));
    for p in &points {
        assert!(hull.contains(*p));
    }
    assert!(!hull.contains(DVec3::new(1.5, 0.0, 0.0)));
}

#[test]
fn test_hull_sphere_matches_mesh_volume() {
    let sphere = create_sphere(5.0, 16).unwrap();
    let hull = ConvexHull::exact(sphere.vertices()).unwrap();

    assert_eq!(hull.exterior_vertices().len(), sphere.vertex_count());
    assert_relative_eq!(hull.volume(), sphere.volume(), epsilon = 1e-6);
    for v in sphere.vertices() {
        assert!(hull.contains(*v));
    }
}

#[test]
fn test_hull_vertex_limit() {
    let sphere = create_sphere(5.0, 24).unwrap();
    let exact = ConvexHull::exact(sphere.vertices()).unwrap();
    let approx = ConvexHull::approximate(sphere.vertices(), 10).unwrap();

    assert!(approx.exterior_vertices().len() <= 10);
    assert!(approx.volume() > 0.0);
    assert!(approx.volume() < exact.volume());

    // Every approximate corner is an input point on the exact hull
    for v in approx.exterior_vertices() {
        assert!(exact.contains(*v));
    }
}

#[test]
fn test_hull_faces_are_outward() {
    let sphere = create_sphere(3.0, 12).unwrap();
    let hull = ConvexHull::exact(sphere.vertices()).unwrap();
    let center = hull.exterior_vertices().iter().copied().sum::<DVec3>()
        / hull.exterior_vertices().len() as f64;

    for plane in hull.planes() {
        assert!(plane.signed_distance(center) < 0.0);
    }
}

#[test]
fn test_hull_mesh_and_faces_agree() {
    let hull = ConvexHull::exact(create_cube(DVec3::splat(4.0), false).unwrap().vertices()).unwrap();

    let mesh = hull.to_mesh();
    assert!(mesh.validate());
    assert_relative_eq!(mesh.volume(), 64.0, epsilon = 1e-9);

    let poly = hull.to_face_polyhedron();
    assert_eq!(poly.faces().len(), 12);
    assert_relative_eq!(poly.volume(), 64.0, epsilon = 1e-9);
}

#[test]
fn test_hull_from_config_uses_limit() {
    let sphere = create_sphere(5.0, 24).unwrap();
    let config = KernelConfig::default().with_hull_vertex_limit(6);
    let hull = ConvexHull::from_config(sphere.vertices(), &config).unwrap();
    assert!(hull.exterior_vertices().len() <= 6);
}

#[test]
fn test_hull_is_scale_invariant() {
    for scale in [1.0, 1e-2, 1e-3, 1e-4] {
        let points = spiral_sphere(200, scale);
        let hull = ConvexHull::exact(&points).unwrap();

        // Every spiral point is extreme; the hull is a closed triangulated sphere
        let v = hull.exterior_vertices().len();
        assert_eq!(v, 200, "scale {scale}");
        assert_eq!(hull.faces().len(), 2 * v - 4, "scale {scale}");
        assert_eq!(hull.edges().len(), 3 * v - 6, "scale {scale}");

        for p in &points {
            assert!(hull.contains(*p), "scale {scale}: {p} outside");
        }
        let relative = hull.volume() / (scale * scale * scale);
        assert!(relative > 3.9 && relative < 4.19, "scale {scale}: volume {relative}");

        // Manifold with consistent winding
        assert!(crate::IndexedPolyhedron::from_mesh(&hull.to_mesh()).is_ok());
    }
}

#[test]
fn test_hull_builder_counts_incorporated_points() {
    let points = spiral_sphere(100, 1.0);
    let mut builder = HullBuilder::bootstrap(&points).unwrap();
    assert_eq!(builder.incorporated(), 4);

    builder.run(12);
    assert_eq!(builder.incorporated(), 12);
    assert!(builder.tolerance() > 0.0);

    builder.run(0);
    assert_eq!(builder.incorporated(), 100);
}
