//! # Face-List Clipper Tests

use super::*;
use crate::plane::Plane;
use approx::assert_relative_eq;
use glam::DVec3;

fn unit_cube() -> FacePolyhedron {
    FacePolyhedron::cuboid(DVec3::splat(-0.5), DVec3::splat(0.5))
}

#[test]
fn test_cuboid_is_closed_and_outward() {
    let cube = unit_cube();
    assert_relative_eq!(cube.volume(), 1.0, epsilon = 1e-12);
    assert_eq!(cube.vertices().len(), 8);
    for plane in cube.planes() {
        assert!(plane.signed_distance(DVec3::ZERO) < 0.0);
    }
    let c = cube.centroid();
    assert!(c.length() < 1e-12);
}

#[test]
fn test_face_clip_rules() {
    let square = Face::new(vec![
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(2.0, 0.0, 0.0),
        DVec3::new(2.0, 2.0, 0.0),
        DVec3::new(0.0, 2.0, 0.0),
    ]);
    let plane = Plane::new(DVec3::X, -1.0); // keep x <= 1

    let clipped = square.clip(&plane, 1e-10).unwrap();
    assert_eq!(clipped.len(), 4);
    assert_relative_eq!(clipped.area(), 2.0, epsilon = 1e-12);
    assert!(clipped.vertices().iter().all(|v| v.x <= 1.0 + 1e-12));

    // Entirely outside
    assert!(square.clip(&Plane::new(DVec3::X, 1.0), 1e-10).is_none());
}

#[test]
fn test_face_clip_through_vertex_merges_duplicates() {
    let triangle = Face::new(vec![
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(2.0, 0.0, 0.0),
        DVec3::new(0.0, 2.0, 0.0),
    ]);
    // Diagonal through (0,0): keeps the half with y >= x
    let plane = Plane::new(DVec3::new(1.0, -1.0, 0.0), 0.0);
    let clipped = triangle.clip(&plane, 1e-10).unwrap();
    assert_eq!(clipped.len(), 3);
    assert_relative_eq!(clipped.area(), 1.0, epsilon = 1e-12);
}

#[test]
fn test_clip_half_cube() {
    let cube = unit_cube();
    let half = cube.clip_with_plane(&Plane::new(DVec3::X, 0.0));

    assert_eq!(half.faces().len(), 6);
    assert_relative_eq!(half.volume(), 0.5, epsilon = 1e-12);
    let (min, max) = half.bounding_box();
    assert_relative_eq!(max.x, 0.0, epsilon = 1e-12);
    assert_relative_eq!(min.x, -0.5, epsilon = 1e-12);

    // Cap lies on the cutting plane facing +x
    let cap = half.faces().last().unwrap();
    assert!(cap.normal().distance(DVec3::X) < 1e-9);
    assert_relative_eq!(cap.area(), 1.0, epsilon = 1e-9);

    // Input untouched
    assert_relative_eq!(cube.volume(), 1.0, epsilon = 1e-12);
}

#[test]
fn test_clip_corner_adds_triangle_cap() {
    let cube = unit_cube();
    let plane = Plane::from_point_normal(DVec3::new(0.25, 0.5, 0.5), DVec3::ONE);
    let cut = cube.clip_with_plane(&plane);

    // One triangular cap; the corner tetrahedron has legs of 0.25
    assert_eq!(cut.faces().len(), 7);
    assert_relative_eq!(cut.volume(), 1.0 - 0.25_f64.powi(3) / 6.0, epsilon = 1e-9);
    assert!(!cut.contains(DVec3::splat(0.45)));
    assert!(cut.contains(DVec3::ZERO));
}

#[test]
fn test_clip_conservation() {
    let cube = unit_cube();

    // Plane far away on the removed side: unchanged
    let untouched = cube.clip_with_plane(&Plane::new(DVec3::X, -10.0));
    assert_eq!(untouched, cube);

    // Plane removing everything: empty
    let gone = cube.clip_with_plane(&Plane::new(DVec3::X, 10.0));
    assert!(gone.is_empty());

    // No planes: identity
    assert_eq!(cube.clip_with_planes(&[]), cube);
}

#[test]
fn test_clip_is_idempotent() {
    let planes = [
        Plane::from_point_normal(DVec3::new(0.1, 0.0, 0.0), DVec3::new(1.0, 0.3, 0.2)),
        Plane::from_point_normal(DVec3::new(0.0, -0.2, 0.1), DVec3::new(-0.4, -1.0, 0.5)),
    ];
    let once = unit_cube().clip_with_planes(&planes);
    let twice = once.clip_with_planes(&planes);

    assert_eq!(once.faces().len(), twice.faces().len());
    assert_relative_eq!(once.volume(), twice.volume(), epsilon = 1e-9);
}

#[test]
fn test_clip_with_coincident_face_is_noop() {
    let cube = unit_cube();
    let same_top = Plane::new(DVec3::Z, -0.5);
    let clipped = cube.clip_with_plane(&same_top);
    assert_eq!(clipped.faces().len(), 6);
    assert_relative_eq!(clipped.volume(), 1.0, epsilon = 1e-12);
}

#[test]
fn test_clip_with_polyhedron() {
    let a = unit_cube();
    let b = FacePolyhedron::cuboid(DVec3::splat(0.0), DVec3::splat(1.0));
    let both = a.clip_with_polyhedron(&b);

    assert_relative_eq!(both.volume(), 0.125, epsilon = 1e-9);
    assert!(both.contains(DVec3::splat(0.25)));
    assert!(!both.contains(DVec3::splat(-0.25)));
}

#[test]
fn test_clip_disjoint_polyhedra() {
    let a = unit_cube();
    let b = FacePolyhedron::cuboid(DVec3::splat(2.0), DVec3::splat(3.0));
    assert!(a.clip_with_polyhedron(&b).is_empty());
}

#[test]
fn test_to_mesh_preserves_volume() {
    let cut = unit_cube().clip_with_plane(&Plane::from_point_normal(DVec3::ZERO, DVec3::new(1.0, 1.0, 0.0)));
    let mesh = cut.to_mesh();
    assert!(mesh.validate());
    assert_relative_eq!(mesh.volume(), cut.volume(), epsilon = 1e-9);
}

#[test]
fn test_translate_moves_centroid() {
    let mut cube = unit_cube();
    cube.translate(DVec3::new(1.0, 2.0, 3.0));
    assert!(cube.centroid().distance(DVec3::new(1.0, 2.0, 3.0)) < 1e-12);
}
