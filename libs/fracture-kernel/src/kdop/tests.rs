use super::*;
use crate::error::KernelError;
use crate::primitives::create_box;
use approx::assert_relative_eq;

fn corners() -> Vec<DVec3> {
    (0..8)
        .map(|i| {
            DVec3::new(
                (i & 1) as f64,
                ((i >> 1) & 1) as f64,
                ((i >> 2) & 1) as f64,
            )
        })
        .collect()
}

#[test]
fn test_axis_counts() {
    for count in [6, 14, 18, 26] {
        let mut kdop = KDop::new(count, 0.0).unwrap();
        assert_eq!(kdop.elements().len(), count / 2);
        kdop.calc(corners().as_slice());
        assert_eq!(kdop.planes().len(), count);
        for e in kdop.elements() {
            assert_relative_eq!(e.normal.length(), 1.0, epsilon = 1e-12);
        }
    }
}

#[test]
fn test_invalid_parameters() {
    assert!(matches!(
        KDop::new(10, 0.01),
        Err(KernelError::InvalidConfig(_))
    ));
    assert!(KDop::new(6, -0.1).is_err());
    assert!(KDop::from_config(&KernelConfig::default()).is_ok());
}

#[test]
fn test_planes_tagged_by_axis() {
    let mut kdop = KDop::new(18, 0.0).unwrap();
    kdop.calc(&corners());
    let planes = kdop.planes();
    for (i, pair) in planes.chunks(2).enumerate() {
        assert_eq!(pair[0].tag, Some(i as u32));
        assert_eq!(pair[1].tag, Some(i as u32));
        assert_relative_eq!(pair[0].normal.dot(pair[1].normal), -1.0, epsilon = 1e-12);
    }
}

#[test]
fn test_gap_pushes_planes_outward() {
    let mut kdop = KDop::new(6, 0.1).unwrap();
    kdop.calc(&corners());
    let gap = 0.1 * 3.0_f64.sqrt();

    let x = &kdop.elements()[0];
    assert_eq!(x.min, 0.0);
    assert_eq!(x.max, 1.0);
    assert_eq!(x.max_vertex.x, 1.0);
    assert_relative_eq!(
        x.max_plane.signed_distance(DVec3::new(1.0, 0.5, 0.5)),
        -gap,
        epsilon = 1e-12
    );
    assert_relative_eq!(
        x.min_plane.signed_distance(DVec3::new(0.0, 0.5, 0.5)),
        -gap,
        epsilon = 1e-12
    );

    assert!(corners().iter().all(|&p| kdop.contains(p)));
    assert!(kdop.contains(DVec3::splat(1.1)));
    assert!(!kdop.contains(DVec3::splat(1.5)));
}

#[test]
fn test_diagonal_axes_cut_corners() {
    let mut kdop = KDop::new(14, 0.0).unwrap();
    kdop.calc(&vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z]);

    // Inside the axis box but beyond the x + y + z <= 1 slab
    assert!(!kdop.contains(DVec3::splat(0.9)));
    assert!(kdop.contains(DVec3::splat(0.2)));
}

#[test]
fn test_empty_source_is_unbounded() {
    let mut kdop = KDop::new(26, 0.01).unwrap();
    kdop.calc(&Vec::<DVec3>::new());
    assert!(!kdop.is_bounded());
    assert!(kdop.planes().is_empty());
    assert!(!kdop.contains(DVec3::ZERO));
    assert_eq!(kdop.to_debug_mesh().triangle_count(), 0);
}

#[test]
fn test_calc_from_every_source() {
    let mesh = create_box(DVec3::ZERO, DVec3::ONE);
    let indexed = IndexedPolyhedron::from_mesh(&mesh).unwrap();
    let faces = FacePolyhedron::from_mesh(&mesh);
    let hull = ConvexHull::exact(&corners()).unwrap();

    let mut reference = KDop::new(26, 0.01).unwrap();
    reference.calc(&mesh);
    for planes in [
        {
            let mut k = reference.clone();
            k.calc(&indexed);
            k.planes()
        },
        {
            let mut k = reference.clone();
            k.calc(&faces);
            k.planes()
        },
        {
            let mut k = reference.clone();
            k.calc(&hull);
            k.planes()
        },
    ] {
        for (a, b) in planes.iter().zip(reference.planes()) {
            assert_relative_eq!(a.offset, b.offset, epsilon = 1e-12);
        }
    }
}

#[test]
fn test_clip_skips_coincident_planes() {
    let cube = FacePolyhedron::cuboid(DVec3::ZERO, DVec3::ONE);
    let mut kdop = KDop::new(6, 0.0).unwrap();
    kdop.calc(&cube);

    // Every slab lies on a cube face: nothing changes
    let clipped = kdop.clip_with_polygon(&cube);
    assert_eq!(clipped.faces().len(), 6);
    assert_relative_eq!(clipped.volume(), 1.0, epsilon = 1e-12);
}

#[test]
fn test_clip_cuts_larger_shape() {
    let mut kdop = KDop::new(14, 0.0).unwrap();
    kdop.calc(&vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z]);

    let big = FacePolyhedron::cuboid(DVec3::splat(-1.0), DVec3::splat(2.0));
    let clipped = kdop.clip_with_polygon(&big);
    assert_relative_eq!(clipped.volume(), 1.0 / 6.0, epsilon = 1e-9);

    let indexed =
        IndexedPolyhedron::from_mesh(&create_box(DVec3::splat(-1.0), DVec3::splat(2.0))).unwrap();
    let clipped = kdop.clip_with_polyhedron(&indexed).unwrap();
    clipped.validate_topology().unwrap();
    assert_relative_eq!(clipped.moments().unwrap().volume, 1.0 / 6.0, epsilon = 1e-9);
    assert_eq!(indexed.vertex_count(), 8);
}

#[test]
fn test_clip_hull() {
    let mut kdop = KDop::new(6, 0.0).unwrap();
    kdop.calc(&vec![DVec3::ZERO, DVec3::ONE]);

    let hull = ConvexHull::exact(&[
        DVec3::splat(-1.0),
        DVec3::new(2.0, -1.0, -1.0),
        DVec3::new(-1.0, 2.0, -1.0),
        DVec3::new(-1.0, -1.0, 2.0),
        DVec3::new(2.0, 2.0, -1.0),
        DVec3::new(2.0, -1.0, 2.0),
        DVec3::new(-1.0, 2.0, 2.0),
        DVec3::splat(2.0),
    ])
    .unwrap();
    assert_relative_eq!(kdop.clip_hull(&hull).volume(), 1.0, epsilon = 1e-9);
}

#[test]
fn test_debug_mesh_has_quad_per_plane() {
    let mut kdop = KDop::new(26, 0.01).unwrap();
    kdop.calc(&corners());
    let mesh = kdop.to_debug_mesh();
    assert_eq!(mesh.vertex_count(), 26 * 4);
    assert_eq!(mesh.triangle_count(), 26 * 2);

    // Quad normals follow their planes
    for (k, plane) in kdop.planes().iter().enumerate() {
        let [a, b, c] = mesh.triangle(2 * k).map(|i| mesh.vertex(i));
        let n = (b - a).cross(c - a).normalize();
        assert_relative_eq!(n.dot(plane.normal), 1.0, epsilon = 1e-9);
    }
}
