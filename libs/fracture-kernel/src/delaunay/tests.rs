//! Tests for the Bowyer–Watson triangulations.

use super::*;
use approx::assert_relative_eq;

fn grid_2d(n: usize, spacing: f64) -> Vec<DVec2> {
    let mut points = Vec::new();
    for i in 0..n {
        for j in 0..n {
            // Slight shear keeps the grid away from exact cocircularity
            let x = i as f64 * spacing + j as f64 * 0.173;
            let y = j as f64 * spacing + i as f64 * 0.311;
            points.push(DVec2::new(x, y));
        }
    }
    points
}

#[test]
fn test_too_few_points_is_empty() {
    assert!(triangulate_2d(&[DVec2::ZERO, DVec2::X]).is_empty());
    assert!(triangulate_3d(&[DVec3::ZERO, DVec3::X, DVec3::Y]).is_empty());
}

#[test]
fn test_unit_square_gives_two_triangles() {
    let points = [
        DVec2::new(0.0, 0.0),
        DVec2::new(1.0, 0.0),
        DVec2::new(0.0, 1.0),
        DVec2::new(1.0, 1.0),
    ];
    let tri = triangulate_2d(&points);

    assert_eq!(tri.triangles().len(), 2);
    let area: f64 = tri.triangles().iter().map(|t| t.area(&points)).sum();
    assert_relative_eq!(area, 1.0, epsilon = 1e-12);

    // Four hull edges plus one diagonal
    assert_eq!(tri.boundary_edges().len(), 4);
    assert_eq!(tri.edges().len(), 5);
}

#[test]
fn test_single_triangle() {
    let points = [DVec2::new(0.0, 0.0), DVec2::new(0.0, 4.0), DVec2::new(3.0, 0.0)];
    let tri = triangulate_2d(&points);
    assert_eq!(tri.triangles().len(), 1);

    // Reordered counter-clockwise
    let [a, b, c] = tri.triangles()[0].indices.map(|i| points[i]);
    assert!((b - a).perp_dot(c - a) > 0.0);

    // Circumcenter of a right triangle is the hypotenuse midpoint
    assert_relative_eq!(tri.triangles()[0].center.x, 1.5, epsilon = 1e-12);
    assert_relative_eq!(tri.triangles()[0].center.y, 2.0, epsilon = 1e-12);
    assert_relative_eq!(tri.triangles()[0].radius_squared, 6.25, epsilon = 1e-12);
}

#[test]
fn test_colinear_points_are_empty() {
    let points: Vec<DVec2> = (0..5).map(|i| DVec2::new(i as f64, 2.0 * i as f64)).collect();
    assert!(triangulate_2d(&points).is_empty());
}

#[test]
fn test_grid_is_delaunay() {
    let points = grid_2d(6, 10.0);
    let tri = triangulate_2d(&points);
    assert!(!tri.is_empty());

    for t in tri.triangles() {
        for (i, p) in points.iter().enumerate() {
            if t.indices.contains(&i) {
                continue;
            }
            assert!(
                p.distance_squared(t.center) >= t.radius_squared - DELAUNAY_EPSILON,
                "point {i} inside circumcircle of {:?}",
                t.indices
            );
        }
    }
}

#[test]
fn test_grid_neighbors_are_symmetric() {
    let points = grid_2d(4, 10.0);
    let tri = triangulate_2d(&points);
    let neighbors = tri.neighbors();

    assert_eq!(neighbors.len(), points.len());
    for (i, list) in neighbors.iter().enumerate() {
        assert!(!list.is_empty());
        for &j in list {
            assert!(neighbors[j].contains(&i));
        }
    }
}

#[test]
fn test_degenerate_triangle_always_bad() {
    let points = [DVec2::ZERO, DVec2::X, DVec2::X * 2.0];
    let tri = Triangle::new([0, 1, 2], &points);
    assert!(tri.circumcircle_contains(DVec2::new(1000.0, 1000.0), 0.0));
}

#[test]
fn test_tetrahedron_orientation_and_sphere() {
    let points = [DVec3::ZERO, DVec3::Y, DVec3::X, DVec3::Z];
    let tet = Tetrahedron::new([0, 1, 2, 3], &points);

    let [a, b, c, d] = tet.indices.map(|i| points[i]);
    assert!((b - a).dot((c - a).cross(d - a)) > 0.0);

    assert_relative_eq!(tet.center.x, 0.5, epsilon = 1e-12);
    assert_relative_eq!(tet.center.y, 0.5, epsilon = 1e-12);
    assert_relative_eq!(tet.center.z, 0.5, epsilon = 1e-12);
    assert_relative_eq!(tet.radius, 0.75_f64.sqrt(), epsilon = 1e-12);

    // Every face points away from the opposite corner
    for face in tet.faces() {
        let [p, q, r] = face.map(|i| points[i]);
        let normal = (q - p).cross(r - p);
        let centroid = (a + b + c + d) * 0.25;
        assert!(normal.dot(p - centroid) > 0.0);
    }
}

#[test]
fn test_single_tetrahedron_triangulation() {
    let points = [
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(10.0, 0.0, 0.0),
        DVec3::new(0.0, 10.0, 0.0),
        DVec3::new(0.0, 0.0, 10.0),
    ];
    let tri = triangulate_3d(&points);
    assert_eq!(tri.tetrahedra().len(), 1);
    assert_eq!(tri.boundary_faces().len(), 4);
    assert_eq!(tri.edges().len(), 6);
    assert_relative_eq!(tri.volume(), 1000.0 / 6.0, epsilon = 1e-9);
}

#[test]
fn test_3d_cloud_is_delaunay() {
    let mut points = Vec::new();
    for i in 0..4 {
        for j in 0..4 {
            for k in 0..3 {
                let base = DVec3::new(i as f64, j as f64, k as f64) * 25.0;
                let jitter = DVec3::new(
                    ((i * 7 + j * 3 + k) % 5) as f64 * 1.37,
                    ((i * 2 + j * 5 + k * 3) % 7) as f64 * 0.91,
                    ((i + j * 11 + k * 5) % 3) as f64 * 1.13,
                );
                points.push(base + jitter);
            }
        }
    }

    let tri = triangulate_3d(&points);
    assert!(!tri.is_empty());

    for tet in tri.tetrahedra() {
        let r_sq = tet.radius * tet.radius;
        for (i, p) in points.iter().enumerate() {
            if tet.indices.contains(&i) {
                continue;
            }
            assert!(p.distance_squared(tet.center) >= r_sq - 1e-3);
        }
    }

    // Boundary faces close up: every boundary edge is shared by two faces
    let mut edge_uses: HashMap<[usize; 2], usize> = HashMap::new();
    for face in tri.boundary_faces() {
        for k in 0..3 {
            *edge_uses.entry(sorted2([face[k], face[(k + 1) % 3]])).or_default() += 1;
        }
    }
    assert!(edge_uses.values().all(|&n| n == 2));
}

#[test]
fn test_exact_square_lattice_tiles_its_hull() {
    // Every unit square is cocircular
    let n = 6;
    let points: Vec<DVec2> = (0..n * n)
        .map(|i| DVec2::new((i % n) as f64, (i / n) as f64))
        .collect();
    let tri = triangulate_2d(&points);

    let area: f64 = tri.triangles().iter().map(|t| t.area(&points)).sum();
    let side = (n - 1) as f64;
    assert_relative_eq!(area, side * side, epsilon = 1e-9);
    for t in tri.triangles() {
        let [a, b, c] = t.indices.map(|i| points[i]);
        assert!((b - a).perp_dot(c - a) >= 0.0);
    }
}

#[test]
fn test_exact_cubic_lattice_fills_its_hull() {
    // Every unit cube is cospherical
    let n = 4;
    let points: Vec<DVec3> = (0..n * n * n)
        .map(|i| DVec3::new((i % n) as f64, (i / n % n) as f64, (i / (n * n)) as f64))
        .collect();
    let tri = triangulate_3d(&points);

    let side = (n - 1) as f64;
    assert_relative_eq!(tri.volume(), side * side * side, epsilon = 1e-9);
    for tet in tri.tetrahedra() {
        assert!(tet.volume(&points) >= 0.0);
    }
}
