#![allow(dead_code)]

use fracture_kernel::Plane;
use glam::{DVec2, DVec3};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Uniform points in the square `[-half, half]²`.
pub fn random_square_points(n: usize, half: f64, seed: u64) -> Vec<DVec2> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| DVec2::new(rng.gen_range(-half..half), rng.gen_range(-half..half)))
        .collect()
}

/// Uniform points in the cube `[-half, half]³`.
pub fn random_cube_points(n: usize, half: f64, seed: u64) -> Vec<DVec3> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    random_cube_points_with_rng(n, half, &mut rng)
}

pub fn random_cube_points_with_rng<R: Rng + ?Sized>(n: usize, half: f64, rng: &mut R) -> Vec<DVec3> {
    (0..n)
        .map(|_| {
            DVec3::new(
                rng.gen_range(-half..half),
                rng.gen_range(-half..half),
                rng.gen_range(-half..half),
            )
        })
        .collect()
}

/// Points uniformly distributed on a sphere surface.
pub fn random_sphere_points(n: usize, radius: f64, seed: u64) -> Vec<DVec3> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| random_direction(&mut rng) * radius)
        .collect()
}

pub fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> DVec3 {
    let z: f64 = rng.gen_range(-1.0..1.0);
    let theta: f64 = rng.gen_range(0.0..std::f64::consts::TAU);
    let r = (1.0 - z * z).sqrt();
    DVec3::new(r * theta.cos(), r * theta.sin(), z)
}

/// Planes with random normals through points of `[-reach, reach]³`.
pub fn random_planes(n: usize, reach: f64, seed: u64) -> Vec<Plane> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let point = random_cube_points_with_rng(1, reach, &mut rng)[0];
            Plane::from_point_normal(point, random_direction(&mut rng))
        })
        .collect()
}
