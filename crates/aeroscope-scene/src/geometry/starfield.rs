//! Deterministic background starfield.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::primitive::{Material, Rgb, SceneBuilder, Shape, at};

/// Inner radius of the star shell.
pub const STAR_RADIUS: f32 = 100.0;
/// Thickness of the star shell.
pub const STAR_DEPTH: f32 = 50.0;
/// Number of stars.
pub const STAR_COUNT: usize = 5000;

const STAR_SEED: u64 = 0x5eed_a1e5;

/// Star positions on a shell between `radius` and `radius + depth`.
///
/// Directions are uniform on the sphere; the same seed always gives the same
/// stars.
pub fn star_positions(seed: u64, count: usize, radius: f32, depth: f32) -> Vec<Vec3> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let z: f32 = rng.random_range(-1.0..=1.0);
            let theta: f32 = rng.random_range(0.0..std::f32::consts::TAU);
            let ring = (1.0 - z * z).max(0.0).sqrt();
            let direction = Vec3::new(ring * theta.cos(), ring * theta.sin(), z);
            let distance = radius + rng.random_range(0.0..=depth);
            direction * distance
        })
        .collect()
}

pub(crate) fn build(builder: &mut SceneBuilder) {
    builder.add(
        "stars",
        Shape::Points {
            positions: star_positions(STAR_SEED, STAR_COUNT, STAR_RADIUS, STAR_DEPTH),
        },
        Material::unlit(Rgb::WHITE),
        at(Vec3::ZERO),
    );
}
