#![allow(dead_code)]

use mcsasa::{AtomKind, Cuboid, Particle, Point, Space};

/// Approximate equality with context
#[allow(unused_macros)]
macro_rules! assert_approx {
    ($actual:expr, $expected:expr, $eps:expr, $($arg:tt)*) => {
        let actual = $actual;
        let expected = $expected;
        let diff = (actual - expected).abs();
        assert!(
            diff < $eps,
            "{}: expected {}, got {} (diff={})",
            format!($($arg)*),
            expected,
            actual,
            diff
        );
    };
}

pub const PROBE: f64 = 1.4;

pub fn full_sphere(radius: f64) -> f64 {
    4.0 * std::f64::consts::PI * radius * radius
}

/// Single-kind container with one group holding `positions`
pub fn space_with(side: f64, radius: f64, positions: &[Point]) -> Space {
    let mut space = Space::new(
        Cuboid::cube(side).expect("valid box"),
        vec![AtomKind::new("A", radius)],
    );
    space
        .add_group(positions.iter().map(|&pos| Particle::new(0, pos)).collect())
        .expect("valid group");
    space
}

/// Deterministic, irregular packing: a jittered lattice filling a cube of side `side`
#[allow(clippy::cast_precision_loss)]
pub fn jittered_lattice(per_axis: usize, side: f64) -> Vec<Point> {
    let spacing = side / per_axis as f64;
    let mut positions = Vec::with_capacity(per_axis.pow(3));
    for i in 0..per_axis {
        for j in 0..per_axis {
            for k in 0..per_axis {
                let n = (positions.len() + 1) as f64;
                let jitter = Point::new((1.3 * n).sin(), (2.7 * n).cos(), (0.7 * n).sin()) * 0.3;
                let cell = Point::new(i as f64 + 0.5, j as f64 + 0.5, k as f64 + 0.5);
                positions.push((cell + jitter) * spacing - Point::repeat(0.5 * side));
            }
        }
    }
    positions
}

/// Mixed-radius container with two groups, for matter insertion and removal
pub fn two_species_space(side: f64) -> Space {
    let mut space = Space::new(
        Cuboid::cube(side).expect("valid box"),
        vec![AtomKind::new("small", 1.5), AtomKind::new("large", 2.5)],
    );
    let first: Vec<Particle> = jittered_lattice(3, side)
        .into_iter()
        .enumerate()
        .map(|(i, pos)| Particle::new(i % 2, pos))
        .collect();
    space.add_group(first).expect("valid group");

    let second: Vec<Particle> = (0..6)
        .map(|i| {
            let x = f64::from(i) * 3.0 - 7.5;
            Particle::new(1, Point::new(x, 0.25 * x, -0.5))
        })
        .collect();
    space.add_group(second).expect("valid group");
    space
}
