//! Procedural asteroid belt.
//!
//! Asteroids are never stored. Each one is a pure function of its index and
//! the orbital time, seeded by a trigonometric hash of the index, so a belt
//! of thousands costs nothing between frames.

use std::f64::consts::TAU;

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Ring of asteroids around a star.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AsteroidBelt {
    pub inner: f64,
    pub outer: f64,
    pub count: u32,
    /// Mean angular speed (radians per ms).
    pub angular_speed: f64,
}

/// Stable pseudo-random value in `[0, 1)` for `n`.
fn hash01(n: f64) -> f64 {
    ((n * 12.9898 + 78.233).sin() * 43_758.545_3).fract().abs()
}

/// Position of asteroid `index` at `time`, around a star at `origin`.
pub fn asteroid_position(belt: &AsteroidBelt, origin: DVec2, index: u32, time: f64) -> DVec2 {
    let i = index as f64;
    let radius = belt.inner + (belt.outer - belt.inner) * hash01(i);
    let base_angle = hash01(i + 0.37) * TAU;
    // Kepler-ish falloff: the inner edge runs fastest.
    let speed_scale = if radius > 0.0 { belt.inner / radius } else { 1.0 };
    let speed = belt.angular_speed * speed_scale * (0.9 + 0.2 * hash01(i * 1.73 + 3.1));
    let wobble = (time * 0.0007 + i).sin() * hash01(i * 2.31 + 9.7) * 3.0;
    let angle = base_angle + time * speed;
    origin + DVec2::new(angle.cos(), angle.sin()) * (radius + wobble)
}

/// All asteroid positions of a belt, computed lazily.
pub fn positions(belt: &AsteroidBelt, origin: DVec2, time: f64) -> impl Iterator<Item = DVec2> + '_ {
    (0..belt.count).map(move |i| asteroid_position(belt, origin, i, time))
}
