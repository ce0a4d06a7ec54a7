//! Angle and frame helpers.

use std::f64::consts::{PI, TAU};

use glam::DVec2;

/// Wrap an angle into `[-π, π]`.
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    // rem_euclid can land exactly on TAU for tiny negative inputs
    if wrapped > PI {
        wrapped - TAU
    } else {
        wrapped
    }
}

/// Exponential step of `current` toward `target`.
pub fn ease(current: f64, target: f64, alpha: f64) -> f64 {
    current + (target - current) * alpha
}

pub fn ease_vec(current: DVec2, target: DVec2, alpha: f64) -> DVec2 {
    current + (target - current) * alpha
}

/// Ease a heading along the shorter arc.
pub fn ease_angle(current: f64, target: f64, alpha: f64) -> f64 {
    wrap_angle(current + wrap_angle(target - current) * alpha)
}

pub fn rotate(v: DVec2, angle: f64) -> DVec2 {
    DVec2::from_angle(angle).rotate(v)
}

/// Map a point from a rotated arena frame into world space.
pub fn local_to_world(local: DVec2, center: DVec2, rotation: f64) -> DVec2 {
    center + rotate(local, rotation)
}

/// Map a world point into a rotated arena frame.
pub fn world_to_local(world: DVec2, center: DVec2, rotation: f64) -> DVec2 {
    rotate(world - center, -rotation)
}

/// Heading from `from` to `to` (math convention).
pub fn heading_to(from: DVec2, to: DVec2) -> f64 {
    let d = to - from;
    d.y.atan2(d.x)
}
