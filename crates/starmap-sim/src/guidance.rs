//! Torpedo guidance.
//!
//! Torpedoes accelerate every tick and bend their heading toward the
//! destination with a fixed blend, so a fast torpedo turns wide. Proximity is
//! tested against the whole step so a fast round cannot skip past its
//! destination between ticks.

use glam::DVec2;

use starmap_battle::geometry::{ease_angle, heading_to};
use starmap_core::constants::*;

/// Result of one guidance step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorpedoStep {
    pub pos: DVec2,
    pub heading: f64,
    pub speed: f64,
    pub detonated: bool,
}

/// Advance a torpedo one tick toward `destination`.
pub fn steer_torpedo(pos: DVec2, heading: f64, speed: f64, destination: DVec2) -> TorpedoStep {
    let speed = speed * TORPEDO_SPEED_GROWTH;
    let heading = if destination.distance_squared(pos) > f64::EPSILON {
        ease_angle(heading, heading_to(pos, destination), TORPEDO_TURN_BLEND)
    } else {
        heading
    };
    let next = pos + DVec2::new(heading.cos(), heading.sin()) * speed;
    let detonated = segment_distance(pos, next, destination) <= TORPEDO_DETONATION_RADIUS;
    TorpedoStep {
        pos: next,
        heading,
        speed,
        detonated,
    }
}

/// Closest distance from `p` to the segment `a..b`.
pub fn segment_distance(a: DVec2, b: DVec2, p: DVec2) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f64::EPSILON {
        return a.distance(p);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    (a + ab * t).distance(p)
}
