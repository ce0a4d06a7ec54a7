//! Tactic flight curves.
//!
//! Each tactic maps an internal phase time to an offset in the arena's
//! local frame. The curves are periodic in `t` with period 2π.

use glam::DVec2;
use rand::Rng;

use starmap_core::constants::*;
use starmap_core::enums::Tactic;

use crate::geometry::local_to_world;

/// Local-frame offset of `tactic` at phase time `t`.
pub fn tactic_offset(tactic: Tactic, t: f64) -> DVec2 {
    match tactic {
        Tactic::Figure8 => DVec2::new(
            t.cos() * FIGURE8_HALF_WIDTH,
            (2.0 * t).sin() * FIGURE8_HALF_HEIGHT,
        ),
        Tactic::Orbit => DVec2::new(t.cos(), t.sin()) * ORBIT_RADIUS,
        Tactic::DivingOval => {
            let s = t.sin();
            // Shallow climb, deep dive
            let depth = if s < 0.0 {
                DIVING_OVAL_DIVE
            } else {
                DIVING_OVAL_RISE
            };
            DVec2::new(t.cos() * DIVING_OVAL_HALF_WIDTH, s * depth)
        }
        Tactic::SineWave => DVec2::new(
            t.sin() * SINE_WAVE_HALF_WIDTH,
            (3.0 * t).sin() * SINE_WAVE_AMPLITUDE,
        ),
    }
}

/// Phase time for a participant: `timer * rate + phase_offset`.
pub fn phase_time(timer: u32, phase_offset: f64) -> f64 {
    timer as f64 * FIGHT_PHASE_RATE + phase_offset
}

/// World-space FIGHT target for a participant.
pub fn fight_target(tactic: Tactic, timer: u32, phase_offset: f64, center: DVec2, rotation: f64) -> DVec2 {
    local_to_world(tactic_offset(tactic, phase_time(timer, phase_offset)), center, rotation)
}

/// Two different tactics, uniformly chosen.
pub fn pick_pair<R: Rng>(rng: &mut R) -> (Tactic, Tactic) {
    let first = rng.gen_range(0..Tactic::ALL.len());
    // Skip over `first` so the second pick is always different
    let mut second = rng.gen_range(0..Tactic::ALL.len() - 1);
    if second >= first {
        second += 1;
    }
    (Tactic::ALL[first], Tactic::ALL[second])
}
