//! Fire decisions during FIGHT.

use std::f64::consts::TAU;

use glam::DVec2;
use rand::Rng;

use starmap_core::constants::*;

/// Per-tick probabilities for one side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireChances {
    pub fire: f64,
    pub salvo: f64,
    pub hit: f64,
}

impl Default for FireChances {
    fn default() -> Self {
        Self {
            fire: FIRE_CHANCE,
            salvo: SALVO_CHANCE,
            hit: HIT_CHANCE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotKind {
    /// Torpedo salvo of this many rounds.
    Salvo(u32),
    Laser,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shot {
    pub kind: ShotKind,
    pub hit: bool,
}

/// Roll whether a side fires this tick, and what.
pub fn roll_shot<R: Rng>(rng: &mut R, chances: &FireChances) -> Option<Shot> {
    if !rng.gen_bool(chances.fire.clamp(0.0, 1.0)) {
        return None;
    }
    let kind = if rng.gen_bool(chances.salvo.clamp(0.0, 1.0)) {
        ShotKind::Salvo(rng.gen_range(SALVO_SIZE.0..=SALVO_SIZE.1))
    } else {
        ShotKind::Laser
    };
    let hit = rng.gen_bool(chances.hit.clamp(0.0, 1.0));
    Some(Shot { kind, hit })
}

/// A point exactly `radius` from `around`, at a random bearing.
pub fn miss_point<R: Rng>(rng: &mut R, around: DVec2, radius: f64) -> DVec2 {
    let bearing = rng.gen_range(0.0..TAU);
    around + DVec2::new(bearing.cos(), bearing.sin()) * radius
}
