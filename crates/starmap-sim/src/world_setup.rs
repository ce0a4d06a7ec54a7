//! Entity spawn factories for projectiles and particles.
//!
//! Every entity carries an `Owner` so retiring a skirmish can sweep up
//! everything it left in flight.

use std::f64::consts::TAU;

use glam::DVec2;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use starmap_core::components::*;
use starmap_core::constants::*;
use starmap_core::types::{Position, Velocity};

/// Launch a torpedo from `from` on `heading`.
pub fn spawn_torpedo(
    world: &mut World,
    skirmish_id: u32,
    from: DVec2,
    heading: f64,
    aim: Aim,
    hit: bool,
) -> hecs::Entity {
    world.spawn((
        Owner { skirmish_id },
        Position(from),
        Torpedo {
            speed: TORPEDO_INITIAL_SPEED,
            heading,
            aim,
            hit,
        },
        Lifetime {
            life: TORPEDO_LIFETIME,
        },
    ))
}

/// Draw a laser beam between two fixed points.
pub fn spawn_laser(
    world: &mut World,
    skirmish_id: u32,
    from: DVec2,
    to: DVec2,
    hit: bool,
) -> hecs::Entity {
    world.spawn((
        Owner { skirmish_id },
        Laser { from, to, hit },
        Lifetime {
            life: LASER_LIFETIME,
        },
    ))
}

/// One explosion plus a spray of debris at `at`.
pub fn spawn_burst(world: &mut World, rng: &mut ChaCha8Rng, skirmish_id: u32, at: DVec2) {
    world.spawn((
        Owner { skirmish_id },
        Position(at),
        Explosion {
            radius: EXPLOSION_RADIUS,
        },
        Lifetime {
            life: EXPLOSION_LIFETIME,
        },
    ));
    for _ in 0..DEBRIS_PER_BURST {
        let bearing = rng.gen_range(0.0..TAU);
        let speed = rng.gen_range(0.5..DEBRIS_MAX_SPEED);
        world.spawn((
            Owner { skirmish_id },
            Position(at),
            Velocity(DVec2::new(bearing.cos(), bearing.sin()) * speed),
            Debris,
            Lifetime {
                life: DEBRIS_LIFETIME,
            },
        ));
    }
}
