//! Projectile system: torpedo guidance and laser decay.
//!
//! Runs after the skirmish system so homing torpedoes steer at this tick's
//! participant poses. A torpedo rolled as a hit always bursts: on contact, or
//! at its target on its last tick of life.

use std::collections::BTreeMap;

use glam::DVec2;
use hecs::World;
use rand_chacha::ChaCha8Rng;

use starmap_core::components::{Aim, Laser, Lifetime, Owner, Torpedo};
use starmap_core::types::Position;

use crate::guidance::steer_torpedo;
use crate::skirmish::{Skirmish, SkirmishStats};
use crate::world_setup;

pub fn run(
    world: &mut World,
    skirmishes: &BTreeMap<u32, Skirmish>,
    rng: &mut ChaCha8Rng,
    stats: &mut SkirmishStats,
) {
    // Collect bursts to spawn (avoid borrow conflicts with hecs)
    let mut bursts: Vec<(u32, DVec2)> = Vec::new();

    for (_entity, (owner, pos, torpedo, lifetime)) in
        world.query_mut::<(&Owner, &mut Position, &mut Torpedo, &mut Lifetime)>()
    {
        if lifetime.life <= 0 {
            continue;
        }
        let destination = match torpedo.aim {
            Aim::Point(p) => Some(p),
            Aim::Participant(side) => skirmishes
                .get(&owner.skirmish_id)
                .map(|s| s.participant(side).pose.pos),
        };
        let Some(destination) = destination else {
            // Target skirmish is gone
            lifetime.life = 0;
            continue;
        };

        let step = steer_torpedo(pos.0, torpedo.heading, torpedo.speed, destination);
        if !step.pos.is_finite() || !step.heading.is_finite() {
            log::warn!("Torpedo of skirmish {} went non-finite; removed", owner.skirmish_id);
            lifetime.life = 0;
            continue;
        }
        pos.0 = step.pos;
        torpedo.heading = step.heading;
        torpedo.speed = step.speed;

        if step.detonated {
            lifetime.life = 0;
            if torpedo.hit {
                bursts.push((owner.skirmish_id, step.pos));
            }
        } else {
            lifetime.life -= 1;
            // A rolled hit that never closed in still lands on its target
            if lifetime.life <= 0 && torpedo.hit {
                pos.0 = destination;
                bursts.push((owner.skirmish_id, destination));
            }
        }
    }

    for (_entity, (_laser, lifetime)) in world.query_mut::<(&Laser, &mut Lifetime)>() {
        lifetime.life -= 1;
    }

    for (skirmish_id, at) in bursts {
        world_setup::spawn_burst(world, rng, skirmish_id, at);
        stats.bursts += 1;
    }
}
