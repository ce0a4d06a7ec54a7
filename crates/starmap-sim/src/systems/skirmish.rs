//! Skirmish system: moves participants through the phase machine and fires.
//!
//! Each skirmish advances in isolation. A skirmish that fails (missing
//! anchor body, non-finite pose) is reported for retirement instead of
//! stopping the tick.

use std::collections::BTreeMap;

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use starmap_battle::fire::{self, FireChances, ShotKind};
use starmap_battle::fsm::{self, SkirmishContext};
use starmap_battle::geometry::heading_to;
use starmap_battle::tactics::fight_target;
use starmap_core::components::Aim;
use starmap_core::constants::*;
use starmap_core::enums::{EndReason, FleetAction, Side, SkirmishPhase, TerminationPolicy};
use starmap_core::error::ensure_finite;
use starmap_core::fleets::FleetSnapshot;
use starmap_core::SimError;
use starmap_orbits::BodyTree;

use crate::skirmish::{Skirmish, SkirmishStats};
use crate::world_setup;

/// Advance every skirmish one tick. Returns the skirmishes to retire.
#[allow(clippy::too_many_arguments)]
pub fn run(
    skirmishes: &mut BTreeMap<u32, Skirmish>,
    world: &mut World,
    bodies: &BodyTree,
    fleets: &FleetSnapshot,
    policy: TerminationPolicy,
    chances: &FireChances,
    rng: &mut ChaCha8Rng,
    stats: &mut SkirmishStats,
) -> Vec<(u32, EndReason)> {
    let mut retire = Vec::new();
    for (id, skirmish) in skirmishes.iter_mut() {
        match advance(skirmish, world, bodies, fleets, policy, chances, rng, stats) {
            Ok(Some(reason)) => retire.push((*id, reason)),
            Ok(None) => {}
            Err(err) => {
                log::warn!("Skirmish {} faulted: {}", id, err);
                retire.push((*id, EndReason::Faulted));
            }
        }
    }
    retire
}

#[allow(clippy::too_many_arguments)]
fn advance(
    s: &mut Skirmish,
    world: &mut World,
    bodies: &BodyTree,
    fleets: &FleetSnapshot,
    policy: TerminationPolicy,
    chances: &FireChances,
    rng: &mut ChaCha8Rng,
    stats: &mut SkirmishStats,
) -> Result<Option<EndReason>, SimError> {
    let anchor = bodies
        .position(s.anchor)
        .ok_or_else(|| SimError::UnknownBody(s.world.to_string()))?;
    s.center = anchor + s.center_offset;
    if !s.center.is_finite() {
        return Err(SimError::NonFinite {
            what: "arena center",
            context: format!("skirmish {}", s.id),
        });
    }

    let in_battle = |fleet| {
        fleets
            .find(fleet)
            .is_some_and(|f| f.action == FleetAction::Battle && f.world == s.world)
    };
    let ctx = SkirmishContext {
        phase: s.phase,
        ticks_in_phase: s.ticks_in_phase,
        policy,
        attacker_to_anchor: s.attacker.pose.pos.distance(s.attacker.anchor(s.center, s.rotation)),
        defender_to_anchor: s.defender.pose.pos.distance(s.defender.anchor(s.center, s.rotation)),
        attacker_in_battle: in_battle(s.attacker.fleet),
        defender_in_battle: in_battle(s.defender.fleet),
    };
    let update = fsm::evaluate(&ctx);
    if let Some(reason) = update.retire {
        return Ok(Some(reason));
    }
    if update.phase_changed {
        log::debug!("Skirmish {}: {:?} -> {:?}", s.id, s.phase, update.new_phase);
        s.phase = update.new_phase;
        s.ticks_in_phase = 0;
    }

    match s.phase {
        SkirmishPhase::Approach => {
            let attacker_pos = s.attacker.pose.pos;
            let defender_pos = s.defender.pose.pos;
            let a_anchor = s.attacker.anchor(s.center, s.rotation);
            let d_anchor = s.defender.anchor(s.center, s.rotation);
            s.attacker.pose = fsm::compute_approach_pose(s.attacker.pose, a_anchor, defender_pos);
            s.defender.pose = fsm::compute_approach_pose(s.defender.pose, d_anchor, attacker_pos);
        }
        SkirmishPhase::Fight => {
            s.fight_timer += 1;
            for side in [Side::Attacker, Side::Defender] {
                let p = s.participant(side);
                let target = fight_target(p.tactic, s.fight_timer, p.phase_offset, s.center, s.rotation);
                let pose = fsm::compute_fight_pose(p.pose, target);
                s.participant_mut(side).pose = pose;
            }
            for side in [Side::Attacker, Side::Defender] {
                if let Some(shot) = fire::roll_shot(rng, chances) {
                    fire_shot(s, world, rng, stats, side, shot.kind, shot.hit);
                }
            }
        }
        SkirmishPhase::Return => {
            for side in [Side::Attacker, Side::Defender] {
                let p = s.participant(side);
                let home = p.home(s.center, s.rotation);
                let pose = fsm::compute_return_pose(p.pose, home);
                s.participant_mut(side).pose = pose;
            }
        }
    }

    for side in [Side::Attacker, Side::Defender] {
        let pose = s.participant(side).pose;
        ensure_finite(pose.pos.x, "participant x", || format!("skirmish {}", s.id))?;
        ensure_finite(pose.pos.y, "participant y", || format!("skirmish {}", s.id))?;
        ensure_finite(pose.angle, "participant heading", || format!("skirmish {}", s.id))?;
    }
    s.ticks_in_phase = s.ticks_in_phase.saturating_add(1);
    Ok(None)
}

/// Spawn the projectiles for one shot from `side` at its opponent.
fn fire_shot(
    s: &Skirmish,
    world: &mut World,
    rng: &mut ChaCha8Rng,
    stats: &mut SkirmishStats,
    side: Side,
    kind: ShotKind,
    hit: bool,
) {
    let shooter = s.participant(side).pose.pos;
    let target_side = side.opposite();
    let target = s.participant(target_side).pose.pos;
    match kind {
        ShotKind::Salvo(count) => {
            let bearing = heading_to(shooter, target);
            for _ in 0..count {
                let heading =
                    bearing + rng.gen_range(-TORPEDO_LAUNCH_SPREAD..=TORPEDO_LAUNCH_SPREAD);
                let aim = if hit {
                    Aim::Participant(target_side)
                } else {
                    Aim::Point(fire::miss_point(rng, target, TORPEDO_MISS_RADIUS))
                };
                world_setup::spawn_torpedo(world, s.id, shooter, heading, aim, hit);
                stats.torpedoes_fired += 1;
            }
        }
        ShotKind::Laser => {
            let to = if hit {
                target
            } else {
                fire::miss_point(rng, s.center, LASER_MISS_RADIUS)
            };
            world_setup::spawn_laser(world, s.id, shooter, to, hit);
            stats.lasers_fired += 1;
            if hit {
                world_setup::spawn_burst(world, rng, s.id, to);
                stats.bursts += 1;
            }
        }
    }
}
