//! Skirmish spawner: opens battle zones at the focused world.
//!
//! Each attempt pairs Battle-state space fleets from two different factions
//! that no live skirmish has claimed. Claims are derived from the registry,
//! so retiring a skirmish frees both fleets in the same step.

use std::collections::{BTreeMap, BTreeSet};
use std::f64::consts::TAU;

use glam::DVec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use starmap_battle::tactics::pick_pair;
use starmap_core::enums::{Domain, FleetAction, Side, SkirmishPhase};
use starmap_core::events::SceneEvent;
use starmap_core::fleets::FleetPresence;
use starmap_core::types::{BodyId, FactionId, FleetId, WorldId};

use crate::config::SkirmishConfig;
use crate::skirmish::{Participant, Skirmish, SkirmishStats};

/// Where skirmishes may currently spawn.
#[derive(Debug, Clone)]
pub struct SpawnSite<'a> {
    pub body: BodyId,
    pub world: WorldId,
    pub position: DVec2,
    /// Fleets visible to the viewer at this world.
    pub visible: &'a [FleetPresence],
}

/// Countdown to the next spawn attempt.
#[derive(Debug, Clone, Default)]
pub struct SpawnTimer {
    pub cooldown: u32,
}

/// Fleets currently claimed by any skirmish.
pub fn claimed_fleets(skirmishes: &BTreeMap<u32, Skirmish>) -> BTreeSet<FleetId> {
    skirmishes.values().flat_map(|s| s.claims()).collect()
}

/// Unclaimed Battle-state space fleets, grouped by faction.
pub fn eligible_by_faction<'a>(
    visible: &'a [FleetPresence],
    claimed: &BTreeSet<FleetId>,
) -> BTreeMap<FactionId, Vec<&'a FleetPresence>> {
    let mut groups: BTreeMap<FactionId, Vec<&FleetPresence>> = BTreeMap::new();
    for fleet in visible {
        if fleet.action == FleetAction::Battle
            && fleet.domain == Domain::Space
            && !claimed.contains(&fleet.id)
        {
            groups.entry(fleet.faction).or_default().push(fleet);
        }
    }
    groups
}

/// Run one spawner tick. Returns the id of a newly opened skirmish.
#[allow(clippy::too_many_arguments)]
pub fn run(
    skirmishes: &mut BTreeMap<u32, Skirmish>,
    next_skirmish_id: &mut u32,
    timer: &mut SpawnTimer,
    site: Option<&SpawnSite<'_>>,
    config: &SkirmishConfig,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<SceneEvent>,
    stats: &mut SkirmishStats,
    current_tick: u64,
) -> Option<u32> {
    if timer.cooldown > 0 {
        timer.cooldown -= 1;
        return None;
    }
    let site = site?;
    if skirmishes.len() >= config.max_concurrent {
        return None;
    }

    let spawned = try_spawn(skirmishes, next_skirmish_id, site, config, rng, current_tick);
    if let Some(id) = spawned {
        if let Some(s) = skirmishes.get(&id) {
            log::info!(
                "Skirmish {} opened at {}: fleet {} vs fleet {}",
                id,
                s.world,
                s.attacker.fleet.0,
                s.defender.fleet.0
            );
            events.push(SceneEvent::SkirmishStarted {
                id,
                attacker: s.attacker.fleet,
                defender: s.defender.fleet,
            });
        }
        stats.spawned += 1;
    }

    let (lo, hi) = if skirmishes.is_empty() {
        config.idle_cooldown
    } else {
        config.busy_cooldown
    };
    timer.cooldown = rng.gen_range(lo.min(hi)..=hi.max(lo));
    spawned
}

fn try_spawn(
    skirmishes: &mut BTreeMap<u32, Skirmish>,
    next_skirmish_id: &mut u32,
    site: &SpawnSite<'_>,
    config: &SkirmishConfig,
    rng: &mut ChaCha8Rng,
    current_tick: u64,
) -> Option<u32> {
    let claimed = claimed_fleets(skirmishes);
    let eligible = eligible_by_faction(site.visible, &claimed);
    if eligible.len() < 2 {
        log::debug!(
            "No skirmish at {}: {} faction(s) with eligible fleets",
            site.world,
            eligible.len()
        );
        return None;
    }

    let factions: Vec<&Vec<&FleetPresence>> = eligible.values().collect();
    let first = rng.gen_range(0..factions.len());
    let mut second = rng.gen_range(0..factions.len() - 1);
    if second >= first {
        second += 1;
    }
    let attacker = pick_fleet(rng, factions[first])?;
    let defender = pick_fleet(rng, factions[second])?;

    let jitter_angle = rng.gen_range(0.0..TAU);
    let jitter = rng.gen_range(0.0..=config.arena_jitter.max(0.0));
    let center_offset = DVec2::new(jitter_angle.cos(), jitter_angle.sin()) * jitter;
    let center = site.position + center_offset;
    let rotation = rng.gen_range(0.0..TAU);
    let (attacker_tactic, defender_tactic) = pick_pair(rng);

    let id = *next_skirmish_id;
    *next_skirmish_id += 1;
    skirmishes.insert(
        id,
        Skirmish {
            id,
            world: site.world.clone(),
            anchor: site.body,
            center_offset,
            center,
            rotation,
            phase: SkirmishPhase::Approach,
            ticks_in_phase: 0,
            fight_timer: 0,
            started_tick: current_tick,
            attacker: Participant::spawn(
                Side::Attacker,
                attacker.id,
                attacker.faction,
                attacker_tactic,
                center,
                rotation,
            ),
            defender: Participant::spawn(
                Side::Defender,
                defender.id,
                defender.faction,
                defender_tactic,
                center,
                rotation,
            ),
        },
    );
    Some(id)
}

fn pick_fleet<'a>(rng: &mut ChaCha8Rng, fleets: &[&'a FleetPresence]) -> Option<&'a FleetPresence> {
    if fleets.is_empty() {
        return None;
    }
    Some(fleets[rng.gen_range(0..fleets.len())])
}

/// Skirmishes anchored anywhere but the focused body.
pub fn unfocused(skirmishes: &BTreeMap<u32, Skirmish>, focus: Option<BodyId>) -> Vec<u32> {
    skirmishes
        .values()
        .filter(|s| Some(s.anchor) != focus)
        .map(|s| s.id)
        .collect()
}
