//! Snapshot system: assembles a complete SceneSnapshot.
//!
//! This system is read-only. It never modifies the world.

use std::collections::BTreeMap;

use hecs::World;

use starmap_core::components::*;
use starmap_core::enums::SimPhase;
use starmap_core::events::SceneEvent;
use starmap_core::state::*;
use starmap_core::types::{FactionId, Position, SimTime};
use starmap_orbits::BodyTree;

use crate::palette::FactionPalette;
use crate::skirmish::{Participant, Skirmish};

/// Build a complete SceneSnapshot from the current engine state.
#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: SimPhase,
    camera: CameraView,
    bodies: &BodyTree,
    worlds: &[WorldFleetView],
    skirmishes: &BTreeMap<u32, Skirmish>,
    palette: &dyn FactionPalette,
    notice: Option<&str>,
    events: Vec<SceneEvent>,
) -> SceneSnapshot {
    SceneSnapshot {
        time: *time,
        phase,
        camera,
        bodies: build_bodies(bodies),
        belts: build_belts(bodies),
        worlds: build_worlds(worlds, palette),
        skirmishes: build_skirmishes(world, skirmishes, palette),
        notice: notice.map(str::to_string),
        events,
    }
}

fn build_bodies(bodies: &BodyTree) -> Vec<BodyView> {
    bodies
        .iter()
        .map(|b| BodyView {
            id: b.id,
            name: b.name.clone(),
            kind: b.kind,
            parent: b.parent,
            x: b.current.x,
            y: b.current.y,
            dist: b.dist,
            size: b.size,
            color: b.color.clone(),
            fixed_angle: b.has_fixed_angle(),
        })
        .collect()
}

fn build_belts(bodies: &BodyTree) -> Vec<BeltView> {
    bodies
        .systems()
        .iter()
        .filter_map(|system| {
            system.belt.map(|belt| BeltView {
                star: system.root,
                inner: belt.inner,
                outer: belt.outer,
                count: belt.count,
                angular_speed: belt.angular_speed,
            })
        })
        .collect()
}

/// Attach faction colors to each resolved world.
fn build_worlds(worlds: &[WorldFleetView], palette: &dyn FactionPalette) -> Vec<WorldFleetView> {
    worlds
        .iter()
        .filter(|w| !w.visible.is_empty())
        .map(|w| {
            let mut factions: Vec<FactionId> = w.visible.iter().map(|f| f.faction).collect();
            factions.sort();
            factions.dedup();
            WorldFleetView {
                colors: factions
                    .into_iter()
                    .map(|faction| FactionColor {
                        faction,
                        color: palette.color(faction),
                    })
                    .collect(),
                ..w.clone()
            }
        })
        .collect()
}

fn participant_view(p: &Participant, palette: &dyn FactionPalette) -> ParticipantView {
    ParticipantView {
        fleet: p.fleet,
        faction: p.faction,
        color: palette.color(p.faction),
        tactic: p.tactic,
        pose: p.pose,
    }
}

/// Build SkirmishView list, then distribute owned entities into it.
fn build_skirmishes(
    world: &World,
    skirmishes: &BTreeMap<u32, Skirmish>,
    palette: &dyn FactionPalette,
) -> Vec<SkirmishView> {
    let mut views: BTreeMap<u32, SkirmishView> = skirmishes
        .values()
        .map(|s| {
            (
                s.id,
                SkirmishView {
                    id: s.id,
                    world: s.world.clone(),
                    phase: s.phase,
                    center: s.center,
                    rotation: s.rotation,
                    attacker: participant_view(&s.attacker, palette),
                    defender: participant_view(&s.defender, palette),
                    torpedoes: Vec::new(),
                    lasers: Vec::new(),
                    explosions: Vec::new(),
                    debris: Vec::new(),
                },
            )
        })
        .collect();

    for (_entity, (owner, pos, torpedo, lifetime)) in world
        .query::<(&Owner, &Position, &Torpedo, &Lifetime)>()
        .iter()
    {
        if let Some(view) = views.get_mut(&owner.skirmish_id) {
            view.torpedoes.push(TorpedoView {
                pos: pos.0,
                heading: torpedo.heading,
                life: lifetime.life,
            });
        }
    }

    for (_entity, (owner, laser, lifetime)) in world.query::<(&Owner, &Laser, &Lifetime)>().iter() {
        if let Some(view) = views.get_mut(&owner.skirmish_id) {
            view.lasers.push(LaserView {
                from: laser.from,
                to: laser.to,
                hit: laser.hit,
                life: lifetime.life,
            });
        }
    }

    for (_entity, (owner, pos, explosion, lifetime)) in world
        .query::<(&Owner, &Position, &Explosion, &Lifetime)>()
        .iter()
    {
        if let Some(view) = views.get_mut(&owner.skirmish_id) {
            view.explosions.push(ExplosionView {
                pos: pos.0,
                radius: explosion.radius,
                life: lifetime.life,
            });
        }
    }

    for (_entity, (owner, pos, _debris, lifetime)) in world
        .query::<(&Owner, &Position, &Debris, &Lifetime)>()
        .iter()
    {
        if let Some(view) = views.get_mut(&owner.skirmish_id) {
            view.debris.push(DebrisView {
                pos: pos.0,
                life: lifetime.life,
            });
        }
    }

    views.into_values().collect()
}
