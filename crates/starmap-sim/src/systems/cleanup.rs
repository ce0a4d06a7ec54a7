//! Cleanup system: removes expired entities and anything whose skirmish is gone.

use std::collections::BTreeMap;

use hecs::{Entity, World};

use starmap_core::components::{Lifetime, Owner};

use crate::skirmish::Skirmish;

/// Despawn entities with `life <= 0` or an owner no longer in the registry.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, skirmishes: &BTreeMap<u32, Skirmish>, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, (owner, lifetime)) in world.query_mut::<(&Owner, &Lifetime)>() {
        if lifetime.life <= 0 || !skirmishes.contains_key(&owner.skirmish_id) {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
