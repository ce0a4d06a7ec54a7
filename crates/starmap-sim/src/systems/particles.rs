//! Particle system: shrinking explosions and drifting debris.

use hecs::World;

use starmap_core::components::{Debris, Explosion, Lifetime};
use starmap_core::constants::{DEBRIS_DRAG, EXPLOSION_DECAY};
use starmap_core::types::{Position, Velocity};

pub fn run(world: &mut World) {
    for (_entity, (explosion, lifetime)) in world.query_mut::<(&mut Explosion, &mut Lifetime)>() {
        explosion.radius *= EXPLOSION_DECAY;
        lifetime.life -= 1;
    }

    for (_entity, (_debris, pos, vel, lifetime)) in
        world.query_mut::<(&Debris, &mut Position, &mut Velocity, &mut Lifetime)>()
    {
        pos.0 += vel.0;
        vel.0 *= DEBRIS_DRAG;
        lifetime.life -= 1;
        if !pos.is_finite() {
            lifetime.life = 0;
        }
    }
}
