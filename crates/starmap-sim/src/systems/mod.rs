//! Per-tick systems.
//!
//! Systems are free functions over the ECS world and the skirmish registry.
//! They do not own state; the engine passes in everything they touch.

pub mod cleanup;
pub mod particles;
pub mod projectiles;
pub mod skirmish;
pub mod snapshot;
pub mod spawner;
