//! ECS components for hecs entities.
//!
//! Projectiles and particles live in the hecs world; skirmishes and their
//! participant poses do not. Components are plain data structs.
//! Game logic lives in systems, not components.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::Side;

/// Links a projectile or particle to the skirmish that owns it.
/// Retiring the skirmish despawns every entity carrying its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub skirmish_id: u32,
}

/// Remaining life in ticks. The entity is removed once `life <= 0`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Lifetime {
    pub life: i32,
}

/// Where a torpedo is steering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Aim {
    /// Fixed destination (misses are jittered around the target at fire time).
    Point(DVec2),
    /// Live position of a participant of the owning skirmish.
    Participant(Side),
}

/// Homing, accelerating munition.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Torpedo {
    /// Current speed (map units per tick), multiplied by the growth factor each tick.
    pub speed: f64,
    /// Heading in radians.
    pub heading: f64,
    pub aim: Aim,
    pub hit: bool,
}

/// Instantaneous beam drawn between two points captured at fire time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Laser {
    pub from: DVec2,
    pub to: DVec2,
    pub hit: bool,
}

/// Shrinking radial flash.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Explosion {
    pub radius: f64,
}

/// Marks a velocity-decaying spark.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Debris;
