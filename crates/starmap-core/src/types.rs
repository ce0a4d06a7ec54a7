//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// 2D position in world space (map units). Used as an ECS component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub DVec2);

/// 2D velocity in map units per tick. Used as an ECS component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub DVec2);

/// Position plus heading of a skirmish participant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub pos: DVec2,
    /// Heading in radians (math convention, 0 = +x, counter-clockwise).
    pub angle: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

/// Index of a body in the orbital arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyId(pub u32);

/// Faction identity as supplied by the persistence layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FactionId(pub u32);

/// Fleet identity as supplied by the persistence layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FleetId(pub u32);

/// World name. Matches the `name` of a body in the orbital tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorldId(pub String);

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self(DVec2::new(x, y))
    }

    /// Distance to another position in map units.
    pub fn range_to(&self, other: &Position) -> f64 {
        self.0.distance(other.0)
    }

    /// Angle from this position to another (radians, math convention).
    pub fn bearing_to(&self, other: &Position) -> f64 {
        let d = other.0 - self.0;
        d.y.atan2(d.x)
    }

    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64) -> Self {
        Self(DVec2::new(x, y))
    }

    /// Speed magnitude (map units per tick).
    pub fn speed(&self) -> f64 {
        self.0.length()
    }
}

impl Pose {
    pub fn new(pos: DVec2, angle: f64) -> Self {
        Self { pos, angle }
    }

    pub fn is_finite(&self) -> bool {
        self.pos.is_finite() && self.angle.is_finite()
    }
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        1.0 / crate::constants::TICK_RATE as f64
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}

impl WorldId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WorldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
