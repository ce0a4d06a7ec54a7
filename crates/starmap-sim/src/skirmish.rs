//! Skirmish data model: one battle zone between two fleets.
//!
//! Stored in `SimulationEngine`'s skirmish map, NOT as ECS entities. Its
//! projectiles and particles are ECS entities tagged with `Owner`.

use std::f64::consts::PI;

use glam::DVec2;

use starmap_battle::geometry::local_to_world;
use starmap_core::constants::*;
use starmap_core::enums::{Side, SkirmishPhase, Tactic};
use starmap_core::types::{BodyId, FactionId, FleetId, Pose, WorldId};

/// One side of a skirmish.
#[derive(Debug, Clone)]
pub struct Participant {
    pub fleet: FleetId,
    pub faction: FactionId,
    pub tactic: Tactic,
    /// Added to the tactic phase time; the two sides differ by π.
    pub phase_offset: f64,
    /// Live world-space pose.
    pub pose: Pose,
    /// Spawn position in the arena frame.
    pub start_local: DVec2,
    /// Spawn heading relative to the arena rotation.
    pub start_heading: f64,
    /// APPROACH destination in the arena frame.
    pub anchor_local: DVec2,
}

impl Participant {
    /// Build a participant on `side` of an arena, placed at its spawn pose.
    pub fn spawn(
        side: Side,
        fleet: FleetId,
        faction: FactionId,
        tactic: Tactic,
        center: DVec2,
        rotation: f64,
    ) -> Self {
        let (sign, phase_offset, start_heading) = match side {
            Side::Attacker => (-1.0, 0.0, 0.0),
            Side::Defender => (1.0, PI, PI),
        };
        let start_local = DVec2::new(sign * PARTICIPANT_START_OFFSET, 0.0);
        let mut participant = Self {
            fleet,
            faction,
            tactic,
            phase_offset,
            pose: Pose::default(),
            start_local,
            start_heading,
            anchor_local: DVec2::new(sign * APPROACH_ANCHOR_OFFSET, 0.0),
        };
        participant.pose = participant.home(center, rotation);
        participant
    }

    /// Spawn pose in world space for the arena's current placement.
    pub fn home(&self, center: DVec2, rotation: f64) -> Pose {
        Pose::new(
            local_to_world(self.start_local, center, rotation),
            rotation + self.start_heading,
        )
    }

    pub fn anchor(&self, center: DVec2, rotation: f64) -> DVec2 {
        local_to_world(self.anchor_local, center, rotation)
    }
}

/// An active battle zone.
#[derive(Debug, Clone)]
pub struct Skirmish {
    pub id: u32,
    /// World the battle is attached to (the anchor body's name).
    pub world: WorldId,
    pub anchor: BodyId,
    /// Arena center relative to the anchor body.
    pub center_offset: DVec2,
    /// Arena center in world space, re-derived each tick.
    pub center: DVec2,
    pub rotation: f64,
    pub phase: SkirmishPhase,
    pub ticks_in_phase: u32,
    /// Ticks spent in FIGHT; drives the tactic curves.
    pub fight_timer: u32,
    pub started_tick: u64,
    pub attacker: Participant,
    pub defender: Participant,
}

impl Skirmish {
    /// Both fleets claimed by this skirmish.
    pub fn claims(&self) -> [FleetId; 2] {
        [self.attacker.fleet, self.defender.fleet]
    }

    pub fn participant(&self, side: Side) -> &Participant {
        match side {
            Side::Attacker => &self.attacker,
            Side::Defender => &self.defender,
        }
    }

    pub fn participant_mut(&mut self, side: Side) -> &mut Participant {
        match side {
            Side::Attacker => &mut self.attacker,
            Side::Defender => &mut self.defender,
        }
    }
}

/// Running totals tracked by the engine.
#[derive(Debug, Clone, Default)]
pub struct SkirmishStats {
    pub spawned: u32,
    pub retired: u32,
    pub faulted: u32,
    pub torpedoes_fired: u32,
    pub lasers_fired: u32,
    pub bursts: u32,
}
