//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Kind of orbital body. Informational only: traversal logic keys off
/// the body's motion, never off its kind or name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyKind {
    Star,
    Planet,
    Moon,
    BeltSector,
}

/// Operating domain of a fleet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Domain {
    #[default]
    Space,
    Ground,
}

/// Operational action a fleet is currently performing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FleetAction {
    #[default]
    Idle,
    Defense,
    Patrol,
    Battle,
    Activating,
    Moving,
    Refit,
}

impl FleetAction {
    /// Actions that count as an active presence for intel purposes.
    pub fn is_active(self) -> bool {
        matches!(
            self,
            FleetAction::Defense | FleetAction::Patrol | FleetAction::Battle | FleetAction::Activating
        )
    }
}

/// How the viewer is looking at the map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewerMode {
    /// A faction player, subject to intel rules.
    #[default]
    Player,
    /// Referee/observer: sees everything that survives the allow-lists.
    Referee,
}

/// Movement pattern a participant flies during the FIGHT phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tactic {
    Figure8,
    Orbit,
    DivingOval,
    SineWave,
}

impl Tactic {
    pub const ALL: [Tactic; 4] = [
        Tactic::Figure8,
        Tactic::Orbit,
        Tactic::DivingOval,
        Tactic::SineWave,
    ];
}

/// Skirmish lifecycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkirmishPhase {
    /// Participants close on their opposing anchor points.
    #[default]
    Approach,
    /// Participants fly their tactics and exchange fire.
    Fight,
    /// Participants ease back to their spawn poses (ReturnToOrigin policy only).
    Return,
}

/// Which participant of a skirmish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Attacker,
    Defender,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Attacker => Side::Defender,
            Side::Defender => Side::Attacker,
        }
    }
}

/// Why a skirmish was retired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// Neither claimed fleet is still in the Battle action.
    FleetsDisengaged,
    /// RETURN phase completed under the ReturnToOrigin policy.
    Returned,
    /// Focus moved away from the skirmish's anchor body.
    FocusLost,
    /// The skirmish produced non-finite state and was isolated.
    Faulted,
}

/// Top-level engine state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimPhase {
    #[default]
    Running,
    Paused,
}

/// How a skirmish ends once it is fighting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TerminationPolicy {
    /// Fight until neither claimed fleet is still in the Battle action.
    #[default]
    FleetState,
    /// Fight for `fight_ticks`, ease home for `return_ticks`, then retire.
    ReturnToOrigin { fight_ticks: u32, return_ticks: u32 },
}

impl TerminationPolicy {
    pub fn return_to_origin() -> Self {
        TerminationPolicy::ReturnToOrigin {
            fight_ticks: crate::constants::DEFAULT_FIGHT_TICKS,
            return_ticks: crate::constants::DEFAULT_RETURN_TICKS,
        }
    }
}
