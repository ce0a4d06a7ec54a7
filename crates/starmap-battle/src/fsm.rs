//! Skirmish phase finite state machine.
//!
//! Pure functions that compute phase transitions for a skirmish and pose
//! updates for its participants. No ECS dependency; operates on plain data.

use glam::DVec2;

use starmap_core::constants::*;
use starmap_core::enums::{EndReason, SkirmishPhase, TerminationPolicy};
use starmap_core::types::Pose;

use crate::geometry::{ease_angle, ease_vec, heading_to};

/// Input to the skirmish FSM.
#[derive(Debug, Clone, Copy)]
pub struct SkirmishContext {
    pub phase: SkirmishPhase,
    pub ticks_in_phase: u32,
    pub policy: TerminationPolicy,
    /// Distance of each participant from its approach anchor.
    pub attacker_to_anchor: f64,
    pub defender_to_anchor: f64,
    /// Whether each claimed fleet is still in the Battle action.
    pub attacker_in_battle: bool,
    pub defender_in_battle: bool,
}

/// Output from the skirmish FSM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkirmishUpdate {
    pub new_phase: SkirmishPhase,
    pub phase_changed: bool,
    /// Set when the skirmish should be torn down this tick.
    pub retire: Option<EndReason>,
}

/// Evaluate the FSM for one skirmish.
pub fn evaluate(ctx: &SkirmishContext) -> SkirmishUpdate {
    let no_change = SkirmishUpdate {
        new_phase: ctx.phase,
        phase_changed: false,
        retire: None,
    };

    // External game state wins over every phase.
    if !ctx.attacker_in_battle && !ctx.defender_in_battle {
        return SkirmishUpdate {
            retire: Some(EndReason::FleetsDisengaged),
            ..no_change
        };
    }

    match ctx.phase {
        SkirmishPhase::Approach => evaluate_approach(ctx).unwrap_or(no_change),
        SkirmishPhase::Fight => evaluate_fight(ctx).unwrap_or(no_change),
        SkirmishPhase::Return => evaluate_return(ctx).unwrap_or(no_change),
    }
}

fn transition(phase: SkirmishPhase) -> SkirmishUpdate {
    SkirmishUpdate {
        new_phase: phase,
        phase_changed: true,
        retire: None,
    }
}

fn evaluate_approach(ctx: &SkirmishContext) -> Option<SkirmishUpdate> {
    let arrived = ctx.attacker_to_anchor <= APPROACH_ARRIVAL_RADIUS
        && ctx.defender_to_anchor <= APPROACH_ARRIVAL_RADIUS;
    (arrived || ctx.ticks_in_phase >= APPROACH_TICKS).then(|| transition(SkirmishPhase::Fight))
}

fn evaluate_fight(ctx: &SkirmishContext) -> Option<SkirmishUpdate> {
    match ctx.policy {
        TerminationPolicy::FleetState => None,
        TerminationPolicy::ReturnToOrigin { fight_ticks, .. } => {
            (ctx.ticks_in_phase >= fight_ticks).then(|| transition(SkirmishPhase::Return))
        }
    }
}

fn evaluate_return(ctx: &SkirmishContext) -> Option<SkirmishUpdate> {
    let return_ticks = match ctx.policy {
        TerminationPolicy::ReturnToOrigin { return_ticks, .. } => return_ticks,
        // A skirmish only reaches RETURN under ReturnToOrigin; finish it at once.
        TerminationPolicy::FleetState => 0,
    };
    (ctx.ticks_in_phase >= return_ticks).then(|| SkirmishUpdate {
        new_phase: SkirmishPhase::Return,
        phase_changed: false,
        retire: Some(EndReason::Returned),
    })
}

/// APPROACH: ease toward the anchor while facing the opponent.
pub fn compute_approach_pose(pose: Pose, anchor: DVec2, opponent: DVec2) -> Pose {
    let pos = ease_vec(pose.pos, anchor, APPROACH_SMOOTHING);
    let angle = if opponent.distance_squared(pos) > f64::EPSILON {
        heading_to(pos, opponent)
    } else {
        pose.angle
    };
    Pose { pos, angle }
}

/// FIGHT: ease toward the tactic target, turning along the direction of travel.
pub fn compute_fight_pose(pose: Pose, target: DVec2) -> Pose {
    let pos = ease_vec(pose.pos, target, FIGHT_POSITION_SMOOTHING);
    let angle = if target.distance_squared(pose.pos) > f64::EPSILON {
        ease_angle(pose.angle, heading_to(pose.pos, target), FIGHT_HEADING_SMOOTHING)
    } else {
        pose.angle
    };
    Pose { pos, angle }
}

/// RETURN: ease back to the spawn pose.
pub fn compute_return_pose(pose: Pose, home: Pose) -> Pose {
    let pos = ease_vec(pose.pos, home.pos, RETURN_SMOOTHING);
    let angle = ease_angle(pose.angle, home.angle, RETURN_SMOOTHING);
    Pose { pos, angle }
}
