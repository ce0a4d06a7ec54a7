//! Events emitted by the simulation for UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::EndReason;
use crate::types::{BodyId, FleetId};

/// Events drained into each snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SceneEvent {
    /// Focus lock moved to a body (or was cleared).
    FocusChanged { body: Option<BodyId> },
    /// The camera crossed the frontier and a warning was armed.
    FrontierWarning { distance: f64 },
    /// A transient message went up.
    NoticeShown { timer_id: u64, text: String },
    /// A pending dismissal timer was cancelled by a newer message.
    NoticeCancelled { timer_id: u64 },
    /// A message was dismissed by its own timer.
    NoticeDismissed { timer_id: u64 },
    /// A battle zone opened.
    SkirmishStarted {
        id: u32,
        attacker: FleetId,
        defender: FleetId,
    },
    /// A battle zone closed and released its fleets.
    SkirmishEnded { id: u32, reason: EndReason },
}
