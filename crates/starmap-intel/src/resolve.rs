//! Fleet-level visibility rules.

use serde::{Deserialize, Serialize};

use starmap_core::fleets::{FleetPresence, FleetSnapshot, ViewerContext};

/// Tunable intel rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntelPolicy {
    /// Any own fleet at a world, even an idle one, reveals every fleet there.
    pub idle_presence_grants_full_view: bool,
}

impl Default for IntelPolicy {
    fn default() -> Self {
        Self {
            idle_presence_grants_full_view: true,
        }
    }
}

/// Which rule decided a world's visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grant {
    /// Referee sees everything.
    Referee,
    /// An active own fleet with vehicles is present.
    ActivePresence,
    /// Some own fleet is present, active or not.
    IdlePresence,
    /// Only the viewer's own fleets are shown.
    OwnOnly,
}

impl Grant {
    pub fn is_full_view(self) -> bool {
        !matches!(self, Grant::OwnOnly)
    }
}

/// Apply referee allow-lists. Players pass through untouched.
pub fn prefilter(snapshot: &FleetSnapshot, viewer: &ViewerContext) -> FleetSnapshot {
    if !viewer.is_referee() {
        return snapshot.clone();
    }
    let filtered = FleetSnapshot::from_fleets(
        snapshot
            .iter()
            .filter(|f| {
                viewer
                    .faction_filter
                    .as_ref()
                    .map_or(true, |allowed| allowed.contains(&f.faction))
            })
            .filter(|f| {
                viewer
                    .world_filter
                    .as_ref()
                    .map_or(true, |allowed| allowed.contains(&f.world))
            })
            .cloned(),
    );
    if filtered.len() != snapshot.len() {
        log::debug!(
            "Referee filter kept {} of {} fleets",
            filtered.len(),
            snapshot.len()
        );
    }
    filtered
}

/// Decide which rule applies to `fleets` (all located at one world).
pub fn visibility_grant(
    fleets: &[FleetPresence],
    viewer: &ViewerContext,
    policy: &IntelPolicy,
) -> Grant {
    if viewer.is_referee() {
        return Grant::Referee;
    }
    let own: Vec<&FleetPresence> = fleets.iter().filter(|f| viewer.owns(f)).collect();
    if own
        .iter()
        .any(|f| f.action.is_active() && f.vehicle_count() > 0)
    {
        Grant::ActivePresence
    } else if !own.is_empty() && policy.idle_presence_grants_full_view {
        Grant::IdlePresence
    } else {
        Grant::OwnOnly
    }
}

/// Visible subset of the fleets at one world. Order is preserved.
pub fn resolve_visible(
    fleets: &[FleetPresence],
    viewer: &ViewerContext,
    policy: &IntelPolicy,
) -> Vec<FleetPresence> {
    if visibility_grant(fleets, viewer, policy).is_full_view() {
        fleets.to_vec()
    } else {
        fleets.iter().filter(|f| viewer.owns(f)).cloned().collect()
    }
}
