//! Display grouping and per-vehicle intel.

use std::collections::BTreeMap;

use starmap_core::enums::Domain;
use starmap_core::fleets::{
    CollapseSet, FleetPresence, FleetSnapshot, Stealth, VehicleEntry, ViewerContext,
};
use starmap_core::state::{DisplayEntry, WorldFleetView};
use starmap_core::types::{FactionId, WorldId};

use crate::resolve::{resolve_visible, IntelPolicy};

/// Fleets keyed by faction, in faction order.
pub fn group_by_faction(fleets: &[FleetPresence]) -> BTreeMap<FactionId, Vec<&FleetPresence>> {
    let mut groups: BTreeMap<FactionId, Vec<&FleetPresence>> = BTreeMap::new();
    for fleet in fleets {
        groups.entry(fleet.faction).or_default().push(fleet);
    }
    groups
}

/// Display rows for the visible fleets at `world`.
///
/// A collapsed faction contributes at most one row per domain, space first.
pub fn build_display(
    visible: &[FleetPresence],
    world: &WorldId,
    collapsed: &CollapseSet,
) -> Vec<DisplayEntry> {
    let mut entries = Vec::with_capacity(visible.len());
    for (faction, fleets) in group_by_faction(visible) {
        if !collapsed.is_collapsed(faction, world) {
            entries.extend(fleets.into_iter().map(|f| DisplayEntry::Fleet { fleet: f.clone() }));
            continue;
        }
        for domain in [Domain::Space, Domain::Ground] {
            let members: Vec<&FleetPresence> =
                fleets.iter().copied().filter(|f| f.domain == domain).collect();
            let Some(first) = members.first() else {
                continue;
            };
            entries.push(DisplayEntry::Collapsed {
                faction,
                domain,
                fleet_count: members.len() as u32,
                vehicle_count: members
                    .iter()
                    .fold(0u32, |acc, f| acc.saturating_add(f.vehicle_count())),
                representative: first.id,
            });
        }
    }
    entries
}

/// Resolve one world: visible fleets for hit-testing plus display rows.
///
/// `fleets` should already have passed through `prefilter`. Manifests the
/// viewer may not read are withheld before grouping, so collapsed vehicle
/// counts only sum readable lists. Faction colors are left empty for the
/// caller to fill.
pub fn resolve_world(
    fleets: &FleetSnapshot,
    world: &WorldId,
    viewer: &ViewerContext,
    policy: &IntelPolicy,
    collapsed: &CollapseSet,
) -> WorldFleetView {
    let present = fleets.fleets_at(world);
    let visible: Vec<FleetPresence> = resolve_visible(&present, viewer, policy)
        .into_iter()
        .map(|fleet| redact_manifest(fleet, viewer))
        .collect();
    let display = build_display(&visible, world, collapsed);
    WorldFleetView {
        world: world.clone(),
        visible,
        display,
        colors: Vec::new(),
    }
}

/// The vehicle manifest of `fleet` as `viewer` may read it.
///
/// Owners and referees always read it. Anyone else reads it unless the
/// fleet is stealthed for them; a viewer without a faction only reads
/// fully visible manifests.
pub fn visible_vehicles<'a>(
    fleet: &'a FleetPresence,
    viewer: &ViewerContext,
) -> Option<&'a [VehicleEntry]> {
    if viewer.is_referee() || viewer.owns(fleet) {
        return Some(&fleet.vehicles);
    }
    let hidden = match viewer.faction {
        Some(faction) => fleet.is_stealthed_for(faction),
        None => fleet.stealth != Stealth::Visible,
    };
    if hidden {
        None
    } else {
        Some(&fleet.vehicles)
    }
}

/// `fleet` with its manifest emptied and flagged when `viewer` may not read it.
pub fn redact_manifest(mut fleet: FleetPresence, viewer: &ViewerContext) -> FleetPresence {
    if visible_vehicles(&fleet, viewer).is_none() {
        fleet.vehicles.clear();
        fleet.manifest_hidden = true;
    }
    fleet
}
