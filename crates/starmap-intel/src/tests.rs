//! Tests for visibility rules, referee filtering, collapse grouping and manifest intel.

use starmap_core::enums::{Domain, FleetAction};
use starmap_core::fleets::*;
use starmap_core::state::DisplayEntry;
use starmap_core::types::{FactionId, FleetId, WorldId};

use crate::display::{build_display, resolve_world, visible_vehicles};
use crate::resolve::{prefilter, resolve_visible, visibility_grant, Grant, IntelPolicy};

fn fleet(id: u32, faction: u32, action: FleetAction, vehicles: u32) -> FleetPresence {
    FleetPresence {
        id: FleetId(id),
        faction: FactionId(faction),
        domain: Domain::Space,
        world: WorldId::new("Aurelia"),
        action,
        vehicles: if vehicles > 0 {
            vec![VehicleEntry {
                id: 100,
                count: vehicles,
            }]
        } else {
            Vec::new()
        },
        stealth: Stealth::Visible,
        manifest_hidden: false,
    }
}

fn world() -> Vec<FleetPresence> {
    vec![
        fleet(1, 1, FleetAction::Patrol, 3),
        fleet(2, 2, FleetAction::Idle, 5),
        fleet(3, 3, FleetAction::Battle, 2),
        fleet(4, 2, FleetAction::Refit, 1),
    ]
}

fn ids(fleets: &[FleetPresence]) -> Vec<u32> {
    fleets.iter().map(|f| f.id.0).collect()
}

// ---- Visibility rules ----

#[test]
fn test_referee_sees_everything() {
    let all = world();
    let visible = resolve_visible(&all, &ViewerContext::referee(), &IntelPolicy::default());
    assert_eq!(ids(&visible), vec![1, 2, 3, 4]);
}

#[test]
fn test_active_presence_grants_full_view() {
    let all = world();
    let viewer = ViewerContext::player(FactionId(1));
    let policy = IntelPolicy::default();
    assert_eq!(visibility_grant(&all, &viewer, &policy), Grant::ActivePresence);
    assert_eq!(resolve_visible(&all, &viewer, &policy).len(), 4);
}

#[test]
fn test_idle_presence_follows_policy() {
    let all = world();
    let viewer = ViewerContext::player(FactionId(2));

    let lenient = IntelPolicy::default();
    assert_eq!(visibility_grant(&all, &viewer, &lenient), Grant::IdlePresence);
    assert_eq!(resolve_visible(&all, &viewer, &lenient).len(), 4);

    let strict = IntelPolicy {
        idle_presence_grants_full_view: false,
    };
    assert_eq!(visibility_grant(&all, &viewer, &strict), Grant::OwnOnly);
    assert_eq!(ids(&resolve_visible(&all, &viewer, &strict)), vec![2, 4]);
}

#[test]
fn test_active_fleet_without_vehicles_does_not_count() {
    let all = vec![
        fleet(1, 1, FleetAction::Defense, 0),
        fleet(2, 2, FleetAction::Patrol, 4),
    ];
    let viewer = ViewerContext::player(FactionId(1));
    let strict = IntelPolicy {
        idle_presence_grants_full_view: false,
    };
    assert_eq!(ids(&resolve_visible(&all, &viewer, &strict)), vec![1]);
}

#[test]
fn test_absent_viewer_sees_nothing() {
    let all = world();
    let viewer = ViewerContext::player(FactionId(9));
    assert!(resolve_visible(&all, &viewer, &IntelPolicy::default()).is_empty());

    let spectator = ViewerContext::default();
    assert!(resolve_visible(&all, &spectator, &IntelPolicy::default()).is_empty());
}

#[test]
fn test_empty_world_is_no_presence() {
    let viewer = ViewerContext::player(FactionId(1));
    assert!(resolve_visible(&[], &viewer, &IntelPolicy::default()).is_empty());
    assert_eq!(
        visibility_grant(&[], &viewer, &IntelPolicy::default()),
        Grant::OwnOnly
    );
}

#[test]
fn test_referee_superset_of_every_player() {
    let all = world();
    let referee = resolve_visible(&all, &ViewerContext::referee(), &IntelPolicy::default());
    for policy in [
        IntelPolicy::default(),
        IntelPolicy {
            idle_presence_grants_full_view: false,
        },
    ] {
        for faction in 0..5 {
            let player = resolve_visible(&all, &ViewerContext::player(FactionId(faction)), &policy);
            for f in &player {
                assert!(referee.contains(f), "faction {faction} saw {} the referee did not", f.id.0);
            }
        }
    }
}

// ---- Referee prefilter ----

#[test]
fn test_prefilter_allow_lists() {
    let mut fleets = world();
    let mut elsewhere = fleet(5, 1, FleetAction::Idle, 1);
    elsewhere.world = WorldId::new("Umbra");
    fleets.push(elsewhere);
    let snapshot = FleetSnapshot::from_fleets(fleets);

    let viewer = ViewerContext {
        faction_filter: Some(vec![FactionId(1), FactionId(3)]),
        world_filter: Some(vec![WorldId::new("Aurelia")]),
        ..ViewerContext::referee()
    };
    let filtered = prefilter(&snapshot, &viewer);
    let mut kept: Vec<u32> = filtered.iter().map(|f| f.id.0).collect();
    kept.sort();
    assert_eq!(kept, vec![1, 3]);
}

#[test]
fn test_prefilter_ignores_player_lists() {
    let snapshot = FleetSnapshot::from_fleets(world());
    let viewer = ViewerContext {
        faction_filter: Some(vec![FactionId(1)]),
        ..ViewerContext::player(FactionId(1))
    };
    assert_eq!(prefilter(&snapshot, &viewer), snapshot);
}

// ---- Display grouping ----

#[test]
fn test_expanded_display_lists_every_fleet() {
    let all = world();
    let display = build_display(&all, &WorldId::new("Aurelia"), &CollapseSet::new());
    assert_eq!(display.len(), 4);
    // Grouped by faction: faction 2's fleets are adjacent.
    let order: Vec<u32> = display
        .iter()
        .map(|e| match e {
            DisplayEntry::Fleet { fleet } => fleet.id.0,
            DisplayEntry::Collapsed { .. } => 0,
        })
        .collect();
    assert_eq!(order, vec![1, 2, 4, 3]);
}

#[test]
fn test_collapsed_faction_folds_per_domain() {
    let mut all = world();
    let mut ground = fleet(6, 2, FleetAction::Defense, 7);
    ground.domain = Domain::Ground;
    all.push(ground);

    let aurelia = WorldId::new("Aurelia");
    let mut collapsed = CollapseSet::new();
    collapsed.toggle(FactionId(2), aurelia.clone());

    let display = build_display(&all, &aurelia, &collapsed);
    // Faction 1 (1 row), faction 2 (space + ground rows), faction 3 (1 row)
    assert_eq!(display.len(), 4);
    assert_eq!(
        display[1],
        DisplayEntry::Collapsed {
            faction: FactionId(2),
            domain: Domain::Space,
            fleet_count: 2,
            vehicle_count: 6,
            representative: FleetId(2),
        }
    );
    assert_eq!(
        display[2],
        DisplayEntry::Collapsed {
            faction: FactionId(2),
            domain: Domain::Ground,
            fleet_count: 1,
            vehicle_count: 7,
            representative: FleetId(6),
        }
    );
}

#[test]
fn test_collapse_keeps_full_visible_list() {
    let snapshot = FleetSnapshot::from_fleets(world());
    let aurelia = WorldId::new("Aurelia");
    let mut collapsed = CollapseSet::new();
    collapsed.toggle(FactionId(2), aurelia.clone());

    let view = resolve_world(
        &snapshot,
        &aurelia,
        &ViewerContext::referee(),
        &IntelPolicy::default(),
        &collapsed,
    );
    assert_eq!(view.visible.len(), 4);
    assert_eq!(view.display.len(), 3);
    assert_eq!(view.world, aurelia);
}

#[test]
fn test_collapse_on_other_world_has_no_effect() {
    let all = world();
    let mut collapsed = CollapseSet::new();
    collapsed.toggle(FactionId(2), WorldId::new("Umbra"));
    let display = build_display(&all, &WorldId::new("Aurelia"), &collapsed);
    assert_eq!(display.len(), 4);
}

#[test]
fn test_resolve_missing_world() {
    let snapshot = FleetSnapshot::from_fleets(world());
    let view = resolve_world(
        &snapshot,
        &WorldId::new("Nowhere"),
        &ViewerContext::referee(),
        &IntelPolicy::default(),
        &CollapseSet::new(),
    );
    assert!(view.visible.is_empty());
    assert!(view.display.is_empty());
}

// ---- Manifest intel ----

#[test]
fn test_resolve_world_withholds_stealthed_manifests() {
    let mut all = world();
    all[1].stealth = Stealth::Hidden;
    let snapshot = FleetSnapshot::from_fleets(all);
    let aurelia = WorldId::new("Aurelia");
    let mut collapsed = CollapseSet::new();
    collapsed.toggle(FactionId(2), aurelia.clone());

    let view = resolve_world(
        &snapshot,
        &aurelia,
        &ViewerContext::player(FactionId(1)),
        &IntelPolicy::default(),
        &collapsed,
    );
    assert_eq!(view.visible.len(), 4);
    let hidden = view.visible.iter().find(|f| f.id == FleetId(2)).unwrap();
    assert!(hidden.vehicles.is_empty());
    assert!(hidden.manifest_hidden);
    assert!(view
        .visible
        .iter()
        .filter(|f| f.id != FleetId(2))
        .all(|f| !f.manifest_hidden && !f.vehicles.is_empty()));
    assert_eq!(
        view.display[1],
        DisplayEntry::Collapsed {
            faction: FactionId(2),
            domain: Domain::Space,
            fleet_count: 2,
            vehicle_count: 1,
            representative: FleetId(2),
        }
    );
}

#[test]
fn test_manifest_visibility() {
    let mut f = fleet(1, 1, FleetAction::Patrol, 3);
    f.stealth = Stealth::HiddenFrom(vec![FactionId(2)]);

    assert!(visible_vehicles(&f, &ViewerContext::player(FactionId(1))).is_some());
    assert!(visible_vehicles(&f, &ViewerContext::referee()).is_some());
    assert!(visible_vehicles(&f, &ViewerContext::player(FactionId(2))).is_none());
    assert_eq!(
        visible_vehicles(&f, &ViewerContext::player(FactionId(3))).map(|v| v.len()),
        Some(1)
    );
    assert!(visible_vehicles(&f, &ViewerContext::default()).is_none());

    f.stealth = Stealth::Hidden;
    assert!(visible_vehicles(&f, &ViewerContext::player(FactionId(3))).is_none());
    assert!(visible_vehicles(&f, &ViewerContext::player(FactionId(1))).is_some());
}
