//! Tests for tree construction, position update, lookup and picking.

use std::f64::consts::PI;

use glam::DVec2;

use starmap_core::enums::BodyKind;
use starmap_core::types::BodyId;
use starmap_core::SimError;

use crate::presets;
use crate::spec::{BodySpec, Motion, StarSystemSpec};
use crate::tree::{BodyTree, TreeError};

fn single_planet_system() -> StarSystemSpec {
    StarSystemSpec {
        name: "Sol".into(),
        origin: DVec2::ZERO,
        size: 20.0,
        color: "#fff".into(),
        bodies: vec![BodySpec::planet("Terra", 100.0, 0.001, 6.0, "#00f")],
        belt: None,
    }
}

fn assert_tree_invariant(tree: &BodyTree) {
    for body in tree.iter() {
        if let Some(parent) = body.parent {
            let p = tree.position(parent).unwrap();
            let d = body.current.distance(p);
            assert!(
                (d - body.dist).abs() < 1e-6,
                "{} is {} from its parent, expected {}",
                body.name,
                d,
                body.dist
            );
        }
    }
}

// ---- Scenario: idle orbit ----

#[test]
fn test_idle_orbit_scenario() {
    let mut tree = BodyTree::build(vec![single_planet_system()]).unwrap();
    let terra = tree.find_by_name("Terra").unwrap();

    tree.update_positions(0.0);
    let p = tree.position(terra).unwrap();
    assert!((p - DVec2::new(100.0, 0.0)).length() < 1e-9);

    tree.update_positions(PI / 0.001);
    let p = tree.position(terra).unwrap();
    assert!((p - DVec2::new(-100.0, 0.0)).length() < 1e-6, "got {p:?}");
}

// ---- Tree invariant ----

#[test]
fn test_tree_invariant_over_many_ticks() {
    let mut tree = BodyTree::build(presets::default_systems()).unwrap();
    let mut time = 0.0;
    for _ in 0..500 {
        time += 16.6667 * 7.0;
        assert_eq!(tree.update_positions(time), 0);
        assert_tree_invariant(&tree);
    }
}

#[test]
fn test_tree_invariant_without_damping() {
    let mut tree = BodyTree::build(presets::default_systems()).unwrap();
    tree.set_moon_time_factor(1.0);
    tree.update_positions(98_765.0);
    assert_tree_invariant(&tree);
}

#[test]
fn test_roots_sit_at_system_origin() {
    let mut tree = BodyTree::build(presets::default_systems()).unwrap();
    tree.update_positions(5000.0);
    for system in tree.systems() {
        assert_eq!(tree.position(system.root), Some(system.origin));
        assert!(tree.get(system.root).unwrap().is_root());
    }
    assert_eq!(tree.roots().count(), 2);
}

// ---- Motion ----

#[test]
fn test_belt_sectors_do_not_revolve() {
    let mut tree = BodyTree::build(presets::default_systems()).unwrap();
    let sectors: Vec<BodyId> = tree
        .iter()
        .filter(|b| b.has_fixed_angle() && !b.is_root())
        .map(|b| b.id)
        .collect();
    assert!(!sectors.is_empty());
    for id in &sectors {
        assert_eq!(tree.get(*id).unwrap().kind, BodyKind::BeltSector);
    }

    tree.update_positions(0.0);
    let before: Vec<DVec2> = sectors.iter().map(|id| tree.position(*id).unwrap()).collect();
    tree.update_positions(1_000_000.0);
    let after: Vec<DVec2> = sectors.iter().map(|id| tree.position(*id).unwrap()).collect();
    for (a, b) in before.iter().zip(&after) {
        assert!((*a - *b).length() < 1e-9);
    }
}

#[test]
fn test_moon_time_damping() {
    let spec = StarSystemSpec {
        bodies: vec![BodySpec::planet("Terra", 100.0, 0.0, 6.0, "#00f")
            .with_children(vec![BodySpec::moon("Luna", 10.0, 0.001, 2.0, "#ccc")])],
        ..single_planet_system()
    };
    let mut tree = BodyTree::build(vec![spec]).unwrap();
    tree.set_moon_time_factor(0.5);
    let luna = tree.find_by_name("Luna").unwrap();

    // At half speed, time = 2π/0.001 brings Luna only halfway round.
    tree.update_positions(PI * 2.0 / 0.001);
    let offset = tree.position(luna).unwrap() - DVec2::new(100.0, 0.0);
    assert!((offset - DVec2::new(-10.0, 0.0)).length() < 1e-6, "got {offset:?}");
}

#[test]
fn test_motion_phase_offset() {
    let m = Motion::Revolving {
        angular_speed: 0.5,
        phase: 1.0,
    };
    assert!((m.angle_at(2.0) - 2.0).abs() < 1e-12);
    assert!(!m.has_fixed_angle());
    assert!(Motion::Fixed { angle: 3.0 }.has_fixed_angle());
}

// ---- Construction errors ----

#[test]
fn test_empty_spec_rejected() {
    assert_eq!(BodyTree::build(vec![]).unwrap_err(), TreeError::NoSystems);
}

#[test]
fn test_zero_distance_rejected() {
    let spec = StarSystemSpec {
        bodies: vec![BodySpec::planet("Flat", 0.0, 0.001, 6.0, "#00f")],
        ..single_planet_system()
    };
    assert_eq!(
        BodyTree::build(vec![spec]).unwrap_err(),
        TreeError::ZeroDistance("Flat".into())
    );
}

#[test]
fn test_duplicate_name_rejected() {
    let spec = StarSystemSpec {
        bodies: vec![
            BodySpec::planet("Twin", 50.0, 0.001, 6.0, "#00f"),
            BodySpec::planet("Twin", 80.0, 0.001, 6.0, "#00f"),
        ],
        ..single_planet_system()
    };
    let err = BodyTree::build(vec![spec]).unwrap_err();
    assert_eq!(err, TreeError::DuplicateName("Twin".into()));
    let sim_err: SimError = err.into();
    assert!(matches!(sim_err, SimError::InvalidTree(_)));
}

#[test]
fn test_non_finite_rejected() {
    let spec = StarSystemSpec {
        bodies: vec![BodySpec::planet("Bad", 50.0, f64::NAN, 6.0, "#00f")],
        ..single_planet_system()
    };
    assert_eq!(
        BodyTree::build(vec![spec]).unwrap_err(),
        TreeError::NonFinite("Bad".into())
    );
}

#[test]
fn test_non_finite_time_pins_to_parent() {
    let mut tree = BodyTree::build(vec![single_planet_system()]).unwrap();
    assert_eq!(tree.update_positions(f64::INFINITY), 1);
    let terra = tree.find_by_name("Terra").unwrap();
    assert_eq!(tree.position(terra), Some(DVec2::ZERO));
}

// ---- Lookup ----

#[test]
fn test_topology_lookup() {
    let tree = BodyTree::build(presets::default_systems()).unwrap();
    let verdant = tree.find_by_name("Verdant").unwrap();
    let helios = tree.find_by_name(presets::HELIOS).unwrap();
    assert_eq!(tree.parent(verdant), Some(helios));
    assert_eq!(tree.children(verdant).len(), 2);
    assert!(tree.children(helios).contains(&verdant));
    assert_eq!(tree.get(verdant).unwrap().depth, 1);

    let sub = tree.subtree(verdant);
    assert_eq!(sub.len(), 3);
    assert_eq!(sub[0], verdant);

    assert!(tree.find_by_name("Nowhere").is_none());
    assert!(matches!(tree.require("Nowhere"), Err(SimError::UnknownBody(_))));
}

#[test]
fn test_pre_order_layout() {
    let tree = BodyTree::build(presets::default_systems()).unwrap();
    for body in tree.iter() {
        if let Some(parent) = body.parent {
            assert!(parent.0 < body.id.0);
        }
    }
}

#[test]
fn test_pick_nearest_body() {
    let mut tree = BodyTree::build(vec![single_planet_system()]).unwrap();
    tree.update_positions(0.0);
    let terra = tree.find_by_name("Terra").unwrap();
    let sol = tree.find_by_name("Sol").unwrap();

    assert_eq!(tree.pick(DVec2::new(103.0, 2.0), 0.0), Some(terra));
    assert_eq!(tree.pick(DVec2::new(5.0, 5.0), 0.0), Some(sol));
    assert_eq!(tree.pick(DVec2::new(50.0, 0.0), 6.0), None);
    assert_eq!(tree.pick(DVec2::new(111.0, 0.0), 6.0), Some(terra));
    assert_eq!(tree.pick(DVec2::new(f64::NAN, 0.0), 6.0), None);
}

// ---- Serde ----

#[test]
fn test_system_spec_from_json() {
    let json = r##"{
        "name": "Kestrel",
        "origin": [10.0, -20.0],
        "size": 30.0,
        "color": "#ffeeaa",
        "bodies": [
            {
                "name": "Rook",
                "kind": "Planet",
                "dist": 150.0,
                "motion": {"type": "Revolving", "angular_speed": 0.0002},
                "size": 9.0,
                "color": "#aa8866",
                "children": [
                    {"name": "Pawn", "kind": "Moon", "dist": 20.0,
                     "motion": {"type": "Revolving", "angular_speed": 0.001},
                     "size": 3.0, "color": "#999"}
                ]
            },
            {"name": "Gate", "kind": "BeltSector", "dist": 300.0,
             "motion": {"type": "Fixed", "angle": 1.5}, "size": 8.0, "color": "#777"}
        ],
        "belt": {"inner": 280.0, "outer": 320.0, "count": 100, "angular_speed": 0.00005}
    }"##;
    let spec: StarSystemSpec = serde_json::from_str(json).unwrap();
    let mut tree = BodyTree::build(vec![spec]).unwrap();
    tree.update_positions(0.0);
    assert_eq!(tree.len(), 4);
    let gate = tree.find_by_name("Gate").unwrap();
    assert!(tree.get(gate).unwrap().has_fixed_angle());
    assert!(tree.systems()[0].belt.is_some());
    assert_tree_invariant(&tree);
}
