//! Built-in two-star map: Helios and Nyx.
//!
//! Angular speeds are radians per millisecond of orbital time.

use glam::DVec2;

use crate::belt::AsteroidBelt;
use crate::spec::{BodySpec, StarSystemSpec};

pub const HELIOS: &str = "Helios";
pub const NYX: &str = "Nyx";

pub fn helios() -> StarSystemSpec {
    StarSystemSpec {
        name: HELIOS.to_string(),
        origin: DVec2::new(-1400.0, 0.0),
        size: 42.0,
        color: "#ffd27f".to_string(),
        bodies: vec![
            BodySpec::planet("Cinder", 120.0, 0.00042, 8.0, "#c2643a"),
            BodySpec::planet("Aurelia", 220.0, 0.00028, 14.0, "#4f8fd8")
                .with_children(vec![BodySpec::moon("Lumen", 30.0, 0.0012, 4.0, "#d8d8d0")]),
            BodySpec::planet("Verdant", 340.0, 0.00019, 12.0, "#5aa65a").with_children(vec![
                BodySpec::moon("Pith", 26.0, 0.0015, 3.5, "#a09880"),
                BodySpec::moon("Sorrel", 42.0, 0.0009, 4.5, "#b07050"),
            ]),
            BodySpec::sector("Helios Reach I", 520.0, 0.4),
            BodySpec::sector("Helios Reach II", 520.0, 2.5),
            BodySpec::sector("Helios Reach III", 520.0, 4.6),
            BodySpec::planet("Caldera", 680.0, 0.00008, 20.0, "#d89a4f")
                .with_children(vec![BodySpec::moon("Ember", 38.0, 0.0007, 5.0, "#e05a30")]),
        ],
        belt: Some(AsteroidBelt {
            inner: 480.0,
            outer: 560.0,
            count: 600,
            angular_speed: 0.00006,
        }),
    }
}

pub fn nyx() -> StarSystemSpec {
    StarSystemSpec {
        name: NYX.to_string(),
        origin: DVec2::new(1500.0, 250.0),
        size: 34.0,
        color: "#9fb6ff".to_string(),
        bodies: vec![
            BodySpec::planet("Umbra", 180.0, 0.00036, 11.0, "#6a5acd")
                .with_children(vec![BodySpec::moon("Shade", 24.0, 0.0013, 3.5, "#8c8ca0")]),
            BodySpec::planet("Tessellate", 310.0, 0.00021, 13.0, "#3fb0a0"),
            BodySpec::sector("Nyx Drift I", 440.0, 1.2),
            BodySpec::sector("Nyx Drift II", 440.0, 3.9),
            BodySpec::planet("Halcyon", 560.0, 0.0001, 18.0, "#c0d0e0").with_children(vec![
                BodySpec::moon("Wisp", 32.0, 0.001, 4.0, "#e8e8ff"),
                BodySpec::moon("Gloam", 50.0, 0.0006, 5.0, "#706080"),
            ]),
        ],
        belt: Some(AsteroidBelt {
            inner: 400.0,
            outer: 470.0,
            count: 450,
            angular_speed: 0.00005,
        }),
    }
}

/// Both systems of the default map.
pub fn default_systems() -> Vec<StarSystemSpec> {
    vec![helios(), nyx()]
}
