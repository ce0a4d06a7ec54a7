//! Serde-loadable star system descriptions.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use starmap_core::enums::BodyKind;

use crate::belt::AsteroidBelt;

/// How a body moves around its parent. A body either revolves or sits at a
/// fixed angle, never both.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Motion {
    /// Angle grows with time: `time * angular_speed + phase` (radians per ms).
    Revolving {
        angular_speed: f64,
        #[serde(default)]
        phase: f64,
    },
    /// Belt sectors and other stationary markers.
    Fixed { angle: f64 },
}

impl Motion {
    pub fn revolving(angular_speed: f64) -> Self {
        Motion::Revolving {
            angular_speed,
            phase: 0.0,
        }
    }

    pub fn has_fixed_angle(&self) -> bool {
        matches!(self, Motion::Fixed { .. })
    }

    /// Orbital angle at `time`.
    pub fn angle_at(&self, time: f64) -> f64 {
        match *self {
            Motion::Revolving {
                angular_speed,
                phase,
            } => time * angular_speed + phase,
            Motion::Fixed { angle } => angle,
        }
    }

    pub fn is_finite(&self) -> bool {
        match *self {
            Motion::Revolving {
                angular_speed,
                phase,
            } => angular_speed.is_finite() && phase.is_finite(),
            Motion::Fixed { angle } => angle.is_finite(),
        }
    }
}

/// A non-root body and its satellites.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodySpec {
    pub name: String,
    pub kind: BodyKind,
    /// Orbital radius around the parent. Must be positive.
    pub dist: f64,
    pub motion: Motion,
    pub size: f64,
    pub color: String,
    #[serde(default)]
    pub children: Vec<BodySpec>,
}

/// One star system: a root star at `origin`, its bodies and an optional belt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StarSystemSpec {
    pub name: String,
    #[serde(default)]
    pub origin: DVec2,
    pub size: f64,
    pub color: String,
    #[serde(default)]
    pub bodies: Vec<BodySpec>,
    #[serde(default)]
    pub belt: Option<AsteroidBelt>,
}

impl BodySpec {
    pub fn planet(name: &str, dist: f64, angular_speed: f64, size: f64, color: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: BodyKind::Planet,
            dist,
            motion: Motion::revolving(angular_speed),
            size,
            color: color.to_string(),
            children: Vec::new(),
        }
    }

    pub fn moon(name: &str, dist: f64, angular_speed: f64, size: f64, color: &str) -> Self {
        Self {
            kind: BodyKind::Moon,
            ..Self::planet(name, dist, angular_speed, size, color)
        }
    }

    pub fn sector(name: &str, dist: f64, angle: f64) -> Self {
        Self {
            name: name.to_string(),
            kind: BodyKind::BeltSector,
            dist,
            motion: Motion::Fixed { angle },
            size: 10.0,
            color: "#8a8070".to_string(),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<BodySpec>) -> Self {
        self.children = children;
        self
    }
}
