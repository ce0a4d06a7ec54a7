//! Scene snapshot: the complete renderable state handed off after each tick.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SceneEvent;
use crate::fleets::FleetPresence;
use crate::types::{BodyId, FactionId, FleetId, Pose, SimTime, WorldId};

/// Camera position and scale. Two live instances exist: current and target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

/// Screen size in pixels, used for screen/world conversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: crate::constants::DEFAULT_VIEWPORT_WIDTH,
            height: crate::constants::DEFAULT_VIEWPORT_HEIGHT,
        }
    }
}

impl CameraState {
    pub fn new(x: f64, y: f64, zoom: f64) -> Self {
        Self { x, y, zoom }
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Distance of the camera center from the map origin.
    pub fn distance_from_origin(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Convert a screen pixel to a world coordinate.
    pub fn screen_to_world(&self, viewport: &Viewport, screen: DVec2) -> DVec2 {
        let half = DVec2::new(viewport.width, viewport.height) * 0.5;
        (screen - half) / self.zoom + self.center()
    }

    /// Convert a world coordinate to a screen pixel.
    pub fn world_to_screen(&self, viewport: &Viewport, world: DVec2) -> DVec2 {
        let half = DVec2::new(viewport.width, viewport.height) * 0.5;
        (world - self.center()) * self.zoom + half
    }
}

/// Complete scene state broadcast to the renderer after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub time: SimTime,
    pub phase: SimPhase,
    pub camera: CameraView,
    pub bodies: Vec<BodyView>,
    pub belts: Vec<BeltView>,
    pub worlds: Vec<WorldFleetView>,
    pub skirmishes: Vec<SkirmishView>,
    /// Currently displayed transient message.
    pub notice: Option<String>,
    pub events: Vec<SceneEvent>,
}

/// Camera status for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CameraView {
    pub current: CameraState,
    pub target: CameraState,
    pub viewport: Viewport,
    pub focus: Option<BodyId>,
    pub zoom_min: f64,
    pub zoom_max: f64,
    pub frontier_armed: bool,
}

/// One orbital body with its fresh position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyView {
    pub id: BodyId,
    pub name: String,
    pub kind: BodyKind,
    pub parent: Option<BodyId>,
    pub x: f64,
    pub y: f64,
    /// Orbital radius around the parent.
    pub dist: f64,
    pub size: f64,
    pub color: String,
    pub fixed_angle: bool,
}

/// Asteroid belt descriptor. Individual asteroids are derived by the
/// renderer from the belt's pure position function, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeltView {
    pub star: BodyId,
    pub inner: f64,
    pub outer: f64,
    pub count: u32,
    pub angular_speed: f64,
}

/// Resolved fleets at one world.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldFleetView {
    pub world: WorldId,
    /// Full visible list, kept for hit-testing and interaction.
    pub visible: Vec<FleetPresence>,
    /// Display list after collapse grouping.
    pub display: Vec<DisplayEntry>,
    /// Display color per faction present in `visible`.
    pub colors: Vec<FactionColor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactionColor {
    pub faction: FactionId,
    pub color: String,
}

/// One row of a world's fleet display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DisplayEntry {
    /// A single fleet shown individually.
    Fleet { fleet: FleetPresence },
    /// A faction's fleets of one domain folded into one row.
    Collapsed {
        faction: FactionId,
        domain: Domain,
        fleet_count: u32,
        vehicle_count: u32,
        representative: FleetId,
    },
}

/// A live battle zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkirmishView {
    pub id: u32,
    pub world: WorldId,
    pub phase: SkirmishPhase,
    pub center: DVec2,
    pub rotation: f64,
    pub attacker: ParticipantView,
    pub defender: ParticipantView,
    pub torpedoes: Vec<TorpedoView>,
    pub lasers: Vec<LaserView>,
    pub explosions: Vec<ExplosionView>,
    pub debris: Vec<DebrisView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantView {
    pub fleet: FleetId,
    pub faction: FactionId,
    pub color: String,
    pub tactic: Tactic,
    pub pose: Pose,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TorpedoView {
    pub pos: DVec2,
    pub heading: f64,
    pub life: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaserView {
    pub from: DVec2,
    pub to: DVec2,
    pub hit: bool,
    pub life: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplosionView {
    pub pos: DVec2,
    pub radius: f64,
    pub life: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebrisView {
    pub pos: DVec2,
    pub life: i32,
}
