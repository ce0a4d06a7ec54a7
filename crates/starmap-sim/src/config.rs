//! Engine configuration.
//!
//! Every section defaults independently, so a JSON file only needs the
//! fields it overrides. `SimConfig::repaired` replaces out-of-range values
//! with working ones before the engine uses them.

use serde::{Deserialize, Serialize};

use starmap_battle::fire::FireChances;
use starmap_core::constants::*;
use starmap_core::enums::TerminationPolicy;
use starmap_core::state::Viewport;
use starmap_intel::IntelPolicy;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Initial orbital time scale (1.0 = normal).
    pub time_scale: f64,
    pub camera: CameraConfig,
    pub orbits: OrbitConfig,
    pub skirmish: SkirmishConfig,
    pub intel: IntelPolicy,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            camera: CameraConfig::default(),
            orbits: OrbitConfig::default(),
            skirmish: SkirmishConfig::default(),
            intel: IntelPolicy::default(),
        }
    }
}

/// Inclusive zoom bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomRange {
    pub min: f64,
    pub max: f64,
}

impl ZoomRange {
    /// Clamp into the range. Never panics, even on an unrepaired range.
    pub fn clamp(&self, zoom: f64) -> f64 {
        zoom.max(self.min).min(self.max)
    }

    pub fn contains(&self, zoom: f64) -> bool {
        zoom >= self.min && zoom <= self.max
    }

    /// Swap inverted bounds; fall back when either bound is not a positive
    /// finite zoom.
    fn repaired(self, name: &str, fallback: ZoomRange) -> ZoomRange {
        let usable = |z: f64| z.is_finite() && z > 0.0;
        if !usable(self.min) || !usable(self.max) {
            log::warn!("Config {name} {:?} is not usable; using {:?}", self, fallback);
            return fallback;
        }
        if self.min > self.max {
            log::warn!("Config {name} bounds are inverted; swapping");
            return ZoomRange {
                min: self.max,
                max: self.min,
            };
        }
        self
    }
}

fn repair(name: &str, value: f64, valid: impl Fn(f64) -> bool, fallback: f64) -> f64 {
    if value.is_finite() && valid(value) {
        value
    } else {
        log::warn!("Config {name} = {value} is out of range; using {fallback}");
        fallback
    }
}

fn probability(name: &str, value: f64, fallback: f64) -> f64 {
    repair(name, value, |p| (0.0..=1.0).contains(&p), fallback)
}

impl SimConfig {
    /// Copy with every numeric field usable by the engine.
    pub fn repaired(mut self) -> Self {
        let defaults = SimConfig::default();
        self.time_scale = repair(
            "time_scale",
            self.time_scale,
            |t| t >= 0.0,
            defaults.time_scale,
        );

        let camera = &mut self.camera;
        let cam = &defaults.camera;
        camera.smoothing = repair(
            "camera.smoothing",
            camera.smoothing,
            |a| a > 0.0 && a <= 1.0,
            cam.smoothing,
        );
        camera.unfocused_zoom = camera
            .unfocused_zoom
            .repaired("camera.unfocused_zoom", cam.unfocused_zoom);
        camera.focused_zoom = camera
            .focused_zoom
            .repaired("camera.focused_zoom", cam.focused_zoom);
        let focused = camera.focused_zoom;
        camera.focus_zoom = focused.clamp(repair(
            "camera.focus_zoom",
            camera.focus_zoom,
            |z| z > 0.0,
            cam.focus_zoom,
        ));
        camera.frontier_distance = repair(
            "camera.frontier_distance",
            camera.frontier_distance,
            |d| d > 0.0,
            cam.frontier_distance,
        );

        self.orbits.moon_time_factor = repair(
            "orbits.moon_time_factor",
            self.orbits.moon_time_factor,
            |f| f >= 0.0,
            defaults.orbits.moon_time_factor,
        );

        let skirmish = &mut self.skirmish;
        let sk = &defaults.skirmish;
        skirmish.fire_chance =
            probability("skirmish.fire_chance", skirmish.fire_chance, sk.fire_chance);
        skirmish.salvo_chance =
            probability("skirmish.salvo_chance", skirmish.salvo_chance, sk.salvo_chance);
        skirmish.hit_chance =
            probability("skirmish.hit_chance", skirmish.hit_chance, sk.hit_chance);
        skirmish.arena_jitter = repair(
            "skirmish.arena_jitter",
            skirmish.arena_jitter,
            |r| r >= 0.0,
            sk.arena_jitter,
        );
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Per-tick easing factor toward the target.
    pub smoothing: f64,
    pub unfocused_zoom: ZoomRange,
    pub focused_zoom: ZoomRange,
    /// Zoom applied when a body is focused.
    pub focus_zoom: f64,
    /// Distance from the origin past which the frontier warning arms.
    pub frontier_distance: f64,
    pub frontier_message_ticks: u64,
    pub viewport: Viewport,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            smoothing: CAMERA_SMOOTHING,
            unfocused_zoom: ZoomRange {
                min: UNFOCUSED_ZOOM_MIN,
                max: UNFOCUSED_ZOOM_MAX,
            },
            focused_zoom: ZoomRange {
                min: FOCUSED_ZOOM_MIN,
                max: FOCUSED_ZOOM_MAX,
            },
            focus_zoom: FOCUS_DEFAULT_ZOOM,
            frontier_distance: FRONTIER_DISTANCE,
            frontier_message_ticks: FRONTIER_MESSAGE_TICKS,
            viewport: Viewport::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    /// Time multiplier applied once per depth below planets.
    pub moon_time_factor: f64,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            moon_time_factor: MOON_TIME_FACTOR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkirmishConfig {
    pub max_concurrent: usize,
    /// Spawn cooldown range (ticks) while no skirmish is active.
    pub idle_cooldown: (u32, u32),
    /// Spawn cooldown range (ticks) while any skirmish is active.
    pub busy_cooldown: (u32, u32),
    pub termination: TerminationPolicy,
    pub fire_chance: f64,
    pub salvo_chance: f64,
    pub hit_chance: f64,
    pub arena_jitter: f64,
}

impl Default for SkirmishConfig {
    fn default() -> Self {
        Self {
            max_concurrent: MAX_CONCURRENT_SKIRMISHES,
            idle_cooldown: SPAWN_COOLDOWN_IDLE,
            busy_cooldown: SPAWN_COOLDOWN_BUSY,
            termination: TerminationPolicy::default(),
            fire_chance: FIRE_CHANCE,
            salvo_chance: SALVO_CHANCE,
            hit_chance: HIT_CHANCE,
            arena_jitter: ARENA_JITTER_RADIUS,
        }
    }
}

impl SkirmishConfig {
    pub fn fire_chances(&self) -> FireChances {
        FireChances {
            fire: self.fire_chance,
            salvo: self.salvo_chance,
            hit: self.hit_chance,
        }
    }
}
