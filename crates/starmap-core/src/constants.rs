//! Simulation constants and tuning parameters.
//!
//! Distances are map units, durations are ticks unless stated otherwise.

/// Simulation tick rate (Hz). One animation frame = one tick.
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Camera ---

/// Per-tick easing factor from current toward target camera state.
pub const CAMERA_SMOOTHING: f64 = 0.1;

/// Zoom range while no body is focused.
pub const UNFOCUSED_ZOOM_MIN: f64 = 0.1;
pub const UNFOCUSED_ZOOM_MAX: f64 = 2.0;

/// Zoom range while a body is focused.
pub const FOCUSED_ZOOM_MIN: f64 = 1.0;
pub const FOCUSED_ZOOM_MAX: f64 = 8.0;

/// Zoom applied when a body is focused.
pub const FOCUS_DEFAULT_ZOOM: f64 = 3.0;

/// Default viewport size in screen pixels.
pub const DEFAULT_VIEWPORT_WIDTH: f64 = 1280.0;
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 720.0;

/// Extra world-space slack added to a body's size when picking by click.
pub const PICK_SLACK: f64 = 6.0;

// --- Frontier warning ---

/// Camera distance from the map origin beyond which the frontier warning arms.
pub const FRONTIER_DISTANCE: f64 = 4000.0;

/// How long the frontier message stays up (~4 seconds).
pub const FRONTIER_MESSAGE_TICKS: u64 = 240;

/// Default lifetime of other transient notices (~3 seconds).
pub const NOTICE_DEFAULT_TICKS: u64 = 180;

/// Messages shown when the camera drifts past the frontier.
pub const FRONTIER_MESSAGES: [&str; 5] = [
    "Here be dragons. Nothing charted past this point.",
    "Sensor returns fading. You are leaving known space.",
    "Navigation beacons out of range.",
    "The void stares back. Consider turning around.",
    "No stars, no fleets, no fuel depots. Just dark.",
];

// --- Orbits ---

/// Default time multiplier applied once per depth below planets.
pub const MOON_TIME_FACTOR: f64 = 0.5;

// --- Skirmish spawning ---

/// Maximum simultaneous skirmishes.
pub const MAX_CONCURRENT_SKIRMISHES: usize = 4;

/// Spawn cooldown while no skirmish is active (1.5 to 3 s).
pub const SPAWN_COOLDOWN_IDLE: (u32, u32) = (90, 180);

/// Spawn cooldown while at least one skirmish is active (0.1 to 0.3 s).
pub const SPAWN_COOLDOWN_BUSY: (u32, u32) = (6, 18);

/// Radius of the random offset between the anchor body and the arena center.
pub const ARENA_JITTER_RADIUS: f64 = 80.0;

// --- Skirmish movement ---

/// Local-frame distance of each participant's spawn pose from the arena center.
pub const PARTICIPANT_START_OFFSET: f64 = 220.0;

/// Local-frame distance of each approach anchor from the arena center.
pub const APPROACH_ANCHOR_OFFSET: f64 = 110.0;

/// Position easing during APPROACH.
pub const APPROACH_SMOOTHING: f64 = 0.06;

/// APPROACH ends after this many ticks even if the anchors were not reached.
pub const APPROACH_TICKS: u32 = 90;

/// APPROACH ends early once both participants are this close to their anchors.
pub const APPROACH_ARRIVAL_RADIUS: f64 = 5.0;

/// Phase-time rate for tactic curves: `t = timer * rate + phase_offset`.
pub const FIGHT_PHASE_RATE: f64 = 0.03;

/// Position easing during FIGHT.
pub const FIGHT_POSITION_SMOOTHING: f64 = 0.08;

/// Heading easing during FIGHT (applied to a wrapped angle difference).
pub const FIGHT_HEADING_SMOOTHING: f64 = 0.15;

/// Position easing during RETURN.
pub const RETURN_SMOOTHING: f64 = 0.05;

/// Default FIGHT duration under the ReturnToOrigin policy (~15 s).
pub const DEFAULT_FIGHT_TICKS: u32 = 900;

/// Default RETURN duration under the ReturnToOrigin policy (~2 s).
pub const DEFAULT_RETURN_TICKS: u32 = 120;

// --- Tactic extents (local-frame half sizes) ---

pub const FIGURE8_HALF_WIDTH: f64 = 90.0;
pub const FIGURE8_HALF_HEIGHT: f64 = 45.0;
pub const ORBIT_RADIUS: f64 = 70.0;
pub const DIVING_OVAL_HALF_WIDTH: f64 = 100.0;
pub const DIVING_OVAL_RISE: f64 = 30.0;
pub const DIVING_OVAL_DIVE: f64 = 70.0;
pub const SINE_WAVE_HALF_WIDTH: f64 = 110.0;
pub const SINE_WAVE_AMPLITUDE: f64 = 35.0;

// --- Firing ---

/// Per-side, per-tick chance of firing during FIGHT.
pub const FIRE_CHANCE: f64 = 0.08;

/// Chance that a shot is a torpedo salvo rather than a single laser.
pub const SALVO_CHANCE: f64 = 0.35;

/// Chance that a shot is a hit.
pub const HIT_CHANCE: f64 = 0.6;

/// Torpedoes per salvo (inclusive range).
pub const SALVO_SIZE: (u32, u32) = (3, 5);

/// Miss jitter radius around the target for torpedoes.
pub const TORPEDO_MISS_RADIUS: f64 = 40.0;

/// Miss jitter radius around the arena center for lasers.
pub const LASER_MISS_RADIUS: f64 = 60.0;

// --- Projectiles ---

pub const TORPEDO_INITIAL_SPEED: f64 = 1.5;

/// Speed multiplier applied every tick.
pub const TORPEDO_SPEED_GROWTH: f64 = 1.05;

/// Heading blend toward the destination per tick.
pub const TORPEDO_TURN_BLEND: f64 = 0.1;

/// Proximity at which a torpedo detonates.
pub const TORPEDO_DETONATION_RADIUS: f64 = 10.0;

/// Torpedo lifetime if it never reaches its destination.
pub const TORPEDO_LIFETIME: i32 = 150;

/// Half-angle of the random fan applied to a salvo's launch headings.
pub const TORPEDO_LAUNCH_SPREAD: f64 = 0.6;

pub const LASER_LIFETIME: i32 = 8;

// --- Particles ---

pub const EXPLOSION_LIFETIME: i32 = 15;
pub const EXPLOSION_RADIUS: f64 = 14.0;

/// Per-tick radius multiplier.
pub const EXPLOSION_DECAY: f64 = 0.9;

pub const DEBRIS_LIFETIME: i32 = 30;

/// Per-tick velocity multiplier.
pub const DEBRIS_DRAG: f64 = 0.92;

/// Sparks spawned alongside each explosion.
pub const DEBRIS_PER_BURST: u32 = 6;

pub const DEBRIS_MAX_SPEED: f64 = 3.0;
