//! Simulation engine: the per-tick orchestrator of the star map.
//!
//! `SimulationEngine` owns the body tree, camera, notices, intel inputs,
//! the skirmish registry and the hecs world holding projectiles and
//! particles. It processes viewer commands, runs every system in a fixed
//! order, and produces `SceneSnapshot`s. Completely headless, so the same
//! seed and inputs always give the same snapshots.

use std::collections::{BTreeMap, VecDeque};

use glam::DVec2;
use hecs::World;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use starmap_core::commands::ViewCommand;
use starmap_core::constants::*;
use starmap_core::enums::{EndReason, SimPhase};
use starmap_core::events::SceneEvent;
use starmap_core::fleets::{CollapseSet, FleetSnapshot, ViewerContext};
use starmap_core::state::{SceneSnapshot, WorldFleetView};
use starmap_core::types::{BodyId, SimTime, WorldId};
use starmap_core::SimError;
use starmap_orbits::{presets, BodyTree, StarSystemSpec};

use crate::camera::CameraController;
use crate::config::SimConfig;
use crate::notice::NoticeBoard;
use crate::palette::{FactionPalette, StaticPalette};
use crate::skirmish::{Skirmish, SkirmishStats};
use crate::systems;
use crate::systems::spawner::{SpawnSite, SpawnTimer};

/// Upper bound accepted by `SetTimeScale`.
const MAX_TIME_SCALE: f64 = 8.0;

/// The simulation engine. Owns the ECS world and all scene state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    /// Counts every tick, paused or not. Notice timers run on it.
    frame: u64,
    phase: SimPhase,
    time_scale: f64,
    /// Orbital clock in milliseconds; only advances while running.
    orbit_time: f64,
    rng: ChaCha8Rng,
    config: SimConfig,
    command_queue: VecDeque<ViewCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<SceneEvent>,

    bodies: BodyTree,
    camera: CameraController,
    notices: NoticeBoard,

    fleets: FleetSnapshot,
    viewer: ViewerContext,
    collapsed: CollapseSet,
    palette: Box<dyn FactionPalette>,
    world_views: Vec<WorldFleetView>,

    skirmishes: BTreeMap<u32, Skirmish>,
    next_skirmish_id: u32,
    spawn_timer: SpawnTimer,
    stats: SkirmishStats,
}

impl SimulationEngine {
    /// Create an engine over the built-in two-system map.
    pub fn new(config: SimConfig) -> Self {
        let tree = match BodyTree::build(presets::default_systems()) {
            Ok(tree) => tree,
            Err(err) => {
                log::error!("Preset map rejected: {}; starting with an empty map", err);
                BodyTree::default()
            }
        };
        Self::from_tree(config, tree)
    }

    /// Create an engine over custom star systems.
    pub fn with_systems(config: SimConfig, specs: Vec<StarSystemSpec>) -> Result<Self, SimError> {
        let tree = BodyTree::build(specs)?;
        Ok(Self::from_tree(config, tree))
    }

    fn from_tree(config: SimConfig, mut bodies: BodyTree) -> Self {
        let config = config.repaired();
        bodies.set_moon_time_factor(config.orbits.moon_time_factor);
        bodies.update_positions(0.0);
        let time_scale = if config.time_scale.is_finite() {
            config.time_scale.clamp(0.0, MAX_TIME_SCALE)
        } else {
            1.0
        };
        log::info!(
            "Engine ready: {} bodies in {} systems, seed {}",
            bodies.len(),
            bodies.systems().len(),
            config.seed
        );
        Self {
            world: World::new(),
            time: SimTime::default(),
            frame: 0,
            phase: SimPhase::default(),
            time_scale,
            orbit_time: 0.0,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            camera: CameraController::new(config.camera.clone()),
            bodies,
            notices: NoticeBoard::new(),
            fleets: FleetSnapshot::new(),
            viewer: ViewerContext::default(),
            collapsed: CollapseSet::new(),
            palette: Box::new(StaticPalette::new()),
            world_views: Vec::new(),
            skirmishes: BTreeMap::new(),
            next_skirmish_id: 0,
            spawn_timer: SpawnTimer::default(),
            stats: SkirmishStats::default(),
            config,
        }
    }

    /// Queue a viewer command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: ViewCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = ViewCommand>) {
        self.command_queue.extend(commands);
    }

    /// Replace the externally supplied fleet data.
    pub fn set_fleet_snapshot(&mut self, fleets: FleetSnapshot) {
        self.fleets = fleets;
    }

    pub fn set_palette(&mut self, palette: Box<dyn FactionPalette>) {
        self.palette = palette;
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> SceneSnapshot {
        self.process_commands();
        self.frame += 1;

        let running = self.phase == SimPhase::Running;
        if running {
            self.time.advance();
            self.orbit_time += DT * 1000.0 * self.time_scale;
        }

        self.update_camera();
        self.notices.tick(self.frame, &mut self.events);

        if running {
            let repaired = self.bodies.update_positions(self.orbit_time);
            if repaired > 0 {
                log::debug!("Repaired {} body positions at tick {}", repaired, self.time.tick);
            }
        }

        self.resolve_intel();

        let focus = self.camera.focus();
        for id in systems::spawner::unfocused(&self.skirmishes, focus) {
            self.retire_skirmish(id, EndReason::FocusLost);
        }

        if running {
            self.run_skirmish_systems();
        }
        systems::cleanup::run(&mut self.world, &self.skirmishes, &mut self.despawn_buffer);

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            self.camera.view(),
            &self.bodies,
            &self.world_views,
            &self.skirmishes,
            self.palette.as_ref(),
            self.notices.text(),
            events,
        )
    }

    /// Get the current phase.
    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Orbital clock in milliseconds.
    pub fn orbit_time(&self) -> f64 {
        self.orbit_time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn bodies(&self) -> &BodyTree {
        &self.bodies
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    pub fn viewer(&self) -> &ViewerContext {
        &self.viewer
    }

    pub fn fleets(&self) -> &FleetSnapshot {
        &self.fleets
    }

    /// Per-world intel results from the last tick.
    pub fn world_views(&self) -> &[WorldFleetView] {
        &self.world_views
    }

    pub fn skirmishes(&self) -> &BTreeMap<u32, Skirmish> {
        &self.skirmishes
    }

    pub fn stats(&self) -> &SkirmishStats {
        &self.stats
    }

    #[cfg(test)]
    pub(crate) fn skirmishes_mut(&mut self) -> &mut BTreeMap<u32, Skirmish> {
        &mut self.skirmishes
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single viewer command.
    fn handle_command(&mut self, command: ViewCommand) {
        match command {
            ViewCommand::Pan { dx, dy } => {
                if self.camera.pan_by_screen(dx, dy) {
                    self.events.push(SceneEvent::FocusChanged { body: None });
                }
            }
            ViewCommand::ZoomAt {
                factor,
                screen_x,
                screen_y,
            } => {
                self.camera.zoom_at(factor, screen_x, screen_y);
            }
            ViewCommand::SetCameraTarget { x, y, zoom } => {
                self.camera.set_target(x, y, zoom);
            }
            ViewCommand::SetViewport { width, height } => {
                self.camera.set_viewport(width, height);
            }
            ViewCommand::FocusBody { name } => match self.bodies.require(&name) {
                Ok(body) => self.set_focus(body),
                Err(err) => log::warn!("Focus request ignored: {}", err),
            },
            ViewCommand::ClearFocus => {
                if self.camera.clear_focus() {
                    self.events.push(SceneEvent::FocusChanged { body: None });
                }
            }
            ViewCommand::SelectAt { screen_x, screen_y } => {
                let point = self.camera.screen_to_world(DVec2::new(screen_x, screen_y));
                let zoom = self.camera.current().zoom.max(f64::EPSILON);
                if let Some(body) = self.bodies.pick(point, PICK_SLACK / zoom) {
                    self.set_focus(body);
                }
            }
            ViewCommand::SetViewer { viewer } => {
                log::info!(
                    "Viewer set: faction {:?}, mode {:?}",
                    viewer.faction.map(|f| f.0),
                    viewer.mode
                );
                self.viewer = viewer;
            }
            ViewCommand::ToggleCollapse { faction, world } => {
                self.collapsed.toggle(faction, world);
            }
            ViewCommand::Notify { text } => {
                self.notices
                    .show(text, NOTICE_DEFAULT_TICKS, self.frame, &mut self.events);
            }
            ViewCommand::SetTimeScale { scale } => {
                if scale.is_finite() {
                    self.time_scale = scale.clamp(0.0, MAX_TIME_SCALE);
                }
            }
            ViewCommand::Pause => {
                if self.phase == SimPhase::Running {
                    self.phase = SimPhase::Paused;
                }
            }
            ViewCommand::Resume => {
                if self.phase == SimPhase::Paused {
                    self.phase = SimPhase::Running;
                }
            }
        }
    }

    fn set_focus(&mut self, body: BodyId) {
        let Some(node) = self.bodies.get(body) else {
            return;
        };
        log::info!("Focus on {}", node.name);
        self.camera.focus_on(body, node.current);
        self.events.push(SceneEvent::FocusChanged { body: Some(body) });
    }

    /// Ease the camera, chasing a focused non-root body, and raise the
    /// frontier notice when it arms.
    fn update_camera(&mut self) {
        let lock = self
            .camera
            .focus()
            .and_then(|id| self.bodies.get(id))
            .filter(|node| !node.is_root())
            .map(|node| node.current);
        if let Some(distance) = self.camera.tick(lock) {
            let message = FRONTIER_MESSAGES[self.rng.gen_range(0..FRONTIER_MESSAGES.len())];
            log::debug!("Frontier warning at distance {:.0}", distance);
            self.events.push(SceneEvent::FrontierWarning { distance });
            self.notices.show(
                message,
                self.config.camera.frontier_message_ticks,
                self.frame,
                &mut self.events,
            );
        }
    }

    /// Resolve what the viewer may see at every world with fleets.
    fn resolve_intel(&mut self) {
        let filtered = starmap_intel::prefilter(&self.fleets, &self.viewer);
        self.world_views = filtered
            .worlds()
            .iter()
            .map(|world| {
                starmap_intel::resolve_world(
                    &filtered,
                    world,
                    &self.viewer,
                    &self.config.intel,
                    &self.collapsed,
                )
            })
            .collect();
    }

    /// Spawn, advance and retire skirmishes, then move what they left in flight.
    fn run_skirmish_systems(&mut self) {
        // 1. Spawn at the focused world
        let site_body = self
            .camera
            .focus()
            .and_then(|id| self.bodies.get(id))
            .map(|node| (node.id, WorldId::new(node.name.clone()), node.current));
        let site = site_body.as_ref().map(|(body, world, position)| SpawnSite {
            body: *body,
            world: world.clone(),
            position: *position,
            visible: self
                .world_views
                .iter()
                .find(|v| &v.world == world)
                .map_or(&[][..], |v| v.visible.as_slice()),
        });
        systems::spawner::run(
            &mut self.skirmishes,
            &mut self.next_skirmish_id,
            &mut self.spawn_timer,
            site.as_ref(),
            &self.config.skirmish,
            &mut self.rng,
            &mut self.events,
            &mut self.stats,
            self.time.tick,
        );

        // 2. Phase machine, motion and firing
        let retire = systems::skirmish::run(
            &mut self.skirmishes,
            &mut self.world,
            &self.bodies,
            &self.fleets,
            self.config.skirmish.termination,
            &self.config.skirmish.fire_chances(),
            &mut self.rng,
            &mut self.stats,
        );
        for (id, reason) in retire {
            self.retire_skirmish(id, reason);
        }

        // 3. Torpedoes and lasers (after poses, so homing reads this tick's targets)
        systems::projectiles::run(&mut self.world, &self.skirmishes, &mut self.rng, &mut self.stats);
        // 4. Explosions and debris
        systems::particles::run(&mut self.world);
    }

    /// Drop a skirmish from the registry, releasing both fleets.
    /// Its projectiles and particles go in the next cleanup pass.
    fn retire_skirmish(&mut self, id: u32, reason: EndReason) {
        if self.skirmishes.remove(&id).is_none() {
            return;
        }
        log::info!("Skirmish {} ended: {:?}", id, reason);
        self.stats.retired += 1;
        if reason == EndReason::Faulted {
            self.stats.faulted += 1;
        }
        self.events.push(SceneEvent::SkirmishEnded { id, reason });
    }
}
