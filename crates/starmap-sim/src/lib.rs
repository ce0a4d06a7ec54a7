//! Simulation engine for STARMAP.
//!
//! Owns the skirmish registry and the hecs world of projectiles and
//! particles, drives the body tree, camera and notices at a fixed tick
//! rate, and produces `SceneSnapshot`s for the renderer.

pub mod camera;
pub mod config;
pub mod engine;
pub mod guidance;
pub mod notice;
pub mod palette;
pub mod skirmish;
pub mod systems;
pub mod world_setup;

pub use config::SimConfig;
pub use engine::SimulationEngine;
pub use palette::{FactionPalette, StaticPalette};
pub use starmap_core as core;
