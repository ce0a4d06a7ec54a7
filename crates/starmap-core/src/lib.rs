//! Core types and definitions for the STARMAP simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometric types, components, fleet data, commands, state snapshots,
//! events, errors, and constants. It has no dependency on any runtime
//! framework or renderer.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod fleets;
pub mod state;
pub mod types;

pub use error::SimError;
