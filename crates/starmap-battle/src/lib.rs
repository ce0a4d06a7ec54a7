//! Skirmish behavior for STARMAP.
//!
//! Implements the skirmish phase state machine, tactic flight curves,
//! pose easing in a rotated arena frame, and fire decisions.

pub mod fire;
pub mod fsm;
pub mod geometry;
pub mod tactics;

pub use starmap_core as core;
