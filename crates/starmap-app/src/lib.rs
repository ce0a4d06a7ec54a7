//! Headless STARMAP host.
//!
//! Runs the simulation engine on its own thread at the tick rate, or
//! synchronously for a fixed number of ticks from the `starmap` binary.

pub mod cli;
pub mod game_loop;
pub mod state;

pub use starmap_core as core;
