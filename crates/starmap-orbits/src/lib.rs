//! Orbital body tree for the STARMAP simulation.
//!
//! Star systems are built once into an arena with fixed topology. Each tick
//! `BodyTree::update_positions` walks the arena in pre-order and writes every
//! body's current position from its parent's freshly computed one.

pub mod belt;
pub mod presets;
pub mod spec;
pub mod tree;

pub use belt::AsteroidBelt;
pub use spec::{BodySpec, Motion, StarSystemSpec};
pub use tree::{BodyNode, BodyTree, StarSystem, TreeError};

#[cfg(test)]
mod tests;
