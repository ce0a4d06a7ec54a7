//! Fleet visibility resolution for the STARMAP simulation.
//!
//! Pure functions: given the fleets at a world and who is looking, decide
//! which fleets are visible, how they are grouped for display, and whether
//! individual vehicle manifests are readable.

pub mod display;
pub mod resolve;

pub use display::{
    build_display, group_by_faction, redact_manifest, resolve_world, visible_vehicles,
};
pub use resolve::{prefilter, resolve_visible, visibility_grant, Grant, IntelPolicy};

#[cfg(test)]
mod tests;
