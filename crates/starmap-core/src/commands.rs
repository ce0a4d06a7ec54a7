//! Viewer commands sent from the renderer/input layer to the simulation.
//!
//! Commands are queued and applied at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::fleets::ViewerContext;
use crate::types::{FactionId, WorldId};

/// All possible viewer actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ViewCommand {
    // --- Camera ---
    /// Drag by a screen-space delta (pixels). Releases focus.
    Pan { dx: f64, dy: f64 },
    /// Wheel/pinch zoom by `factor`, keeping the point under the cursor fixed.
    ZoomAt {
        factor: f64,
        screen_x: f64,
        screen_y: f64,
    },
    /// Set the camera target directly. Zoom is clamped.
    SetCameraTarget { x: f64, y: f64, zoom: f64 },
    /// Resize the viewport (screen pixels).
    SetViewport { width: f64, height: f64 },

    // --- Focus ---
    /// Focus a body by name.
    FocusBody { name: String },
    /// Drop the focus lock.
    ClearFocus,
    /// Click/tap at a screen position: focuses the body under it, if any.
    SelectAt { screen_x: f64, screen_y: f64 },

    // --- Intel ---
    /// Replace the viewer identity.
    SetViewer { viewer: ViewerContext },
    /// Collapse or expand a faction's fleets at a world.
    ToggleCollapse { faction: FactionId, world: WorldId },

    // --- Notices ---
    /// Show a transient message, pre-empting any current one.
    Notify { text: String },

    // --- Simulation control ---
    /// Set time scale for orbital motion (1.0 = normal, 0.0 = frozen orbits).
    SetTimeScale { scale: f64 },
    Pause,
    Resume,
}
