//! Fleet presence data supplied by the persistence layer.
//!
//! The simulation never mutates these records. It only filters and groups
//! them, and reads the action state to decide which fleets are in battle.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::enums::{Domain, FleetAction, ViewerMode};
use crate::types::{FactionId, FleetId, WorldId};

/// One line of a fleet's vehicle manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleEntry {
    pub id: u32,
    pub count: u32,
}

/// Fleet-level stealth against other factions' viewers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stealth {
    #[default]
    Visible,
    /// Hidden from every non-owning faction.
    Hidden,
    /// Hidden from the listed factions only.
    HiddenFrom(Vec<FactionId>),
}

/// A fleet located at a world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetPresence {
    pub id: FleetId,
    pub faction: FactionId,
    #[serde(default)]
    pub domain: Domain,
    pub world: WorldId,
    #[serde(default)]
    pub action: FleetAction,
    #[serde(default)]
    pub vehicles: Vec<VehicleEntry>,
    #[serde(default)]
    pub stealth: Stealth,
    /// Set on resolved output when the manifest was withheld from the viewer.
    /// `vehicles` is then empty.
    #[serde(default)]
    pub manifest_hidden: bool,
}

impl FleetPresence {
    /// Total vehicle count across the manifest.
    pub fn vehicle_count(&self) -> u32 {
        self.vehicles
            .iter()
            .fold(0u32, |acc, v| acc.saturating_add(v.count))
    }

    /// Whether the manifest is hidden from `viewer`'s faction.
    pub fn is_stealthed_for(&self, viewer: FactionId) -> bool {
        match &self.stealth {
            Stealth::Visible => false,
            Stealth::Hidden => true,
            Stealth::HiddenFrom(factions) => factions.contains(&viewer),
        }
    }
}

/// Per-tick fleet data: faction → fleets, ordered for deterministic iteration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FleetSnapshot {
    pub factions: BTreeMap<FactionId, Vec<FleetPresence>>,
}

impl FleetSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from a flat fleet list, grouping by faction.
    pub fn from_fleets(fleets: impl IntoIterator<Item = FleetPresence>) -> Self {
        let mut snapshot = Self::default();
        for fleet in fleets {
            snapshot.insert(fleet);
        }
        snapshot
    }

    pub fn insert(&mut self, fleet: FleetPresence) {
        self.factions.entry(fleet.faction).or_default().push(fleet);
    }

    /// Every fleet, faction order then supply order.
    pub fn iter(&self) -> impl Iterator<Item = &FleetPresence> {
        self.factions.values().flat_map(|fleets| fleets.iter())
    }

    /// Fleets located at `world`. A missing world yields an empty list.
    pub fn fleets_at(&self, world: &WorldId) -> Vec<FleetPresence> {
        self.iter().filter(|f| &f.world == world).cloned().collect()
    }

    /// Worlds with at least one fleet present.
    pub fn worlds(&self) -> BTreeSet<WorldId> {
        self.iter().map(|f| f.world.clone()).collect()
    }

    pub fn find(&self, id: FleetId) -> Option<&FleetPresence> {
        self.iter().find(|f| f.id == id)
    }

    pub fn len(&self) -> usize {
        self.factions.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Who is looking at the map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewerContext {
    /// The viewer's faction. `None` for an unaffiliated spectator.
    pub faction: Option<FactionId>,
    #[serde(default)]
    pub mode: ViewerMode,
    /// Referee allow-list of factions. `None` = all.
    #[serde(default)]
    pub faction_filter: Option<Vec<FactionId>>,
    /// Referee allow-list of worlds. `None` = all.
    #[serde(default)]
    pub world_filter: Option<Vec<WorldId>>,
}

impl ViewerContext {
    pub fn player(faction: FactionId) -> Self {
        Self {
            faction: Some(faction),
            ..Default::default()
        }
    }

    pub fn referee() -> Self {
        Self {
            mode: ViewerMode::Referee,
            ..Default::default()
        }
    }

    pub fn is_referee(&self) -> bool {
        self.mode == ViewerMode::Referee
    }

    /// Whether `fleet` belongs to the viewer's faction.
    pub fn owns(&self, fleet: &FleetPresence) -> bool {
        self.faction == Some(fleet.faction)
    }
}

/// `(faction, world)` pairs whose fleets are shown collapsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollapseSet {
    entries: BTreeSet<(FactionId, WorldId)>,
}

impl CollapseSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_collapsed(&self, faction: FactionId, world: &WorldId) -> bool {
        self.entries.contains(&(faction, world.clone()))
    }

    pub fn set(&mut self, faction: FactionId, world: WorldId, collapsed: bool) {
        if collapsed {
            self.entries.insert((faction, world));
        } else {
            self.entries.remove(&(faction, world));
        }
    }

    /// Flip the collapse state. Returns the new state.
    pub fn toggle(&mut self, faction: FactionId, world: WorldId) -> bool {
        let key = (faction, world);
        if self.entries.remove(&key) {
            false
        } else {
            self.entries.insert(key);
            true
        }
    }
}
