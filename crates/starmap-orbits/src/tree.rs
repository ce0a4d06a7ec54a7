//! Arena-backed orbital body tree.
//!
//! Nodes are stored in pre-order: a parent always sits at a lower index
//! than any of its descendants. Parent and child links are assigned once by
//! `BodyTree::build` and never change afterwards; only `current` moves.

use std::collections::BTreeMap;

use glam::DVec2;

use starmap_core::enums::BodyKind;
use starmap_core::types::BodyId;
use starmap_core::SimError;

use crate::belt::AsteroidBelt;
use crate::spec::{BodySpec, Motion, StarSystemSpec};

/// One body in the arena.
#[derive(Debug, Clone)]
pub struct BodyNode {
    pub id: BodyId,
    pub name: String,
    pub kind: BodyKind,
    /// Orbital radius around the parent; 0 for a root star.
    pub dist: f64,
    pub motion: Motion,
    pub size: f64,
    pub color: String,
    pub parent: Option<BodyId>,
    pub children: Vec<BodyId>,
    /// 0 for a star, 1 for planets and sectors, 2 for moons.
    pub depth: u32,
    /// Index into `BodyTree::systems`.
    pub system: usize,
    /// Position computed by the last `update_positions` call.
    pub current: DVec2,
}

impl BodyNode {
    pub fn has_fixed_angle(&self) -> bool {
        self.motion.has_fixed_angle()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Per-system data that is not a body.
#[derive(Debug, Clone)]
pub struct StarSystem {
    pub name: String,
    pub root: BodyId,
    pub origin: DVec2,
    pub belt: Option<AsteroidBelt>,
}

/// Rejected star system descriptions.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeError {
    /// No star systems were supplied.
    NoSystems,
    /// Two bodies share a name. Names double as world identities.
    DuplicateName(String),
    /// A non-root body has a zero or negative orbital radius.
    ZeroDistance(String),
    /// A body has a NaN or infinite parameter.
    NonFinite(String),
}

impl std::fmt::Display for TreeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TreeError::NoSystems => write!(f, "no star systems supplied"),
            TreeError::DuplicateName(name) => write!(f, "duplicate body name '{}'", name),
            TreeError::ZeroDistance(name) => {
                write!(f, "body '{}' must orbit at a positive distance", name)
            }
            TreeError::NonFinite(name) => write!(f, "body '{}' has a non-finite parameter", name),
        }
    }
}

impl std::error::Error for TreeError {}

impl From<TreeError> for SimError {
    fn from(err: TreeError) -> Self {
        SimError::InvalidTree(err.to_string())
    }
}

/// All star systems of the map.
#[derive(Debug, Clone)]
pub struct BodyTree {
    nodes: Vec<BodyNode>,
    systems: Vec<StarSystem>,
    by_name: BTreeMap<String, BodyId>,
    moon_time_factor: f64,
}

/// An empty map with no systems. Positions and picks are all misses.
impl Default for BodyTree {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            systems: Vec::new(),
            by_name: BTreeMap::new(),
            moon_time_factor: starmap_core::constants::MOON_TIME_FACTOR,
        }
    }
}

impl BodyTree {
    /// Build the arena from system descriptions. Topology is fixed from here on.
    pub fn build(specs: Vec<StarSystemSpec>) -> Result<Self, TreeError> {
        if specs.is_empty() {
            return Err(TreeError::NoSystems);
        }

        let mut tree = BodyTree {
            nodes: Vec::new(),
            systems: Vec::with_capacity(specs.len()),
            by_name: BTreeMap::new(),
            moon_time_factor: starmap_core::constants::MOON_TIME_FACTOR,
        };

        for (system_idx, spec) in specs.into_iter().enumerate() {
            if !spec.origin.is_finite() || !spec.size.is_finite() {
                return Err(TreeError::NonFinite(spec.name));
            }
            let root = tree.push_node(
                BodyNode {
                    id: BodyId(0),
                    name: spec.name.clone(),
                    kind: BodyKind::Star,
                    dist: 0.0,
                    motion: Motion::Fixed { angle: 0.0 },
                    size: spec.size,
                    color: spec.color,
                    parent: None,
                    children: Vec::new(),
                    depth: 0,
                    system: system_idx,
                    current: spec.origin,
                },
            )?;
            for body in spec.bodies {
                tree.push_subtree(body, root, 1, system_idx)?;
            }
            tree.systems.push(StarSystem {
                name: spec.name,
                root,
                origin: spec.origin,
                belt: spec.belt,
            });
        }

        log::debug!(
            "Built body tree: {} systems, {} bodies",
            tree.systems.len(),
            tree.nodes.len()
        );
        Ok(tree)
    }

    fn push_node(&mut self, mut node: BodyNode) -> Result<BodyId, TreeError> {
        if self.by_name.contains_key(&node.name) {
            return Err(TreeError::DuplicateName(node.name));
        }
        let id = BodyId(self.nodes.len() as u32);
        node.id = id;
        self.by_name.insert(node.name.clone(), id);
        if let Some(parent) = node.parent {
            self.nodes[parent.0 as usize].children.push(id);
        }
        self.nodes.push(node);
        Ok(id)
    }

    fn push_subtree(
        &mut self,
        spec: BodySpec,
        parent: BodyId,
        depth: u32,
        system: usize,
    ) -> Result<(), TreeError> {
        if !spec.dist.is_finite() || !spec.size.is_finite() || !spec.motion.is_finite() {
            return Err(TreeError::NonFinite(spec.name));
        }
        if spec.dist <= 0.0 {
            return Err(TreeError::ZeroDistance(spec.name));
        }
        let id = self.push_node(BodyNode {
            id: BodyId(0),
            name: spec.name,
            kind: spec.kind,
            dist: spec.dist,
            motion: spec.motion,
            size: spec.size,
            color: spec.color,
            parent: Some(parent),
            children: Vec::new(),
            depth,
            system,
            current: DVec2::ZERO,
        })?;
        for child in spec.children {
            self.push_subtree(child, id, depth + 1, system)?;
        }
        Ok(())
    }

    /// Time multiplier applied once per depth below planets. 1.0 disables damping.
    pub fn set_moon_time_factor(&mut self, factor: f64) {
        if factor.is_finite() && factor >= 0.0 {
            self.moon_time_factor = factor;
        } else {
            log::warn!("Ignoring invalid moon time factor {}", factor);
        }
    }

    pub fn moon_time_factor(&self) -> f64 {
        self.moon_time_factor
    }

    /// Effective orbital time for a body at `depth`.
    pub fn time_at_depth(&self, time: f64, depth: u32) -> f64 {
        if depth >= 2 {
            time * self.moon_time_factor.powi(depth as i32 - 1)
        } else {
            time
        }
    }

    /// Recompute every body's position for `time`.
    ///
    /// Returns the number of bodies whose computed position was non-finite.
    /// Such a body is pinned to its parent's position so the error cannot
    /// spread to its descendants.
    pub fn update_positions(&mut self, time: f64) -> usize {
        let mut repaired = 0;
        for idx in 0..self.nodes.len() {
            let (parent, depth, dist, motion) = {
                let node = &self.nodes[idx];
                (node.parent, node.depth, node.dist, node.motion)
            };
            let Some(parent) = parent else {
                if let Some(system) = self.systems.get(self.nodes[idx].system) {
                    self.nodes[idx].current = system.origin;
                }
                continue;
            };
            debug_assert!((parent.0 as usize) < idx);
            let origin = self.nodes[parent.0 as usize].current;
            let angle = motion.angle_at(self.time_at_depth(time, depth));
            let pos = origin + DVec2::new(angle.cos(), angle.sin()) * dist;
            self.nodes[idx].current = if pos.is_finite() {
                pos
            } else {
                log::warn!(
                    "Non-finite position for body '{}' at time {}; pinned to parent",
                    self.nodes[idx].name,
                    time
                );
                repaired += 1;
                origin
            };
        }
        repaired
    }

    pub fn get(&self, id: BodyId) -> Option<&BodyNode> {
        self.nodes.get(id.0 as usize)
    }

    pub fn find_by_name(&self, name: &str) -> Option<BodyId> {
        self.by_name.get(name).copied()
    }

    /// Like `find_by_name` but reports a miss as an error.
    pub fn require(&self, name: &str) -> Result<BodyId, SimError> {
        self.find_by_name(name)
            .ok_or_else(|| SimError::UnknownBody(name.to_string()))
    }

    pub fn children(&self, id: BodyId) -> &[BodyId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn parent(&self, id: BodyId) -> Option<BodyId> {
        self.get(id).and_then(|n| n.parent)
    }

    pub fn position(&self, id: BodyId) -> Option<DVec2> {
        self.get(id).map(|n| n.current)
    }

    /// Root stars, one per system.
    pub fn roots(&self) -> impl Iterator<Item = BodyId> + '_ {
        self.systems.iter().map(|s| s.root)
    }

    /// All bodies in pre-order.
    pub fn iter(&self) -> impl Iterator<Item = &BodyNode> {
        self.nodes.iter()
    }

    pub fn systems(&self) -> &[StarSystem] {
        &self.systems
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Ids of `id` and all its descendants, pre-order.
    pub fn subtree(&self, id: BodyId) -> Vec<BodyId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if self.get(next).is_none() {
                continue;
            }
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Nearest body whose visual radius plus `slack` contains `point`.
    pub fn pick(&self, point: DVec2, slack: f64) -> Option<BodyId> {
        if !point.is_finite() {
            return None;
        }
        self.nodes
            .iter()
            .filter_map(|n| {
                let d = n.current.distance(point);
                (d <= n.size + slack).then_some((n.id, d))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }
}
