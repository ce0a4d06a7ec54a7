//! Faction display colors. Colors are opaque strings passed to the renderer.

use std::collections::BTreeMap;

use starmap_core::types::FactionId;

/// Supplies a display color per faction.
pub trait FactionPalette: Send {
    fn color(&self, faction: FactionId) -> String;
}

/// Colors cycled for factions without an explicit entry.
const FALLBACK_CYCLE: [&str; 8] = [
    "#e6194b", "#3cb44b", "#ffe119", "#4363d8", "#f58231", "#911eb4", "#46f0f0", "#f032e6",
];

/// Fixed map with a deterministic fallback.
#[derive(Debug, Clone, Default)]
pub struct StaticPalette {
    colors: BTreeMap<FactionId, String>,
}

impl StaticPalette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_color(mut self, faction: FactionId, color: impl Into<String>) -> Self {
        self.colors.insert(faction, color.into());
        self
    }
}

impl FactionPalette for StaticPalette {
    fn color(&self, faction: FactionId) -> String {
        match self.colors.get(&faction) {
            Some(color) => color.clone(),
            None => FALLBACK_CYCLE[faction.0 as usize % FALLBACK_CYCLE.len()].to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_color_wins() {
        let palette = StaticPalette::new().with_color(FactionId(3), "#123456");
        assert_eq!(palette.color(FactionId(3)), "#123456");
        assert_eq!(palette.color(FactionId(0)), "#e6194b");
        assert_eq!(palette.color(FactionId(8)), palette.color(FactionId(0)));
    }
}
