//! User-facing configuration for action progress tracking.
//!
//! Every field has a default so partial TOML files (or an empty one) load
//! cleanly.

use serde::{Deserialize, Serialize};

/// Skill grouping used to switch tracking on or off per family of actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionCategory {
    Cooking,
    Crafting,
    Firemaking,
    Fletching,
    Herblore,
    Magic,
    Smithing,
}

impl ActionCategory {
    pub const ALL: [ActionCategory; 7] = [
        Self::Cooking,
        Self::Crafting,
        Self::Firemaking,
        Self::Fletching,
        Self::Herblore,
        Self::Magic,
        Self::Smithing,
    ];
}

/// Settings consulted by the tracker before an action sequence is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionProgressConfig {
    /// Skip sequences of a single action (nothing interesting to track)
    pub ignore_single_actions: bool,

    // ─── Category toggles ───────────────────────────────────────────────────
    pub cooking: bool,
    pub crafting: bool,
    pub firemaking: bool,
    pub fletching: bool,
    pub herblore: bool,
    pub magic: bool,
    pub smithing: bool,
}

impl Default for ActionProgressConfig {
    fn default() -> Self {
        Self {
            ignore_single_actions: false,
            cooking: true,
            crafting: true,
            firemaking: true,
            fletching: true,
            herblore: true,
            magic: true,
            smithing: true,
        }
    }
}

impl ActionProgressConfig {
    /// Whether actions in `category` should be tracked.
    pub fn is_enabled(&self, category: ActionCategory) -> bool {
        match category {
            ActionCategory::Cooking => self.cooking,
            ActionCategory::Crafting => self.crafting,
            ActionCategory::Firemaking => self.firemaking,
            ActionCategory::Fletching => self.fletching,
            ActionCategory::Herblore => self.herblore,
            ActionCategory::Magic => self.magic,
            ActionCategory::Smithing => self.smithing,
        }
    }

    /// Toggle tracking for a whole category.
    pub fn set_enabled(&mut self, category: ActionCategory, enabled: bool) {
        let slot = match category {
            ActionCategory::Cooking => &mut self.cooking,
            ActionCategory::Crafting => &mut self.crafting,
            ActionCategory::Firemaking => &mut self.firemaking,
            ActionCategory::Fletching => &mut self.fletching,
            ActionCategory::Herblore => &mut self.herblore,
            ActionCategory::Magic => &mut self.magic,
            ActionCategory::Smithing => &mut self.smithing,
        };
        *slot = enabled;
    }
}
