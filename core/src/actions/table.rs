use std::fmt;

use action_progress_types::{ActionCategory, ActionProgressConfig};
use serde::{Deserialize, Serialize};

/// A repeatable skilling action the tracker knows how to time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    Cooking,
    CookingWine,
    CraftCutGem,
    CraftSpinWool,
    CraftGlassblowing,
    FiremakingCampfire,
    FletchCutBow,
    FletchCutArrowShaft,
    FletchCutTips,
    FletchStringBow,
    FletchAttachHeads,
    HerbClean,
    HerbMixPotion,
    HerbGrind,
    MagicEnchantJewelry,
    Smithing,
    SmithingWithSmithOutfit,
}

/// Static description of an action kind.
#[derive(Debug)]
pub struct ActionInfo {
    pub kind: ActionKind,
    /// Stable identifier, also used for lookups from config and scenarios
    pub name: &'static str,
    pub category: ActionCategory,
    /// Short label for what the player is doing ("Cutting", "Mixing", ...)
    pub description: &'static str,
    /// Ticks per step; the last entry repeats for every later step
    pub tick_times: &'static [i32],
    /// Only 80% of the requested count is actually performed
    pub reduced_count: bool,
}

const fn info(
    kind: ActionKind,
    name: &'static str,
    category: ActionCategory,
    description: &'static str,
    tick_times: &'static [i32],
) -> ActionInfo {
    ActionInfo {
        kind,
        name,
        category,
        description,
        tick_times,
        reduced_count: false,
    }
}

// Indexed by discriminant; order must follow `ActionKind::ALL`.
static ACTION_TABLE: [ActionInfo; 17] = [
    info(ActionKind::Cooking, "COOKING", ActionCategory::Cooking, "Cooking", &[4]),
    info(ActionKind::CookingWine, "COOKING_WINE", ActionCategory::Cooking, "Mixing", &[2]),
    info(ActionKind::CraftCutGem, "CRAFT_CUT_GEM", ActionCategory::Crafting, "Cutting", &[2]),
    info(ActionKind::CraftSpinWool, "CRAFT_SPIN_WOOL", ActionCategory::Crafting, "Spinning", &[3]),
    info(
        ActionKind::CraftGlassblowing,
        "CRAFT_GLASSBLOWING",
        ActionCategory::Crafting,
        "Blowing",
        &[3],
    ),
    info(
        ActionKind::FiremakingCampfire,
        "FIREMAKING_CAMPFIRE",
        ActionCategory::Firemaking,
        "Burning",
        &[4],
    ),
    info(ActionKind::FletchCutBow, "FLETCH_CUT_BOW", ActionCategory::Fletching, "Cutting", &[3]),
    info(
        ActionKind::FletchCutArrowShaft,
        "FLETCH_CUT_ARROW_SHAFT",
        ActionCategory::Fletching,
        "Cutting",
        &[4, 3, 3, 3],
    ),
    info(ActionKind::FletchCutTips, "FLETCH_CUT_TIPS", ActionCategory::Fletching, "Cutting", &[4, 3]),
    info(
        ActionKind::FletchStringBow,
        "FLETCH_STRING_BOW",
        ActionCategory::Fletching,
        "Stringing",
        &[2],
    ),
    info(
        ActionKind::FletchAttachHeads,
        "FLETCH_ATTACH_HEADS",
        ActionCategory::Fletching,
        "Attaching",
        &[1],
    ),
    info(ActionKind::HerbClean, "HERB_CLEAN", ActionCategory::Herblore, "Cleaning", &[1]),
    info(ActionKind::HerbMixPotion, "HERB_MIX_POTION", ActionCategory::Herblore, "Mixing", &[2]),
    info(ActionKind::HerbGrind, "HERB_GRIND", ActionCategory::Herblore, "Grinding", &[5, 4, 4]),
    info(
        ActionKind::MagicEnchantJewelry,
        "MAGIC_ENCHANT_JEWELRY",
        ActionCategory::Magic,
        "Enchanting",
        &[3],
    ),
    info(ActionKind::Smithing, "SMITHING", ActionCategory::Smithing, "Smithing", &[5]),
    ActionInfo {
        kind: ActionKind::SmithingWithSmithOutfit,
        name: "SMITHING_WITH_SMITH_OUTFIT",
        category: ActionCategory::Smithing,
        description: "Smithing",
        tick_times: &[5],
        reduced_count: true,
    },
];

static ACTIONS_BY_NAME: phf::Map<&'static str, ActionKind> = phf::phf_map! {
    "COOKING" => ActionKind::Cooking,
    "COOKING_WINE" => ActionKind::CookingWine,
    "CRAFT_CUT_GEM" => ActionKind::CraftCutGem,
    "CRAFT_SPIN_WOOL" => ActionKind::CraftSpinWool,
    "CRAFT_GLASSBLOWING" => ActionKind::CraftGlassblowing,
    "FIREMAKING_CAMPFIRE" => ActionKind::FiremakingCampfire,
    "FLETCH_CUT_BOW" => ActionKind::FletchCutBow,
    "FLETCH_CUT_ARROW_SHAFT" => ActionKind::FletchCutArrowShaft,
    "FLETCH_CUT_TIPS" => ActionKind::FletchCutTips,
    "FLETCH_STRING_BOW" => ActionKind::FletchStringBow,
    "FLETCH_ATTACH_HEADS" => ActionKind::FletchAttachHeads,
    "HERB_CLEAN" => ActionKind::HerbClean,
    "HERB_MIX_POTION" => ActionKind::HerbMixPotion,
    "HERB_GRIND" => ActionKind::HerbGrind,
    "MAGIC_ENCHANT_JEWELRY" => ActionKind::MagicEnchantJewelry,
    "SMITHING" => ActionKind::Smithing,
    "SMITHING_WITH_SMITH_OUTFIT" => ActionKind::SmithingWithSmithOutfit,
};

impl ActionKind {
    pub const ALL: [ActionKind; 17] = [
        Self::Cooking,
        Self::CookingWine,
        Self::CraftCutGem,
        Self::CraftSpinWool,
        Self::CraftGlassblowing,
        Self::FiremakingCampfire,
        Self::FletchCutBow,
        Self::FletchCutArrowShaft,
        Self::FletchCutTips,
        Self::FletchStringBow,
        Self::FletchAttachHeads,
        Self::HerbClean,
        Self::HerbMixPotion,
        Self::HerbGrind,
        Self::MagicEnchantJewelry,
        Self::Smithing,
        Self::SmithingWithSmithOutfit,
    ];

    pub fn info(self) -> &'static ActionInfo {
        &ACTION_TABLE[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    pub fn description(self) -> &'static str {
        self.info().description
    }

    pub fn tick_times(self) -> &'static [i32] {
        self.info().tick_times
    }

    /// Look up a kind by its table name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        ACTIONS_BY_NAME
            .get(name)
            .or_else(|| ACTIONS_BY_NAME.get(name.to_ascii_uppercase().as_str()))
            .copied()
    }

    /// Whether the configuration allows tracking this kind.
    pub fn is_enabled(self, config: &ActionProgressConfig) -> bool {
        config.is_enabled(self.info().category)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
