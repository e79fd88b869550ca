//! Enumeration types for the Warden history engine.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// History actions
// ---------------------------------------------------------------------------

/// The kind of structural change a history entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum HistoryAction {
    /// Construction of a block has started.
    Placing,
    /// A block finished construction.
    Place,
    /// Deconstruction of a block has started.
    Breaking,
    /// A block finished deconstruction.
    Break,
    /// A block was rotated.
    Rotate,
    /// A block was configured.
    Configure,
}

impl HistoryAction {
    /// Pick the in-progress action for a construction site.
    pub const fn in_progress(breaking: bool) -> Self {
        if breaking { Self::Breaking } else { Self::Placing }
    }

    /// Pick the finished action for a completed construction.
    pub const fn finished(breaking: bool) -> Self {
        if breaking { Self::Break } else { Self::Place }
    }
}

// ---------------------------------------------------------------------------
// Building kinds
// ---------------------------------------------------------------------------

/// Runtime variant of a building.
///
/// Kinds form a hierarchy rooted at [`BuildingKind::Building`]; the parent
/// links are data owned by the decoder registry rather than part of this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum BuildingKind {
    /// The generic base capability shared by every building.
    Building,
    /// Placeholder occupying tiles while a block is (de)constructed.
    ConstructSite,
    /// Door that can be opened or closed.
    Door,
    /// Sorter filtering on one item.
    Sorter,
    /// Unloader pulling one item out of containers.
    Unloader,
    /// Short-range item bridge.
    ItemBridge,
    /// Item bridge with an internal buffer.
    BufferedItemBridge,
    /// Long-range item transport link.
    MassDriver,
    /// Any block that holds a payload.
    PayloadBlock,
    /// Long-range payload transport link.
    PayloadDriver,
    /// Any payload block that produces units.
    UnitBlock,
    /// Factory producing one of its unit plans.
    UnitFactory,
    /// Upgrades units passing through it.
    Reconstructor,
    /// Power distribution node with laser links.
    PowerNode,
    /// Power storage.
    Battery,
    /// Colored light fixture.
    Light,
    /// Message board.
    Message,
    /// Logic processor running a program.
    LogicProcessor,
    /// Pixel canvas.
    Canvas,
}

impl BuildingKind {
    /// Every known kind, in declaration order.
    pub const ALL: [Self; 19] = [
        Self::Building,
        Self::ConstructSite,
        Self::Door,
        Self::Sorter,
        Self::Unloader,
        Self::ItemBridge,
        Self::BufferedItemBridge,
        Self::MassDriver,
        Self::PayloadBlock,
        Self::PayloadDriver,
        Self::UnitBlock,
        Self::UnitFactory,
        Self::Reconstructor,
        Self::PowerNode,
        Self::Battery,
        Self::Light,
        Self::Message,
        Self::LogicProcessor,
        Self::Canvas,
    ];
}

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

/// Category of a piece of game content referenced by a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ContentKind {
    /// An item type.
    Item,
    /// A liquid type.
    Liquid,
    /// A unit type.
    Unit,
    /// A block type.
    Block,
}

// ---------------------------------------------------------------------------
// Game state
// ---------------------------------------------------------------------------

/// State of the host game loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum GameState {
    /// No match is loaded.
    Menu,
    /// A match is loaded but the simulation is halted.
    Paused,
    /// A match is running.
    Playing,
}

impl GameState {
    /// Whether a transition from `from` to `to` starts a new match.
    pub const fn starts_match(from: Self, to: Self) -> bool {
        matches!((from, to), (Self::Menu, Self::Playing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_serialize_screaming() {
        let json = serde_json::to_string(&HistoryAction::Configure).ok();
        assert_eq!(json.as_deref(), Some("\"CONFIGURE\""));
        let json = serde_json::to_string(&HistoryAction::Breaking).ok();
        assert_eq!(json.as_deref(), Some("\"BREAKING\""));
    }

    #[test]
    fn action_selection_follows_breaking_flag() {
        assert_eq!(HistoryAction::in_progress(true), HistoryAction::Breaking);
        assert_eq!(HistoryAction::in_progress(false), HistoryAction::Placing);
        assert_eq!(HistoryAction::finished(true), HistoryAction::Break);
        assert_eq!(HistoryAction::finished(false), HistoryAction::Place);
    }

    #[test]
    fn only_menu_to_playing_starts_match() {
        assert!(GameState::starts_match(GameState::Menu, GameState::Playing));
        assert!(!GameState::starts_match(GameState::Paused, GameState::Playing));
        assert!(!GameState::starts_match(GameState::Playing, GameState::Menu));
        assert!(!GameState::starts_match(GameState::Menu, GameState::Paused));
    }

    #[test]
    fn all_kinds_are_distinct() {
        let unique: std::collections::BTreeSet<_> = BuildingKind::ALL.iter().collect();
        assert_eq!(unique.len(), BuildingKind::ALL.len());
    }
}
