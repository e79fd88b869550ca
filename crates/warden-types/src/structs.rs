//! Core structs: tile coordinates, actors, blocks, buildings, and history
//! entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::configuration::{BlockConfig, RawConfig};
use crate::enums::{BuildingKind, ContentKind, HistoryAction};
use crate::ids::PlayerUuid;

// ---------------------------------------------------------------------------
// Coordinates
// ---------------------------------------------------------------------------

/// A tile coordinate, or a tile offset when used as a relative value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TilePos {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl TilePos {
    /// Create a coordinate.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate by a relative offset, saturating at the coordinate bounds.
    pub const fn offset(self, by: Self) -> Self {
        Self {
            x: self.x.saturating_add(by.x),
            y: self.y.saturating_add(by.y),
        }
    }

    /// Decode a host tile reference: `x` in the high 16 bits and `y` in the
    /// low 16 bits, both signed.
    pub fn from_packed(packed: i32) -> Self {
        let [a, b, c, d] = packed.to_be_bytes();
        Self {
            x: i32::from(i16::from_be_bytes([a, b])),
            y: i32::from(i16::from_be_bytes([c, d])),
        }
    }
}

impl core::fmt::Display for TilePos {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// Content references
// ---------------------------------------------------------------------------

/// A reference to a piece of game content by category and internal name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ContentRef {
    /// Content category.
    pub kind: ContentKind,
    /// Internal content name, e.g. `"copper"` or `"dagger"`.
    pub name: String,
}

impl ContentRef {
    /// Create a content reference.
    pub fn new(kind: ContentKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

/// A named link from a logic processor to another building.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LogicLink {
    /// Variable name the program uses for the link.
    pub name: String,
    /// Absolute position of the linked building.
    pub position: TilePos,
}

// ---------------------------------------------------------------------------
// Blocks and buildings
// ---------------------------------------------------------------------------

/// Static description of a block type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Block {
    /// Internal block name; this is the structure type recorded in history.
    pub name: String,
    /// Edge length of the square footprint, in tiles.
    #[serde(default = "default_block_size")]
    pub size: u8,
    /// Whether the block declares any configuration options.
    #[serde(default)]
    pub configurable: bool,
    /// Units a factory can produce, indexed by plan number.
    #[serde(default)]
    pub unit_plans: Vec<ContentRef>,
}

const fn default_block_size() -> u8 {
    1
}

impl Block {
    /// A 1x1 block with no configuration options.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: 1,
            configurable: false,
            unit_plans: Vec::new(),
        }
    }

    /// Set the footprint edge length.
    #[must_use]
    pub fn with_size(mut self, size: u8) -> Self {
        self.size = size;
        self
    }

    /// Mark the block as declaring configuration options.
    #[must_use]
    pub fn configurable(mut self) -> Self {
        self.configurable = true;
        self
    }

    /// Set the unit plans of a factory.
    #[must_use]
    pub fn with_unit_plans(mut self, plans: Vec<ContentRef>) -> Self {
        self.unit_plans = plans;
        self
    }
}

/// State carried by a construction placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ConstructSite {
    /// The block being built, or the block being torn down.
    pub current: Block,
    /// Last configuration the target block had.
    #[serde(default)]
    pub last_config: RawConfig,
}

/// Snapshot of a building as handed over by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Building {
    /// Runtime variant, used for decoder dispatch.
    pub kind: BuildingKind,
    /// Block type occupying the tiles.
    pub block: Block,
    /// Anchor (origin) tile of the footprint.
    pub anchor: TilePos,
    /// Current rotation, 0 to 3.
    #[serde(default)]
    pub rotation: u8,
    /// Current configuration value.
    #[serde(default)]
    pub config: RawConfig,
    /// Absolute positions this building currently links to.
    #[serde(default)]
    pub links: Vec<TilePos>,
    /// Placeholder state. Only meaningful when `kind` is
    /// [`BuildingKind::ConstructSite`]; see [`Building::placeholder`].
    #[serde(default)]
    pub site: Option<ConstructSite>,
}

impl Building {
    /// Create a building with default rotation, no configuration and no links.
    pub const fn new(kind: BuildingKind, block: Block, anchor: TilePos) -> Self {
        Self {
            kind,
            block,
            anchor,
            rotation: 0,
            config: RawConfig::Null,
            links: Vec::new(),
            site: None,
        }
    }

    /// The construction state, if this building is a placeholder.
    ///
    /// `kind` decides: site data on any other kind is ignored.
    pub const fn placeholder(&self) -> Option<&ConstructSite> {
        if matches!(self.kind, BuildingKind::ConstructSite) {
            self.site.as_ref()
        } else {
            None
        }
    }

    /// Enumerate every tile covered by the footprint, column by column.
    ///
    /// Even-sized blocks extend further towards positive coordinates, so a
    /// 2x2 block anchored at `(0, 0)` covers `(0..2, 0..2)`.
    pub fn footprint(&self) -> Vec<TilePos> {
        let size = self.block.size.max(1);
        let back = i32::from(size.saturating_sub(1) / 2);
        let origin = TilePos::new(
            self.anchor.x.saturating_sub(back),
            self.anchor.y.saturating_sub(back),
        );
        let edge = i32::from(size);
        let mut tiles = Vec::with_capacity(usize::from(size).saturating_mul(usize::from(size)));
        for dx in 0..edge {
            for dy in 0..edge {
                tiles.push(origin.offset(TilePos::new(dx, dy)));
            }
        }
        tiles
    }
}

// ---------------------------------------------------------------------------
// Actors
// ---------------------------------------------------------------------------

/// A connected player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Player {
    /// Persistent identity.
    pub uuid: PlayerUuid,
    /// Display name at the time of the action.
    pub name: String,
}

/// A unit acting in the world, possibly controlled by a player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Unit {
    /// Runtime handle of the unit.
    pub id: u32,
    /// Unit type name.
    pub kind: String,
    /// The controlling player, if any.
    #[serde(default)]
    pub player: Option<Player>,
}

/// Who performed a recorded action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum HistoryActor {
    /// A player, indexed in the per-player history.
    Player {
        /// Persistent identity.
        uuid: PlayerUuid,
        /// Display name at the time of the action.
        name: String,
    },
    /// An autonomous unit.
    Unit {
        /// Runtime handle of the unit.
        id: u32,
        /// Unit type name.
        kind: String,
    },
}

impl HistoryActor {
    /// The player identity, if this actor is a player.
    pub const fn player_uuid(&self) -> Option<&PlayerUuid> {
        match self {
            Self::Player { uuid, .. } => Some(uuid),
            Self::Unit { .. } => None,
        }
    }
}

impl From<&Player> for HistoryActor {
    fn from(player: &Player) -> Self {
        Self::Player {
            uuid: player.uuid.clone(),
            name: player.name.clone(),
        }
    }
}

impl From<&Unit> for HistoryActor {
    fn from(unit: &Unit) -> Self {
        match &unit.player {
            Some(player) => Self::from(player),
            None => Self::Unit {
                id: unit.id,
                kind: unit.kind.clone(),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// History entries
// ---------------------------------------------------------------------------

/// One observed action on one tile. Entries are never mutated once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct HistoryEntry {
    /// Tile this entry is recorded under.
    pub position: TilePos,
    /// Anchor tile of the building.
    pub origin: TilePos,
    /// Who performed the action.
    pub actor: HistoryActor,
    /// Block name.
    pub block: String,
    /// What happened.
    pub action: HistoryAction,
    /// Rotation of the building at the time.
    pub rotation: u8,
    /// Decoded configuration, if the block has one worth recording.
    pub configuration: Option<BlockConfig>,
    /// Whether `position` is a secondary tile of a multi-tile building.
    #[serde(rename = "virtual")]
    pub is_virtual: bool,
    /// When the entry was recorded.
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    /// Whether `other` would leave the tile in a functionally identical state:
    /// same block, same decoded configuration, same action. The actor is not
    /// compared.
    pub fn same_configuration(&self, other: &Self) -> bool {
        self.block == other.block
            && self.configuration == other.configuration
            && self.action == other.action
    }
}
