//! Events raised by the host game loop.
//!
//! These are the only inputs the history engine consumes. Each payload
//! mirrors what the host knows at the moment it fires the event; missing
//! actors are `None` rather than placeholder values.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::configuration::RawConfig;
use crate::enums::GameState;
use crate::structs::{Building, Player, TilePos, Unit};

/// A block finished construction or deconstruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BuildEndEvent {
    /// The builder, if any.
    #[serde(default)]
    pub unit: Option<Unit>,
    /// Tile the construction happened on.
    pub tile: TilePos,
    /// Building on the tile when the event fired. For a finished
    /// deconstruction this is the construction placeholder.
    #[serde(default)]
    pub building: Option<Building>,
    /// `true` when a block was removed.
    #[serde(default)]
    pub breaking: bool,
    /// Configuration applied on placement.
    #[serde(default)]
    pub config: RawConfig,
}

/// Construction or deconstruction of a block has started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BuildBeginEvent {
    /// The builder, if any.
    #[serde(default)]
    pub unit: Option<Unit>,
    /// Tile the construction happens on.
    pub tile: TilePos,
    /// Building currently on the tile.
    #[serde(default)]
    pub building: Option<Building>,
    /// `true` when a block is being removed.
    #[serde(default)]
    pub breaking: bool,
}

/// A building was configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ConfigEvent {
    /// The configuring player, if any.
    #[serde(default)]
    pub player: Option<Player>,
    /// The configured building, after the configuration was applied.
    pub building: Building,
    /// The configuration value that was applied.
    #[serde(default)]
    pub value: RawConfig,
}

/// A building was rotated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RotateEvent {
    /// The rotating unit, if any.
    #[serde(default)]
    pub unit: Option<Unit>,
    /// The building, carrying its new rotation.
    pub building: Building,
    /// Rotation before the change.
    pub previous: u8,
}

/// The host game loop changed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct StateChangeEvent {
    /// State before the transition.
    pub from: GameState,
    /// State after the transition.
    pub to: GameState,
}

/// Any event the history engine listens to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum HostEvent {
    /// See [`BuildEndEvent`].
    BuildEnd(Box<BuildEndEvent>),
    /// See [`BuildBeginEvent`].
    BuildBegin(Box<BuildBeginEvent>),
    /// See [`ConfigEvent`].
    Config(Box<ConfigEvent>),
    /// See [`RotateEvent`].
    Rotate(Box<RotateEvent>),
    /// See [`StateChangeEvent`].
    StateChange(StateChangeEvent),
}

impl From<BuildEndEvent> for HostEvent {
    fn from(event: BuildEndEvent) -> Self {
        Self::BuildEnd(Box::new(event))
    }
}

impl From<BuildBeginEvent> for HostEvent {
    fn from(event: BuildBeginEvent) -> Self {
        Self::BuildBegin(Box::new(event))
    }
}

impl From<ConfigEvent> for HostEvent {
    fn from(event: ConfigEvent) -> Self {
        Self::Config(Box::new(event))
    }
}

impl From<RotateEvent> for HostEvent {
    fn from(event: RotateEvent) -> Self {
        Self::Rotate(Box::new(event))
    }
}

impl From<StateChangeEvent> for HostEvent {
    fn from(event: StateChangeEvent) -> Self {
        Self::StateChange(event)
    }
}
