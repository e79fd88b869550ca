//! The live history engine.
//!
//! [`LiveHistory`] consumes host events one at a time, turns each into zero
//! or more [`HistoryEntry`] values (one per tile the building covers) and
//! stores them in the current [`HistorySession`].
//!
//! Events are expected to arrive sequentially from a single game loop; the
//! engine holds no locks. Events that cannot be attributed to an actor are
//! dropped without side effects.

use chrono::Utc;
use tracing::{debug, info};
use warden_types::{
    Block, BuildBeginEvent, BuildEndEvent, Building, ConfigEvent, GameState, HistoryAction,
    HistoryActor, HistoryEntry, HostEvent, RawConfig, RotateEvent, SessionId, StateChangeEvent, TilePos,
};

use crate::config::HistoryConfig;
use crate::reader::HistoryReader;
use crate::registry::DecoderRegistry;
use crate::session::{HistorySession, Insertion};

/// Records block history for the current match.
#[derive(Debug)]
pub struct LiveHistory {
    registry: DecoderRegistry,
    session: HistorySession,
}

impl LiveHistory {
    /// An engine using `registry` to decode configurations.
    pub fn new(config: &HistoryConfig, registry: DecoderRegistry) -> Self {
        Self {
            registry,
            session: HistorySession::new(config),
        }
    }

    /// An engine with the built-in decoders registered.
    pub fn with_builtin_decoders(config: &HistoryConfig) -> Self {
        Self::new(config, DecoderRegistry::builtin())
    }

    /// The current session.
    pub const fn session(&self) -> &HistorySession {
        &self.session
    }

    /// Identifier of the current session.
    pub const fn session_id(&self) -> SessionId {
        self.session.id()
    }

    /// The decoder registry.
    pub const fn registry(&self) -> &DecoderRegistry {
        &self.registry
    }

    /// Dispatch a host event to its handler.
    pub fn handle(&mut self, event: &HostEvent) {
        match event {
            HostEvent::BuildEnd(event) => self.on_build_end(event),
            HostEvent::BuildBegin(event) => self.on_build_begin(event),
            HostEvent::Config(event) => self.on_config(event),
            HostEvent::Rotate(event) => self.on_rotate(event),
            HostEvent::StateChange(event) => self.on_state_change(*event),
        }
    }

    /// A construction or deconstruction finished.
    ///
    /// For a removal the recorded block is the one that was torn down, taken
    /// from the construction placeholder still occupying the tile.
    pub fn on_build_end(&mut self, event: &BuildEndEvent) {
        let (Some(unit), Some(building)) = (&event.unit, &event.building) else {
            debug!(tile = %event.tile, "Build end without builder or building, ignored");
            return;
        };
        let block = if event.breaking {
            building.placeholder().map_or(&building.block, |site| &site.current)
        } else {
            &building.block
        };
        self.record(
            building,
            block,
            &HistoryActor::from(unit),
            HistoryAction::finished(event.breaking),
            &event.config,
        );
    }

    /// A construction or deconstruction started.
    ///
    /// Only recorded while the tile holds a construction placeholder; the
    /// entry names the target block and carries its last configuration.
    pub fn on_build_begin(&mut self, event: &BuildBeginEvent) {
        let Some(unit) = &event.unit else {
            debug!(tile = %event.tile, "Build begin without builder, ignored");
            return;
        };
        let Some(building) = &event.building else {
            debug!(tile = %event.tile, "Build begin without building, ignored");
            return;
        };
        let Some(site) = building.placeholder() else {
            debug!(tile = %event.tile, kind = ?building.kind, "Build begin outside a construction site, ignored");
            return;
        };
        self.record(
            building,
            &site.current,
            &HistoryActor::from(unit),
            HistoryAction::in_progress(event.breaking),
            &site.last_config,
        );
    }

    /// A building was configured by a player.
    pub fn on_config(&mut self, event: &ConfigEvent) {
        let Some(player) = &event.player else {
            debug!(anchor = %event.building.anchor, "Configuration without player, ignored");
            return;
        };
        self.record(
            &event.building,
            &event.building.block,
            &HistoryActor::from(player),
            HistoryAction::Configure,
            &event.value,
        );
    }

    /// A building was rotated.
    pub fn on_rotate(&mut self, event: &RotateEvent) {
        let Some(unit) = &event.unit else {
            debug!(anchor = %event.building.anchor, "Rotation without unit, ignored");
            return;
        };
        if event.building.rotation == event.previous {
            return;
        }
        self.record(
            &event.building,
            &event.building.block,
            &HistoryActor::from(unit),
            HistoryAction::Rotate,
            &event.building.config,
        );
    }

    /// The game state changed. Entering a match from the menu clears all
    /// history.
    pub fn on_state_change(&mut self, event: StateChangeEvent) {
        if !GameState::starts_match(event.from, event.to) {
            return;
        }
        let summary = self.session.reset();
        info!(
            previous_session = %summary.previous,
            session = %summary.current,
            positions_cleared = summary.positions_cleared,
            players_cleared = summary.players_cleared,
            "New match started, block history cleared"
        );
    }

    /// Record one entry per tile covered by `building`.
    fn record(
        &mut self,
        building: &Building,
        block: &Block,
        actor: &HistoryActor,
        action: HistoryAction,
        raw: &RawConfig,
    ) {
        let configuration = self.registry.resolve(building, action, raw);
        let timestamp = Utc::now();
        for position in building.footprint() {
            let entry = HistoryEntry {
                position,
                origin: building.anchor,
                actor: actor.clone(),
                block: block.name.clone(),
                action,
                rotation: building.rotation,
                configuration: configuration.clone(),
                is_virtual: position != building.anchor,
                timestamp,
            };
            if self.session.record(entry) == Insertion::Collapsed {
                debug!(%position, block = %block.name, ?action, "Repeated configuration collapsed");
            }
        }
    }
}

impl HistoryReader for LiveHistory {
    fn history_at(&self, x: i32, y: i32) -> Vec<HistoryEntry> {
        self.session.at(TilePos::new(x, y))
    }

    fn history_of(&self, uuid: &str) -> Vec<HistoryEntry> {
        self.session.of(uuid)
    }
}
