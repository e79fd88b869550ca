//! Shared type definitions for the Warden block history engine.
//!
//! Every crate in the workspace speaks in these types. They are exported to
//! `TypeScript` via `ts-rs` so moderation dashboards can render history
//! entries without hand-written mirrors.
//!
//! # Modules
//!
//! - [`ids`] -- Session and player identifiers
//! - [`enums`] -- History actions, building kinds, content kinds, game state
//! - [`structs`] -- Coordinates, blocks, buildings, actors, history entries
//! - [`configuration`] -- Raw host configuration values and their decoded form
//! - [`events`] -- Events raised by the host game loop

pub mod configuration;
pub mod enums;
pub mod events;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use configuration::{BlockConfig, RawConfig};
pub use enums::{BuildingKind, ContentKind, GameState, HistoryAction};
pub use events::{
    BuildBeginEvent, BuildEndEvent, ConfigEvent, HostEvent, RotateEvent, StateChangeEvent,
};
pub use ids::{PlayerUuid, SessionId};
pub use structs::{
    Block, Building, ConstructSite, ContentRef, HistoryActor, HistoryEntry, LogicLink, Player,
    TilePos, Unit,
};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // Files are written to `bindings/` relative to the crate root.
        use ts_rs::TS;

        // IDs
        let _ = crate::ids::PlayerUuid::export_all();

        // Enums
        let _ = crate::enums::HistoryAction::export_all();
        let _ = crate::enums::BuildingKind::export_all();
        let _ = crate::enums::ContentKind::export_all();
        let _ = crate::enums::GameState::export_all();

        // Structs
        let _ = crate::structs::TilePos::export_all();
        let _ = crate::structs::ContentRef::export_all();
        let _ = crate::structs::LogicLink::export_all();
        let _ = crate::structs::Block::export_all();
        let _ = crate::structs::ConstructSite::export_all();
        let _ = crate::structs::Building::export_all();
        let _ = crate::structs::Player::export_all();
        let _ = crate::structs::Unit::export_all();
        let _ = crate::structs::HistoryActor::export_all();
        let _ = crate::structs::HistoryEntry::export_all();

        // Configuration
        let _ = crate::configuration::RawConfig::export_all();
        let _ = crate::configuration::BlockConfig::export_all();

        // Events
        let _ = crate::events::HostEvent::export_all();
    }
}
