//! Live block history for the Warden moderation toolkit.
//!
//! Records, for every tile and every player, the structural changes made
//! during the current match: placements, removals, rotations and
//! configurations. Moderators query it to answer who did what, where.
//!
//! # Modules
//!
//! - [`limited`] -- [`LimitedList`], the bounded FIFO buffer behind both
//!   indices.
//! - [`hierarchy`] -- [`KindHierarchy`], parent links between building kinds.
//! - [`registry`] -- [`DecoderRegistry`] and the [`ConfigDecoder`] trait.
//! - [`decoders`] -- Built-in decoders and their registration hook.
//! - [`program`] -- Logic processor program payload reader.
//! - [`session`] -- [`HistorySession`]: the two indices and the insertion
//!   policy.
//! - [`live`] -- [`LiveHistory`], which turns host events into entries.
//! - [`reader`] -- The [`HistoryReader`] query trait.
//! - [`config`] -- YAML configuration.
//! - [`error`] -- Decoder errors.
//!
//! # Usage
//!
//! ```
//! use warden_history::{HistoryConfig, HistoryReader, LiveHistory};
//! use warden_types::{
//!     Block, BuildEndEvent, Building, BuildingKind, HostEvent, Player, PlayerUuid, RawConfig,
//!     TilePos, Unit,
//! };
//!
//! let mut history = LiveHistory::with_builtin_decoders(&HistoryConfig::default());
//! let anchor = TilePos::new(4, 4);
//! let builder = Unit {
//!     id: 1,
//!     kind: String::from("alpha"),
//!     player: Some(Player { uuid: PlayerUuid::from("uuid-1"), name: String::from("one") }),
//! };
//!
//! history.handle(&HostEvent::from(BuildEndEvent {
//!     unit: Some(builder),
//!     tile: anchor,
//!     building: Some(Building::new(BuildingKind::Building, Block::new("router"), anchor)),
//!     breaking: false,
//!     config: RawConfig::Null,
//! }));
//!
//! assert_eq!(history.history_at(4, 4).len(), 1);
//! assert_eq!(history.history_of("uuid-1").len(), 1);
//! ```

pub mod config;
pub mod decoders;
pub mod error;
pub mod hierarchy;
pub mod limited;
pub mod live;
pub mod program;
pub mod reader;
pub mod registry;
pub mod session;

// Re-export primary types at crate root.
pub use config::{ConfigError, HistoryConfig, LoggingConfig, WardenConfig};
pub use decoders::register_builtin_decoders;
pub use error::DecodeError;
pub use hierarchy::KindHierarchy;
pub use limited::LimitedList;
pub use live::LiveHistory;
pub use reader::HistoryReader;
pub use registry::{ConfigDecoder, DecoderRegistry};
pub use session::{HistorySession, Insertion, ResetSummary};
