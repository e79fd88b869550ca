//! Raw configuration values as the host delivers them, and the decoded form
//! stored in history entries.
//!
//! A [`RawConfig`] is only meaningful together with the building it belongs
//! to: the same `Int` is a packed tile reference for a bridge, a color for a
//! light and a plan index for a unit factory. Decoders turn it into a
//! [`BlockConfig`], which compares equal whenever two configurations have the
//! same effect in the world.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::structs::{ContentRef, LogicLink, TilePos};

/// An opaque configuration value supplied by a host event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum RawConfig {
    /// No value.
    #[default]
    Null,
    /// A boolean flag.
    Bool(bool),
    /// An integer whose meaning depends on the building.
    Int(i32),
    /// A string.
    Text(String),
    /// A binary payload.
    Bytes(Vec<u8>),
    /// A tile offset relative to the building anchor.
    Point(TilePos),
    /// Several tile offsets relative to the building anchor.
    Points(Vec<TilePos>),
    /// A piece of game content.
    Content(ContentRef),
}

/// A decoded, comparable configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum BlockConfig {
    /// Enabled or disabled.
    Enable {
        /// New state.
        value: bool,
    },
    /// Selected content, e.g. a sorter item or a factory unit.
    Content {
        /// The selected content.
        value: ContentRef,
    },
    /// Links to other buildings were made or broken.
    Link {
        /// Absolute positions of the affected targets.
        positions: Vec<TilePos>,
        /// `true` when the targets are now connected.
        connection: bool,
    },
    /// Text written to a message board.
    Text {
        /// The text.
        text: String,
    },
    /// Program loaded into a logic processor.
    Code {
        /// Program source.
        code: String,
        /// Named links, with absolute positions.
        links: Vec<LogicLink>,
    },
    /// Pixel data painted on a canvas.
    Canvas {
        /// Packed pixel data.
        content: Vec<u8>,
    },
    /// Color of a light fixture.
    Light {
        /// RGBA8888 color.
        color: u32,
    },
    /// The configuration was cleared.
    Reset,
}

impl BlockConfig {
    /// A link change affecting a single target.
    pub fn link(position: TilePos, connection: bool) -> Self {
        Self::Link {
            positions: vec![position],
            connection,
        }
    }

    /// All links were removed.
    pub const fn unlinked() -> Self {
        Self::Link {
            positions: Vec::new(),
            connection: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::ContentKind;

    #[test]
    fn raw_config_uses_adjacent_tagging() {
        let raw = RawConfig::Int(-1);
        let json = serde_json::to_value(&raw).ok();
        assert_eq!(
            json,
            Some(serde_json::json!({ "type": "int", "value": -1 }))
        );
    }

    #[test]
    fn raw_config_null_roundtrips_without_value() {
        let parsed: Option<RawConfig> = serde_json::from_str(r#"{"type":"null"}"#).ok();
        assert_eq!(parsed, Some(RawConfig::Null));
    }

    #[test]
    fn decoded_configs_compare_by_value() {
        let a = BlockConfig::Content {
            value: ContentRef::new(ContentKind::Item, "copper"),
        };
        let b = BlockConfig::Content {
            value: ContentRef::new(ContentKind::Item, "copper"),
        };
        assert_eq!(a, b);
        assert_ne!(a, BlockConfig::Reset);
        assert_eq!(BlockConfig::unlinked(), BlockConfig::Link { positions: vec![], connection: false });
    }
}
