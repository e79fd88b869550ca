//! Built-in configuration decoders.
//!
//! [`register_builtin_decoders`] is the start-up hook that fills a
//! [`DecoderRegistry`] for the stock building kinds. [`GenericDecoder`] sits on
//! the root kind and handles the common value shapes; the rest override it for
//! kinds whose raw values need the building's context to mean anything, such
//! as packed tile references that must become coordinates.

use warden_types::{
    BlockConfig, Building, BuildingKind, HistoryAction, LogicLink, RawConfig, TilePos,
};

use crate::error::DecodeError;
use crate::program::parse_program;
use crate::registry::{ConfigDecoder, DecoderRegistry};

/// Raw integer the host uses for "no link" and "no plan".
const NONE_SENTINEL: i32 = -1;

/// Register the decoder for every built-in kind that needs one.
pub fn register_builtin_decoders(registry: &mut DecoderRegistry) {
    registry.register(BuildingKind::Building, GenericDecoder);
    registry.register(BuildingKind::Canvas, CanvasDecoder);
    registry.register(BuildingKind::ItemBridge, LinkDecoder);
    registry.register(BuildingKind::Light, LightDecoder);
    registry.register(BuildingKind::LogicProcessor, LogicDecoder);
    registry.register(BuildingKind::MassDriver, LinkDecoder);
    registry.register(BuildingKind::Message, MessageDecoder);
    registry.register(BuildingKind::PayloadDriver, LinkDecoder);
    registry.register(BuildingKind::PowerNode, PowerNodeDecoder);
    registry.register(BuildingKind::UnitFactory, UnitFactoryDecoder);
}

/// Toggle of a single link: connected if the building now links to it.
fn toggled_link(building: &Building, packed: i32) -> BlockConfig {
    let target = TilePos::from_packed(packed);
    BlockConfig::link(target, building.links.contains(&target))
}

/// Fallback for every kind: switches, content selections and resets.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericDecoder;

impl ConfigDecoder for GenericDecoder {
    fn decode(
        &self,
        _building: &Building,
        action: HistoryAction,
        raw: &RawConfig,
    ) -> Result<Option<BlockConfig>, DecodeError> {
        Ok(match raw {
            RawConfig::Bool(value) => Some(BlockConfig::Enable { value: *value }),
            RawConfig::Content(content) => Some(BlockConfig::Content {
                value: content.clone(),
            }),
            RawConfig::Null if action == HistoryAction::Configure => Some(BlockConfig::Reset),
            _ => None,
        })
    }
}

/// Point-to-point transport links: item bridges, mass drivers and payload
/// drivers.
///
/// Integers are packed absolute tile references; points are offsets from the
/// anchor. Linking a building to itself, or to `-1`, breaks the link.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkDecoder;

impl ConfigDecoder for LinkDecoder {
    fn decode(
        &self,
        building: &Building,
        action: HistoryAction,
        raw: &RawConfig,
    ) -> Result<Option<BlockConfig>, DecodeError> {
        let target = match raw {
            RawConfig::Int(NONE_SENTINEL) => return Ok(Some(BlockConfig::unlinked())),
            RawConfig::Int(packed) => TilePos::from_packed(*packed),
            RawConfig::Point(offset) => building.anchor.offset(*offset),
            RawConfig::Null if action == HistoryAction::Configure => {
                return Ok(Some(BlockConfig::unlinked()));
            }
            _ => return Ok(None),
        };
        if target == building.anchor {
            return Ok(Some(BlockConfig::unlinked()));
        }
        Ok(Some(BlockConfig::link(target, true)))
    }
}

/// Power nodes: one laser link toggled at a time, or a full set on placement.
#[derive(Debug, Clone, Copy, Default)]
pub struct PowerNodeDecoder;

impl ConfigDecoder for PowerNodeDecoder {
    fn decode(
        &self,
        building: &Building,
        _action: HistoryAction,
        raw: &RawConfig,
    ) -> Result<Option<BlockConfig>, DecodeError> {
        Ok(match raw {
            RawConfig::Int(packed) => Some(toggled_link(building, *packed)),
            RawConfig::Points(offsets) => {
                let positions: Vec<TilePos> = offsets
                    .iter()
                    .map(|offset| building.anchor.offset(*offset))
                    .collect();
                let connection = !positions.is_empty();
                Some(BlockConfig::Link {
                    positions,
                    connection,
                })
            }
            RawConfig::Null => Some(BlockConfig::unlinked()),
            _ => None,
        })
    }
}

/// Logic processors: link toggles and uploaded programs.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogicDecoder;

impl ConfigDecoder for LogicDecoder {
    fn decode(
        &self,
        building: &Building,
        _action: HistoryAction,
        raw: &RawConfig,
    ) -> Result<Option<BlockConfig>, DecodeError> {
        match raw {
            RawConfig::Int(packed) => Ok(Some(toggled_link(building, *packed))),
            RawConfig::Bytes(payload) => {
                let program = parse_program(payload)?;
                let links = program
                    .links
                    .into_iter()
                    .map(|(name, offset)| LogicLink {
                        name,
                        position: building.anchor.offset(offset),
                    })
                    .collect();
                Ok(Some(BlockConfig::Code {
                    code: program.code,
                    links,
                }))
            }
            _ => Ok(None),
        }
    }
}

/// Light fixtures: an RGBA8888 color.
#[derive(Debug, Clone, Copy, Default)]
pub struct LightDecoder;

impl ConfigDecoder for LightDecoder {
    fn decode(
        &self,
        _building: &Building,
        _action: HistoryAction,
        raw: &RawConfig,
    ) -> Result<Option<BlockConfig>, DecodeError> {
        Ok(match raw {
            RawConfig::Int(color) => Some(BlockConfig::Light {
                color: u32::from_be_bytes(color.to_be_bytes()),
            }),
            _ => None,
        })
    }
}

/// Message boards.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageDecoder;

impl ConfigDecoder for MessageDecoder {
    fn decode(
        &self,
        _building: &Building,
        _action: HistoryAction,
        raw: &RawConfig,
    ) -> Result<Option<BlockConfig>, DecodeError> {
        Ok(match raw {
            RawConfig::Text(text) => Some(BlockConfig::Text { text: text.clone() }),
            _ => None,
        })
    }
}

/// Canvases.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanvasDecoder;

impl ConfigDecoder for CanvasDecoder {
    fn decode(
        &self,
        _building: &Building,
        _action: HistoryAction,
        raw: &RawConfig,
    ) -> Result<Option<BlockConfig>, DecodeError> {
        Ok(match raw {
            RawConfig::Bytes(content) => Some(BlockConfig::Canvas {
                content: content.clone(),
            }),
            _ => None,
        })
    }
}

/// Unit factories: plan indices resolve to the unit type they produce.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitFactoryDecoder;

impl ConfigDecoder for UnitFactoryDecoder {
    fn decode(
        &self,
        building: &Building,
        _action: HistoryAction,
        raw: &RawConfig,
    ) -> Result<Option<BlockConfig>, DecodeError> {
        match raw {
            RawConfig::Null | RawConfig::Int(NONE_SENTINEL) => Ok(Some(BlockConfig::Reset)),
            RawConfig::Int(index) => {
                let plans = &building.block.unit_plans;
                usize::try_from(*index)
                    .ok()
                    .and_then(|i| plans.get(i))
                    .map(|plan| Some(BlockConfig::Content { value: plan.clone() }))
                    .ok_or(DecodeError::PlanOutOfRange {
                        index: *index,
                        plans: plans.len(),
                    })
            }
            RawConfig::Content(content) => Ok(Some(BlockConfig::Content {
                value: content.clone(),
            })),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use warden_types::{Block, ContentKind, ContentRef};

    use super::*;
    use crate::program::tests::encode;

    fn building(kind: BuildingKind, anchor: TilePos) -> Building {
        Building::new(kind, Block::new("test").configurable(), anchor)
    }

    fn packed(x: i16, y: i16) -> i32 {
        let [a, b] = x.to_be_bytes();
        let [c, d] = y.to_be_bytes();
        i32::from_be_bytes([a, b, c, d])
    }

    fn decode(
        decoder: &dyn ConfigDecoder,
        building: &Building,
        action: HistoryAction,
        raw: RawConfig,
    ) -> Result<Option<BlockConfig>, DecodeError> {
        decoder.decode(building, action, &raw)
    }

    #[test]
    fn generic_handles_switches_content_and_reset() {
        let b = building(BuildingKind::Sorter, TilePos::new(0, 0));
        let copper = ContentRef::new(ContentKind::Item, "copper");
        assert_eq!(
            decode(&GenericDecoder, &b, HistoryAction::Configure, RawConfig::Bool(true)),
            Ok(Some(BlockConfig::Enable { value: true }))
        );
        assert_eq!(
            decode(&GenericDecoder, &b, HistoryAction::Place, RawConfig::Content(copper.clone())),
            Ok(Some(BlockConfig::Content { value: copper }))
        );
        assert_eq!(
            decode(&GenericDecoder, &b, HistoryAction::Configure, RawConfig::Null),
            Ok(Some(BlockConfig::Reset))
        );
        assert_eq!(decode(&GenericDecoder, &b, HistoryAction::Place, RawConfig::Null), Ok(None));
        assert_eq!(decode(&GenericDecoder, &b, HistoryAction::Configure, RawConfig::Int(3)), Ok(None));
    }

    #[test]
    fn bridge_resolves_packed_reference_to_coordinate() {
        let b = building(BuildingKind::ItemBridge, TilePos::new(10, 10));
        assert_eq!(
            decode(&LinkDecoder, &b, HistoryAction::Configure, RawConfig::Int(packed(13, 10))),
            Ok(Some(BlockConfig::link(TilePos::new(13, 10), true)))
        );
        assert_eq!(
            decode(&LinkDecoder, &b, HistoryAction::Place, RawConfig::Point(TilePos::new(0, -3))),
            Ok(Some(BlockConfig::link(TilePos::new(10, 7), true)))
        );
    }

    #[test]
    fn bridge_unlinks_on_sentinel_self_and_reset() {
        let b = building(BuildingKind::MassDriver, TilePos::new(5, 5));
        for raw in [RawConfig::Int(-1), RawConfig::Int(packed(5, 5)), RawConfig::Null] {
            assert_eq!(
                decode(&LinkDecoder, &b, HistoryAction::Configure, raw),
                Ok(Some(BlockConfig::unlinked()))
            );
        }
        assert_eq!(decode(&LinkDecoder, &b, HistoryAction::Place, RawConfig::Null), Ok(None));
    }

    #[test]
    fn power_node_toggle_reads_current_links() {
        let mut b = building(BuildingKind::PowerNode, TilePos::new(0, 0));
        b.links = vec![TilePos::new(4, 0)];
        assert_eq!(
            decode(&PowerNodeDecoder, &b, HistoryAction::Configure, RawConfig::Int(packed(4, 0))),
            Ok(Some(BlockConfig::link(TilePos::new(4, 0), true)))
        );
        assert_eq!(
            decode(&PowerNodeDecoder, &b, HistoryAction::Configure, RawConfig::Int(packed(0, 6))),
            Ok(Some(BlockConfig::link(TilePos::new(0, 6), false)))
        );
    }

    #[test]
    fn power_node_placement_links_are_absolute() {
        let b = building(BuildingKind::PowerNode, TilePos::new(2, 2));
        let raw = RawConfig::Points(vec![TilePos::new(1, 0), TilePos::new(-2, 3)]);
        assert_eq!(
            decode(&PowerNodeDecoder, &b, HistoryAction::Place, raw),
            Ok(Some(BlockConfig::Link {
                positions: vec![TilePos::new(3, 2), TilePos::new(0, 5)],
                connection: true,
            }))
        );
        assert_eq!(
            decode(&PowerNodeDecoder, &b, HistoryAction::Place, RawConfig::Points(Vec::new())),
            Ok(Some(BlockConfig::unlinked()))
        );
    }

    #[test]
    fn logic_program_links_become_absolute() {
        let b = building(BuildingKind::LogicProcessor, TilePos::new(20, 30));
        let payload = encode("control enabled door1 0", &[("door1", -1, 2)]);
        assert_eq!(
            decode(&LogicDecoder, &b, HistoryAction::Configure, RawConfig::Bytes(payload)),
            Ok(Some(BlockConfig::Code {
                code: String::from("control enabled door1 0"),
                links: vec![LogicLink {
                    name: String::from("door1"),
                    position: TilePos::new(19, 32),
                }],
            }))
        );
    }

    #[test]
    fn logic_rejects_malformed_program() {
        let b = building(BuildingKind::LogicProcessor, TilePos::new(0, 0));
        let result = decode(&LogicDecoder, &b, HistoryAction::Configure, RawConfig::Bytes(vec![1, 0]));
        assert!(matches!(result, Err(DecodeError::Truncated { .. })));
    }

    #[test]
    fn light_color_is_unsigned() {
        let b = building(BuildingKind::Light, TilePos::new(0, 0));
        assert_eq!(
            decode(&LightDecoder, &b, HistoryAction::Configure, RawConfig::Int(-1)),
            Ok(Some(BlockConfig::Light { color: u32::MAX }))
        );
    }

    #[test]
    fn message_and_canvas_copy_payloads() {
        let b = building(BuildingKind::Message, TilePos::new(0, 0));
        assert_eq!(
            decode(&MessageDecoder, &b, HistoryAction::Configure, RawConfig::Text(String::from("hi"))),
            Ok(Some(BlockConfig::Text { text: String::from("hi") }))
        );
        assert_eq!(
            decode(&CanvasDecoder, &b, HistoryAction::Configure, RawConfig::Bytes(vec![9, 8])),
            Ok(Some(BlockConfig::Canvas { content: vec![9, 8] }))
        );
    }

    #[test]
    fn unit_factory_resolves_plan_index() {
        let dagger = ContentRef::new(ContentKind::Unit, "dagger");
        let flare = ContentRef::new(ContentKind::Unit, "flare");
        let block = Block::new("ground-factory")
            .configurable()
            .with_unit_plans(vec![dagger, flare.clone()]);
        let b = Building::new(BuildingKind::UnitFactory, block, TilePos::new(0, 0));

        assert_eq!(
            decode(&UnitFactoryDecoder, &b, HistoryAction::Configure, RawConfig::Int(1)),
            Ok(Some(BlockConfig::Content { value: flare }))
        );
        assert_eq!(
            decode(&UnitFactoryDecoder, &b, HistoryAction::Configure, RawConfig::Int(-1)),
            Ok(Some(BlockConfig::Reset))
        );
        assert_eq!(
            decode(&UnitFactoryDecoder, &b, HistoryAction::Configure, RawConfig::Int(5)),
            Err(DecodeError::PlanOutOfRange { index: 5, plans: 2 })
        );
    }
}
