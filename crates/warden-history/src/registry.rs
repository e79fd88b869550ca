//! Configuration decoder registry.
//!
//! Each [`ConfigDecoder`] is registered against one [`BuildingKind`]. To decode
//! a raw value the registry walks the building's [`KindHierarchy`] ancestry and
//! uses the first decoder it finds, so a decoder on the root acts as the
//! generic fallback and more specific kinds override it.

use std::collections::BTreeMap;

use tracing::debug;
use warden_types::{BlockConfig, Building, BuildingKind, HistoryAction, RawConfig};

use crate::decoders;
use crate::error::DecodeError;
use crate::hierarchy::KindHierarchy;

/// Turns a raw configuration value into a comparable [`BlockConfig`].
pub trait ConfigDecoder: Send + Sync {
    /// Decode `raw` in the context of `building` and the action being
    /// recorded.
    ///
    /// `Ok(None)` means the value carries nothing worth recording.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] when `raw` is malformed for this building.
    fn decode(
        &self,
        building: &Building,
        action: HistoryAction,
        raw: &RawConfig,
    ) -> Result<Option<BlockConfig>, DecodeError>;
}

impl<F> ConfigDecoder for F
where
    F: Fn(&Building, HistoryAction, &RawConfig) -> Result<Option<BlockConfig>, DecodeError>
        + Send
        + Sync,
{
    fn decode(
        &self,
        building: &Building,
        action: HistoryAction,
        raw: &RawConfig,
    ) -> Result<Option<BlockConfig>, DecodeError> {
        self(building, action, raw)
    }
}

/// Lookup table from building kind to decoder.
///
/// Filled once at start-up and only read afterwards.
pub struct DecoderRegistry {
    hierarchy: KindHierarchy,
    decoders: BTreeMap<BuildingKind, Box<dyn ConfigDecoder>>,
}

impl DecoderRegistry {
    /// An empty registry over `hierarchy`.
    pub const fn new(hierarchy: KindHierarchy) -> Self {
        Self {
            hierarchy,
            decoders: BTreeMap::new(),
        }
    }

    /// A registry over the built-in hierarchy with every built-in decoder
    /// registered.
    pub fn builtin() -> Self {
        let mut registry = Self::new(KindHierarchy::builtin());
        decoders::register_builtin_decoders(&mut registry);
        registry
    }

    /// Associate `decoder` with `kind`, replacing any earlier registration.
    ///
    /// Returns `true` if an earlier decoder was replaced.
    pub fn register<D>(&mut self, kind: BuildingKind, decoder: D) -> bool
    where
        D: ConfigDecoder + 'static,
    {
        self.decoders.insert(kind, Box::new(decoder)).is_some()
    }

    /// The hierarchy used for lookups.
    pub const fn hierarchy(&self) -> &KindHierarchy {
        &self.hierarchy
    }

    /// Whether a decoder is registered for exactly `kind`.
    pub fn contains(&self, kind: BuildingKind) -> bool {
        self.decoders.contains_key(&kind)
    }

    /// The kind whose decoder would handle a building of `kind`.
    pub fn resolve_kind(&self, kind: BuildingKind) -> Option<BuildingKind> {
        self.hierarchy
            .ancestry(kind)
            .find(|candidate| self.decoders.contains_key(candidate))
    }

    /// Decode `raw` for `building`.
    ///
    /// Returns `None` without consulting any decoder when the building's block
    /// declares no configuration options, when no decoder is found up to the
    /// root, or when the decoder rejects the value.
    pub fn resolve(
        &self,
        building: &Building,
        action: HistoryAction,
        raw: &RawConfig,
    ) -> Option<BlockConfig> {
        if !building.block.configurable {
            return None;
        }
        let kind = self.resolve_kind(building.kind)?;
        let decoder = self.decoders.get(&kind)?;
        match decoder.decode(building, action, raw) {
            Ok(config) => config,
            Err(err) => {
                debug!(
                    block = %building.block.name,
                    anchor = %building.anchor,
                    ?kind,
                    ?action,
                    %err,
                    "Configuration decode failed, recording without configuration"
                );
                None
            }
        }
    }
}

impl Default for DecoderRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl core::fmt::Debug for DecoderRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DecoderRegistry")
            .field("hierarchy", &self.hierarchy)
            .field("decoders", &self.decoders.keys().collect::<Vec<_>>())
            .finish()
    }
}
