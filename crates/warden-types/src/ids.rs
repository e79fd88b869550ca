//! Type-safe identifier wrappers.
//!
//! [`SessionId`] wraps a UUID v7 so that resets can be correlated in logs.
//! [`PlayerUuid`] wraps the host's persistent player identity string, which
//! is not a UUID despite the name: the host hands out opaque base64 tokens.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Identifier of one match, regenerated every time the history is reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionId(Uuid);

impl SessionId {
    /// A fresh, time-ordered (UUID v7) identifier.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for SessionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Persistent identity of a player across reconnects.
///
/// This is the key of the per-player history index.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export, export_to = "bindings/")]
pub struct PlayerUuid(pub String);

impl PlayerUuid {
    /// Borrow the identity string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for PlayerUuid {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl core::borrow::Borrow<str> for PlayerUuid {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerUuid {
    fn from(uuid: &str) -> Self {
        Self(uuid.to_owned())
    }
}

impl From<String> for PlayerUuid {
    fn from(uuid: String) -> Self {
        Self(uuid)
    }
}
