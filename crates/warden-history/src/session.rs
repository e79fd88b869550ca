//! Session-scoped history indices and the insertion policy.
//!
//! A [`HistorySession`] owns two indices of [`LimitedList`]s: one keyed by tile,
//! one keyed by player. Lists are created on first insertion for a key and
//! only dropped by [`HistorySession::reset`].
//!
//! # Insertion policy
//!
//! - **Tile index**: if the newest entry on the tile has the same block,
//!   decoded configuration and action as the incoming one, it is replaced
//!   rather than appended. Blocks that re-send an unchanged configuration
//!   collapse into one entry. The actor is not part of the comparison.
//! - **Player index**: always appended, but only for player actors and only
//!   for the anchor tile of a building.

use std::collections::BTreeMap;
use std::num::NonZeroUsize;

use warden_types::{HistoryEntry, PlayerUuid, SessionId, TilePos};

use crate::config::HistoryConfig;
use crate::limited::LimitedList;

/// How an entry landed in the tile index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// Added after the existing entries.
    Appended,
    /// Took the place of an equivalent newest entry.
    Collapsed,
}

/// Counts of what a reset discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetSummary {
    /// Session that was discarded.
    pub previous: SessionId,
    /// Session that replaced it.
    pub current: SessionId,
    /// Tiles that had history.
    pub positions_cleared: usize,
    /// Players that had history.
    pub players_cleared: usize,
}

/// History for one match.
#[derive(Debug, Clone)]
pub struct HistorySession {
    id: SessionId,
    tile_limit: NonZeroUsize,
    player_limit: NonZeroUsize,
    positions: BTreeMap<TilePos, LimitedList<HistoryEntry>>,
    players: BTreeMap<PlayerUuid, LimitedList<HistoryEntry>>,
}

impl HistorySession {
    /// An empty session with the given retention limits.
    pub fn new(config: &HistoryConfig) -> Self {
        Self {
            id: SessionId::new(),
            tile_limit: config.tile_entries_limit,
            player_limit: config.player_entries_limit,
            positions: BTreeMap::new(),
            players: BTreeMap::new(),
        }
    }

    /// Identifier of the current match.
    pub const fn id(&self) -> SessionId {
        self.id
    }

    /// Number of tiles with at least one entry.
    pub fn tracked_positions(&self) -> usize {
        self.positions.len()
    }

    /// Number of players with at least one entry.
    pub fn tracked_players(&self) -> usize {
        self.players.len()
    }

    /// Insert `entry` into both indices according to the insertion policy.
    pub fn record(&mut self, entry: HistoryEntry) -> Insertion {
        let player = if entry.is_virtual {
            None
        } else {
            entry.actor.player_uuid().cloned()
        };
        if let Some(uuid) = player {
            let limit = self.player_limit;
            self.players
                .entry(uuid)
                .or_insert_with(|| LimitedList::new(limit))
                .push(entry.clone());
        }

        let limit = self.tile_limit;
        let entries = self
            .positions
            .entry(entry.position)
            .or_insert_with(|| LimitedList::new(limit));
        let repeated = entries
            .peek_last()
            .is_some_and(|previous| previous.same_configuration(&entry));
        if repeated {
            entries.replace_last(entry);
            Insertion::Collapsed
        } else {
            entries.push(entry);
            Insertion::Appended
        }
    }

    /// Entries recorded on `position`, oldest first.
    pub fn at(&self, position: TilePos) -> Vec<HistoryEntry> {
        self.positions
            .get(&position)
            .map(LimitedList::to_vec)
            .unwrap_or_default()
    }

    /// Entries recorded for the player `uuid`, oldest first.
    pub fn of(&self, uuid: &str) -> Vec<HistoryEntry> {
        self.players
            .get(uuid)
            .map(LimitedList::to_vec)
            .unwrap_or_default()
    }

    /// Drop every entry and start a new session.
    pub fn reset(&mut self) -> ResetSummary {
        let previous = self.id;
        let positions_cleared = self.positions.len();
        let players_cleared = self.players.len();
        self.positions.clear();
        self.players.clear();
        self.id = SessionId::new();
        ResetSummary {
            previous,
            current: self.id,
            positions_cleared,
            players_cleared,
        }
    }
}
