//! Read access to recorded history.

use warden_types::HistoryEntry;

/// Point and player history queries.
///
/// Results are independent copies, oldest first; unknown keys yield an empty
/// `Vec`.
pub trait HistoryReader {
    /// Entries recorded on the tile at `(x, y)`.
    fn history_at(&self, x: i32, y: i32) -> Vec<HistoryEntry>;

    /// Entries recorded for the player with persistent identity `uuid`.
    fn history_of(&self, uuid: &str) -> Vec<HistoryEntry>;
}
