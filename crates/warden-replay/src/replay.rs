//! JSON-lines replay format.
//!
//! Each non-blank input line is one of:
//!
//! ```text
//! {"event": {"type": "build_end", ...}}
//! {"query": {"tile": {"x": 4, "y": 7}}}
//! {"query": {"player": "uuid-1"}}
//! ```
//!
//! Lines starting with `#` are comments. Every query produces one
//! [`QueryResult`] line on the output.

use std::io::{BufRead, Write};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use warden_types::{HistoryEntry, HostEvent, PlayerUuid, TilePos};

use crate::error::ReplayError;
use crate::intake::HistoryHandle;

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplayLine {
    /// A host event to feed into the engine.
    Event(HostEvent),
    /// A history lookup.
    Query(Query),
}

/// A history lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Query {
    /// Everything recorded on one tile.
    Tile(TilePos),
    /// Everything one player did.
    Player(PlayerUuid),
}

/// Output line written for each [`Query`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult {
    /// The query that was answered.
    pub query: Query,
    /// Matching entries, oldest first.
    pub entries: Vec<HistoryEntry>,
}

/// Counters reported after a replay completes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Host events submitted.
    pub events: usize,
    /// Queries answered.
    pub queries: usize,
    /// Blank and comment lines skipped.
    pub skipped: usize,
}

/// Parse a single line. Returns `Ok(None)` for blank and comment lines.
pub fn parse_line(line: &str) -> Result<Option<ReplayLine>, serde_json::Error> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(trimmed).map(Some)
}

/// Feed every line of `input` through `handle`, writing query results to
/// `output`.
///
/// Stops at the first malformed line.
pub async fn run<R, W>(
    input: R,
    mut output: W,
    handle: &HistoryHandle,
) -> Result<ReplaySummary, ReplayError>
where
    R: BufRead,
    W: Write,
{
    let mut summary = ReplaySummary::default();

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        let number = index.saturating_add(1);
        let parsed = parse_line(&line).map_err(|source| {
            warn!(line = number, error = %source, "Rejected replay line");
            ReplayError::Parse {
                line: number,
                source,
            }
        })?;

        match parsed {
            None => summary.skipped = summary.skipped.saturating_add(1),
            Some(ReplayLine::Event(event)) => {
                handle.submit(event)?;
                summary.events = summary.events.saturating_add(1);
            }
            Some(ReplayLine::Query(query)) => {
                let entries = match &query {
                    Query::Tile(position) => handle.history_at(position.x, position.y).await?,
                    Query::Player(uuid) => handle.history_of(uuid.as_str()).await?,
                };
                debug!(line = number, entries = entries.len(), "Answered query");
                let result = QueryResult { query, entries };
                serde_json::to_writer(&mut output, &result)
                    .map_err(|source| ReplayError::Serialize { source })?;
                output.write_all(b"\n")?;
                summary.queries = summary.queries.saturating_add(1);
            }
        }
    }

    output.flush()?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_comment_lines_are_skipped() {
        assert!(matches!(parse_line("   "), Ok(None)));
        assert!(matches!(parse_line("# setup"), Ok(None)));
    }

    #[test]
    fn queries_parse() {
        let tile = parse_line(r#"{"query": {"tile": {"x": 4, "y": -7}}}"#).ok().flatten();
        assert_eq!(
            tile,
            Some(ReplayLine::Query(Query::Tile(TilePos::new(4, -7))))
        );

        let player = parse_line(r#"{"query": {"player": "uuid-1"}}"#).ok().flatten();
        assert_eq!(
            player,
            Some(ReplayLine::Query(Query::Player(PlayerUuid::from("uuid-1"))))
        );
    }

    #[test]
    fn state_change_event_parses() {
        let line = r#"{"event": {"type": "state_change", "from": "menu", "to": "playing"}}"#;
        let parsed = parse_line(line).ok().flatten();
        assert!(matches!(
            parsed,
            Some(ReplayLine::Event(HostEvent::StateChange(_)))
        ));
    }

    #[test]
    fn unknown_shape_is_an_error() {
        assert!(parse_line(r#"{"command": "noop"}"#).is_err());
    }
}
