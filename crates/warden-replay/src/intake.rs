//! Serialized event intake.
//!
//! [`LiveHistory`] assumes events arrive one at a time from a single loop.
//! [`HistoryService`] enforces that when callers live on other tasks or
//! threads: every event and every query goes through one ordered channel
//! drained by one worker task, which owns the engine. A query therefore
//! observes every event submitted before it on the same handle.

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::debug;
use warden_history::{HistoryReader, LiveHistory};
use warden_types::{HistoryEntry, HostEvent};

use crate::error::ReplayError;

/// Work items processed by the worker, in submission order.
#[derive(Debug)]
enum Command {
    Event(HostEvent),
    HistoryAt {
        x: i32,
        y: i32,
        reply: oneshot::Sender<Vec<HistoryEntry>>,
    },
    HistoryOf {
        uuid: String,
        reply: oneshot::Sender<Vec<HistoryEntry>>,
    },
}

/// Spawns the worker that owns a [`LiveHistory`].
#[derive(Debug, Clone, Copy, Default)]
pub struct HistoryService;

impl HistoryService {
    /// Move `history` into a new worker task.
    ///
    /// The worker stops once every [`HistoryHandle`] is dropped and hands the
    /// engine back through the returned join handle.
    pub fn spawn(history: LiveHistory) -> (HistoryHandle, JoinHandle<LiveHistory>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run(history, receiver));
        (HistoryHandle { sender }, worker)
    }
}

/// Cloneable entry point to a running [`HistoryService`] worker.
#[derive(Debug, Clone)]
pub struct HistoryHandle {
    sender: mpsc::UnboundedSender<Command>,
}

impl HistoryHandle {
    /// Queue a host event. Never blocks, so it is safe to call from a
    /// synchronous game-loop callback.
    pub fn submit(&self, event: HostEvent) -> Result<(), ReplayError> {
        self.sender
            .send(Command::Event(event))
            .map_err(|closed| {
                debug!(command = ?closed.0, "Event submitted after worker stopped");
                ReplayError::IntakeClosed
            })
    }

    /// Entries recorded on the tile at `(x, y)`.
    pub async fn history_at(&self, x: i32, y: i32) -> Result<Vec<HistoryEntry>, ReplayError> {
        let (reply, response) = oneshot::channel();
        self.request(Command::HistoryAt { x, y, reply })?;
        response.await.ok().ok_or(ReplayError::IntakeClosed)
    }

    /// Entries recorded for the player `uuid`.
    pub async fn history_of(&self, uuid: &str) -> Result<Vec<HistoryEntry>, ReplayError> {
        let (reply, response) = oneshot::channel();
        self.request(Command::HistoryOf {
            uuid: uuid.to_owned(),
            reply,
        })?;
        response.await.ok().ok_or(ReplayError::IntakeClosed)
    }

    fn request(&self, command: Command) -> Result<(), ReplayError> {
        self.sender
            .send(command)
            .ok()
            .ok_or(ReplayError::IntakeClosed)
    }
}

async fn run(
    mut history: LiveHistory,
    mut receiver: mpsc::UnboundedReceiver<Command>,
) -> LiveHistory {
    while let Some(command) = receiver.recv().await {
        match command {
            Command::Event(event) => history.handle(&event),
            Command::HistoryAt { x, y, reply } => {
                // The requester may have given up waiting.
                let _ = reply.send(history.history_at(x, y));
            }
            Command::HistoryOf { uuid, reply } => {
                let _ = reply.send(history.history_of(&uuid));
            }
        }
    }
    debug!(session = %history.session_id(), "History worker stopped");
    history
}

#[cfg(test)]
mod tests {
    use warden_history::HistoryConfig;
    use warden_types::{
        Block, BuildEndEvent, Building, BuildingKind, GameState, Player, PlayerUuid, RawConfig,
        StateChangeEvent, TilePos, Unit,
    };

    use super::*;

    fn placed(x: i32, uuid: &str) -> HostEvent {
        let anchor = TilePos::new(x, 0);
        HostEvent::from(BuildEndEvent {
            unit: Some(Unit {
                id: 1,
                kind: String::from("alpha"),
                player: Some(Player {
                    uuid: PlayerUuid::from(uuid),
                    name: String::from(uuid),
                }),
            }),
            tile: anchor,
            building: Some(Building::new(BuildingKind::Building, Block::new("router"), anchor)),
            breaking: false,
            config: RawConfig::Null,
        })
    }

    #[tokio::test]
    async fn queries_observe_earlier_events() {
        let history = LiveHistory::with_builtin_decoders(&HistoryConfig::default());
        let (handle, _worker) = HistoryService::spawn(history);

        for x in 0..5 {
            assert!(handle.submit(placed(x, "p")).is_ok());
        }
        let mine = handle.history_of("p").await.unwrap_or_default();
        assert_eq!(mine.len(), 5);
        let tile = handle.history_at(4, 0).await.unwrap_or_default();
        assert_eq!(tile.len(), 1);
    }

    #[tokio::test]
    async fn reset_is_ordered_with_events() {
        let history = LiveHistory::with_builtin_decoders(&HistoryConfig::default());
        let (handle, _worker) = HistoryService::spawn(history);

        assert!(handle.submit(placed(0, "p")).is_ok());
        assert!(
            handle
                .submit(HostEvent::from(StateChangeEvent {
                    from: GameState::Menu,
                    to: GameState::Playing,
                }))
                .is_ok()
        );
        assert!(handle.submit(placed(1, "p")).is_ok());

        let mine = handle.history_of("p").await.unwrap_or_default();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine.first().map(|e| e.position), Some(TilePos::new(1, 0)));
    }

    #[tokio::test]
    async fn worker_returns_engine_when_handles_drop() {
        let history = LiveHistory::with_builtin_decoders(&HistoryConfig::default());
        let (handle, worker) = HistoryService::spawn(history);
        assert!(handle.submit(placed(3, "p")).is_ok());
        drop(handle);

        let history = worker.await.ok();
        let positions = history.map(|h| h.session().tracked_positions());
        assert_eq!(positions, Some(1));
    }
}
