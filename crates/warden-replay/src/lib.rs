//! Replay harness for the Warden history engine.
//!
//! Runs a [`warden_history::LiveHistory`] behind a single worker task
//! ([`intake`]) and drives it from a JSON-lines file of host events and
//! queries ([`replay`]).

pub mod error;
pub mod intake;
pub mod replay;

pub use error::ReplayError;
pub use intake::{HistoryHandle, HistoryService};
pub use replay::{Query, QueryResult, ReplayLine, ReplaySummary};
