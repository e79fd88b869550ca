//! Replay binary for the Warden history engine.
//!
//! Feeds a JSON-lines file of host events and queries through a
//! [`LiveHistory`] and prints every query result as a JSON line on stdout.
//! Logs go to stderr.
//!
//! ```text
//! warden-replay events.jsonl
//! warden-replay < events.jsonl
//! ```
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `$WARDEN_CONFIG` or `warden-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Spawn the history worker
//! 4. Replay the input
//! 5. Log the final index sizes

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::info;
use tracing_subscriber::EnvFilter;
use warden_history::{LiveHistory, WardenConfig};
use warden_replay::{HistoryService, ReplayError, replay};

/// Environment variable naming an alternate config file.
const CONFIG_ENV: &str = "WARDEN_CONFIG";

/// Config file used when [`CONFIG_ENV`] is unset.
const DEFAULT_CONFIG_PATH: &str = "warden-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, input, or the history worker fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (config, source) = load_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_writer(io::stderr)
        .with_target(true)
        .init();

    info!(
        config_path = ?source,
        tile_entries_limit = config.history.tile_entries_limit.get(),
        player_entries_limit = config.history.player_entries_limit.get(),
        "Configuration loaded"
    );

    let history = LiveHistory::with_builtin_decoders(&config.history);
    info!(session = %history.session_id(), "History session started");
    let (handle, worker) = HistoryService::spawn(history);

    let input = open_input(std::env::args_os().nth(1).map(PathBuf::from))?;
    let stdout = io::stdout();
    let summary = replay::run(input, stdout.lock(), &handle).await?;
    drop(handle);

    let history = worker.await.map_err(|e| ReplayError::Worker {
        message: e.to_string(),
    })?;
    info!(
        events = summary.events,
        queries = summary.queries,
        skipped = summary.skipped,
        tracked_positions = history.session().tracked_positions(),
        tracked_players = history.session().tracked_players(),
        "Replay complete"
    );

    Ok(())
}

/// Load configuration, returning the file it came from if any.
fn load_config() -> Result<(WardenConfig, Option<PathBuf>), ReplayError> {
    let path = std::env::var_os(CONFIG_ENV)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    if path.exists() {
        let config = WardenConfig::from_file(&path)?;
        Ok((config, Some(path)))
    } else {
        Ok((WardenConfig::default(), None))
    }
}

/// Open the replay input: the given path, or stdin for `None` and `-`.
fn open_input(path: Option<PathBuf>) -> Result<Box<dyn BufRead>, ReplayError> {
    match path {
        Some(path) if path != Path::new("-") => {
            let file = File::open(&path)?;
            Ok(Box::new(BufReader::new(file)))
        }
        _ => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}
