//! Error types for the replay harness.

/// Top-level error for the replay harness.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: warden_history::ConfigError,
    },

    /// Reading input or writing output failed.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// An input line is not a valid event or query.
    #[error("line {line}: {source}")]
    Parse {
        /// One-based line number.
        line: usize,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// A query result could not be serialized.
    #[error("failed to serialize query result: {source}")]
    Serialize {
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// The history worker stopped before the request was handled.
    #[error("history worker is no longer running")]
    IntakeClosed,

    /// The history worker task failed.
    #[error("history worker failed: {message}")]
    Worker {
        /// Description of the failure.
        message: String,
    },
}
