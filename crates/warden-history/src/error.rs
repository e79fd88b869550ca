//! Error types for the `warden-history` crate.
//!
//! Decoding failures never leave the crate: the registry turns a
//! [`DecodeError`] into "no configuration" for the entry being recorded.

/// Errors a configuration decoder can raise on malformed raw values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The payload ended before a field could be read.
    #[error("payload truncated: needed {needed} bytes at offset {offset}")]
    Truncated {
        /// Bytes required by the field.
        needed: usize,
        /// Offset the field starts at.
        offset: usize,
    },

    /// A length prefix was negative.
    #[error("negative length prefix: {0}")]
    NegativeLength(i32),

    /// A logic program exceeds the host's size limit.
    #[error("program is {len} bytes, limit is {max}")]
    CodeTooLong {
        /// Declared length.
        len: usize,
        /// Maximum accepted length.
        max: usize,
    },

    /// A string field is not valid UTF-8.
    #[error("invalid UTF-8 in payload: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// The program payload uses a format version this crate does not read.
    #[error("unsupported program version {0}")]
    UnsupportedVersion(u8),

    /// A unit factory plan index does not name a plan.
    #[error("plan index {index} out of range ({plans} plans)")]
    PlanOutOfRange {
        /// Requested index.
        index: i32,
        /// Number of plans the block declares.
        plans: usize,
    },
}
