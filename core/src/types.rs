//! Crate-wide error and decoder configuration.

use thiserror::Error;

use crate::constants::DEFAULT_MAX_DEPTH;

/// Unified codec error.
///
/// - `BadCast` carries no payload: callers tell cases apart by the accessor
///   they called.
/// - Bounds, prefix and canonical-form faults describe malformed input and are
///   kept distinct from `BadCast`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RlpError {
    /// The node's category or integer tier does not satisfy the requested reading.
    #[error("bad cast")]
    BadCast,

    /// A length field or payload reaches past the end of the buffer.
    #[error("out of range: need {needed} bytes at offset {offset}, have {available}")]
    OutOfRange {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// Prefix byte in the reserved band (0xC0..=0xFF).
    #[error("invalid prefix: 0x{0:02x}")]
    InvalidPrefix(u8),

    /// A length-of-length field is longer than its value requires.
    #[error("non-canonical length field at offset {offset}")]
    NonCanonical { offset: usize },

    /// List nesting deeper than the configured bound.
    #[error("nesting depth exceeds limit of {limit}")]
    DepthExceeded { limit: usize },

    /// A list was given more children than declared, or finalized with children owed.
    #[error("arity violation: list declared {declared} items, {owed} still owed")]
    ArityViolation { declared: usize, owed: usize },
}

pub type Result<T> = std::result::Result<T, RlpError>;

/// Decoder limits applied while walking untrusted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeConfig {
    /// Maximum list nesting followed by `total_span` and `validate`.
    pub max_depth: usize,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH }
    }
}

impl DecodeConfig {
    pub fn new(max_depth: Option<usize>) -> Self {
        Self {
            max_depth: max_depth.unwrap_or(DEFAULT_MAX_DEPTH),
        }
    }
}
