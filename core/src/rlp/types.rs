//! Prefix classification.
//!
//! Everything about an item is decided by its first byte. `classify` is the
//! pure O(1) mapping; `Header` adds the bounds-checked length fields.

use crate::constants::{
    ADDRESSED_INT_BASE, COUNT_MASK, DIRECT_INT_LIMIT, INDIRECT_VALUE_BIAS, LIST_BASE,
    MAX_DIRECT_COUNT, MAX_FIXED_INT_BYTES, RESERVED_BASE, STRING_BASE,
};
use crate::types::{Result, RlpError};
use crate::utils::{checked_slice, read_length_be};

/// Closed set of things a node can be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Null,
    Integer(IntTier),
    String,
    List,
}

/// Integer sub-tiers, as laid out on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntTier {
    /// Value is the prefix byte (0..=23).
    Direct,
    /// `prefix - 23` payload bytes follow (1..=32).
    IndirectValue,
    /// A length-of-length field gives the payload size.
    IndirectAddressed,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Null => "null",
            NodeKind::Integer(_) => "integer",
            NodeKind::String => "string",
            NodeKind::List => "list",
        }
    }
}

/// Map a prefix byte to its kind. Reserved prefixes have none.
#[inline]
pub const fn classify(prefix: u8) -> Result<NodeKind> {
    match prefix {
        p if p < DIRECT_INT_LIMIT => Ok(NodeKind::Integer(IntTier::Direct)),
        p if p < ADDRESSED_INT_BASE => Ok(NodeKind::Integer(IntTier::IndirectValue)),
        p if p < STRING_BASE => Ok(NodeKind::Integer(IntTier::IndirectAddressed)),
        p if p < LIST_BASE => Ok(NodeKind::String),
        p if p < RESERVED_BASE => Ok(NodeKind::List),
        p => Err(RlpError::InvalidPrefix(p)),
    }
}

/// Number of length-of-length bytes following `prefix`. Valid for all kinds.
#[inline]
pub const fn length_size(prefix: u8) -> usize {
    let n = (prefix & COUNT_MASK) as usize;
    if n > MAX_DIRECT_COUNT {
        n - MAX_DIRECT_COUNT
    } else {
        0
    }
}

/// Decoded item header.
///
/// `count` is a byte length for integers and strings, an element count for lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub kind: NodeKind,
    pub length_size: usize,
    pub count: usize,
}

impl Header {
    /// Offset of the first payload byte.
    #[inline]
    pub const fn payload_offset(&self) -> usize {
        match self.kind {
            NodeKind::Integer(IntTier::Direct) => 1,
            _ => 1 + self.length_size,
        }
    }

    /// Bytes occupied by prefix + length field + payload. `None` for lists,
    /// which need a walk, and for a declared length that overflows `usize`.
    #[inline]
    pub fn flat_span(&self) -> Option<usize> {
        match self.kind {
            NodeKind::Integer(IntTier::Direct) => Some(1),
            NodeKind::Integer(_) | NodeKind::String => {
                self.payload_offset().checked_add(self.count)
            }
            NodeKind::List | NodeKind::Null => None,
        }
    }

    /// Parse the header of the item starting at `data[0]`.
    ///
    /// Bounds are checked for the length-of-length field only; payload bounds
    /// are checked by whoever slices the payload.
    pub fn parse(data: &[u8]) -> Result<Header> {
        let prefix = *data.first().ok_or(RlpError::OutOfRange {
            offset: 0,
            needed: 1,
            available: 0,
        })?;

        let kind = classify(prefix).map_err(|e| {
            tracing::debug!(prefix, "reserved prefix");
            e
        })?;

        let header = match kind {
            NodeKind::Integer(IntTier::Direct) => Header { kind, length_size: 0, count: 0 },
            NodeKind::Integer(IntTier::IndirectValue) => Header {
                kind,
                length_size: 0,
                count: (prefix - INDIRECT_VALUE_BIAS) as usize,
            },
            NodeKind::Integer(IntTier::IndirectAddressed) => {
                let length_size = length_size(prefix);
                let count = read_length_be(data, 1, length_size)?;
                if count <= MAX_FIXED_INT_BYTES {
                    tracing::debug!(count, "addressed integer fits the indirect-value tier");
                    return Err(RlpError::NonCanonical { offset: 1 });
                }
                Header { kind, length_size, count }
            }
            NodeKind::String | NodeKind::List => {
                let length_size = length_size(prefix);
                let count = if length_size == 0 {
                    (prefix & COUNT_MASK) as usize
                } else {
                    let count = read_length_be(data, 1, length_size)?;
                    if count <= MAX_DIRECT_COUNT {
                        tracing::debug!(count, "length field used for a direct count");
                        return Err(RlpError::NonCanonical { offset: 1 });
                    }
                    count
                };
                Header { kind, length_size, count }
            }
            NodeKind::Null => return Err(RlpError::InvalidPrefix(prefix)),
        };
        Ok(header)
    }

    /// Bounds-checked payload of an integer or string item.
    pub fn value_payload<'a>(&self, data: &'a [u8]) -> Result<&'a [u8]> {
        match self.kind {
            NodeKind::Integer(IntTier::Direct) => Ok(&[]),
            NodeKind::Integer(_) | NodeKind::String => {
                checked_slice(data, self.payload_offset(), self.count)
            }
            NodeKind::List | NodeKind::Null => Err(RlpError::BadCast),
        }
    }
}
