use byteorder::{BigEndian, ByteOrder};

use crate::constants::MAX_LENGTH_BYTES;
use crate::types::{Result, RlpError};

/// Number of big-endian bytes needed to represent `v`. Zero needs none.
#[inline]
pub fn bytes_required(v: usize) -> usize {
    let mut v = v;
    let mut n = 0;
    while v != 0 {
        n += 1;
        v >>= 8;
    }
    n
}

/// Bounds-checked sub-slice `buf[offset..offset + len]`.
#[inline]
pub fn checked_slice(buf: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    match offset.checked_add(len) {
        Some(end) if end <= buf.len() => Ok(&buf[offset..end]),
        _ => {
            tracing::trace!(offset, len, available = buf.len(), "read past end of buffer");
            Err(RlpError::OutOfRange {
                offset,
                needed: len,
                available: buf.len().saturating_sub(offset),
            })
        }
    }
}

/// Read a 1..=8 byte big-endian length field starting at `offset`.
///
/// Rejects leading zero bytes; the caller checks the value against the direct range.
pub fn read_length_be(buf: &[u8], offset: usize, len: usize) -> Result<usize> {
    debug_assert!((1..=MAX_LENGTH_BYTES).contains(&len));
    let field = checked_slice(buf, offset, len)?;
    if field[0] == 0 {
        tracing::debug!(offset, "length field has a leading zero byte");
        return Err(RlpError::NonCanonical { offset });
    }
    let value = BigEndian::read_uint(field, len);
    usize::try_from(value).map_err(|_| RlpError::OutOfRange {
        offset,
        needed: usize::MAX,
        available: buf.len().saturating_sub(offset),
    })
}

/// Append `v` as exactly `len` big-endian bytes.
pub fn write_length_be(out: &mut Vec<u8>, v: usize, len: usize) {
    debug_assert!((1..=MAX_LENGTH_BYTES).contains(&len));
    let mut field = [0u8; MAX_LENGTH_BYTES];
    BigEndian::write_uint(&mut field[..len], v as u64, len);
    out.extend_from_slice(&field[..len]);
}

/// True if every byte is printable ASCII (space through tilde).
pub fn is_printable(bytes: &[u8]) -> bool {
    bytes.iter().all(|b| (0x20..0x7f).contains(b))
}
