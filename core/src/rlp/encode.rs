//! Canonical writer.
//!
//! `RlpStream` appends one canonical encoding per call. A list is opened by
//! writing its count prefix; it closes once that many children have been
//! appended at its level. The stream keeps a stack of open lists so that
//! finalizing with children still owed fails instead of producing bytes no
//! reader can frame.
//!
//! `ListBuilder` is the checked handle for one open list: appending past the
//! declared count, or while a nested list is unfinished, is an
//! `ArityViolation`.

use bytes::Bytes;
use ethereum_types::U256;
use malachite::Natural;

use crate::constants::{
    DIRECT_INT_LIMIT, INDIRECT_VALUE_BIAS, INT_BASE, LIST_BASE, MAX_DIRECT_COUNT,
    MAX_FIXED_INT_BYTES, STRING_BASE,
};
use crate::rlp::decode::Node;
use crate::rlp::int::RlpInt;
use crate::types::{Result, RlpError};
use crate::utils::{bytes_required, write_length_be};

/// Types with a canonical encoding. An implementation appends exactly one item.
pub trait Encodable {
    fn rlp_append(&self, s: &mut RlpStream);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenList {
    declared: usize,
    owed: usize,
}

/// Append-only encoder.
#[derive(Debug, Default, Clone)]
pub struct RlpStream {
    out: Vec<u8>,
    open: Vec<OpenList>,
    /// Declared count of a list opened as the first item of the stream.
    root: Option<usize>,
    /// Items appended at top level after that list closed.
    stray: usize,
}

impl RlpStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// A stream whose first item is a list of `items` children.
    pub fn new_list(items: usize) -> Self {
        let mut s = Self::new();
        s.append_list(items);
        s
    }

    /// Append any encodable value.
    pub fn append<E: Encodable + ?Sized>(&mut self, value: &E) -> &mut Self {
        value.rlp_append(self);
        self
    }

    /// Append an integer of any tier in its minimal form.
    pub fn append_int<T: RlpInt>(&mut self, value: &T) -> &mut Self {
        let bytes = value.to_be_bytes_min();
        match bytes.len() {
            0 => self.out.push(INT_BASE),
            1 if bytes[0] < DIRECT_INT_LIMIT => self.out.push(bytes[0]),
            n if n <= MAX_FIXED_INT_BYTES => {
                self.out.push(INDIRECT_VALUE_BIAS + n as u8);
                self.out.extend_from_slice(&bytes);
            }
            n => {
                self.push_long_count(n, INT_BASE);
                self.out.extend_from_slice(&bytes);
            }
        }
        self.note_items(1);
        self
    }

    /// Append a byte string.
    pub fn append_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.push_count(bytes.len(), STRING_BASE);
        self.out.extend_from_slice(bytes);
        self.note_items(1);
        self
    }

    /// Open a list of `items` children. The next `items` appends at this level
    /// fill it.
    pub fn append_list(&mut self, items: usize) -> &mut Self {
        let fresh = self.out.is_empty();
        self.push_count(items, LIST_BASE);
        self.open_list(items, fresh);
        self
    }

    /// Append `items` already-encoded items verbatim.
    pub fn append_raw(&mut self, encoded: &[u8], items: usize) -> &mut Self {
        self.out.extend_from_slice(encoded);
        self.note_items(items);
        self
    }

    /// Open a list and return its checked handle.
    pub fn begin_list(&mut self, items: usize) -> ListBuilder<'_> {
        let fresh = self.out.is_empty();
        self.push_count(items, LIST_BASE);
        let depth = self.open.len();
        self.open_list(items, fresh);
        ListBuilder {
            stream: self,
            depth,
            declared: items,
        }
    }

    /// True when no list is waiting for children and nothing trails a
    /// closed root list.
    pub fn is_finished(&self) -> bool {
        self.open.is_empty() && self.stray == 0
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.out.len()
    }

    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    /// The finished encoding. Fails if an open list still owes children.
    pub fn out(&self) -> Result<&[u8]> {
        self.check_finished()?;
        Ok(&self.out)
    }

    pub fn into_bytes(self) -> Result<Vec<u8>> {
        self.check_finished()?;
        Ok(self.out)
    }

    pub fn freeze(self) -> Result<Bytes> {
        self.into_bytes().map(Bytes::from)
    }

    /// The buffer as is, without the arity check. For callers that appended a
    /// structure known to be complete.
    pub fn drain(self) -> Vec<u8> {
        self.out
    }

    fn check_finished(&self) -> Result<()> {
        match self.open.last() {
            None if self.stray > 0 => {
                let declared = self.root.unwrap_or(0);
                tracing::warn!(
                    declared,
                    stray = self.stray,
                    "items appended after the root list closed"
                );
                Err(RlpError::ArityViolation { declared, owed: 0 })
            }
            None => Ok(()),
            Some(list) => {
                tracing::warn!(
                    declared = list.declared,
                    owed = list.owed,
                    depth = self.open.len(),
                    "stream finalized with an unfinished list"
                );
                Err(RlpError::ArityViolation {
                    declared: list.declared,
                    owed: list.owed,
                })
            }
        }
    }

    fn open_list(&mut self, items: usize, fresh: bool) {
        // the list itself is one child of its parent
        match self.open.last_mut() {
            Some(parent) => parent.owed = parent.owed.saturating_sub(1),
            None if fresh => self.root = Some(items),
            None => self.note_stray(1),
        }
        if items > 0 {
            self.open.push(OpenList { declared: items, owed: items });
        }
        self.close_completed();
    }

    fn note_items(&mut self, items: usize) {
        for noted in 0..items {
            match self.open.last_mut() {
                Some(list) => list.owed = list.owed.saturating_sub(1),
                None => {
                    self.note_stray(items - noted);
                    break;
                }
            }
            self.close_completed();
        }
    }

    fn note_stray(&mut self, items: usize) {
        if self.root.is_some() {
            self.stray += items;
        }
    }

    fn close_completed(&mut self) {
        while matches!(self.open.last(), Some(list) if list.owed == 0) {
            self.open.pop();
        }
    }

    /// Prefix for a byte length or item count.
    fn push_count(&mut self, count: usize, base: u8) {
        if count <= MAX_DIRECT_COUNT {
            self.out.push(base + count as u8);
        } else {
            self.push_long_count(count, base);
        }
    }

    fn push_long_count(&mut self, count: usize, base: u8) {
        let len = bytes_required(count);
        self.out.push(base + MAX_DIRECT_COUNT as u8 + len as u8);
        write_length_be(&mut self.out, count, len);
    }
}

/// Checked handle for one open list.
///
/// Borrows the stream, so while it (or a nested handle) is alive nothing else
/// can write.
#[derive(Debug)]
pub struct ListBuilder<'s> {
    stream: &'s mut RlpStream,
    depth: usize,
    declared: usize,
}

impl<'s> ListBuilder<'s> {
    /// Children still owed.
    pub fn remaining(&self) -> usize {
        self.stream.open.get(self.depth).map_or(0, |list| list.owed)
    }

    pub fn is_complete(&self) -> bool {
        self.remaining() == 0
    }

    fn check_slot(&self) -> Result<()> {
        let open = &self.stream.open;
        if open.len() > self.depth + 1 {
            // a nested list opened from here is still waiting for children
            let inner = open[open.len() - 1];
            tracing::debug!(depth = self.depth, "append while a nested list is unfinished");
            return Err(RlpError::ArityViolation {
                declared: inner.declared,
                owed: inner.owed,
            });
        }
        if open.len() <= self.depth {
            tracing::debug!(declared = self.declared, "append to a complete list");
            return Err(RlpError::ArityViolation {
                declared: self.declared,
                owed: 0,
            });
        }
        Ok(())
    }

    pub fn append<E: Encodable + ?Sized>(&mut self, value: &E) -> Result<&mut Self> {
        self.check_slot()?;
        self.stream.append(value);
        Ok(self)
    }

    pub fn append_int<T: RlpInt>(&mut self, value: &T) -> Result<&mut Self> {
        self.check_slot()?;
        self.stream.append_int(value);
        Ok(self)
    }

    pub fn append_bytes(&mut self, bytes: &[u8]) -> Result<&mut Self> {
        self.check_slot()?;
        self.stream.append_bytes(bytes);
        Ok(self)
    }

    /// Open a nested list as the next child.
    pub fn begin_list(&mut self, items: usize) -> Result<ListBuilder<'_>> {
        self.check_slot()?;
        Ok(self.stream.begin_list(items))
    }

    /// Assert the list received all its children.
    pub fn finish(self) -> Result<()> {
        match self.remaining() {
            0 => Ok(()),
            owed => Err(RlpError::ArityViolation {
                declared: self.declared,
                owed,
            }),
        }
    }
}

// ----------------------------------------------------------------------
// Encodable impls
// ----------------------------------------------------------------------

macro_rules! impl_encodable_uint {
    ($($t:ty),*) => {
        $(
            impl Encodable for $t {
                fn rlp_append(&self, s: &mut RlpStream) {
                    s.append_int(&(*self as u64));
                }
            }
        )*
    };
}

impl_encodable_uint!(u8, u16, u32, u64, usize);

impl Encodable for U256 {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.append_int(self);
    }
}

impl Encodable for Natural {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.append_int(self);
    }
}

impl Encodable for str {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.append_bytes(self.as_bytes());
    }
}

impl Encodable for String {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.append_bytes(self.as_bytes());
    }
}

impl Encodable for Bytes {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.append_bytes(self);
    }
}

impl<T: Encodable> Encodable for [T] {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.append_list(self.len());
        for item in self {
            item.rlp_append(s);
        }
    }
}

impl<T: Encodable> Encodable for Vec<T> {
    fn rlp_append(&self, s: &mut RlpStream) {
        self.as_slice().rlp_append(s);
    }
}

impl<T: Encodable + ?Sized> Encodable for &T {
    fn rlp_append(&self, s: &mut RlpStream) {
        (**self).rlp_append(s);
    }
}

/// Re-emit an already-encoded item.
impl Encodable for Node<'_> {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.append_raw(self.data(), 1);
    }
}

/// Encode a single item.
pub fn rlp<E: Encodable + ?Sized>(value: &E) -> Vec<u8> {
    let mut s = RlpStream::new();
    s.append(value);
    s.drain()
}

/// Encode the arguments as one list.
///
/// ```
/// let out = rlp_core::rlp_list!["cat", "dog"];
/// assert_eq!(out, [0x82, 0x43, b'c', b'a', b't', 0x43, b'd', b'o', b'g']);
/// ```
#[macro_export]
macro_rules! rlp_list {
    (@unit $item:expr) => { () };
    () => {
        $crate::constants::RLP_EMPTY_LIST.to_vec()
    };
    ($($item:expr),+ $(,)?) => {{
        let items = <[()]>::len(&[$($crate::rlp_list!(@unit $item)),+]);
        let mut s = $crate::rlp::RlpStream::new_list(items);
        $( s.append(&$item); )+
        s.drain()
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_count_switches_form_at_56() {
        let mut s = RlpStream::new();
        s.push_count(55, STRING_BASE);
        assert_eq!(s.out, [0x77]);

        let mut s = RlpStream::new();
        s.push_count(56, STRING_BASE);
        assert_eq!(s.out, [0x78, 56]);

        let mut s = RlpStream::new();
        s.push_count(0x0100, LIST_BASE);
        assert_eq!(s.out, [0xb9, 0x01, 0x00]);
    }

    #[test]
    fn open_stack_unwinds_through_nested_lists() {
        let mut s = RlpStream::new_list(2);
        s.append_list(1);
        assert_eq!(s.open.len(), 2);
        s.append(&7u64);
        // inner closed, outer still owes one
        assert_eq!(s.open, vec![OpenList { declared: 2, owed: 1 }]);
        s.append(&"x");
        assert!(s.is_finished());
    }

    #[test]
    fn top_level_sequence_has_no_root() {
        let mut s = RlpStream::new();
        s.append(&1u64).append_list(0).append(&2u64);
        assert_eq!(s.root, None);
        assert!(s.is_finished());
    }

    #[test]
    fn sibling_after_root_is_stray() {
        let mut s = RlpStream::new_list(1);
        s.append(&1u64);
        assert_eq!(s.root, Some(1));
        s.append_list(0);
        assert_eq!(s.stray, 1);
        assert!(!s.is_finished());
    }

    #[test]
    fn empty_list_closes_immediately() {
        let mut s = RlpStream::new_list(1);
        s.append_list(0);
        assert!(s.is_finished());
        assert_eq!(s.out, [0x81, 0x80]);
    }
}
