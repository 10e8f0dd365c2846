//! Lazy reader over encoded bytes.
//!
//! A `Node` borrows a byte range and decodes on demand. Classification reads
//! only the prefix byte; list indexing walks element boundaries with
//! `total_span` and remembers the last element it resolved.
//!
//! Access modes:
//! - non-strict accessors never fail (zero, empty, or a null node)
//! - `*_strict` / `*_from_string` accessors return `RlpError`

use std::cell::Cell;

use bytes::Bytes;
use ethereum_types::U256;
use malachite::Natural;

use crate::constants::{
    ADDRESSED_INT_BASE, DIRECT_INT_LIMIT, LIST_BASE, RESERVED_BASE, SLIM_INT_LIMIT, STRING_BASE,
};
use crate::rlp::int::RlpInt;
use crate::rlp::types::{classify, Header, IntTier, NodeKind};
use crate::types::{DecodeConfig, Result, RlpError};

/// Total encoded size of the item starting at `data[0]`.
///
/// Lists are walked element by element, so this is a deep traversal.
pub fn total_span(data: &[u8], config: &DecodeConfig) -> Result<usize> {
    span_at(data, 0, config.max_depth)
}

fn span_at(data: &[u8], depth: usize, max_depth: usize) -> Result<usize> {
    let header = Header::parse(data)?;
    if header.kind != NodeKind::List {
        // an overflowing declared length is truncation too
        return match header.flat_span() {
            Some(span) if span <= data.len() => Ok(span),
            _ => {
                tracing::trace!(
                    count = header.count,
                    available = data.len(),
                    "item payload truncated"
                );
                Err(RlpError::OutOfRange {
                    offset: header.payload_offset(),
                    needed: header.count,
                    available: data.len().saturating_sub(header.payload_offset()),
                })
            }
        };
    }

    if header.count > 0 && depth >= max_depth {
        tracing::debug!(max_depth, "list nesting too deep");
        return Err(RlpError::DepthExceeded { limit: max_depth });
    }
    let mut offset = header.payload_offset();
    for _ in 0..header.count {
        let rest = data.get(offset..).unwrap_or(&[]);
        offset += span_at(rest, depth + 1, max_depth).map_err(|e| shift(e, offset))?;
    }
    Ok(offset)
}

/// Rebase a nested error's offset onto the enclosing item.
fn shift(err: RlpError, by: usize) -> RlpError {
    match err {
        RlpError::OutOfRange { offset, needed, available } => RlpError::OutOfRange {
            offset: offset + by,
            needed,
            available,
        },
        RlpError::NonCanonical { offset } => RlpError::NonCanonical { offset: offset + by },
        other => other,
    }
}

/// Sequential-access cache: last resolved index, where it ended, and its bytes.
#[derive(Debug, Clone, Copy, Default)]
struct ListCursor<'a> {
    index: Option<usize>,
    end: usize,
    item: &'a [u8],
}

/// Non-owning, lazily classified view of one encoded item.
///
/// Indexing mutates the cursor cache through a `Cell`, so a `Node` can be sent
/// to another thread but not shared between threads. Decode one buffer
/// concurrently by giving each thread its own `Node`.
#[derive(Debug, Clone)]
pub struct Node<'a> {
    data: &'a [u8],
    config: DecodeConfig,
    cursor: Cell<ListCursor<'a>>,
}

impl<'a> Default for Node<'a> {
    fn default() -> Self {
        Self::null()
    }
}

impl<'a> Node<'a> {
    /// Wrap encoded bytes. Nothing is decoded yet.
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_config(data, DecodeConfig::default())
    }

    pub fn with_config(data: &'a [u8], config: DecodeConfig) -> Self {
        Self {
            data,
            config,
            cursor: Cell::new(ListCursor::default()),
        }
    }

    /// The null node: an empty range.
    pub fn null() -> Self {
        Self::new(&[])
    }

    fn child(&self, data: &'a [u8]) -> Self {
        Self::with_config(data, self.config)
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn config(&self) -> &DecodeConfig {
        &self.config
    }

    #[inline]
    fn prefix(&self) -> Option<u8> {
        self.data.first().copied()
    }

    // ------------------------------------------------------------------
    // Classification
    // ------------------------------------------------------------------

    /// No value.
    pub fn is_null(&self) -> bool {
        self.data.is_empty()
    }

    /// Zero-length string or zero-length list.
    pub fn is_empty(&self) -> bool {
        matches!(self.prefix(), Some(STRING_BASE) | Some(LIST_BASE))
    }

    pub fn is_string(&self) -> bool {
        matches!(self.prefix(), Some(p) if (STRING_BASE..LIST_BASE).contains(&p))
    }

    pub fn is_list(&self) -> bool {
        matches!(self.prefix(), Some(p) if (LIST_BASE..RESERVED_BASE).contains(&p))
    }

    /// Integer of any tier.
    pub fn is_int(&self) -> bool {
        matches!(self.prefix(), Some(p) if p < STRING_BASE)
    }

    /// Fits `u64`; readable with `to_slim_int` as well as the wider readers.
    pub fn is_slim_int(&self) -> bool {
        matches!(self.prefix(), Some(p) if p < SLIM_INT_LIMIT)
    }

    /// Needs `U256`; more than 8 but at most 32 payload bytes.
    pub fn is_fat_int(&self) -> bool {
        matches!(self.prefix(), Some(p) if (SLIM_INT_LIMIT..ADDRESSED_INT_BASE).contains(&p))
    }

    /// Fits `U256` (slim or fat).
    pub fn is_fixed_int(&self) -> bool {
        matches!(self.prefix(), Some(p) if p < ADDRESSED_INT_BASE)
    }

    /// Needs `Natural`.
    pub fn is_big_int(&self) -> bool {
        matches!(self.prefix(), Some(p) if (ADDRESSED_INT_BASE..STRING_BASE).contains(&p))
    }

    fn is_direct_value_int(&self) -> bool {
        matches!(self.prefix(), Some(p) if p < DIRECT_INT_LIMIT)
    }

    /// Kind of this node; reserved prefixes are an error.
    pub fn kind(&self) -> Result<NodeKind> {
        match self.prefix() {
            None => Ok(NodeKind::Null),
            Some(p) => classify(p),
        }
    }

    /// Integer tier, if this is an integer.
    pub fn int_tier(&self) -> Option<IntTier> {
        match self.kind() {
            Ok(NodeKind::Integer(tier)) => Some(tier),
            _ => None,
        }
    }

    fn header(&self) -> Result<Header> {
        Header::parse(self.data)
    }

    /// Bytes used by the length-of-length field; 0 for direct forms and null.
    pub fn length_size(&self) -> usize {
        self.header().map(|h| h.length_size).unwrap_or(0)
    }

    /// Payload bytes. Cropped to the declared length for integers and strings;
    /// for lists, everything after the header. Empty if malformed.
    pub fn payload(&self) -> &'a [u8] {
        let Ok(header) = self.header() else {
            return &[];
        };
        match header.kind {
            NodeKind::List => self.data.get(header.payload_offset()..).unwrap_or(&[]),
            _ => header.value_payload(self.data).unwrap_or(&[]),
        }
    }

    /// Theoretical size of this item. Walks every nested list.
    ///
    /// Equals `data().len()` when the node spans exactly one item.
    pub fn actual_size(&self) -> Result<usize> {
        total_span(self.data, &self.config)
    }

    /// Full-depth structural check of the item at the start of the range.
    pub fn validate(&self) -> Result<()> {
        if self.is_null() {
            return Ok(());
        }
        self.actual_size().map(|_| ())
    }

    // ------------------------------------------------------------------
    // Sizes
    // ------------------------------------------------------------------

    /// Number of list items, or 0 if not a list.
    pub fn item_count(&self) -> usize {
        if !self.is_list() {
            return 0;
        }
        self.header().map(|h| h.count).unwrap_or(0)
    }

    pub fn item_count_strict(&self) -> Result<usize> {
        self.expect_kind(|n| n.is_list())?;
        Ok(self.header()?.count)
    }

    /// Number of string bytes, or 0 if not a string.
    pub fn string_size(&self) -> usize {
        if !self.is_string() {
            return 0;
        }
        self.header().map(|h| h.count).unwrap_or(0)
    }

    pub fn string_size_strict(&self) -> Result<usize> {
        self.expect_kind(|n| n.is_string())?;
        Ok(self.header()?.count)
    }

    /// Reserved prefixes fail as `InvalidPrefix`, everything else that does not
    /// satisfy `pred` as `BadCast`.
    fn expect_kind(&self, pred: impl Fn(&Self) -> bool) -> Result<()> {
        if let Some(p) = self.prefix() {
            if p >= RESERVED_BASE {
                return Err(RlpError::InvalidPrefix(p));
            }
        }
        if pred(self) {
            Ok(())
        } else {
            Err(RlpError::BadCast)
        }
    }

    // ------------------------------------------------------------------
    // List access
    // ------------------------------------------------------------------

    /// Item `index` of this list, or a null node if out of range, not a list,
    /// or malformed.
    ///
    /// Ascending access is amortized linear over the list; going backwards
    /// rescans from the first item.
    pub fn at(&self, index: usize) -> Node<'a> {
        if !self.is_list() || index >= self.item_count() {
            return Node::null();
        }
        self.resolve(index).unwrap_or_default()
    }

    /// As `at`, but a non-list or out-of-range index is `BadCast` and malformed
    /// input is reported.
    pub fn at_strict(&self, index: usize) -> Result<Node<'a>> {
        let count = self.item_count_strict()?;
        if index >= count {
            return Err(RlpError::BadCast);
        }
        self.resolve(index)
    }

    fn resolve(&self, index: usize) -> Result<Node<'a>> {
        let cursor = self.cursor.get();
        let (mut i, mut offset) = match cursor.index {
            Some(last) if last == index => return Ok(self.child(cursor.item)),
            Some(last) if last < index => (last + 1, cursor.end),
            _ => (0, self.header()?.payload_offset()),
        };

        loop {
            let rest = self.data.get(offset..).unwrap_or(&[]);
            let span = span_at(rest, 1, self.config.max_depth).map_err(|e| shift(e, offset))?;
            let item = &self.data[offset..offset + span];
            offset += span;
            self.cursor.set(ListCursor {
                index: Some(i),
                end: offset,
                item,
            });
            if i == index {
                return Ok(self.child(item));
            }
            i += 1;
        }
    }

    /// Iterate list items in order; empty for non-lists.
    pub fn iter(&self) -> NodeIter<'_, 'a> {
        NodeIter {
            parent: self,
            next: 0,
            count: self.item_count(),
        }
    }

    /// Materialize the items for repeated random access. Empty for non-lists.
    pub fn to_list(&self) -> Vec<Node<'a>> {
        self.iter().collect()
    }

    pub fn to_list_strict(&self) -> Result<Vec<Node<'a>>> {
        let count = self.item_count_strict()?;
        (0..count).map(|i| self.resolve(i)).collect()
    }

    // ------------------------------------------------------------------
    // Strings
    // ------------------------------------------------------------------

    /// Raw string bytes; empty if not a string.
    pub fn to_bytes(&self) -> &'a [u8] {
        if !self.is_string() {
            return &[];
        }
        self.payload()
    }

    pub fn to_bytes_strict(&self) -> Result<&'a [u8]> {
        self.expect_kind(|n| n.is_string())?;
        self.header()?.value_payload(self.data)
    }

    /// String bytes as text, invalid UTF-8 replaced; empty if not a string.
    pub fn to_text(&self) -> String {
        String::from_utf8_lossy(self.to_bytes()).into_owned()
    }

    /// String bytes as UTF-8 text; `BadCast` if not a string or not UTF-8.
    pub fn to_text_strict(&self) -> Result<String> {
        let bytes = self.to_bytes_strict()?;
        String::from_utf8(bytes.to_vec()).map_err(|_| RlpError::BadCast)
    }

    // ------------------------------------------------------------------
    // Integers
    // ------------------------------------------------------------------

    /// Generic best-effort integer read.
    ///
    /// Integers decode their payload; strings are read as a big-endian byte
    /// stream; anything else is zero.
    pub fn to_int<T: RlpInt>(&self) -> T {
        self.read_int().unwrap_or_else(|_| T::zero())
    }

    pub(crate) fn read_int<T: RlpInt>(&self) -> Result<T> {
        if !self.is_int() && !self.is_string() {
            return Err(RlpError::BadCast);
        }
        if self.is_direct_value_int() {
            return Ok(T::from_byte(self.data[0]));
        }
        let payload = self.header()?.value_payload(self.data)?;
        Ok(T::from_be_slice(payload))
    }

    pub fn to_slim_int(&self) -> u64 {
        self.to_int()
    }

    pub fn to_fat_int(&self) -> U256 {
        self.to_int()
    }

    pub fn to_big_int(&self) -> Natural {
        self.to_int()
    }

    /// `BadCast` unless `is_slim_int()`.
    pub fn to_slim_int_strict(&self) -> Result<u64> {
        self.expect_kind(|n| n.is_slim_int())?;
        self.read_int()
    }

    /// `BadCast` unless `is_fixed_int()`.
    pub fn to_fat_int_strict(&self) -> Result<U256> {
        self.expect_kind(|n| n.is_fixed_int())?;
        self.read_int()
    }

    /// `BadCast` unless `is_int()`.
    pub fn to_big_int_strict(&self) -> Result<Natural> {
        self.expect_kind(|n| n.is_int())?;
        self.read_int()
    }

    /// Read a string's bytes as a big-endian integer.
    ///
    /// `BadCast` if not a string or if the string is longer than `T` holds.
    pub fn to_int_from_string<T: RlpInt>(&self) -> Result<T> {
        let bytes = self.to_bytes_strict()?;
        if matches!(T::MAX_BYTES, Some(max) if bytes.len() > max) {
            return Err(RlpError::BadCast);
        }
        Ok(T::from_be_slice(bytes))
    }

    pub fn to_slim_int_from_string(&self) -> Result<u64> {
        self.to_int_from_string()
    }

    pub fn to_fat_int_from_string(&self) -> Result<U256> {
        self.to_int_from_string()
    }

    pub fn to_big_int_from_string(&self) -> Result<Natural> {
        self.to_int_from_string()
    }

    /// Value as `T` when the node is an integer or string whose payload fits `T`.
    fn numeric<T: RlpInt>(&self) -> Option<T> {
        if !self.is_int() && !self.is_string() {
            return None;
        }
        if self.is_direct_value_int() {
            return Some(T::from_byte(self.data[0]));
        }
        let payload = self.header().ok()?.value_payload(self.data).ok()?;
        if matches!(T::MAX_BYTES, Some(max) if payload.len() > max) {
            return None;
        }
        Some(T::from_be_slice(payload))
    }
}

impl<'a> From<&'a [u8]> for Node<'a> {
    fn from(data: &'a [u8]) -> Self {
        Node::new(data)
    }
}

impl<'a> From<&'a Vec<u8>> for Node<'a> {
    fn from(data: &'a Vec<u8>) -> Self {
        Node::new(data.as_slice())
    }
}

impl<'a> From<&'a str> for Node<'a> {
    fn from(data: &'a str) -> Self {
        Node::new(data.as_bytes())
    }
}

impl<'a> From<&'a Bytes> for Node<'a> {
    fn from(data: &'a Bytes) -> Self {
        Node::new(data.as_ref())
    }
}

// ----------------------------------------------------------------------
// Best-effort equality against literals
// ----------------------------------------------------------------------

impl PartialEq<str> for Node<'_> {
    fn eq(&self, other: &str) -> bool {
        self.is_string() && self.to_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for Node<'_> {
    fn eq(&self, other: &&str) -> bool {
        *self == **other
    }
}

impl PartialEq<String> for Node<'_> {
    fn eq(&self, other: &String) -> bool {
        *self == *other.as_str()
    }
}

impl PartialEq<u64> for Node<'_> {
    fn eq(&self, other: &u64) -> bool {
        self.numeric::<u64>().as_ref() == Some(other)
    }
}

impl PartialEq<U256> for Node<'_> {
    fn eq(&self, other: &U256) -> bool {
        self.numeric::<U256>().as_ref() == Some(other)
    }
}

impl PartialEq<Natural> for Node<'_> {
    fn eq(&self, other: &Natural) -> bool {
        self.numeric::<Natural>().as_ref() == Some(other)
    }
}

// ----------------------------------------------------------------------
// Iteration
// ----------------------------------------------------------------------

/// Lazy iterator over list items.
///
/// Drives the parent's cursor cache, so one ascending iterator is linear
/// overall. Interleaving several iterators over one node rescans.
#[derive(Debug, Clone)]
pub struct NodeIter<'n, 'a> {
    parent: &'n Node<'a>,
    next: usize,
    count: usize,
}

impl<'n, 'a> Iterator for NodeIter<'n, 'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Node<'a>> {
        if self.next >= self.count {
            return None;
        }
        match self.parent.resolve(self.next) {
            Ok(node) => {
                self.next += 1;
                Some(node)
            }
            Err(_) => {
                // malformed tail: stop
                self.next = self.count;
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.count - self.next))
    }
}

impl<'n, 'a> IntoIterator for &'n Node<'a> {
    type Item = Node<'a>;
    type IntoIter = NodeIter<'n, 'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_node_predicates_are_false() {
        let n = Node::null();
        assert!(n.is_null());
        assert!(!n.is_empty());
        assert!(!n.is_int());
        assert!(!n.is_string());
        assert!(!n.is_list());
        assert_eq!(n.kind(), Ok(NodeKind::Null));
        assert_eq!(n.item_count(), 0);
        assert_eq!(n.to_slim_int(), 0);
    }

    #[test]
    fn cursor_tracks_last_index() {
        let data = [0x83, 0x01, 0x02, 0x03];
        let n = Node::new(&data);
        assert_eq!(n.at(0).to_slim_int(), 1);
        assert_eq!(n.cursor.get().index, Some(0));
        assert_eq!(n.at(1).to_slim_int(), 2);
        assert_eq!(n.cursor.get().index, Some(1));
        assert_eq!(n.cursor.get().end, 3);
        // same index served from cache
        assert_eq!(n.at(1).data(), &[0x02]);
        assert_eq!(n.at(0).to_slim_int(), 1);
        assert_eq!(n.cursor.get().index, Some(0));
    }

    #[test]
    fn span_offsets_are_rebased() {
        // list of 2: "ab", then a string claiming 5 bytes with 1 present
        let data = [0x82, 0x42, b'a', b'b', 0x45, b'x'];
        let err = total_span(&data, &DecodeConfig::default()).unwrap_err();
        assert!(matches!(err, RlpError::OutOfRange { offset: 5, needed: 5, .. }));
    }
}
