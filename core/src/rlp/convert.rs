//! Typed conversions out of a `Node`.
//!
//! Each target type gets a strict reading (typed error) and a best-effort one
//! (typed default), selected by type rather than by accessor name:
//!
//! ```
//! use rlp_core::rlp::{rlp, Node};
//!
//! let bytes = rlp(&1024u64);
//! let node = Node::new(&bytes);
//! assert_eq!(node.convert::<u64>(), 1024);
//! assert!(node.convert_strict::<String>().is_err());
//! ```

use ethereum_types::U256;
use malachite::Natural;

use crate::rlp::decode::Node;
use crate::types::Result;

pub trait FromNode<'a>: Sized {
    fn from_node_strict(node: &Node<'a>) -> Result<Self>;

    /// Best-effort reading; never fails.
    fn from_node(node: &Node<'a>) -> Self;
}

impl<'a> FromNode<'a> for u64 {
    fn from_node_strict(node: &Node<'a>) -> Result<Self> {
        node.to_slim_int_strict()
    }

    fn from_node(node: &Node<'a>) -> Self {
        node.to_slim_int()
    }
}

impl<'a> FromNode<'a> for U256 {
    fn from_node_strict(node: &Node<'a>) -> Result<Self> {
        node.to_fat_int_strict()
    }

    fn from_node(node: &Node<'a>) -> Self {
        node.to_fat_int()
    }
}

impl<'a> FromNode<'a> for Natural {
    fn from_node_strict(node: &Node<'a>) -> Result<Self> {
        node.to_big_int_strict()
    }

    fn from_node(node: &Node<'a>) -> Self {
        node.to_big_int()
    }
}

impl<'a> FromNode<'a> for String {
    fn from_node_strict(node: &Node<'a>) -> Result<Self> {
        node.to_text_strict()
    }

    fn from_node(node: &Node<'a>) -> Self {
        node.to_text()
    }
}

impl<'a> FromNode<'a> for &'a [u8] {
    fn from_node_strict(node: &Node<'a>) -> Result<Self> {
        node.to_bytes_strict()
    }

    fn from_node(node: &Node<'a>) -> Self {
        node.to_bytes()
    }
}

impl<'a> FromNode<'a> for Node<'a> {
    fn from_node_strict(node: &Node<'a>) -> Result<Self> {
        Ok(node.clone())
    }

    fn from_node(node: &Node<'a>) -> Self {
        node.clone()
    }
}

/// Lists convert element-wise.
impl<'a, T: FromNode<'a>> FromNode<'a> for Vec<T> {
    fn from_node_strict(node: &Node<'a>) -> Result<Self> {
        node.to_list_strict()?
            .iter()
            .map(T::from_node_strict)
            .collect()
    }

    fn from_node(node: &Node<'a>) -> Self {
        node.iter().map(|item| T::from_node(&item)).collect()
    }
}

impl<'a> Node<'a> {
    pub fn convert<T: FromNode<'a>>(&self) -> T {
        T::from_node(self)
    }

    pub fn convert_strict<T: FromNode<'a>>(&self) -> Result<T> {
        T::from_node_strict(self)
    }
}
