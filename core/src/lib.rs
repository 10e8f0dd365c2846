//! rlp-core
//!
//! Self-describing binary encoding for unsigned integers, byte strings and
//! nested lists: a lazy borrowed reader and a canonical append-only writer.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;

// Codec
pub mod rlp;

pub use constants::{RLP_EMPTY_LIST, RLP_NULL};
pub use types::{DecodeConfig, Result, RlpError};
pub use rlp::{rlp, Encodable, FromNode, ListBuilder, Node, NodeKind, RlpInt, RlpStream};

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::rlp::{rlp, Encodable, FromNode, IntTier, ListBuilder, Node, NodeKind, RlpInt, RlpStream};
    pub use crate::types::{DecodeConfig, RlpError};
    pub use crate::rlp_list;
}
