//! Recursive length-prefix codec.
//!
//! Responsibilities:
//! - Classify items from their prefix byte
//! - Decode lazily through borrowed `Node` views
//! - Encode canonical minimal forms through `RlpStream`
//!
//! Non-responsibilities:
//! - Schemas or semantic types beyond {integer, string, list}
//! - Interpreting string contents

pub mod types;
pub mod int;
pub mod decode;
pub mod encode;
pub mod convert;
pub mod display;

pub use types::{classify, Header, IntTier, NodeKind};
pub use int::RlpInt;
pub use decode::{total_span, Node, NodeIter};
pub use encode::{rlp, Encodable, ListBuilder, RlpStream};
pub use convert::FromNode;
